use thiserror::Error;

/// Error for UserId validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("user id must be positive, got {0}")]
    NotPositive(i64),
}

/// Error for AppId validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AppIdError {
    #[error("app id must be positive, got {0}")]
    NotPositive(i32),
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("email is required")]
    Empty,

    #[error("invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for Password validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordInputError {
    #[error("password is required")]
    Empty,
}

/// Failures of the persistence layer, classified into what callers can act on.
///
/// Driver errors never escape as-is; their text survives only inside
/// `Internal` for diagnostics.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("user not found")]
    UserNotFound,

    #[error("application not found")]
    ApplicationNotFound,

    #[error("user already exists")]
    UserAlreadyExists,

    #[error("storage failure: {0}")]
    Internal(String),
}

/// Top-level error for all authentication operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    // Value object validation errors (automatically converted via #[from])
    #[error("invalid user id: {0}")]
    InvalidUserId(#[from] UserIdError),

    #[error("invalid app id: {0}")]
    InvalidAppId(#[from] AppIdError),

    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("invalid password: {0}")]
    InvalidPassword(#[from] PasswordInputError),

    // Domain-level errors
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("user already exists")]
    UserAlreadyExists,

    #[error("application not found")]
    ApplicationNotFound,

    // Infrastructure errors
    #[error("internal error: {0}")]
    Internal(String),
}
