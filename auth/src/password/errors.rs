use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid hash cost parameters: {0}")]
    InvalidCost(String),

    #[error("Stored password hash is malformed: {0}")]
    MalformedHash(String),
}
