use tonic::Status;

use crate::domain::auth::errors::AuthError;

pub mod is_admin;
pub mod login;
pub mod register;

impl From<AuthError> for Status {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidUserId(_)
            | AuthError::InvalidAppId(_)
            | AuthError::InvalidEmail(_)
            | AuthError::InvalidPassword(_) => Status::invalid_argument(err.to_string()),
            AuthError::InvalidCredentials => Status::unauthenticated(err.to_string()),
            AuthError::UserAlreadyExists => Status::already_exists(err.to_string()),
            AuthError::ApplicationNotFound => Status::not_found(err.to_string()),
            // Details were logged where the failure happened
            AuthError::Internal(_) => Status::internal("internal error"),
        }
    }
}
