use async_trait::async_trait;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::StorageError;
use crate::domain::auth::models::AppId;
use crate::domain::auth::models::ClientApplication;
use crate::domain::auth::models::EmailAddress;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;

/// Port for authentication service operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// # Arguments
    /// * `command` - Validated command containing email and password
    ///
    /// # Returns
    /// Identifier of the created user
    ///
    /// # Errors
    /// * `UserAlreadyExists` - Email is already registered
    /// * `Internal` - Hashing or storage failed
    async fn register(&self, command: RegisterCommand) -> Result<UserId, AuthError>;

    /// Check credentials and issue a token scoped to one client application.
    ///
    /// # Arguments
    /// * `command` - Validated command containing email, password and app id
    ///
    /// # Returns
    /// Signed token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password (indistinguishable)
    /// * `ApplicationNotFound` - No application with this id
    /// * `Internal` - Storage, hash parsing or signing failed
    async fn login(&self, command: LoginCommand) -> Result<String, AuthError>;

    /// Report whether a user holds an admin grant.
    ///
    /// A user without a grant yields `Ok(false)`.
    ///
    /// # Errors
    /// * `Internal` - Storage failed
    async fn check_admin(&self, user_id: UserId) -> Result<bool, AuthError>;
}

/// Persistence operations for users and admin grants.
///
/// Each call runs in its own transaction.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Insert a new user.
    ///
    /// # Errors
    /// * `UserAlreadyExists` - Email is already taken
    /// * `Internal` - Any other persistence fault, including a failed commit
    async fn save_user(&self, email: &EmailAddress, pass_hash: &[u8])
        -> Result<UserId, StorageError>;

    /// Retrieve user by email address.
    ///
    /// # Errors
    /// * `UserNotFound` - No user with this email
    /// * `Internal` - Persistence fault
    async fn find_user_by_email(&self, email: &EmailAddress) -> Result<User, StorageError>;

    /// Whether an admin grant exists for the user; absence is `Ok(false)`.
    ///
    /// # Errors
    /// * `Internal` - Persistence fault
    async fn is_admin(&self, user_id: UserId) -> Result<bool, StorageError>;
}

/// Read access to provisioned client applications.
#[async_trait]
pub trait ApplicationRepository: Send + Sync + 'static {
    /// Retrieve application by identifier.
    ///
    /// # Errors
    /// * `ApplicationNotFound` - No application with this id
    /// * `Internal` - Persistence fault
    async fn find_application(&self, app_id: AppId) -> Result<ClientApplication, StorageError>;
}
