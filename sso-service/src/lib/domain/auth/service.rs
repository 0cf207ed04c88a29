use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordError;
use auth::PasswordHasher;
use auth::TokenIssuer;
use auth::TokenSubject;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::StorageError;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::Password;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::auth::models::UserId;
use crate::domain::auth::ports::ApplicationRepository;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::ports::UserRepository;

/// Domain service implementation for authentication operations.
///
/// Owns the business rules: which storage failures callers may see,
/// and which collapse into `InvalidCredentials` or `Internal`.
pub struct AuthService<UR, AR>
where
    UR: UserRepository,
    AR: ApplicationRepository,
{
    users: Arc<UR>,
    applications: Arc<AR>,
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
    // Verified against when the email is unknown
    decoy_hash: Vec<u8>,
}

const DECOY_PASSWORD: &str = "decoy password for unknown accounts";

impl<UR, AR> AuthService<UR, AR>
where
    UR: UserRepository,
    AR: ApplicationRepository,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `users` - User and admin grant persistence
    /// * `applications` - Client application lookup
    /// * `password_hasher` - Hasher configured with the deployment's cost
    /// * `token_issuer` - Issuer configured with the token TTL and signing mode
    ///
    /// # Errors
    /// * `HashingFailed` - The decoy hash could not be computed with the configured cost
    pub fn new(
        users: Arc<UR>,
        applications: Arc<AR>,
        password_hasher: PasswordHasher,
        token_issuer: TokenIssuer,
    ) -> Result<Self, PasswordError> {
        let decoy_hash = password_hasher.hash(DECOY_PASSWORD)?;

        Ok(Self {
            users,
            applications,
            password_hasher,
            token_issuer,
            decoy_hash,
        })
    }

    // Argon2 is CPU bound; keep it off the async workers.
    async fn hash_password(&self, password: Password) -> Result<Vec<u8>, AuthError> {
        let hasher = self.password_hasher.clone();

        tokio::task::spawn_blocking(move || hasher.hash(password.expose()))
            .await
            .map_err(|e| AuthError::Internal(format!("hashing task failed: {}", e)))?
            .map_err(|e| AuthError::Internal(e.to_string()))
    }

    async fn verify_password(
        &self,
        password: Password,
        pass_hash: Vec<u8>,
    ) -> Result<bool, AuthError> {
        let hasher = self.password_hasher.clone();

        tokio::task::spawn_blocking(move || hasher.verify(password.expose(), &pass_hash))
            .await
            .map_err(|e| AuthError::Internal(format!("verification task failed: {}", e)))?
            .map_err(|e| AuthError::Internal(e.to_string()))
    }
}

#[async_trait]
impl<UR, AR> AuthServicePort for AuthService<UR, AR>
where
    UR: UserRepository,
    AR: ApplicationRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<UserId, AuthError> {
        tracing::info!(email = %command.email, "Registering user");

        let pass_hash = self.hash_password(command.password).await?;

        let user_id = self
            .users
            .save_user(&command.email, &pass_hash)
            .await
            .map_err(|e| match e {
                StorageError::UserAlreadyExists => {
                    tracing::warn!(email = %command.email, "User already exists");
                    AuthError::UserAlreadyExists
                }
                other => {
                    tracing::error!(email = %command.email, error = %other, "Failed to save user");
                    AuthError::Internal(other.to_string())
                }
            })?;

        tracing::info!(user_id = %user_id, "User registered");

        Ok(user_id)
    }

    async fn login(&self, command: LoginCommand) -> Result<String, AuthError> {
        tracing::info!(email = %command.email, app_id = %command.app_id, "Logging user in");

        let user = match self.users.find_user_by_email(&command.email).await {
            Ok(user) => user,
            Err(StorageError::UserNotFound) => {
                // Unknown emails pay for one verification, same as a wrong password
                let _ = self
                    .verify_password(command.password, self.decoy_hash.clone())
                    .await;
                tracing::warn!(email = %command.email, "Login for unknown user");
                return Err(AuthError::InvalidCredentials);
            }
            Err(other) => {
                tracing::error!(email = %command.email, error = %other, "Failed to load user");
                return Err(AuthError::Internal(other.to_string()));
            }
        };

        let is_valid = self
            .verify_password(command.password, user.pass_hash.clone())
            .await
            .inspect_err(|e| {
                tracing::error!(user_id = %user.id, error = %e, "Stored password hash is unusable")
            })?;

        if !is_valid {
            tracing::warn!(user_id = %user.id, "Wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let application = self
            .applications
            .find_application(command.app_id)
            .await
            .map_err(|e| match e {
                StorageError::ApplicationNotFound => {
                    tracing::warn!(app_id = %command.app_id, "Login for unknown application");
                    AuthError::ApplicationNotFound
                }
                other => {
                    tracing::error!(app_id = %command.app_id, error = %other, "Failed to load application");
                    AuthError::Internal(other.to_string())
                }
            })?;

        let subject = TokenSubject {
            user_id: user.id.0,
            email: user.email.as_str(),
            app_id: application.id.0,
        };

        let token = self
            .token_issuer
            .issue_now(subject, application.secret.as_bytes())
            .map_err(|e| {
                tracing::error!(app_id = %application.id, error = %e, "Failed to sign token");
                AuthError::Internal(e.to_string())
            })?;

        tracing::info!(
            user_id = %user.id,
            app_id = %application.id,
            app_name = %application.name,
            "User logged in"
        );

        Ok(token)
    }

    async fn check_admin(&self, user_id: UserId) -> Result<bool, AuthError> {
        let is_admin = self.users.is_admin(user_id).await.map_err(|e| {
            tracing::error!(user_id = %user_id, error = %e, "Failed to check admin grant");
            AuthError::Internal(e.to_string())
        })?;

        tracing::debug!(user_id = %user_id, is_admin, "Checked admin grant");

        Ok(is_admin)
    }
}
