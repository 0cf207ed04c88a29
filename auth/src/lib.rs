//! Authentication utilities library
//!
//! Provides the credential and token primitives of the SSO service:
//! - Password hashing (Argon2id)
//! - Application-scoped JWT issuing and verification
//!
//! Tokens are signed with the secret of the client application they are
//! issued for. Consuming applications verify them with their own secret.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Issuing Tokens
//! ```
//! use auth::{SigningMode, TokenIssuer, TokenSubject};
//! use chrono::Duration;
//!
//! let issuer = TokenIssuer::new(Duration::hours(1), SigningMode::HS256);
//! let subject = TokenSubject { user_id: 1, email: "alice@example.com", app_id: 2 };
//!
//! let token = issuer.issue_now(subject, b"app-2-secret").unwrap();
//! let claims = issuer.verify(&token, b"app-2-secret").unwrap();
//! assert_eq!(claims.app_id, 2);
//! assert!(issuer.verify(&token, b"app-3-secret").is_err());
//! ```

pub mod issuer;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use issuer::TokenIssuer;
pub use issuer::TokenSubject;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::SigningMode;
pub use password::HashCost;
pub use password::PasswordError;
pub use password::PasswordHasher;
