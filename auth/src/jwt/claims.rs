use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::jwt::JwtError;

/// Claims carried by an SSO access token.
///
/// A token is scoped to exactly one client application: `app_id` names the
/// application whose secret signed it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject user identifier
    pub uid: i64,

    /// Subject email address
    pub email: String,

    /// Client application the token was issued for
    pub app_id: i32,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims valid from `issued_at` for `ttl`.
    ///
    /// # Errors
    /// * `LifetimeOutOfRange` - Expiry is not representable as a timestamp
    pub fn new(
        uid: i64,
        email: impl Into<String>,
        app_id: i32,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, JwtError> {
        let expires_at = issued_at
            .checked_add_signed(ttl)
            .ok_or(JwtError::LifetimeOutOfRange)?;

        Ok(Self {
            uid,
            email: email.into(),
            app_id,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        })
    }
}
