use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::SigningMode;

/// Identity a token is issued for.
#[derive(Debug, Clone, Copy)]
pub struct TokenSubject<'a> {
    pub user_id: i64,
    pub email: &'a str,
    pub app_id: i32,
}

/// Issues application-scoped access tokens.
///
/// Holds only the validity window and signing mode. The signing secret is
/// supplied per call by the application the token is issued for, so a
/// token minted for one application never verifies under another's secret.
#[derive(Debug, Clone, Copy)]
pub struct TokenIssuer {
    ttl: Duration,
    mode: SigningMode,
}

impl TokenIssuer {
    /// Create a new token issuer.
    ///
    /// # Arguments
    /// * `ttl` - Validity window of issued tokens
    /// * `mode` - HMAC variant used for signing
    pub fn new(ttl: Duration, mode: SigningMode) -> Self {
        Self { ttl, mode }
    }

    /// Build and sign claims for `subject`, valid from `now` for the
    /// configured TTL.
    ///
    /// # Errors
    /// * `EmptySecret` - Application has no signing secret
    /// * `LifetimeOutOfRange` - `now + ttl` overflows
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(
        &self,
        subject: TokenSubject<'_>,
        secret: &[u8],
        now: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        let claims = Claims::new(
            subject.user_id,
            subject.email,
            subject.app_id,
            now,
            self.ttl,
        )?;

        JwtHandler::with_mode(secret, self.mode)?.encode(&claims)
    }

    /// Same as [`TokenIssuer::issue`] using the current time.
    pub fn issue_now(&self, subject: TokenSubject<'_>, secret: &[u8]) -> Result<String, JwtError> {
        self.issue(subject, secret, Utc::now())
    }

    /// Verify a token against an application's secret and return its claims.
    ///
    /// # Errors
    /// * `InvalidSignature` - Token was signed with another secret
    /// * `TokenExpired` - Token validity window has passed
    /// * `DecodingFailed` - Token is malformed
    pub fn verify(&self, token: &str, secret: &[u8]) -> Result<Claims, JwtError> {
        JwtHandler::with_mode(secret, self.mode)?.decode(token)
    }

    /// Read the application a token claims to belong to, without verifying it.
    ///
    /// # Errors
    /// * `DecodingFailed` - Token is malformed
    pub fn peek_app_id(token: &str) -> Result<i32, JwtError> {
        JwtHandler::decode_unverified::<Claims>(token).map(|claims| claims.app_id)
    }
}
