use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// Symmetric signing algorithm used for issued tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum SigningMode {
    #[default]
    HS256,
    HS384,
    HS512,
}

impl SigningMode {
    fn algorithm(self) -> Algorithm {
        match self {
            SigningMode::HS256 => Algorithm::HS256,
            SigningMode::HS384 => Algorithm::HS384,
            SigningMode::HS512 => Algorithm::HS512,
        }
    }
}

/// JWT token handler bound to a single HMAC secret.
///
/// Generic over the claims type. Build one per signing secret; the keys
/// are derived from the secret bytes and never serialized.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new JWT handler using HS256.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens
    ///
    /// # Errors
    /// * `EmptySecret` - Secret has no bytes
    pub fn new(secret: &[u8]) -> Result<Self, JwtError> {
        Self::with_mode(secret, SigningMode::default())
    }

    /// Create a new JWT handler with an explicit signing mode.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens
    /// * `mode` - HMAC variant to sign and verify with
    ///
    /// # Errors
    /// * `EmptySecret` - Secret has no bytes
    pub fn with_mode(secret: &[u8], mode: SigningMode) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::EmptySecret);
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: mode.algorithm(),
        })
    }

    /// Encode claims into a JWT token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a JWT token.
    ///
    /// The signature, the algorithm and the `exp` claim are checked; `exp`
    /// is mandatory and no leeway is granted.
    ///
    /// # Errors
    /// * `TokenExpired` - Token has expired
    /// * `InvalidSignature` - Token was not signed with this handler's secret
    /// * `DecodingFailed` - Token is malformed or misses required claims
    pub fn decode<T: for<'de> Deserialize<'de>>(&self, token: &str) -> Result<T, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        let token_data =
            decode::<T>(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                _ => JwtError::DecodingFailed(e.to_string()),
            })?;

        Ok(token_data.claims)
    }

    /// Decode token without validation (for inspection only).
    ///
    /// Consumers use this to read which application a token claims to
    /// belong to before picking the secret to verify it with. Never trust
    /// claims from this method for authorization decisions.
    ///
    /// # Errors
    /// * `DecodingFailed` - Token format is invalid
    pub fn decode_unverified<T: for<'de> Deserialize<'de>>(token: &str) -> Result<T, JwtError> {
        let mut validation = Validation::default();
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.required_spec_claims.clear();
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

        let token_data = decode::<T>(token, &DecodingKey::from_secret(&[]), &validation)
            .map_err(|e| JwtError::DecodingFailed(e.to_string()))?;

        Ok(token_data.claims)
    }
}
