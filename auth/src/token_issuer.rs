use chrono::Duration;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;

/// Issues and validates time-bound access tokens.
///
/// Combines the JWT handler with the configured token lifetime.
pub struct TokenIssuer {
    jwt_handler: JwtHandler,
    time_to_live: Duration,
}

/// Result of a successful token issuance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    /// Signed JWT
    pub token: String,

    /// Expiration (Unix timestamp)
    pub expires_at: i64,
}

impl TokenIssuer {
    /// Create a new token issuer.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    /// * `time_to_live` - Lifetime of every issued token
    pub fn new(jwt_secret: &[u8], time_to_live: Duration) -> Self {
        Self {
            jwt_handler: JwtHandler::new(jwt_secret),
            time_to_live,
        }
    }

    /// Issue a signed token for an authenticated user.
    ///
    /// # Arguments
    /// * `user_id` - Identifier embedded as the `id` claim
    /// * `username` - Username embedded as the `username` claim
    ///
    /// # Errors
    /// * `EncodingFailed` - Token generation failed
    pub fn issue(
        &self,
        user_id: impl ToString,
        username: impl Into<String>,
    ) -> Result<AccessToken, JwtError> {
        let claims = Claims::for_user(user_id, username, self.time_to_live);
        let token = self.jwt_handler.encode(&claims)?;

        Ok(AccessToken {
            token,
            expires_at: claims.exp,
        })
    }

    /// Verify signature and expiry of a token and return its claims.
    ///
    /// # Errors
    /// * `TokenExpired` - Token has expired
    /// * `InvalidSignature` - Token was tampered with or signed with another secret
    /// * `DecodingFailed` - Token is malformed
    pub fn validate(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.decode(token)
    }
}
