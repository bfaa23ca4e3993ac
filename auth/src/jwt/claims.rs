use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Access token payload.
///
/// Carries the identity of the authenticated user plus the standard
/// issued-at / expiration timestamps (Unix seconds).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// User identifier
    pub id: String,

    /// Username at the time the token was issued
    pub username: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a user, valid for `time_to_live` starting now.
    ///
    /// # Arguments
    /// * `user_id` - Unique user identifier
    /// * `username` - Username embedded in the token
    /// * `time_to_live` - How long the token stays valid
    ///
    /// # Returns
    /// Claims with id, username, iat and exp set
    pub fn for_user(user_id: impl ToString, username: impl Into<String>, time_to_live: Duration) -> Self {
        let now = Utc::now();
        let expiration = now + time_to_live;

        Self {
            id: user_id.to_string(),
            username: username.into(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        }
    }
}
