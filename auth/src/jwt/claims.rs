use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claim set carried by a bearer token.
///
/// Serialized as `{"id": <subject>, "exp": <unix seconds>}`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    /// Subject (user identifier)
    pub id: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl TokenClaims {
    /// Create claims for a subject expiring at the given instant.
    pub fn new(subject: i64, expires_at: DateTime<Utc>) -> Self {
        Self {
            id: subject,
            exp: expires_at.timestamp(),
        }
    }

    /// Subject identifier embedded in the token.
    pub fn subject(&self) -> i64 {
        self.id
    }

    /// Expiry as a timestamp, `None` if `exp` is outside chrono's range.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// Check if token is expired.
    ///
    /// A token is still valid during the second named by `exp`.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}
