use chrono::Duration;
use serde::Deserialize;
use serde::Serialize;

/// Issuer claim stamped on every token this service mints.
pub const ISSUER: &str = "sanctuary";

/// Session token claims.
///
/// `exp` is mandatory: a payload without it does not deserialize and the
/// token is treated as malformed. The other registered claims are optional
/// on the way in so that their absence can be reported precisely.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Issuer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    /// Subject (decimal account identifier)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims expiring at `exp` with nothing else set.
    pub fn new(exp: i64) -> Self {
        Self {
            iss: None,
            sub: None,
            iat: None,
            exp,
        }
    }

    /// Create the claims for an authenticated principal.
    ///
    /// # Arguments
    /// * `account_id` - Principal identifier, rendered as the `sub` claim
    /// * `issued_at` - Issue time (Unix timestamp)
    /// * `ttl` - Lifetime; a non-positive value yields already-expired claims
    ///
    /// # Returns
    /// Claims with iss, sub, iat, and exp set
    pub fn for_principal(account_id: i64, issued_at: i64, ttl: Duration) -> Self {
        Self::new(issued_at.saturating_add(ttl.num_seconds()))
            .with_issuer(ISSUER)
            .with_subject(account_id)
            .with_issued_at(issued_at)
    }

    /// Set subject.
    pub fn with_subject(mut self, sub: impl ToString) -> Self {
        self.sub = Some(sub.to_string());
        self
    }

    /// Set issued at (Unix timestamp).
    pub fn with_issued_at(mut self, iat: i64) -> Self {
        self.iat = Some(iat);
        self
    }

    /// Set issuer.
    pub fn with_issuer(mut self, iss: impl ToString) -> Self {
        self.iss = Some(iss.to_string());
        self
    }

    /// Parse the subject as a principal identifier.
    ///
    /// Returns `None` when the claim is absent, non-numeric, zero, or negative.
    pub fn principal(&self) -> Option<i64> {
        self.sub
            .as_deref()
            .and_then(|sub| sub.parse::<i64>().ok())
            .filter(|id| *id > 0)
    }

    /// Check if the token is expired at `current_timestamp`.
    ///
    /// A token stops being valid at the exact second named by `exp`.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp <= current_timestamp
    }
}
