use thiserror::Error;

/// Error type for token issuance and validation.
///
/// Validation stops at the first failing check, so each variant names the
/// step that rejected the token. At the HTTP boundary all validation variants
/// collapse into a single "unauthorized" response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Principal identifier must be a positive integer")]
    InvalidPrincipal,

    #[error("Signing secret is not configured")]
    MissingSecret,

    #[error("Failed to sign token")]
    SigningFailure,

    #[error("Token is malformed")]
    Malformed,

    #[error("Token declares an unexpected signing algorithm")]
    AlgorithmMismatch,

    #[error("Token signature is invalid")]
    BadSignature,

    #[error("Token is expired")]
    Expired,

    #[error("Token subject is missing or not a valid principal")]
    InvalidSubject,
}

impl TokenError {
    /// True for failures caused by the presented token rather than by
    /// server-side configuration.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            TokenError::Malformed
                | TokenError::AlgorithmMismatch
                | TokenError::BadSignature
                | TokenError::Expired
                | TokenError::InvalidSubject
        )
    }
}
