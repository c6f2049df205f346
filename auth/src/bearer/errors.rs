use thiserror::Error;

/// Error type for bearer credential extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BearerError {
    #[error("Missing Authorization header")]
    MissingHeader,

    #[error("Invalid Authorization header format. Expected: Bearer <token>")]
    BadScheme,

    #[error("Bearer token is empty")]
    EmptyToken,
}
