use thiserror::Error;

/// Error type for password operations.
///
/// Variants carry no payload so that neither plaintexts nor stored hashes
/// can leak through error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PasswordError {
    #[error("Password or hash must not be empty")]
    EmptyInput,

    #[error("Password does not match")]
    Mismatch,

    #[error("Password hashing failed")]
    HashingFailed,
}
