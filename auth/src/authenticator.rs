use std::sync::Arc;
use std::sync::OnceLock;

use chrono::Duration;
use http::HeaderMap;

use crate::bearer::extract_bearer;
use crate::bearer::BearerError;
use crate::clock::Clock;
use crate::jwt::TokenCodec;
use crate::jwt::TokenError;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token
/// handling.
///
/// Holds no per-request state; share one instance behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_codec: TokenCodec,
    token_ttl: Duration,
}

/// Result of successful authentication.
#[derive(Debug)]
pub struct AuthenticationResult {
    /// Signed access token for the principal
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error("Bearer error: {0}")]
    Bearer(#[from] BearerError),
}

impl AuthenticationError {
    /// True when the caller presented bad credentials or a bad token, false
    /// for server-side failures such as a missing secret or a failed hash.
    pub fn is_rejection(&self) -> bool {
        match self {
            AuthenticationError::InvalidCredentials | AuthenticationError::Bearer(_) => true,
            AuthenticationError::Password(e) => *e != PasswordError::HashingFailed,
            AuthenticationError::Token(e) => e.is_rejection(),
        }
    }
}

/// Plaintext behind the decoy hash used for unknown accounts.
const DECOY_PASSWORD: &str = "decoy-password-for-unknown-accounts";

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `token_secret` - Secret key for token signing
    /// * `token_ttl` - Lifetime of every issued token
    ///
    /// # Errors
    /// * `MissingSecret` - `token_secret` is empty
    pub fn new(token_secret: &[u8], token_ttl: Duration) -> Result<Self, TokenError> {
        Ok(Self {
            password_hasher: PasswordHasher::new(),
            token_codec: TokenCodec::new(token_secret)?,
            token_ttl,
        })
    }

    /// Replace the time source used for issuing and validating tokens.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.token_codec = self.token_codec.with_clock(clock);
        self
    }

    /// Hash a password for storage.
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a password against a stored hash.
    pub fn verify_password(&self, stored_hash: &str, password: &str) -> Result<(), PasswordError> {
        self.password_hasher.verify(stored_hash, password)
    }

    /// Verify credentials and generate a token for `account_id`.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `account_id` - Principal the token is issued for
    ///
    /// # Returns
    /// AuthenticationResult with access token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `Password` - Password or hash was empty
    /// * `Token` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        account_id: i64,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        self.password_hasher
            .verify(stored_hash, password)
            .map_err(|e| match e {
                PasswordError::Mismatch => AuthenticationError::InvalidCredentials,
                other => AuthenticationError::Password(other),
            })?;

        let access_token = self.issue_token(account_id)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Reject a login for an email with no account.
    ///
    /// Runs a full verification against a decoy hash so that an unknown
    /// account costs the same Argon2 work as a wrong password. Always returns
    /// `InvalidCredentials`.
    pub fn reject_unknown_account(&self, password: &str) -> AuthenticationError {
        static DECOY_HASH: OnceLock<Option<String>> = OnceLock::new();

        let decoy = DECOY_HASH.get_or_init(|| self.password_hasher.hash(DECOY_PASSWORD).ok());
        if let Some(hash) = decoy {
            let _ = self.password_hasher.verify(hash, password);
        }

        AuthenticationError::InvalidCredentials
    }

    /// Generate a token without password verification.
    ///
    /// Used right after registration and after a profile update, when the
    /// caller's identity is already established.
    pub fn issue_token(&self, account_id: i64) -> Result<String, TokenError> {
        self.token_codec.issue(account_id, self.token_ttl)
    }

    /// Validate a raw token and return its principal.
    pub fn validate_token(&self, token: &str) -> Result<i64, TokenError> {
        self.token_codec.validate(token)
    }

    /// Recover and verify the caller's principal from request headers.
    ///
    /// # Errors
    /// * `Bearer` - The `Authorization` header is missing or badly formed
    /// * `Token` - The presented token failed validation
    pub fn authorize(&self, headers: &HeaderMap) -> Result<i64, AuthenticationError> {
        let token = extract_bearer(headers).inspect_err(|e| {
            tracing::debug!(reason = %e, "Bearer extraction failed");
        })?;

        let account_id = self.token_codec.validate(token).inspect_err(|e| {
            tracing::debug!(reason = %e, "Token validation failed");
        })?;

        Ok(account_id)
    }
}
