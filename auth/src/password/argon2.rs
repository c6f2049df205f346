use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// Memory cost in KiB.
pub const MEMORY_COST_KIB: u32 = 19_456;

/// Number of passes over memory.
pub const TIME_COST: u32 = 2;

/// Degree of parallelism.
pub const PARALLELISM: u32 = 1;

/// Length of the derived hash in bytes.
pub const OUTPUT_LEN: usize = 32;

/// Password hashing implementation.
///
/// Argon2id with fixed cost parameters. Every call to [`hash`](Self::hash)
/// draws a fresh random salt, so hashing the same password twice yields two
/// different PHC strings.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher;

impl PasswordHasher {
    /// Create a new password hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `EmptyInput` - Password is empty (rejected before any hashing work)
    /// * `HashingFailed` - The underlying primitive failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        if password.is_empty() {
            return Err(PasswordError::EmptyInput);
        }

        let salt = SaltString::generate(&mut OsRng);

        Self::argon2()?
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|_| PasswordError::HashingFailed)
    }

    /// Verify a password against a stored hash.
    ///
    /// A corrupt hash and a wrong password are indistinguishable to the
    /// caller: both surface as `Mismatch`.
    ///
    /// # Arguments
    /// * `hash` - Stored password hash in PHC string format
    /// * `password` - Plaintext password to verify
    ///
    /// # Errors
    /// * `EmptyInput` - Either argument is empty
    /// * `Mismatch` - Password does not match, or the hash cannot be parsed
    pub fn verify(&self, hash: &str, password: &str) -> Result<(), PasswordError> {
        if hash.is_empty() || password.is_empty() {
            return Err(PasswordError::EmptyInput);
        }

        let parsed_hash = PasswordHash::new(hash).map_err(|_| PasswordError::Mismatch)?;

        Self::argon2()
            .map_err(|_| PasswordError::Mismatch)?
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| PasswordError::Mismatch)
    }

    fn argon2() -> Result<Argon2<'static>, PasswordError> {
        let params = Params::new(MEMORY_COST_KIB, TIME_COST, PARALLELISM, Some(OUTPUT_LEN))
            .map_err(|_| PasswordError::HashingFailed)?;

        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
