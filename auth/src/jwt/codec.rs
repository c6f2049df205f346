use std::fmt;
use std::sync::Arc;

use base64ct::Base64UrlUnpadded;
use base64ct::Encoding;
use chrono::Duration;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Deserialize;

use super::claims::Claims;
use super::errors::TokenError;
use crate::clock::Clock;
use crate::clock::SystemClock;

/// Issues and validates HMAC-signed session tokens.
///
/// Tokens are issued with HS256. Validation accepts the HMAC family only, so a
/// token that declares an asymmetric algorithm or `none` is rejected before
/// any signature work is done.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    clock: Arc<dyn Clock>,
}

#[derive(Deserialize)]
struct TokenHeader {
    alg: String,
}

impl TokenCodec {
    /// Create a codec keyed by `secret`.
    ///
    /// # Errors
    /// * `MissingSecret` - `secret` is empty
    pub fn new(secret: &[u8]) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::MissingSecret);
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            clock: Arc::new(SystemClock),
        })
    }

    /// Replace the time source used for `iat`, `exp`, and expiry checks.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Mint a token for `account_id` valid for `ttl`.
    ///
    /// # Arguments
    /// * `account_id` - Authenticated principal (must be positive)
    /// * `ttl` - Token lifetime
    ///
    /// # Returns
    /// Compact JWT string
    ///
    /// # Errors
    /// * `InvalidPrincipal` - `account_id` is zero or negative
    /// * `SigningFailure` - Token encoding failed
    pub fn issue(&self, account_id: i64, ttl: Duration) -> Result<String, TokenError> {
        if account_id <= 0 {
            return Err(TokenError::InvalidPrincipal);
        }

        let claims = Claims::for_principal(account_id, self.clock.now_secs(), ttl);

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_| TokenError::SigningFailure)
    }

    /// Validate a token and recover the principal it was issued for.
    ///
    /// Checks run in order and the first failure is returned: structure
    /// (including a decodable claims payload), declared algorithm, signature,
    /// expiry, subject.
    ///
    /// # Errors
    /// * `Malformed` - Token or its claims cannot be decoded
    /// * `AlgorithmMismatch` - Header declares a non-HMAC algorithm
    /// * `BadSignature` - Signature does not match
    /// * `Expired` - `exp` is not in the future
    /// * `InvalidSubject` - `sub` is absent or not a positive integer
    pub fn validate(&self, token: &str) -> Result<i64, TokenError> {
        let header = parse_header(token)?;

        let algorithm = match header.alg.as_str() {
            "HS256" => Algorithm::HS256,
            "HS384" => Algorithm::HS384,
            "HS512" => Algorithm::HS512,
            _ => return Err(TokenError::AlgorithmMismatch),
        };

        let mut validation = Validation::new(algorithm);
        // Expiry is checked against our own clock below.
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::BadSignature,
                ErrorKind::InvalidAlgorithm => TokenError::AlgorithmMismatch,
                _ => TokenError::Malformed,
            })?
            .claims;

        if claims.is_expired(self.clock.now_secs()) {
            return Err(TokenError::Expired);
        }

        claims.principal().ok_or(TokenError::InvalidSubject)
    }
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

/// Split a compact token, decode its header, and check the payload is a
/// claims object with a numeric `exp`.
///
/// The signature segment may be empty here so that unsigned tokens are
/// reported as an algorithm problem rather than a structural one.
fn parse_header(token: &str) -> Result<TokenHeader, TokenError> {
    let mut segments = token.split('.');

    let (Some(header), Some(payload), Some(signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(TokenError::Malformed);
    };

    if header.is_empty() || payload.is_empty() {
        return Err(TokenError::Malformed);
    }

    let header_bytes = Base64UrlUnpadded::decode_vec(header).map_err(|_| TokenError::Malformed)?;
    let payload_bytes =
        Base64UrlUnpadded::decode_vec(payload).map_err(|_| TokenError::Malformed)?;
    Base64UrlUnpadded::decode_vec(signature).map_err(|_| TokenError::Malformed)?;

    serde_json::from_slice::<Claims>(&payload_bytes).map_err(|_| TokenError::Malformed)?;

    serde_json::from_slice(&header_bytes).map_err(|_| TokenError::Malformed)
}

/// Mint a token for `account_id` signed with `secret`.
///
/// # Errors
/// * `InvalidPrincipal` - `account_id` is zero or negative
/// * `MissingSecret` - `secret` is empty
/// * `SigningFailure` - Token encoding failed
pub fn issue_token(account_id: i64, secret: &[u8], ttl: Duration) -> Result<String, TokenError> {
    if account_id <= 0 {
        return Err(TokenError::InvalidPrincipal);
    }

    TokenCodec::new(secret)?.issue(account_id, ttl)
}

/// Validate `token` against `secret` and return its principal.
///
/// See [`TokenCodec::validate`] for the order of checks.
pub fn validate_token(token: &str, secret: &[u8]) -> Result<i64, TokenError> {
    TokenCodec::new(secret)?.validate(token)
}
