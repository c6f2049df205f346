use http::header::AUTHORIZATION;
use http::HeaderMap;

use super::errors::BearerError;

/// Scheme prefix expected in the `Authorization` header. Case- and
/// space-exact.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Extract the raw bearer token from request headers.
///
/// # Arguments
/// * `headers` - Request header map
///
/// # Returns
/// Token string with surrounding whitespace removed
///
/// # Errors
/// * `MissingHeader` - No `Authorization` header, or an empty one
/// * `BadScheme` - Value does not start with `"Bearer "` or is not valid text
/// * `EmptyToken` - Nothing but whitespace follows the scheme
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, BearerError> {
    let value = headers
        .get(AUTHORIZATION)
        .filter(|value| !value.is_empty())
        .ok_or(BearerError::MissingHeader)?;

    let value = value.to_str().map_err(|_| BearerError::BadScheme)?;

    let remainder = value
        .strip_prefix(BEARER_PREFIX)
        .ok_or(BearerError::BadScheme)?;

    let token = remainder.trim();
    if token.is_empty() {
        return Err(BearerError::EmptyToken);
    }

    Ok(token)
}
