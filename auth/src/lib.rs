//! Stateless bearer-token authentication
//!
//! Provides the credential and session primitives used by the account service:
//! - Password hashing (Argon2id)
//! - Signed, expiring session tokens (HS256 JWT)
//! - Bearer token extraction from request headers
//! - Authentication coordination
//!
//! Nothing here keeps state between calls. A token is valid purely on the
//! strength of its signature and its `exp` claim.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify(&hash, "my_password").is_ok());
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{issue_token, validate_token};
//! use chrono::Duration;
//!
//! let token = issue_token(42, b"s3cr3t-key", Duration::hours(1)).unwrap();
//! assert_eq!(validate_token(&token, b"s3cr3t-key").unwrap(), 42);
//! assert!(validate_token(&token, b"wrong-key").is_err());
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//! use chrono::Duration;
//! use http::{header::AUTHORIZATION, HeaderMap, HeaderValue};
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", Duration::hours(1)).unwrap();
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and generate token
//! let result = auth.authenticate("password123", &hash, 42).unwrap();
//!
//! // Later requests: authorize from headers
//! let mut headers = HeaderMap::new();
//! let value = format!("Bearer {}", result.access_token);
//! headers.insert(AUTHORIZATION, HeaderValue::from_str(&value).unwrap());
//! assert_eq!(auth.authorize(&headers).unwrap(), 42);
//! ```

pub mod authenticator;
pub mod bearer;
pub mod clock;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use bearer::extract_bearer;
pub use bearer::BearerError;
pub use clock::Clock;
pub use clock::SystemClock;
pub use jwt::issue_token;
pub use jwt::validate_token;
pub use jwt::Claims;
pub use jwt::TokenCodec;
pub use jwt::TokenError;
pub use password::PasswordError;
pub use password::PasswordHasher;
