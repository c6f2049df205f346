pub mod claims;
pub mod codec;
pub mod errors;

pub use claims::Claims;
pub use claims::ISSUER;
pub use codec::issue_token;
pub use codec::validate_token;
pub use codec::TokenCodec;
pub use errors::TokenError;
