pub mod errors;
pub mod extractor;

pub use errors::BearerError;
pub use extractor::extract_bearer;
pub use extractor::BEARER_PREFIX;
