pub mod claims;
pub mod errors;
pub mod key;
pub mod manager;
pub mod metadata;

pub use claims::IssuedToken;
pub use claims::UserClaims;
pub use errors::TokenError;
pub use key::SecretKey;
pub use manager::TokenManager;
pub use metadata::extract_presented_token;
pub use metadata::RequestMetadata;
