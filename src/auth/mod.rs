//! Authentication system
//!
//! Request/result values and the collaborators the validation chain queries:
//! banned registry, token cache, credential verifier and token issuer.

pub mod cache;
pub mod credentials;
pub mod issuer;
pub mod registry;
pub mod request;
pub mod results;

pub use cache::{InMemoryTokenCache, TokenCache};
pub use credentials::{CredentialVerifier, StaticCredentialVerifier};
pub use issuer::{RandomTokenIssuer, TokenIssuer};
pub use registry::{BannedRegistry, StaticBannedRegistry};
pub use request::CredentialRequest;
pub use results::AuthenticationResult;
