pub mod auth;
pub mod chain;
pub mod config;
pub mod error;
pub mod middleware;

pub use auth::{AuthenticationResult, CredentialRequest};
pub use chain::ValidationChain;
