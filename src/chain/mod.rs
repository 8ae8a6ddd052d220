//! Validation chain
//!
//! The stage capability, the built-in stages and the chain that orders them.

pub mod stage;
pub mod stages;
pub mod validation;

pub use stage::{Stage, StageOutcome};
pub use stages::{BannedCheck, CacheCheck, CredentialCheck, FailureFallback};
pub use validation::ValidationChain;
