//! Error handling
//!
//! Defines error types and handling for the credential chain.

pub mod handlers;
pub mod types;

pub use types::*;
