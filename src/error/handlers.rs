//! Error handlers
//!
//! Logging and exit-code mapping for service errors.

use crate::error::types::ServiceError;
use log::error;

/// Log a service error
pub fn handle_error(err: &ServiceError) {
    error!("Credential chain error: {}", err);
}

/// Convert error to a sysexits-style process exit code
pub fn exit_code(err: &ServiceError) -> i32 {
    match err {
        ServiceError::Assembly(_) => 70,
        ServiceError::Io(_) => 74,
        ServiceError::Config(_) => 78,
    }
}
