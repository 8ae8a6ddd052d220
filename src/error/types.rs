//! Error types
//!
//! A rejected login is a normal result, not an error. These types cover the
//! failures that stop the service before any request is served.

use std::fmt;
use std::io;

/// Malformed chain assembly, detected at construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssemblyError {
    EmptyChain,
    UnterminatedChain { last_stage: &'static str },
    UnreachableStage {
        terminal_stage: &'static str,
        position: usize,
    },
}

impl fmt::Display for AssemblyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssemblyError::EmptyChain => write!(f, "Validation chain has no stages"),
            AssemblyError::UnterminatedChain { last_stage } => write!(
                f,
                "Last stage '{}' is not unconditionally terminal",
                last_stage
            ),
            AssemblyError::UnreachableStage {
                terminal_stage,
                position,
            } => write!(
                f,
                "Terminal stage '{}' at position {} makes later stages unreachable",
                terminal_stage, position
            ),
        }
    }
}

impl std::error::Error for AssemblyError {}

/// Top-level error for startup and the driver binary.
#[derive(Debug)]
pub enum ServiceError {
    Assembly(AssemblyError),
    Config(config::ConfigError),
    Io(io::Error),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Assembly(e) => write!(f, "Chain assembly error: {}", e),
            ServiceError::Config(e) => write!(f, "Configuration error: {}", e),
            ServiceError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServiceError::Assembly(e) => Some(e),
            ServiceError::Config(e) => Some(e),
            ServiceError::Io(e) => Some(e),
        }
    }
}

impl From<AssemblyError> for ServiceError {
    fn from(error: AssemblyError) -> Self {
        ServiceError::Assembly(error)
    }
}

impl From<config::ConfigError> for ServiceError {
    fn from(error: config::ConfigError) -> Self {
        ServiceError::Config(error)
    }
}

impl From<io::Error> for ServiceError {
    fn from(error: io::Error) -> Self {
        ServiceError::Io(error)
    }
}
