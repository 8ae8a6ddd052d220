//! Chain middleware
//!
//! Provides request and decision logging.

pub mod logging;
