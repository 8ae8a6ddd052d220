//! Logging middleware
//!
//! Log lines for chain requests and decisions. Passwords never reach these.

use log::info;

use crate::auth::AuthenticationResult;

/// Log an incoming credential request
pub fn log_request(username: &str) {
    info!("Evaluating credentials for user: {}", username);
}

/// Log the stage that decided a request
pub fn log_decision(stage: &str, result: &AuthenticationResult) {
    info!(
        "User {} {} by {}",
        result.username(),
        if result.is_authenticated() {
            "authenticated"
        } else {
            "rejected"
        },
        stage
    );
}
