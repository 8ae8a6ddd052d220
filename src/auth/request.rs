//! Credential request
//!
//! The username/password pair submitted to the validation chain.

use std::fmt;

/// A username/password pair awaiting a decision.
///
/// Empty strings are accepted; deciding what they mean is the chain's job.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialRequest {
    username: String,
    password: String,
}

impl CredentialRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

// Passwords must never reach log output.
impl fmt::Debug for CredentialRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
