//! Token issuance
//!
//! Produces opaque session tokens for freshly verified users.

use uuid::Uuid;

/// Produces a session token for a newly authenticated user.
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, username: &str) -> String;
}

/// Issues `<prefix>-<random uuid>` tokens. The username does not appear in
/// the token.
#[derive(Debug, Clone)]
pub struct RandomTokenIssuer {
    prefix: String,
}

impl RandomTokenIssuer {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for RandomTokenIssuer {
    fn default() -> Self {
        Self::new("tok")
    }
}

impl TokenIssuer for RandomTokenIssuer {
    fn issue(&self, _username: &str) -> String {
        format!("{}-{}", self.prefix, Uuid::new_v4().simple())
    }
}
