//! Authentication result types
//!
//! Defines the single result value produced by every chain evaluation.

/// Outcome of one chain evaluation.
///
/// A token is present exactly when the user is authenticated. The two
/// constructors are the only way to build one, so no other combination exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    username: String,
    token: Option<String>,
}

impl AuthenticationResult {
    /// Successful login carrying a session token.
    pub fn authenticated(username: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            token: Some(token.into()),
        }
    }

    /// Rejected login; never carries a token.
    pub fn rejected(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            token: None,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}
