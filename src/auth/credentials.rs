//! Credential storage and verification
//!
//! Checks username/password pairs against a trusted credential set.

use std::collections::HashMap;

/// Verifies a username/password pair.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// Credential set loaded from configuration. Plaintext comparison only;
/// this is not a password store.
#[derive(Debug, Default, Clone)]
pub struct StaticCredentialVerifier {
    credentials: HashMap<String, String>,
}

impl StaticCredentialVerifier {
    pub fn new<I, K, V>(credentials: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            credentials: credentials
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }
}

impl CredentialVerifier for StaticCredentialVerifier {
    fn verify(&self, username: &str, password: &str) -> bool {
        match self.credentials.get(username) {
            Some(stored) => stored == password,
            None => false,
        }
    }
}
