//! Banned username registry
//!
//! Membership test over usernames that must never authenticate.

use std::collections::HashSet;

/// Answers whether a username is banned.
pub trait BannedRegistry: Send + Sync {
    fn contains(&self, username: &str) -> bool;
}

/// Fixed set of banned usernames, loaded once at startup.
#[derive(Debug, Default, Clone)]
pub struct StaticBannedRegistry {
    banned: HashSet<String>,
}

impl StaticBannedRegistry {
    pub fn new<I, S>(usernames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            banned: usernames.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.banned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.banned.is_empty()
    }
}

impl BannedRegistry for StaticBannedRegistry {
    fn contains(&self, username: &str) -> bool {
        self.banned.contains(username)
    }
}
