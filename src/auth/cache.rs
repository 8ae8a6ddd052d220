//! Session token cache
//!
//! Maps previously authenticated usernames to their session tokens. The
//! validation chain only reads from it; populating it belongs to the caller.

use log::warn;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Looks up a cached session token for a username.
pub trait TokenCache: Send + Sync {
    fn lookup(&self, username: &str) -> Option<String>;
}

/// Thread-safe in-memory token cache.
#[derive(Debug, Default)]
pub struct InMemoryTokenCache {
    tokens: RwLock<HashMap<String, String>>,
}

impl InMemoryTokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a cache pre-seeded with `(username, token)` pairs.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let tokens = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            tokens: RwLock::new(tokens),
        }
    }

    /// Stores a token, returning the one it replaced.
    pub fn insert(&self, username: impl Into<String>, token: impl Into<String>) -> Option<String> {
        let mut tokens = self.tokens.write().unwrap_or_else(|poisoned| {
            warn!("Token cache lock poisoned, recovering");
            PoisonError::into_inner(poisoned)
        });
        tokens.insert(username.into(), token.into())
    }

    pub fn remove(&self, username: &str) -> Option<String> {
        let mut tokens = self.tokens.write().unwrap_or_else(|poisoned| {
            warn!("Token cache lock poisoned, recovering");
            PoisonError::into_inner(poisoned)
        });
        tokens.remove(username)
    }

    pub fn len(&self) -> usize {
        self.tokens
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TokenCache for InMemoryTokenCache {
    fn lookup(&self, username: &str) -> Option<String> {
        let tokens = self.tokens.read().unwrap_or_else(|poisoned| {
            warn!("Token cache lock poisoned, recovering");
            PoisonError::into_inner(poisoned)
        });
        tokens.get(username).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_lookup_seeded_entry() {
        let cache = InMemoryTokenCache::with_entries([("cachedUser", "cachedUserToken")]);
        assert_eq!(cache.lookup("cachedUser").as_deref(), Some("cachedUserToken"));
        assert_eq!(cache.lookup("someoneElse"), None);
    }

    #[test]
    fn test_insert_replaces_and_remove_clears() {
        let cache = InMemoryTokenCache::new();
        assert_eq!(cache.insert("bob", "t1"), None);
        assert_eq!(cache.insert("bob", "t2").as_deref(), Some("t1"));
        assert_eq!(cache.lookup("bob").as_deref(), Some("t2"));
        assert_eq!(cache.remove("bob").as_deref(), Some("t2"));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_concurrent_readers_and_writer() {
        let cache = Arc::new(InMemoryTokenCache::new());
        let writer = {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..100 {
                    cache.insert(format!("user{}", i), format!("token{}", i));
                }
            })
        };
        let readers: Vec<_> = (0..4)
            .map(|_| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for i in 0..100 {
                        if let Some(token) = cache.lookup(&format!("user{}", i)) {
                            assert_eq!(token, format!("token{}", i));
                        }
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }
        assert_eq!(cache.len(), 100);
    }
}
