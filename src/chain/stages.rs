//! Built-in stages
//!
//! The four checks of the standard chain, in evaluation order: banned
//! usernames, cached sessions, credential verification, and the fallback.

use log::debug;
use std::sync::Arc;

use crate::auth::{
    AuthenticationResult, BannedRegistry, CredentialRequest, CredentialVerifier, TokenCache,
    TokenIssuer,
};
use crate::chain::stage::{Stage, StageOutcome};

/// Rejects banned usernames without looking at the password.
pub struct BannedCheck {
    registry: Arc<dyn BannedRegistry>,
}

impl BannedCheck {
    pub fn new(registry: Arc<dyn BannedRegistry>) -> Self {
        Self { registry }
    }
}

impl Stage for BannedCheck {
    fn name(&self) -> &'static str {
        "banned-check"
    }

    fn attempt(&self, request: &CredentialRequest) -> StageOutcome {
        if self.registry.contains(request.username()) {
            debug!("User {} is banned", request.username());
            StageOutcome::Decided(AuthenticationResult::rejected(request.username()))
        } else {
            StageOutcome::Continue
        }
    }
}

/// Accepts users holding a cached session token.
///
/// A cache hit authenticates without verifying the password: the cache holds
/// live sessions, not re-checkable logins.
pub struct CacheCheck {
    cache: Arc<dyn TokenCache>,
}

impl CacheCheck {
    pub fn new(cache: Arc<dyn TokenCache>) -> Self {
        Self { cache }
    }
}

impl Stage for CacheCheck {
    fn name(&self) -> &'static str {
        "cache-check"
    }

    fn attempt(&self, request: &CredentialRequest) -> StageOutcome {
        match self.cache.lookup(request.username()) {
            Some(token) => {
                debug!("Cache hit for user {}", request.username());
                StageOutcome::Decided(AuthenticationResult::authenticated(
                    request.username(),
                    token,
                ))
            }
            None => StageOutcome::Continue,
        }
    }
}

/// Verifies the password and issues a fresh token on success.
/// A failed verification defers to the fallback.
pub struct CredentialCheck {
    verifier: Arc<dyn CredentialVerifier>,
    issuer: Arc<dyn TokenIssuer>,
}

impl CredentialCheck {
    pub fn new(verifier: Arc<dyn CredentialVerifier>, issuer: Arc<dyn TokenIssuer>) -> Self {
        Self { verifier, issuer }
    }
}

impl Stage for CredentialCheck {
    fn name(&self) -> &'static str {
        "credential-check"
    }

    fn attempt(&self, request: &CredentialRequest) -> StageOutcome {
        if !self
            .verifier
            .verify(request.username(), request.password())
        {
            debug!("Credential verification failed for user {}", request.username());
            return StageOutcome::Continue;
        }

        let token = self.issuer.issue(request.username());
        debug!("Issued token for user {}", request.username());
        StageOutcome::Decided(AuthenticationResult::authenticated(request.username(), token))
    }
}

/// Rejects everything that reaches it.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailureFallback;

impl Stage for FailureFallback {
    fn name(&self) -> &'static str {
        "failure-fallback"
    }

    fn attempt(&self, request: &CredentialRequest) -> StageOutcome {
        StageOutcome::Decided(AuthenticationResult::rejected(request.username()))
    }

    fn is_terminal(&self) -> bool {
        true
    }
}
