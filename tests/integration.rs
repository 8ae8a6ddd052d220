use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use credential_chain::auth::{
    InMemoryTokenCache, StaticBannedRegistry, StaticCredentialVerifier, TokenIssuer,
};
use credential_chain::config::ChainConfig;
use credential_chain::{AuthenticationResult, CredentialRequest, ValidationChain};

const CONFIG: &str = r#"
banned_users = ["bannedUser"]

[[cached_tokens]]
username = "cachedUser"
token = "cachedUserToken"

[[credentials]]
username = "authenticatedUser"
password = "password"
"#;

// Deterministic issuer so identical requests give identical results
struct SequenceIssuer {
    issued: AtomicUsize,
}

impl TokenIssuer for SequenceIssuer {
    fn issue(&self, username: &str) -> String {
        self.issued.fetch_add(1, Ordering::SeqCst);
        format!("{}Token", username)
    }
}

fn configured_chain() -> ValidationChain {
    let config = ChainConfig::from_toml_str(CONFIG).unwrap();
    ValidationChain::standard(
        Arc::new(config.banned_registry()),
        Arc::new(config.token_cache()),
        Arc::new(config.credential_verifier()),
        Arc::new(config.token_issuer()),
    )
    .unwrap()
}

fn deterministic_chain(cache: InMemoryTokenCache) -> (ValidationChain, Arc<SequenceIssuer>) {
    let issuer = Arc::new(SequenceIssuer {
        issued: AtomicUsize::new(0),
    });
    let chain = ValidationChain::standard(
        Arc::new(StaticBannedRegistry::new(["bannedUser"])),
        Arc::new(cache),
        Arc::new(StaticCredentialVerifier::new([
            ("authenticatedUser", "password"),
            ("bannedUser", "password"),
        ])),
        issuer.clone(),
    )
    .unwrap();
    (chain, issuer)
}

#[test]
fn test_banned_user_rejected() {
    let result = configured_chain().evaluate(&CredentialRequest::new("bannedUser", "password"));
    assert_eq!(result.username(), "bannedUser");
    assert_eq!(result.token(), None);
    assert!(!result.is_authenticated());
}

#[test]
fn test_cached_user_gets_cached_token() {
    let result = configured_chain().evaluate(&CredentialRequest::new("cachedUser", "password"));
    assert_eq!(
        result,
        AuthenticationResult::authenticated("cachedUser", "cachedUserToken")
    );
}

#[test]
fn test_verified_user_gets_issued_token() {
    let result =
        configured_chain().evaluate(&CredentialRequest::new("authenticatedUser", "password"));
    assert!(result.is_authenticated());
    assert_eq!(result.username(), "authenticatedUser");
    assert!(result.token().unwrap().starts_with("tok-"));
}

#[test]
fn test_failed_verification_falls_back() {
    let result =
        configured_chain().evaluate(&CredentialRequest::new("authenticateFailure", "password"));
    assert_eq!(result, AuthenticationResult::rejected("authenticateFailure"));
}

#[test]
fn test_ban_beats_cache_and_valid_password() {
    let cache = InMemoryTokenCache::with_entries([("bannedUser", "leakedToken")]);
    let (chain, issuer) = deterministic_chain(cache);

    let result = chain.evaluate(&CredentialRequest::new("bannedUser", "password"));
    assert_eq!(result, AuthenticationResult::rejected("bannedUser"));
    assert_eq!(issuer.issued.load(Ordering::SeqCst), 0);
}

#[test]
fn test_cache_ignores_password() {
    let cache = InMemoryTokenCache::with_entries([("authenticatedUser", "sessionToken")]);
    let (chain, issuer) = deterministic_chain(cache);

    for password in ["password", "wrong", ""] {
        let result = chain.evaluate(&CredentialRequest::new("authenticatedUser", password));
        assert_eq!(
            result,
            AuthenticationResult::authenticated("authenticatedUser", "sessionToken")
        );
    }
    assert_eq!(issuer.issued.load(Ordering::SeqCst), 0);
}

#[test]
fn test_every_request_gets_consistent_result() {
    let chain = configured_chain();
    let requests = [
        ("", ""),
        ("", "password"),
        ("bannedUser", ""),
        ("cachedUser", ""),
        ("authenticatedUser", ""),
        ("authenticatedUser", "password"),
        ("nobody", "nothing"),
    ];

    for (username, password) in requests {
        let result = chain.evaluate(&CredentialRequest::new(username, password));
        assert_eq!(result.username(), username);
        assert_eq!(result.is_authenticated(), result.token().is_some());
    }
}

#[test]
fn test_repeated_evaluation_is_identical() {
    let cache = InMemoryTokenCache::with_entries([("cachedUser", "cachedUserToken")]);
    let (chain, _issuer) = deterministic_chain(cache);

    for (username, password) in [
        ("bannedUser", "password"),
        ("cachedUser", "password"),
        ("authenticatedUser", "password"),
        ("authenticateFailure", "password"),
    ] {
        let request = CredentialRequest::new(username, password);
        assert_eq!(chain.evaluate(&request), chain.evaluate(&request));
    }
}

#[test]
fn test_populated_cache_serves_next_login() {
    let cache = Arc::new(InMemoryTokenCache::new());
    let config = ChainConfig::from_toml_str(CONFIG).unwrap();
    let chain = ValidationChain::standard(
        Arc::new(config.banned_registry()),
        cache.clone(),
        Arc::new(config.credential_verifier()),
        Arc::new(config.token_issuer()),
    )
    .unwrap();

    let first = chain.evaluate(&CredentialRequest::new("authenticatedUser", "password"));
    let token = first.token().unwrap().to_string();
    cache.insert("authenticatedUser", token.clone());

    let second = chain.evaluate(&CredentialRequest::new("authenticatedUser", "stale"));
    assert_eq!(second.token(), Some(token.as_str()));
}

#[test]
fn test_chain_shared_across_threads() {
    let chain = Arc::new(configured_chain());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let chain = Arc::clone(&chain);
            thread::spawn(move || {
                let username = if i % 2 == 0 { "cachedUser" } else { "bannedUser" };
                chain.evaluate(&CredentialRequest::new(username, "password"))
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let result = handle.join().unwrap();
        assert_eq!(result.is_authenticated(), i % 2 == 0);
    }
}
