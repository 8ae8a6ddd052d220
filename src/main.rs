//! Credential Chain - Entry Point
//!
//! Loads `chain.toml`, assembles the standard validation chain and evaluates
//! one `username password` pair per stdin line.

use log::{info, warn};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use credential_chain::auth::InMemoryTokenCache;
use credential_chain::config::ChainConfig;
use credential_chain::error::ServiceError;
use credential_chain::error::handlers::{exit_code, handle_error};
use credential_chain::{AuthenticationResult, CredentialRequest, ValidationChain};

#[tokio::main]
async fn main() {
    // Initialize the logger (env_logger picks up RUST_LOG environment variable)
    env_logger::init();

    info!("Launching credential chain...");

    if let Err(e) = run().await {
        handle_error(&e);
        std::process::exit(exit_code(&e));
    }
}

async fn run() -> Result<(), ServiceError> {
    let config = ChainConfig::load()?;

    let registry = Arc::new(config.banned_registry());
    let cache = Arc::new(config.token_cache());
    let verifier = Arc::new(config.credential_verifier());
    info!(
        "Loaded {} banned users, {} cached tokens, {} credentials",
        registry.len(),
        cache.len(),
        verifier.len()
    );
    if verifier.is_empty() {
        warn!("No credentials configured; only cached sessions can authenticate");
    }

    let chain = ValidationChain::standard(
        registry,
        cache.clone(),
        verifier,
        Arc::new(config.token_issuer()),
    )?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        let Some(request) = parse_line(&line) else {
            if !line.trim().is_empty() {
                warn!("Ignoring malformed input line");
            }
            continue;
        };

        let result = chain.evaluate(&request);
        remember_session(&cache, &result);

        stdout.write_all(format_result(&result).as_bytes()).await?;
        stdout.flush().await?;
    }

    Ok(())
}

/// Splits `username password`; the password may be empty.
fn parse_line(line: &str) -> Option<CredentialRequest> {
    let line = line.trim_end_matches(['\r', '\n']);
    let mut parts = line.splitn(2, ' ');
    let username = parts.next().filter(|u| !u.is_empty())?;
    let password = parts.next().unwrap_or("");
    Some(CredentialRequest::new(username, password))
}

/// Successful logins become cache entries, so the next login is a cache hit.
fn remember_session(cache: &InMemoryTokenCache, result: &AuthenticationResult) {
    if let Some(token) = result.token() {
        cache.insert(result.username(), token);
    }
}

fn format_result(result: &AuthenticationResult) -> String {
    format!(
        "username={} authenticated={} token={}\n",
        result.username(),
        result.is_authenticated(),
        result.token().unwrap_or("-")
    )
}
