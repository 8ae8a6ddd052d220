//! Configuration management for the credential chain
//!
//! Collaborator backing data (banned users, seeded session tokens, trusted
//! credentials, token format) is loaded once at startup from `chain.toml`
//! with environment overrides, then handed to each collaborator.

use config::{Config, Environment, File, FileFormat, Map};
use log::debug;
use serde::Deserialize;
use std::collections::HashSet;
use std::io;
use std::path::Path;

use crate::auth::{
    InMemoryTokenCache, RandomTokenIssuer, StaticBannedRegistry, StaticCredentialVerifier,
};

/// Search order for the configuration file, without extension.
const CONFIG_PATHS: [&str; 2] = [
    "credential-chain/chain", // Container layout: /app/credential-chain/chain.toml
    "chain",                  // Local development: ./chain.toml
];

/// Environment variable prefix, e.g. `CRED_CHAIN_TOKEN_PREFIX`.
const ENV_PREFIX: &str = "CRED_CHAIN";

/// Keys whose environment values are comma-separated lists,
/// e.g. `CRED_CHAIN_BANNED_USERS=mallory,eve`.
const ENV_LIST_KEYS: [&str; 1] = ["banned_users"];

fn default_token_prefix() -> String {
    "tok".to_string()
}

/// A session token known at startup
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct CachedTokenEntry {
    pub username: String,
    pub token: String,
}

/// A trusted username/password pair
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct CredentialEntry {
    pub username: String,
    pub password: String,
}

/// Backing data for every collaborator of the validation chain
///
/// Usernames are always values, never table keys, so their case survives
/// loading.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ChainConfig {
    /// Usernames rejected before any other check
    #[serde(default)]
    pub banned_users: Vec<String>,

    /// Session tokens known at startup
    #[serde(default)]
    pub cached_tokens: Vec<CachedTokenEntry>,

    /// Trusted username/password pairs
    #[serde(default)]
    pub credentials: Vec<CredentialEntry>,

    /// Prefix for freshly issued tokens
    /// Environment: CRED_CHAIN_TOKEN_PREFIX
    #[serde(default = "default_token_prefix")]
    pub token_prefix: String,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            banned_users: Vec::new(),
            cached_tokens: Vec::new(),
            credentials: Vec::new(),
            token_prefix: default_token_prefix(),
        }
    }
}

impl ChainConfig {
    /// Load configuration from the first `chain.toml` found, with environment overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_first(&CONFIG_PATHS, None)
    }

    /// Tries each path in order. Only a missing file moves on to the next
    /// path; a present but unreadable or invalid file is an error.
    fn load_first<P: AsRef<Path>>(
        paths: &[P],
        env_source: Option<Map<String, String>>,
    ) -> Result<Self, config::ConfigError> {
        let mut last_error = None;

        for config_path in paths {
            let config_path = config_path.as_ref();
            match Self::load_with(config_path, env_source.clone()) {
                Ok(config) => return Ok(config),
                Err(e) if is_missing_file(&e) => {
                    debug!("No configuration at {}", config_path.display());
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| {
            config::ConfigError::Message(format!(
                "No configuration file found. Tried: {CONFIG_PATHS:?}"
            ))
        }))
    }

    /// Load configuration from a specific file path
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, config::ConfigError> {
        Self::load_with(path.as_ref(), None)
    }

    /// `env_source` replaces the process environment when set.
    fn load_with(
        path: &Path,
        env_source: Option<Map<String, String>>,
    ) -> Result<Self, config::ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .add_source(environment(env_source))
            .build()?;

        let config: ChainConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML text, without environment overrides
    pub fn from_toml_str(toml: &str) -> Result<Self, config::ConfigError> {
        let config: ChainConfig = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.banned_users.iter().any(|u| u.is_empty()) {
            return Err(config::ConfigError::Message(
                "banned_users cannot contain an empty username".into(),
            ));
        }

        if self.cached_tokens.iter().any(|e| e.username.is_empty()) {
            return Err(config::ConfigError::Message(
                "cached_tokens cannot contain an empty username".into(),
            ));
        }

        if let Some(entry) = self.cached_tokens.iter().find(|e| e.token.is_empty()) {
            return Err(config::ConfigError::Message(format!(
                "cached token for '{}' cannot be empty",
                entry.username
            )));
        }

        if let Some(user) = first_duplicate(self.cached_tokens.iter().map(|e| &e.username)) {
            return Err(config::ConfigError::Message(format!(
                "cached_tokens lists '{user}' more than once"
            )));
        }

        if self.credentials.iter().any(|e| e.username.is_empty()) {
            return Err(config::ConfigError::Message(
                "credentials cannot contain an empty username".into(),
            ));
        }

        if let Some(user) = first_duplicate(self.credentials.iter().map(|e| &e.username)) {
            return Err(config::ConfigError::Message(format!(
                "credentials lists '{user}' more than once"
            )));
        }

        if self.token_prefix.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "token_prefix cannot be empty".into(),
            ));
        }

        Ok(())
    }

    pub fn banned_registry(&self) -> StaticBannedRegistry {
        StaticBannedRegistry::new(self.banned_users.iter().cloned())
    }

    pub fn token_cache(&self) -> InMemoryTokenCache {
        InMemoryTokenCache::with_entries(
            self.cached_tokens
                .iter()
                .map(|e| (e.username.clone(), e.token.clone())),
        )
    }

    pub fn credential_verifier(&self) -> StaticCredentialVerifier {
        StaticCredentialVerifier::new(
            self.credentials
                .iter()
                .map(|e| (e.username.clone(), e.password.clone())),
        )
    }

    pub fn token_issuer(&self) -> RandomTokenIssuer {
        RandomTokenIssuer::new(self.token_prefix.clone())
    }
}

fn environment(source: Option<Map<String, String>>) -> Environment {
    ENV_LIST_KEYS
        .iter()
        .fold(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(","),
            |env, key| env.with_list_parse_key(key),
        )
        .source(source)
}

/// The file source reports a missing file as a boxed `io::Error`.
fn is_missing_file(err: &config::ConfigError) -> bool {
    match err {
        config::ConfigError::NotFound(_) => true,
        config::ConfigError::Foreign(e) => e
            .downcast_ref::<io::Error>()
            .is_some_and(|e| e.kind() == io::ErrorKind::NotFound),
        _ => false,
    }
}

fn first_duplicate<'a>(usernames: impl Iterator<Item = &'a String>) -> Option<&'a String> {
    let mut seen = HashSet::new();
    usernames.into_iter().find(|u| !seen.insert(*u))
}
