// simplelogin-client/src/credentials.rs
//! Storage of the API token in the platform keyring.

use crate::config::{ConfigFile, Settings};
use keyring::Entry;
use thiserror::Error;
use tracing::{debug, info};

/// Keyring service the tokens are filed under
pub const SERVICE_NAME: &str = "Simplelogin";

#[derive(Debug, Error)]
#[error("credential store: {0}")]
pub struct CredentialError(pub String);

/// One secret per account
pub trait CredentialStore {
    fn get(&self, account: &str) -> Result<Option<String>, CredentialError>;

    fn set(&self, account: &str, secret: &str) -> Result<(), CredentialError>;

    /// Returns false when there was nothing to delete
    fn delete(&self, account: &str) -> Result<bool, CredentialError>;
}

pub struct KeyringStore {
    service: String,
}

impl KeyringStore {
    pub fn new() -> Self {
        Self {
            service: SERVICE_NAME.to_string(),
        }
    }

    fn entry(&self, account: &str) -> Result<Entry, CredentialError> {
        Entry::new(&self.service, account)
            .map_err(|e| CredentialError(format!("Failed to access keyring: {}", e)))
    }
}

impl Default for KeyringStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialStore for KeyringStore {
    fn get(&self, account: &str) -> Result<Option<String>, CredentialError> {
        match self.entry(account)?.get_password() {
            Ok(secret) => Ok(Some(secret)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(CredentialError(format!("Failed to read key: {}", e))),
        }
    }

    fn set(&self, account: &str, secret: &str) -> Result<(), CredentialError> {
        self.entry(account)?
            .set_password(secret)
            .map_err(|e| CredentialError(format!("Failed to store key: {}", e)))?;
        info!(service = %self.service, account, "stored API key");
        Ok(())
    }

    fn delete(&self, account: &str) -> Result<bool, CredentialError> {
        match self.entry(account)?.delete_credential() {
            Ok(()) => {
                info!(service = %self.service, account, "deleted API key");
                Ok(true)
            }
            Err(keyring::Error::NoEntry) => Ok(false),
            Err(e) => Err(CredentialError(format!("Failed to delete key: {}", e))),
        }
    }
}

/// Where the token in use came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Environment,
    Keyring,
    ConfigFile,
}

impl TokenSource {
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Environment => "environment",
            Self::Keyring => "keyring",
            Self::ConfigFile => "config file",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedToken {
    pub token: String,
    pub source: TokenSource,
}

/// Pick the token: environment override, then keyring entry of the
/// configured account, then the config file
pub fn resolve_token(
    settings: &Settings,
    store: &dyn CredentialStore,
    config: &ConfigFile,
) -> Result<Option<ResolvedToken>, CredentialError> {
    if let Some(token) = &settings.api_key_override {
        debug!("using API key from environment");
        return Ok(Some(ResolvedToken {
            token: token.clone(),
            source: TokenSource::Environment,
        }));
    }

    if let Some(email) = settings.account_email() {
        if let Some(token) = store.get(email)?.filter(|t| !t.is_empty()) {
            debug!(account = email, "using API key from keyring");
            return Ok(Some(ResolvedToken {
                token,
                source: TokenSource::Keyring,
            }));
        }
    }

    Ok(config.api_key().map(|key| ResolvedToken {
        token: key.to_string(),
        source: TokenSource::ConfigFile,
    }))
}
