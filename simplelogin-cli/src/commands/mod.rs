// simplelogin-cli/src/commands/mod.rs
pub mod account;
pub mod aliases;
pub mod auth;
pub mod config;
pub mod domains;
pub mod mailboxes;

pub use aliases::{handle_aliases, AliasesCommands};
pub use config::{handle_config, ConfigCommands};
pub use domains::{handle_domains, DomainsCommands};
pub use mailboxes::{handle_mailboxes, MailboxesCommands};

use crate::output::OutputFormat;
use anyhow::Result;
use simplelogin_client::{
    resolve_token, ConfigFile, KeyringStore, ResolvedToken, Settings, SimpleLoginClient,
};

/// State shared by every command of one invocation
pub struct Context {
    pub settings: Settings,
    pub format: OutputFormat,
    store: KeyringStore,
}

impl Context {
    pub fn new(settings: Settings, format: OutputFormat) -> Self {
        Self {
            settings,
            format,
            store: KeyringStore::new(),
        }
    }

    pub fn store(&self) -> &KeyringStore {
        &self.store
    }

    /// A broken config file is logged and treated as empty so the
    /// environment and keyring still work
    pub fn load_config(&self) -> ConfigFile {
        ConfigFile::load_or_default(&self.settings.config_path)
    }

    pub fn resolve_token(&self) -> Result<Option<ResolvedToken>> {
        let config = self.load_config();
        Ok(resolve_token(&self.settings, &self.store, &config)?)
    }

    /// Client carrying whatever token could be resolved; calls fail with
    /// `NotAuthenticated` before reaching the network when there is none
    pub fn client(&self) -> Result<SimpleLoginClient> {
        let token = self.resolve_token()?.map(|resolved| resolved.token);
        Ok(SimpleLoginClient::from_settings(&self.settings, token)?)
    }
}
