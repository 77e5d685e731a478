pub mod auth;
pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod prompt;

#[cfg(test)]
mod testing;

pub use auth::{Authenticator, DEFAULT_DEVICE};
pub use client::{
    parse_id_list, CustomAliasRequest, DeleteOutcome, DomainUpdate, SimpleLoginClient,
    UpdateOutcome,
};
pub use config::{mask_key, ConfigFile, Settings};
pub use credentials::{
    resolve_token, CredentialError, CredentialStore, KeyringStore, ResolvedToken, TokenSource,
};
pub use error::{AuthError, Error, Result};
pub use prompt::Prompt;

// Re-export API types for convenience
pub use simplelogin_api::{
    Alias, AliasFilter, AliasMode, AliasOptions, ApiClient, ApiError, Domain, Mailbox,
    MailboxRef, Paged, ReqwestClient, TrashedAlias, UserSettings, UserStats,
};
