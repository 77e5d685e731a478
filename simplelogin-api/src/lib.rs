// simplelogin-api/src/lib.rs
pub mod client;
pub mod error;
pub mod http;
pub mod pagination;
pub mod types;

pub use client::{ApiClient, DEFAULT_API_URL};
pub use error::ApiError;
pub use http::{HttpClient, HttpError, HttpRequest, Method};
pub use pagination::{Paged, PagedResource, ALIAS_PAGE_SIZE};
pub use types::{
    Activity, Alias, AliasFilter, AliasMode, AliasOptions, Domain, DomainPatch, LoginResponse,
    Mailbox, MailboxRef, MfaResponse, NewCustomAlias, Suffix, TrashedAlias, UserSettings,
    UserStats,
};

// Re-export reqwest client when feature is enabled
#[cfg(feature = "reqwest")]
pub use http::ReqwestClient;
