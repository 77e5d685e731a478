// simplelogin-api/src/types.rs
use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Mailbox reference embedded in aliases and domains
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MailboxRef {
    pub id: u64,
    pub email: String,
}

/// Most recent forward/reply/block seen on an alias
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub action: String,
    pub timestamp: i64,
    #[serde(default)]
    pub contact: Option<serde_json::Value>,
}

/// SimpleLogin alias
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alias {
    pub id: u64,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    pub enabled: bool,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub mailboxes: Vec<MailboxRef>,
    #[serde(default)]
    pub nb_forward: u64,
    #[serde(default)]
    pub nb_reply: u64,
    #[serde(default)]
    pub nb_block: u64,
    pub creation_timestamp: i64,
    #[serde(default)]
    pub latest_activity: Option<Activity>,
}

/// Custom domain owned by the account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Domain {
    pub id: u64,
    pub domain_name: String,
    #[serde(default)]
    pub name: Option<String>,
    pub is_verified: bool,
    pub catch_all: bool,
    pub random_prefix_generation: bool,
    #[serde(default)]
    pub mailboxes: Vec<MailboxRef>,
    #[serde(default)]
    pub nb_alias: u64,
    #[serde(default)]
    pub creation_timestamp: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mailbox {
    pub id: u64,
    pub email: String,
    #[serde(default)]
    pub default: bool,
    #[serde(default)]
    pub creation_timestamp: i64,
    #[serde(default)]
    pub nb_alias: u64,
    #[serde(default)]
    pub verified: bool,
}

/// Alias deleted under a custom domain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrashedAlias {
    pub alias: String,
    pub deletion_timestamp: i64,
}

/// A suffix the server allows for custom aliases
///
/// `signed_suffix` is opaque and only valid for a short time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suffix {
    pub suffix: String,
    pub signed_suffix: String,
    #[serde(default)]
    pub is_custom: bool,
    #[serde(default)]
    pub is_premium: bool,
}

/// Answer of `GET /api/v5/alias/options`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AliasOptions {
    pub can_create: bool,
    #[serde(default)]
    pub prefix_suggestion: String,
    #[serde(default)]
    pub suffixes: Vec<Suffix>,
}

impl AliasOptions {
    pub fn find_suffix(&self, suffix: &str) -> Option<&Suffix> {
        self.suffixes.iter().find(|s| s.suffix == suffix)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSettings {
    pub alias_generator: String,
    #[serde(default)]
    pub notification: bool,
    #[serde(default)]
    pub random_alias_default_domain: Option<String>,
    #[serde(default)]
    pub sender_format: Option<String>,
    #[serde(default)]
    pub random_alias_suffix: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    #[serde(default)]
    pub nb_alias: u64,
    #[serde(default)]
    pub nb_forward: u64,
    #[serde(default)]
    pub nb_reply: u64,
    #[serde(default)]
    pub nb_block: u64,
}

/// Answer of `POST /api/auth/login`
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub mfa_enabled: bool,
    #[serde(default)]
    pub mfa_key: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
}

/// Answer of `POST /api/auth/mfa`
#[derive(Debug, Clone, Deserialize)]
pub struct MfaResponse {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
}

/// Random alias generation scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AliasMode {
    Uuid,
    Word,
}

impl AliasMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uuid => "uuid",
            Self::Word => "word",
        }
    }
}

impl fmt::Display for AliasMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AliasMode {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "uuid" => Ok(Self::Uuid),
            "word" => Ok(Self::Word),
            other => Err(ApiError::InvalidArgument(format!(
                "unknown alias mode '{}', expected 'uuid' or 'word'",
                other
            ))),
        }
    }
}

/// Status filter for alias listing; at most one is sent per request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AliasFilter {
    #[default]
    All,
    Pinned,
    Enabled,
    Disabled,
}

impl AliasFilter {
    /// Resolve CLI-style flags; pinned wins over disabled, disabled over enabled
    pub fn from_flags(pinned: bool, enabled: bool, disabled: bool) -> Self {
        if pinned {
            Self::Pinned
        } else if disabled {
            Self::Disabled
        } else if enabled {
            Self::Enabled
        } else {
            Self::All
        }
    }

    pub fn query_pair(&self) -> Option<(&'static str, &'static str)> {
        match self {
            Self::All => None,
            Self::Pinned => Some(("pinned", "true")),
            Self::Enabled => Some(("enabled", "true")),
            Self::Disabled => Some(("disabled", "true")),
        }
    }
}

/// Body of `POST /api/v3/alias/custom/new`
#[derive(Debug, Clone, Serialize)]
pub struct NewCustomAlias {
    pub alias_prefix: String,
    pub signed_suffix: String,
    pub mailbox_ids: Vec<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Partial update for a custom domain; unset fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DomainPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catch_all: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub random_prefix_generation: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mailbox_ids: Option<Vec<u64>>,
}

impl DomainPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
