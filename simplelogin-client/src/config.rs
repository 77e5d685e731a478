// simplelogin-client/src/config.rs
use anyhow::{anyhow, bail, Context, Result};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use simplelogin_api::DEFAULT_API_URL;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

pub const ENV_API_URL: &str = "SIMPLELOGIN_API_URL";
pub const ENV_EMAIL: &str = "SIMPLELOGIN_EMAIL";
pub const ENV_API_KEY: &str = "SIMPLELOGIN_API_KEY";
pub const ENV_CONFIG: &str = "SIMPLELOGIN_CONFIG";
pub const ENV_TIMEOUT: &str = "SIMPLELOGIN_TIMEOUT";
pub const ENV_XDG_CONFIG_HOME: &str = "XDG_CONFIG_HOME";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const CONFIG_DIR_NAME: &str = "simplelogin";
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Process-wide settings, resolved once at startup
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_url: String,
    /// Account whose stored token is used
    pub account_email: Option<String>,
    /// Token given directly through the environment
    pub api_key_override: Option<String>,
    pub config_path: PathBuf,
    pub config_override: Option<PathBuf>,
    pub xdg_config_home: Option<PathBuf>,
    pub timeout: Duration,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary variable source; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let config_override = get(ENV_CONFIG).map(PathBuf::from);
        let xdg_config_home = get(ENV_XDG_CONFIG_HOME).map(PathBuf::from);

        let config_path = match &config_override {
            Some(path) => path.clone(),
            None => config_dir(xdg_config_home.as_deref())?.join(CONFIG_FILE_NAME),
        };

        let timeout = match get(ENV_TIMEOUT) {
            Some(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("{} must be a number of seconds, got '{}'", ENV_TIMEOUT, raw))?;
                if secs == 0 {
                    bail!("{} must be at least 1 second, got '{}'", ENV_TIMEOUT, raw);
                }
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            api_url: get(ENV_API_URL).unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            account_email: get(ENV_EMAIL),
            api_key_override: get(ENV_API_KEY),
            config_path,
            config_override,
            xdg_config_home,
            timeout,
        })
    }

    pub fn account_email(&self) -> Option<&str> {
        self.account_email.as_deref()
    }
}

fn config_dir(xdg_config_home: Option<&Path>) -> Result<PathBuf> {
    if let Some(base) = xdg_config_home {
        return Ok(base.join(CONFIG_DIR_NAME));
    }
    let base_dirs =
        BaseDirs::new().ok_or_else(|| anyhow!("Cannot determine config directory"))?;
    Ok(base_dirs.config_dir().join(CONFIG_DIR_NAME))
}

/// Contents of `config.yaml`
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
pub struct ConfigFile {
    /// Fallback API key used when neither the environment nor the keyring has one
    #[serde(default)]
    pub api_key: String,
}

impl ConfigFile {
    /// Load the file, writing an empty one first if it does not exist
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if !path.exists() {
            let default = Self::default();
            default.save(path)?;
            info!(path = %path.display(), "created config file");
            return Ok(default);
        }
        Self::load(path)
    }

    /// Like `load_or_create`, but a file that can't be read or parsed counts as empty
    pub fn load_or_default(path: &Path) -> Self {
        Self::load_or_create(path).unwrap_or_else(|err| {
            let reason = format!("{:#}", err);
            warn!(path = %path.display(), error = %reason, "ignoring config file");
            Self::default()
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Couldn't read config file {}", path.display()))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&content)
            .with_context(|| format!("Couldn't parse config file {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let content = serde_yaml::to_string(self)?;
        fs::write(path, content)?;

        // Set permissions to 600 (owner read/write only)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(path, perms)?;
        }

        Ok(())
    }

    pub fn api_key(&self) -> Option<&str> {
        Some(self.api_key.as_str()).filter(|k| !k.is_empty())
    }
}

/// Show the first and last four characters of a key
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}{}", head, "*".repeat(chars.len() - 8), tail)
}
