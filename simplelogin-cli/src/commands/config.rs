// simplelogin-cli/src/commands/config.rs
use super::Context;
use crate::output::{emit, print_warning};
use crate::render::{ConfigView, Message};
use anyhow::{bail, Result};
use serde_json::json;
use simplelogin_client::{mask_key, ResolvedToken, TokenSource};

#[derive(clap::Subcommand, Clone, Debug)]
pub enum ConfigCommands {
    /// Save an API key to the config file
    SetKey {
        /// API key created in the SimpleLogin dashboard
        api_key: String,
    },
    /// Show the key in use, where it came from, and the config location
    View,
}

pub async fn handle_config(ctx: &Context, cmd: ConfigCommands) -> Result<()> {
    match cmd {
        ConfigCommands::SetKey { api_key } => {
            let api_key = api_key.trim().to_string();
            if api_key.is_empty() {
                bail!("API key cannot be empty");
            }

            let path = &ctx.settings.config_path;
            let mut config = ctx.load_config();
            config.api_key = api_key;
            config.save(path)?;

            emit(
                &Message::new(
                    format!("API key saved to {}", path.display()),
                    json!({
                        "path": path.display().to_string(),
                        "api_key": mask_key(&config.api_key),
                    }),
                ),
                ctx.format,
            )
        }
        ConfigCommands::View => {
            let path = &ctx.settings.config_path;
            let config = ctx.load_config();

            // Keep reporting the rest when the keyring is unreachable
            let resolved = match ctx.resolve_token() {
                Ok(resolved) => resolved,
                Err(err) => {
                    print_warning(&format!("Couldn't resolve the API key: {:#}", err));
                    config.api_key().map(|key| ResolvedToken {
                        token: key.to_string(),
                        source: TokenSource::ConfigFile,
                    })
                }
            };

            let view = ConfigView {
                api_key: resolved.as_ref().map(|r| mask_key(&r.token)),
                source: resolved.as_ref().map(|r| r.source.describe()),
                config_path: path.display().to_string(),
                account_email: ctx.settings.account_email.clone(),
                api_key_env: ctx.settings.api_key_override.is_some(),
                config_env: ctx.settings.config_override.as_ref().map(|p| p.display().to_string()),
                xdg_config_home: ctx
                    .settings
                    .xdg_config_home
                    .as_ref()
                    .map(|p| p.display().to_string()),
                api_url: ctx.settings.api_url.clone(),
            };
            emit(&view, ctx.format)
        }
    }
}
