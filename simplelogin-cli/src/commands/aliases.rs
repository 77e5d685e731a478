// simplelogin-cli/src/commands/aliases.rs
use super::Context;
use crate::output::{emit, print_error, print_response, ErrorResponse, Meta, OutputFormat, Response};
use crate::render::{AliasDetail, AliasList, Message};
use crate::terminal::TerminalPrompt;
use anyhow::{bail, Result};
use serde_json::json;
use simplelogin_client::{parse_id_list, AliasFilter, CustomAliasRequest, DeleteOutcome};

#[derive(clap::Subcommand, Clone, Debug)]
pub enum AliasesCommands {
    /// List aliases
    List {
        /// Fetch only this page (0-based) instead of every page
        #[arg(long)]
        page: Option<u32>,
        /// Only pinned aliases
        #[arg(short, long)]
        pinned: bool,
        /// Only enabled aliases
        #[arg(short, long)]
        enabled: bool,
        /// Only disabled aliases
        #[arg(short, long)]
        disabled: bool,
    },
    /// Create an alias (custom with --prefix, random otherwise)
    Create {
        /// Prefix of a custom alias
        #[arg(long)]
        prefix: Option<String>,
        /// Suffix of a custom alias, as offered by the server
        #[arg(long)]
        suffix: Option<String>,
        /// Mailbox IDs (comma-separated) the alias forwards to
        #[arg(long)]
        mailbox: Option<String>,
        /// Note attached to the alias
        #[arg(long)]
        note: Option<String>,
        /// Display name used when replying from the alias
        #[arg(long)]
        name: Option<String>,
        /// Random alias scheme: uuid or word
        #[arg(long)]
        mode: Option<String>,
    },
    /// Enable a disabled alias or disable an enabled one
    Toggle {
        /// Alias ID
        id: u64,
    },
    /// Delete an alias
    Delete {
        /// Alias ID
        id: u64,
    },
    /// Show details of an alias
    Info {
        /// Alias ID
        id: u64,
    },
}

/// A prefix makes a custom alias; the other flags must fit that choice
fn check_create_flags(
    prefix: Option<&str>,
    suffix: Option<&str>,
    mailbox: Option<&str>,
    name: Option<&str>,
    mode: Option<&str>,
) -> Result<()> {
    match prefix {
        Some(_) if mode.is_some() => bail!("--mode only applies to random aliases"),
        None if suffix.is_some() || mailbox.is_some() || name.is_some() => {
            bail!("--suffix, --mailbox and --name require --prefix")
        }
        _ => Ok(()),
    }
}

pub async fn handle_aliases(ctx: &Context, cmd: AliasesCommands) -> Result<()> {
    let client = ctx.client()?;

    match cmd {
        AliasesCommands::List {
            page,
            pinned,
            enabled,
            disabled,
        } => {
            let filter = AliasFilter::from_flags(pinned, enabled, disabled);

            if let Some(page) = page {
                let aliases = client.alias_page(page, filter).await?;
                return emit(
                    &AliasList {
                        aliases: &aliases,
                        pages: None,
                    },
                    ctx.format,
                );
            }

            let paged = client.list_aliases(filter).await;
            let view = AliasList {
                aliases: &paged.items,
                pages: Some(paged.pages),
            };

            match &paged.error {
                None => emit(&view, ctx.format),
                // Keep what was fetched; the failure is reported next to it
                Some(err) => match ctx.format.resolve() {
                    OutputFormat::Json => print_response(&Response::partial(
                        &paged.items,
                        ErrorResponse::from_api(err),
                        Meta {
                            pages: Some(paged.pages),
                            count: Some(paged.items.len()),
                        },
                    )),
                    _ => {
                        emit(&view, ctx.format)?;
                        print_error(&format!("listing stopped after {} page(s): {}", paged.pages, err));
                        Ok(())
                    }
                },
            }
        }
        AliasesCommands::Create {
            prefix,
            suffix,
            mailbox,
            note,
            name,
            mode,
        } => {
            check_create_flags(
                prefix.as_deref(),
                suffix.as_deref(),
                mailbox.as_deref(),
                name.as_deref(),
                mode.as_deref(),
            )?;

            let alias = match prefix {
                Some(prefix) => {
                    let prompt = TerminalPrompt;
                    let mailbox_ids = match mailbox {
                        Some(raw) => parse_id_list(&raw)?,
                        None => client.pick_mailboxes(&prompt).await?,
                    };
                    let request = CustomAliasRequest {
                        prefix,
                        mailbox_ids,
                        note,
                        name,
                        suffix,
                    };
                    client.create_custom_alias(request, &prompt).await?
                }
                None => {
                    client
                        .create_random_alias(mode.as_deref(), note.as_deref())
                        .await?
                }
            };
            emit(&AliasDetail(&alias), ctx.format)
        }
        AliasesCommands::Toggle { id } => {
            let enabled = client.toggle_alias(id).await?;
            let state = if enabled { "enabled" } else { "disabled" };
            emit(
                &Message::new(format!("Alias {} {}", id, state), json!({ "id": id, "enabled": enabled })),
                ctx.format,
            )
        }
        AliasesCommands::Delete { id } => {
            let prompt = TerminalPrompt;
            match client.delete_alias(id, &prompt).await? {
                DeleteOutcome::Deleted { email } => emit(
                    &Message::new(
                        format!("Deleted {}", email),
                        json!({ "id": id, "email": email, "deleted": true }),
                    ),
                    ctx.format,
                ),
                DeleteOutcome::Cancelled { email } => emit(
                    &Message::new(
                        "Deletion cancelled",
                        json!({ "id": id, "email": email, "deleted": false }),
                    ),
                    ctx.format,
                ),
            }
        }
        AliasesCommands::Info { id } => {
            let alias = client.get_alias(id).await?;
            emit(&AliasDetail(&alias), ctx.format)
        }
    }
}
