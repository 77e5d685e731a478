// simplelogin-cli/src/commands/domains.rs
use super::Context;
use crate::output::emit;
use crate::render::{DomainDetail, DomainList, Message, TrashList};
use anyhow::Result;
use serde_json::json;
use simplelogin_client::{DomainUpdate, UpdateOutcome};

#[derive(clap::Subcommand, Clone, Debug)]
pub enum DomainsCommands {
    /// List custom domains
    List,
    /// Show details of a custom domain
    Info {
        /// Domain ID
        id: u64,
    },
    /// Change settings of a custom domain
    Update {
        /// Domain ID
        id: u64,
        /// Accept mail for any address on the domain
        #[arg(long)]
        catch_all: Option<bool>,
        /// Allow random prefix generation on the domain
        #[arg(long)]
        random_prefix: Option<bool>,
        /// Display name used for aliases on the domain
        #[arg(long)]
        name: Option<String>,
        /// Mailbox IDs (comma-separated) catch-all mail goes to
        #[arg(long)]
        mailboxes: Option<String>,
    },
    /// List aliases deleted from a custom domain
    Trash {
        /// Domain ID
        id: u64,
    },
}

pub async fn handle_domains(ctx: &Context, cmd: DomainsCommands) -> Result<()> {
    let client = ctx.client()?;

    match cmd {
        DomainsCommands::List => {
            let domains = client.list_domains().await?;
            emit(&DomainList(&domains), ctx.format)
        }
        DomainsCommands::Info { id } => {
            let domain = client.domain_info(id).await?;
            emit(&DomainDetail(&domain), ctx.format)
        }
        DomainsCommands::Update {
            id,
            catch_all,
            random_prefix,
            name,
            mailboxes,
        } => {
            let update = DomainUpdate {
                catch_all,
                random_prefix_generation: random_prefix,
                name,
                mailbox_ids: mailboxes,
            };
            match client.update_domain(id, update).await? {
                UpdateOutcome::NoChanges => emit(
                    &Message::new("No changes specified.", json!({ "id": id, "updated": false })),
                    ctx.format,
                ),
                UpdateOutcome::Updated(domain) => emit(&DomainDetail(&domain), ctx.format),
            }
        }
        DomainsCommands::Trash { id } => {
            let trash = client.domain_trash(id).await?;
            emit(&TrashList(&trash), ctx.format)
        }
    }
}
