// simplelogin-cli/src/commands/mailboxes.rs
use super::Context;
use crate::output::emit;
use crate::render::MailboxList;
use anyhow::Result;

#[derive(clap::Subcommand, Clone, Debug)]
pub enum MailboxesCommands {
    /// List mailboxes
    List,
}

pub async fn handle_mailboxes(ctx: &Context, cmd: MailboxesCommands) -> Result<()> {
    match cmd {
        MailboxesCommands::List => {
            let mailboxes = ctx.client()?.list_mailboxes().await?;
            emit(&MailboxList(&mailboxes), ctx.format)
        }
    }
}
