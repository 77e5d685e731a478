// simplelogin-cli/src/commands/account.rs
use super::Context;
use crate::output::emit;
use crate::render::{SettingsView, StatsView};
use anyhow::Result;

pub async fn stats(ctx: &Context) -> Result<()> {
    let stats = ctx.client()?.user_stats().await?;
    emit(&StatsView(&stats), ctx.format)
}

pub async fn settings(ctx: &Context) -> Result<()> {
    let settings = ctx.client()?.user_settings().await?;
    emit(&SettingsView(&settings), ctx.format)
}
