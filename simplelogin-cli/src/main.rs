mod commands;
mod logging;
mod output;
mod render;
mod terminal;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{
    handle_aliases, handle_config, handle_domains, handle_mailboxes, AliasesCommands,
    ConfigCommands, Context, DomainsCommands, MailboxesCommands,
};
use output::{report_error, ExitCode, OutputFormat};
use simplelogin_client::{Settings, DEFAULT_DEVICE};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "simplelogin")]
#[command(about = "A command-line interface for SimpleLogin email aliases", long_about = None)]
#[command(version)]
struct Cli {
    /// Output format
    #[arg(long, short = 'o', value_enum, default_value = "auto", global = true)]
    output: OutputFormat,
    /// Request timeout in seconds [env: SIMPLELOGIN_TIMEOUT]
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Log in with email and password and store the API key in the keyring
    Login {
        /// Account email [env: SIMPLELOGIN_EMAIL]
        #[arg(long)]
        email: Option<String>,
        /// Device name shown in the account's API key list
        #[arg(long, default_value = DEFAULT_DEVICE)]
        device: String,
    },
    /// Log out and delete the stored API key
    Logout,
    /// Show account statistics
    Stats,
    /// Show account settings
    Settings,
    /// Alias management
    #[command(subcommand)]
    Aliases(AliasesCommands),
    /// Custom domain management
    #[command(subcommand)]
    Domains(DomainsCommands),
    /// Mailbox management
    #[command(subcommand)]
    Mailboxes(MailboxesCommands),
    /// Configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let format = cli.output;
    match run(cli).await {
        Ok(()) => ExitCode::Success.into(),
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            report_error(&err, format);
            ExitCode::Failure.into()
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut settings = Settings::from_env()?;
    if let Some(secs) = cli.timeout {
        settings.timeout = Duration::from_secs(secs);
    }
    let ctx = Context::new(settings, cli.output);

    match cli.command {
        Commands::Login { email, device } => commands::auth::login(&ctx, email, device).await,
        Commands::Logout => commands::auth::logout(&ctx).await,
        Commands::Stats => commands::account::stats(&ctx).await,
        Commands::Settings => commands::account::settings(&ctx).await,
        Commands::Aliases(cmd) => handle_aliases(&ctx, cmd).await,
        Commands::Domains(cmd) => handle_domains(&ctx, cmd).await,
        Commands::Mailboxes(cmd) => handle_mailboxes(&ctx, cmd).await,
        Commands::Config(cmd) => handle_config(&ctx, cmd).await,
    }
}
