// simplelogin-cli/src/commands/auth.rs
use super::Context;
use crate::output::{emit, print_header, print_warning, OutputFormat};
use crate::render::Message;
use crate::terminal::{ask_email, ask_password, TerminalPrompt};
use anyhow::{bail, Result};
use serde_json::json;
use simplelogin_client::{
    ApiClient, Authenticator, CredentialStore, ReqwestClient, SimpleLoginClient,
};

/// Log in with email and password, store the API key in the keyring
pub async fn login(ctx: &Context, email: Option<String>, device: String) -> Result<()> {
    let email = match email.or_else(|| ctx.settings.account_email.clone()) {
        Some(email) => email,
        None => ask_email()?,
    };
    let password = ask_password()?;

    if password.is_empty() {
        bail!("Password cannot be empty");
    }

    let http = ReqwestClient::with_timeout(ctx.settings.timeout)?;
    let api = ApiClient::new(http, ctx.settings.api_url.clone());
    let prompt = TerminalPrompt;
    let auth = Authenticator::new(&api, ctx.store(), &prompt);

    auth.authenticate(&email, &password, &device).await?;

    emit(
        &Message::new("Logged in successfully.", json!({ "email": email, "logged_in": true })),
        ctx.format,
    )?;

    if ctx.format.resolve() == OutputFormat::Human {
        print_header("Account", &email);
        if ctx.settings.account_email() != Some(email.as_str()) {
            print_warning(&format!(
                "Set SIMPLELOGIN_EMAIL={} so later commands use this account",
                email
            ));
        }
    }
    Ok(())
}

/// Invalidate the session and delete the stored key
pub async fn logout(ctx: &Context) -> Result<()> {
    let Some(email) = ctx.settings.account_email() else {
        bail!("SIMPLELOGIN_EMAIL must be set to know which account to log out");
    };

    let token = ctx.store().get(email)?;
    if token.is_none() {
        bail!("No API key stored for {}", email);
    }

    let client = SimpleLoginClient::from_settings(&ctx.settings, token)?;
    let prompt = TerminalPrompt;
    let auth = Authenticator::new(client.api(), ctx.store(), &prompt);
    auth.logout(email).await?;

    emit(
        &Message::new(
            format!("Logged out {}.", email),
            json!({ "email": email, "logged_out": true }),
        ),
        ctx.format,
    )
}
