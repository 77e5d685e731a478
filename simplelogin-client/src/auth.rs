// simplelogin-client/src/auth.rs
use crate::credentials::CredentialStore;
use crate::error::{AuthError, Result};
use crate::prompt::Prompt;
use simplelogin_api::{ApiClient, HttpClient};
use tracing::{debug, info};

/// Device label sent with login requests
pub const DEFAULT_DEVICE: &str = "SL CLI";

/// Drives login and the optional MFA step, then files the API key
pub struct Authenticator<'a, C: HttpClient> {
    api: &'a ApiClient<C>,
    store: &'a dyn CredentialStore,
    prompt: &'a dyn Prompt,
}

impl<'a, C: HttpClient> Authenticator<'a, C> {
    pub fn new(
        api: &'a ApiClient<C>,
        store: &'a dyn CredentialStore,
        prompt: &'a dyn Prompt,
    ) -> Self {
        Self { api, store, prompt }
    }

    /// Log in and store the resulting token under `email`
    ///
    /// Nothing is written unless a token was obtained.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
        device: &str,
    ) -> std::result::Result<String, AuthError> {
        let login = self
            .api
            .login(email, password, device)
            .await
            .map_err(AuthError::request_failed)?;

        let token = if login.mfa_enabled {
            debug!(account = email, "MFA required");
            let mfa_key = login
                .mfa_key
                .filter(|k| !k.is_empty())
                .ok_or_else(|| AuthError::RequestFailed {
                    status: None,
                    body: "MFA is enabled but the server sent no mfa_key".to_string(),
                })?;
            let code = self.prompt.one_time_code()?;
            let resp = self
                .api
                .mfa(code.trim(), &mfa_key, device)
                .await
                .map_err(AuthError::mfa_failed)?;
            resp.api_key
        } else {
            login.api_key
        };

        let token = token.filter(|t| !t.is_empty()).ok_or(AuthError::NoToken)?;

        self.store.set(email, &token)?;
        info!(account = email, "logged in");
        Ok(token)
    }

    /// Invalidate the session server side, then forget the stored token
    pub async fn logout(&self, email: &str) -> Result<bool> {
        self.api.logout().await?;
        Ok(self.store.delete(email)?)
    }
}
