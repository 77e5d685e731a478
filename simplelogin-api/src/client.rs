// simplelogin-api/src/client.rs
use crate::error::ApiError;
use crate::http::{HttpClient, HttpRequest, Method};
use crate::types::{
    Alias, AliasMode, AliasOptions, Domain, DomainPatch, LoginResponse, Mailbox, MfaResponse,
    NewCustomAlias, TrashedAlias, UserSettings, UserStats,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::debug;

pub const DEFAULT_API_URL: &str = "https://app.simplelogin.io";

/// SimpleLogin reads the API key from this header, not `Authorization`
const AUTH_HEADER: &str = "Authentication";

pub struct ApiClient<C: HttpClient> {
    http: C,
    base_url: String,
    token: Option<String>,
}

impl<C: HttpClient> ApiClient<C> {
    pub fn new(http: C, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Build an authenticated request; fails before touching the network
    /// when no token is set
    pub(crate) fn request(&self, method: Method, path: &str) -> Result<HttpRequest, ApiError> {
        let token = self.token.as_deref().ok_or(ApiError::NotAuthenticated)?;
        Ok(self.anonymous(method, path).header(AUTH_HEADER, token))
    }

    fn anonymous(&self, method: Method, path: &str) -> HttpRequest {
        HttpRequest::new(method, format!("{}{}", self.base_url, path))
    }

    /// Send a request and parse the JSON answer
    pub(crate) async fn call(&self, request: HttpRequest) -> Result<Value, ApiError> {
        debug!(method = request.method.as_str(), url = %request.url, "sending request");

        let bytes = self.http.send(request).await?;

        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn call_as<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<T, ApiError> {
        let value = self.call(request).await?;
        Ok(serde_json::from_value(value)?)
    }

    // Authentication

    pub async fn login(
        &self,
        email: &str,
        password: &str,
        device: &str,
    ) -> Result<LoginResponse, ApiError> {
        let body = json!({
            "email": email,
            "password": password,
            "device": device,
        });
        let req = self
            .anonymous(Method::Post, "/api/auth/login")
            .json_body(serde_json::to_vec(&body)?);
        self.call_as(req).await
    }

    pub async fn mfa(
        &self,
        mfa_token: &str,
        mfa_key: &str,
        device: &str,
    ) -> Result<MfaResponse, ApiError> {
        let body = json!({
            "mfa_token": mfa_token,
            "mfa_key": mfa_key,
            "device": device,
        });
        let req = self
            .anonymous(Method::Post, "/api/auth/mfa")
            .json_body(serde_json::to_vec(&body)?);
        self.call_as(req).await
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        let req = self.request(Method::Get, "/api/logout")?;
        self.call(req).await?;
        Ok(())
    }

    // Account

    pub async fn user_settings(&self) -> Result<UserSettings, ApiError> {
        let req = self.request(Method::Get, "/api/setting")?;
        self.call_as(req).await
    }

    pub async fn user_stats(&self) -> Result<UserStats, ApiError> {
        let req = self.request(Method::Get, "/api/stats")?;
        self.call_as(req).await
    }

    // Aliases

    pub async fn get_alias(&self, id: u64) -> Result<Alias, ApiError> {
        let req = self.request(Method::Get, &format!("/api/aliases/{}", id))?;
        self.call_as(req).await
    }

    /// Returns the `enabled` state reported by the server
    pub async fn toggle_alias(&self, id: u64) -> Result<Option<bool>, ApiError> {
        let req = self.request(Method::Post, &format!("/api/aliases/{}/toggle", id))?;
        let resp = self.call(req).await?;
        Ok(resp.get("enabled").and_then(Value::as_bool))
    }

    pub async fn delete_alias(&self, id: u64) -> Result<(), ApiError> {
        let req = self.request(Method::Delete, &format!("/api/aliases/{}", id))?;
        self.call(req).await?;
        Ok(())
    }

    pub async fn alias_options(&self) -> Result<AliasOptions, ApiError> {
        let req = self.request(Method::Get, "/api/v5/alias/options")?;
        self.call_as(req).await
    }

    pub async fn create_custom_alias(&self, alias: &NewCustomAlias) -> Result<Alias, ApiError> {
        let req = self
            .request(Method::Post, "/api/v3/alias/custom/new")?
            .json_body(serde_json::to_vec(alias)?);
        self.call_as(req).await
    }

    pub async fn create_random_alias(
        &self,
        mode: Option<AliasMode>,
        note: Option<&str>,
    ) -> Result<Alias, ApiError> {
        let mut req = self.request(Method::Post, "/api/alias/random/new")?;
        if let Some(mode) = mode {
            req = req.query("mode", mode.as_str());
        }

        let body = match note {
            Some(note) => json!({ "note": note }),
            None => json!({}),
        };
        let req = req.json_body(serde_json::to_vec(&body)?);
        self.call_as(req).await
    }

    // Custom domains

    pub async fn custom_domains(&self) -> Result<Vec<Domain>, ApiError> {
        let req = self.request(Method::Get, "/api/custom_domains")?;
        let resp = self.call(req).await?;
        take_field(resp, "custom_domains")
    }

    pub async fn update_custom_domain(
        &self,
        id: u64,
        patch: &DomainPatch,
    ) -> Result<Domain, ApiError> {
        let req = self
            .request(Method::Patch, &format!("/api/custom_domains/{}", id))?
            .json_body(serde_json::to_vec(patch)?);
        let resp = self.call(req).await?;
        take_field(resp, "custom_domain")
    }

    pub async fn custom_domain_trash(&self, id: u64) -> Result<Vec<TrashedAlias>, ApiError> {
        let req = self.request(Method::Get, &format!("/api/custom_domains/{}/trash", id))?;
        let resp = self.call(req).await?;
        take_field(resp, "aliases")
    }

    // Mailboxes

    pub async fn mailboxes(&self) -> Result<Vec<Mailbox>, ApiError> {
        let req = self.request(Method::Get, "/api/v2/mailboxes")?;
        let resp = self.call(req).await?;
        take_field(resp, "mailboxes")
    }
}

/// Deserialize `value[key]`
pub(crate) fn take_field<T: DeserializeOwned>(mut value: Value, key: &str) -> Result<T, ApiError> {
    let field = value
        .get_mut(key)
        .map(Value::take)
        .ok_or_else(|| ApiError::Decode(format!("missing '{}' in response", key)))?;
    Ok(serde_json::from_value(field)?)
}
