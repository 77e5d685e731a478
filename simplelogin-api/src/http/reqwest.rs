// simplelogin-api/src/http/reqwest.rs
use super::{HttpClient, HttpError, HttpRequest, Method};
use async_trait::async_trait;
use std::time::Duration;

#[cfg(feature = "reqwest")]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

#[cfg(feature = "reqwest")]
impl ReqwestClient {
    pub fn new() -> Self {
        Self {
            inner: reqwest::Client::new(),
        }
    }

    /// Client whose requests fail once `timeout` elapses
    pub fn with_timeout(timeout: Duration) -> Result<Self, HttpError> {
        let inner = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("simplelogin-cli/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| HttpError {
                status: None,
                message: e.to_string(),
            })?;
        Ok(Self { inner })
    }
}

#[cfg(feature = "reqwest")]
impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "reqwest")]
#[async_trait]
impl HttpClient for ReqwestClient {
    async fn send(&self, request: HttpRequest) -> Result<Vec<u8>, HttpError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut req = self.inner.request(method, &request.url);

        if !request.query.is_empty() {
            req = req.query(&request.query);
        }

        for (key, value) in &request.headers {
            req = req.header(key.as_str(), value.as_str());
        }

        if let Some(body) = request.body {
            req = req.header("content-type", "application/json").body(body);
        }

        let resp = req.send().await.map_err(|e| HttpError {
            status: None,
            message: e.to_string(),
        })?;

        let status = resp.status();
        let is_success = status.is_success();
        let status_code = status.as_u16();

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| HttpError {
                status: Some(status_code),
                message: e.to_string(),
            })?
            .to_vec();

        if !is_success {
            return Err(HttpError {
                status: Some(status_code),
                message: String::from_utf8_lossy(&bytes).to_string(),
            });
        }

        Ok(bytes)
    }
}
