// simplelogin-api/src/error.rs
use crate::http::HttpError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// No token was resolved; raised before any request is built
    #[error("not logged in: run `simplelogin login` or set SIMPLELOGIN_API_KEY")]
    NotAuthenticated,

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Non-2xx answer, body kept verbatim
    #[error("request failed with status {status}: {body}")]
    Remote { status: u16, body: String },

    #[error("request failed: {0}")]
    Transport(String),

    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<HttpError> for ApiError {
    fn from(err: HttpError) -> Self {
        match err.status {
            Some(status) => Self::Remote {
                status,
                body: err.message,
            },
            None => Self::Transport(err.message),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
