// simplelogin-client/src/error.rs
use crate::credentials::CredentialError;
use simplelogin_api::ApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error("prompt failed: {0}")]
    Prompt(#[from] std::io::Error),

    #[error("alias creation is disabled for this account")]
    CreationDisabled,

    #[error("invalid selection: {0}")]
    InvalidSelection(String),

    #[error("{0} not found")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("login failed ({}): {body}", describe_status(.status))]
    RequestFailed { status: Option<u16>, body: String },

    #[error("MFA verification failed ({}): {body}", describe_status(.status))]
    MfaFailed { status: Option<u16>, body: String },

    #[error("server did not return an API key")]
    NoToken,

    #[error("prompt failed: {0}")]
    Prompt(#[from] std::io::Error),

    #[error(transparent)]
    Credential(#[from] CredentialError),
}

impl AuthError {
    pub(crate) fn request_failed(err: ApiError) -> Self {
        let (status, body) = split(err);
        Self::RequestFailed { status, body }
    }

    pub(crate) fn mfa_failed(err: ApiError) -> Self {
        let (status, body) = split(err);
        Self::MfaFailed { status, body }
    }
}

fn split(err: ApiError) -> (Option<u16>, String) {
    match err {
        ApiError::Remote { status, body } => (Some(status), body),
        other => (None, other.to_string()),
    }
}

fn describe_status(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!("status {}", code),
        None => "no response".to_string(),
    }
}
