// simplelogin-cli/src/output.rs
use serde::Serialize;
use simplelogin_client::{ApiError, AuthError, Error};
use std::fmt;
use std::io::IsTerminal;

/// Output format option
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Auto-detect based on TTY
    Auto,
    /// Force JSON output
    Json,
    /// Force human-readable output
    Human,
}

impl OutputFormat {
    /// Collapse `Auto` into a concrete format
    pub fn resolve(self) -> Self {
        match self {
            Self::Auto if std::io::stdout().is_terminal() => Self::Human,
            Self::Auto => Self::Json,
            other => other,
        }
    }
}

/// Trait for types that can be formatted for output
pub trait Formattable {
    /// Format as JSON string
    fn to_json(&self) -> serde_json::Result<String>;

    /// Format as human-readable string
    fn to_human(&self) -> String;
}

/// Format output based on the specified format
pub fn format_output<T: Formattable>(data: &T, format: OutputFormat) -> serde_json::Result<String> {
    match format.resolve() {
        OutputFormat::Json => data.to_json(),
        _ => Ok(data.to_human()),
    }
}

/// Standard JSON response envelope
#[derive(Debug, Serialize)]
pub struct Response<T> {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    meta: Option<Meta>,
}

impl<T> Response<T> {
    pub fn ok(result: T) -> Self {
        Self {
            ok: true,
            result: Some(result),
            error: None,
            meta: None,
        }
    }

    pub fn ok_with_meta(result: T, meta: Meta) -> Self {
        Self {
            ok: true,
            result: Some(result),
            error: None,
            meta: Some(meta),
        }
    }

    /// Result gathered before `error` interrupted the command
    pub fn partial(result: T, error: ErrorResponse, meta: Meta) -> Self {
        Self {
            ok: false,
            result: Some(result),
            error: Some(error),
            meta: Some(meta),
        }
    }

    pub fn error(error: ErrorResponse) -> Response<()> {
        Response::<()> {
            ok: false,
            result: None,
            error: Some(error),
            meta: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    type_: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    retryable: Option<bool>,
}

impl ErrorResponse {
    pub fn new(type_: &'static str, message: String) -> Self {
        Self {
            type_,
            message,
            status: None,
            retryable: Some(false),
        }
    }

    pub fn from_api(err: &ApiError) -> Self {
        let type_ = match err {
            ApiError::NotAuthenticated => "not_authenticated",
            ApiError::InvalidArgument(_) => "invalid_argument",
            ApiError::Remote { .. } => "remote_rejected",
            ApiError::Transport(_) => "transport",
            ApiError::Decode(_) => "unexpected_response",
        };
        let retryable = match err {
            ApiError::Transport(_) => true,
            ApiError::Remote { status, .. } => *status >= 500,
            _ => false,
        };
        Self {
            type_,
            message: err.to_string(),
            status: err.status(),
            retryable: Some(retryable),
        }
    }

    /// Classify an error bubbling out of a command
    pub fn from_error(err: &anyhow::Error) -> Self {
        if let Some(err) = err.downcast_ref::<Error>() {
            return match err {
                Error::Api(api) => Self::from_api(api),
                Error::Credential(_) => Self::new("credential_store", err.to_string()),
                Error::Prompt(_) => Self::new("prompt", err.to_string()),
                Error::CreationDisabled => Self::new("creation_disabled", err.to_string()),
                Error::InvalidSelection(_) => Self::new("invalid_selection", err.to_string()),
                Error::NotFound(_) => Self::new("not_found", err.to_string()),
            };
        }
        if let Some(api) = err.downcast_ref::<ApiError>() {
            return Self::from_api(api);
        }
        if let Some(auth) = err.downcast_ref::<AuthError>() {
            let mut resp = Self::new("auth_failed", auth.to_string());
            if let AuthError::RequestFailed { status, .. } | AuthError::MfaFailed { status, .. } = auth {
                resp.status = *status;
            }
            return resp;
        }
        Self::new("error", format!("{:#}", err))
    }
}

#[derive(Debug, Serialize, Default)]
pub struct Meta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

/// Process exit codes
#[derive(Debug, Clone, Copy)]
pub enum ExitCode {
    Success = 0,
    Failure = 1,
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Failure => write!(f, "failure"),
        }
    }
}

impl ExitCode {
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code.code())
    }
}

// Print response to stdout
pub fn print_response<T: Serialize>(resp: &Response<T>) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string(resp)?);
    Ok(())
}

/// Print `data` in the requested format
pub fn emit<T: Formattable>(data: &T, format: OutputFormat) -> anyhow::Result<()> {
    println!("{}", format_output(data, format)?);
    Ok(())
}

/// Report a command failure on stderr, or as a JSON envelope on stdout
pub fn report_error(err: &anyhow::Error, format: OutputFormat) {
    match format.resolve() {
        OutputFormat::Json => {
            let resp = Response::<()>::error(ErrorResponse::from_error(err));
            if let Ok(line) = serde_json::to_string(&resp) {
                println!("{}", line);
            }
        }
        _ => print_error(&format!("{:#}", err)),
    }
}

/// Print a styled error message
pub fn print_error(message: &str) {
    let term = console::Term::stderr();
    let _ = term.write_str(&format!("{} {}\n", console::style("Error:").red(), message));
}

/// Print a styled warning message
pub fn print_warning(message: &str) {
    let term = console::Term::stderr();
    let _ = term.write_str(&format!("{} {}\n", console::style("Warning:").yellow(), message));
}

/// Print a styled info/header
pub fn print_header(key: &str, value: &str) {
    let term = console::Term::stdout();
    let _ = term.write_str(&format!("{}: {}\n", console::style(key).bold(), value));
}
