use std::fmt;
use thiserror::Error;

/// The layer a failed request was rejected at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Network, DNS, TLS or timeout failure; no HTTP response was obtained.
    Transport,
    /// Non-200 response without a structured `{code, msg}` body.
    HttpServer,
    /// Structured rejection from the exchange's application logic.
    ExchangeBusiness,
}

impl ErrorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Transport => "Transport",
            Self::HttpServer => "HttpServer",
            Self::ExchangeBusiness => "ExchangeBusiness",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flat view of a classified failure: exactly one kind per failed call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    pub kind: ErrorKind,
    pub code: i32,
    pub message: String,
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} error {}: {}", self.kind, self.code, self.message)
    }
}

#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("Transport error {code}: {message}")]
    Transport { code: i32, message: String },

    #[error("HTTP server error {code}: {message}")]
    HttpServer { code: i32, message: String },

    #[error("Exchange error {code}: {message}")]
    ExchangeBusiness { code: i32, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Authentication required: no API credentials configured")]
    AuthenticationRequired,

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Configuration error: {0}")]
    Config(#[from] crate::core::config::ConfigError),

    #[error("Type error: {0}")]
    Types(#[from] crate::core::types::TypesError),
}

impl ExchangeError {
    /// Classified kind, or `None` for failures raised locally.
    pub const fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Transport { .. } => Some(ErrorKind::Transport),
            Self::HttpServer { .. } => Some(ErrorKind::HttpServer),
            Self::ExchangeBusiness { .. } => Some(ErrorKind::ExchangeBusiness),
            _ => None,
        }
    }

    pub fn record(&self) -> Option<ErrorRecord> {
        match self {
            Self::Transport { code, message }
            | Self::HttpServer { code, message }
            | Self::ExchangeBusiness { code, message } => Some(ErrorRecord {
                kind: self.kind()?,
                code: *code,
                message: message.clone(),
            }),
            _ => None,
        }
    }

    /// Advisory hint for callers that run their own retry policy.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { .. } => true,
            Self::HttpServer { code, .. } => (500..600).contains(code),
            _ => false,
        }
    }
}

impl From<ErrorRecord> for ExchangeError {
    fn from(record: ErrorRecord) -> Self {
        let ErrorRecord {
            kind,
            code,
            message,
        } = record;
        match kind {
            ErrorKind::Transport => Self::Transport { code, message },
            ErrorKind::HttpServer => Self::HttpServer { code, message },
            ErrorKind::ExchangeBusiness => Self::ExchangeBusiness { code, message },
        }
    }
}
