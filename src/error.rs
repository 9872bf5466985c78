// Error types for codenest.
// Covers execution service transport failures, config, export, and terminal IO.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodeNestError {
    #[error("execution service unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("execution service did not respond within {after:?}")]
    Timeout { after: std::time::Duration },

    #[error("malformed reply from execution service: {0}")]
    MalformedReply(String),

    /// Failure reported by the service itself; carries its message verbatim.
    #[error("{0}")]
    Service(String),

    #[error("unknown language: {0}")]
    UnknownLanguage(String),

    #[error("nothing to export: {language} buffer is empty")]
    EmptyBuffer { language: &'static str },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, CodeNestError>;
