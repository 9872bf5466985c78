// Execution request and result types.
// Defines the wire body sent to the execution service and the classified outcome.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::language::LanguageId;
use crate::state::SessionState;
use crate::state::session::ERROR_PREFIX;

/// Immutable snapshot of what gets sent for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionRequest {
    pub code: String,
    pub language: LanguageId,
    pub input: String,
}

impl ExecutionRequest {
    /// Build a request for `language`.
    ///
    /// A single `\n` is always appended to `stdin`, even when it already ends
    /// in one; the execution service has always received input this way.
    pub fn new(code: impl Into<String>, language: LanguageId, stdin: &str) -> Self {
        Self {
            code: code.into(),
            language,
            input: format!("{stdin}\n"),
        }
    }

    /// Snapshot the active buffer and stdin of a session.
    pub fn from_session(session: &SessionState) -> Self {
        Self::new(
            session.active_code(),
            session.active_language(),
            session.stdin(),
        )
    }
}

/// Classified outcome of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionResult {
    Success { output: String },
    Failure { message: String },
}

impl ExecutionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ExecutionResult::Success { .. })
    }

    /// Text for the output channel. Failures carry the error prefix.
    pub fn into_output_text(self) -> String {
        match self {
            ExecutionResult::Success { output } => output,
            ExecutionResult::Failure { message } => format!("{ERROR_PREFIX}{message}"),
        }
    }
}

impl From<Result<String>> for ExecutionResult {
    fn from(result: Result<String>) -> Self {
        match result {
            Ok(output) => ExecutionResult::Success { output },
            Err(e) => ExecutionResult::Failure {
                message: e.to_string(),
            },
        }
    }
}

/// Body of a 2xx reply.
#[derive(Debug, Deserialize)]
pub(crate) struct SuccessReply {
    pub output: String,
}

/// Body of a non-2xx reply.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorReply {
    pub error: String,
}
