// Execution service HTTP client.
// Sends one POST /execute per run and folds every outcome into an ExecutionResult.

use std::time::Duration;

use reqwest::{
    Client, StatusCode,
    header::{HeaderMap, HeaderValue, USER_AGENT},
};
use tracing::{debug, info, warn};

use crate::error::{CodeNestError, Result};

use super::types::{ErrorReply, ExecutionRequest, ExecutionResult, SuccessReply};

const EXECUTE_PATH: &str = "/execute";

/// Client for the remote execution service.
pub struct ExecutionClient {
    client: Client,
    execute_url: String,
    timeout: Duration,
}

impl ExecutionClient {
    /// Create a client for the service at `service_url` (e.g. `http://localhost:3000`).
    pub fn new(service_url: &str, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("codenest"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(CodeNestError::Transport)?;

        Ok(Self {
            client,
            execute_url: format!("{}{}", service_url.trim_end_matches('/'), EXECUTE_PATH),
            timeout,
        })
    }

    pub fn execute_url(&self) -> &str {
        &self.execute_url
    }

    /// Send `request` once and classify the reply. Never fails; all errors
    /// come back as `ExecutionResult::Failure`.
    pub async fn run(&self, request: &ExecutionRequest) -> ExecutionResult {
        info!(
            language = %request.language,
            code_len = request.code.len(),
            "sending run request"
        );

        let result = self.send(request).await;
        match &result {
            Ok(output) => info!(output_len = output.len(), "run succeeded"),
            Err(e) => warn!(error = %e, "run failed"),
        }
        ExecutionResult::from(result)
    }

    async fn send(&self, request: &ExecutionRequest) -> Result<String> {
        let response = self
            .client
            .post(&self.execute_url)
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        debug!(%status, "execution service replied");

        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        classify_reply(status, &body)
    }

    fn transport_error(&self, error: reqwest::Error) -> CodeNestError {
        if error.is_timeout() {
            CodeNestError::Timeout {
                after: self.timeout,
            }
        } else {
            CodeNestError::Transport(error)
        }
    }
}

/// Map a status and body to the program output or the error to surface.
pub(crate) fn classify_reply(status: StatusCode, body: &str) -> Result<String> {
    if status.is_success() {
        let reply: SuccessReply = serde_json::from_str(body)
            .map_err(|e| CodeNestError::MalformedReply(e.to_string()))?;
        return Ok(reply.output);
    }

    match serde_json::from_str::<ErrorReply>(body) {
        Ok(reply) => Err(CodeNestError::Service(reply.error)),
        Err(_) => Err(CodeNestError::Other(format!("HTTP {}: {}", status, body))),
    }
}
