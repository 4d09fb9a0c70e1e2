//! [`MessageGenerator`] backed by the Claude Code CLI.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::commit::prompt::PromptPair;
use crate::error::GenerationError;
use crate::llm::{MessageGenerator, RetryPolicy, retry_with_backoff};

use super::subprocess::{check_claude_installed, get_timeout, run_claude};

/// Generates commit messages by running `claude -p`.
#[derive(Debug, Clone)]
pub struct ClaudeGenerator {
    program: PathBuf,
    timeout: Duration,
    retry: RetryPolicy,
}

impl Default for ClaudeGenerator {
    fn default() -> Self {
        Self {
            program: PathBuf::from("claude"),
            timeout: get_timeout(),
            retry: RetryPolicy::default(),
        }
    }
}

impl ClaudeGenerator {
    /// Use `claude` from `PATH`, the configured timeout, and the default retry policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different executable.
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Bound each CLI call by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

#[async_trait]
impl MessageGenerator for ClaudeGenerator {
    async fn generate(&self, prompt: &PromptPair, model: &str) -> Result<String, GenerationError> {
        check_claude_installed(&self.program)?;

        debug!(
            "Requesting commit message from {} (user prompt {} chars)",
            model,
            prompt.user.len()
        );

        let program = self.program.as_path();
        let limit = self.timeout;

        retry_with_backoff(
            self.retry,
            move || async move {
                let stdout = run_claude(program, prompt, model, limit).await?;
                parse_claude_response(&stdout)
            },
            GenerationError::is_transient,
            |e| GenerationError::RetriesExhausted(Box::new(e)),
        )
        .await
    }
}

/// Claude CLI JSON envelope when using --output-format json
#[derive(Deserialize)]
struct ClaudeCliResponse {
    result: String,
    #[serde(default)]
    is_error: bool,
}

/// Pull the generated text out of the CLI's stdout.
///
/// Falls back to the raw stdout when it is not a JSON envelope.
fn parse_claude_response(response: &str) -> Result<String, GenerationError> {
    match serde_json::from_str::<ClaudeCliResponse>(response) {
        Ok(envelope) if envelope.is_error => Err(GenerationError::ExecutionFailed(envelope.result)),
        Ok(envelope) => Ok(envelope.result),
        Err(_) => Ok(response.to_string()),
    }
}
