//! The capability the commit session needs from a text generation provider.

use async_trait::async_trait;

use crate::commit::prompt::PromptPair;
use crate::error::GenerationError;

/// Turns a system + user prompt pair into generated text.
///
/// Authentication, retries and timeouts are the implementor's concern; the
/// caller sees a single success or a single failure.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageGenerator: Send + Sync {
    /// Generate text for `prompt` using the given model identifier.
    async fn generate(&self, prompt: &PromptPair, model: &str) -> Result<String, GenerationError>;
}
