//! LLM provider trait for text completion

use async_trait::async_trait;

use crate::error::Result;

/// Trait for the language-generation capability.
///
/// One call is one round trip: the prompt carries the context block, the
/// transcript, the query, and the formatting instructions, and the raw
/// completion comes back for contract validation by the caller.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Complete a prompt and return the raw model output
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Check if the provider is healthy and available
    async fn health_check(&self) -> Result<bool>;

    /// Get provider name for logging
    fn name(&self) -> &str;

    /// Get the model being used
    fn model(&self) -> &str;
}
