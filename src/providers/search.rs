//! Similarity-search provider trait

use async_trait::async_trait;

use crate::error::Result;
use crate::types::Passage;

/// Trait for the black-box similarity-search capability.
///
/// Unavailability is signalled through the error channel
/// (`Error::RetrievalUnavailable`), never as an empty result: zero matches is
/// a valid `Ok(vec![])`.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Return the top-k most relevant passages for the query
    async fn similarity_search(&self, query: &str, k: usize) -> Result<Vec<Passage>>;

    /// Check if the provider is healthy
    async fn health_check(&self) -> Result<bool>;

    /// Get provider name for logging
    fn name(&self) -> &str;
}
