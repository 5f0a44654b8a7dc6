//! Application state for the chat server

use std::sync::Arc;

use crate::config::RagConfig;
use crate::error::{Error, Result};
use crate::generation::ResponseGenerator;
use crate::history::HistoryStore;
use crate::providers::{LlmProvider, OllamaClient, QdrantSearch, SearchProvider};
use crate::retrieval::Retriever;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: RagConfig,
    /// Similarity-search capability; `None` when not configured
    search: Option<Arc<dyn SearchProvider>>,
    /// Language-generation capability
    llm: Arc<dyn LlmProvider>,
    /// Session history store
    history: Arc<dyn HistoryStore>,
    /// Passage retriever
    retriever: Retriever,
    /// Response generator
    generator: ResponseGenerator,
}

impl AppState {
    /// Create new application state from configuration.
    ///
    /// All components receive the configuration by injection here; nothing
    /// reads settings from global state.
    pub fn new(config: RagConfig) -> Result<Self> {
        tracing::info!("Initializing chat application state...");

        let ollama = Arc::new(OllamaClient::new(&config.llm)?);
        tracing::info!(
            "Ollama client initialized (model: {})",
            config.llm.generate_model
        );

        let search: Option<Arc<dyn SearchProvider>> = if config.search.enabled {
            let qdrant = QdrantSearch::new(&config.search, Arc::clone(&ollama))?;
            tracing::info!(
                "Qdrant search initialized (collection: {})",
                config.search.collection
            );
            Some(Arc::new(qdrant))
        } else {
            tracing::warn!("Search capability disabled; document queries will fail");
            None
        };

        let history = crate::history::open(&config.history)?;

        let retriever = Retriever::new(&config.search);

        let llm: Arc<dyn LlmProvider> = ollama;
        let generator = ResponseGenerator::new(
            Arc::clone(&llm),
            Arc::clone(&history),
            &config.llm,
            &config.generation,
        );

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                search,
                llm,
                history,
                retriever,
                generator,
            }),
        })
    }

    /// Get configuration
    pub fn config(&self) -> &RagConfig {
        &self.inner.config
    }

    /// Get the search capability, failing when it is not configured.
    ///
    /// Checked before any model call so a missing capability surfaces as
    /// `RetrievalUnavailable`, distinct from zero results.
    pub fn search_provider(&self) -> Result<&Arc<dyn SearchProvider>> {
        self.inner
            .search
            .as_ref()
            .ok_or_else(|| Error::retrieval_unavailable("Search capability is not configured"))
    }

    /// Get the LLM provider
    pub fn llm_provider(&self) -> &Arc<dyn LlmProvider> {
        &self.inner.llm
    }

    /// Get the history store
    pub fn history(&self) -> &Arc<dyn HistoryStore> {
        &self.inner.history
    }

    /// Get the retriever
    pub fn retriever(&self) -> &Retriever {
        &self.inner.retriever
    }

    /// Get the response generator
    pub fn generator(&self) -> &ResponseGenerator {
        &self.inner.generator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_search_surfaces_retrieval_unavailable() {
        let mut config = RagConfig::default();
        config.search.enabled = false;

        let state = AppState::new(config).unwrap();

        // The chat path checks this before retrieving or calling the model
        let err = match state.search_provider() {
            Ok(_) => panic!("expected RetrievalUnavailable"),
            Err(e) => e,
        };
        assert!(matches!(err, Error::RetrievalUnavailable(_)));
    }

    #[test]
    fn test_enabled_search_is_available() {
        let state = AppState::new(RagConfig::default()).unwrap();
        assert!(state.search_provider().is_ok());
    }
}
