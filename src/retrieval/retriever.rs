//! Document retriever

use crate::config::SearchConfig;
use crate::error::Result;
use crate::providers::SearchProvider;
use crate::types::Passage;

/// Retrieves the top-k passages for a query from an injected search
/// capability.
///
/// Ranking is delegated entirely to the capability; the retriever holds no
/// state beyond its configured default k. Empty or whitespace-only queries
/// pass through untouched so the component stays a pure function over its
/// inputs.
#[derive(Debug, Clone)]
pub struct Retriever {
    top_k: usize,
}

impl Retriever {
    /// Create a retriever with the configured default top-k
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            top_k: config.top_k,
        }
    }

    /// Retrieve passages for the query.
    ///
    /// `k` overrides the configured default when given. Unavailability of the
    /// capability propagates; it is never swallowed into an empty result.
    pub async fn retrieve(
        &self,
        search: &dyn SearchProvider,
        query: &str,
        k: Option<usize>,
    ) -> Result<Vec<Passage>> {
        let k = k.unwrap_or(self.top_k);
        search.similarity_search(query, k).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use async_trait::async_trait;
    use parking_lot::Mutex;

    /// Deterministic stub capability that records the calls it receives
    struct StubSearch {
        passages: Vec<Passage>,
        calls: Mutex<Vec<(String, usize)>>,
        available: bool,
    }

    impl StubSearch {
        fn with_passages(passages: Vec<Passage>) -> Self {
            Self {
                passages,
                calls: Mutex::new(Vec::new()),
                available: true,
            }
        }

        fn unavailable() -> Self {
            Self {
                passages: Vec::new(),
                calls: Mutex::new(Vec::new()),
                available: false,
            }
        }
    }

    #[async_trait]
    impl SearchProvider for StubSearch {
        async fn similarity_search(&self, query: &str, k: usize) -> Result<Vec<Passage>> {
            if !self.available {
                return Err(Error::retrieval_unavailable("stub not configured"));
            }
            self.calls.lock().push((query.to_string(), k));
            Ok(self.passages.iter().take(k).cloned().collect())
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(self.available)
        }

        fn name(&self) -> &str {
            "stub"
        }
    }

    fn config_with_top_k(top_k: usize) -> SearchConfig {
        SearchConfig {
            top_k,
            ..SearchConfig::default()
        }
    }

    #[tokio::test]
    async fn test_default_k_from_config() {
        let search = StubSearch::with_passages(vec![Passage::new("a"), Passage::new("b")]);
        let retriever = Retriever::new(&config_with_top_k(10));

        retriever.retrieve(&search, "query", None).await.unwrap();

        assert_eq!(search.calls.lock()[0], ("query".to_string(), 10));
    }

    #[tokio::test]
    async fn test_explicit_k_overrides_default() {
        let search = StubSearch::with_passages(vec![Passage::new("a"), Passage::new("b")]);
        let retriever = Retriever::new(&config_with_top_k(10));

        let passages = retriever.retrieve(&search, "query", Some(1)).await.unwrap();

        assert_eq!(passages.len(), 1);
        assert_eq!(search.calls.lock()[0].1, 1);
    }

    #[tokio::test]
    async fn test_retrieval_is_idempotent() {
        let search = StubSearch::with_passages(vec![
            Passage::new("alpha"),
            Passage::new("beta"),
        ]);
        let retriever = Retriever::new(&config_with_top_k(5));

        let first = retriever.retrieve(&search, "same query", None).await.unwrap();
        let second = retriever.retrieve(&search, "same query", None).await.unwrap();

        let first_texts: Vec<_> = first.iter().map(|p| p.text.clone()).collect();
        let second_texts: Vec<_> = second.iter().map(|p| p.text.clone()).collect();
        assert_eq!(first_texts, second_texts);
    }

    #[tokio::test]
    async fn test_empty_query_passes_through() {
        let search = StubSearch::with_passages(vec![Passage::new("something")]);
        let retriever = Retriever::new(&config_with_top_k(5));

        let passages = retriever.retrieve(&search, "   ", None).await.unwrap();

        // Forwarded verbatim; whatever the capability yields comes back
        assert_eq!(search.calls.lock()[0].0, "   ");
        assert_eq!(passages.len(), 1);
    }

    #[tokio::test]
    async fn test_unavailable_capability_propagates() {
        let search = StubSearch::unavailable();
        let retriever = Retriever::new(&config_with_top_k(5));

        let err = retriever.retrieve(&search, "query", None).await.unwrap_err();
        assert!(matches!(err, Error::RetrievalUnavailable(_)));
    }
}
