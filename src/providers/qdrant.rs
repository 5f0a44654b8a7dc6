//! Qdrant-backed similarity search
//!
//! Composes the Ollama embeddings endpoint with the Qdrant REST search API
//! into the single `SearchProvider` capability the retriever consumes.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::config::SearchConfig;
use crate::error::{Error, Result};
use crate::types::Passage;

use super::ollama::OllamaClient;
use super::search::SearchProvider;

/// Similarity search over a Qdrant collection
pub struct QdrantSearch {
    client: Client,
    config: SearchConfig,
    embedder: Arc<OllamaClient>,
}

#[derive(Serialize)]
struct SearchRequest {
    vector: Vec<f32>,
    limit: usize,
    with_payload: bool,
}

#[derive(Deserialize)]
struct SearchResponse {
    result: Vec<ScoredPoint>,
}

#[derive(Deserialize)]
struct ScoredPoint {
    #[serde(default)]
    payload: HashMap<String, serde_json::Value>,
}

impl QdrantSearch {
    /// Create a new Qdrant search provider
    pub fn new(config: &SearchConfig, embedder: Arc<OllamaClient>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config: config.clone(),
            embedder,
        })
    }

    /// Convert a scored point's payload into a passage.
    ///
    /// The chunk text lives under `page_content` (or `text` as a fallback);
    /// everything else in the payload becomes source metadata.
    fn point_to_passage(point: ScoredPoint) -> Passage {
        let mut text = String::new();
        let mut source_metadata = HashMap::new();

        for (key, value) in point.payload {
            match key.as_str() {
                "page_content" | "text" if text.is_empty() => {
                    if let Some(s) = value.as_str() {
                        text = s.to_string();
                        continue;
                    }
                }
                _ => {}
            }

            let rendered = match value {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            source_metadata.insert(key, rendered);
        }

        Passage {
            text,
            source_metadata,
        }
    }
}

#[async_trait]
impl SearchProvider for QdrantSearch {
    async fn similarity_search(&self, query: &str, k: usize) -> Result<Vec<Passage>> {
        if k == 0 {
            return Ok(Vec::new());
        }

        let vector = self.embedder.embed(query).await?;

        let url = format!(
            "{}/collections/{}/points/search",
            self.config.qdrant_url, self.config.collection
        );

        let request = SearchRequest {
            vector,
            limit: k,
            with_payload: true,
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::retrieval_unavailable(format!("Qdrant unreachable: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::retrieval_unavailable(format!(
                "Qdrant search failed: HTTP {} - {}",
                status, body
            )));
        }

        let search_response: SearchResponse = response.json().await.map_err(|e| {
            Error::retrieval_unavailable(format!("Failed to parse Qdrant response: {}", e))
        })?;

        Ok(search_response
            .result
            .into_iter()
            .map(Self::point_to_passage)
            .collect())
    }

    async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/collections/{}", self.config.qdrant_url, self.config.collection);

        match self.client.get(&url).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    fn name(&self) -> &str {
        "qdrant"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_to_passage_extracts_text() {
        let mut payload = HashMap::new();
        payload.insert(
            "page_content".to_string(),
            serde_json::json!("The capital of France is Paris."),
        );
        payload.insert("source".to_string(), serde_json::json!("geography.pdf"));
        payload.insert("page".to_string(), serde_json::json!(3));

        let passage = QdrantSearch::point_to_passage(ScoredPoint { payload });

        assert_eq!(passage.text, "The capital of France is Paris.");
        assert_eq!(
            passage.source_metadata.get("source").map(String::as_str),
            Some("geography.pdf")
        );
        assert_eq!(
            passage.source_metadata.get("page").map(String::as_str),
            Some("3")
        );
        assert!(!passage.source_metadata.contains_key("page_content"));
    }

    #[test]
    fn test_point_to_passage_empty_payload() {
        let passage = QdrantSearch::point_to_passage(ScoredPoint {
            payload: HashMap::new(),
        });
        assert!(passage.text.is_empty());
        assert!(passage.source_metadata.is_empty());
    }
}
