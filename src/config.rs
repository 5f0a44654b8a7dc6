//! Configuration for the RAG chat system
//!
//! Constructed once at process start and passed into each component; there is
//! no global configuration singleton.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Main RAG chat configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RagConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// LLM configuration
    #[serde(default)]
    pub llm: LlmConfig,
    /// Similarity-search configuration
    #[serde(default)]
    pub search: SearchConfig,
    /// Session history configuration
    #[serde(default)]
    pub history: HistoryConfig,
    /// Response generation configuration
    #[serde(default)]
    pub generation: GenerationConfig,
}

impl RagConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Invalid config file: {}", e)))
    }

    /// Load from the file named by `CODI_RAG_CONFIG`, falling back to defaults
    pub fn load() -> Result<Self> {
        match std::env::var("CODI_RAG_CONFIG") {
            Ok(path) => Self::from_file(path),
            Err(_) => Ok(Self::default()),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Enable CORS
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            enable_cors: true,
        }
    }
}

/// LLM (Ollama) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Ollama base URL
    pub base_url: String,
    /// Generation model name
    pub generate_model: String,
    /// Embedding model name (used by the search capability for query embedding)
    pub embed_model: String,
    /// Temperature for generation
    pub temperature: f32,
    /// Request timeout in seconds; bounds one generation round trip
    pub timeout_secs: u64,
    /// Number of retries for failed requests
    pub max_retries: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            generate_model: "phi3".to_string(),
            embed_model: "nomic-embed-text".to_string(),
            temperature: 0.3,
            timeout_secs: 120,
            max_retries: 2,
        }
    }
}

/// Similarity-search (Qdrant) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Whether the search capability is configured at all.
    /// When false, document queries fail with a retrieval-unavailable error.
    pub enabled: bool,
    /// Qdrant base URL
    pub qdrant_url: String,
    /// Qdrant collection name
    pub collection: String,
    /// Default number of passages to retrieve
    pub top_k: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            qdrant_url: "http://localhost:6333".to_string(),
            collection: "rag_collection".to_string(),
            top_k: 10,
        }
    }
}

/// Session history backend selection.
///
/// Chosen by explicit configuration, never by runtime probing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryBackend {
    /// Process-local memory, lost on restart
    #[default]
    Memory,
    /// Embedded SQLite store, survives restart
    Sqlite,
}

/// Session history configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Backing store variant
    #[serde(default)]
    pub backend: HistoryBackend,
    /// Database path for the sqlite backend
    pub db_path: PathBuf,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        let db_path = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("codi-rag")
            .join("chat_history.db");

        Self {
            backend: HistoryBackend::Memory,
            db_path,
        }
    }
}

/// Where generated diagrams are allowed to appear.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagramMode {
    /// Graphviz DOT in the dedicated `diagram` field, never inside the answer
    #[default]
    SeparateField,
    /// Mermaid blocks embedded in the answer text; no `diagram` field
    Inline,
}

/// Response generation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Diagram placement rule
    #[serde(default)]
    pub diagram_mode: DiagramMode,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            diagram_mode: DiagramMode::SeparateField,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RagConfig::default();
        assert_eq!(config.search.top_k, 10);
        assert_eq!(config.history.backend, HistoryBackend::Memory);
        assert_eq!(config.generation.diagram_mode, DiagramMode::SeparateField);
        assert!(config.search.enabled);
    }

    #[test]
    fn test_partial_toml() {
        let config: RagConfig = toml::from_str(
            r#"
            [history]
            backend = "sqlite"
            db_path = "/tmp/history.db"

            [generation]
            diagram_mode = "inline"
            "#,
        )
        .unwrap();

        assert_eq!(config.history.backend, HistoryBackend::Sqlite);
        assert_eq!(config.generation.diagram_mode, DiagramMode::Inline);
        // Untouched sections keep their defaults
        assert_eq!(config.server.port, 8000);
    }
}
