//! Provider abstractions for the language-generation and similarity-search
//! capabilities
//!
//! Trait-based seams so the core can be exercised against stub capabilities
//! in tests and swapped between vendors at startup.

pub mod llm;
pub mod ollama;
pub mod qdrant;
pub mod search;

pub use llm::LlmProvider;
pub use ollama::OllamaClient;
pub use qdrant::QdrantSearch;
pub use search::SearchProvider;
