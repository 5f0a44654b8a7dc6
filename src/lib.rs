//! codi-rag: Retrieval-augmented document Q&A with query classification
//!
//! This crate implements a RAG chat backend: it retrieves relevant passages
//! from a similarity-search capability, asks an LLM to classify the query and
//! produce a grounded answer (optionally with a Graphviz diagram) under a
//! strict structured output contract, and maintains per-session conversation
//! history in a pluggable store.

pub mod config;
pub mod error;
pub mod generation;
pub mod history;
pub mod providers;
pub mod retrieval;
pub mod server;
pub mod types;

pub use config::RagConfig;
pub use error::{Error, Result};
pub use generation::ResponseGenerator;
pub use history::HistoryStore;
pub use retrieval::Retriever;
pub use types::{ChatRequest, Passage, QueryCategory, QueryResult, Role, Turn};
