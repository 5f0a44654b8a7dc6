//! Core data types for the RAG chat system

pub mod passage;
pub mod query;
pub mod response;
pub mod turn;

pub use passage::Passage;
pub use query::ChatRequest;
pub use response::{QueryCategory, QueryResult};
pub use turn::{Role, Turn};
