//! Passage retrieval over the similarity-search capability

pub mod retriever;

pub use retriever::Retriever;
