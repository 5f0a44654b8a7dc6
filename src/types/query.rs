//! Inbound chat request types

use serde::{Deserialize, Serialize};

/// Chat request accepted by the HTTP layer.
///
/// `session_id` is an opaque caller-supplied identifier; an unknown id
/// lazily creates an empty session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The user's query
    pub query: String,
    /// Opaque session identifier
    pub session_id: String,
    /// Override the configured number of passages to retrieve (optional)
    #[serde(default)]
    pub top_k: Option<usize>,
}

impl ChatRequest {
    /// Create a new chat request
    pub fn new(query: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            session_id: session_id.into(),
            top_k: None,
        }
    }
}
