//! Retrieved passage type

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A unit of retrieved document text with its source metadata.
///
/// Produced by the retriever for a single request; never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Passage {
    /// The passage text
    pub text: String,
    /// Source metadata (filename, page, etc.) as returned by the search capability
    #[serde(default)]
    pub source_metadata: HashMap<String, String>,
}

impl Passage {
    /// Create a passage with no metadata
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source_metadata: HashMap::new(),
        }
    }

    /// Attach a metadata entry
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.source_metadata.insert(key.into(), value.into());
        self
    }
}
