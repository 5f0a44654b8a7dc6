//! Per-session conversational history
//!
//! Two backing variants share one contract: an ephemeral in-memory store and
//! a durable SQLite store. The variant is chosen by explicit configuration at
//! startup.

pub mod memory;
pub mod sqlite;

use std::sync::Arc;

use crate::config::{HistoryBackend, HistoryConfig};
use crate::error::Result;
use crate::types::Turn;

pub use memory::InMemoryHistory;
pub use sqlite::SqliteHistory;

/// Trait for session history storage.
///
/// Contract shared by all variants:
/// - turns read back in stable insertion order;
/// - an unknown session id is empty history, never an error;
/// - appends to one session are serialized; distinct sessions never block
///   each other.
pub trait HistoryStore: Send + Sync {
    /// Read the session's turns in insertion order
    fn messages(&self, session_id: &str) -> Result<Vec<Turn>>;

    /// Append a user turn
    fn append_user(&self, session_id: &str, text: &str) -> Result<()>;

    /// Append an assistant turn
    fn append_assistant(&self, session_id: &str, text: &str) -> Result<()>;

    /// Remove every turn of the session
    fn clear(&self, session_id: &str) -> Result<()>;

    /// Get store name for logging
    fn name(&self) -> &str;
}

/// Open the history store selected by configuration
pub fn open(config: &HistoryConfig) -> Result<Arc<dyn HistoryStore>> {
    match config.backend {
        HistoryBackend::Memory => {
            tracing::info!("Using in-memory session history");
            Ok(Arc::new(InMemoryHistory::new()))
        }
        HistoryBackend::Sqlite => {
            tracing::info!("Using SQLite session history at {}", config.db_path.display());
            Ok(Arc::new(SqliteHistory::open(&config.db_path)?))
        }
    }
}
