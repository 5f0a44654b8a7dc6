//! Response generation: the retrieval-augmented chat core
//!
//! Composes retrieved passages, the session transcript, and the new query
//! into a single LLM round trip, validates the structured result, and updates
//! the session history.

pub mod contract;
pub mod prompt;

use std::sync::Arc;
use std::time::Duration;

use crate::config::{DiagramMode, GenerationConfig, LlmConfig};
use crate::error::{Error, Result};
use crate::history::HistoryStore;
use crate::providers::LlmProvider;
use crate::types::{Passage, QueryResult};

pub use contract::OutputContract;
pub use prompt::PromptBuilder;

/// Generates classified, grounded answers for a session.
///
/// Classification and answer generation happen in the same model call (one
/// round trip), trading a theoretical accuracy gain from two focused calls
/// for lower latency.
pub struct ResponseGenerator {
    llm: Arc<dyn LlmProvider>,
    history: Arc<dyn HistoryStore>,
    diagram_mode: DiagramMode,
    timeout: Duration,
}

impl ResponseGenerator {
    /// Create a generator over the given capabilities
    pub fn new(
        llm: Arc<dyn LlmProvider>,
        history: Arc<dyn HistoryStore>,
        llm_config: &LlmConfig,
        generation: &GenerationConfig,
    ) -> Self {
        Self {
            llm,
            history,
            diagram_mode: generation.diagram_mode,
            timeout: Duration::from_secs(llm_config.timeout_secs),
        }
    }

    /// Produce a validated `QueryResult` for the query and evolve the
    /// session's history.
    ///
    /// The transcript is read as a snapshot before generation; the turn being
    /// answered is appended only after a successful, validated result, so
    /// generation failures and contract violations leave the session
    /// untouched. History appends are best-effort: a failed write is logged
    /// and never hides a produced answer.
    pub async fn generate(
        &self,
        passages: &[Passage],
        query: &str,
        session_id: &str,
    ) -> Result<QueryResult> {
        let context = PromptBuilder::build_context(passages);

        // Snapshot of prior turns; a read failure degrades to an empty
        // transcript rather than failing the request.
        let turns = match self.history.messages(session_id) {
            Ok(turns) => turns,
            Err(e) => {
                tracing::warn!("History read failed for session {}: {}", session_id, e);
                Vec::new()
            }
        };
        let transcript = PromptBuilder::build_transcript(&turns);

        let prompt =
            PromptBuilder::build_chat_prompt(&context, &transcript, query, self.diagram_mode);

        tracing::debug!(
            "Generating for session {} ({} passages, {} prior turns)",
            session_id,
            passages.len(),
            turns.len()
        );

        // The per-session lock is not held across this await; only the
        // append below needs serialization.
        let raw = tokio::time::timeout(self.timeout, self.llm.complete(&prompt))
            .await
            .map_err(|_| Error::GenerationFailed {
                reason: format!("timeout after {}s", self.timeout.as_secs()),
            })??;

        let result = OutputContract::parse(&raw, self.diagram_mode)?;

        // Append the exchange: user turn first, then the assistant's answer
        // text only (no diagram, no category).
        if let Err(e) = self.history.append_user(session_id, query) {
            tracing::warn!("History write failed for session {}: {}", session_id, e);
        } else if let Err(e) = self.history.append_assistant(session_id, &result.answer) {
            tracing::warn!("History write failed for session {}: {}", session_id, e);
        }

        Ok(result)
    }
}
