//! Session history endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::Result;
use crate::server::state::AppState;
use crate::types::{Role, Turn};

/// A turn as exposed to frontends.
///
/// `id` is a freshly generated display identifier, different on every read;
/// callers must not rely on its stability across requests.
#[derive(Debug, Serialize)]
pub struct HistoryMessage {
    pub id: Uuid,
    pub sender: &'static str,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl From<Turn> for HistoryMessage {
    fn from(turn: Turn) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender: match turn.role {
                Role::User => "user",
                Role::Assistant => "bot",
            },
            text: turn.text,
            timestamp: turn.timestamp,
        }
    }
}

/// GET /api/history/:session_id - List a session's turns in order
pub async fn get_history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<Vec<HistoryMessage>>> {
    let turns = state.history().messages(&session_id)?;

    Ok(Json(turns.into_iter().map(HistoryMessage::from).collect()))
}

/// DELETE /api/history/:session_id - Clear a session
pub async fn clear_history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<StatusCode> {
    state.history().clear(&session_id)?;

    tracing::info!("Cleared session \"{}\"", session_id);

    Ok(StatusCode::NO_CONTENT)
}
