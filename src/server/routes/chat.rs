//! Chat endpoint: retrieve, generate, respond

use axum::{extract::State, Json};
use std::time::Instant;

use crate::error::Result;
use crate::server::state::AppState;
use crate::types::{ChatRequest, QueryResult};

/// POST /api/chat - Ask a question within a session
pub async fn chat_response(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<QueryResult>> {
    let start = Instant::now();

    tracing::info!("Chat query for session \"{}\"", request.session_id);

    // Fails before any model call when the capability is missing
    let search = state.search_provider()?;

    let passages = state
        .retriever()
        .retrieve(search.as_ref(), &request.query, request.top_k)
        .await?;

    let result = state
        .generator()
        .generate(&passages, &request.query, &request.session_id)
        .await?;

    tracing::info!(
        "Chat completed in {}ms (category: {}, context_used: {})",
        start.elapsed().as_millis(),
        result.category.as_str(),
        result.context_used
    );

    Ok(Json(result))
}
