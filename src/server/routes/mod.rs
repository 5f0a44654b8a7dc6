//! API routes for the chat server

pub mod chat;
pub mod history;

use axum::{
    routing::{get, post},
    Router,
};

use crate::server::state::AppState;

/// Build all API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Chat
        .route("/chat", post(chat::chat_response))
        // Session history
        .route(
            "/history/:session_id",
            get(history::get_history).delete(history::clear_history),
        )
        // Info
        .route("/info", get(info))
}

/// API info endpoint
async fn info() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "name": "codi-rag",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Retrieval-augmented document Q&A with query classification and session history",
        "endpoints": {
            "POST /api/chat": "Ask a question (query + session_id)",
            "GET /api/history/:session_id": "List a session's turns",
            "DELETE /api/history/:session_id": "Clear a session",
        },
        "categories": crate::types::QueryCategory::ALL,
    }))
}
