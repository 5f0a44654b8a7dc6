//! RAG chat server binary
//!
//! Run with: cargo run --bin codi-rag-server

use codi_rag::providers::LlmProvider;
use codi_rag::{config::RagConfig, server::RagServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "codi_rag=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration (CODI_RAG_CONFIG or defaults)
    let config = RagConfig::load()?;

    tracing::info!("Configuration loaded");
    tracing::info!("  - LLM model: {}", config.llm.generate_model);
    tracing::info!("  - Embedding model: {}", config.llm.embed_model);
    tracing::info!("  - Qdrant collection: {}", config.search.collection);
    tracing::info!("  - History backend: {:?}", config.history.backend);
    tracing::info!("  - Diagram mode: {:?}", config.generation.diagram_mode);

    // Check Ollama
    tracing::info!("Checking Ollama at {}...", config.llm.base_url);
    let ollama = codi_rag::providers::OllamaClient::new(&config.llm)?;
    if ollama.health_check().await.unwrap_or(false) {
        tracing::info!("Ollama is running");
    } else {
        tracing::warn!("Ollama not available at {}", config.llm.base_url);
        tracing::warn!("Start it with: ollama serve && ollama pull {}", config.llm.generate_model);
    }

    // Create and start server
    let server = RagServer::new(config)?;

    println!("\nServer starting...");
    println!("  API: http://{}", server.address());
    println!("  Health: http://{}/", server.address());
    println!("\nEndpoints:");
    println!("  POST   /api/chat                 - Ask questions");
    println!("  GET    /api/history/:session_id  - List session turns");
    println!("  DELETE /api/history/:session_id  - Clear a session");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
