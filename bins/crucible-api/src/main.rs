mod assistant;
mod handlers;
mod problems;
mod routes;

use axum::Router;
use crucible_common::types::Submission;
use crucible_harness::Orchestrator;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tracing::info;

pub struct AppState {
    pub orchestrator: Orchestrator,
    pub assistant: assistant::Assistant,
    /// In-memory submission log. Persistence is an external collaborator's
    /// job; this exists only so the demo surface works end to end.
    pub submissions: Mutex<Vec<Submission>>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    info!("Crucible API booting...");

    let assistant = assistant::Assistant::from_env();
    if assistant.is_configured() {
        info!("Assistant oracle configured");
    } else {
        info!("Assistant oracle not configured, using static fallback");
    }

    let state = Arc::new(AppState {
        orchestrator: Orchestrator::new(),
        assistant,
        submissions: Mutex::new(Vec::new()),
    });

    // Build router
    let app = Router::new().merge(routes::routes()).with_state(state);

    // Start server
    let port = std::env::var("PORT").unwrap_or_else(|_| "5000".to_string());
    let addr = format!("0.0.0.0:{port}");
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    info!("HTTP server listening on {}", addr);
    info!("Ready to accept submissions");

    axum::serve(listener, app).await.expect("Server error");
}
