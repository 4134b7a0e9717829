use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

use crate::{handlers, AppState};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/api/execute", post(handlers::execute_code))
        .route("/api/problems", get(handlers::list_problems))
        .route("/api/submit", post(handlers::submit_solution))
        .route("/api/ai", post(handlers::ai_complete))
}
