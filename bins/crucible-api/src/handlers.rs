// HTTP route handlers for the Crucible API

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use crucible_common::types::{ExecutionRequest, Submission, TestOutcome};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};

use crate::AppState;

/// GET / - Service banner
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "message": "Crucible Backend API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "assistantReady": state.assistant.is_configured(),
    }))
}

/// GET /health - Health check endpoint
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "status": "OK",
        "assistantReady": state.assistant.is_configured(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// POST /api/execute - Run submitted code against its test cases
pub async fn execute_code(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ExecutionRequest>,
) -> impl IntoResponse {
    match state.orchestrator.execute(&payload).await {
        Ok(result) => (StatusCode::OK, Json(serde_json::to_value(result).unwrap_or_default()))
            .into_response(),
        Err(e) => {
            error!(error = %e, language = %payload.language, "Execution failed");
            let status = StatusCode::from_u16(e.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            let mut body = json!({ "error": e.to_string() });
            if let Some(raw) = e.raw_stdout() {
                body["raw"] = json!(raw);
            }
            (status, Json(body)).into_response()
        }
    }
}

/// GET /api/problems - Static problem catalog
pub async fn list_problems() -> impl IntoResponse {
    Json(problems_json())
}

fn problems_json() -> serde_json::Value {
    serde_json::to_value(crate::problems::catalog()).unwrap_or_else(|_| json!([]))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub problem_id: Option<i64>,
    #[serde(default, alias = "sourceCode")]
    pub code: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub results: Vec<TestOutcome>,
}

/// POST /api/submit - Record a graded solution in the in-memory log
pub async fn submit_solution(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SubmitRequest>,
) -> impl IntoResponse {
    let submission = Submission::new(
        payload.user_id,
        payload.problem_id,
        payload.code,
        payload.language,
        payload.results,
    );

    info!(
        submission_id = %submission.id,
        language = %submission.language,
        status = ?submission.status,
        "Solution submitted"
    );

    let body = json!({
        "message": "Solution submitted successfully",
        "submission": submission,
    });

    match state.submissions.lock() {
        Ok(mut log) => {
            log.push(submission);
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Submission log poisoned");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Submission failed" })),
            )
                .into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiRequest {
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub system: Option<String>,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_temperature() -> f32 {
    0.4
}

fn default_max_tokens() -> u32 {
    512
}

/// POST /api/ai - Assistant oracle proxy; degrades to a static fallback
/// instead of surfacing errors to the caller
pub async fn ai_complete(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AiRequest>,
) -> impl IntoResponse {
    if payload.prompt.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "prompt is required" })),
        )
            .into_response();
    }

    let completion = state
        .assistant
        .complete(
            &payload.prompt,
            payload.system.as_deref(),
            payload.temperature,
            payload.max_tokens,
        )
        .await;

    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "model": completion.model,
            "output": completion.output,
            "isMock": completion.is_mock,
        })),
    )
        .into_response()
}
