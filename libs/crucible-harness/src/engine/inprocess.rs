//! In-process backend: evaluates the generated JavaScript harness with an
//! embedded engine and returns the outcome list directly, already
//! structured.
//!
//! **Known gap, by design:** there is no timeout and no resource isolation
//! here. A submission with an infinite loop hangs its blocking task
//! indefinitely. Callers wanting isolation must impose an external
//! timeout/cancellation wrapper; this module will not invent a sandbox.

use async_trait::async_trait;
use boa_engine::{Context, Source};
use crucible_common::error::ExecutionError;
use crucible_common::types::TestOutcome;
use tracing::debug;

use crate::generator::Harness;

use super::{ExecutionBackend, RawOutput};

#[derive(Debug, Default)]
pub struct InProcessEngine;

impl InProcessEngine {
    pub fn new() -> Self {
        InProcessEngine
    }
}

#[async_trait]
impl ExecutionBackend for InProcessEngine {
    async fn run(&self, harness: &Harness) -> Result<RawOutput, ExecutionError> {
        let source = match harness {
            Harness::Script { source } => source.clone(),
            Harness::Files { .. } => {
                return Err(ExecutionError::BackendFailed {
                    message: "in-process engine only runs single scripts".to_string(),
                    stdout: None,
                })
            }
        };

        debug!(script_bytes = source.len(), "Evaluating script in-process");

        // The engine is synchronous and its context is !Send, so the whole
        // evaluation lives inside one blocking task. Errors cross the
        // boundary as strings because engine values cannot.
        let value = tokio::task::spawn_blocking(move || -> Result<serde_json::Value, String> {
            let mut context = Context::default();
            let completion = context
                .eval(Source::from_bytes(source.as_bytes()))
                .map_err(|e| e.to_string())?;
            completion.to_json(&mut context).map_err(|e| e.to_string())
        })
        .await
        .map_err(|e| ExecutionError::BackendFailed {
            message: format!("evaluation task failed: {e}"),
            stdout: None,
        })?
        .map_err(|message| ExecutionError::BackendFailed {
            message,
            stdout: None,
        })?;

        // The harness guarantees the completion value is the outcome array.
        let outcomes: Vec<TestOutcome> =
            serde_json::from_value(value).map_err(|e| ExecutionError::BackendFailed {
                message: format!("malformed outcome list from evaluated script: {e}"),
                stdout: None,
            })?;

        Ok(RawOutput::Structured(outcomes))
    }
}
