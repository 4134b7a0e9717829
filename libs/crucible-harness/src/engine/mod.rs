//! Execution Backends - Run a Harness, Yield Raw Output
//!
//! **Critical Architectural Boundary:**
//! - A backend knows HOW to execute (embedded evaluator, remote sandbox)
//! - A backend does NOT know grading rules
//! - A backend returns raw output for the Evaluator to judge
//!
//! Timing is deliberately NOT a backend concern: the orchestrator measures
//! wall-clock time around the call so timings stay comparable across
//! backends.

pub mod inprocess;
pub mod sandbox;

use async_trait::async_trait;
use crucible_common::error::ExecutionError;
use crucible_common::types::TestOutcome;

use crate::generator::Harness;

pub use inprocess::InProcessEngine;
pub use sandbox::SandboxClient;

/// Backend-specific raw output, discarded after normalization.
#[derive(Debug)]
pub enum RawOutput {
    /// Already-typed outcome records from the in-process evaluator.
    Structured(Vec<TestOutcome>),
    /// Captured stdout/stderr text from a sandbox run.
    Text { stdout: String, stderr: String },
}

/// The capability "run a generated program and yield raw output".
#[async_trait]
pub trait ExecutionBackend: Send + Sync {
    async fn run(&self, harness: &Harness) -> Result<RawOutput, ExecutionError>;
}
