//! Execution Orchestrator - High-Level Pipeline Glue
//!
//! **Responsibility:**
//! Normalize the language, pick generator + backend + output format, time
//! the backend call, and wrap everything into the uniform result envelope.
//!
//! This module is the glue layer - it knows nothing about:
//! - How foreign source is emitted (generator's job)
//! - How code executes (engine's job)
//! - How verdicts are decided (evaluator's job)

use crucible_common::error::ExecutionError;
use crucible_common::types::{ExecutionRequest, ExecutionResult, Language, TestCase};
use std::time::Instant;
use tracing::{debug, info};

use crate::config::ProfileRegistry;
use crate::engine::{ExecutionBackend, InProcessEngine, SandboxClient};
use crate::evaluator;
use crate::generator::{cpp, java, javascript, python, Harness, OutputFormat};

pub struct Orchestrator {
    in_process: InProcessEngine,
    sandbox: SandboxClient,
    profiles: ProfileRegistry,
}

impl Orchestrator {
    pub fn new() -> Self {
        Self::with_parts(SandboxClient::new(), ProfileRegistry::load_or_default())
    }

    pub fn with_parts(sandbox: SandboxClient, profiles: ProfileRegistry) -> Self {
        Orchestrator {
            in_process: InProcessEngine::new(),
            sandbox,
            profiles,
        }
    }

    /// Public entry point: raw submitted code + test cases in, uniform
    /// outcome list out. Requests are independent and stateless; any number
    /// may run concurrently.
    pub async fn execute(
        &self,
        request: &ExecutionRequest,
    ) -> Result<ExecutionResult, ExecutionError> {
        if request.source_code.trim().is_empty() {
            return Err(ExecutionError::InvalidRequest(
                "source code is required".to_string(),
            ));
        }
        if request.language.trim().is_empty() {
            return Err(ExecutionError::InvalidRequest(
                "language is required".to_string(),
            ));
        }

        let language = Language::from_alias(&request.language)?;
        let function_name = request.function_name.as_deref().unwrap_or("");

        info!(
            language = %language,
            function = function_name,
            test_count = request.test_cases.len(),
            source_bytes = request.source_code.len(),
            "Executing submission"
        );

        let (harness, format) = self.generate(
            language,
            &request.source_code,
            function_name,
            &request.test_cases,
        )?;

        let backend: &dyn ExecutionBackend = match language {
            Language::JavaScript => &self.in_process,
            Language::Python | Language::Java | Language::Cpp => &self.sandbox,
        };

        // Wall-clock time covers the backend call only, never harness
        // generation, so timings stay comparable across backends.
        let start = Instant::now();
        let raw = backend.run(&harness).await;
        let execution_time_ms = start.elapsed().as_millis() as u64;
        let raw = raw?;

        let (results, stderr) = evaluator::grade(format, raw, &request.test_cases)?;

        debug!(
            language = %language,
            execution_time_ms = execution_time_ms,
            passed = results.iter().filter(|r| r.passed).count(),
            failed = results.iter().filter(|r| !r.passed).count(),
            "Submission graded"
        );

        Ok(ExecutionResult {
            success: true,
            results,
            execution_time_ms,
            stderr,
        })
    }

    fn generate(
        &self,
        language: Language,
        source: &str,
        function_name: &str,
        test_cases: &[TestCase],
    ) -> Result<(Harness, OutputFormat), ExecutionError> {
        match language {
            Language::JavaScript => Ok((
                javascript::generate(source, function_name, test_cases),
                OutputFormat::Structured,
            )),
            Language::Python => {
                let profile = self.profiles.get(Language::Python)?;
                Ok((
                    python::generate(source, function_name, test_cases, profile),
                    OutputFormat::OutcomeArrayJson,
                ))
            }
            Language::Java => {
                let profile = self.profiles.get(Language::Java)?;
                Ok((
                    java::generate(source, function_name, test_cases, profile),
                    OutputFormat::ValuePerLine,
                ))
            }
            Language::Cpp => {
                let profile = self.profiles.get(Language::Cpp)?;
                Ok((
                    cpp::generate(source, function_name, test_cases, profile),
                    OutputFormat::ValuePerLine,
                ))
            }
        }
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new()
    }
}
