//! Shared data model for the execution pipeline and the HTTP surface.
//!
//! Wire format is camelCase to match the frontend contract
//! (`sourceCode`, `testCases`, `executionTimeMs`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

use crate::error::ExecutionError;

/// The closed set of supported languages. Each variant maps to exactly one
/// harness generator and one execution backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    JavaScript,
    Python,
    Java,
    Cpp,
}

impl Language {
    /// Resolve a free-form language string to a canonical identifier.
    ///
    /// Lower-cases and trims, then applies the fixed alias table. Unknown
    /// strings are rejected with the normalized string echoed back; nothing
    /// is ever silently defaulted.
    pub fn from_alias(raw: &str) -> Result<Self, ExecutionError> {
        let normalized = raw.trim().to_lowercase();
        match normalized.as_str() {
            "javascript" | "js" | "node" | "nodejs" => Ok(Language::JavaScript),
            "python" | "py" | "py3" | "python3" => Ok(Language::Python),
            "java" => Ok(Language::Java),
            "cpp" | "c++" | "cplusplus" => Ok(Language::Cpp),
            _ => Err(ExecutionError::UnsupportedLanguage(normalized)),
        }
    }

    /// Canonical identifier, also used on the wire.
    pub fn canonical(&self) -> &'static str {
        match self {
            Language::JavaScript => "javascript",
            Language::Python => "python",
            Language::Java => "java",
            Language::Cpp => "cpp",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical())
    }
}

/// One test case: positional arguments and the expected return value.
/// Argument order is significant; it is spread as the user function's
/// parameter list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCase {
    #[serde(default)]
    pub input: Vec<Value>,
    #[serde(default)]
    pub expected: Value,
}

/// Immutable input to one orchestration call. Not persisted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionRequest {
    #[serde(default, alias = "code")]
    pub source_code: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub function_name: Option<String>,
    #[serde(default)]
    pub test_cases: Vec<TestCase>,
}

/// Per-test-case verdict. `actual` is `Value::Null` when the backend failed
/// to produce a value for that index (crash, missing output line).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestOutcome {
    pub input: Vec<Value>,
    pub expected: Value,
    #[serde(default)]
    pub actual: Value,
    pub passed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Uniform result envelope returned to the caller.
/// Invariant: `results.len() == test_cases.len()` whenever `success` is true.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    pub success: bool,
    pub results: Vec<TestOutcome>,
    pub execution_time_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stderr: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Accepted,
    WrongAnswer,
}

/// A graded solution recorded by the submission log. The core pipeline never
/// touches these; they exist only for the thin API surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: Uuid,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub problem_id: Option<i64>,
    pub code: String,
    pub language: String,
    pub results: Vec<TestOutcome>,
    pub timestamp: DateTime<Utc>,
    pub status: SubmissionStatus,
}

impl Submission {
    pub fn new(
        user_id: Option<String>,
        problem_id: Option<i64>,
        code: String,
        language: String,
        results: Vec<TestOutcome>,
    ) -> Self {
        let status = if !results.is_empty() && results.iter().all(|r| r.passed) {
            SubmissionStatus::Accepted
        } else {
            SubmissionStatus::WrongAnswer
        };

        Submission {
            id: Uuid::new_v4(),
            user_id,
            problem_id,
            code,
            language,
            results,
            timestamp: Utc::now(),
            status,
        }
    }
}
