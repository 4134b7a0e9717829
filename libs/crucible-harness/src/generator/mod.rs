//! Harness Generators - Foreign-Source Emission
//!
//! **Core Responsibility:**
//! Given user source, a function name, and test cases, emit a complete
//! runnable program that invokes the user's function against every test case
//! and produces machine-parseable output.
//!
//! **Critical Properties:**
//! - A generator never executes code; it only emits text artifacts.
//! - Each test case is wrapped independently in the generated program: one
//!   crashing case must not abort its siblings.
//! - Function names are validated before interpolation. Invalid or empty
//!   names still yield a program that runs and reports function-not-found
//!   outcomes instead of failing to compile or parse.

pub mod cpp;
pub mod java;
pub mod javascript;
pub mod literals;
pub mod python;

use serde_json::Value;

/// One generated source file, named the way the sandbox expects it.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    pub content: String,
}

/// The artifact a generator hands to an execution backend.
#[derive(Debug, Clone)]
pub enum Harness {
    /// A single self-contained script for the in-process evaluator. Its
    /// completion value is the outcome list itself.
    Script { source: String },
    /// File set plus sandbox identity for the remote compile-and-run service.
    Files {
        language: String,
        version: String,
        files: Vec<SourceFile>,
    },
}

/// How the evaluator must decode the backend's raw output for this harness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Outcome records come back as structured values; no parsing.
    Structured,
    /// stdout is one JSON-encoded outcome array.
    OutcomeArrayJson,
    /// stdout has one raw serialized value per line, aligned to test cases
    /// by index.
    ValuePerLine,
}

/// Serialization strategy for a returned value, chosen from the *expected*
/// value's shape. Several target languages carry no runtime type tags, so
/// the generator decides up front how the entry point must print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedShape {
    NumberArray,
    Boolean,
    Scalar,
}

/// Total, side-effect-free shape inference. Branches only on
/// array-of-numbers vs boolean vs everything-else; a scalar `0` or `1` is
/// never boolean-like.
pub fn infer_shape(expected: &Value) -> ExpectedShape {
    match expected {
        Value::Bool(_) => ExpectedShape::Boolean,
        Value::Array(items) if items.iter().all(|v| v.is_number()) => ExpectedShape::NumberArray,
        _ => ExpectedShape::Scalar,
    }
}

/// Strict identifier check applied before a function name is spliced into
/// generated code. `allow_dollar` covers JavaScript's `$` identifiers.
pub fn is_valid_identifier(name: &str, allow_dollar: bool) -> bool {
    let mut chars = name.chars();
    let first_ok = match chars.next() {
        Some(c) => c.is_ascii_alphabetic() || c == '_' || (allow_dollar && c == '$'),
        None => return false,
    };
    first_ok
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || (allow_dollar && c == '$'))
}

/// Validated function name, or `None` when the raw name must not reach
/// generated code.
pub fn safe_function_name(raw: &str, allow_dollar: bool) -> Option<&str> {
    if is_valid_identifier(raw, allow_dollar) {
        Some(raw)
    } else {
        None
    }
}
