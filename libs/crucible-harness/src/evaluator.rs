//! Result Normalizer / Grader - Language-Agnostic Verdict Logic
//!
//! **Core Responsibility:**
//! Parse backend-specific raw output back into typed values and apply the
//! equality rule that decides pass/fail.
//!
//! **Critical Properties:**
//! - Knows nothing about language runtimes or HTTP
//! - Pure: (raw output, test cases) -> outcomes
//! - A per-line parse failure degrades exactly one outcome; it never aborts
//!   siblings and never fails the request
//!
//! **Equality Rule:**
//! Two values are equal iff their canonical JSON serializations are
//! textually identical. Array order matters, `1` and `1.0` are distinct,
//! and no floating-point epsilon is applied anywhere.

use crucible_common::error::ExecutionError;
use crucible_common::types::{TestCase, TestOutcome};
use serde_json::Value;

use crate::engine::RawOutput;
use crate::generator::OutputFormat;

/// Parse one stdout line into a typed value.
///
/// Precedence: structured JSON parse (bracketed lists, quoted strings),
/// then the literal true/false tokens, then a numeric parse, else the raw
/// line is kept as a string.
pub fn parse_output_line(line: &str) -> Value {
    let trimmed = line.trim();

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return value;
    }

    match trimmed {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }

    if let Ok(n) = trimmed.parse::<i64>() {
        return Value::from(n);
    }
    if let Ok(f) = trimmed.parse::<f64>() {
        if let Some(n) = serde_json::Number::from_f64(f) {
            return Value::Number(n);
        }
    }

    Value::String(trimmed.to_string())
}

/// Canonical-serialization equality. Strict by design; swapping in a
/// tolerance policy means replacing exactly this function.
pub fn values_equal(expected: &Value, actual: &Value) -> bool {
    expected.to_string() == actual.to_string()
}

fn non_empty(stderr: String) -> Option<String> {
    if stderr.trim().is_empty() {
        None
    } else {
        Some(stderr)
    }
}

/// Normalize raw backend output into outcomes aligned 1:1 with the test
/// cases, plus captured stderr when the backend produced any.
pub fn grade(
    format: OutputFormat,
    raw: RawOutput,
    test_cases: &[TestCase],
) -> Result<(Vec<TestOutcome>, Option<String>), ExecutionError> {
    match (format, raw) {
        // In-process records are already typed; normalization is pass-through.
        (OutputFormat::Structured, RawOutput::Structured(outcomes)) => Ok((outcomes, None)),

        (OutputFormat::OutcomeArrayJson, RawOutput::Text { stdout, stderr }) => {
            match serde_json::from_str::<Vec<TestOutcome>>(stdout.trim()) {
                Ok(outcomes) => Ok((outcomes, non_empty(stderr))),
                // Unparseable top level aborts the request, raw stdout kept
                // for debugging.
                Err(_) => Err(ExecutionError::BackendFailed {
                    message: "failed to parse harness output".to_string(),
                    stdout: Some(stdout),
                }),
            }
        }

        (OutputFormat::ValuePerLine, RawOutput::Text { stdout, stderr }) => {
            let trimmed = stdout.trim();
            let lines: Vec<&str> = if trimmed.is_empty() {
                Vec::new()
            } else {
                trimmed.lines().collect()
            };

            let outcomes = test_cases
                .iter()
                .enumerate()
                .map(|(idx, tc)| match lines.get(idx) {
                    Some(line) => {
                        let actual = parse_output_line(line);
                        let passed = values_equal(&tc.expected, &actual);
                        TestOutcome {
                            input: tc.input.clone(),
                            expected: tc.expected.clone(),
                            actual,
                            passed,
                            error: None,
                        }
                    }
                    // Output shorter than the test-case count: record the
                    // miss, never drop the index.
                    None => TestOutcome {
                        input: tc.input.clone(),
                        expected: tc.expected.clone(),
                        actual: Value::Null,
                        passed: false,
                        error: Some("no output produced for this test case".to_string()),
                    },
                })
                .collect();

            Ok((outcomes, non_empty(stderr)))
        }

        (format, raw) => Err(ExecutionError::BackendFailed {
            message: format!("backend output does not match expected format {format:?}: {raw:?}"),
            stdout: None,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn make_case(input: Vec<Value>, expected: Value) -> TestCase {
        TestCase { input, expected }
    }

    #[test]
    fn test_parse_precedence() {
        assert_eq!(parse_output_line("[0,1]"), json!([0, 1]));
        assert_eq!(parse_output_line("\"quoted\""), json!("quoted"));
        assert_eq!(parse_output_line("true"), json!(true));
        assert_eq!(parse_output_line("false"), json!(false));
        assert_eq!(parse_output_line("42"), json!(42));
        assert_eq!(parse_output_line("-7"), json!(-7));
        assert_eq!(parse_output_line("3.5"), json!(3.5));
        assert_eq!(parse_output_line("  120\n"), json!(120));
        assert_eq!(parse_output_line("not json"), json!("not json"));
        assert_eq!(parse_output_line("[1,"), json!("[1,"));
    }

    #[test]
    fn test_equality_is_order_sensitive() {
        assert!(values_equal(&json!([0, 1]), &json!([0, 1])));
        assert!(!values_equal(&json!([0, 1]), &json!([1, 0])));
    }

    #[test]
    fn test_equality_is_strict_on_numeric_form() {
        // No tolerance, no numeric coercion across int/float forms.
        assert!(!values_equal(&json!(1), &json!(1.0)));
        assert!(values_equal(&json!(1.5), &json!(1.5)));
    }

    #[test]
    fn test_equality_on_nested_structures() {
        assert!(values_equal(&json!([[1, 2], [3]]), &json!([[1, 2], [3]])));
        assert!(!values_equal(&json!([[1, 2], [3]]), &json!([[1], [2, 3]])));
    }

    #[test]
    fn test_value_per_line_alignment() {
        let cases = vec![
            make_case(vec![json!(1)], json!([0, 1])),
            make_case(vec![json!(2)], json!(true)),
            make_case(vec![json!(3)], json!(6)),
        ];
        let raw = RawOutput::Text {
            stdout: "[0,1]\ntrue\n6\n".to_string(),
            stderr: String::new(),
        };

        let (outcomes, stderr) = grade(OutputFormat::ValuePerLine, raw, &cases).unwrap();
        assert_eq!(outcomes.len(), 3);
        assert!(outcomes.iter().all(|o| o.passed));
        assert!(stderr.is_none());
    }

    #[test]
    fn test_boolean_mismatch_fails() {
        // Expected true, method returned false: the line parses to a real
        // boolean and the outcome fails.
        let cases = vec![make_case(vec![json!("()")], json!(true))];
        let raw = RawOutput::Text {
            stdout: "false\n".to_string(),
            stderr: String::new(),
        };

        let (outcomes, _) = grade(OutputFormat::ValuePerLine, raw, &cases).unwrap();
        assert_eq!(outcomes[0].actual, json!(false));
        assert!(!outcomes[0].passed);
    }

    #[test]
    fn test_missing_line_degrades_single_outcome() {
        let cases = vec![
            make_case(vec![json!(1)], json!(1)),
            make_case(vec![json!(2)], json!(2)),
        ];
        let raw = RawOutput::Text {
            stdout: "1\n".to_string(),
            stderr: String::new(),
        };

        let (outcomes, _) = grade(OutputFormat::ValuePerLine, raw, &cases).unwrap();
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes[0].passed);
        assert!(!outcomes[1].passed);
        assert_eq!(outcomes[1].actual, Value::Null);
        assert!(outcomes[1].error.as_deref().unwrap().contains("no output"));
    }

    #[test]
    fn test_empty_stdout_fails_every_case() {
        let cases = vec![make_case(vec![json!(1)], json!(1))];
        let raw = RawOutput::Text {
            stdout: String::new(),
            stderr: "function not found\n".to_string(),
        };

        let (outcomes, stderr) = grade(OutputFormat::ValuePerLine, raw, &cases).unwrap();
        assert_eq!(outcomes.len(), 1);
        assert!(!outcomes[0].passed);
        assert_eq!(stderr.as_deref(), Some("function not found\n"));
    }

    #[test]
    fn test_unparseable_line_becomes_failed_raw_string() {
        let cases = vec![make_case(vec![json!(1)], json!([0, 1]))];
        let raw = RawOutput::Text {
            stdout: "Exception in thread main\n".to_string(),
            stderr: String::new(),
        };

        let (outcomes, _) = grade(OutputFormat::ValuePerLine, raw, &cases).unwrap();
        assert!(!outcomes[0].passed);
        assert_eq!(outcomes[0].actual, json!("Exception in thread main"));
    }

    #[test]
    fn test_outcome_array_parsed_whole() {
        let cases = vec![make_case(vec![json!(5)], json!(120))];
        let stdout = r#"[{"input":[5],"expected":120,"actual":120,"passed":true}]"#;
        let raw = RawOutput::Text {
            stdout: stdout.to_string(),
            stderr: String::new(),
        };

        let (outcomes, _) = grade(OutputFormat::OutcomeArrayJson, raw, &cases).unwrap();
        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0].passed);
        assert_eq!(outcomes[0].actual, json!(120));
    }

    #[test]
    fn test_unparseable_outcome_array_aborts_with_raw_stdout() {
        let cases = vec![make_case(vec![json!(5)], json!(120))];
        let raw = RawOutput::Text {
            stdout: "Traceback (most recent call last):".to_string(),
            stderr: String::new(),
        };

        let err = grade(OutputFormat::OutcomeArrayJson, raw, &cases).unwrap_err();
        match err {
            ExecutionError::BackendFailed { stdout, .. } => {
                assert_eq!(stdout.as_deref(), Some("Traceback (most recent call last):"));
            }
            other => panic!("expected BackendFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_structured_pass_through() {
        let outcome = TestOutcome {
            input: vec![json!(1)],
            expected: json!(1),
            actual: json!(1),
            passed: true,
            error: None,
        };
        let raw = RawOutput::Structured(vec![outcome.clone()]);

        let (outcomes, stderr) = grade(OutputFormat::Structured, raw, &[]).unwrap();
        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0].passed);
        assert!(stderr.is_none());
    }

    #[test]
    fn test_format_mismatch_is_backend_failure() {
        let raw = RawOutput::Structured(vec![]);
        assert!(grade(OutputFormat::ValuePerLine, raw, &[]).is_err());
    }
}
