//! End-to-end orchestrator tests.
//!
//! The in-process path runs for real (the evaluator is embedded); sandbox
//! paths that need the live service are `#[ignore]`d and run manually with
//! `cargo test -- --ignored` when network access is available.

use crucible_common::error::ExecutionError;
use crucible_common::types::{ExecutionRequest, TestCase};
use serde_json::json;

use crate::config::ProfileRegistry;
use crate::engine::SandboxClient;
use crate::executor::Orchestrator;

fn orchestrator() -> Orchestrator {
    Orchestrator::with_parts(SandboxClient::new(), ProfileRegistry::built_in())
}

fn request(source: &str, language: &str, function_name: &str, cases: Vec<TestCase>) -> ExecutionRequest {
    ExecutionRequest {
        source_code: source.to_string(),
        language: language.to_string(),
        function_name: Some(function_name.to_string()),
        test_cases: cases,
    }
}

const TWO_SUM_JS: &str = r#"
function twoSum(nums, target) {
    const seen = {};
    for (let i = 0; i < nums.length; i++) {
        const need = target - nums[i];
        if (seen[need] !== undefined) {
            return [seen[need], i];
        }
        seen[nums[i]] = i;
    }
    return [];
}
"#;

#[tokio::test]
async fn test_javascript_round_trip_all_pass() {
    let cases = vec![
        TestCase {
            input: vec![json!([2, 7, 11, 15]), json!(9)],
            expected: json!([0, 1]),
        },
        TestCase {
            input: vec![json!([3, 2, 4]), json!(6)],
            expected: json!([1, 2]),
        },
    ];
    let req = request(TWO_SUM_JS, "javascript", "twoSum", cases);

    let result = orchestrator().execute(&req).await.unwrap();

    assert!(result.success);
    assert_eq!(result.results.len(), req.test_cases.len());
    for outcome in &result.results {
        assert!(outcome.passed, "unexpected failure: {outcome:?}");
        assert!(outcome.error.is_none());
    }
}

#[tokio::test]
async fn test_javascript_wrong_answer_fails_case() {
    let cases = vec![TestCase {
        input: vec![json!([2, 7]), json!(9)],
        expected: json!([1, 0]),
    }];
    let req = request(TWO_SUM_JS, "js", "twoSum", cases);

    let result = orchestrator().execute(&req).await.unwrap();

    assert!(result.success);
    assert_eq!(result.results.len(), 1);
    assert!(!result.results[0].passed);
}

#[tokio::test]
async fn test_javascript_missing_function_name() {
    let cases = vec![TestCase {
        input: vec![json!(1)],
        expected: json!(1),
    }];
    let req = request(TWO_SUM_JS, "node", "", cases);

    let result = orchestrator().execute(&req).await.unwrap();

    assert!(result.success);
    assert_eq!(result.results.len(), 1);
    assert!(!result.results[0].passed);
    assert_eq!(result.results[0].actual, json!(null));
    assert_eq!(result.results[0].error.as_deref(), Some("function not found"));
}

#[tokio::test]
async fn test_unsupported_language_rejected_before_generation() {
    let req = request("puts 1", "ruby", "main", vec![]);

    match orchestrator().execute(&req).await.unwrap_err() {
        ExecutionError::UnsupportedLanguage(lang) => assert_eq!(lang, "ruby"),
        other => panic!("expected UnsupportedLanguage, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_source_rejected() {
    let req = request("   ", "javascript", "f", vec![]);

    match orchestrator().execute(&req).await.unwrap_err() {
        ExecutionError::InvalidRequest(msg) => assert!(msg.contains("source code")),
        other => panic!("expected InvalidRequest, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_language_rejected() {
    let req = request("function f() {}", "", "f", vec![]);

    assert!(matches!(
        orchestrator().execute(&req).await.unwrap_err(),
        ExecutionError::InvalidRequest(_)
    ));
}

#[tokio::test]
async fn test_sandbox_failure_is_terminal() {
    // Unreachable sandbox: the whole request fails, no partial results.
    let orchestrator = Orchestrator::with_parts(
        SandboxClient::with_base_url("http://127.0.0.1:1".into()),
        ProfileRegistry::built_in(),
    );
    let cases = vec![TestCase {
        input: vec![json!(5)],
        expected: json!(120),
    }];
    let req = request("def factorial(n): return 120", "python", "factorial", cases);

    assert!(matches!(
        orchestrator.execute(&req).await.unwrap_err(),
        ExecutionError::BackendUnavailable(_)
    ));
}

/// Live-sandbox round trip. Needs network access to the public service.
#[tokio::test]
#[ignore]
async fn test_python_round_trip_live_sandbox() {
    let cases = vec![TestCase {
        input: vec![json!([2, 7, 11, 15]), json!(9)],
        expected: json!([0, 1]),
    }];
    let source = r#"
def two_sum(nums, target):
    seen = {}
    for i, n in enumerate(nums):
        if target - n in seen:
            return [seen[target - n], i]
        seen[n] = i
    return []
"#;
    let req = request(source, "python", "two_sum", cases);

    let result = orchestrator().execute(&req).await.unwrap();
    assert!(result.success);
    assert!(result.results[0].passed);
}

/// Live-sandbox Java path exercising the value-per-line format.
#[tokio::test]
#[ignore]
async fn test_java_round_trip_live_sandbox() {
    let cases = vec![TestCase {
        input: vec![json!([2, 7, 11, 15]), json!(9)],
        expected: json!([0, 1]),
    }];
    let source = r#"
import java.util.*;
public class Solution {
    public int[] twoSum(int[] nums, int target) {
        Map<Integer, Integer> seen = new HashMap<>();
        for (int i = 0; i < nums.length; i++) {
            if (seen.containsKey(target - nums[i])) {
                return new int[]{seen.get(target - nums[i]), i};
            }
            seen.put(nums[i], i);
        }
        return new int[]{};
    }
}
"#;
    let req = request(source, "java", "twoSum", cases);

    let result = orchestrator().execute(&req).await.unwrap();
    assert!(result.success);
    assert!(result.results[0].passed);
}
