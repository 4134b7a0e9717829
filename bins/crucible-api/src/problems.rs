// Static problem catalog served by GET /api/problems.
// Catalog storage is an external collaborator; this is the demo set.

use crucible_common::types::TestCase;
use serde::Serialize;
use serde_json::json;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    pub id: i64,
    pub title: String,
    pub difficulty: String,
    pub category: String,
    pub description: String,
    pub test_cases: Vec<TestCase>,
}

pub fn catalog() -> Vec<Problem> {
    vec![
        Problem {
            id: 1,
            title: "Two Sum".to_string(),
            difficulty: "Easy".to_string(),
            category: "Arrays".to_string(),
            description: "Given an array of integers nums and an integer target, return \
                          indices of the two numbers such that they add up to target."
                .to_string(),
            test_cases: vec![
                TestCase {
                    input: vec![json!([2, 7, 11, 15]), json!(9)],
                    expected: json!([0, 1]),
                },
                TestCase {
                    input: vec![json!([3, 2, 4]), json!(6)],
                    expected: json!([1, 2]),
                },
            ],
        },
        Problem {
            id: 2,
            title: "Valid Parentheses".to_string(),
            difficulty: "Easy".to_string(),
            category: "Stack".to_string(),
            description: "Given a string s containing just the characters '(', ')', '{', '}', \
                          '[' and ']', determine if the input string is valid."
                .to_string(),
            test_cases: vec![
                TestCase {
                    input: vec![json!("()")],
                    expected: json!(true),
                },
                TestCase {
                    input: vec![json!("(]")],
                    expected: json!(false),
                },
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_shape() {
        let problems = catalog();
        assert_eq!(problems.len(), 2);
        for problem in &problems {
            assert!(!problem.test_cases.is_empty());
        }

        let v = serde_json::to_value(&problems).unwrap();
        assert_eq!(v[0]["testCases"][0]["expected"], json!([0, 1]));
    }
}
