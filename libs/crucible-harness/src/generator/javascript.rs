//! JavaScript harness: one script for the in-process evaluator.
//!
//! The user's code is followed by a driver that calls the function with
//! spread positional arguments and collects outcome records in memory. The
//! script's completion value is the record list, so no text parsing happens
//! downstream.

use crucible_common::types::TestCase;

use super::literals::js_literal;
use super::{safe_function_name, Harness};

pub fn generate(source: &str, function_name: &str, test_cases: &[TestCase]) -> Harness {
    let fn_expr = safe_function_name(function_name, true).unwrap_or("undefined");

    let mut script = String::new();
    script.push_str(source);
    script.push_str("\n\n");
    script.push_str(&format!("const __fn = {fn_expr};\n"));
    script.push_str("const __results = [];\n");

    for test_case in test_cases {
        let input = js_literal(&serde_json::Value::Array(test_case.input.clone()));
        let expected = js_literal(&test_case.expected);

        // The try boundary is per test case: a throwing user function
        // records one failed outcome and the loop continues.
        script.push_str(&format!(
            r#"try {{
    const args = {input};
    const expected = {expected};
    const actual = (typeof __fn === 'function') ? __fn(...args) : null;
    const record = {{
        input: args,
        expected: expected,
        actual: actual === undefined ? null : actual,
        passed: typeof __fn === 'function' && JSON.stringify(actual) === JSON.stringify(expected)
    }};
    if (typeof __fn !== 'function') {{
        record.error = 'function not found';
    }}
    __results.push(record);
}} catch (e) {{
    __results.push({{
        input: {input},
        expected: {expected},
        actual: null,
        passed: false,
        error: (e && e.message) ? e.message : String(e)
    }});
}}
"#
        ));
    }

    script.push_str("__results;\n");

    Harness::Script { source: script }
}
