//! Python harness: user code plus an appended driver in one file.
//!
//! The driver deserializes an embedded JSON test-case table, looks the
//! function up dynamically by name, and prints one JSON-encoded outcome
//! array as the final line of stdout.

use crucible_common::types::TestCase;

use crate::config::LanguageProfile;

use super::{safe_function_name, Harness, SourceFile};

pub fn generate(
    source: &str,
    function_name: &str,
    test_cases: &[TestCase],
    profile: &LanguageProfile,
) -> Harness {
    let fn_name = safe_function_name(function_name, false).unwrap_or("");
    let tests_json = serde_json::to_string(test_cases).unwrap_or_else(|_| "[]".to_string());

    let driver = format!(
        r#"

import json

__FUNCTION_NAME = "{fn_name}"
__TESTS = json.loads('''{tests_json}''')

__results = []
for __tc in __TESTS:
    try:
        __args = __tc.get('input', [])
        __expected = __tc.get('expected', None)
        __fn = globals().get(__FUNCTION_NAME)
        if callable(__fn):
            __actual = __fn(*__args)
            __results.append({{'input': __args, 'expected': __expected, 'actual': __actual, 'passed': __actual == __expected}})
        else:
            __results.append({{'input': __args, 'expected': __expected, 'actual': None, 'passed': False, 'error': 'function not found'}})
    except Exception as __e:
        __results.append({{'input': __tc.get('input', []), 'expected': __tc.get('expected', None), 'actual': None, 'passed': False, 'error': str(__e)}})

print(json.dumps(__results))
"#
    );

    let program = format!("{source}{driver}");

    Harness::Files {
        language: profile.name.clone(),
        version: profile.version.clone(),
        files: vec![SourceFile {
            name: profile.harness_file.clone(),
            content: program,
        }],
    }
}
