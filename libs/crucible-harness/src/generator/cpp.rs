//! C++ harness: the user's code is a header-only class definition
//! (`solution.hpp`); the generated `main.cpp` includes it and prints one raw
//! value per test case line, typed by the expected value's shape.

use crucible_common::types::TestCase;

use crate::config::LanguageProfile;

use super::literals::cpp_arg;
use super::{infer_shape, safe_function_name, ExpectedShape, Harness, SourceFile};

pub fn generate(
    source: &str,
    function_name: &str,
    test_cases: &[TestCase],
    profile: &LanguageProfile,
) -> Harness {
    let mut blocks = String::new();

    match safe_function_name(function_name, false) {
        Some(fn_name) => {
            for test_case in test_cases {
                let call_args = test_case
                    .input
                    .iter()
                    .map(cpp_arg)
                    .collect::<Vec<_>>()
                    .join(", ");

                let block = match infer_shape(&test_case.expected) {
                    ExpectedShape::NumberArray => format!(
                        "    {{ auto actual = s.{fn_name}({call_args}); cout << vecToJson(actual) << \"\\n\"; }}\n"
                    ),
                    ExpectedShape::Boolean => format!(
                        "    {{ auto actual = s.{fn_name}({call_args}); cout << (actual ? \"true\" : \"false\") << \"\\n\"; }}\n"
                    ),
                    ExpectedShape::Scalar => format!(
                        "    {{ auto actual = s.{fn_name}({call_args}); cout << actual << \"\\n\"; }}\n"
                    ),
                };
                blocks.push_str(&block);
            }
        }
        None => {
            blocks.push_str("    cerr << \"function not found\\n\";\n");
        }
    }

    let solution_include = &profile.solution_file;
    let main_cpp = format!(
        r#"#include "{solution_include}"
#include <bits/stdc++.h>
using namespace std;

string vecToJson(const vector<int>& v) {{
    string s = "[";
    for (size_t i = 0; i < v.size(); ++i) {{
        s += to_string(v[i]);
        if (i + 1 < v.size()) s += ",";
    }}
    s += "]";
    return s;
}}

int main() {{
    ios::sync_with_stdio(false);
    cin.tie(nullptr);
    Solution s;
{blocks}    return 0;
}}
"#
    );

    Harness::Files {
        language: profile.name.clone(),
        version: profile.version.clone(),
        files: vec![
            SourceFile {
                name: profile.solution_file.clone(),
                content: source.to_string(),
            },
            SourceFile {
                name: profile.harness_file.clone(),
                content: main_cpp,
            },
        ],
    }
}
