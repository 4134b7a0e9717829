//! Java harness: the user's code is a class body (`Solution.java`); a
//! generated `Main.java` instantiates it and prints one raw value per test
//! case line. Return types carry no JSON tags, so the expected value's shape
//! decides how each call site is typed and printed.

use crucible_common::types::TestCase;

use crate::config::LanguageProfile;

use super::literals::java_arg;
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
                    .map(java_arg)
                    .collect::<Vec<_>>()
                    .join(", ");

                let block = match infer_shape(&test_case.expected) {
                    ExpectedShape::NumberArray => format!(
                        "        {{ int[] actual = s.{fn_name}({call_args}); System.out.println(arrToJson(actual)); }}\n"
                    ),
                    ExpectedShape::Boolean => format!(
                        "        {{ boolean actual = s.{fn_name}({call_args}); System.out.println(actual ? \"true\" : \"false\"); }}\n"
                    ),
                    ExpectedShape::Scalar => format!(
                        "        {{ int actual = s.{fn_name}({call_args}); System.out.println(actual); }}\n"
                    ),
                };
                blocks.push_str(&block);
            }
        }
        None => {
            // Nothing printed: the evaluator turns every missing line into a
            // failed outcome, and stderr names the cause.
            blocks.push_str("        System.err.println(\"function not found\");\n");
        }
    }

    let main_java = format!(
        r#"import java.util.*;

public class Main {{
    static String arrToJson(int[] a) {{
        StringBuilder sb = new StringBuilder("[");
        for (int i = 0; i < a.length; i++) {{
            sb.append(a[i]);
            if (i + 1 < a.length) sb.append(",");
        }}
        sb.append("]");
        return sb.toString();
    }}

    public static void main(String[] args) {{
        Solution s = new Solution();
{blocks}    }}
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
                content: main_java,
            },
        ],
    }
}
