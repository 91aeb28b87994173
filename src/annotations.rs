//! Annotation records for failed tests.
//!
//! One record per FAIL test case, independent of the rendered reports. The
//! records are plain data; emission as GitHub workflow commands lives in
//! [`crate::github`].

use crate::parser::{SuiteResult, TestStatus};

/// Severity of an annotation. Failures are the only level this tool emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationLevel {
    Failure,
}

/// A CI annotation for one failed test. No source file or line mapping is
/// attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub title: String,
    pub message: String,
    pub level: AnnotationLevel,
}

/// Build one annotation per FAIL test case across all suites, in document
/// order.
pub fn annotations_for_failures(suites: &[SuiteResult]) -> Vec<Annotation> {
    let mut annotations = Vec::new();

    for suite in suites {
        for test in &suite.test_cases {
            if test.status != TestStatus::Fail {
                continue;
            }

            let qualified = format!("{}.{}", test.class_name, test.name);
            let mut message = format!(
                "Test failed: {}\n{}",
                qualified,
                test.failure_message.as_deref().unwrap_or("")
            );
            if let Some(stack_trace) = &test.stack_trace
                && !stack_trace.is_empty()
            {
                message.push_str(&format!("\nStacktrace\n{stack_trace}\n"));
            }

            annotations.push(Annotation {
                title: format!("Test Failure: {qualified}"),
                message,
                level: AnnotationLevel::Failure,
            });
        }
    }

    annotations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::TestCase;

    fn failing_test(name: &str, message: Option<&str>, stack: Option<&str>) -> TestCase {
        TestCase {
            name: name.to_string(),
            class_name: "com.example.FailClass".to_string(),
            duration_ms: 5,
            status: TestStatus::Fail,
            failure_message: message.map(str::to_string),
            stack_trace: stack.map(str::to_string),
            expected: None,
            actual: None,
            groups: None,
        }
    }

    fn suite(tests: Vec<TestCase>) -> SuiteResult {
        SuiteResult {
            suite_name: "S".to_string(),
            duration_ms: 0,
            test_cases: tests,
        }
    }

    #[test]
    fn builds_one_annotation_per_failure() {
        let mut passing = failing_test("ok", None, None);
        passing.status = TestStatus::Pass;
        let suites = vec![suite(vec![
            failing_test("broken", Some("boom"), Some("trace")),
            passing,
            failing_test("also_broken", Some("bang"), None),
        ])];

        let annotations = annotations_for_failures(&suites);
        assert_eq!(annotations.len(), 2);
        assert_eq!(
            annotations[0].title,
            "Test Failure: com.example.FailClass.broken"
        );
        assert_eq!(annotations[0].level, AnnotationLevel::Failure);
    }

    #[test]
    fn message_includes_stacktrace_tail_when_present() {
        let suites = vec![suite(vec![failing_test(
            "broken",
            Some("boom"),
            Some("java.lang.AssertionError"),
        )])];
        let annotations = annotations_for_failures(&suites);
        assert_eq!(
            annotations[0].message,
            "Test failed: com.example.FailClass.broken\nboom\nStacktrace\njava.lang.AssertionError\n"
        );
    }

    #[test]
    fn missing_failure_message_becomes_empty_line() {
        let suites = vec![suite(vec![failing_test("broken", None, None)])];
        let annotations = annotations_for_failures(&suites);
        assert_eq!(
            annotations[0].message,
            "Test failed: com.example.FailClass.broken\n"
        );
    }

    #[test]
    fn no_failures_yield_no_annotations() {
        assert!(annotations_for_failures(&[]).is_empty());
        let mut passing = failing_test("ok", None, None);
        passing.status = TestStatus::Pass;
        assert!(annotations_for_failures(&[suite(vec![passing])]).is_empty());
    }
}
