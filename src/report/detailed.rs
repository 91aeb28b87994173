//! Detailed report: per-package and per-class breakdown with ranking.
//!
//! Tests are grouped by the package and simple class name derived from their
//! dotted class names. Groups are rebuilt from scratch on every render call;
//! nothing is cached between calls. Ordering puts the most broken things
//! first: packages and classes rank by failed, then skipped, then passed
//! counts (all descending) with the name as the final ascending tie-break,
//! and tests within a class rank FAIL before SKIP before PASS, then by name.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::parser::{SuiteResult, TestCase, TestStatus};
use crate::report::{format_duration, split_class_name};

/// Rolling counts shared by package and class groups.
#[derive(Debug, Clone, Copy, Default)]
struct GroupCounts {
    passed: u64,
    failed: u64,
    skipped: u64,
    duration_ms: u64,
}

impl GroupCounts {
    fn add(&mut self, test: &TestCase) {
        self.duration_ms += test.duration_ms;
        match test.status {
            TestStatus::Pass => self.passed += 1,
            TestStatus::Fail => self.failed += 1,
            TestStatus::Skip => self.skipped += 1,
        }
    }
}

#[derive(Debug, Default)]
struct ClassGroup<'a> {
    counts: GroupCounts,
    tests: Vec<&'a TestCase>,
}

#[derive(Debug, Default)]
struct PackageGroup<'a> {
    counts: GroupCounts,
    classes: BTreeMap<String, ClassGroup<'a>>,
}

/// Single pass over every test case, merging tests that share a class name
/// even when they come from different suites.
fn group_by_package_and_class(suites: &[SuiteResult]) -> BTreeMap<String, PackageGroup<'_>> {
    let mut packages: BTreeMap<String, PackageGroup<'_>> = BTreeMap::new();

    for suite in suites {
        for test in &suite.test_cases {
            let (package, simple_name) = split_class_name(&test.class_name);
            let package_group = packages.entry(package.to_string()).or_default();
            package_group.counts.add(test);

            let class_group = package_group
                .classes
                .entry(simple_name.to_string())
                .or_default();
            class_group.counts.add(test);
            class_group.tests.push(test);
        }
    }

    packages
}

/// Failure-first ordering for packages and classes: failed desc, skipped
/// desc, passed desc, then name asc. Distinct names can never tie.
fn rank_groups(a_name: &str, a: &GroupCounts, b_name: &str, b: &GroupCounts) -> Ordering {
    b.failed
        .cmp(&a.failed)
        .then(b.skipped.cmp(&a.skipped))
        .then(b.passed.cmp(&a.passed))
        .then(a_name.cmp(b_name))
}

/// FAIL sorts before SKIP, which sorts before PASS.
fn status_rank(status: TestStatus) -> u8 {
    match status {
        TestStatus::Fail => 0,
        TestStatus::Skip => 1,
        TestStatus::Pass => 2,
    }
}

fn rank_tests(a: &TestCase, b: &TestCase) -> Ordering {
    status_rank(a.status)
        .cmp(&status_rank(b.status))
        .then_with(|| a.name.cmp(&b.name))
}

fn status_color(status: TestStatus) -> &'static str {
    match status {
        TestStatus::Pass => "blue",
        TestStatus::Fail => "red",
        TestStatus::Skip => "grey",
    }
}

fn status_emoji(status: TestStatus) -> &'static str {
    match status {
        TestStatus::Pass => "\u{1F535}", // blue circle
        TestStatus::Fail => "\u{1F534}", // red circle
        TestStatus::Skip => "\u{1F7E1}", // yellow circle
    }
}

/// Render the detailed markdown breakdown for the given suites.
pub fn render_detailed(suites: &[SuiteResult]) -> String {
    let mut md = String::from("## Detailed TestNG Report\n\n");

    let packages = group_by_package_and_class(suites);
    let mut ranked_packages: Vec<_> = packages.iter().collect();
    ranked_packages.sort_by(|(a_name, a), (b_name, b)| {
        rank_groups(a_name.as_str(), &a.counts, b_name.as_str(), &b.counts)
    });

    for (package_name, package) in ranked_packages {
        md.push_str(&format!(
            "<details>\n<summary><h3>\u{1F4E6} {} ({} - {} failed, {} skipped, {} passed)</h3></summary>\n\n",
            package_name,
            format_duration(package.counts.duration_ms),
            package.counts.failed,
            package.counts.skipped,
            package.counts.passed
        ));

        let mut ranked_classes: Vec<_> = package.classes.iter().collect();
        ranked_classes.sort_by(|(a_name, a), (b_name, b)| {
            rank_groups(a_name.as_str(), &a.counts, b_name.as_str(), &b.counts)
        });

        for (class_name, class) in ranked_classes {
            md.push_str(&format!(
                "<details>\n<summary><h4>\u{1F537} {} ({} - {} failed, {} skipped, {} passed)</h4></summary>\n\n",
                class_name,
                format_duration(class.counts.duration_ms),
                class.counts.failed,
                class.counts.skipped,
                class.counts.passed
            ));

            let mut tests = class.tests.clone();
            tests.sort_by(|a, b| rank_tests(a, b));
            for test in tests {
                render_test(&mut md, test);
            }

            md.push_str("</details>\n\n");
        }

        md.push_str("</details>\n\n");
    }

    md
}

fn render_test(md: &mut String, test: &TestCase) {
    let color = status_color(test.status);
    let emoji = status_emoji(test.status);
    let duration = format_duration(test.duration_ms);

    if test.status == TestStatus::Fail {
        // Failures get their own collapsible block with the exception detail.
        md.push_str(&format!(
            "<details>\n<summary><h5>{} {} ({}) - <span style=\"color:{}; font-weight:bold;\">{}</span></h5></summary>\n\n",
            emoji, test.name, duration, color, test.status
        ));

        if let Some(message) = &test.failure_message
            && !message.is_empty()
        {
            md.push_str(&format!("**Message:**\n\n```\n{message}\n```\n\n"));
        }
        if let Some(expected) = &test.expected {
            md.push_str(&format!("**Expected:**\n\n```\n{expected}\n```\n\n"));
        }
        if let Some(actual) = &test.actual {
            md.push_str(&format!("**Actual:**\n\n```\n{actual}\n```\n\n"));
        }
        if let Some(stack_trace) = &test.stack_trace
            && !stack_trace.is_empty()
        {
            md.push_str(&format!("**Stack Trace:**\n\n```java\n{stack_trace}\n```\n\n"));
        }
        if let Some(groups) = &test.groups
            && !groups.is_empty()
        {
            md.push_str(&format!("**Groups:** {}\n\n", groups.join(", ")));
        }

        md.push_str("</details>\n");
    } else {
        md.push_str(&format!(
            "{} <strong>{}</strong> ({}) - <span style=\"color:{}; font-weight:bold;\">{}</span>",
            emoji, test.name, duration, color, test.status
        ));
        if let Some(groups) = &test.groups
            && !groups.is_empty()
        {
            md.push_str(&format!(" - Groups: {}", groups.join(", ")));
        }
        md.push_str("\n\n");
    }
}
