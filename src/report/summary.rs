//! Summary report: flat counts plus per-package statistics.
//!
//! The top-level duration sums the suites' own declared durations, while the
//! per-package rows sum the constituent test durations. The two figures come
//! from different clocks in the TestNG output and are kept separate.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::parser::{SuiteResult, TestStatus};
use crate::report::{format_duration, split_class_name};

/// Rolled-up counts for one package, used by the summary table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PackageStats {
    pub package_name: String,
    pub total: u64,
    pub passed: u64,
    pub failed: u64,
    pub skipped: u64,
    pub duration_ms: u64,
}

/// Aggregated counts across all suites.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SummaryStats {
    pub total: u64,
    pub passed: u64,
    pub failed: u64,
    pub skipped: u64,
    pub duration_ms: u64,
    /// One entry per distinct package, alphabetically ordered.
    pub package_stats: Vec<PackageStats>,
}

/// Fold every test case across every suite into flat summary counts.
///
/// Suite boundaries only matter for the duration figure; the counts ignore
/// which suite a test came from.
pub fn summary_stats(suites: &[SuiteResult]) -> SummaryStats {
    let mut stats = SummaryStats::default();
    let mut packages: BTreeMap<String, PackageStats> = BTreeMap::new();

    for suite in suites {
        stats.duration_ms += suite.duration_ms;
        for test in &suite.test_cases {
            stats.total += 1;
            match test.status {
                TestStatus::Pass => stats.passed += 1,
                TestStatus::Fail => stats.failed += 1,
                TestStatus::Skip => stats.skipped += 1,
            }

            let (package, _) = split_class_name(&test.class_name);
            let entry = packages
                .entry(package.to_string())
                .or_insert_with(|| PackageStats {
                    package_name: package.to_string(),
                    ..PackageStats::default()
                });
            entry.total += 1;
            entry.duration_ms += test.duration_ms;
            match test.status {
                TestStatus::Pass => entry.passed += 1,
                TestStatus::Fail => entry.failed += 1,
                TestStatus::Skip => entry.skipped += 1,
            }
        }
    }

    stats.package_stats = packages.into_values().collect();
    stats
}

/// Render the summary markdown: a header line with the raw totals and, when
/// any package exists, an alphabetical package table with formatted durations.
pub fn render_summary(stats: &SummaryStats) -> String {
    let mut md = format!(
        "## TestNG Summary\n\n\
         **Total:** {}  |  **Passed:** {}  |  **Failed:** {}  |  **Skipped:** {}  |  **Duration:** {} ms\n\n",
        stats.total, stats.passed, stats.failed, stats.skipped, stats.duration_ms
    );

    if !stats.package_stats.is_empty() {
        md.push_str("### Package Statistics\n\n");
        md.push_str("| **Package** | **Duration** | **Fail** | **Skip** | **Pass** | **Total** |\n");
        md.push_str("|-------------|--------------|----------|----------|----------|----------|\n");
        for pkg in &stats.package_stats {
            md.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} |\n",
                pkg.package_name,
                format_duration(pkg.duration_ms),
                pkg.failed,
                pkg.skipped,
                pkg.passed,
                pkg.total
            ));
        }
        md.push('\n');
    }

    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::TestCase;

    fn test_case(name: &str, class_name: &str, status: TestStatus, duration_ms: u64) -> TestCase {
        TestCase {
            name: name.to_string(),
            class_name: class_name.to_string(),
            duration_ms,
            status,
            failure_message: None,
            stack_trace: None,
            expected: None,
            actual: None,
            groups: None,
        }
    }

    #[test]
    fn duration_uses_suite_declared_figure() {
        let suites = vec![SuiteResult {
            suite_name: "S".to_string(),
            duration_ms: 100,
            test_cases: vec![
                test_case("a", "p.C", TestStatus::Pass, 10),
                test_case("b", "p.C", TestStatus::Fail, 30),
                test_case("c", "p.C", TestStatus::Skip, 60),
            ],
        }];
        let stats = summary_stats(&suites);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.passed, 1);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.skipped, 1);
        // Suite wall clock, not 10 + 30 + 60.
        assert_eq!(stats.duration_ms, 100);
        // Package rows do sum test durations.
        assert_eq!(stats.package_stats[0].duration_ms, 100);
    }

    #[test]
    fn package_rows_sum_test_durations() {
        let suites = vec![SuiteResult {
            suite_name: "S".to_string(),
            duration_ms: 9_999,
            test_cases: vec![
                test_case("a", "p.C", TestStatus::Pass, 7),
                test_case("b", "p.D", TestStatus::Pass, 5),
            ],
        }];
        let stats = summary_stats(&suites);
        assert_eq!(stats.package_stats.len(), 1);
        assert_eq!(stats.package_stats[0].package_name, "p");
        assert_eq!(stats.package_stats[0].duration_ms, 12);
        assert_eq!(stats.package_stats[0].total, 2);
    }

    #[test]
    fn packages_are_alphabetical_and_merge_across_suites() {
        let suites = vec![
            SuiteResult {
                suite_name: "A".to_string(),
                duration_ms: 1,
                test_cases: vec![
                    test_case("a", "z.pkg.C", TestStatus::Pass, 1),
                    test_case("b", "a.pkg.C", TestStatus::Fail, 1),
                ],
            },
            SuiteResult {
                suite_name: "B".to_string(),
                duration_ms: 2,
                test_cases: vec![test_case("c", "z.pkg.C", TestStatus::Skip, 1)],
            },
        ];
        let stats = summary_stats(&suites);
        let names: Vec<_> = stats
            .package_stats
            .iter()
            .map(|p| p.package_name.as_str())
            .collect();
        assert_eq!(names, vec!["a.pkg", "z.pkg"]);
        assert_eq!(stats.package_stats[1].total, 2);
        assert_eq!(stats.duration_ms, 3);
    }

    #[test]
    fn undotted_class_falls_into_default_package() {
        let suites = vec![SuiteResult {
            suite_name: "S".to_string(),
            duration_ms: 0,
            test_cases: vec![test_case("a", "Standalone", TestStatus::Pass, 1)],
        }];
        let stats = summary_stats(&suites);
        assert_eq!(stats.package_stats[0].package_name, "default");
    }

    #[test]
    fn empty_input_renders_without_package_table() {
        let stats = summary_stats(&[]);
        assert_eq!(stats.total, 0);
        let md = render_summary(&stats);
        assert!(md.contains("## TestNG Summary"));
        assert!(md.contains("**Total:** 0"));
        assert!(!md.contains("Package Statistics"));
    }

    #[test]
    fn summary_markdown_shape() {
        let suites = vec![SuiteResult {
            suite_name: "S".to_string(),
            duration_ms: 250,
            test_cases: vec![
                test_case("a", "com.example.C", TestStatus::Pass, 3_661_001),
                test_case("b", "com.example.C", TestStatus::Fail, 0),
            ],
        }];
        let md = render_summary(&summary_stats(&suites));
        assert!(md.contains("**Duration:** 250 ms"));
        assert!(md.contains("### Package Statistics"));
        assert!(md.contains("| **Package** | **Duration** | **Fail** | **Skip** | **Pass** | **Total** |"));
        assert!(md.contains("| com.example | 01:01:01:001 | 1 | 0 | 1 | 2 |"));
    }
}
