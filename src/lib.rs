//! testng-report: TestNG XML results to GitHub Actions reports.
//!
//! This crate parses one or more TestNG `testng-results.xml` files into an
//! in-memory model and renders it as markdown reports for the GitHub step
//! summary, plus one workflow-command annotation per failed test.
//!
//! # Architecture
//!
//! The main components are:
//!
//! - **Parser**: tolerant normalization of TestNG XML into suites and tests
//! - **Report**: aggregation, ranking, and markdown rendering (summary and
//!   detailed variants)
//! - **Annotations**: per-failure annotation records
//! - **GitHub**: the step-summary sink and workflow-command emission
//!
//! # Example
//!
//! ```
//! use testng_report::parser::parse_testng_results;
//! use testng_report::report::{render_summary, summary_stats};
//!
//! let xml = r#"<testng-results>
//!   <suite name="Suite1" duration-ms="100">
//!     <test name="T"><class name="com.example.C">
//!       <test-method name="m" status="PASS" duration-ms="40"/>
//!     </class></test>
//!   </suite>
//! </testng-results>"#;
//!
//! let suites = parse_testng_results(xml)?;
//! let markdown = render_summary(&summary_stats(&suites));
//! assert!(markdown.contains("**Passed:** 1"));
//! # Ok::<(), testng_report::parser::ParseError>(())
//! ```

pub mod annotations;
pub mod config;
pub mod github;
pub mod parser;
pub mod report;

// Re-export commonly used types
pub use annotations::{Annotation, annotations_for_failures};
pub use config::ActionConfig;
pub use github::StepSummary;
pub use parser::{ParseError, SuiteResult, TestCase, TestStatus, parse_testng_results};
pub use report::{
    SummaryStats, format_duration, render_detailed, render_summary, summary_stats,
};
