//! Action configuration.
//!
//! The tool is configured the way a GitHub Action is: through `INPUT_*`
//! environment variables. Every option has a default, so an empty environment
//! yields a usable configuration. Boolean options compare case-insensitively
//! against the literal string `"true"`.

/// Resolved configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionConfig {
    /// Glob pattern for locating TestNG result files.
    pub report_paths: String,
    /// Whether to render the summary report.
    pub summary_report: bool,
    /// Whether to render the detailed report.
    pub detailed_report: bool,
    /// Display label, logged and otherwise passed through.
    pub check_name: String,
    /// Whether zero matched files is fatal.
    pub fail_if_empty: bool,
}

impl Default for ActionConfig {
    fn default() -> Self {
        Self {
            report_paths: "**/testng-results.xml".to_string(),
            summary_report: true,
            detailed_report: false,
            check_name: "TestNG Test Report".to_string(),
            fail_if_empty: true,
        }
    }
}

impl ActionConfig {
    /// Build a configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from any key/value lookup. Missing keys fall
    /// back to the defaults.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            report_paths: get("INPUT_REPORT_PATHS")
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.report_paths),
            summary_report: parse_bool(get("INPUT_SUMMARY_REPORT"), defaults.summary_report),
            detailed_report: parse_bool(get("INPUT_DETAILED_REPORT"), defaults.detailed_report),
            check_name: get("INPUT_CHECK_NAME")
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.check_name),
            fail_if_empty: parse_bool(get("INPUT_FAIL_IF_EMPTY"), defaults.fail_if_empty),
        }
    }
}

fn parse_bool(value: Option<String>, default: bool) -> bool {
    match value {
        Some(v) if !v.is_empty() => v.eq_ignore_ascii_case("true"),
        _ => default,
    }
}
