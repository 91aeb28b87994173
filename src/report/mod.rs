//! Report rendering and output generation.
//!
//! This module turns parsed suites into markdown reports (a flat summary and
//! an optional detailed breakdown) plus a colored console recap.

pub mod detailed;
pub mod summary;

pub use detailed::render_detailed;
pub use summary::{PackageStats, SummaryStats, render_summary, summary_stats};

/// Format a millisecond count as a fixed-width `HH:MM:SS:mmm` string.
///
/// Fields are computed by successive integer division, so anything past the
/// millisecond is truncated toward zero.
pub fn format_duration(ms: u64) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;
    format!("{hours:02}:{minutes:02}:{seconds:02}:{millis:03}")
}

/// Split a dotted class name into its package and simple name.
///
/// The package is the text before the last `.`; a name with no dots (or an
/// empty text before the dot) falls into the `default` package.
pub fn split_class_name(class_name: &str) -> (&str, &str) {
    match class_name.rfind('.') {
        Some(idx) if idx > 0 => (&class_name[..idx], &class_name[idx + 1..]),
        Some(idx) => ("default", &class_name[idx + 1..]),
        None => ("default", class_name),
    }
}

/// Prints a recap of the aggregated results to the console.
///
/// Displays pass/fail/skip counts with colored output and a closing status
/// line based on the results.
pub fn print_summary(stats: &SummaryStats) {
    println!();
    println!("Test Results:");
    println!("  Total:   {}", stats.total);
    println!("  Passed:  {}", console::style(stats.passed).green());
    println!("  Failed:  {}", console::style(stats.failed).red());
    println!("  Skipped: {}", console::style(stats.skipped).yellow());
    println!("  Duration: {}", format_duration(stats.duration_ms));

    println!();
    if stats.total == 0 {
        println!("{}", console::style("No test results found.").yellow());
    } else if stats.failed == 0 {
        println!("{}", console::style("All tests passed!").green().bold());
    } else {
        println!("{}", console::style("Some tests failed.").red().bold());
    }
}
