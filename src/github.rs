//! GitHub Actions output surfaces.
//!
//! Two collaborators live here: the step-summary sink (a text buffer flushed
//! to the `GITHUB_STEP_SUMMARY` file exactly once per run) and the
//! workflow-command emitter that turns [`Annotation`]s into `::error` lines
//! on stdout.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::annotations::{Annotation, AnnotationLevel};

/// Buffered markdown destined for the GitHub step summary.
///
/// Content is accumulated with [`add_raw`](Self::add_raw) and committed once
/// with [`write`](Self::write), which appends to the summary file. Without a
/// summary file (running outside Actions) the buffer goes to stdout instead.
#[derive(Debug, Default)]
pub struct StepSummary {
    buffer: String,
    path: Option<PathBuf>,
}

impl StepSummary {
    /// Resolve the summary file from the `GITHUB_STEP_SUMMARY` variable.
    pub fn from_env() -> Self {
        Self {
            buffer: String::new(),
            path: std::env::var_os("GITHUB_STEP_SUMMARY").map(PathBuf::from),
        }
    }

    /// A sink writing to the given file, or to stdout when `None`.
    pub fn new(path: Option<PathBuf>) -> Self {
        Self {
            buffer: String::new(),
            path,
        }
    }

    /// Append raw markdown to the buffer.
    pub fn add_raw(&mut self, content: &str) {
        self.buffer.push_str(content);
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Commit the buffered content. Consumes the sink so a run can only
    /// flush once.
    pub fn write(self) -> Result<()> {
        match &self.path {
            Some(path) => {
                let mut file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .with_context(|| {
                        format!("Failed to open step summary file: {}", path.display())
                    })?;
                file.write_all(self.buffer.as_bytes())
                    .with_context(|| {
                        format!("Failed to write step summary file: {}", path.display())
                    })?;
                tracing::info!("Step summary written to: {}", path.display());
            }
            None => {
                tracing::debug!("GITHUB_STEP_SUMMARY not set; printing summary to stdout");
                print!("{}", self.buffer);
            }
        }
        Ok(())
    }
}

/// Print one annotation as a GitHub workflow command.
pub fn emit_annotation(annotation: &Annotation) {
    let command = match annotation.level {
        AnnotationLevel::Failure => "error",
    };
    println!(
        "::{} title={}::{}",
        command,
        escape_property(&annotation.title),
        escape_data(&annotation.message)
    );
}

/// Escaping for workflow command data (the part after `::`).
fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Escaping for workflow command properties, which additionally reserve the
/// `:` and `,` separators.
fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_data() {
        assert_eq!(escape_data("plain"), "plain");
        assert_eq!(escape_data("a\nb"), "a%0Ab");
        assert_eq!(escape_data("a\r\nb"), "a%0D%0Ab");
        assert_eq!(escape_data("100%"), "100%25");
        // Percent escapes first so the escapes themselves survive.
        assert_eq!(escape_data("%0A"), "%250A");
    }

    #[test]
    fn test_escape_property() {
        assert_eq!(escape_property("Test Failure: a.B.c"), "Test Failure%3A a.B.c");
        assert_eq!(escape_property("x,y"), "x%2Cy");
        assert_eq!(escape_property("a\nb:c"), "a%0Ab%3Ac");
    }

    #[test]
    fn step_summary_appends_to_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.md");
        std::fs::write(&path, "existing\n").unwrap();

        let mut summary = StepSummary::new(Some(path.clone()));
        summary.add_raw("## TestNG Summary\n");
        summary.add_raw("more\n");
        summary.write().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "existing\n## TestNG Summary\nmore\n");
    }

    #[test]
    fn step_summary_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.md");

        let mut summary = StepSummary::new(Some(path.clone()));
        summary.add_raw("content");
        assert!(!summary.is_empty());
        summary.write().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "content");
    }
}
