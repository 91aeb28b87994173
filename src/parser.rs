//! TestNG XML result parsing.
//!
//! Normalizes a `testng-results` document into a list of [`SuiteResult`]s.
//! TestNG serializers are inconsistent about whether a container holds one
//! child element or several; an event-driven walk sidesteps that entirely,
//! every `<suite>`, `<test>`, `<class>` and `<test-method>` is visited in
//! document order regardless of how many siblings it has.
//!
//! Shape anomalies (missing attributes, unknown status values) are tolerated
//! with documented defaults or silent exclusion. Only XML that cannot be
//! parsed at all is an error.

use std::fmt;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use serde::{Deserialize, Serialize};

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Errors raised while reading a TestNG result document.
///
/// All variants mean the input is not well-formed XML; structural oddities
/// inside well-formed XML never produce an error.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Malformed attribute: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),
}

/// Outcome of a single test method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TestStatus {
    Pass,
    Fail,
    Skip,
}

impl TestStatus {
    /// Parse a status attribute, case-insensitively. Anything other than
    /// PASS/FAIL/SKIP is `None`, which drops the method during normalization.
    pub fn from_attr(value: &str) -> Option<Self> {
        match value.to_ascii_uppercase().as_str() {
            "PASS" => Some(Self::Pass),
            "FAIL" => Some(Self::Fail),
            "SKIP" => Some(Self::Skip),
            _ => None,
        }
    }

    /// The uppercase token used in rendered output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
            Self::Skip => "SKIP",
        }
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single normalized test method.
///
/// The failure-only fields (`failure_message`, `stack_trace`, `expected`,
/// `actual`) are populated only when `status` is [`TestStatus::Fail`] and an
/// `<exception>` block was present. `groups` is `None` when the attribute was
/// absent or empty, never an empty vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    pub name: String,
    pub class_name: String,
    pub duration_ms: u64,
    pub status: TestStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_trace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<String>>,
}

/// One `<suite>` element: its declared name and wall-clock duration plus all
/// test cases found beneath it, in document order.
///
/// The declared duration is independent of the sum of child test durations;
/// both figures are carried through to reporting unreconciled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteResult {
    pub suite_name: String,
    pub duration_ms: u64,
    pub test_cases: Vec<TestCase>,
}

/// Which `<exception>` child element text is currently being collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextSlot {
    Message,
    StackTrace,
    Expected,
    Actual,
}

/// A `<test-method>` whose closing tag has not been seen yet. Only created
/// for methods with a recognized status; everything else is skipped outright.
#[derive(Debug)]
struct PendingMethod {
    name: String,
    duration_ms: u64,
    status: TestStatus,
    groups: Option<Vec<String>>,
    failure_message: Option<String>,
    stack_trace: Option<String>,
    expected: Option<String>,
    actual: Option<String>,
}

impl PendingMethod {
    fn from_tag(tag: &BytesStart<'_>, status: TestStatus) -> ParseResult<Self> {
        let groups = attr_value(tag, b"groups")?
            .filter(|g| !g.is_empty())
            .map(|g| g.split(',').map(str::to_string).collect());

        Ok(Self {
            name: attr_value(tag, b"name")?.unwrap_or_else(|| "UnnamedTest".to_string()),
            duration_ms: parse_duration(attr_value(tag, b"duration-ms")?),
            status,
            groups,
            failure_message: None,
            stack_trace: None,
            expected: None,
            actual: None,
        })
    }

    fn finish(self, class_name: &str) -> TestCase {
        TestCase {
            name: self.name,
            class_name: class_name.to_string(),
            duration_ms: self.duration_ms,
            status: self.status,
            failure_message: self.failure_message,
            stack_trace: self.stack_trace,
            expected: self.expected,
            actual: self.actual,
            groups: self.groups,
        }
    }

    fn slot_mut(&mut self, slot: TextSlot) -> &mut Option<String> {
        match slot {
            TextSlot::Message => &mut self.failure_message,
            TextSlot::StackTrace => &mut self.stack_trace,
            TextSlot::Expected => &mut self.expected,
            TextSlot::Actual => &mut self.actual,
        }
    }
}

#[derive(Default)]
struct DocumentWalker {
    suites: Vec<SuiteResult>,
    suite: Option<SuiteResult>,
    class_name: Option<String>,
    method: Option<PendingMethod>,
    in_exception: bool,
    text_slot: Option<TextSlot>,
}

impl DocumentWalker {
    fn open(&mut self, tag: &BytesStart<'_>) -> ParseResult<()> {
        match tag.name().as_ref() {
            b"suite" => {
                self.suite = Some(SuiteResult {
                    suite_name: attr_value(tag, b"name")?
                        .unwrap_or_else(|| "Unnamed Suite".to_string()),
                    duration_ms: parse_duration(attr_value(tag, b"duration-ms")?),
                    test_cases: Vec::new(),
                });
            }
            b"class" => {
                self.class_name = Some(
                    attr_value(tag, b"name")?.unwrap_or_else(|| "UnnamedClass".to_string()),
                );
            }
            b"test-method" => {
                // Methods with a missing or unrecognized status are dropped:
                // no pending method means their children are ignored too.
                let status = attr_value(tag, b"status")?
                    .as_deref()
                    .and_then(TestStatus::from_attr);
                if let Some(status) = status {
                    self.method = Some(PendingMethod::from_tag(tag, status)?);
                }
            }
            b"exception" => {
                // Exception details are only meaningful on failures; a SKIP
                // method can carry one (the skip cause) but it is not kept.
                if let Some(method) = &mut self.method
                    && method.status == TestStatus::Fail
                {
                    self.in_exception = true;
                    method.failure_message = Some(String::new());
                    method.stack_trace = Some(String::new());
                }
            }
            b"message" if self.in_exception => self.text_slot = Some(TextSlot::Message),
            b"full-stacktrace" if self.in_exception => {
                self.text_slot = Some(TextSlot::StackTrace);
            }
            b"expected" if self.in_exception => self.start_slot(TextSlot::Expected),
            b"actual" if self.in_exception => self.start_slot(TextSlot::Actual),
            _ => {}
        }
        Ok(())
    }

    fn close(&mut self, name: &[u8]) {
        match name {
            b"suite" => {
                if let Some(suite) = self.suite.take() {
                    self.suites.push(suite);
                }
            }
            b"class" => self.class_name = None,
            b"test-method" => self.finish_method(),
            b"exception" => self.in_exception = false,
            b"message" | b"full-stacktrace" | b"expected" | b"actual" => self.text_slot = None,
            _ => {}
        }
    }

    /// Expected/actual are only set when their element exists, so presence of
    /// the tag itself materializes the field (as an empty string until text
    /// arrives).
    fn start_slot(&mut self, slot: TextSlot) {
        if let Some(method) = &mut self.method {
            method.slot_mut(slot).get_or_insert_with(String::new);
        }
        self.text_slot = Some(slot);
    }

    fn text(&mut self, value: &str) {
        if let (Some(slot), Some(method)) = (self.text_slot, &mut self.method) {
            method
                .slot_mut(slot)
                .get_or_insert_with(String::new)
                .push_str(value);
        }
    }

    fn finish_method(&mut self) {
        if let Some(method) = self.method.take() {
            let class_name = self.class_name.as_deref().unwrap_or("UnnamedClass");
            let test_case = method.finish(class_name);
            if let Some(suite) = &mut self.suite {
                suite.test_cases.push(test_case);
            }
        }
    }
}

/// Parse a TestNG result document into its suites.
///
/// Returns an error only when the input is not well-formed XML. A well-formed
/// document with none of the expected elements yields an empty list.
pub fn parse_testng_results(xml: &str) -> ParseResult<Vec<SuiteResult>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut walker = DocumentWalker::default();
    loop {
        match reader.read_event()? {
            Event::Start(tag) => walker.open(&tag)?,
            Event::Empty(tag) => {
                walker.open(&tag)?;
                walker.close(tag.name().as_ref());
            }
            Event::End(tag) => walker.close(tag.name().as_ref()),
            Event::Text(text) => {
                let text = text.unescape()?;
                walker.text(&text);
            }
            Event::CData(cdata) => {
                let text = String::from_utf8_lossy(&cdata.into_inner()).into_owned();
                walker.text(&text);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(walker.suites)
}

fn attr_value(tag: &BytesStart<'_>, name: &[u8]) -> ParseResult<Option<String>> {
    for attr in tag.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == name {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// Explicit default-on-failure numeric parsing: a missing or non-numeric
/// duration attribute counts as zero.
fn parse_duration(value: Option<String>) -> u64 {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(0)
}
