//! Extraction and validation of task lists from assistant responses.
//!
//! Assistant output is frequently wrapped in explanatory prose or a fenced
//! markdown block; the parser looks for a ```json fence first and falls back
//! to the whole response. Decode failures never escape as errors; they
//! become the `error` slot of the report.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// An assistant-proposed task, not yet validated into a [`crate::tasks::TaskItem`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedTask {
    /// Proposed title.
    pub title: String,
    /// Free-text priority; unrecognized values map to NORMAL downstream.
    #[serde(default = "default_priority")]
    pub priority: String,
}

fn default_priority() -> String {
    "NORMAL".to_string()
}

/// Shape of the structured document the assistant is asked to return.
#[derive(Debug, Deserialize)]
struct ParsedTasksResponse {
    tasks: Vec<ParsedTask>,
}

/// Why a response failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseError {
    /// Human-readable failure reason, never blank.
    pub reason: String,
}

/// Result of parsing an assistant response.
///
/// `tasks` is empty whenever `error` is set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParseReport {
    /// Extracted tasks, empty on failure.
    pub tasks: Vec<ParsedTask>,
    /// Failure reason, if any.
    pub error: Option<ParseError>,
}

static JSON_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"```json\s*([\s\S]*?)\s*```").expect("fence regex is valid")
});

/// Parser for structured assistant responses.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuredResponseParser;

impl StructuredResponseParser {
    /// Create a parser.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Parse a task list out of `response`.
    ///
    /// Never fails outward: malformed input yields an empty task list and a
    /// non-empty reason.
    #[must_use]
    pub fn parse(&self, response: &str) -> ParseReport {
        let candidate = extract_json_fence(response).unwrap_or(response);

        match serde_json::from_str::<ParsedTasksResponse>(candidate) {
            Ok(parsed) => ParseReport { tasks: parsed.tasks, error: None },
            Err(e) => ParseReport {
                tasks: Vec::new(),
                error: Some(ParseError { reason: format!("Invalid structured response: {e}") }),
            },
        }
    }

    /// Parse and return only the tasks, discarding the failure reason.
    #[must_use]
    pub fn parse_tasks(&self, response: &str) -> Vec<ParsedTask> {
        self.parse(response).tasks
    }
}

/// Extract the inner text of the first ```json fenced block, if any.
fn extract_json_fence(text: &str) -> Option<&str> {
    JSON_FENCE.captures(text).and_then(|caps| caps.get(1)).map(|m| m.as_str())
}
