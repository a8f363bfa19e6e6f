//! Task model types and the persisted payload document.

use serde::{Deserialize, Serialize};

/// Task priority levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
    /// Low priority.
    Low,
    /// Normal priority (default).
    #[default]
    Normal,
    /// High priority.
    High,
}

impl TaskPriority {
    /// Parse a priority from free text, case-insensitively.
    ///
    /// Unrecognized values fall back to [`TaskPriority::Normal`]. This
    /// leniency is deliberate: assistant responses may spell priorities in
    /// any case or invent values, and neither should fail task creation.
    #[must_use]
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "HIGH" => Self::High,
            "LOW" => Self::Low,
            _ => Self::Normal,
        }
    }

    /// Get the wire-format string for this priority.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Normal => "NORMAL",
            Self::High => "HIGH",
        }
    }
}

impl std::fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sync state of a task relative to an external sync collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SyncState {
    /// Task exists only locally (default for new tasks).
    #[default]
    LocalOnly,
    /// Task has been pushed successfully.
    Synced,
    /// Task changed locally and needs to be pushed again.
    PendingRetry,
    /// The last push attempt failed terminally.
    Failed,
}

/// A task record.
///
/// Invariant: `title` is never empty or all-whitespace in a stored record;
/// the store silently drops blank titles before they get here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskItem {
    /// Opaque unique identifier, generated at creation, immutable.
    pub id: String,
    /// Task title, non-blank after trimming.
    pub title: String,
    /// Priority level.
    pub priority: TaskPriority,
    /// Whether the task is completed.
    pub completed: bool,
    /// Wall-clock milliseconds of the last mutation.
    pub updated_at_epoch_ms: i64,
    /// Sync state relative to the external sync collaborator.
    pub sync_state: SyncState,
}

/// The self-contained document persisted to both storage slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredTaskList {
    /// Ordered task records.
    pub tasks: Vec<TaskItem>,
}

/// Current wall-clock time in epoch milliseconds.
#[must_use]
pub fn now_epoch_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
