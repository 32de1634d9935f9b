use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier shared by tasks and diary entries. Values are allocated by
/// the stores from the wall clock (milliseconds since the epoch), so ids
/// created at runtime sort after the small ids used by seed data.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn parse(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "low" | "l" => Some(Priority::Low),
            "medium" | "med" | "m" => Some(Priority::Medium),
            "high" | "h" => Some(Priority::High),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: RecordId,

    pub title: String,

    pub completed: bool,

    #[serde(rename = "dueDate")]
    pub due: NaiveDate,

    pub priority: Priority,

    pub category: String,
}

/// Fields collected from an add form before the store assigns an id and
/// fills in the defaults (due today, medium priority, personal category).
#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    pub title: String,
    pub due: Option<NaiveDate>,
    pub priority: Option<Priority>,
    pub category: Option<String>,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            due: None,
            priority: None,
            category: None,
        }
    }
}
