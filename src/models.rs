// Data models for TaskTracker

use chrono::{DateTime, FixedOffset, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single to-do item
///
/// Field names are the on-disk names of the task file and must not change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub description: String,
    /// Nominally 1 (low) to 3 (high); any integer is stored as given
    pub priority: i64,
    pub due_date: DateTime<FixedOffset>,
    pub created_at: DateTime<FixedOffset>,
    pub completed: bool,
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.completed { "✓" } else { " " };
        write!(
            f,
            "[{}] {} (priority: {}, due: {})",
            mark,
            self.title,
            crate::export::priority_label(self.priority),
            self.due_date.format("%Y-%m-%d")
        )
    }
}

/// Known priority levels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Integer stored in `Task::priority`
    pub fn level(self) -> i64 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
        }
    }

    pub fn from_level(level: i64) -> Option<Self> {
        match level {
            1 => Some(Priority::Low),
            2 => Some(Priority::Medium),
            3 => Some(Priority::High),
            _ => None,
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    /// Accepts a level name (any case) or its number
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" | "1" => Ok(Priority::Low),
            "medium" | "2" => Ok(Priority::Medium),
            "high" | "3" => Ok(Priority::High),
            other => Err(format!("invalid priority: {} (expected low, medium, high or 1-3)", other)),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::export::priority_label(self.level()))
    }
}

/// Current local time with its UTC offset
pub fn now() -> DateTime<FixedOffset> {
    Local::now().fixed_offset()
}
