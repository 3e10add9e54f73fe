// CSV export and display labels

use crate::models::{Priority, Task};
use chrono::{DateTime, FixedOffset};
use eyre::{Context, Result};
use std::borrow::Cow;
use std::path::Path;
use tracing::info;

/// Header row of the exported table
pub const CSV_HEADER: [&str; 7] = ["ID", "Title", "Description", "Priority", "Due Date", "Created At", "Completed"];

/// Timestamp layout used in exports
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Label for a stored priority value
///
/// Values outside the known levels are rendered as the raw integer.
pub fn priority_label(priority: i64) -> Cow<'static, str> {
    match Priority::from_level(priority) {
        Some(Priority::Low) => Cow::Borrowed("Low"),
        Some(Priority::Medium) => Cow::Borrowed("Medium"),
        Some(Priority::High) => Cow::Borrowed("High"),
        None => Cow::Owned(priority.to_string()),
    }
}

pub fn completed_label(completed: bool) -> &'static str {
    if completed { "Yes" } else { "No" }
}

/// Format a timestamp in the offset it already carries
pub fn format_timestamp(ts: &DateTime<FixedOffset>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

fn csv_row(task: &Task) -> [String; 7] {
    [
        task.id.to_string(),
        task.title.clone(),
        task.description.clone(),
        priority_label(task.priority).into_owned(),
        format_timestamp(&task.due_date),
        format_timestamp(&task.created_at),
        completed_label(task.completed).to_string(),
    ]
}

/// Write `tasks` as a CSV table to `path`, replacing any existing file
pub fn write_csv(path: &Path, tasks: &[Task]) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).wrap_err_with(|| format!("Failed to create CSV file {}", path.display()))?;

    writer.write_record(CSV_HEADER)?;
    for task in tasks {
        writer
            .write_record(csv_row(task))
            .wrap_err_with(|| format!("Failed to write task {} to CSV", task.id))?;
    }
    writer
        .flush()
        .wrap_err_with(|| format!("Failed to flush CSV file {}", path.display()))?;

    info!(file = ?path, count = tasks.len(), "Exported tasks to CSV");
    Ok(())
}
