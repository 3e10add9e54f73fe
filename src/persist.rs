// JSON task file operations

use crate::models::Task;
use eyre::{Context, Result};
use fs2::FileExt;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;
use tracing::{debug, info, warn};

/// Write all tasks to `path` as a pretty-printed JSON array
///
/// Existing content is replaced. The write is not atomic: a failure part way
/// through can leave a truncated file behind.
pub fn write_tasks(path: &Path, tasks: &[Task]) -> Result<()> {
    let json = serde_json::to_string_pretty(tasks).context("Failed to serialize tasks")?;

    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(false)
        .open(path)
        .wrap_err_with(|| format!("Failed to open task file {}", path.display()))?;

    // Acquire exclusive lock before truncating
    file.lock_exclusive().context("Failed to acquire file lock")?;

    file.set_len(0)?;
    file.write_all(json.as_bytes())
        .wrap_err_with(|| format!("Failed to write task file {}", path.display()))?;
    file.sync_all()?; // Ensure data is flushed to disk

    // Lock is automatically released when file is dropped
    info!(file = ?path, count = tasks.len(), "Saved tasks");
    Ok(())
}

/// Read the task array stored at `path`
///
/// Returns `Ok(None)` when the file does not exist. A file holding only
/// whitespace reads as an empty task list.
pub fn read_tasks(path: &Path) -> Result<Option<Vec<Task>>> {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(file = ?path, "Task file does not exist yet");
            return Ok(None);
        }
        Err(e) => {
            return Err(e).wrap_err_with(|| format!("Failed to read task file {}", path.display()));
        }
    };

    if content.trim().is_empty() {
        warn!(file = ?path, "Task file is empty, treating as no tasks");
        return Ok(Some(Vec::new()));
    }

    let tasks: Vec<Task> = serde_json::from_str(&content)
        .wrap_err_with(|| format!("Malformed task file {}", path.display()))?;

    info!(file = ?path, count = tasks.len(), "Loaded tasks");
    Ok(Some(tasks))
}
