// In-memory task store with JSON file persistence

use crate::export;
use crate::filter::{Filter, contains_ignore_case};
use crate::models::{Task, now};
use crate::persist;
use chrono::{DateTime, FixedOffset};
use eyre::{Context, Result, eyre};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Orderings offered by [`TaskStore::sorted`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Insertion order
    #[default]
    Id,
    /// Highest priority first
    Priority,
    /// Soonest due date first
    DueDate,
}

/// Owner of all tasks and of id issuance
///
/// Tasks are kept in insertion order. Queries and sorts return new sequences
/// of references and never reorder the store itself.
#[derive(Debug, Clone)]
pub struct TaskStore {
    tasks: Vec<Task>,
    next_id: u64,
    path: Option<PathBuf>,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    /// Largest id accepted from a task file
    pub const MAX_ID: u64 = i64::MAX as u64;

    /// Create an empty store
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 1,
            path: None,
        }
    }

    /// Open the store backed by `path`
    ///
    /// A missing file gives an empty store; `save()` will create it.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut store = Self::new();
        store.load_from_file(path)?;
        store.path = Some(path.to_path_buf());
        Ok(store)
    }

    /// Path this store was opened from, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// All tasks in insertion order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Id the next added task will receive
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    // ========================================================================
    // CRUD
    // ========================================================================

    /// Add a new task and return it
    pub fn add(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        priority: i64,
        due_date: DateTime<FixedOffset>,
    ) -> &Task {
        let task = Task {
            id: self.next_id,
            title: title.into(),
            description: description.into(),
            priority,
            due_date,
            created_at: now(),
            completed: false,
        };
        // Loaded ids are capped at MAX_ID, so the counter would need 2^63 adds to overflow
        self.next_id += 1;

        debug!(id = task.id, title = %task.title, "add: created task");
        self.tasks.push(task);
        &self.tasks[self.tasks.len() - 1]
    }

    /// Get a task by id
    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn get_mut(&mut self, id: u64) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// Remove a task; returns whether it existed
    pub fn delete(&mut self, id: u64) -> bool {
        match self.tasks.iter().position(|t| t.id == id) {
            Some(index) => {
                self.tasks.remove(index);
                debug!(id, "delete: removed task");
                true
            }
            None => false,
        }
    }

    /// Replace every mutable field of a task; returns whether it existed
    ///
    /// `id` and `created_at` are never changed.
    pub fn update(
        &mut self,
        id: u64,
        title: impl Into<String>,
        description: impl Into<String>,
        priority: i64,
        due_date: DateTime<FixedOffset>,
        completed: bool,
    ) -> bool {
        let Some(task) = self.get_mut(id) else {
            return false;
        };

        task.title = title.into();
        task.description = description.into();
        task.priority = priority;
        task.due_date = due_date;
        task.completed = completed;
        debug!(id, "update: replaced task fields");
        true
    }

    /// Flip the completion flag; returns whether the task existed
    pub fn toggle_completion(&mut self, id: u64) -> bool {
        match self.get_mut(id) {
            Some(task) => {
                task.completed = !task.completed;
                debug!(id, completed = task.completed, "toggle_completion");
                true
            }
            None => false,
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Tasks whose title or description contains `keyword`, ignoring case
    pub fn search(&self, keyword: &str) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| contains_ignore_case(&t.title, keyword) || contains_ignore_case(&t.description, keyword))
            .collect()
    }

    /// Tasks with the given completion status
    pub fn filter_by_status(&self, completed: bool) -> Vec<&Task> {
        self.list(&[Filter::completed(completed)])
    }

    /// Tasks matching every filter, in store order
    pub fn list(&self, filters: &[Filter]) -> Vec<&Task> {
        self.list_sorted(filters, SortKey::Id)
    }

    /// Tasks matching every filter, ordered by `key`
    pub fn list_sorted(&self, filters: &[Filter], key: SortKey) -> Vec<&Task> {
        self.sorted(key)
            .into_iter()
            .filter(|t| filters.iter().all(|f| f.matches(t)))
            .collect()
    }

    /// All tasks, highest priority first
    pub fn sort_by_priority(&self) -> Vec<&Task> {
        let mut sorted: Vec<&Task> = self.tasks.iter().collect();
        // sort_by is stable, ties keep store order
        sorted.sort_by(|a, b| b.priority.cmp(&a.priority));
        sorted
    }

    /// All tasks, soonest due date first
    pub fn sort_by_due_date(&self) -> Vec<&Task> {
        let mut sorted: Vec<&Task> = self.tasks.iter().collect();
        sorted.sort_by(|a, b| a.due_date.cmp(&b.due_date));
        sorted
    }

    pub fn sorted(&self, key: SortKey) -> Vec<&Task> {
        match key {
            SortKey::Id => self.tasks.iter().collect(),
            SortKey::Priority => self.sort_by_priority(),
            SortKey::DueDate => self.sort_by_due_date(),
        }
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Write all tasks to `path` as JSON, overwriting it
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        persist::write_tasks(path.as_ref(), &self.tasks)
    }

    /// Save to the path the store was opened from
    pub fn save(&self) -> Result<()> {
        let path = self
            .path
            .as_deref()
            .ok_or_else(|| eyre!("Task store has no file path to save to"))?;
        self.save_to_file(path)
    }

    /// Replace the in-memory tasks with the content of `path`
    ///
    /// A missing file is not an error and changes nothing. On any failure the
    /// store is left as it was.
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let Some(tasks) = persist::read_tasks(path)? else {
            info!(file = ?path, "No task file found, starting empty");
            return Ok(());
        };

        Self::validate_ids(&tasks).wrap_err_with(|| format!("Malformed task file {}", path.display()))?;

        // next_id never moves backwards, even if the file holds lower ids
        if let Some(max_id) = tasks.iter().map(|t| t.id).max() {
            let after_max = max_id
                .checked_add(1)
                .ok_or_else(|| eyre!("Task id {} leaves no room for new ids", max_id))
                .wrap_err_with(|| format!("Malformed task file {}", path.display()))?;
            self.next_id = self.next_id.max(after_max);
        }
        self.tasks = tasks;

        debug!(count = self.tasks.len(), next_id = self.next_id, "load_from_file: replaced tasks");
        Ok(())
    }

    /// Write all tasks to `path` as CSV
    pub fn export_to_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        export::write_csv(path.as_ref(), &self.tasks)
    }

    fn validate_ids(tasks: &[Task]) -> Result<()> {
        let mut seen = HashSet::with_capacity(tasks.len());
        for task in tasks {
            if task.id > Self::MAX_ID {
                return Err(eyre!("Task id {} leaves no room for new ids", task.id));
            }
            if !seen.insert(task.id) {
                return Err(eyre!("Duplicate task id: {}", task.id));
            }
        }
        Ok(())
    }
}
