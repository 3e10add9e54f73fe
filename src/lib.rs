// TaskTracker - Single-user task list with JSON persistence and CSV export

pub mod config;
pub mod export;
pub mod filter;
pub mod models;
pub mod persist;
pub mod record;
pub mod store;

// Re-export main types for convenience
pub use config::Config;
pub use filter::{Filter, FilterOp};
pub use models::{Priority, Task, now};
pub use record::{Field, FieldValue};
pub use store::{SortKey, TaskStore};
