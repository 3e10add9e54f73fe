use chrono::{DateTime, Duration, FixedOffset, Local, NaiveDate, TimeZone};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use eyre::{Result, eyre};
use std::fs;
use std::path::{Path, PathBuf};
use tasktracker::export::{completed_label, format_timestamp, priority_label};
use tasktracker::{Config, Filter, Priority, SortKey, Task, TaskStore, now};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tasktracker")]
#[command(about = "TaskTracker CLI - Keep a personal task list in a JSON file")]
#[command(version)]
struct Cli {
    /// Task file to use (overrides the config file)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Config file (default: <config dir>/tasktracker/config.yaml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new task
    Add {
        title: String,

        #[arg(short, long, default_value = "")]
        description: String,

        /// low, medium, high or 1-3
        #[arg(short, long, default_value_t = Priority::Medium)]
        priority: Priority,

        /// Due date as YYYY-MM-DD (default: tomorrow)
        #[arg(long, value_parser = parse_due_date)]
        due: Option<DateTime<FixedOffset>>,
    },

    /// Show one task in detail
    Show { id: u64 },

    /// List tasks
    List {
        /// Only tasks not yet completed
        #[arg(long, conflicts_with = "done")]
        pending: bool,

        /// Only completed tasks
        #[arg(long)]
        done: bool,

        #[arg(long, value_enum, default_value_t = SortArg::Id)]
        sort: SortArg,
    },

    /// Search titles and descriptions (case-insensitive)
    Search { keyword: String },

    /// Change fields of a task; omitted fields keep their value
    Edit {
        id: u64,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(short, long)]
        priority: Option<Priority>,

        #[arg(long, value_parser = parse_due_date)]
        due: Option<DateTime<FixedOffset>>,

        #[arg(long)]
        completed: Option<bool>,
    },

    /// Flip a task between pending and completed
    Toggle { id: u64 },

    /// Delete a task
    Delete { id: u64 },

    /// Export all tasks as CSV
    Export {
        /// Target file (default: export_file from config)
        path: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    Id,
    Priority,
    Due,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Id => SortKey::Id,
            SortArg::Priority => SortKey::Priority,
            SortArg::Due => SortKey::DueDate,
        }
    }
}

/// Parse YYYY-MM-DD as local midnight
fn parse_due_date(s: &str) -> Result<DateTime<FixedOffset>, String> {
    let date = NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| format!("invalid date format: {} (use YYYY-MM-DD)", s))?;
    let midnight = date.and_hms_opt(0, 0, 0).ok_or_else(|| format!("invalid date: {}", s))?;

    Local
        .from_local_datetime(&midnight)
        .earliest()
        .map(|dt| dt.fixed_offset())
        .ok_or_else(|| format!("date does not exist in local time zone: {}", s))
}

fn main() -> Result<()> {
    // Setup tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if cli.no_color || !config.color {
        colored::control::set_override(false);
    }

    let data_file = cli.file.clone().unwrap_or_else(|| config.data_file.clone());
    debug!(file = ?data_file, "Opening task store");
    let mut store = TaskStore::open(&data_file)?;

    match cli.command {
        Commands::Add {
            title,
            description,
            priority,
            due,
        } => {
            let due = due.unwrap_or_else(|| now() + Duration::days(1));
            let task = store.add(title, description, priority.level(), due);
            println!("Added task {}", task.id.to_string().bold());
            save(&store)?;
        }
        Commands::Show { id } => {
            let task = store.get(id).ok_or_else(|| eyre!("Task {} not found", id))?;
            print_details(task);
        }
        Commands::List { pending, done, sort } => {
            let filters: Vec<Filter> = match (pending, done) {
                (true, _) => vec![Filter::completed(false)],
                (_, true) => vec![Filter::completed(true)],
                _ => Vec::new(),
            };
            print_tasks(&store.list_sorted(&filters, sort.into()));
        }
        Commands::Search { keyword } => {
            print_tasks(&store.search(&keyword));
        }
        Commands::Edit {
            id,
            title,
            description,
            priority,
            due,
            completed,
        } => {
            let current = store.get(id).ok_or_else(|| eyre!("Task {} not found", id))?.clone();
            store.update(
                id,
                title.unwrap_or(current.title),
                description.unwrap_or(current.description),
                priority.map(Priority::level).unwrap_or(current.priority),
                due.unwrap_or(current.due_date),
                completed.unwrap_or(current.completed),
            );
            println!("Updated task {}", id.to_string().bold());
            save(&store)?;
        }
        Commands::Toggle { id } => {
            if !store.toggle_completion(id) {
                return Err(eyre!("Task {} not found", id));
            }
            let state = if store.get(id).is_some_and(|t| t.completed) {
                "completed".green()
            } else {
                "pending".yellow()
            };
            println!("Task {} is now {}", id.to_string().bold(), state);
            save(&store)?;
        }
        Commands::Delete { id } => {
            if !store.delete(id) {
                return Err(eyre!("Task {} not found", id));
            }
            println!("Deleted task {}", id.to_string().bold());
            save(&store)?;
        }
        Commands::Export { path } => {
            let path = path.unwrap_or(config.export_file);
            store.export_to_csv(&path)?;
            println!("Exported {} tasks to {}", store.len(), path.display());
        }
    }

    Ok(())
}

/// Save back to the store's own file, creating its directory on first use
fn save(store: &TaskStore) -> Result<()> {
    if let Some(parent) = store.path().and_then(Path::parent).filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    store.save()
}

fn print_tasks(tasks: &[&Task]) {
    if tasks.is_empty() {
        println!("{}", "No tasks".dimmed());
        return;
    }
    for task in tasks {
        let line = format!("{:>4}  {}", task.id, task);
        if task.completed {
            println!("{}", line.green());
        } else {
            println!("{}", line);
        }
    }
}

fn print_details(task: &Task) {
    println!("{} {}", "ID:".bold(), task.id);
    println!("{} {}", "Title:".bold(), task.title);
    println!("{} {}", "Description:".bold(), task.description);
    println!("{} {}", "Priority:".bold(), priority_label(task.priority));
    println!("{} {}", "Due:".bold(), format_timestamp(&task.due_date));
    println!("{} {}", "Created:".bold(), format_timestamp(&task.created_at));
    println!("{} {}", "Completed:".bold(), completed_label(task.completed));
}
