//! Demo: Basic Task Store Usage
//!
//! Walks through adding, querying, updating, saving, reloading and exporting
//! tasks with TaskStore.
//!
//! Run with: cargo run --example basic_usage

use chrono::Duration;
use eyre::Result;
use tasktracker::{Filter, FilterOp, Priority, TaskStore, now};

fn main() -> Result<()> {
    // Create a temporary directory for this demo
    let temp_dir = tempfile::tempdir()?;
    let data_file = temp_dir.path().join("tasks.json");
    let csv_file = temp_dir.path().join("tasks.csv");

    println!("TaskTracker Basic Usage Demo");
    println!("============================\n");

    let mut store = TaskStore::open(&data_file)?;
    println!("Store opened at {} ({} tasks)\n", data_file.display(), store.len());

    // ADD
    println!("1. ADD - Creating tasks...");
    let report = store
        .add("Write report", "Quarterly numbers", Priority::High.level(), now() + Duration::days(3))
        .id;
    store.add("Buy groceries", "Milk, bread, eggs", Priority::Medium.level(), now() + Duration::days(1));
    store.add("Call Mom", "Wish her happy birthday", Priority::Low.level(), now());
    for task in store.tasks() {
        println!("   {:>2} {}", task.id, task);
    }
    println!();

    // QUERY
    println!("2. QUERY - Search, filter and sort...");
    println!("   search(\"birthday\"):");
    for task in store.search("birthday") {
        println!("     - {}", task.title);
    }
    println!("   by priority:");
    for task in store.sort_by_priority() {
        println!("     - {}", task);
    }
    println!("   by due date:");
    for task in store.sort_by_due_date() {
        println!("     - {}", task);
    }
    println!("   pending with priority >= medium:");
    for task in store.list(&[Filter::completed(false), Filter::priority(FilterOp::Gte, 2)]) {
        println!("     - {}", task.title);
    }
    println!();

    // UPDATE
    println!("3. UPDATE - Completing the report...");
    store.toggle_completion(report);
    println!("   {}\n", store.get(report).map(|t| t.to_string()).unwrap_or_default());

    // SAVE / LOAD
    println!("4. SAVE and reload...");
    store.save()?;
    let reloaded = TaskStore::open(&data_file)?;
    println!("   Reloaded {} tasks, next id {}\n", reloaded.len(), reloaded.next_id());

    // EXPORT
    println!("5. EXPORT - Writing CSV...");
    reloaded.export_to_csv(&csv_file)?;
    println!("{}", std::fs::read_to_string(&csv_file)?);

    println!("Demo complete!");
    Ok(())
}
