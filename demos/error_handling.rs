//! Error handling example for timelord-rs
//!
//! This example demonstrates how fatal errors, misses and degraded fields
//! show up through the API.

use chrono::Utc;
use std::sync::Arc;
use timelord_core::loader::{open_index, read_index};
use timelord_core::{
    enrich, resolve, resolve_outcomes, DataPaths, DispatchOrder, FlagIcons, LoadOptions,
    LookupTables, Outcome, Result, TimelordError,
};

#[tokio::main]
async fn main() -> Result<()> {
    println!("=== timelord-rs Error Handling Example ===\n");

    // Example 1: Missing datasets are fatal
    println!("--- Example 1: Opening a data directory without datasets ---");
    let empty = DataPaths::under("/nonexistent/timelord");
    match open_index(&empty, LoadOptions::default()) {
        Ok(_) => println!("  unexpectedly opened an index"),
        Err(TimelordError::NotFound(msg)) => println!("  ✓ NotFound: {msg}"),
        Err(e) => println!("  ✗ other error: {e}"),
    }
    println!();

    // Example 2: A file that is not an index
    println!("--- Example 2: Reading a corrupt index file ---");
    let bogus = std::env::temp_dir().join("timelord-demo-bogus.idx");
    std::fs::write(&bogus, b"not an index")?;
    match read_index(&bogus) {
        Err(TimelordError::IndexCorrupt { path, reason }) => {
            println!("  ✓ IndexCorrupt at {}: {reason}", path.display())
        }
        Err(e) => println!("  ✗ other error: {e}"),
        Ok(_) => println!("  unexpectedly decoded"),
    }
    let _ = std::fs::remove_file(&bogus);
    println!();

    let root = std::env::args().nth(1).unwrap_or_else(|| ".".to_string());
    let paths = DataPaths::under(&root);
    let index = match open_index(&paths, LoadOptions::default()) {
        Ok(index) => index,
        Err(e) => {
            eprintln!("✗ Failed to open index under {root}: {e}");
            return Err(e);
        }
    };
    let tables = LookupTables::load(&paths)?;

    // Example 3: Misses are ordinary outcomes
    println!("--- Example 3: Terms that match nothing ---");
    for term in ["", "   ", "qqqqqqqq", "nonexistentcityxyz"] {
        match resolve(term, &index) {
            Some(city) => println!("  '{term}' -> {}", city.name),
            None => println!("  '{term}' -> no match"),
        }
    }
    println!();

    // Example 4: Per-term outcomes of a batch
    println!("--- Example 4: Outcomes of a batch ---");
    let terms = ["toronto", "nonexistentcityxyz"];
    for o in resolve_outcomes(&terms, Arc::new(index), DispatchOrder::Input).await {
        match o.outcome {
            Outcome::Hit(city) => println!("  [{}] '{}' -> {}", o.position, o.term, city.name),
            Outcome::Miss => println!("  [{}] '{}' -> miss", o.position, o.term),
            Outcome::Failed(reason) => println!("  [{}] '{}' -> failed: {reason}", o.position, o.term),
        }
    }
    println!();

    // Example 5: Degraded enrichment
    println!("--- Example 5: Unknown country and timezone ---");
    let index = open_index(&paths, LoadOptions::default())?;
    if let Some(mut city) = resolve("toronto", &index) {
        city.country_id = "ZZ".into();
        city.timezone = "Not/AZone".into();
        let result = enrich(&city, &tables, Utc::now(), &FlagIcons::new(&paths.flags_dir));
        println!("  title:    {}", result.title());
        println!("  subtitle: {}", result.subtitle());
        println!("  icon:     {}", result.icon);
    }

    println!("\n=== Example completed successfully ===");
    Ok(())
}
