//! Basic usage example for timelord-rs
//!
//! This example demonstrates how to:
//! - Open (or build) the city index from a data directory
//! - Resolve a single city and a batch of cities
//! - Enrich results with local time, country details and airports
//!
//! Run with a data directory laid out as `datasets/*.json` + `flags/`:
//!
//! ```text
//! cargo run --example basic_usage -- /path/to/data
//! ```

use chrono::Utc;
use std::sync::Arc;
use timelord_core::loader::open_index;
use timelord_core::{
    enrich, enrich_all, nearest_airports, resolve, resolve_all, DataPaths, DispatchOrder,
    FlagIcons, LoadOptions, LookupTables, Result,
};

#[tokio::main]
async fn main() -> Result<()> {
    println!("=== timelord-rs Basic Usage Example ===\n");

    let root = std::env::args().nth(1).unwrap_or_else(|| ".".to_string());
    let paths = DataPaths::under(&root);

    println!("Opening city index under {root}...");
    let index = open_index(&paths, LoadOptions::default())?;
    let stats = index.stats();
    println!("✓ Index ready: {} cities, {} terms\n", stats.cities, stats.terms);

    let tables = LookupTables::load(&paths)?;
    let flags = FlagIcons::new(&paths.flags_dir);

    // Example 1: Resolve one term
    println!("--- Example 1: Resolve a single city ---");
    match resolve("toronto", &index) {
        Some(city) => {
            println!("Found: {} ({})", city.name(), city.country_id);
            println!("Timezone: {}", city.timezone);
            println!("Population: {}", city.population);

            let airports = nearest_airports(
                city.latitude,
                city.longitude,
                tables.airports(&city.country_id),
            );
            for a in &airports {
                println!("  ✈ {} {:.1} km ({})", a.code(), a.distance_km, a.airport.kind);
            }

            let enriched = enrich(&city, &tables, Utc::now(), &flags);
            println!("{}", enriched.title());
            println!("{}", enriched.subtitle());
        }
        None => println!("No match for 'toronto'"),
    }
    println!();

    // Example 2: Inspect the ranked candidates
    println!("--- Example 2: Ranked candidates for 'london' ---");
    for (i, hit) in index.query("london").iter().take(5).enumerate() {
        println!(
            "{}. {} ({}) score={:.3} pop={}",
            i + 1,
            hit.record.name,
            hit.record.country_id,
            hit.score,
            hit.record.population
        );
    }
    println!();

    // Example 3: Resolve a batch concurrently
    println!("--- Example 3: Batch of terms, query order ---");
    let terms = ["paris", "tokyo", "nonexistentcityxyz", "zurich"];
    let cities = resolve_all(&terms, Arc::new(index), DispatchOrder::Input).await;
    println!("{} of {} terms matched", cities.len(), terms.len());
    for result in enrich_all(&cities, &tables, Utc::now(), &flags) {
        println!("  {}", result.title());
        println!("    {}", result.subtitle());
    }

    println!("\n=== Example completed successfully ===");
    Ok(())
}
