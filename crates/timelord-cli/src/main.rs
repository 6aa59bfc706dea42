//! timelord: local time and nearest airports for a list of cities.
//!
//! ```text
//! $ timelord toronto, london
//! $ TIMELORD_LOG=debug timelord --data-dir ~/timelord zurich
//! ```
//!
//! On first run the city index is built from `datasets/cities.json` and
//! written next to the datasets; later runs reuse it. Pass
//! `--rebuild-index` after updating the dataset.
mod args;
mod logging;

use crate::args::CliArgs;
use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::Parser;
use std::sync::Arc;
use timelord_core::loader::open_index;
use timelord_core::{
    enrich_all, resolve_all, EnrichedResult, FlagIcons, ItemsPayload, LoadOptions, LookupTables,
};

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    logging::init_tracing(args.verbose)?;

    let terms = args.terms();
    if terms.is_empty() {
        bail!("must specify query");
    }

    let paths = args.data_paths();
    let options = LoadOptions {
        rebuild: args.rebuild_index,
    };
    let index = open_index(&paths, options)
        .with_context(|| format!("opening city index {}", paths.index.display()))?;
    let tables = LookupTables::load(&paths).context("loading lookup tables")?;
    let flags = FlagIcons::new(&paths.flags_dir);

    let cities = resolve_all(&terms, Arc::new(index), args.order()).await;
    tracing::debug!(terms = terms.len(), hits = cities.len(), "resolved");

    let payload: ItemsPayload = enrich_all(&cities, &tables, Utc::now(), &flags)
        .iter()
        .map(EnrichedResult::to_item)
        .collect();

    println!("{}", payload.to_json()?);
    Ok(())
}
