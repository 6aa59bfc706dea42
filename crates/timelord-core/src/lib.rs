// crates/timelord-core/src/lib.rs

//! # timelord-core
//!
//! Resolves free-text city queries into enriched location records: the
//! matched city, its current local time and the nearest airports.
//!
//! The pipeline is:
//!
//! 1. [`loader`] reads the static datasets and opens (or builds) the
//!    persisted [`CityIndex`].
//! 2. [`dispatch::resolve_all`] fans a batch of terms out to concurrent
//!    [`resolver::resolve`] calls and collects the hits.
//! 3. [`enrich::enrich`] binds each city to the [`LookupTables`] and the
//!    [`proximity`] ranker, producing an [`EnrichedResult`].
//! 4. [`output::ItemsPayload`] renders the JSON document.

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod config;
pub mod dispatch;
pub mod enrich;
pub mod error;
pub mod index;
pub mod loader;
pub mod model;
pub mod output;
pub mod proximity;
pub mod resolver;
pub mod text;

// Re-exports
pub use crate::config::DataPaths;
pub use crate::dispatch::{resolve_all, resolve_outcomes, DispatchOrder, Outcome};
pub use crate::enrich::{enrich, enrich_all, EnrichedResult, FlagIcons};
pub use crate::error::{Result, TimelordError};
pub use crate::index::{CityHit, CityIndex, IndexStats};
pub use crate::loader::{LoadOptions, LookupTables};
pub use crate::model::{AirportRecord, CityRecord, RankedAirport};
pub use crate::output::{ItemIcon, ItemsPayload, OutputItem};
pub use crate::proximity::{haversine_km, nearest_airports};
pub use crate::resolver::resolve;
