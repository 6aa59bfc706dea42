// crates/timelord-core/src/loader/mod.rs

//! # Data Loader
//!
//! Reads the static datasets into immutable in-memory tables and opens the
//! persisted city index. Every failure here is fatal for the run.

use crate::config::DataPaths;
use crate::error::Result;
use crate::index::CityIndex;
use crate::model::{AirportRecord, CityRaw, CityRecord, CountryRaw};
use std::collections::HashMap;
use std::path::Path;

pub mod builder;
pub mod common_io;

pub use builder::{load_or_build, read_index, write_index, CompressionMode};

/// Options for [`open_index`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    /// Ignore an existing index file and rebuild it from the dataset.
    pub rebuild: bool,
}

/// Opens (or lazily builds) the city index described by `paths`.
pub fn open_index(paths: &DataPaths, options: LoadOptions) -> Result<CityIndex> {
    load_or_build(&paths.index, &paths.cities, options.rebuild)
}

/// Parses `cities.json` into validated records.
pub fn load_cities(path: &Path) -> Result<Vec<CityRecord>> {
    let raw: Vec<CityRaw> = common_io::read_json(path)?;
    raw.into_iter().map(CityRecord::try_from).collect()
}

/// The read-only reference tables consulted while enriching results.
///
/// Keyed by country code. Built once per process and shared by reference.
#[derive(Debug, Clone, Default)]
pub struct LookupTables {
    country_names: HashMap<String, String>,
    phone_prefixes: HashMap<String, String>,
    currency_codes: HashMap<String, String>,
    airports_by_country: HashMap<String, Vec<AirportRecord>>,
}

impl LookupTables {
    /// Assembles the tables; airports are grouped by `country_code`
    /// keeping their dataset order.
    pub fn new(
        country_names: HashMap<String, String>,
        phone_prefixes: HashMap<String, String>,
        currency_codes: HashMap<String, String>,
        airports: Vec<AirportRecord>,
    ) -> Self {
        let mut airports_by_country: HashMap<String, Vec<AirportRecord>> = HashMap::new();
        for airport in airports {
            airports_by_country
                .entry(airport.country_code.clone())
                .or_default()
                .push(airport);
        }

        Self {
            country_names,
            phone_prefixes,
            currency_codes,
            airports_by_country,
        }
    }

    /// Loads all four datasets named in `paths`.
    pub fn load(paths: &DataPaths) -> Result<Self> {
        let countries: Vec<CountryRaw> = common_io::read_json(&paths.countries)?;
        let country_names = countries.into_iter().map(|c| (c.code, c.name)).collect();
        let phone_prefixes = common_io::read_json(&paths.phone_codes)?;
        let currency_codes = common_io::read_json(&paths.currencies)?;
        let airports: Vec<AirportRecord> = common_io::read_json(&paths.airports)?;

        let tables = Self::new(country_names, phone_prefixes, currency_codes, airports);
        tracing::debug!(
            countries = tables.country_names.len(),
            airport_countries = tables.airports_by_country.len(),
            "lookup tables loaded"
        );
        Ok(tables)
    }

    /// Country display name, or `""` when unknown.
    pub fn country_name(&self, code: &str) -> &str {
        self.country_names.get(code).map_or("", String::as_str)
    }

    /// Dialling prefix without the leading `+`, or `""`.
    pub fn phone_prefix(&self, code: &str) -> &str {
        self.phone_prefixes.get(code).map_or("", String::as_str)
    }

    pub fn currency_code(&self, code: &str) -> &str {
        self.currency_codes.get(code).map_or("", String::as_str)
    }

    /// Airports of a country in dataset order; empty when unknown.
    pub fn airports(&self, code: &str) -> &[AirportRecord] {
        self.airports_by_country
            .get(code)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
