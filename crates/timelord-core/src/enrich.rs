// crates/timelord-core/src/enrich.rs

//! # Result Enricher
//!
//! Binds a resolved [`CityRecord`] to the lookup tables, the local clock and
//! the nearest-airport ranker. Nothing in here can fail: every missing
//! piece degrades to an empty value, UTC, or the default flag icon.

use crate::loader::LookupTables;
use crate::model::CityRecord;
use crate::output::{ItemIcon, OutputItem};
use crate::proximity::nearest_airports;
use crate::text::flag_stem;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use std::path::{Path, PathBuf};

/// Icon used when a country has no flag asset.
pub const NO_FLAG_ICON: &str = "_no_flag.png";

/// `3:04 PM`
const TIME_FORMAT: &str = "%-I:%M %p";
/// `Monday, January 2`
const DATE_FORMAT: &str = "%A, %B %-d";

/// Resolves flag icon files inside one directory.
#[derive(Debug, Clone)]
pub struct FlagIcons {
    dir: PathBuf,
}

impl FlagIcons {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `<dir>/<country_name lowercased, spaces as underscores>.png` when that
    /// file exists, otherwise `<dir>/_no_flag.png`.
    pub fn icon_for(&self, country_name: &str) -> PathBuf {
        let stem = flag_stem(country_name);
        if !stem.is_empty() {
            let candidate = self.dir.join(format!("{stem}.png"));
            if candidate.is_file() {
                return candidate;
            }
        }
        tracing::debug!(country = country_name, "no flag icon, using default");
        self.dir.join(NO_FLAG_ICON)
    }
}

/// A city with everything needed to display it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedResult {
    pub id: String,
    pub name: String,
    pub local_time: String,
    pub local_date: String,
    pub zone_abbreviation: String,
    pub country_name: String,
    pub phone_prefix: String,
    pub currency_code: String,
    pub airport_codes: Vec<String>,
    pub icon: String,
}

impl EnrichedResult {
    /// `Toronto — 7:00 AM EST`
    pub fn title(&self) -> String {
        format!("{} — {} {}", self.name, self.local_time, self.zone_abbreviation)
    }

    /// `Monday, January 15 | Canada | +1 | CAD | YYZ,YTZ`
    pub fn subtitle(&self) -> String {
        [
            self.local_date.clone(),
            self.country_name.clone(),
            format!("+{}", self.phone_prefix),
            self.currency_code.clone(),
            self.airport_codes.join(","),
        ]
        .join(" | ")
    }

    pub fn to_item(&self) -> OutputItem {
        OutputItem {
            uid: self.id.clone(),
            title: self.title(),
            subtitle: self.subtitle(),
            arg: self.name.clone(),
            autocomplete: self.name.clone(),
            icon: ItemIcon {
                path: self.icon.clone(),
            },
        }
    }
}

/// Builds the display record for one city as of `now`.
pub fn enrich(
    city: &CityRecord,
    tables: &LookupTables,
    now: DateTime<Utc>,
    flags: &FlagIcons,
) -> EnrichedResult {
    let local = now.with_timezone(&local_zone(city));
    let country = city.country_id.as_str();
    let country_name = tables.country_name(country);
    if country_name.is_empty() {
        tracing::debug!(city = %city.id, country, "unknown country code");
    }

    let airports = nearest_airports(city.latitude, city.longitude, tables.airports(country));

    EnrichedResult {
        id: city.id.clone(),
        name: city.name.clone(),
        local_time: local.format(TIME_FORMAT).to_string(),
        local_date: local.format(DATE_FORMAT).to_string(),
        zone_abbreviation: local.format("%Z").to_string(),
        country_name: country_name.to_owned(),
        phone_prefix: tables.phone_prefix(country).to_owned(),
        currency_code: tables.currency_code(country).to_owned(),
        airport_codes: airports.iter().map(|a| a.code().to_owned()).collect(),
        icon: flags.icon_for(country_name).to_string_lossy().into_owned(),
    }
}

/// [`enrich`] over a batch, keeping its order.
pub fn enrich_all(
    cities: &[CityRecord],
    tables: &LookupTables,
    now: DateTime<Utc>,
    flags: &FlagIcons,
) -> Vec<EnrichedResult> {
    cities
        .iter()
        .map(|city| enrich(city, tables, now, flags))
        .collect()
}

fn local_zone(city: &CityRecord) -> Tz {
    match city.timezone.parse::<Tz>() {
        Ok(tz) => tz,
        Err(_) => {
            tracing::warn!(city = %city.id, timezone = %city.timezone, "unknown timezone, using UTC");
            Tz::UTC
        }
    }
}
