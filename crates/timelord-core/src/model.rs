// crates/timelord-core/src/model.rs
use crate::error::{Result, TimelordError};
use crate::text::parse_coord;
use serde::{Deserialize, Serialize};

// -----------------------------------------------------------------------------
// RAW INPUT (as it comes from the JSON datasets)
// -----------------------------------------------------------------------------

/// A coordinate as found in the datasets: usually text, sometimes a number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawCoord {
    Text(String),
    Number(f64),
}

impl RawCoord {
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            RawCoord::Text(s) => parse_coord(s),
            RawCoord::Number(n) => Some(*n).filter(|v| v.is_finite()),
        }
    }
}

/// Raw city entry from `cities.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct CityRaw {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub asciiname: Option<String>,
    pub country_id: String,
    #[serde(default)]
    pub timezone: String,
    #[serde(default)]
    pub population: u64,
    pub latitude: RawCoord,
    pub longitude: RawCoord,
}

/// Raw country entry from `countries.json`: `{"Code": "CA", "Name": "Canada"}`.
#[derive(Debug, Clone, Deserialize)]
pub struct CountryRaw {
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Name")]
    pub name: String,
}

// -----------------------------------------------------------------------------
// DOMAIN MODEL
// -----------------------------------------------------------------------------

/// A city stored in the index. Immutable once the index is built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CityRecord {
    pub id: String,
    pub name: String,
    /// ASCII spelling used for matching; falls back to `name` when the
    /// dataset has none.
    pub ascii_name: String,
    pub country_id: String,
    /// IANA zone name, e.g. `America/Toronto`.
    pub timezone: String,
    pub population: u64,
    pub latitude: f64,
    pub longitude: f64,
}

impl CityRecord {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn coordinates(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}

impl TryFrom<CityRaw> for CityRecord {
    type Error = TimelordError;

    fn try_from(raw: CityRaw) -> Result<Self> {
        let id = raw.id.trim().to_owned();
        if id.is_empty() {
            return Err(TimelordError::InvalidData(format!(
                "city '{}' has an empty id",
                raw.name
            )));
        }

        let latitude = raw
            .latitude
            .to_f64()
            .filter(|v| (-90.0..=90.0).contains(v))
            .ok_or_else(|| {
                TimelordError::InvalidData(format!(
                    "city {id}: latitude {:?} out of range",
                    raw.latitude
                ))
            })?;
        let longitude = raw
            .longitude
            .to_f64()
            .filter(|v| (-180.0..=180.0).contains(v))
            .ok_or_else(|| {
                TimelordError::InvalidData(format!(
                    "city {id}: longitude {:?} out of range",
                    raw.longitude
                ))
            })?;

        let ascii_name = raw
            .asciiname
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| raw.name.clone());

        Ok(CityRecord {
            id,
            name: raw.name,
            ascii_name,
            country_id: raw.country_id,
            timezone: raw.timezone,
            population: raw.population,
            latitude,
            longitude,
        })
    }
}

/// An airport from `airports.json`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AirportRecord {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub country_code: String,
    pub lat: f64,
    #[serde(rename = "long")]
    pub lng: f64,
    /// Category such as `large_airport` or `small_airport`.
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// An airport paired with its distance to the city being resolved.
///
/// Lives only for the duration of one enrichment call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RankedAirport<'a> {
    pub airport: &'a AirportRecord,
    pub distance_km: f64,
}

impl RankedAirport<'_> {
    pub fn code(&self) -> &str {
        &self.airport.code
    }
}
