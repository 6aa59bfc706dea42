// crates/timelord-core/src/proximity.rs

//! Nearest-airport ranking.
//!
//! Two stages: the [`SHORTLIST`] closest airports by great-circle distance,
//! then re-ranked by airport type so that, within that shortlist, the
//! category wins over raw distance. Both sorts are stable.

use crate::model::{AirportRecord, RankedAirport};

/// Mean Earth radius used by [`haversine_km`].
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// How many of the closest airports survive the distance stage.
pub const SHORTLIST: usize = 5;

/// How many airports are reported per city.
pub const MAX_AIRPORTS: usize = 3;

/// Great-circle distance in kilometres between two points given in decimal
/// degrees.
///
/// ```rust
/// use timelord_core::haversine_km;
///
/// assert_eq!(haversine_km(43.7, -79.4, 43.7, -79.4), 0.0);
/// // Toronto -> Montreal is a bit over 500 km.
/// let d = haversine_km(43.7, -79.4, 45.5, -73.57);
/// assert!((500.0..520.0).contains(&d));
/// ```
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1 = lat1.to_radians();
    let lat2 = lat2.to_radians();
    let d_lat = lat2 - lat1;
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Up to [`MAX_AIRPORTS`] airports for a city at (`lat`, `lon`).
///
/// Every candidate gets its distance attached, the list is stably sorted by
/// distance and cut to [`SHORTLIST`], that shortlist is stably sorted by
/// `kind` (byte order), and the first [`MAX_AIRPORTS`] are returned.
pub fn nearest_airports(lat: f64, lon: f64, candidates: &[AirportRecord]) -> Vec<RankedAirport<'_>> {
    let mut ranked: Vec<RankedAirport<'_>> = candidates
        .iter()
        .map(|airport| RankedAirport {
            airport,
            distance_km: haversine_km(lat, lon, airport.lat, airport.lng),
        })
        .collect();

    ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    ranked.truncate(SHORTLIST);

    ranked.sort_by(|a, b| a.airport.kind.cmp(&b.airport.kind));
    ranked.truncate(MAX_AIRPORTS);

    ranked
}
