// crates/timelord-core/src/resolver.rs
use crate::index::CityIndex;
use crate::model::CityRecord;

/// The best city for `term`, or `None` when nothing matches.
///
/// A miss is an ordinary outcome, not an error.
pub fn resolve(term: &str, index: &CityIndex) -> Option<CityRecord> {
    let hit = index.query(term).into_iter().next();
    match &hit {
        Some(h) => tracing::debug!(
            term,
            city = %h.record.name,
            id = %h.record.id,
            score = h.score,
            "resolved"
        ),
        None => tracing::debug!(term, "no match"),
    }
    hit.map(|h| h.record.clone())
}
