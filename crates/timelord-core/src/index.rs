// crates/timelord-core/src/index.rs

//! # City Index
//!
//! An in-memory inverted index over the city dataset.
//!
//! Only the ASCII name and the display name are tokenized and searchable.
//! Everything else on a [`CityRecord`] (id, country, timezone, population,
//! coordinates) is stored for retrieval and never influences relevance,
//! except population, which breaks ties between equally relevant matches.
//!
//! The index is built once and never mutated afterwards, so a shared
//! reference (or an `Arc<CityIndex>`) can be queried from any number of
//! threads without locking.

use crate::error::{Result, TimelordError};
use crate::model::CityRecord;
use crate::text::tokenize;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Searchable text fields of a city.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
enum Field {
    AsciiName = 0,
    Name = 1,
}

impl Field {
    const ALL: [Field; 2] = [Field::AsciiName, Field::Name];

    fn text(self, city: &CityRecord) -> &str {
        match self {
            Field::AsciiName => &city.ascii_name,
            Field::Name => &city.name,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Posting {
    doc: u32,
    field: Field,
}

/// A match returned by [`CityIndex::query`].
#[derive(Clone, Copy, Debug)]
pub struct CityHit<'a> {
    pub record: &'a CityRecord,
    pub score: f64,
}

/// Simple aggregate statistics for the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    pub cities: usize,
    pub terms: usize,
}

/// The immutable, queryable city index.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CityIndex {
    records: Vec<CityRecord>,
    /// term -> every (doc, field) containing it; docs ascending.
    postings: HashMap<String, Vec<Posting>>,
    /// Token count per doc, indexed by `Field as usize`.
    field_lens: Vec<[u16; 2]>,
}

/// Edit budget for a query token that is not in the vocabulary.
fn max_edits(token_len: usize) -> usize {
    match token_len {
        0..=4 => 0,
        5..=7 => 1,
        _ => 2,
    }
}

impl CityIndex {
    /// Builds the index from the full dataset.
    ///
    /// Fails with [`TimelordError::InvalidData`] if an id is empty or
    /// repeated, or a coordinate is out of range.
    pub fn build(records: Vec<CityRecord>) -> Result<Self> {
        validate(&records)?;

        let mut postings: HashMap<String, Vec<Posting>> = HashMap::new();
        let mut field_lens = Vec::with_capacity(records.len());

        for (doc, city) in records.iter().enumerate() {
            let doc = doc as u32;
            let mut lens = [0u16; 2];

            for field in Field::ALL {
                let mut tokens = tokenize(field.text(city));
                lens[field as usize] = tokens.len().min(u16::MAX as usize) as u16;

                tokens.sort_unstable();
                tokens.dedup();
                for token in tokens {
                    postings.entry(token).or_default().push(Posting { doc, field });
                }
            }
            field_lens.push(lens);
        }

        tracing::debug!(
            cities = records.len(),
            terms = postings.len(),
            "city index built"
        );

        Ok(Self {
            records,
            postings,
            field_lens,
        })
    }

    /// All matches for `term`, best first.
    ///
    /// Ordering: descending relevance score, then descending population,
    /// then dataset order. A blank term or a term with no matching token
    /// returns an empty vector.
    pub fn query(&self, term: &str) -> Vec<CityHit<'_>> {
        let mut tokens = tokenize(term);
        tokens.sort_unstable();
        tokens.dedup();
        if tokens.is_empty() || self.records.is_empty() {
            return Vec::new();
        }

        // doc -> (summed contribution, matched query tokens)
        let mut acc: HashMap<u32, (f64, usize)> = HashMap::new();

        for token in &tokens {
            let mut best: HashMap<u32, f64> = HashMap::new();

            for (term, similarity) in self.expand(token) {
                let Some(list) = self.postings.get(term) else {
                    continue;
                };
                let idf = self.idf(list.len());
                for p in list {
                    let weight = idf * similarity * self.field_norm(p.doc, p.field);
                    let slot = best.entry(p.doc).or_insert(0.0);
                    if weight > *slot {
                        *slot = weight;
                    }
                }
            }

            for (doc, weight) in best {
                let entry = acc.entry(doc).or_insert((0.0, 0));
                entry.0 += weight;
                entry.1 += 1;
            }
        }

        let total = tokens.len() as f64;
        let mut scored: Vec<(u32, f64)> = acc
            .into_iter()
            .map(|(doc, (sum, matched))| (doc, sum * matched as f64 / total))
            .collect();

        scored.sort_by(|a, b| {
            b.1.total_cmp(&a.1)
                .then_with(|| self.population(b.0).cmp(&self.population(a.0)))
                .then_with(|| a.0.cmp(&b.0))
        });

        scored
            .into_iter()
            .map(|(doc, score)| CityHit {
                record: &self.records[doc as usize],
                score,
            })
            .collect()
    }

    pub fn records(&self) -> &[CityRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            cities: self.records.len(),
            terms: self.postings.len(),
        }
    }

    /// Structural check for an index decoded from disk.
    pub(crate) fn verify(&self) -> std::result::Result<(), String> {
        if self.field_lens.len() != self.records.len() {
            return Err(format!(
                "{} field lengths for {} cities",
                self.field_lens.len(),
                self.records.len()
            ));
        }
        let n = self.records.len();
        if let Some((term, _)) = self
            .postings
            .iter()
            .find(|(_, list)| list.iter().any(|p| p.doc as usize >= n))
        {
            return Err(format!("posting for '{term}' points past the last city"));
        }
        Ok(())
    }

    // --- Internal Helpers ---

    /// Vocabulary terms a query token stands for, with a similarity in (0, 1].
    fn expand<'a>(&'a self, token: &'a str) -> Vec<(&'a str, f64)> {
        if self.postings.contains_key(token) {
            return vec![(token, 1.0)];
        }

        let budget = max_edits(token.len());
        if budget == 0 {
            return Vec::new();
        }

        self.postings
            .keys()
            .filter(|t| t.len().abs_diff(token.len()) <= budget)
            .filter_map(|t| {
                let edits = strsim::levenshtein(token, t);
                (edits <= budget).then(|| {
                    let longest = token.len().max(t.len()) as f64;
                    (t.as_str(), 1.0 - edits as f64 / longest)
                })
            })
            .collect()
    }

    fn idf(&self, doc_freq: usize) -> f64 {
        1.0 + (self.records.len() as f64 / (doc_freq as f64 + 1.0)).ln()
    }

    fn field_norm(&self, doc: u32, field: Field) -> f64 {
        let len = self.field_lens[doc as usize][field as usize].max(1);
        1.0 / f64::from(len).sqrt()
    }

    fn population(&self, doc: u32) -> u64 {
        self.records[doc as usize].population
    }
}

fn validate(records: &[CityRecord]) -> Result<()> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(records.len());
    for city in records {
        if city.id.is_empty() {
            return Err(TimelordError::InvalidData(format!(
                "city '{}' has an empty id",
                city.name
            )));
        }
        if !seen.insert(city.id.as_str()) {
            return Err(TimelordError::InvalidData(format!(
                "duplicate city id {}",
                city.id
            )));
        }
        if !(-90.0..=90.0).contains(&city.latitude) || !(-180.0..=180.0).contains(&city.longitude) {
            return Err(TimelordError::InvalidData(format!(
                "city {}: coordinates ({}, {}) out of range",
                city.id, city.latitude, city.longitude
            )));
        }
    }
    Ok(())
}
