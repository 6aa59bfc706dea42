// crates/timelord-core/src/dispatch.rs

//! # Concurrent Batch Dispatcher
//!
//! Fans a batch of query terms out to one blocking task each and fans the
//! outcomes back in over a single bounded channel.
//!
//! Guarantees:
//! - every term produces exactly one [`TermOutcome`], including terms whose
//!   task panicked (reported as [`Outcome::Failed`]);
//! - every task has finished before the call returns;
//! - with [`DispatchOrder::Completion`] the output order is whatever order
//!   the tasks finished in and is NOT related to input order. Use
//!   [`DispatchOrder::Input`] when a stable order matters.

use crate::index::CityIndex;
use crate::model::CityRecord;
use crate::resolver::resolve;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Order of the returned results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DispatchOrder {
    /// Completion order; unspecified relative to the input.
    #[default]
    Completion,
    /// Re-sorted by each term's position in the input.
    Input,
}

/// What happened to a single term.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Hit(CityRecord),
    /// The index has no match for the term.
    Miss,
    /// The lookup itself broke (the task panicked); distinct from a miss.
    Failed(String),
}

impl Outcome {
    pub fn into_hit(self) -> Option<CityRecord> {
        match self {
            Outcome::Hit(city) => Some(city),
            Outcome::Miss | Outcome::Failed(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TermOutcome {
    /// Position of the term in the input batch.
    pub position: usize,
    pub term: String,
    pub outcome: Outcome,
}

/// Resolves every term concurrently and returns the hits.
///
/// Misses and failures are dropped, so the result holds between 0 and
/// `terms.len()` records. Duplicates are kept when several terms resolve to
/// the same city.
pub async fn resolve_all<S: AsRef<str>>(
    terms: &[S],
    index: Arc<CityIndex>,
    order: DispatchOrder,
) -> Vec<CityRecord> {
    resolve_outcomes(terms, index, order)
        .await
        .into_iter()
        .filter_map(|o| o.outcome.into_hit())
        .collect()
}

/// Resolves every term concurrently and returns one outcome per term.
pub async fn resolve_outcomes<S: AsRef<str>>(
    terms: &[S],
    index: Arc<CityIndex>,
    order: DispatchOrder,
) -> Vec<TermOutcome> {
    fan_out(terms, order, move |term| resolve(term, &index)).await
}

async fn fan_out<S, F>(terms: &[S], order: DispatchOrder, lookup: F) -> Vec<TermOutcome>
where
    S: AsRef<str>,
    F: Fn(&str) -> Option<CityRecord> + Send + Sync + 'static,
{
    let n = terms.len();
    if n == 0 {
        return Vec::new();
    }

    let lookup = Arc::new(lookup);
    // One slot per task: a send never has to wait.
    let (tx, mut rx) = mpsc::channel::<TermOutcome>(n);
    let mut handles = Vec::with_capacity(n);

    for (position, term) in terms.iter().enumerate() {
        let term = term.as_ref().to_owned();
        let lookup = Arc::clone(&lookup);
        let tx = tx.clone();
        let task_term = term.clone();

        let handle = tokio::task::spawn_blocking(move || {
            let outcome = match lookup(&task_term) {
                Some(city) => Outcome::Hit(city),
                None => Outcome::Miss,
            };
            let message = TermOutcome {
                position,
                term: task_term,
                outcome,
            };
            if let Err(e) = tx.try_send(message) {
                tracing::warn!(error = %e, "dropping lookup outcome");
            }
        });
        handles.push((position, term, handle));
    }
    drop(tx);

    // Closes once every task has either sent or unwound.
    let mut outcomes = Vec::with_capacity(n);
    while let Some(outcome) = rx.recv().await {
        outcomes.push(outcome);
    }

    for (position, term, handle) in handles {
        if let Err(e) = handle.await {
            tracing::warn!(term = %term, error = %e, "city lookup task failed");
            outcomes.push(TermOutcome {
                position,
                term,
                outcome: Outcome::Failed(e.to_string()),
            });
        }
    }

    if order == DispatchOrder::Input {
        outcomes.sort_by_key(|o| o.position);
    }

    tracing::debug!(
        terms = n,
        hits = outcomes
            .iter()
            .filter(|o| matches!(o.outcome, Outcome::Hit(_)))
            .count(),
        "batch resolved"
    );

    outcomes
}
