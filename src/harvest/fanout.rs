//! Fan-out primitives
//!
//! `fan_out` is the join-all building block used by both pipeline stages;
//! `select_latest` is the resolver's "newest child wins" reduction.

use crate::error::{Error, Result};
use futures::future::join_all;
use std::future::Future;
use tracing::warn;

/// Issue one request per item, eagerly and in input order, and join them all.
///
/// Results come back paired with their items by position — completion order
/// is never assumed. If any item failed, the whole batch fails with a single
/// [`Error::Batch`] carrying the first error in input order and the failure
/// count; successful results from the same batch are discarded, not
/// returned.
pub async fn fan_out<'a, T, R, F, Fut>(items: &'a [T], op: F) -> Result<Vec<R>>
where
    F: Fn(&'a T) -> Fut,
    Fut: Future<Output = Result<R>>,
{
    let outcomes = join_all(items.iter().map(op)).await;

    let total = outcomes.len();
    let mut values = Vec::with_capacity(total);
    let mut first_error = None;
    let mut failed = 0;

    for outcome in outcomes {
        match outcome {
            Ok(value) => values.push(value),
            Err(e) => {
                warn!(error = %e, "fan-out request failed");
                failed += 1;
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
    }

    match first_error {
        None => Ok(values),
        Some(source) => Err(Error::batch(failed, total, source)),
    }
}

/// Pick the item with the maximum key.
///
/// Ties resolve to the first item encountered in input order; an empty slice
/// yields `None`.
pub fn select_latest<'a, T, K, F>(items: &'a [T], key: F) -> Option<&'a T>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut best: Option<(&T, K)> = None;
    for item in items {
        let k = key(item);
        match &best {
            Some((_, best_key)) if k <= *best_key => {}
            _ => best = Some((item, k)),
        }
    }
    best.map(|(item, _)| item)
}
