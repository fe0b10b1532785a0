//! Collection of per-source outcomes into one aggregate
//!
//! The collector is the only writer of the aggregate. It reads exactly one
//! outcome per dispatched source and applies the partial-failure policy: the
//! aggregate only counts as failed when every source failed.

use crate::engine::dispatcher::Dispatch;
use crate::search::{AggregateResult, SourceFailure, SourceOutcome};
use crate::SourceError;
use std::collections::BTreeSet;

/// Collects every outcome of a dispatch
///
/// `on_failure` is called exactly once per failed source, in arrival order.
/// The returned `merged` list is in arrival order; ranking is left to the caller.
///
/// If the outcome channel closes before every source reported, the missing
/// sources are recorded as `SourceError::Lost` so that each dispatched source
/// still ends up with exactly one outcome.
pub async fn collect<F>(dispatch: Dispatch, mut on_failure: F) -> AggregateResult
where
    F: FnMut(&SourceFailure),
{
    // Keeps the search tasks alive until every outcome is in
    let Dispatch {
        expected,
        mut outcomes,
        tasks: _tasks,
    } = dispatch;

    let mut pending: BTreeSet<_> = expected.iter().copied().collect();
    let mut aggregate = AggregateResult::default();

    while !pending.is_empty() {
        let Some(outcome) = outcomes.recv().await else {
            break;
        };

        let source_id = outcome.source_id();
        if !pending.remove(&source_id) {
            tracing::error!("Ignoring extra outcome from {}", source_id);
            continue;
        }

        match outcome {
            SourceOutcome::Success { results, .. } => {
                tracing::debug!(
                    "Got {} search results from {}",
                    results.len(),
                    source_id.display_name()
                );
                aggregate.merged.extend(results);
            }
            SourceOutcome::Failure(failure) => {
                record_failure(&mut aggregate, failure, &mut on_failure);
            }
        }
    }

    for source_id in pending {
        tracing::error!("Search task for {} never reported", source_id);
        record_failure(
            &mut aggregate,
            SourceFailure {
                source_id,
                error: SourceError::Lost,
            },
            &mut on_failure,
        );
    }

    aggregate.all_failed = !expected.is_empty() && aggregate.failed_sources.len() == expected.len();
    aggregate
}

fn record_failure<F>(aggregate: &mut AggregateResult, failure: SourceFailure, on_failure: &mut F)
where
    F: FnMut(&SourceFailure),
{
    tracing::warn!(
        "An error occurred during search on {}: {}",
        failure.source_id.display_name(),
        failure.error
    );
    on_failure(&failure);
    aggregate.failed_sources.insert(failure.source_id);
    aggregate.failures.push(failure);
}
