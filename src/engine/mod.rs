//! Search engine: fan-out, collection, mirror racing and ranking
//!
//! This module contains the concurrent core of the aggregator:
//! - Dispatching one task per selected source
//! - Collecting exactly one outcome per source under a partial-failure policy
//! - Racing mirror candidates for sites with moving addresses
//! - Ranking the merged results

mod collector;
mod dispatcher;
mod mirror;

#[cfg(test)]
pub(crate) mod testing;

pub use collector::collect;
pub use dispatcher::{dispatch, Dispatch};
pub use mirror::{race_probes, MirrorDirectory, MirrorRacer, RaceWinner};

use crate::search::{rank, AggregateResult, SearchRequest, SourceFailure};
use crate::sources::SourceRegistry;
use crate::RippleError;
use std::time::Instant;

/// Runs a complete search
///
/// Dispatches the request to every selected source, collects their outcomes
/// and ranks the merged results by seeders.
///
/// # Returns
///
/// * `Ok(AggregateResult)` - At least one source succeeded. `merged` may be
///   empty and `failed_sources` names the sources that did not answer.
/// * `Err(RippleError::AllSourcesFailed)` - Every selected source failed
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use torrent_ripple::{lookup, Config, SearchRequest, SourceId, SourceRegistry};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let registry = SourceRegistry::from_config(&Config::default())?;
/// let request = SearchRequest::new("Monte Cristo", Duration::from_secs(10), SourceId::ALL)?;
/// let aggregate = lookup(&registry, &request).await?;
/// println!("{} results", aggregate.merged.len());
/// # Ok(())
/// # }
/// ```
pub async fn lookup(
    registry: &SourceRegistry,
    request: &SearchRequest,
) -> Result<AggregateResult, RippleError> {
    lookup_with_observer(registry, request, |_| {}).await
}

/// Same as `lookup`, calling `on_failure` once for each failed source
pub async fn lookup_with_observer<F>(
    registry: &SourceRegistry,
    request: &SearchRequest,
    on_failure: F,
) -> Result<AggregateResult, RippleError>
where
    F: FnMut(&SourceFailure),
{
    tracing::info!(
        "Searching '{}' on {} sources",
        request.query(),
        request.sources().len()
    );
    let start_time = Instant::now();

    let mut aggregate = collect(dispatch(registry, request), on_failure).await;

    if aggregate.all_failed {
        tracing::error!("All searches returned an error for '{}'", request.query());
        return Err(RippleError::AllSourcesFailed {
            failures: aggregate.failures,
        });
    }

    aggregate.merged = rank(std::mem::take(&mut aggregate.merged));

    tracing::info!(
        "Search completed: {} results, {} failed sources in {:?}",
        aggregate.merged.len(),
        aggregate.failed_sources.len(),
        start_time.elapsed()
    );

    Ok(aggregate)
}
