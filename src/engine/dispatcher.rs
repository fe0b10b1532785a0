//! Fan-out of one search request to every selected source
//!
//! Each source runs in its own task with its own deadline. Every task reports
//! exactly one `SourceOutcome` through a channel whose capacity equals the
//! number of dispatched sources, so a report can never block its task.
//!
//! The tasks belong to the returned `Dispatch`. Dropping it, for example when
//! the caller of `lookup` gives up, aborts every search still running.

use crate::search::{SearchRequest, SourceId, SourceOutcome};
use crate::sources::{SourceRegistry, TorrentSource};
use crate::SourceError;
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

/// Outcomes of a dispatched request, still in flight
pub struct Dispatch {
    /// Every source an outcome is owed for
    pub expected: Vec<SourceId>,

    /// Receives one outcome per expected source, in completion order
    pub outcomes: mpsc::Receiver<SourceOutcome>,

    /// Search tasks, aborted when the dispatch is dropped
    pub(crate) tasks: JoinSet<()>,
}

/// Starts one search task per selected source
///
/// Must be called from within a tokio runtime. A selected source without a
/// registered client gets an immediate `SourceError::NotRegistered` outcome.
pub fn dispatch(registry: &SourceRegistry, request: &SearchRequest) -> Dispatch {
    let expected: Vec<SourceId> = request.sources().iter().copied().collect();
    let (tx, rx) = mpsc::channel(expected.len().max(1));
    let mut tasks = JoinSet::new();

    for &source_id in &expected {
        let Some(client) = registry.get(source_id) else {
            tracing::error!("No client registered for source {}", source_id);
            // Capacity covers every expected source, so this cannot be full
            let _ = tx.try_send(SourceOutcome::failure(
                source_id,
                SourceError::NotRegistered(source_id),
            ));
            continue;
        };

        let tx = tx.clone();
        let query = request.query().to_string();
        let timeout = request.timeout();
        tasks.spawn(async move {
            tracing::debug!("Start search task for {} with input '{}'", source_id, query);
            let outcome = run_source(client, source_id, &query, timeout).await;
            if tx.send(outcome).await.is_err() {
                tracing::debug!("Collector dropped before {} reported", source_id);
            }
        });
    }

    Dispatch {
        expected,
        outcomes: rx,
        tasks,
    }
}

/// Runs one source search, turning errors, panics and timeouts into a failure outcome
async fn run_source(
    client: Arc<dyn TorrentSource>,
    source_id: SourceId,
    query: &str,
    timeout: Duration,
) -> SourceOutcome {
    let search = AssertUnwindSafe(client.search(query, timeout)).catch_unwind();

    match tokio::time::timeout(timeout, search).await {
        Ok(Ok(Ok(results))) => {
            tracing::debug!("Got {} search results from {}", results.len(), source_id);
            SourceOutcome::Success { source_id, results }
        }
        Ok(Ok(Err(error))) => SourceOutcome::failure(source_id, error),
        Ok(Err(panic)) => {
            SourceOutcome::failure(source_id, SourceError::Panicked(panic_message(&*panic)))
        }
        Err(_) => SourceOutcome::failure(source_id, SourceError::Timeout(timeout)),
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
