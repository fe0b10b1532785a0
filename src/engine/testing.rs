//! In-memory sources for engine tests

use crate::search::{SourceId, TorrentResult};
use crate::sources::TorrentSource;
use crate::{SourceError, SourceResult};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

enum Behavior {
    Results(Vec<TorrentResult>),
    Fail,
    Hang,
    HangObserved(Arc<AtomicBool>),
    Panic,
}

/// Raises its flag when dropped with an unfinished search
struct CancelFlag(Arc<AtomicBool>);

impl Drop for CancelFlag {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

pub struct FakeSource {
    id: SourceId,
    behavior: Behavior,
}

impl FakeSource {
    pub fn ok(id: SourceId, results: Vec<TorrentResult>) -> Arc<Self> {
        Arc::new(Self {
            id,
            behavior: Behavior::Results(results),
        })
    }

    pub fn failing(id: SourceId) -> Arc<Self> {
        Arc::new(Self {
            id,
            behavior: Behavior::Fail,
        })
    }

    pub fn hanging(id: SourceId) -> Arc<Self> {
        Arc::new(Self {
            id,
            behavior: Behavior::Hang,
        })
    }

    /// Hangs like `hanging` and sets `cancelled` once the search is dropped
    pub fn hanging_observed(id: SourceId, cancelled: Arc<AtomicBool>) -> Arc<Self> {
        Arc::new(Self {
            id,
            behavior: Behavior::HangObserved(cancelled),
        })
    }

    pub fn panicking(id: SourceId) -> Arc<Self> {
        Arc::new(Self {
            id,
            behavior: Behavior::Panic,
        })
    }
}

#[async_trait]
impl TorrentSource for FakeSource {
    fn id(&self) -> SourceId {
        self.id
    }

    async fn search(&self, _query: &str, _timeout: Duration) -> SourceResult<Vec<TorrentResult>> {
        match &self.behavior {
            Behavior::Results(results) => Ok(results.clone()),
            Behavior::Fail => Err(SourceError::Status {
                url: format!("https://{}.invalid/search", self.id),
                status: 503,
            }),
            Behavior::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(Vec::new())
            }
            Behavior::HangObserved(cancelled) => {
                let _flag = CancelFlag(cancelled.clone());
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(Vec::new())
            }
            Behavior::Panic => panic!("layout changed under {}", self.id),
        }
    }
}
