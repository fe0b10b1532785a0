//! Mirror racing for sites whose address keeps moving
//!
//! A mirror-based source first asks a `MirrorDirectory` for the current
//! candidate addresses, then races one probe per candidate. The first probe
//! that both answers and serves a genuine results page wins; every other
//! probe is aborted as soon as the winner is known.

use crate::search::MirrorCandidate;
use crate::sources::html::has_marker;
use crate::sources::fetch_page;
use crate::{SourceError, SourceResult};
use async_trait::async_trait;
use reqwest::Client;
use std::future::Future;
use std::time::Duration;
use tokio::task::JoinSet;
use url::Url;

/// Discovers the current candidate addresses of a mirror-based site
#[async_trait]
pub trait MirrorDirectory: Send + Sync {
    async fn list_candidates(&self, timeout: Duration) -> SourceResult<Vec<MirrorCandidate>>;
}

/// The accepted probe of a race
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaceWinner {
    /// Address of the winning candidate
    pub address: String,

    /// Body served by the winning candidate
    pub body: String,
}

/// Races one probe per candidate and returns the first accepted body
///
/// Each probe runs as its own task bounded by `timeout`; a probe that errors
/// or times out is rejected. Once a probe is accepted the remaining probes are
/// aborted, so nothing a losing probe does can outlive this call.
///
/// # Errors
///
/// `SourceError::NoUsableMirror` when `candidates` is empty (no task is
/// started) or when every probe was rejected.
pub async fn race_probes<F, Fut>(
    candidates: Vec<MirrorCandidate>,
    probe: F,
    timeout: Duration,
) -> SourceResult<RaceWinner>
where
    F: Fn(MirrorCandidate) -> Fut,
    Fut: Future<Output = SourceResult<String>> + Send + 'static,
{
    let total = candidates.len();
    if total == 0 {
        return Err(SourceError::NoUsableMirror { candidates: 0 });
    }

    let mut probes = JoinSet::new();
    for candidate in candidates {
        let address = candidate.address.clone();
        let attempt = probe(candidate);
        probes.spawn(async move {
            let result = match tokio::time::timeout(timeout, attempt).await {
                Ok(result) => result,
                Err(_) => Err(SourceError::Timeout(timeout)),
            };
            (address, result)
        });
    }

    while let Some(joined) = probes.join_next().await {
        match joined {
            Ok((address, Ok(body))) => {
                tracing::debug!("Found a working mirror: {}", address);
                probes.abort_all();
                return Ok(RaceWinner { address, body });
            }
            Ok((address, Err(e))) => {
                tracing::debug!("Rejected mirror {}: {}", address, e);
            }
            Err(e) => {
                tracing::warn!("Mirror probe task failed: {}", e);
            }
        }
    }

    Err(SourceError::NoUsableMirror { candidates: total })
}

/// Races HTTP probes and validates the pages they return
///
/// A page is accepted only if it contains an element matching the marker
/// selector, which rules out mirrors that resolve but serve parked pages.
#[derive(Debug, Clone)]
pub struct MirrorRacer {
    client: Client,
    marker: String,
}

impl MirrorRacer {
    /// Creates a racer probing with `client` and accepting pages containing `marker`
    pub fn new(client: Client, marker: impl Into<String>) -> Self {
        Self {
            client,
            marker: marker.into(),
        }
    }

    /// Races all candidates
    ///
    /// `build_url` turns a candidate into the full query URL to probe. A
    /// candidate whose URL cannot be built counts as a rejected probe.
    pub async fn race<B>(
        &self,
        candidates: Vec<MirrorCandidate>,
        build_url: B,
        timeout: Duration,
    ) -> SourceResult<RaceWinner>
    where
        B: Fn(&MirrorCandidate) -> SourceResult<Url>,
    {
        tracing::debug!("Racing {} mirrors", candidates.len());

        let probe = |candidate: MirrorCandidate| {
            let url = build_url(&candidate);
            let client = self.client.clone();
            let marker = self.marker.clone();
            async move {
                let url = url.map_err(|e| {
                    tracing::info!(
                        "Could not build url for mirror {}: {}",
                        candidate.address,
                        e
                    );
                    e
                })?;
                let body = fetch_page(&client, &url).await?;
                if has_marker(&body, &marker) {
                    Ok(body)
                } else {
                    Err(SourceError::MissingMarker {
                        url: url.to_string(),
                        marker,
                    })
                }
            }
        };

        race_probes(candidates, probe, timeout).await
    }
}
