//! Source clients for every supported torrent site
//!
//! This module contains:
//! - The `TorrentSource` trait every site client implements
//! - The `SourceRegistry` mapping source ids to clients
//! - HTTP fetching and HTML helpers shared by the clients
//! - One client per site

mod arc;
mod fetcher;
pub mod html;
mod otts;
mod td;
mod tpb;
mod ygg;

pub use arc::ArchiveSource;
pub use fetcher::{build_http_client, fetch_page, parse_base_url, url_with_segments};
pub use otts::X1337Source;
pub use td::TorrentDownloadsSource;
pub use tpb::{ProxyDirectory, ThePirateBaySource, SEARCH_RESULT_MARKER};
pub use ygg::YggSource;

use crate::config::Config;
use crate::search::{SourceId, TorrentResult};
use crate::{ConfigError, ConfigResult, SourceResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// A client able to search one torrent site
///
/// Implementations must be safe to call from several tasks at once and must
/// not share mutable state between calls.
#[async_trait]
pub trait TorrentSource: Send + Sync {
    /// The site this client searches
    fn id(&self) -> SourceId;

    /// Searches the site for `query`
    ///
    /// # Arguments
    ///
    /// * `query` - Trimmed, non-empty search text
    /// * `timeout` - Deadline for the HTTP requests made by this search
    ///
    /// # Returns
    ///
    /// Every listing found on the first results page. An empty list is a
    /// successful search with no match.
    async fn search(&self, query: &str, timeout: Duration) -> SourceResult<Vec<TorrentResult>>;
}

/// Maps source ids to their clients
#[derive(Clone, Default)]
pub struct SourceRegistry {
    clients: HashMap<SourceId, Arc<dyn TorrentSource>>,
}

impl SourceRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry with one client per supported site
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if a configured endpoint cannot be
    /// used as a base address.
    pub fn from_config(config: &Config) -> ConfigResult<Self> {
        let http = &config.http;
        let endpoints = &config.sources;

        let mut registry = Self::new();
        registry.register(Arc::new(ArchiveSource::new(
            endpoint(&endpoints.arc_url)?,
            http.clone(),
        )));
        registry.register(Arc::new(TorrentDownloadsSource::new(
            endpoint(&endpoints.td_url)?,
            http.clone(),
        )));
        registry.register(Arc::new(ThePirateBaySource::new(
            ProxyDirectory::new(endpoint(&endpoints.tpb_proxy_list_url)?, http.clone()),
            http.clone(),
        )));
        registry.register(Arc::new(X1337Source::new(
            endpoint(&endpoints.otts_url)?,
            http.clone(),
        )));
        registry.register(Arc::new(YggSource::new(
            endpoint(&endpoints.ygg_url)?,
            http.clone(),
        )));

        Ok(registry)
    }

    /// Registers a client under its own id, replacing any previous one
    pub fn register(&mut self, client: Arc<dyn TorrentSource>) {
        let id = client.id();
        if self.clients.insert(id, client).is_some() {
            tracing::debug!("Replaced client for source {}", id);
        }
    }

    /// Returns the client registered for `id`
    pub fn get(&self, id: SourceId) -> Option<Arc<dyn TorrentSource>> {
        self.clients.get(&id).cloned()
    }

    /// Registered ids, in display order
    pub fn ids(&self) -> Vec<SourceId> {
        let mut ids: Vec<SourceId> = self.clients.keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

fn endpoint(address: &str) -> ConfigResult<Url> {
    parse_base_url(address).map_err(|e| ConfigError::InvalidUrl(format!("{}: {}", address, e)))
}
