//! The Pirate Bay client
//!
//! The Pirate Bay has no stable address. Its current mirrors are read from a
//! proxy directory page and raced against each other; the first mirror that
//! serves a genuine results page provides the listings. Everything needed is
//! on the results page itself, magnet links included.
//!
//! Both steps share the search deadline. The directory may use at most half of
//! it, and the race gets whatever is left.

use crate::config::HttpConfig;
use crate::engine::{MirrorDirectory, MirrorRacer};
use crate::search::{Count, MirrorCandidate, SourceId, TorrentResult};
use crate::sources::html::{nth_href, nth_text, resolve_link, selector, text_of};
use crate::sources::{
    build_http_client, fetch_page, parse_base_url, url_with_segments, TorrentSource,
};
use crate::{SourceError, SourceResult};
use async_trait::async_trait;
use scraper::Html;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use url::Url;

/// Element only present on a genuine results page
pub const SEARCH_RESULT_MARKER: &str = "#searchResult";

/// Kept back from the race so it reports before the search deadline
const DEADLINE_MARGIN: Duration = Duration::from_millis(100);

/// Reads the current mirror list from a proxy directory page
pub struct ProxyDirectory {
    list_url: Url,
    http: HttpConfig,
}

impl ProxyDirectory {
    pub fn new(list_url: Url, http: HttpConfig) -> Self {
        Self { list_url, http }
    }
}

#[async_trait]
impl MirrorDirectory for ProxyDirectory {
    async fn list_candidates(&self, timeout: Duration) -> SourceResult<Vec<MirrorCandidate>> {
        let client = build_http_client(&self.http, timeout)?;
        let body = fetch_page(&client, &self.list_url).await?;
        let candidates = parse_proxy_page(&body)?;
        tracing::debug!(
            "Found {} Pirate Bay mirrors on {}",
            candidates.len(),
            self.list_url
        );
        Ok(candidates)
    }
}

/// Extracts mirror addresses from a proxy directory page
///
/// Entries are lowercased. Bare host names get an `https://` scheme.
pub fn parse_proxy_page(html: &str) -> SourceResult<Vec<MirrorCandidate>> {
    let row_sel = selector(".proxies tbody tr")?;
    let link_sel = selector("a")?;

    let document = Html::parse_document(html);
    let mut candidates = Vec::new();

    for row in document.select(&row_sel) {
        let address = nth_text(row, &link_sel, 0).to_lowercase();
        if address.is_empty() {
            tracing::debug!("Could not find an url for a proxy");
            continue;
        }

        let address = if address.starts_with("http://") || address.starts_with("https://") {
            address
        } else {
            format!("https://{}", address)
        };
        candidates.push(MirrorCandidate::new(address));
    }

    Ok(candidates)
}

pub struct ThePirateBaySource {
    directory: Arc<dyn MirrorDirectory>,
    http: HttpConfig,
}

impl ThePirateBaySource {
    pub fn new(directory: impl MirrorDirectory + 'static, http: HttpConfig) -> Self {
        Self {
            directory: Arc::new(directory),
            http,
        }
    }

    /// Builds the search URL on a mirror, e.g. `https://tpb.example/search/dumas/0/99/0`
    pub fn search_url(mirror: &str, query: &str) -> SourceResult<Url> {
        let base = parse_base_url(mirror)?;
        url_with_segments(&base, &["search", query, "0", "99", "0"])
    }
}

#[async_trait]
impl TorrentSource for ThePirateBaySource {
    fn id(&self) -> SourceId {
        SourceId::ThePirateBay
    }

    async fn search(&self, query: &str, timeout: Duration) -> SourceResult<Vec<TorrentResult>> {
        let started = Instant::now();
        let discovery_timeout = timeout / 2;
        let candidates = match tokio::time::timeout(
            discovery_timeout,
            self.directory.list_candidates(discovery_timeout),
        )
        .await
        {
            Ok(listed) => listed,
            Err(_) => Err(SourceError::Timeout(discovery_timeout)),
        }
        .map_err(|e| SourceError::MirrorDiscovery(Box::new(e)))?;

        let race_timeout = timeout
            .saturating_sub(started.elapsed())
            .saturating_sub(DEADLINE_MARGIN);
        if race_timeout.is_zero() {
            tracing::info!("No time left to race {} mirrors", candidates.len());
            return Err(SourceError::NoUsableMirror {
                candidates: candidates.len(),
            });
        }
        tracing::debug!("Racing mirrors with {:?} left", race_timeout);

        let racer = MirrorRacer::new(
            build_http_client(&self.http, race_timeout)?,
            SEARCH_RESULT_MARKER,
        );
        let winner = racer
            .race(
                candidates,
                |candidate| Self::search_url(&candidate.address, query),
                race_timeout,
            )
            .await?;

        let base = parse_base_url(&winner.address)?;
        parse_search_page(&winner.body, &base)
    }
}

/// Extracts every listing from a results page
///
/// The last table row is navigation, not a result. Rows without a magnet
/// link are skipped.
pub fn parse_search_page(html: &str, base_url: &Url) -> SourceResult<Vec<TorrentResult>> {
    let row_sel = selector("#searchResult tbody tr")?;
    let link_sel = selector("a")?;
    let name_sel = selector(".detLink")?;
    let info_sel = selector("font")?;
    let cell_sel = selector("td")?;

    let document = Html::parse_document(html);
    let rows: Vec<_> = document.select(&row_sel).collect();
    let end = rows.len().saturating_sub(1);

    let mut results = Vec::new();
    for &row in &rows[..end] {
        let Some(magnet) = nth_href(row, &link_sel, 3) else {
            tracing::debug!("Could not find a magnet for a torrent so ignoring it");
            continue;
        };

        let mut result = TorrentResult::new(SourceId::ThePirateBay, nth_text(row, &name_sel, 0));
        result.magnet = Some(magnet.to_string());
        result.description_url =
            nth_href(row, &name_sel, 0).and_then(|href| resolve_link(href, base_url));

        // "Uploaded 03-14 2019, Size 1.2 GiB, ULed by someone"
        if let Some(info) = row.select(&info_sel).next() {
            let info = text_of(info);
            let mut parts = info.split(',');
            if let (Some(uploaded), Some(size)) = (parts.next(), parts.next()) {
                result.upload_date = uploaded.replace("Uploaded", "").trim().to_string();
                result.size = size.replace("Size", "").trim().to_string();
            }
        }

        result.seeders = Count::parse(&nth_text(row, &cell_sel, 2));
        result.leechers = Count::parse(&nth_text(row, &cell_sel, 3));
        results.push(result);
    }

    Ok(results)
}
