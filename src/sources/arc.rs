//! archive.org client
//!
//! Search results only carry a name and a description page; the torrent file
//! address lives on the description page.

use crate::config::HttpConfig;
use crate::search::{SourceId, TorrentResult};
use crate::sources::html::{nth_href, resolve_link, selector, text_of};
use crate::sources::{build_http_client, fetch_page, url_with_segments, TorrentSource};
use crate::SourceResult;
use async_trait::async_trait;
use scraper::Html;
use std::time::Duration;
use url::Url;

/// Restricts archive.org results to items distributed as torrents
const TORRENT_FORMAT_FILTER: &str = r#" AND format:"Archive BitTorrent""#;

pub struct ArchiveSource {
    base_url: Url,
    http: HttpConfig,
}

impl ArchiveSource {
    pub fn new(base_url: Url, http: HttpConfig) -> Self {
        Self { base_url, http }
    }

    /// Builds the search URL, e.g.
    /// `https://archive.org/search.php?query=Dumas+AND+format%3A%22Archive+BitTorrent%22`
    pub fn search_url(&self, query: &str) -> SourceResult<Url> {
        let mut url = url_with_segments(&self.base_url, &["search.php"])?;
        url.query_pairs_mut()
            .append_pair("query", &format!("{}{}", query, TORRENT_FORMAT_FILTER));
        Ok(url)
    }
}

#[async_trait]
impl TorrentSource for ArchiveSource {
    fn id(&self) -> SourceId {
        SourceId::Archive
    }

    async fn search(&self, query: &str, timeout: Duration) -> SourceResult<Vec<TorrentResult>> {
        let client = build_http_client(&self.http, timeout)?;
        let url = self.search_url(query)?;
        let body = fetch_page(&client, &url).await?;
        parse_search_page(&body, &self.base_url)
    }
}

/// Extracts every listing from an archive.org results page
pub fn parse_search_page(html: &str, base_url: &Url) -> SourceResult<Vec<TorrentResult>> {
    let item_sel = selector(".item-ttl.C.C2")?;
    let link_sel = selector("a")?;
    let title_sel = selector(".ttl")?;

    let document = Html::parse_document(html);
    let mut results = Vec::new();

    for item in document.select(&item_sel) {
        let Some(description_url) =
            nth_href(item, &link_sel, 0).and_then(|href| resolve_link(href, base_url))
        else {
            tracing::debug!("Could not find a description page for a torrent so ignoring it");
            continue;
        };

        let name = item
            .select(&title_sel)
            .next()
            .map(|el| text_of(el).trim().to_string())
            .unwrap_or_default();

        let mut result = TorrentResult::new(SourceId::Archive, name);
        result.description_url = Some(description_url);
        results.push(result);
    }

    Ok(results)
}
