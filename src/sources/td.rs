//! torrentdownloads client

use crate::config::HttpConfig;
use crate::search::{Count, SourceId, TorrentResult};
use crate::sources::html::{element_children, nth_href, nth_text, resolve_link, selector};
use crate::sources::{build_http_client, fetch_page, url_with_segments, TorrentSource};
use crate::SourceResult;
use async_trait::async_trait;
use scraper::Html;
use std::time::Duration;
use url::Url;

/// Children of the results container before this index are page furniture
const FIRST_RESULT_INDEX: usize = 10;

/// The last two children of the results container are page furniture too
const TRAILING_JUNK: usize = 2;

pub struct TorrentDownloadsSource {
    base_url: Url,
    http: HttpConfig,
}

impl TorrentDownloadsSource {
    pub fn new(base_url: Url, http: HttpConfig) -> Self {
        Self { base_url, http }
    }

    /// Builds the search URL, e.g. `https://www.torrentdownloads.me/search/?search=Dumas`
    pub fn search_url(&self, query: &str) -> SourceResult<Url> {
        let mut url = url_with_segments(&self.base_url, &["search", ""])?;
        url.query_pairs_mut().append_pair("search", query);
        Ok(url)
    }
}

#[async_trait]
impl TorrentSource for TorrentDownloadsSource {
    fn id(&self) -> SourceId {
        SourceId::TorrentDownloads
    }

    async fn search(&self, query: &str, timeout: Duration) -> SourceResult<Vec<TorrentResult>> {
        let client = build_http_client(&self.http, timeout)?;
        let url = self.search_url(query)?;
        let body = fetch_page(&client, &url).await?;
        parse_search_page(&body, &self.base_url)
    }
}

/// Extracts every listing from a torrentdownloads results page
pub fn parse_search_page(html: &str, base_url: &Url) -> SourceResult<Vec<TorrentResult>> {
    let container_sel = selector(".inner_container")?;
    let link_sel = selector("p a")?;
    let span_sel = selector("span")?;

    let document = Html::parse_document(html);
    let rows: Vec<_> = document
        .select(&container_sel)
        .flat_map(element_children)
        .collect();
    let end = rows.len().saturating_sub(TRAILING_JUNK);

    let mut results = Vec::new();
    for &row in rows.iter().take(end).skip(FIRST_RESULT_INDEX) {
        let Some(description_url) =
            nth_href(row, &link_sel, 0).and_then(|href| resolve_link(href, base_url))
        else {
            tracing::debug!("Could not find the description URL of a torrent");
            continue;
        };

        let mut result = TorrentResult::new(SourceId::TorrentDownloads, nth_text(row, &link_sel, 0));
        result.description_url = Some(description_url);
        result.leechers = Count::parse(&nth_text(row, &span_sel, 1));
        result.seeders = Count::parse(&nth_text(row, &span_sel, 2));

        let size = nth_text(row, &span_sel, 3);
        if !size.is_empty() {
            result.size = size;
        }

        results.push(result);
    }

    Ok(results)
}
