//! YggTorrent client

use crate::config::HttpConfig;
use crate::search::{Count, SourceId, TorrentResult};
use crate::sources::html::{nth_href, nth_text, resolve_link, selector};
use crate::sources::{build_http_client, fetch_page, url_with_segments, TorrentSource};
use crate::SourceResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use scraper::Html;
use std::time::Duration;
use url::Url;

const UPLOAD_DATE_FORMAT: &str = "%Y/%m/%d %H:%M";

pub struct YggSource {
    base_url: Url,
    http: HttpConfig,
}

impl YggSource {
    pub fn new(base_url: Url, http: HttpConfig) -> Self {
        Self { base_url, http }
    }

    /// Builds the search URL, e.g. `https://yggtorrent.to/engine/search?do=search&name=dumas`
    pub fn search_url(&self, query: &str) -> SourceResult<Url> {
        let mut url = url_with_segments(&self.base_url, &["engine", "search"])?;
        url.query_pairs_mut()
            .append_pair("do", "search")
            .append_pair("name", query);
        Ok(url)
    }
}

#[async_trait]
impl TorrentSource for YggSource {
    fn id(&self) -> SourceId {
        SourceId::Ygg
    }

    async fn search(&self, query: &str, timeout: Duration) -> SourceResult<Vec<TorrentResult>> {
        let client = build_http_client(&self.http, timeout)?;
        let url = self.search_url(query)?;
        let body = fetch_page(&client, &url).await?;
        parse_search_page(&body, &self.base_url)
    }
}

/// Extracts every listing from a YggTorrent results table
pub fn parse_search_page(html: &str, base_url: &Url) -> SourceResult<Vec<TorrentResult>> {
    let row_sel = selector(".table tbody tr")?;
    let link_sel = selector("td a")?;
    let cell_sel = selector("td")?;
    let timestamp_sel = selector(".hidden")?;

    let document = Html::parse_document(html);
    let mut results = Vec::new();

    for row in document.select(&row_sel) {
        let Some(description_url) =
            nth_href(row, &link_sel, 1).and_then(|href| resolve_link(href, base_url))
        else {
            tracing::debug!("Could not find description URL for a torrent so ignoring it");
            continue;
        };

        let mut result = TorrentResult::new(SourceId::Ygg, nth_text(row, &link_sel, 1));
        result.description_url = Some(description_url);

        if let Some(cell) = row.select(&cell_sel).nth(4) {
            result.upload_date = format_timestamp(&nth_text(cell, &timestamp_sel, 0));
        }

        let size = nth_text(row, &cell_sel, 5);
        if !size.is_empty() {
            result.size = size;
        }

        result.seeders = Count::parse(&nth_text(row, &cell_sel, 7));
        result.leechers = Count::parse(&nth_text(row, &cell_sel, 8));
        results.push(result);
    }

    Ok(results)
}

/// Formats a unix timestamp for display, in UTC
///
/// Returns an empty string if `text` is not a valid timestamp.
fn format_timestamp(text: &str) -> String {
    text.trim()
        .parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .map(|date| date.format(UPLOAD_DATE_FORMAT).to_string())
        .unwrap_or_default()
}
