//! 1337x client

use crate::config::HttpConfig;
use crate::search::{Count, SourceId, TorrentResult};
use crate::sources::html::{nth_href, nth_text, resolve_link, selector};
use crate::sources::{build_http_client, fetch_page, url_with_segments, TorrentSource};
use crate::SourceResult;
use async_trait::async_trait;
use scraper::Html;
use std::time::Duration;
use url::Url;

pub struct X1337Source {
    base_url: Url,
    http: HttpConfig,
}

impl X1337Source {
    pub fn new(base_url: Url, http: HttpConfig) -> Self {
        Self { base_url, http }
    }

    /// Builds the search URL, e.g. `https://1337x.to/search/Dumas/1/`
    pub fn search_url(&self, query: &str) -> SourceResult<Url> {
        url_with_segments(&self.base_url, &["search", query, "1", ""])
    }
}

#[async_trait]
impl TorrentSource for X1337Source {
    fn id(&self) -> SourceId {
        SourceId::X1337
    }

    async fn search(&self, query: &str, timeout: Duration) -> SourceResult<Vec<TorrentResult>> {
        let client = build_http_client(&self.http, timeout)?;
        let url = self.search_url(query)?;
        let body = fetch_page(&client, &url).await?;
        parse_search_page(&body, &self.base_url)
    }
}

/// Extracts every listing from a 1337x results table
///
/// Columns: name, seeders, leechers, upload date, size, uploader. The name
/// column starts with an icon link, so the description link is the second one.
pub fn parse_search_page(html: &str, base_url: &Url) -> SourceResult<Vec<TorrentResult>> {
    let row_sel = selector("tbody tr")?;
    let link_sel = selector("a")?;
    let cell_sel = selector("td")?;

    let document = Html::parse_document(html);
    let mut results = Vec::new();

    for row in document.select(&row_sel) {
        let Some(description_url) =
            nth_href(row, &link_sel, 1).and_then(|href| resolve_link(href, base_url))
        else {
            tracing::debug!("Could not find a description page for a torrent so ignoring it");
            continue;
        };

        let mut result = TorrentResult::new(SourceId::X1337, nth_text(row, &link_sel, 1));
        result.description_url = Some(description_url);
        result.seeders = Count::parse(&nth_text(row, &cell_sel, 1));
        result.leechers = Count::parse(&nth_text(row, &cell_sel, 2));
        result.upload_date = nth_text(row, &cell_sel, 3);

        // The size cell also holds a hidden copy of the seeders count
        if let Some(size) = row
            .select(&cell_sel)
            .nth(4)
            .and_then(|cell| cell.text().map(str::trim).find(|t| !t.is_empty()))
        {
            result.size = size.to_string();
        }

        results.push(result);
    }

    Ok(results)
}
