//! HTTP fetcher shared by every source client
//!
//! This module handles:
//! - Building HTTP clients with the configured user agent and deadlines
//! - GET requests returning a page body
//! - Mapping transport errors and non-2xx statuses to `SourceError`
//! - Building percent-encoded search URLs from a site base address

use crate::config::HttpConfig;
use crate::{SourceError, SourceResult};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Builds an HTTP client for one search
///
/// Each search builds its own client so no connection state is shared
/// between concurrent source tasks.
///
/// # Arguments
///
/// * `config` - The HTTP configuration
/// * `timeout` - Total deadline for any single request made with the client
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use torrent_ripple::config::HttpConfig;
/// use torrent_ripple::sources::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default(), Duration::from_secs(10)).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig, timeout: Duration) -> Result<Client, reqwest::Error> {
    let connect_timeout = Duration::from_secs(config.connect_timeout_secs).min(timeout);

    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(timeout)
        .connect_timeout(connect_timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page and returns its body
///
/// | Condition | Result |
/// |-----------|--------|
/// | HTTP 2xx | `Ok(body)` |
/// | Other HTTP status | `SourceError::Status` |
/// | Transport error or client timeout | `SourceError::Http` |
pub async fn fetch_page(client: &Client, url: &Url) -> SourceResult<String> {
    tracing::debug!("GET {}", url);

    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| http_error(url, e))?;

    let status = response.status();
    tracing::debug!("{} answered {}", url, status);

    if !status.is_success() {
        return Err(SourceError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|e| http_error(url, e))
}

fn http_error(url: &Url, source: reqwest::Error) -> SourceError {
    if source.is_timeout() {
        tracing::debug!("Request to {} timed out", url);
    }
    SourceError::Http {
        url: url.to_string(),
        source,
    }
}

/// Appends path segments to a base address, percent-encoding each one
///
/// An empty final segment produces a trailing slash.
pub fn url_with_segments(base: &Url, segments: &[&str]) -> SourceResult<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| SourceError::InvalidBaseUrl(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Parses a configured site address
pub fn parse_base_url(address: &str) -> SourceResult<Url> {
    let url = Url::parse(address)?;
    if url.cannot_be_a_base() {
        return Err(SourceError::InvalidBaseUrl(address.to_string()));
    }
    Ok(url)
}
