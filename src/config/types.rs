use crate::search::SourceId;
use serde::Deserialize;
use std::time::Duration;

/// Browser-like user agent; several sites refuse obvious bot agents
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 6.1; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/62.0.3202.62 Safari/537.36";

/// Main configuration structure for Torrent-Ripple
///
/// Every section is optional in the TOML file; missing sections and keys
/// fall back to the built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub search: SearchConfig,
    pub http: HttpConfig,
    pub sources: SourcesConfig,
}

/// Search behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Per-source deadline, in seconds
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Sources queried when none are given on the command line
    pub sources: Vec<SourceId>,
}

impl SearchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 20,
            sources: SourceId::ALL.to_vec(),
        }
    }
}

/// HTTP client configuration shared by every source client
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// User agent sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// TCP connect timeout, in seconds
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            connect_timeout_secs: 10,
        }
    }
}

/// Endpoints for each supported site
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// archive.org base URL
    #[serde(rename = "arc-url")]
    pub arc_url: String,

    /// torrentdownloads base URL
    #[serde(rename = "td-url")]
    pub td_url: String,

    /// 1337x base URL
    #[serde(rename = "otts-url")]
    pub otts_url: String,

    /// YggTorrent base URL
    #[serde(rename = "ygg-url")]
    pub ygg_url: String,

    /// Proxy directory page listing the current Pirate Bay mirrors
    #[serde(rename = "tpb-proxy-list-url")]
    pub tpb_proxy_list_url: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            arc_url: "https://archive.org".to_string(),
            td_url: "https://www.torrentdownloads.me".to_string(),
            otts_url: "https://1337x.to".to_string(),
            ygg_url: "https://yggtorrent.to".to_string(),
            tpb_proxy_list_url: "https://proxybay.bz/".to_string(),
        }
    }
}
