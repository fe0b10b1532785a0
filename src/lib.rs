//! Torrent-Ripple: a multi-source torrent search aggregator
//!
//! This crate fans a single query out to several independent torrent sites,
//! tolerates the failure of any subset of them, races volatile mirror lists
//! for sites whose address keeps moving, and merges everything into a single
//! list ranked by seeders.

pub mod config;
pub mod engine;
pub mod output;
pub mod search;
pub mod sources;

use std::time::Duration;
use thiserror::Error;

/// Main error type for Torrent-Ripple operations
#[derive(Debug, Error)]
pub enum RippleError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Search input should not be empty")]
    EmptyQuery,

    #[error("At least one source must be selected")]
    NoSources,

    #[error("Search timeout must be greater than zero")]
    ZeroTimeout,

    #[error("Unknown source: {0}")]
    UnknownSource(String),

    #[error("All {} searches returned an error", .failures.len())]
    AllSourcesFailed {
        failures: Vec<search::SourceFailure>,
    },
}

/// Errors raised by a single source lookup
///
/// None of these are fatal to an aggregate search: they are recorded against
/// the source that produced them.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Status code error for {url}: {status}")]
    Status { url: String, status: u16 },

    #[error("Request timeout after {0:?}")]
    Timeout(Duration),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Invalid CSS selector {0}")]
    Selector(String),

    #[error("Page at {url} has no {marker} element")]
    MissingMarker { url: String, marker: String },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Could not build search URL from {0}")]
    InvalidBaseUrl(String),

    #[error("Mirror discovery failed: {0}")]
    MirrorDiscovery(Box<SourceError>),

    #[error("No usable mirror among {candidates} candidates")]
    NoUsableMirror { candidates: usize },

    #[error("Source {0} has no registered client")]
    NotRegistered(search::SourceId),

    #[error("Search task panicked: {0}")]
    Panicked(String),

    #[error("Search task ended without reporting an outcome")]
    Lost,
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Torrent-Ripple operations
pub type Result<T> = std::result::Result<T, RippleError>;

/// Result type alias for single-source operations
pub type SourceResult<T> = std::result::Result<T, SourceError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use engine::lookup;
pub use search::{
    rank, AggregateResult, Count, MirrorCandidate, SearchRequest, SourceId, SourceOutcome,
    TorrentResult,
};
pub use sources::{SourceRegistry, TorrentSource};
