use crate::search::SourceId;
use crate::{RippleError, SourceError};
use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;

/// A seeder or leecher count as reported by a site
///
/// Sites regularly print placeholders instead of numbers, so "unknown" is a
/// value of its own. It orders below every known count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Count {
    /// The site did not report a usable number
    #[default]
    Unknown,

    /// A reported, non-negative count
    Known(u32),
}

impl Count {
    /// Parses a count from page text
    ///
    /// Surrounding whitespace is ignored. Anything that is not a non-negative
    /// integer becomes `Count::Unknown`.
    pub fn parse(text: &str) -> Self {
        text.trim()
            .parse::<u32>()
            .map(Self::Known)
            .unwrap_or(Self::Unknown)
    }
}

impl From<u32> for Count {
    fn from(n: u32) -> Self {
        Self::Known(n)
    }
}

impl fmt::Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(n) => write!(f, "{}", n),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// One normalized torrent listing
///
/// Produced only by source clients. The engine reorders collections of these
/// but never touches their fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TorrentResult {
    /// Site the result came from
    pub source: SourceId,

    /// Torrent name
    pub name: String,

    /// Description page with more details, including the torrent file address
    pub description_url: Option<String>,

    /// Magnet link, when the search page exposes it directly
    pub magnet: Option<String>,

    /// Direct torrent file address
    pub file_url: Option<String>,

    /// Display size, "Unknown" when the site does not report one
    pub size: String,

    /// Display upload date, empty when not reported
    pub upload_date: String,

    pub seeders: Count,
    pub leechers: Count,
}

impl TorrentResult {
    /// Creates a result with only a source and name; everything else unknown
    pub fn new(source: SourceId, name: impl Into<String>) -> Self {
        Self {
            source,
            name: name.into(),
            description_url: None,
            magnet: None,
            file_url: None,
            size: "Unknown".to_string(),
            upload_date: String::new(),
            seeders: Count::Unknown,
            leechers: Count::Unknown,
        }
    }
}

/// A validated search dispatched to a set of sources
#[derive(Debug, Clone)]
pub struct SearchRequest {
    query: String,
    timeout: Duration,
    sources: BTreeSet<SourceId>,
}

impl SearchRequest {
    /// Builds a request, trimming the query
    ///
    /// # Errors
    ///
    /// * `RippleError::EmptyQuery` - the query is blank after trimming
    /// * `RippleError::NoSources` - no source was selected
    /// * `RippleError::ZeroTimeout` - the per-source timeout is zero
    pub fn new(
        query: &str,
        timeout: Duration,
        sources: impl IntoIterator<Item = SourceId>,
    ) -> Result<Self, RippleError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(RippleError::EmptyQuery);
        }
        if timeout.is_zero() {
            return Err(RippleError::ZeroTimeout);
        }
        let sources: BTreeSet<SourceId> = sources.into_iter().collect();
        if sources.is_empty() {
            return Err(RippleError::NoSources);
        }
        Ok(Self {
            query: query.to_string(),
            timeout,
            sources,
        })
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Deadline applied to each source independently
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn sources(&self) -> &BTreeSet<SourceId> {
        &self.sources
    }
}

/// A source that failed, and why
#[derive(Debug)]
pub struct SourceFailure {
    pub source_id: SourceId,
    pub error: SourceError,
}

impl fmt::Display for SourceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.source_id.display_name(), self.error)
    }
}

/// What one dispatched source task reports, exactly once
#[derive(Debug)]
pub enum SourceOutcome {
    Success {
        source_id: SourceId,
        results: Vec<TorrentResult>,
    },
    Failure(SourceFailure),
}

impl SourceOutcome {
    pub fn failure(source_id: SourceId, error: SourceError) -> Self {
        Self::Failure(SourceFailure { source_id, error })
    }

    /// The source this outcome belongs to
    pub fn source_id(&self) -> SourceId {
        match self {
            Self::Success { source_id, .. } => *source_id,
            Self::Failure(failure) => failure.source_id,
        }
    }
}

/// The merged, ranked answer to one search request
#[derive(Debug, Default)]
pub struct AggregateResult {
    /// Results from every successful source, ranked by seeders
    pub merged: Vec<TorrentResult>,

    /// Sources that failed
    pub failed_sources: BTreeSet<SourceId>,

    /// The errors behind `failed_sources`, in arrival order
    pub failures: Vec<SourceFailure>,

    /// True only when every dispatched source failed
    pub all_failed: bool,
}

/// One candidate address for a mirror-based site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorCandidate {
    pub address: String,
}

impl MirrorCandidate {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }
}
