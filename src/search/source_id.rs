//! Source identifiers for every supported torrent site
//!
//! The set of ids is closed: adding a site means adding a variant here and
//! registering a client for it in `SourceRegistry`.

use crate::RippleError;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Identifies one torrent site
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
pub enum SourceId {
    /// archive.org
    #[serde(rename = "arc")]
    Archive,

    /// torrentdownloads
    #[serde(rename = "td")]
    TorrentDownloads,

    /// The Pirate Bay, reached through its proxy directory
    #[serde(rename = "tpb")]
    ThePirateBay,

    /// 1337x
    #[serde(rename = "otts")]
    X1337,

    /// YggTorrent
    #[serde(rename = "ygg")]
    Ygg,
}

impl SourceId {
    /// Every supported source, in the order they are listed to the user
    pub const ALL: [SourceId; 5] = [
        SourceId::Archive,
        SourceId::TorrentDownloads,
        SourceId::ThePirateBay,
        SourceId::X1337,
        SourceId::Ygg,
    ];

    /// Returns the short name used on the command line and in config files
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::Archive => "arc",
            Self::TorrentDownloads => "td",
            Self::ThePirateBay => "tpb",
            Self::X1337 => "otts",
            Self::Ygg => "ygg",
        }
    }

    /// Returns the human-readable site name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Archive => "Archive",
            Self::TorrentDownloads => "Torrent Downloads",
            Self::ThePirateBay => "The Pirate Bay",
            Self::X1337 => "1337x",
            Self::Ygg => "Ygg Torrent",
        }
    }

    /// Parses a source from its short name
    ///
    /// Returns None if the string doesn't match any known source.
    pub fn from_short_name(s: &str) -> Option<Self> {
        match s {
            "arc" => Some(Self::Archive),
            "td" => Some(Self::TorrentDownloads),
            "tpb" => Some(Self::ThePirateBay),
            "otts" => Some(Self::X1337),
            "ygg" => Some(Self::Ygg),
            _ => None,
        }
    }

    /// Parses a list of short names into a source set
    ///
    /// `all` anywhere in the list selects every source. Duplicates collapse,
    /// surrounding whitespace is ignored and empty entries are skipped.
    ///
    /// # Errors
    ///
    /// Returns `RippleError::UnknownSource` naming the first unrecognized entry.
    pub fn parse_list<I, S>(names: I) -> Result<BTreeSet<SourceId>, RippleError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selected = BTreeSet::new();
        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() {
                continue;
            }
            if name == "all" {
                return Ok(Self::ALL.into_iter().collect());
            }
            let id = Self::from_short_name(name)
                .ok_or_else(|| RippleError::UnknownSource(name.to_string()))?;
            selected.insert(id);
        }
        Ok(selected)
    }
}

impl FromStr for SourceId {
    type Err = RippleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_short_name(s.trim()).ok_or_else(|| RippleError::UnknownSource(s.to_string()))
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}
