//! Search data contracts shared by the engine, the sources and the output layer
//!
//! # Components
//!
//! - `SourceId`: identifies one supported torrent site
//! - `SearchRequest`: a validated, immutable query dispatched to several sources
//! - `TorrentResult`: one normalized result row produced by a source
//! - `SourceOutcome` / `AggregateResult`: what the engine collects and returns
//! - `rank`: the seeder-based ordering applied to the merged results

mod rank;
mod source_id;
mod types;

pub use rank::rank;
pub use source_id::SourceId;
pub use types::{
    AggregateResult, Count, MirrorCandidate, SearchRequest, SourceFailure, SourceOutcome,
    TorrentResult,
};
