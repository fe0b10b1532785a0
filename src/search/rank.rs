use crate::search::TorrentResult;

/// Orders results by seeders, most seeded first
///
/// Unknown seeder counts sort after every known count. The sort is stable, so
/// results with equal counts keep their insertion order and ranking the same
/// input twice yields the same sequence.
pub fn rank(mut results: Vec<TorrentResult>) -> Vec<TorrentResult> {
    results.sort_by(|a, b| b.seeders.cmp(&a.seeders));
    results
}
