//! End-to-end searches across several sources with partial failures

use crate::fixtures::{archive_page, offline_config, serve_everything, x1337_page, ygg_page};
use std::time::{Duration, Instant};
use torrent_ripple::engine::lookup_with_observer;
use torrent_ripple::{
    lookup, Count, RippleError, SearchRequest, SourceError, SourceId, SourceRegistry,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_merges_and_ranks_across_sources() {
    let archive = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search.php"))
        .and(query_param(
            "query",
            r#"Monte Cristo AND format:"Archive BitTorrent""#,
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string(archive_page(&[(
            "MonteCristo",
            "Le Comte de Monte-Cristo",
        )])))
        .mount(&archive)
        .await;

    let x1337 = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/Monte%20Cristo/1/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(x1337_page(&[
            ("monte-cristo-1080p", 12),
            ("monte-cristo-720p", 80),
        ])))
        .mount(&x1337)
        .await;

    let ygg = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/engine/search"))
        .and(query_param("name", "Monte Cristo"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(ygg_page(&[("monte-cristo-ebook", 40)])),
        )
        .mount(&ygg)
        .await;

    let mut config = offline_config();
    config.sources.arc_url = archive.uri();
    config.sources.otts_url = x1337.uri();
    config.sources.ygg_url = ygg.uri();
    let registry = SourceRegistry::from_config(&config).unwrap();

    let request = SearchRequest::new(
        "  Monte Cristo ",
        Duration::from_secs(5),
        [SourceId::Archive, SourceId::X1337, SourceId::Ygg],
    )
    .unwrap();
    let aggregate = lookup(&registry, &request).await.unwrap();

    assert!(aggregate.failed_sources.is_empty());
    let ranked: Vec<(&str, Count)> = aggregate
        .merged
        .iter()
        .map(|r| (r.name.as_str(), r.seeders))
        .collect();
    assert_eq!(
        ranked,
        vec![
            ("monte-cristo-720p", Count::Known(80)),
            ("monte-cristo-ebook", Count::Known(40)),
            ("monte-cristo-1080p", Count::Known(12)),
            ("Le Comte de Monte-Cristo", Count::Unknown),
        ]
    );
    assert_eq!(
        aggregate.merged[3].description_url,
        Some(format!("{}/details/MonteCristo", archive.uri()))
    );
}

#[tokio::test]
async fn test_partial_failure_keeps_successful_results() {
    let x1337 = serve_everything(200, &x1337_page(&[("dumas", 5)])).await;
    let ygg = serve_everything(503, "Service Unavailable").await;

    let mut config = offline_config();
    config.sources.otts_url = x1337.uri();
    config.sources.ygg_url = ygg.uri();
    let registry = SourceRegistry::from_config(&config).unwrap();

    let request = SearchRequest::new(
        "dumas",
        Duration::from_secs(5),
        [SourceId::X1337, SourceId::Ygg, SourceId::Archive],
    )
    .unwrap();

    let mut observed = Vec::new();
    let aggregate = lookup_with_observer(&registry, &request, |f| observed.push(f.source_id))
        .await
        .unwrap();

    assert_eq!(aggregate.merged.len(), 1);
    assert_eq!(aggregate.merged[0].name, "dumas");
    assert!(!aggregate.all_failed);
    assert_eq!(
        aggregate.failed_sources.iter().copied().collect::<Vec<_>>(),
        vec![SourceId::Archive, SourceId::Ygg]
    );
    observed.sort();
    assert_eq!(observed, vec![SourceId::Archive, SourceId::Ygg]);

    let ygg_failure = aggregate
        .failures
        .iter()
        .find(|f| f.source_id == SourceId::Ygg)
        .unwrap();
    assert!(matches!(
        ygg_failure.error,
        SourceError::Status { status: 503, .. }
    ));
}

#[tokio::test]
async fn test_slow_source_times_out_without_delaying_the_rest() {
    let slow = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(ygg_page(&[("late", 1)]))
                .set_delay(Duration::from_secs(10)),
        )
        .mount(&slow)
        .await;
    let fast = serve_everything(200, &archive_page(&[("fast", "Fast")])).await;

    let mut config = offline_config();
    config.sources.ygg_url = slow.uri();
    config.sources.arc_url = fast.uri();
    let registry = SourceRegistry::from_config(&config).unwrap();

    let request = SearchRequest::new(
        "anything",
        Duration::from_millis(500),
        [SourceId::Ygg, SourceId::Archive],
    )
    .unwrap();

    let started = Instant::now();
    let aggregate = lookup(&registry, &request).await.unwrap();

    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(aggregate.merged.len(), 1);
    assert_eq!(
        aggregate.failed_sources.iter().copied().collect::<Vec<_>>(),
        vec![SourceId::Ygg]
    );
}

#[tokio::test]
async fn test_empty_results_are_not_a_failure() {
    let archive = serve_everything(200, &archive_page(&[])).await;

    let mut config = offline_config();
    config.sources.arc_url = archive.uri();
    let registry = SourceRegistry::from_config(&config).unwrap();

    let request =
        SearchRequest::new("no such book", Duration::from_secs(5), [SourceId::Archive]).unwrap();
    let aggregate = lookup(&registry, &request).await.unwrap();

    assert!(aggregate.merged.is_empty());
    assert!(aggregate.failed_sources.is_empty());
    assert!(!aggregate.all_failed);
}

#[tokio::test]
async fn test_all_sources_failing_is_an_error() {
    let broken = serve_everything(500, "").await;

    let mut config = offline_config();
    config.sources.td_url = broken.uri();
    let registry = SourceRegistry::from_config(&config).unwrap();

    let request = SearchRequest::new(
        "dumas",
        Duration::from_secs(2),
        [SourceId::TorrentDownloads, SourceId::Archive],
    )
    .unwrap();

    match lookup(&registry, &request).await {
        Err(RippleError::AllSourcesFailed { failures }) => {
            let mut ids: Vec<_> = failures.iter().map(|f| f.source_id).collect();
            ids.sort();
            assert_eq!(ids, vec![SourceId::Archive, SourceId::TorrentDownloads]);
        }
        other => panic!("expected AllSourcesFailed, got {:?}", other),
    }
}
