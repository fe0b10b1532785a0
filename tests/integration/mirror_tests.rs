//! The Pirate Bay searches through a proxy directory and a mirror race

use crate::fixtures::{offline_config, pirate_bay_page, proxy_page, serve_everything, x1337_page};
use std::time::Duration;
use torrent_ripple::{lookup, Count, SearchRequest, SourceError, SourceId, SourceRegistry};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_search_through_the_working_mirror() {
    let broken = serve_everything(502, "Bad Gateway").await;
    let parked = serve_everything(200, "<html><body>This domain is for sale</body></html>").await;

    let working = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/dumas/0/99/0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(pirate_bay_page(&[
            ("Three.Musketeers", 9),
            ("Monte.Cristo", 120),
        ])))
        .mount(&working)
        .await;

    let directory = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(proxy_page(&[
            broken.uri(),
            parked.uri(),
            working.uri(),
        ])))
        .expect(1)
        .mount(&directory)
        .await;

    let mut config = offline_config();
    config.sources.tpb_proxy_list_url = directory.uri();
    let registry = SourceRegistry::from_config(&config).unwrap();

    let request =
        SearchRequest::new("dumas", Duration::from_secs(5), [SourceId::ThePirateBay]).unwrap();
    let aggregate = lookup(&registry, &request).await.unwrap();

    assert!(aggregate.failed_sources.is_empty());
    assert_eq!(aggregate.merged.len(), 2);

    let top = &aggregate.merged[0];
    assert_eq!(top.name, "Monte.Cristo");
    assert_eq!(top.seeders, Count::Known(120));
    assert_eq!(top.magnet.as_deref(), Some("magnet:?xt=urn:btih:Monte.Cristo"));
    assert_eq!(
        top.description_url,
        Some(format!("{}/torrent/9/Monte.Cristo", working.uri()))
    );
    assert_eq!(top.size, "2 GiB");
    assert_eq!(top.upload_date, "03-14 2019");
}

#[tokio::test]
async fn test_no_usable_mirror_is_a_source_failure() {
    let parked = serve_everything(200, "<html><body>parked</body></html>").await;
    let directory = serve_everything(200, &proxy_page(&[parked.uri()])).await;
    let x1337 = serve_everything(200, &x1337_page(&[("dumas", 3)])).await;

    let mut config = offline_config();
    config.sources.tpb_proxy_list_url = directory.uri();
    config.sources.otts_url = x1337.uri();
    let registry = SourceRegistry::from_config(&config).unwrap();

    let request = SearchRequest::new(
        "dumas",
        Duration::from_secs(5),
        [SourceId::ThePirateBay, SourceId::X1337],
    )
    .unwrap();
    let aggregate = lookup(&registry, &request).await.unwrap();

    assert_eq!(aggregate.merged.len(), 1);
    assert_eq!(aggregate.failures.len(), 1);
    assert_eq!(aggregate.failures[0].source_id, SourceId::ThePirateBay);
    assert!(matches!(
        aggregate.failures[0].error,
        SourceError::NoUsableMirror { candidates: 1 }
    ));
}

#[tokio::test]
async fn test_empty_directory_is_a_source_failure() {
    let directory = serve_everything(200, &proxy_page(&[])).await;
    let x1337 = serve_everything(200, &x1337_page(&[("dumas", 3)])).await;

    let mut config = offline_config();
    config.sources.tpb_proxy_list_url = directory.uri();
    config.sources.otts_url = x1337.uri();
    let registry = SourceRegistry::from_config(&config).unwrap();

    let request = SearchRequest::new(
        "dumas",
        Duration::from_secs(5),
        [SourceId::ThePirateBay, SourceId::X1337],
    )
    .unwrap();
    let aggregate = lookup(&registry, &request).await.unwrap();

    assert_eq!(aggregate.merged.len(), 1);
    assert!(matches!(
        aggregate.failures[0].error,
        SourceError::NoUsableMirror { candidates: 0 }
    ));
}

#[tokio::test]
async fn test_unreachable_directory_is_a_discovery_failure() {
    let x1337 = serve_everything(200, &x1337_page(&[("dumas", 3)])).await;

    let mut config = offline_config();
    config.sources.otts_url = x1337.uri();
    let registry = SourceRegistry::from_config(&config).unwrap();

    let request = SearchRequest::new(
        "dumas",
        Duration::from_secs(5),
        [SourceId::ThePirateBay, SourceId::X1337],
    )
    .unwrap();
    let aggregate = lookup(&registry, &request).await.unwrap();

    assert_eq!(aggregate.merged.len(), 1);
    assert_eq!(
        aggregate.failed_sources.iter().copied().collect::<Vec<_>>(),
        vec![SourceId::ThePirateBay]
    );
    assert!(matches!(
        aggregate.failures[0].error,
        SourceError::MirrorDiscovery(_)
    ));
}
