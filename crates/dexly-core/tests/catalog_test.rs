#![allow(clippy::unwrap_used)]
// Integration tests for `Catalog` against a wiremock catalog API.

mod common;

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{
    catalog_for, config_for, detail_json, list_body, mount_details, mount_full_list,
    mount_missing, numbered_list, requests_to, species_json,
};
use dexly_core::filter::{filter_by_favorites, filter_by_name};
use dexly_core::{
    Catalog, CatalogConfig, CoreError, EnhancedItem, FavoritesStore, ItemFilter, RetryPolicy,
};

// ── Lists ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_search_and_favorites_end_to_end() {
    let server = MockServer::start().await;
    mount_full_list(&server, list_body(&["bulbasaur", "ivysaur"])).await;
    let catalog = catalog_for(&server);

    let all = catalog.all_items().await.unwrap();
    assert_eq!(
        all.iter().map(|i| (i.id, i.name.as_str())).collect::<Vec<_>>(),
        vec![(1, "bulbasaur"), (2, "ivysaur")]
    );

    let hits = filter_by_name(&all, "bulba");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, 1);

    catalog.favorites().add(1).unwrap();
    let favorites = catalog.favorites().snapshot();
    let favs_only = ItemFilter::default().favorites_only(true).apply(&all, &favorites);
    assert_eq!(names(&favs_only), vec!["bulbasaur"]);
    assert_eq!(filter_by_favorites(&all, &favorites), favs_only);
}

#[tokio::test]
async fn test_full_list_uses_offset_zero_and_configured_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pokemon"))
        .and(query_param("offset", "0"))
        .and(query_param("limit", "2000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(numbered_list(3)))
        .expect(1)
        .mount(&server)
        .await;
    let catalog = catalog_for(&server);

    assert_eq!(catalog.all_items().await.unwrap().len(), 3);
    // Served from cache inside the freshness window.
    assert_eq!(catalog.all_items().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_list_page_maps_page_index_to_offset() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pokemon"))
        .and(query_param("offset", "20"))
        .and(query_param("limit", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1302,
            "next": null,
            "previous": null,
            "results": [{ "name": "spearow", "url": "https://pokeapi.co/api/v2/pokemon/21/" }]
        })))
        .expect(1)
        .mount(&server)
        .await;
    let catalog = catalog_for(&server);

    let listing = catalog.list_page(1, 20).await.unwrap();
    assert_eq!(listing.total, 1302);
    assert_eq!(listing.items[0].id, 21);
}

#[tokio::test]
async fn test_search_page_reports_filtered_totals() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pokemon"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_body(&["bulbasaur", "ivysaur"])))
        .expect(1)
        .mount(&server)
        .await;
    let catalog = catalog_for(&server);

    let hits = catalog.search_page(0, 30, "bulba").await.unwrap();
    assert_eq!(names(&hits.items), vec!["bulbasaur"]);
    assert_eq!(hits.total_filtered, 1);
    assert!(hits.has_results);

    let misses = catalog.search_page(0, 30, "xyz123").await.unwrap();
    assert_eq!(misses.total_filtered, 0);
    assert!(!misses.has_results);
}

// ── Details ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_concurrent_detail_requests_hit_network_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pokemon/bulbasaur"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(detail_json(1, "bulbasaur"))
                .set_delay(Duration::from_millis(100)),
        )
        .expect(1)
        .mount(&server)
        .await;
    let catalog = catalog_for(&server);

    let (a, b, c) = tokio::join!(
        catalog.detail("bulbasaur"),
        catalog.detail("Bulbasaur"),
        catalog.detail(" bulbasaur ")
    );
    assert_eq!(a.unwrap().id, 1);
    assert_eq!(b.unwrap().name, "bulbasaur");
    assert_eq!(c.unwrap().primary_type(), Some("grass"));
}

#[tokio::test]
async fn test_unknown_item_is_not_found_and_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pokemon/missingno"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .expect(1)
        .mount(&server)
        .await;
    let catalog = catalog_for(&server);

    let err = catalog.detail("missingno").await.unwrap_err();
    assert_eq!(
        err,
        CoreError::NotFound {
            entity_type: "item".into(),
            identifier: "missingno".into(),
        }
    );
}

#[tokio::test]
async fn test_transient_failures_are_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pokemon/ivysaur"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .with_priority(1)
        .mount(&server)
        .await;
    mount_details(&server, Duration::ZERO).await;
    let catalog = catalog_for(&server);

    let detail = catalog.detail("ivysaur").await.unwrap();
    assert_eq!(detail.id, 2);
    assert_eq!(requests_to(&server, "/pokemon/ivysaur").await, 3);
}

#[tokio::test]
async fn test_persistent_server_errors_surface_after_retries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pokemon/ivysaur"))
        .respond_with(ResponseTemplate::new(500))
        .expect(4)
        .mount(&server)
        .await;
    let catalog = catalog_for(&server);

    let err = catalog.detail("ivysaur").await.unwrap_err();
    assert!(matches!(err, CoreError::Api { status: Some(500), .. }));
}

#[tokio::test]
async fn test_empty_identifier_rejected_without_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let catalog = catalog_for(&server);

    assert!(matches!(
        catalog.detail("  ").await,
        Err(CoreError::ValidationFailed { .. })
    ));
    assert!(matches!(
        catalog.metadata(0).await,
        Err(CoreError::ValidationFailed { .. })
    ));
}

#[tokio::test]
async fn test_profile_chains_detail_and_metadata() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pokemon/bulbasaur"))
        .respond_with(ResponseTemplate::new(200).set_body_json(detail_json(1, "bulbasaur")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/pokemon-species/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(species_json(1, "bulbasaur")))
        .expect(1)
        .mount(&server)
        .await;
    let catalog = catalog_for(&server);

    let profile = catalog.profile("bulbasaur").await.unwrap();
    assert_eq!(profile.detail.id, 1);
    assert_eq!(profile.metadata.localized_descriptions.len(), 2);
    assert_eq!(
        profile.description,
        "A strange seed was\nplanted on its back at birth."
    );
}

// ── Page fan-out ────────────────────────────────────────────────────

#[tokio::test]
async fn test_page_details_preserve_order() {
    let server = MockServer::start().await;
    mount_details(&server, Duration::from_millis(10)).await;
    let catalog = catalog_for(&server);

    let items = enhanced(&["item-3", "item-1", "item-2"]);
    let details = catalog.page_details(&items).await.unwrap();
    assert_eq!(
        details.iter().map(|d| d.id).collect::<Vec<_>>(),
        vec![3, 1, 2]
    );
}

#[tokio::test]
async fn test_one_missing_detail_fails_the_whole_page() {
    let server = MockServer::start().await;
    mount_missing(&server, "item-17").await;
    mount_details(&server, Duration::ZERO).await;
    let catalog = catalog_for(&server);

    let names: Vec<String> = (1..=30).map(|i| format!("item-{i}")).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let items = enhanced(&refs);

    let err = catalog.page_details(&items).await.unwrap_err();
    assert!(matches!(err, CoreError::NotFound { ref identifier, .. } if identifier == "item-17"));

    // The other requests still completed and are cached.
    assert!(catalog.cached_detail("item-1").is_some());
    assert!(catalog.cached_detail("item-30").is_some());
    assert!(catalog.cached_detail("item-17").is_none());
}

#[tokio::test]
async fn test_invalidate_all_forces_refetch() {
    let server = MockServer::start().await;
    mount_details(&server, Duration::ZERO).await;
    let catalog = catalog_for(&server);

    catalog.detail("item-5").await.unwrap();
    catalog.detail("item-5").await.unwrap();
    assert_eq!(requests_to(&server, "/pokemon/item-5").await, 1);

    assert_eq!(catalog.invalidate_all(), 1);
    catalog.detail("item-5").await.unwrap();
    assert_eq!(requests_to(&server, "/pokemon/item-5").await, 2);
}

#[tokio::test]
async fn test_timeout_reports_configured_limit() {
    let server = MockServer::start().await;
    mount_details(&server, Duration::from_secs(3)).await;
    let defaults = config_for(&server);
    let config = CatalogConfig {
        timeout: Duration::from_secs(1),
        detail_query: defaults.detail_query.clone().retry(RetryPolicy::none()),
        ..defaults
    };
    let catalog = Catalog::new(config, FavoritesStore::in_memory()).unwrap();

    let err = catalog.detail("item-5").await.unwrap_err();
    assert_eq!(err, CoreError::Timeout { timeout_secs: 1 });
}

#[tokio::test]
async fn test_collect_garbage_drops_expired_entries() {
    let server = MockServer::start().await;
    mount_details(&server, Duration::ZERO).await;
    let defaults = config_for(&server);
    let config = CatalogConfig {
        detail_query: defaults.detail_query.clone().gc_time(Duration::ZERO),
        ..defaults
    };
    let catalog = Catalog::new(config, FavoritesStore::in_memory()).unwrap();

    catalog.detail("item-5").await.unwrap();
    assert!(catalog.cached_detail("item-5").is_some());

    assert_eq!(catalog.collect_garbage(), 1);
    assert!(catalog.cached_detail("item-5").is_none());
    catalog.detail("item-5").await.unwrap();
    assert_eq!(requests_to(&server, "/pokemon/item-5").await, 2);
}

// ── Helpers ─────────────────────────────────────────────────────────

fn names(items: &[EnhancedItem]) -> Vec<&str> {
    items.iter().map(|i| i.name.as_str()).collect()
}

fn enhanced(names: &[&str]) -> Vec<EnhancedItem> {
    names
        .iter()
        .map(|name| EnhancedItem {
            id: name.trim_start_matches("item-").parse().unwrap_or(0),
            name: (*name).to_owned(),
            source_url: String::new(),
        })
        .collect()
}
