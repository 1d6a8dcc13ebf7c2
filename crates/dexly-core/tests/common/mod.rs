#![allow(dead_code, clippy::unwrap_used)]
// Shared wiremock fixtures for dexly-core integration tests.

use std::time::Duration;

use serde_json::{Value, json};
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

use dexly_core::{Catalog, CatalogConfig, FavoritesStore, RetryPolicy};

/// Retries fast enough for real-time tests.
pub fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        max_retries: 3,
        base_delay: Duration::from_millis(5),
        max_delay: Duration::from_millis(20),
    }
}

pub fn config_for(server: &MockServer) -> CatalogConfig {
    let defaults = CatalogConfig::default();
    CatalogConfig {
        base_url: server.uri(),
        timeout: Duration::from_secs(5),
        list_query: defaults.list_query.clone().retry(fast_retry()),
        detail_query: defaults.detail_query.clone().retry(fast_retry()),
        metadata_query: defaults.metadata_query.clone().retry(fast_retry()),
        ..defaults
    }
}

pub fn catalog_for(server: &MockServer) -> Catalog {
    Catalog::new(config_for(server), FavoritesStore::in_memory()).unwrap()
}

// ── Payloads ────────────────────────────────────────────────────────

pub fn list_body(names: &[&str]) -> Value {
    let results: Vec<Value> = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            json!({ "name": name, "url": format!("https://pokeapi.co/api/v2/pokemon/{}/", i + 1) })
        })
        .collect();
    json!({ "count": names.len(), "next": null, "previous": null, "results": results })
}

/// `item-1 ..= item-n`, each with URL id `n`.
pub fn numbered_list(n: usize) -> Value {
    let names: Vec<String> = (1..=n).map(|i| format!("item-{i}")).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    list_body(&refs)
}

pub fn detail_json(id: u32, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "height": 7,
        "weight": 69,
        "sprites": {
            "front_default": format!("https://img.example/{id}.png"),
            "other": { "official-artwork": { "front_default": format!("https://img.example/art/{id}.png") } }
        },
        "types": [
            { "slot": 1, "type": { "name": "grass", "url": "https://pokeapi.co/api/v2/type/12/" } },
            { "slot": 2, "type": { "name": "poison", "url": "https://pokeapi.co/api/v2/type/4/" } }
        ],
        "stats": [
            { "base_stat": 45, "effort": 0, "stat": { "name": "hp", "url": "" } },
            { "base_stat": 49, "effort": 0, "stat": { "name": "attack", "url": "" } }
        ],
        "abilities": [
            { "ability": { "name": "overgrow", "url": "" }, "is_hidden": false, "slot": 1 }
        ]
    })
}

pub fn species_json(id: u32, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "flavor_text_entries": [
            { "flavor_text": "Una semilla.", "language": { "name": "es", "url": "" } },
            { "flavor_text": "A strange seed was\nplanted on its\u{c}back at birth.", "language": { "name": "en", "url": "" } }
        ]
    })
}

/// Answers `GET /pokemon/<name>` with a record for that name. Names of
/// the form `item-N` get id `N`; the classic starters get their real ids.
pub struct DetailResponder {
    pub delay: Duration,
}

impl Respond for DetailResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let name = request.url.path().rsplit('/').next().unwrap_or_default();
        let id = match name {
            "bulbasaur" => 1,
            "ivysaur" => 2,
            other => other.trim_start_matches("item-").parse().unwrap_or(999),
        };
        ResponseTemplate::new(200)
            .set_body_json(detail_json(id, name))
            .set_delay(self.delay)
    }
}

// ── Mounting ────────────────────────────────────────────────────────

/// Serve `body` for the full-list request (offset 0).
pub async fn mount_full_list(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path("/pokemon"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub async fn mount_details(server: &MockServer, delay: Duration) {
    Mock::given(method("GET"))
        .and(path_regex(r"^/pokemon/[a-z0-9-]+$"))
        .respond_with(DetailResponder { delay })
        .mount(server)
        .await;
}

pub async fn mount_missing(server: &MockServer, name: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/pokemon/{name}")))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .with_priority(1)
        .mount(server)
        .await;
}

pub async fn requests_to(server: &MockServer, prefix: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.url.path().starts_with(prefix))
        .count()
}
