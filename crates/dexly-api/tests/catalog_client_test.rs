#![allow(clippy::unwrap_used)]
// Integration tests for `CatalogClient` using wiremock.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dexly_api::{CatalogClient, Error};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, CatalogClient) {
    let server = MockServer::start().await;
    let client = CatalogClient::with_client(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

fn bulbasaur() -> serde_json::Value {
    json!({
        "id": 1,
        "name": "bulbasaur",
        "height": 7,
        "weight": 69,
        "sprites": {
            "front_default": "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/1.png",
            "other": {
                "official-artwork": {
                    "front_default": "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork/1.png"
                }
            }
        },
        "types": [
            { "slot": 1, "type": { "name": "grass", "url": "https://pokeapi.co/api/v2/type/12/" } },
            { "slot": 2, "type": { "name": "poison", "url": "https://pokeapi.co/api/v2/type/4/" } }
        ],
        "stats": [
            { "base_stat": 45, "effort": 0, "stat": { "name": "hp", "url": "https://pokeapi.co/api/v2/stat/1/" } }
        ],
        "abilities": [
            { "ability": { "name": "overgrow", "url": "https://pokeapi.co/api/v2/ability/65/" }, "is_hidden": false, "slot": 1 },
            { "ability": { "name": "chlorophyll", "url": "https://pokeapi.co/api/v2/ability/34/" }, "is_hidden": true, "slot": 3 }
        ]
    })
}

// ── Happy-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_list_pagination_params() {
    let (server, client) = setup().await;

    let body = json!({
        "count": 1302,
        "next": "https://pokeapi.co/api/v2/pokemon?offset=30&limit=30",
        "previous": null,
        "results": [
            { "name": "bulbasaur", "url": "https://pokeapi.co/api/v2/pokemon/1/" },
            { "name": "ivysaur", "url": "https://pokeapi.co/api/v2/pokemon/2/" }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/pokemon"))
        .and(query_param("offset", "30"))
        .and(query_param("limit", "30"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let list = client.list(30, 30).await.unwrap();

    assert_eq!(list.count, 1302);
    assert_eq!(list.results.len(), 2);
    assert_eq!(list.results[0].name, "bulbasaur");
    assert!(list.previous.is_none());
}

#[tokio::test]
async fn test_pokemon_by_name() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/pokemon/bulbasaur"))
        .respond_with(ResponseTemplate::new(200).set_body_json(bulbasaur()))
        .mount(&server)
        .await;

    let p = client.pokemon("bulbasaur").await.unwrap();

    assert_eq!(p.id, 1);
    assert_eq!(p.types.len(), 2);
    assert_eq!(p.types[1].kind.name, "poison");
    assert_eq!(p.abilities.len(), 2);
    assert!(p.abilities[1].is_hidden);
    assert_eq!(p.stats[0].base_stat, 45);
}

#[tokio::test]
async fn test_species_by_id() {
    let (server, client) = setup().await;

    let body = json!({
        "id": 1,
        "name": "bulbasaur",
        "flavor_text_entries": [
            {
                "flavor_text": "A strange seed was\nplanted on its\x0Cback at birth.",
                "language": { "name": "en", "url": "https://pokeapi.co/api/v2/language/9/" },
                "version": { "name": "red", "url": "https://pokeapi.co/api/v2/version/1/" }
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/pokemon-species/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let species = client.species(1).await.unwrap();
    assert_eq!(species.name, "bulbasaur");
    assert_eq!(species.flavor_text_entries[0].language.name, "en");
}

#[tokio::test]
async fn test_base_path_is_preserved() {
    let server = MockServer::start().await;
    let client =
        CatalogClient::with_client(&format!("{}/api/v2", server.uri()), reqwest::Client::new())
            .unwrap();

    Mock::given(method("GET"))
        .and(path("/api/v2/pokemon/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(bulbasaur()))
        .mount(&server)
        .await;

    assert_eq!(client.pokemon("1").await.unwrap().name, "bulbasaur");
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_unknown_name_is_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/pokemon/missingno"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;

    let err = client.pokemon("missingno").await.unwrap_err();

    assert!(err.is_not_found(), "expected 404, got: {err:?}");
    match err {
        Error::Http { status, path, message } => {
            assert_eq!(status, 404);
            assert_eq!(path, "/pokemon/missingno");
            assert_eq!(message, "Not Found");
        }
        other => panic!("expected Http error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_is_transient() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client.list(0, 30).await.unwrap_err();
    assert_eq!(err.status(), Some(503));
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_malformed_payload() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/pokemon/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "name": "bulbasaur" })))
        .mount(&server)
        .await;

    let result = client.pokemon("1").await;
    assert!(
        matches!(result, Err(Error::Deserialization { .. })),
        "expected Deserialization error, got: {result:?}"
    );
}

// ── Argument validation ─────────────────────────────────────────────

#[tokio::test]
async fn test_empty_name_rejected_without_request() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client.pokemon("   ").await.unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { field: "id_or_name", .. }));
}

#[tokio::test]
async fn test_zero_species_id_rejected_without_request() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client.species(0).await.unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { field: "id", .. }));
}
