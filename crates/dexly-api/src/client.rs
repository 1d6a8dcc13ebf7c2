// Hand-crafted async HTTP client for the PokeAPI catalog endpoints.
//
// Base path: /api/v2/
// Endpoints: /pokemon, /pokemon/{idOrName}, /pokemon-species/{id}

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::{Pokemon, PokemonSpecies, ResourceList};
use crate::transport::TransportConfig;

/// Default public API root.
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2/";

/// Async client for the read-only catalog API.
///
/// One method per endpoint, one HTTP call per method. No retry and no
/// caching: both belong to the query layer in `dexly-core`.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: Url,
}

impl CatalogClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client for `base_url` from a `TransportConfig`.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::with_client(base_url, http)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn with_client(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Parse the base URL and make sure its path ends with `/`.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        if url.cannot_be_a_base() {
            return Err(Error::InvalidArgument {
                field: "base_url",
                reason: format!("'{raw}' cannot be used as a base URL"),
            });
        }
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    /// The normalized API root.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Append path segments (percent-encoded) onto the base URL.
    fn url(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidArgument {
                field: "base_url",
                reason: "cannot append path segments".into(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// `GET /pokemon?offset=&limit=` -- one page of summaries plus the total count.
    pub async fn list(&self, offset: u32, limit: u32) -> Result<ResourceList, Error> {
        let url = self.url(&["pokemon"])?;
        self.get_with_params(url, &[("offset", offset.to_string()), ("limit", limit.to_string())])
            .await
    }

    /// `GET /pokemon/{idOrName}` -- full record for one item.
    pub async fn pokemon(&self, id_or_name: &str) -> Result<Pokemon, Error> {
        let key = id_or_name.trim();
        if key.is_empty() {
            return Err(Error::InvalidArgument {
                field: "id_or_name",
                reason: "must not be empty".into(),
            });
        }
        let url = self.url(&["pokemon", key])?;
        self.get(url).await
    }

    /// `GET /pokemon-species/{id}` -- localized descriptions for one item.
    pub async fn species(&self, id: u32) -> Result<PokemonSpecies, Error> {
        if id == 0 {
            return Err(Error::InvalidArgument {
                field: "id",
                reason: "must be a positive integer".into(),
            });
        }
        let url = self.url(&["pokemon-species", &id.to_string()])?;
        self.get(url).await
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        Self::handle_response(resp).await
    }

    async fn get_with_params<T: DeserializeOwned>(
        &self,
        url: Url,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        debug!("GET {url} params={params:?}");

        let resp = self.http.get(url).query(params).send().await?;
        Self::handle_response(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        let path = resp.url().path().to_owned();

        if !status.is_success() {
            let raw = resp.text().await.unwrap_or_default();
            let message = if raw.trim().is_empty() {
                status.to_string()
            } else {
                raw.chars().take(200).collect()
            };
            return Err(Error::Http {
                status: status.as_u16(),
                path,
                message,
            });
        }

        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> CatalogClient {
        CatalogClient::with_client(base, reqwest::Client::new()).unwrap()
    }

    #[test]
    fn base_url_gains_trailing_slash() {
        let c = client("https://pokeapi.co/api/v2");
        assert_eq!(c.base_url().as_str(), "https://pokeapi.co/api/v2/");
    }

    #[test]
    fn base_url_keeps_single_trailing_slash() {
        let c = client("https://pokeapi.co/api/v2//");
        assert_eq!(c.base_url().as_str(), "https://pokeapi.co/api/v2/");
    }

    #[test]
    fn url_appends_segments() {
        let c = client(DEFAULT_BASE_URL);
        let url = c.url(&["pokemon", "25"]).unwrap();
        assert_eq!(url.as_str(), "https://pokeapi.co/api/v2/pokemon/25");
    }

    #[test]
    fn url_encodes_segments() {
        let c = client(DEFAULT_BASE_URL);
        let url = c.url(&["pokemon", "mr mime"]).unwrap();
        assert_eq!(url.as_str(), "https://pokeapi.co/api/v2/pokemon/mr%20mime");
    }

    #[test]
    fn rejects_non_base_urls() {
        let err = CatalogClient::with_client("mailto:ash@example.com", reqwest::Client::new())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { field: "base_url", .. }));
    }
}
