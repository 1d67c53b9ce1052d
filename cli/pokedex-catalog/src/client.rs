//! Catalog client wrapper around a configured `reqwest` client.

use std::fmt::Debug;
use std::str::FromStr;
use std::time::Duration;

use reqwest::header::{self, HeaderMap};
use tracing::{debug, instrument, warn};

use crate::config::CatalogClientConfig;
use crate::error::CatalogError;
use crate::types::{CatalogEntry, EntryDetail, EntryList, EntrySummary, TypeListing};

/// A client for the upstream catalog service.
///
/// This is a thin wrapper around `reqwest::Client` that handles:
/// - HTTP client configuration with timeouts
/// - Default headers and user agent
/// - Wire-to-domain conversion of entry payloads
pub struct CatalogClient {
    client: reqwest::Client,
    config: CatalogClientConfig,
}

impl Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("catalog_url", &self.config.catalog_url)
            .finish_non_exhaustive()
    }
}

impl CatalogClient {
    /// Create a new catalog client from configuration.
    pub fn new(config: CatalogClientConfig) -> Result<Self, CatalogError> {
        let client = build_http_client(&config)?;
        Ok(Self { client, config })
    }

    /// Get the configured catalog URL.
    pub fn catalog_url(&self) -> &str {
        &self.config.catalog_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.config.catalog_url.trim_end_matches('/'))
    }
}

// ---------------------------------------------------------------------------
// Catalog trait
// ---------------------------------------------------------------------------

/// The complete catalog API interface.
///
/// This trait is the seam for alternate implementations: the HTTP client
/// below, and scripted in-process doubles in loader tests.
#[allow(async_fn_in_trait)]
pub trait ClientTrait {
    /// Fetch the bounded list of entry summaries.
    ///
    /// Any failure here is fatal to a load: with no base list there is
    /// nothing to show, so errors propagate.
    async fn list_entries(&self, limit: u32) -> Result<Vec<EntrySummary>, CatalogError>;

    /// Fetch and convert the detail record for one entry.
    ///
    /// On any failure (transport error, error status, malformed payload)
    /// this returns `None` so the caller can skip the entry instead of
    /// aborting the whole batch.
    async fn entry_detail(&self, name_or_id: &str) -> Option<CatalogEntry>;

    /// Fetch the summaries of every entry carrying a type tag.
    ///
    /// Useful if filtering ever moves from the client to the API. Failures
    /// propagate, like [`ClientTrait::list_entries`].
    async fn entries_by_type(&self, type_name: &str)
        -> Result<Vec<EntrySummary>, CatalogError>;
}

impl ClientTrait for CatalogClient {
    #[instrument(skip(self))]
    async fn list_entries(&self, limit: u32) -> Result<Vec<EntrySummary>, CatalogError> {
        let response = self
            .client
            .get(self.endpoint("pokemon"))
            .query(&[("limit", limit)])
            .send()
            .await
            .map_err(CatalogError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::ErrorResponse { status });
        }

        let list: EntryList = response.json().await.map_err(CatalogError::Decode)?;
        debug!(n_entries = list.results.len(), "fetched entry list");
        Ok(list.results)
    }

    async fn entry_detail(&self, name_or_id: &str) -> Option<CatalogEntry> {
        let url = self.endpoint(&format!("pokemon/{name_or_id}"));
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(err) => {
                warn!(name_or_id, %err, "skipping entry, detail request failed");
                return None;
            },
        };

        let status = response.status();
        if !status.is_success() {
            warn!(name_or_id, %status, "skipping entry, detail response not ok");
            return None;
        }

        match response.json::<EntryDetail>().await {
            Ok(detail) => Some(detail.into()),
            Err(err) => {
                warn!(name_or_id, %err, "skipping entry, unusable detail payload");
                None
            },
        }
    }

    #[instrument(skip(self))]
    async fn entries_by_type(
        &self,
        type_name: &str,
    ) -> Result<Vec<EntrySummary>, CatalogError> {
        let response = self
            .client
            .get(self.endpoint(&format!("type/{type_name}")))
            .send()
            .await
            .map_err(CatalogError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::ErrorResponse { status });
        }

        let listing: TypeListing = response.json().await.map_err(CatalogError::Decode)?;
        Ok(listing
            .pokemon
            .into_iter()
            .map(|member| member.pokemon)
            .collect())
    }
}

// ---------------------------------------------------------------------------
// HTTP client builder
// ---------------------------------------------------------------------------

const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);

/// Build the HTTP client with timeouts and default headers from config.
fn build_http_client(config: &CatalogClientConfig) -> Result<reqwest::Client, CatalogError> {
    let mut headers = HeaderMap::new();
    for (key, value) in &config.extra_headers {
        headers.insert(
            header::HeaderName::from_str(key).map_err(|e| CatalogError::InvalidHeader {
                name: key.clone(),
                source: Box::new(e),
            })?,
            header::HeaderValue::from_str(value).map_err(|e| CatalogError::InvalidHeader {
                name: key.clone(),
                source: Box::new(e),
            })?,
        );
    }

    debug!(
        catalog_url = %config.catalog_url,
        extra_headers = config.extra_headers.len(),
        "building catalog HTTP client"
    );

    let client_builder = reqwest::Client::builder()
        .default_headers(headers)
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(config.timeout);

    let client_builder = if let Some(ref user_agent) = config.user_agent {
        client_builder.user_agent(user_agent)
    } else {
        client_builder
    };

    client_builder.build().map_err(CatalogError::BuildClient)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use httpmock::prelude::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn client_config(url: &str) -> CatalogClientConfig {
        CatalogClientConfig {
            catalog_url: url.to_string(),
            ..Default::default()
        }
    }

    fn charmander_body() -> serde_json::Value {
        json!({
            "id": 4,
            "name": "charmander",
            "types": [{"slot": 1, "type": {"name": "fire", "url": "ignored"}}],
            "sprites": {
                "front_default": "https://img/charmander-front.png",
                "other": {
                    "official-artwork": {
                        "front_default": "https://img/charmander-art.png"
                    }
                }
            },
            "stats": [
                {"base_stat": 39, "stat": {"name": "hp"}},
                {"base_stat": 52, "stat": {"name": "attack"}},
                {"base_stat": 43, "stat": {"name": "defense"}},
                {"base_stat": 60, "stat": {"name": "special-attack"}},
                {"base_stat": 50, "stat": {"name": "special-defense"}},
                {"base_stat": 65, "stat": {"name": "speed"}}
            ],
            "abilities": [{"ability": {"name": "blaze"}, "is_hidden": false}],
            "height": 6,
            "weight": 85
        })
    }

    #[tokio::test]
    async fn list_entries_returns_summaries() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET).path("/pokemon").query_param("limit", "2");
            then.status(200).json_body(json!({
                "count": 2,
                "results": [
                    {"name": "bulbasaur", "url": "https://api/pokemon/1/"},
                    {"name": "ivysaur", "url": "https://api/pokemon/2/"},
                ]
            }));
        });

        let client = CatalogClient::new(client_config(&server.base_url())).unwrap();
        let summaries = client.list_entries(2).await.unwrap();

        assert_eq!(summaries, vec![
            EntrySummary {
                name: "bulbasaur".to_string(),
                url: "https://api/pokemon/1/".to_string(),
            },
            EntrySummary {
                name: "ivysaur".to_string(),
                url: "https://api/pokemon/2/".to_string(),
            },
        ]);
        mock.assert();
    }

    #[tokio::test]
    async fn list_entries_propagates_error_status() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/pokemon");
            then.status(503);
        });

        let client = CatalogClient::new(client_config(&server.base_url())).unwrap();
        let result = client.list_entries(500).await;

        assert!(
            matches!(
                result,
                Err(CatalogError::ErrorResponse { status }) if status == 503
            ),
            "expected ErrorResponse, found: {result:?}"
        );
    }

    #[tokio::test]
    async fn list_entries_propagates_decode_failure() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/pokemon");
            then.status(200).body("<!doctype html>not json");
        });

        let client = CatalogClient::new(client_config(&server.base_url())).unwrap();
        let result = client.list_entries(500).await;

        assert!(
            matches!(result, Err(CatalogError::Decode(_))),
            "expected Decode, found: {result:?}"
        );
    }

    #[tokio::test]
    async fn entry_detail_maps_payload() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET).path("/pokemon/charmander");
            then.status(200).json_body(charmander_body());
        });

        let client = CatalogClient::new(client_config(&server.base_url())).unwrap();
        let entry = client.entry_detail("charmander").await.unwrap();

        assert_eq!(entry.id, 4);
        assert_eq!(entry.name, "charmander");
        assert_eq!(entry.types, vec!["fire"]);
        // Official artwork is preferred over the default sprite.
        assert_eq!(entry.image_url, "https://img/charmander-art.png");
        assert!(!entry.is_legendary);
        mock.assert();
    }

    #[tokio::test]
    async fn entry_detail_absorbs_not_found() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/pokemon/missingno");
            then.status(404).json_body(json!({"detail": "Not Found"}));
        });

        let client = CatalogClient::new(client_config(&server.base_url())).unwrap();
        assert_eq!(client.entry_detail("missingno").await, None);
    }

    #[tokio::test]
    async fn entry_detail_absorbs_malformed_payload() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/pokemon/glitch");
            then.status(200).json_body(json!({"name": "glitch"}));
        });

        let client = CatalogClient::new(client_config(&server.base_url())).unwrap();
        // `id` is missing, so the payload is unusable.
        assert_eq!(client.entry_detail("glitch").await, None);
    }

    #[tokio::test]
    async fn entries_by_type_unwraps_nested_members() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET).path("/type/fire");
            then.status(200).json_body(json!({
                "pokemon": [
                    {"pokemon": {"name": "charmander", "url": "https://api/pokemon/4/"}, "slot": 1},
                    {"pokemon": {"name": "vulpix", "url": "https://api/pokemon/37/"}, "slot": 1},
                ]
            }));
        });

        let client = CatalogClient::new(client_config(&server.base_url())).unwrap();
        let summaries = client.entries_by_type("fire").await.unwrap();

        let names: Vec<_> = summaries.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["charmander", "vulpix"]);
        mock.assert();
    }

    #[tokio::test]
    async fn extra_headers_set_on_all_requests() {
        let mut extra_headers = BTreeMap::new();
        extra_headers.insert("x-dex-test".to_string(), "test-value".to_string());

        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/pokemon")
                .header("x-dex-test", "test-value");
            then.status(200).json_body(json!({"results": []}));
        });

        let config = CatalogClientConfig {
            extra_headers,
            ..client_config(&server.base_url())
        };
        let client = CatalogClient::new(config).unwrap();
        let summaries = client.list_entries(1).await.unwrap();

        assert!(summaries.is_empty());
        mock.assert();
    }

    #[tokio::test]
    async fn user_agent_set_on_all_requests() {
        let expected_agent = "pokedex-test-agent";

        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/pokemon")
                .header("user-agent", expected_agent);
            then.status(200).json_body(json!({"results": []}));
        });

        let config = CatalogClientConfig {
            user_agent: Some(expected_agent.to_string()),
            ..client_config(&server.base_url())
        };
        let client = CatalogClient::new(config).unwrap();
        let _ = client.list_entries(1).await.unwrap();
        mock.assert();
    }
}
