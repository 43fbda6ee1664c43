//! `CatalogClient` - TVMaze API client implementation.

use anyhow::{Context, Result, bail};
use reqwest::Client;
use tracing::instrument;
use url::Url;

use super::api::LocalCatalogApi;
use super::types::{CatalogErrorResponse, SearchEntry};

/// Default base URL for the TVMaze API.
const DEFAULT_BASE_URL: &str = "https://api.tvmaze.com/";

/// TVMaze catalog API client.
///
/// Read-only, unauthenticated. One request is issued per call; failures
/// are reported to the caller without retrying.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct CatalogClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
}

/// Builder for `CatalogClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct CatalogClientBuilder {
    base_url: Option<Url>,
    user_agent: Option<String>,
}

impl CatalogClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            user_agent: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests and self-hosted mirrors).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<CatalogClient> {
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(CatalogClient {
            http_client,
            base_url,
        })
    }
}

impl CatalogClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> CatalogClientBuilder {
        CatalogClientBuilder::new()
    }

    /// Sends a GET request with query params and decodes the JSON response.
    #[instrument(skip_all)]
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self
            .base_url
            .join(path)
            .with_context(|| format!("failed to join URL path: {path}"))?;

        let request = self
            .http_client
            .get(url)
            .query(query)
            .build()
            .with_context(|| format!("failed to build request: {path}"))?;

        tracing::debug!(url = %request.url(), "catalog API request");

        let result = self.http_client.execute(request).await;
        let response = result.with_context(|| format!("request failed: {path}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<failed to read body>"));
            if let Ok(error_response) = serde_json::from_str::<CatalogErrorResponse>(&body) {
                bail!(
                    "catalog API error (HTTP {}): name={}, message={}",
                    status,
                    error_response.name,
                    error_response.message.as_deref().unwrap_or("-"),
                );
            }
            bail!("catalog API error (HTTP {status}): {body}");
        }

        let body = response
            .text()
            .await
            .with_context(|| format!("failed to read response body: {path}"))?;
        let raw_result: std::result::Result<T, _> = serde_json::from_str(&body);
        let parsed =
            raw_result.with_context(|| format!("failed to decode JSON response: {path}"))?;
        Ok(parsed)
    }
}

impl LocalCatalogApi for CatalogClient {
    #[instrument(skip_all)]
    async fn search_shows(&self, query: &str) -> Result<Vec<SearchEntry>> {
        let params = [("q", String::from(query))];
        self.get_json("search/shows", &params).await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;

    #[test]
    fn test_builder_requires_user_agent() {
        // Arrange & Act
        let result = CatalogClient::builder().build();

        // Assert
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("user_agent is required")
        );
    }

    #[test]
    fn test_builder_with_required_fields_succeeds() {
        // Arrange & Act
        let result = CatalogClient::builder().user_agent("test/0.0.0").build();

        // Assert
        assert!(result.is_ok());
    }

    #[test]
    fn test_builder_with_custom_base_url() {
        // Arrange
        let custom_url = Url::parse("http://localhost:8080/").unwrap();

        // Act
        let client = CatalogClient::builder()
            .base_url(custom_url.clone())
            .user_agent("test/0.0.0")
            .build()
            .unwrap();

        // Assert
        assert_eq!(client.base_url, custom_url);
    }

    #[test]
    fn test_parse_search_shows_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/tvmaze/search_shows_batman.json");

        // Act
        let entries: Vec<SearchEntry> = serde_json::from_str(json).unwrap();

        // Assert: server order is preserved by the deserialized vec
        assert_eq!(entries.len(), 3);
        let first = &entries[0].show;
        assert_eq!(first.id, 975);
        assert_eq!(first.name, "Batman");
        assert_eq!(first.premiered.as_deref(), Some("1966-01-12"));
        assert!(first.image.as_ref().unwrap().medium.is_some());
        assert!(first.summary.as_ref().unwrap().contains("<b>Bruce Wayne</b>"));
    }

    #[test]
    fn test_parse_search_shows_missing_optionals() {
        // Arrange: third entry has image: null, summary: null, rating.average: null
        let json = include_str!("../../../../fixtures/tvmaze/search_shows_batman.json");

        // Act
        let entries: Vec<SearchEntry> = serde_json::from_str(json).unwrap();

        // Assert
        let record = &entries[2].show;
        assert_eq!(record.id, 60647);
        assert!(record.image.is_none());
        assert!(record.summary.is_none());
        assert!(record.rating.as_ref().unwrap().average.is_none());
    }

    #[test]
    fn test_parse_search_shows_empty_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/tvmaze/search_shows_empty.json");

        // Act
        let entries: Vec<SearchEntry> = serde_json::from_str(json).unwrap();

        // Assert
        assert!(entries.is_empty());
    }

    #[test]
    fn test_parse_error_response() {
        // Arrange
        let json = r#"{"name":"Not Found","message":"Resource not found","code":0,"status":404}"#;

        // Act
        let error: CatalogErrorResponse = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(error.name, "Not Found");
        assert_eq!(error.status, Some(404));
    }

    #[tokio::test]
    async fn test_search_shows_via_http() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/tvmaze/search_shows_batman.json");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/search/shows"))
            .and(wiremock::matchers::query_param("q", "batman"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(json_body))
            .mount(&mock_server)
            .await;

        let base_url = format!("{}/", mock_server.uri());
        let client = CatalogClient::builder()
            .base_url(base_url.parse().unwrap())
            .user_agent("test/0.0.0")
            .build()
            .unwrap();

        // Act
        let entries = client.search_shows("batman").await.unwrap();

        // Assert
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].show.name, "Batman");
        assert_eq!(entries[1].show.name, "Batman Beyond");
    }

    #[tokio::test]
    async fn test_query_is_sent_verbatim() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/tvmaze/search_shows_empty.json");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::query_param("q", "girls of the galaxy"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(json_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let base_url = format!("{}/", mock_server.uri());
        let client = CatalogClient::builder()
            .base_url(base_url.parse().unwrap())
            .user_agent("test/0.0.0")
            .build()
            .unwrap();

        // Act & Assert (mock expect(1) verifies the q parameter)
        client.search_shows("girls of the galaxy").await.unwrap();
    }

    #[tokio::test]
    async fn test_empty_query_is_delegated() {
        // Arrange: behavior for an empty query belongs to the service
        let mock_server = wiremock::MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/tvmaze/search_shows_empty.json");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::query_param("q", ""))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(json_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let base_url = format!("{}/", mock_server.uri());
        let client = CatalogClient::builder()
            .base_url(base_url.parse().unwrap())
            .user_agent("test/0.0.0")
            .build()
            .unwrap();

        // Act
        let entries = client.search_shows("").await.unwrap();

        // Assert
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn test_sequential_searches_return_own_results() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let batman = include_str!("../../../../fixtures/tvmaze/search_shows_batman.json");
        let superman = include_str!("../../../../fixtures/tvmaze/search_shows_superman.json");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::query_param("q", "batman"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(batman))
            .mount(&mock_server)
            .await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::query_param("q", "superman"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(superman))
            .mount(&mock_server)
            .await;

        let base_url = format!("{}/", mock_server.uri());
        let client = CatalogClient::builder()
            .base_url(base_url.parse().unwrap())
            .user_agent("test/0.0.0")
            .build()
            .unwrap();

        // Act
        let first = client.search_shows("batman").await.unwrap();
        let second = client.search_shows("superman").await.unwrap();

        // Assert
        assert_eq!(first[0].show.name, "Batman");
        assert_eq!(second[0].show.name, "Superman");
        assert_eq!(second.len(), 2);
    }

    #[tokio::test]
    async fn test_http_error_returns_catalog_error() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let error_body = r#"{"name":"Not Found","message":"Resource not found","code":0,"status":404}"#;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(404).set_body_string(error_body))
            .mount(&mock_server)
            .await;

        let base_url = format!("{}/", mock_server.uri());
        let client = CatalogClient::builder()
            .base_url(base_url.parse().unwrap())
            .user_agent("test/0.0.0")
            .build()
            .unwrap();

        // Act
        let result = client.search_shows("batman").await;

        // Assert
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("catalog API error"));
        assert!(err.contains("Not Found"));
    }

    #[tokio::test]
    async fn test_malformed_body_returns_decode_error() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let base_url = format!("{}/", mock_server.uri());
        let client = CatalogClient::builder()
            .base_url(base_url.parse().unwrap())
            .user_agent("test/0.0.0")
            .build()
            .unwrap();

        // Act
        let result = client.search_shows("batman").await;

        // Assert
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("failed to decode JSON response")
        );
    }
}
