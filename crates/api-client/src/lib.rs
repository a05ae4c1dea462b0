use crate::error::ApiError;
use crate::sanitize::sanitize_non_finite;
use async_trait::async_trait;
use configuration::settings::UpstreamConfig;
use core_types::PropertyRecord;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;
use std::time::Duration;

pub mod error;
pub mod responses;
pub mod sanitize;
// --- Public API ---
pub use responses::RawResponse;
pub use sanitize::sanitize_non_finite as sanitize_body;

/// The abstract interface to a source of suburb listings.
/// The web server and CLI depend on this trait, so the live client can be
/// swapped for an in-memory fixture in tests.
#[async_trait]
pub trait PropertySource: Send + Sync {
    /// Fetches the upstream reply for a suburb without interpreting its status.
    async fn fetch_raw(&self, suburb: &str) -> Result<RawResponse, ApiError>;

    /// Fetches and decodes the listings for a suburb.
    /// Non-success statuses become `ApiError::Upstream`.
    async fn fetch_properties(&self, suburb: &str) -> Result<Vec<PropertyRecord>, ApiError> {
        let response = self.fetch_raw(suburb).await?;
        if !response.is_success() {
            return Err(ApiError::Upstream {
                status: response.status,
                body: response.body.to_string(),
            });
        }
        let records = core_types::parse_payload(response.body)?;
        tracing::debug!(suburb, count = records.len(), "Decoded listings.");
        Ok(records)
    }
}

/// A concrete `PropertySource` for the Microburbs suburb properties API.
#[derive(Clone)]
pub struct MicroburbsClient {
    client: reqwest::Client,
    url: String,
}

impl MicroburbsClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.bearer_token))
            .map_err(|e| ApiError::InvalidConfig(format!("bearer token: {e}")))?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            url: config.properties_url(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl PropertySource for MicroburbsClient {
    async fn fetch_raw(&self, suburb: &str) -> Result<RawResponse, ApiError> {
        tracing::info!(suburb, url = %self.url, "Requesting listings from upstream.");
        let response = self
            .client
            .get(&self.url)
            .query(&[("suburb", suburb)])
            .send()
            .await?;

        let status = response.status().as_u16();
        let text = response.text().await?;
        tracing::info!(status, bytes = text.len(), "Upstream responded.");

        let body: Value = serde_json::from_str(&sanitize_non_finite(&text))
            .map_err(|e| ApiError::Deserialization(e.to_string()))?;
        let response = RawResponse { status, body };
        tracing::debug!(shape = %response.shape(), "Parsed upstream body.");
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Canned(RawResponse);

    #[async_trait]
    impl PropertySource for Canned {
        async fn fetch_raw(&self, _suburb: &str) -> Result<RawResponse, ApiError> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn decodes_wrapped_results() {
        let source = Canned(RawResponse {
            status: 200,
            body: json!({"results": [{"price": 650000, "property_type": "House"}]}),
        });
        let records = source.fetch_properties("Belmont North").await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].listed_price(), Some(650_000.0));
    }

    #[tokio::test]
    async fn non_success_status_is_an_upstream_error() {
        let source = Canned(RawResponse {
            status: 503,
            body: json!({"error": "maintenance"}),
        });
        match source.fetch_properties("Belmont North").await {
            Err(ApiError::Upstream { status, body }) => {
                assert_eq!(status, 503);
                assert!(body.contains("maintenance"));
            }
            other => panic!("expected upstream error, got {other:?}"),
        }
    }

    #[test]
    fn client_uses_configured_url() {
        let config = UpstreamConfig::default();
        let client = MicroburbsClient::new(&config).unwrap();
        assert!(client.url().ends_with("/suburb/properties"));
    }

    #[test]
    fn rejects_unprintable_token() {
        let config = UpstreamConfig {
            bearer_token: "bad\ntoken".to_string(),
            ..UpstreamConfig::default()
        };
        assert!(matches!(
            MicroburbsClient::new(&config),
            Err(ApiError::InvalidConfig(_))
        ));
    }
}
