//! HTTP client for the vehicle-data API
//!
//! The client is built once at startup with the static `x-AuthKey` header and
//! handed to the app; nothing about it is process-global.

use super::{ApiError, MarketValueQuery, VehicleDataApi};
use async_trait::async_trait;
use reqwest::{header, Client, Url};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Header carrying the static API key
const AUTH_HEADER: &str = "x-AuthKey";

/// Request timeout for every call
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the vehicle-data API
#[derive(Debug, Clone)]
pub struct VehicleDataClient {
    base_url: Url,
    http: Client,
}

impl VehicleDataClient {
    /// Create a client for `base_url`, authenticating with `auth_key`
    pub fn new(base_url: &str, auth_key: &str) -> Result<Self, ApiError> {
        let base_url =
            Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }

        let mut default_headers = header::HeaderMap::new();
        if !auth_key.is_empty() {
            let value = header::HeaderValue::from_str(auth_key)
                .map_err(|e| ApiError::Decode(format!("auth key is not a valid header: {e}")))?;
            default_headers.insert(AUTH_HEADER, value);
        }

        let http = Client::builder()
            .default_headers(default_headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self { base_url, http })
    }

    /// Build an endpoint URL from raw path segments; each segment is percent-encoded
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json(&self, url: Url) -> Result<Value, ApiError> {
        debug!(%url, "GET");
        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.json::<Value>().await?)
    }

    async fn fetch_options(&self, segments: &[&str], key: &str) -> Result<Vec<String>, ApiError> {
        let url = self.endpoint(segments)?;
        let body = self.get_json(url).await?;
        extract_options(&body, key)
    }
}

#[async_trait]
impl VehicleDataApi for VehicleDataClient {
    async fn fetch_years(&self) -> Result<Vec<String>, ApiError> {
        self.fetch_options(&["ymm-specs", "options", "v2", "year"], "years")
            .await
    }

    async fn fetch_makes(&self, year: &str) -> Result<Vec<String>, ApiError> {
        self.fetch_options(&["ymm-specs", "options", "v2", "make", year], "makes")
            .await
    }

    async fn fetch_models(&self, year: &str, make: &str) -> Result<Vec<String>, ApiError> {
        self.fetch_options(
            &["ymm-specs", "options", "v2", "model", year, make],
            "models",
        )
        .await
    }

    async fn fetch_market_value(&self, query: &MarketValueQuery) -> Result<Value, ApiError> {
        let url = query.url(self)?;
        self.get_json(url).await
    }
}

/// Pull a list of option labels out of a response body.
///
/// Entries may be strings or numbers; anything else is rendered as JSON text.
pub fn extract_options(body: &Value, key: &str) -> Result<Vec<String>, ApiError> {
    let entries = body
        .get(key)
        .and_then(Value::as_array)
        .ok_or_else(|| ApiError::Decode(format!("missing '{key}' array")))?;

    Ok(entries
        .iter()
        .map(|entry| match entry {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client() -> VehicleDataClient {
        VehicleDataClient::new("https://api.vehicledatabases.com", "key").unwrap()
    }

    #[test]
    fn test_endpoint_joins_segments() {
        let url = client()
            .endpoint(&["ymm-specs", "options", "v2", "make", "2020"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.vehicledatabases.com/ymm-specs/options/v2/make/2020"
        );
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let url = client()
            .endpoint(&["ymm-specs", "options", "v2", "model", "2020", "Land Rover"])
            .unwrap();
        assert!(url.as_str().ends_with("/model/2020/Land%20Rover"));

        let url = client().endpoint(&["x", "a/b"]).unwrap();
        assert!(url.as_str().ends_with("/x/a%2Fb"));
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let client = VehicleDataClient::new("http://localhost:9000/proxy/", "").unwrap();
        let url = client.endpoint(&["ymm-specs"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:9000/proxy/ymm-specs");
    }

    #[test]
    fn test_new_rejects_invalid_base() {
        assert!(matches!(
            VehicleDataClient::new("not a url", "key"),
            Err(ApiError::InvalidUrl(_))
        ));
        assert!(matches!(
            VehicleDataClient::new("mailto:someone@example.com", "key"),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_extract_options_stringifies_numbers() {
        let body = json!({"years": [2024, "2023", 2022]});
        assert_eq!(
            extract_options(&body, "years").unwrap(),
            vec!["2024", "2023", "2022"]
        );
    }

    #[test]
    fn test_extract_options_missing_key() {
        let body = json!({"status": "error"});
        assert!(matches!(
            extract_options(&body, "makes"),
            Err(ApiError::Decode(_))
        ));
    }

    #[test]
    fn test_extract_options_empty_list() {
        let body = json!({"models": []});
        assert!(extract_options(&body, "models").unwrap().is_empty());
    }
}
