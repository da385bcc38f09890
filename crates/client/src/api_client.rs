//! HTTP API client for the maicivy backend.
//!
//! The client keeps a cookie jar so the backend's session cookie travels with
//! every request, the way a browser fetch with `credentials: "include"` does.

use maicivy_shared::{join_url, ApiError};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;

/// HTTP client for the backend REST API. Clones share one connection pool
/// and one cookie jar.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .cookie_store(true)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Falling back to a client without cookies: {}", e);
                Client::new()
            });
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.api_base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    /// GET a JSON resource
    pub async fn get_json<TRes: DeserializeOwned>(&self, path: &str) -> Result<TRes, ApiError> {
        let url = self.url(path);
        tracing::debug!("GET {}", url);

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| network_error(path, e))?;

        read_json(path, resp).await
    }

    /// POST a JSON body and decode a JSON response
    pub async fn post_json<TReq: Serialize, TRes: DeserializeOwned>(
        &self,
        path: &str,
        body: &TReq,
    ) -> Result<TRes, ApiError> {
        let url = self.url(path);
        tracing::debug!("POST {}", url);

        let resp = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| network_error(path, e))?;

        read_json(path, resp).await
    }
}

fn network_error(endpoint: &str, e: reqwest::Error) -> ApiError {
    ApiError::Network {
        endpoint: endpoint.to_string(),
        message: e.to_string(),
    }
}

async fn read_json<TRes: DeserializeOwned>(endpoint: &str, resp: Response) -> Result<TRes, ApiError> {
    let status = resp.status();
    if !status.is_success() {
        return Err(ApiError::Http {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
        });
    }

    let text = resp.text().await.map_err(|e| ApiError::Network {
        endpoint: endpoint.to_string(),
        message: format!("failed to read body: {e}"),
    })?;

    let text = if text.is_empty() { "null" } else { text.as_str() };
    serde_json::from_str(text).map_err(|e| ApiError::Deserialize {
        endpoint: endpoint.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[tokio::test]
    async fn get_json_decodes_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/analytics/stats")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"totalVisits":100}"#)
            .create_async()
            .await;

        let client = ApiClient::new(server.url());
        let body: Value = client.get_json("/api/analytics/stats").await.unwrap();

        assert_eq!(body, json!({"totalVisits": 100}));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_success_becomes_http_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v1/cv/themes")
            .with_status(404)
            .create_async()
            .await;

        let client = ApiClient::new(server.url());
        let err = client
            .get_json::<Value>("/api/v1/cv/themes")
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ApiError::Http {
                endpoint: "/api/v1/cv/themes".to_string(),
                status: 404,
                status_text: "Not Found".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn malformed_body_is_a_deserialize_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v1/timeline")
            .with_status(200)
            .with_body("<html>")
            .create_async()
            .await;

        let client = ApiClient::new(server.url());
        let err = client.get_json::<Value>("/api/v1/timeline").await.unwrap_err();
        assert!(matches!(err, ApiError::Deserialize { .. }));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_network_error() {
        let client = ApiClient::new("http://127.0.0.1:9");
        let err = client.get_json::<Value>("/api/v1/cv").await.unwrap_err();
        assert!(matches!(err, ApiError::Network { .. }));
        assert_eq!(err.status(), None);
    }
}
