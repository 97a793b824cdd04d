use anyhow::Context;
use reqwest::{header::HeaderMap, StatusCode};
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Status, headers and decoded JSON body of one endpoint call
#[derive(Debug)]
pub struct EndpointResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl EndpointResponse {
    /// `error` field of an error body, lower-cased for rule matching
    pub fn error_text(&self) -> String {
        self.body
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_lowercase()
    }

    pub fn has_header(&self, name: &str) -> bool {
        self.headers.contains_key(name)
    }
}

/// HTTP client for a contact endpoint
pub struct ContactClient {
    http: reqwest::Client,
    url: Url,
}

impl ContactClient {
    pub fn new(url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let url = Url::parse(url).with_context(|| format!("invalid endpoint URL: {}", url))?;
        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!("endpoint URL must be http or https, got {}", url.scheme());
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self { http, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub async fn preflight(&self) -> anyhow::Result<EndpointResponse> {
        let response = self
            .http
            .request(reqwest::Method::OPTIONS, self.url.clone())
            .header("Origin", "https://example.com")
            .header("Access-Control-Request-Method", "POST")
            .send()
            .await
            .context("preflight request failed")?;
        Self::read(response).await
    }

    pub async fn submit(&self, payload: &Value) -> anyhow::Result<EndpointResponse> {
        let response = self
            .http
            .post(self.url.clone())
            .json(payload)
            .send()
            .await
            .context("submission request failed")?;
        Self::read(response).await
    }

    async fn read(response: reqwest::Response) -> anyhow::Result<EndpointResponse> {
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.bytes().await.context("failed to read response body")?;
        // Non-JSON bodies (gateway errors, empty 204s) are kept as a string
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

        Ok(EndpointResponse {
            status,
            headers,
            body,
        })
    }
}
