//! HTTP transport with JSON encoding and decoding

use mentorship_proto::ErrorResponse;
use reqwest::{RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Client errors
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Invalid response body: {0}")]
    Decode(#[source] serde_json::Error),
}

impl ClientError {
    /// Whether the server answered 404
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Status { status: 404, .. })
    }
}

/// Thin JSON client for the mentorship API
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Create a client for the server at `base_url` (e.g. `http://127.0.0.1:3000`)
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self::with_http_client(base_url, http))
    }

    /// Create a client reusing an existing `reqwest::Client`
    pub fn with_http_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST `body` to `path`
    pub async fn create<B, R>(&self, path: &str, body: &B) -> Result<R, ClientError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.execute(self.http.post(self.url(path)).json(body)).await
    }

    /// GET `path`
    pub async fn read<R>(&self, path: &str) -> Result<R, ClientError>
    where
        R: DeserializeOwned,
    {
        self.execute(self.http.get(self.url(path))).await
    }

    /// PATCH `body` to `path`
    pub async fn update<B, R>(&self, path: &str, body: &B) -> Result<R, ClientError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.execute(self.http.patch(self.url(path)).json(body)).await
    }

    /// DELETE `path`
    pub async fn delete<R>(&self, path: &str) -> Result<R, ClientError>
    where
        R: DeserializeOwned,
    {
        self.execute(self.http.delete(self.url(path))).await
    }

    async fn execute<R>(&self, request: RequestBuilder) -> Result<R, ClientError>
    where
        R: DeserializeOwned,
    {
        let response = request.send().await?;
        decode(response).await
    }
}

/// Decode a 2xx body as `R`; an empty body decodes as JSON `null`
async fn decode<R>(response: Response) -> Result<R, ClientError>
where
    R: DeserializeOwned,
{
    let status = response.status();
    let bytes = response.bytes().await?;
    debug!("{} ({} bytes)", status, bytes.len());

    if !status.is_success() {
        let message = serde_json::from_slice::<ErrorResponse>(&bytes)
            .map(|e| e.message)
            .unwrap_or_else(|_| String::from_utf8_lossy(&bytes).into_owned());
        return Err(ClientError::Status {
            status: status.as_u16(),
            message,
        });
    }

    let payload: &[u8] = if bytes.is_empty() { b"null" } else { &bytes };
    serde_json::from_slice(payload).map_err(ClientError::Decode)
}
