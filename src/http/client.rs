//! HTTP client that hands the status code back to the caller.
//!
//! Every GitHub operation has its own notion of success (200, 201, 204, or a
//! 404 that simply means "absent"), so responses are not turned into errors
//! here. Callers inspect [`ApiResponse::status`] or use
//! [`ApiResponse::expect_status`].

use std::fmt;

use anyhow::{Context, Result};
use log::debug;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{Body, Client, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio_util::io::ReaderStream;

use super::ApiError;

/// Status and body of a completed request.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    /// Deserializes the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).context("Failed to parse JSON response from GitHub API")
    }

    /// Returns the response unchanged when its status is `expected`,
    /// otherwise an [`ApiError`] describing `operation`.
    pub fn expect_status(self, expected: StatusCode, operation: &str) -> Result<Self> {
        if self.status == expected {
            Ok(self)
        } else {
            Err(ApiError::new(operation, self.status, self.body).into())
        }
    }
}

/// Raw request body whose length is known before the first byte is sent.
pub struct UploadBody {
    body: Body,
    len: u64,
}

impl UploadBody {
    /// Streams `file` from its current position; the length comes from its metadata.
    pub fn from_file(file: std::fs::File) -> Result<Self> {
        let len = file.metadata().context("Failed to read file metadata")?.len();
        let stream = ReaderStream::new(tokio::fs::File::from_std(file));
        Ok(Self {
            body: Body::wrap_stream(stream),
            len,
        })
    }

    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl From<Vec<u8>> for UploadBody {
    fn from(content: Vec<u8>) -> Self {
        Self {
            len: content.len() as u64,
            body: Body::from(content),
        }
    }
}

impl fmt::Debug for UploadBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadBody").field("len", &self.len).finish()
    }
}

/// HTTP client without retries: each request is sent exactly once.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a new HTTP client wrapping the given reqwest Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    #[tracing::instrument(skip(self))]
    pub async fn get(&self, url: &str) -> Result<ApiResponse> {
        debug!("GET {}...", url);
        self.send(self.client.get(url)).await
    }

    #[tracing::instrument(skip(self, body))]
    pub async fn post_json<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> Result<ApiResponse> {
        debug!("POST JSON to {}...", url);
        self.send(self.client.post(url).json(body)).await
    }

    /// Posts `content` as a raw `application/octet-stream` body with an
    /// explicit `Content-Length`; file contents are streamed, not buffered.
    #[tracing::instrument(skip(self, content))]
    pub async fn post_stream(&self, url: &str, content: UploadBody) -> Result<ApiResponse> {
        debug!("POST {} bytes to {}...", content.len, url);
        self.send(
            self.client
                .post(url)
                .header(CONTENT_TYPE, "application/octet-stream")
                .header(CONTENT_LENGTH, content.len)
                .body(content.body),
        )
        .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, url: &str) -> Result<ApiResponse> {
        debug!("DELETE {}...", url);
        self.send(self.client.delete(url)).await
    }

    async fn send(&self, request: RequestBuilder) -> Result<ApiResponse> {
        let response = request
            .send()
            .await
            .context("Failed to send request to GitHub API")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read response body from GitHub API")?;

        debug!("Response status {}", status);

        Ok(ApiResponse { status, body })
    }
}
