//! REST API client for the external character catalog.
//!
//! Wraps `GET /characters?page=&limit=` and `GET /characters/{id}` using
//! [`reqwest`]. One attempt per call: no retry, no backoff.

use std::time::Duration;

use dbz_core::types::DbId;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::models::{CatalogPage, ExternalCharacter};

/// HTTP client for the catalog.
pub struct CatalogApi {
    client: reqwest::Client,
    base_url: String,
}

/// Errors from the catalog REST layer.
#[derive(Debug, thiserror::Error)]
pub enum CatalogApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The catalog returned a non-2xx status code.
    #[error("Catalog API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The body was not the expected JSON shape.
    #[error("Invalid catalog response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl CatalogApi {
    /// Create a client with its own connection pool.
    ///
    /// * `base_url` - e.g. `https://dragonball-api.com/api/`. A trailing `/`
    ///   is added when missing.
    /// * `timeout` - per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CatalogApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self::with_client(client, base_url))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        let mut base_url = base_url.to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self { client, base_url }
    }

    /// The normalized base URL (always ends with `/`).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch one page of the character listing.
    pub async fn fetch_page(&self, page: u32, limit: u32) -> Result<CatalogPage, CatalogApiError> {
        let response = self
            .client
            .get(format!("{}characters", self.base_url))
            .query(&[("page", page), ("limit", limit)])
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Fetch one character with its transformations.
    ///
    /// Returns `Ok(None)` when the catalog answers 404.
    pub async fn fetch_character(
        &self,
        id: DbId,
    ) -> Result<Option<ExternalCharacter>, CatalogApiError> {
        let response = self
            .client
            .get(format!("{}characters/{id}", self.base_url))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        Self::parse_response(response).await.map(Some)
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`CatalogApiError::ApiError`]
    /// containing the status and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, CatalogApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(CatalogApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, CatalogApiError> {
        let response = Self::ensure_success(response).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
