//! HTTP client for the integrations backend.
//!
//! The backend exposes two endpoints per integration: one that hands out
//! the third-party authorization URL and one that returns the connected
//! items once credentials exist. Failures arrive as `{ "detail": string }`
//! payloads; anything else is reported as a transport error.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::integration::Item;
use crate::session::Session;

/// Errors from the integrations backend.
#[derive(Debug, Clone)]
pub enum BackendError {
    /// The server rejected the request with a detail message.
    Api { status: u16, detail: String },
    /// Network or connection error.
    Network(String),
    /// The response body did not have the expected shape.
    InvalidResponse(String),
}

impl BackendError {
    /// The message shown to the user: server detail when present, else
    /// the transport error, else a generic fallback.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { detail, .. } => detail.clone(),
            Self::Network(msg) => msg.clone(),
            Self::InvalidResponse(msg) => msg.clone(),
        }
    }
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Api { status, detail } => write!(f, "API error ({}): {}", status, detail),
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
        }
    }
}

impl std::error::Error for BackendError {}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Network("Request timed out".to_string())
        } else if err.is_connect() {
            Self::Network(format!("Connection failed: {}", err))
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// The integrations API surface used by the flow controller.
///
/// Implemented over HTTP by [`HttpBackend`]; tests substitute doubles.
#[async_trait]
pub trait IntegrationApi: Send + Sync {
    /// Request the third-party authorization URL for this session.
    ///
    /// Returns `None` when the server responds without a URL.
    async fn authorize_url(&self) -> Result<Option<String>, BackendError>;

    /// Fetch the connected items for this session.
    async fn items(&self) -> Result<Vec<Item>, BackendError>;
}

#[derive(Debug, Deserialize)]
struct AuthorizeResponse {
    #[serde(default)]
    authorize_url: Option<String>,
}

/// The items endpoint has returned both a bare array and a wrapped object
/// across backend versions; accept either.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ItemsResponse {
    Wrapped { items: Vec<Item> },
    Bare(Vec<Item>),
}

impl ItemsResponse {
    fn into_items(self) -> Vec<Item> {
        match self {
            Self::Wrapped { items } => items,
            Self::Bare(items) => items,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    detail: String,
}

/// Extract the user-facing detail from an error response body.
fn error_detail(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorDetail>(body)
        .map(|e| e.detail)
        .unwrap_or_else(|_| format!("Request failed with status {}", status))
}

/// HTTP implementation of [`IntegrationApi`] for the HubSpot integration.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
    session: Session,
}

impl HttpBackend {
    /// Create a backend client for the given base URL and session.
    pub fn new(base_url: impl Into<String>, session: Session, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/integrations/hubspot/{}", self.base_url, path)
    }

    async fn get(&self, path: &str) -> Result<String, BackendError> {
        let response = self
            .client
            .get(self.endpoint(path))
            .query(&self.session.query())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(BackendError::Api {
                status: status.as_u16(),
                detail: error_detail(status, &body),
            });
        }
        Ok(body)
    }
}

#[async_trait]
impl IntegrationApi for HttpBackend {
    async fn authorize_url(&self) -> Result<Option<String>, BackendError> {
        let body = self.get("authorize").await?;
        let parsed: AuthorizeResponse = serde_json::from_str(&body)
            .map_err(|e| BackendError::InvalidResponse(format!("Bad authorize response: {}", e)))?;
        Ok(parsed.authorize_url.filter(|url| !url.is_empty()))
    }

    async fn items(&self) -> Result<Vec<Item>, BackendError> {
        let body = self.get("items").await?;
        let parsed: ItemsResponse = serde_json::from_str(&body)
            .map_err(|e| BackendError::InvalidResponse(format!("Bad items response: {}", e)))?;
        Ok(parsed.into_items())
    }
}
