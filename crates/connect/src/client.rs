//! HTTP client for the Ghostfolio API.
//!
//! The client exchanges the user's security token for a bearer token once,
//! when it is created, and reuses that token for every import call.

use async_trait::async_trait;
use log::{debug, info};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use folioport_core::errors::{Error, Result};
use folioport_core::{ActivitySubmitter, ImportEnvelope};

/// Default timeout for API requests.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default address of a self-hosted Ghostfolio instance.
pub const DEFAULT_GHOSTFOLIO_URL: &str = "http://localhost:3333";

const AUTH_PATH: &str = "/api/v1/auth/anonymous";
const IMPORT_PATH: &str = "/api/v1/import";

// ─────────────────────────────────────────────────────────────────────────────
// API Request/Response Types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AuthRequest<'a> {
    access_token: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthResponse {
    auth_token: String,
}

/// Error body returned by the API. `message` is either a string or a list
/// of validation messages.
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<serde_json::Value>,
}

/// Best-effort human readable message for a failed call.
fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(err) = serde_json::from_str::<ApiErrorResponse>(body) {
        let message = match err.message {
            Some(serde_json::Value::String(s)) => Some(s),
            Some(serde_json::Value::Array(items)) => Some(
                items
                    .iter()
                    .map(|item| match item {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join("; "),
            ),
            _ => None,
        };
        if let Some(msg) = message.or(err.error) {
            return msg;
        }
    }

    if body.trim().is_empty() {
        status
            .canonical_reason()
            .unwrap_or("no response body")
            .to_string()
    } else {
        body.chars().take(200).collect()
    }
}

fn transport_error(context: &str, err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::TransportFailure(format!("{}: request timed out", context))
    } else {
        Error::TransportFailure(format!("{}: {}", context, err))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Ghostfolio API Client
// ─────────────────────────────────────────────────────────────────────────────

/// Authenticated client for one Ghostfolio instance.
///
/// # Example
///
/// ```ignore
/// let client = GhostfolioClient::connect("http://localhost:3333", &token, timeout).await?;
/// session.decide(ReviewDecision::Import, &client).await?;
/// ```
#[derive(Debug, Clone)]
pub struct GhostfolioClient {
    client: reqwest::Client,
    base_url: String,
    auth_header: HeaderValue,
}

impl GhostfolioClient {
    /// Authenticates with a security token and returns a ready client.
    ///
    /// # Errors
    ///
    /// `RemoteRejected` if the token is refused, `TransportFailure` if the
    /// instance cannot be reached within `timeout`.
    pub async fn connect(base_url: &str, security_token: &str, timeout: Duration) -> Result<Self> {
        let client = Self::http_client(timeout)?;
        let base_url = base_url.trim_end_matches('/').to_string();
        let url = format!("{}{}", base_url, AUTH_PATH);
        debug!("[Ghostfolio] POST {}", url);

        let response = client
            .post(&url)
            .json(&AuthRequest {
                access_token: security_token,
            })
            .send()
            .await
            .map_err(|e| transport_error("Authentication failed", e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error("Failed to read authentication response", e))?;

        if !status.is_success() {
            return Err(Error::RemoteRejected {
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }

        let auth: AuthResponse = serde_json::from_str(&body).map_err(|e| {
            Error::Unexpected(format!("Failed to parse authentication response: {}", e))
        })?;
        info!("[Ghostfolio] Authenticated against {}", base_url);

        Self::from_parts(client, base_url, &auth.auth_token)
    }

    /// Creates a client from an already issued bearer token.
    pub fn with_auth_token(base_url: &str, auth_token: &str, timeout: Duration) -> Result<Self> {
        let client = Self::http_client(timeout)?;
        Self::from_parts(client, base_url.trim_end_matches('/').to_string(), auth_token)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn http_client(timeout: Duration) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Unexpected(format!("Failed to initialize HTTP client: {}", e)))
    }

    fn from_parts(client: reqwest::Client, base_url: String, auth_token: &str) -> Result<Self> {
        let auth_header = HeaderValue::from_str(&format!("Bearer {}", auth_token))
            .map_err(|e| Error::Unexpected(format!("Invalid auth token format: {}", e)))?;
        Ok(Self {
            client,
            base_url,
            auth_header,
        })
    }

    /// Create default headers for API requests.
    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, self.auth_header.clone());
        headers
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// ActivitySubmitter Trait Implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl ActivitySubmitter for GhostfolioClient {
    /// Posts one envelope to the import endpoint.
    async fn submit(&self, envelope: &ImportEnvelope) -> Result<()> {
        let url = format!("{}{}", self.base_url, IMPORT_PATH);
        debug!("[Ghostfolio] POST {}", url);

        let response = self
            .client
            .post(&url)
            .headers(self.headers())
            .json(envelope)
            .send()
            .await
            .map_err(|e| transport_error("Import request failed", e))?;

        let status = response.status();
        if status.is_success() {
            if let Some(record) = envelope.record() {
                info!(
                    "[Ghostfolio] Imported {} {} on {}",
                    record.activity_type,
                    record.symbol,
                    record.trade_date()
                );
            }
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(Error::RemoteRejected {
            status: status.as_u16(),
            message: error_message(status, &body),
        })
    }
}
