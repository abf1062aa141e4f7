//! Receipt vendor client.
//!
//! Two calls: a login that exchanges the caller's Basic credentials for a
//! bearer token and organization id, and the receipt submission itself.

use crate::config::VendorSettings;
use crate::error::AppError;
use crate::middleware::BasicCredentials;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use serde_json::{json, Value};

pub const TOKEN_NOT_FOUND: &str = "Token not found in response";

/// Vendor client for login and receipt submission.
#[derive(Clone)]
pub struct VendorClient {
    client: Client,
    settings: VendorSettings,
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct VendorSession {
    pub token: Secret<String>,
    /// Organization the credentials belong to. Injected into `orgId`.
    pub org_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: Option<String>,
    #[serde(rename = "orgId")]
    org_id: Option<Value>,
}

impl VendorClient {
    pub fn new(settings: VendorSettings) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(settings.request_timeout())
            .build()
            .map_err(|e| AppError::InternalError(anyhow::anyhow!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, settings })
    }

    pub fn settings(&self) -> &VendorSettings {
        &self.settings
    }

    /// Exchange the caller's credentials for a session.
    ///
    /// A non-200 answer is returned as [`AppError::Upstream`] so the caller
    /// sees the vendor's status and body.
    pub async fn login(&self, credentials: &BasicCredentials) -> Result<VendorSession, AppError> {
        let url = self.settings.login_url();

        let response = self
            .client
            .get(&url)
            .basic_auth(&credentials.username, Some(credentials.password()))
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send login request to {}: {}", url, e);
                AppError::BadGateway(format!("login request failed: {}", e))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            AppError::BadGateway(format!("failed to read login response: {}", e))
        })?;

        if status != StatusCode::OK {
            tracing::warn!(
                status = %status,
                username = %credentials.username,
                "Vendor login rejected"
            );
            return Err(upstream_error(status, &body));
        }

        let login: LoginResponse = serde_json::from_str(&body).map_err(|e| {
            tracing::error!(error = %e, "Vendor login response is not valid JSON");
            AppError::BadGateway(format!("malformed login response: {}", e))
        })?;

        let token = login
            .token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AppError::BadRequest(TOKEN_NOT_FOUND.to_string()))?;
        let org_id = login.org_id.and_then(org_id_to_string);

        tracing::debug!(org_id = ?org_id, "Vendor login succeeded");

        Ok(VendorSession {
            token: Secret::new(token),
            org_id,
        })
    }

    /// Submit a pruned target document and return the vendor's JSON answer.
    pub async fn submit_receipt(
        &self,
        session: &VendorSession,
        document: &Value,
    ) -> Result<Value, AppError> {
        let url = self.settings.receipt_url();

        let response = self
            .client
            .post(&url)
            .bearer_auth(session.token.expose_secret())
            .json(document)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send receipt to {}: {}", url, e);
                AppError::BadGateway(format!("receipt submission failed: {}", e))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            AppError::BadGateway(format!("failed to read receipt response: {}", e))
        })?;

        tracing::debug!(status = %status, body = %body, "Vendor receipt response");

        if status != StatusCode::OK {
            tracing::error!(
                status = %status,
                document = %document,
                "Vendor rejected receipt"
            );
            return Err(upstream_error(status, &body));
        }

        Ok(parse_body(&body))
    }
}

/// The vendor returns `orgId` as a number or a string.
fn org_id_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Vendor bodies are JSON in practice; anything else is wrapped so the
/// caller still receives JSON.
fn parse_body(body: &str) -> Value {
    if body.trim().is_empty() {
        return json!({});
    }
    serde_json::from_str(body).unwrap_or_else(|_| json!({ "error": body }))
}

fn upstream_error(status: StatusCode, body: &str) -> AppError {
    AppError::Upstream {
        status,
        body: parse_body(body),
    }
}
