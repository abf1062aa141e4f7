//! Basic credentials extractor.
//!
//! The caller's Basic credentials are not checked here; they are replayed
//! against the vendor login endpoint, which decides whether they are valid.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::{header::AUTHORIZATION, request::Parts};
use base64::{engine::general_purpose, Engine as _};
use secrecy::{ExposeSecret, Secret};

use crate::error::AppError;

pub const MISSING_BASIC_AUTH: &str = "Authorization header is required and should be Basic";
pub const INVALID_BASIC_AUTH: &str = "Invalid Basic credentials";
pub const MISSING_PASSWORD: &str = "Password is required";

/// Credentials decoded from an `Authorization: Basic ...` header.
#[derive(Debug, Clone)]
pub struct BasicCredentials {
    pub username: String,
    pub password: Secret<String>,
}

impl BasicCredentials {
    /// Parse a raw `Authorization` header value.
    pub fn parse(header: Option<&str>) -> Result<Self, AppError> {
        let encoded = header
            .and_then(|value| value.strip_prefix("Basic "))
            .ok_or_else(|| AppError::BadRequest(MISSING_BASIC_AUTH.to_string()))?;

        let decoded = general_purpose::STANDARD
            .decode(encoded.trim())
            .map_err(|_| AppError::BadRequest(INVALID_BASIC_AUTH.to_string()))?;
        let decoded = String::from_utf8(decoded)
            .map_err(|_| AppError::BadRequest(INVALID_BASIC_AUTH.to_string()))?;

        let (username, password) = decoded
            .split_once(':')
            .ok_or_else(|| AppError::BadRequest(INVALID_BASIC_AUTH.to_string()))?;

        if password.is_empty() {
            return Err(AppError::BadRequest(MISSING_PASSWORD.to_string()));
        }

        Ok(Self {
            username: username.to_string(),
            password: Secret::new(password.to_string()),
        })
    }

    pub fn password(&self) -> &str {
        self.password.expose_secret()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for BasicCredentials
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok());

        let credentials = BasicCredentials::parse(header).inspect_err(|e| {
            tracing::warn!(error = %e, "Rejected request credentials");
        })?;

        tracing::Span::current().record("username", credentials.username.as_str());

        Ok(credentials)
    }
}
