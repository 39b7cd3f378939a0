//! Privileged REST client for catalog management.
//!
//! Separate from the storefront's client on purpose: this one carries the
//! admin's bearer token on every request and maps authorization refusals to
//! a typed error.

use std::sync::Arc;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;
use url::Url;

use voltpeak_core::{Product, ProductId};

use crate::error::AdminError;
use crate::products::ProductPayload;

/// Default per-request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the backend's privileged product endpoints.
#[derive(Clone)]
pub struct AdminClient {
    inner: Arc<AdminClientInner>,
}

struct AdminClientInner {
    http: reqwest::Client,
    base_url: Url,
    token: SecretString,
}

impl AdminClient {
    /// Create a client against `base_url`, authenticating with `token`.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Http`] if the HTTP client cannot be built.
    pub fn new(base_url: Url, token: SecretString) -> Result<Self, AdminError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            inner: Arc::new(AdminClientInner {
                http,
                base_url,
                token,
            }),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, AdminError> {
        self.inner
            .base_url
            .join(path)
            .map_err(|e| AdminError::Backend {
                status: 0,
                message: format!("invalid endpoint path {path}: {e}"),
            })
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.bearer_auth(self.inner.token.expose_secret())
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::PermissionDenied`] when the backend refuses
    /// the credential, and other [`AdminError`] variants for transport,
    /// status or parse failures.
    #[instrument(skip_all, fields(name = %payload.name))]
    pub async fn create_product(&self, payload: &ProductPayload) -> Result<Product, AdminError> {
        let url = self.endpoint("products")?;
        let response = self
            .authorized(self.inner.http.post(url))
            .json(payload)
            .send()
            .await?;
        read_json(response).await
    }

    /// Update a product with partial fields.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::NotFound`] for unknown ids and
    /// [`AdminError::PermissionDenied`] for refused credentials.
    #[instrument(skip_all, fields(id = %id))]
    pub async fn update_product(
        &self,
        id: &ProductId,
        payload: &ProductPayload,
    ) -> Result<Product, AdminError> {
        let url = self.endpoint(&format!("products/{id}"))?;
        let response = self
            .authorized(self.inner.http.patch(url))
            .json(payload)
            .send()
            .await?;
        read_json(response).await
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::NotFound`] for unknown ids and
    /// [`AdminError::PermissionDenied`] for refused credentials.
    #[instrument(skip_all, fields(id = %id))]
    pub async fn delete_product(&self, id: &ProductId) -> Result<(), AdminError> {
        let url = self.endpoint(&format!("products/{id}"))?;
        let response = self.authorized(self.inner.http.delete(url)).send().await?;

        let status = response.status();
        let text = response.text().await?;
        match status_error(status, &text) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Fetch the whole catalog (dashboard statistics input).
    ///
    /// # Errors
    ///
    /// Returns [`AdminError`] on transport, status or parse failures.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, AdminError> {
        let url = self.endpoint("products")?;
        let response = self.authorized(self.inner.http.get(url)).send().await?;
        read_json(response).await
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, AdminError> {
    let status = response.status();
    let text = response.text().await?;

    if let Some(err) = status_error(status, &text) {
        return Err(err);
    }

    serde_json::from_str(&text).map_err(|e| {
        tracing::error!(
            error = %e,
            body = %text.chars().take(500).collect::<String>(),
            "Failed to parse backend response"
        );
        AdminError::Parse(e)
    })
}

fn status_error(status: reqwest::StatusCode, body: &str) -> Option<AdminError> {
    if status.is_success() {
        return None;
    }

    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Some(AdminError::PermissionDenied);
    }

    let message = backend_message(body).unwrap_or_else(|| format!("HTTP {status}"));

    if status == reqwest::StatusCode::NOT_FOUND {
        return Some(AdminError::NotFound(message));
    }

    Some(AdminError::Backend {
        status: status.as_u16(),
        message,
    })
}

/// Pull the first message out of a backend error body; `message` may be a
/// single string or a list of validation messages.
fn backend_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("message")? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Array(items) => items
            .first()
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned),
        _ => None,
    }
}
