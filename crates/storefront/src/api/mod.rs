//! REST client for the product/order service.
//!
//! Uses `reqwest` with JSON bodies. Product detail lookups are cached with
//! `moka` (5-minute TTL) since detail views are re-entered far more often
//! than the catalog changes. List queries are never cached - the debounced
//! search pipeline owns their lifecycle.

pub mod types;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use thiserror::Error;
use tracing::instrument;
use url::Url;

use voltpeak_core::{Price, Product, ProductId};

use crate::cart::pricing::Coupon;
use crate::cart::CartLine;
use crate::catalog::CatalogQuery;
use crate::config::StorefrontConfig;

use types::{
    BackendError, CheckoutReceipt, CheckoutRequest, CouponRequest, LoginRequest, LoginResponse,
    RegisterRequest,
};

/// How long product detail responses stay cached.
const PRODUCT_CACHE_TTL: Duration = Duration::from_secs(300);
/// How many product detail responses to keep.
const PRODUCT_CACHE_CAPACITY: u64 = 1000;

/// Errors from the backend client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be sent or the response body not read.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("{message}")]
    Backend {
        /// HTTP status code.
        status: u16,
        /// Backend-provided message, or a generic one.
        message: String,
    },

    /// The requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The response body was not the JSON shape we expect.
    #[error("failed to parse backend response: {0}")]
    Parse(#[from] serde_json::Error),
}

// =============================================================================
// Gateway traits
// =============================================================================
//
// The engine's state machines talk to the backend through these seams so
// tests can substitute in-process fakes for the HTTP client.

/// Source of catalog query results.
pub trait ProductSource: Send + Sync + 'static {
    /// Run one catalog query and return the full replacement product list.
    fn search(
        &self,
        query: CatalogQuery,
    ) -> impl Future<Output = Result<Vec<Product>, ApiError>> + Send;
}

/// Resolver of coupon codes.
pub trait CouponSource: Send + Sync {
    /// Look up a coupon by code.
    fn resolve(&self, code: &str) -> impl Future<Output = Result<Coupon, ApiError>> + Send;
}

/// Order placement endpoint.
pub trait CheckoutGateway: Send + Sync {
    /// Post the cart and computed total, returning the order receipt.
    fn place_order(
        &self,
        items: &[CartLine],
        total: Price,
        coupon: &str,
    ) -> impl Future<Output = Result<CheckoutReceipt, ApiError>> + Send;
}

/// Account endpoints.
pub trait AuthGateway: Send + Sync {
    /// Exchange credentials for an access token.
    fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<LoginResponse, ApiError>> + Send;

    /// Create an account.
    fn sign_up(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;
}

// =============================================================================
// ApiClient
// =============================================================================

/// Client for the product/order service.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    base_url: Url,
    product_cache: Cache<String, Product>,
}

impl ApiClient {
    /// Create a new client against the configured backend.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the HTTP client cannot be constructed.
    pub fn new(config: &StorefrontConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        let product_cache = Cache::builder()
            .max_capacity(PRODUCT_CACHE_CAPACITY)
            .time_to_live(PRODUCT_CACHE_TTL)
            .build();

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                http,
                base_url: config.api_base_url.clone(),
                product_cache,
            }),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.inner.base_url.join(path).map_err(|e| ApiError::Backend {
            status: 0,
            message: format!("invalid endpoint path {path}: {e}"),
        })
    }

    /// Fetch the catalog with the shopper's search inputs.
    ///
    /// All four parameters are always sent; empty price bounds mean
    /// "unbounded" and the backend interprets them.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status or parse failures.
    #[instrument(skip(self))]
    pub async fn get_products(&self, query: &CatalogQuery) -> Result<Vec<Product>, ApiError> {
        let mut url = self.endpoint("products")?;
        url.query_pairs_mut()
            .append_pair("keyword", &query.keyword)
            .append_pair("minPrice", &query.min_price)
            .append_pair("maxPrice", &query.max_price)
            .append_pair("sort", query.sort.as_str());

        let response = self.inner.http.get(url).send().await?;
        read_json(response).await
    }

    /// Fetch products matching any of a comma-separated category alias list
    /// (the build planner's slot queries).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status or parse failures.
    #[instrument(skip(self))]
    pub async fn get_products_in_categories(
        &self,
        aliases: &str,
    ) -> Result<Vec<Product>, ApiError> {
        let mut url = self.endpoint("products")?;
        url.query_pairs_mut().append_pair("category", aliases);

        let response = self.inner.http.get(url).send().await?;
        read_json(response).await
    }

    /// Fetch one product by id, with caching.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] when the backend has no such product.
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: &ProductId) -> Result<Product, ApiError> {
        if let Some(product) = self.inner.product_cache.get(id.as_str()).await {
            return Ok(product);
        }

        let url = self.endpoint(&format!("products/{id}"))?;
        let response = self.inner.http.get(url).send().await?;
        let product: Product = read_json(response).await?;

        self.inner
            .product_cache
            .insert(id.as_str().to_owned(), product.clone())
            .await;
        Ok(product)
    }

    /// Drop a product from the detail cache (after an admin edit or delete).
    pub async fn invalidate_product(&self, id: &ProductId) {
        self.inner.product_cache.invalidate(id.as_str()).await;
    }

    /// Resolve a coupon code.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for unknown codes.
    #[instrument(skip(self))]
    pub async fn resolve_coupon(&self, code: &str) -> Result<Coupon, ApiError> {
        let url = self.endpoint("products/coupon")?;
        let response = self
            .inner
            .http
            .post(url)
            .json(&CouponRequest { code })
            .send()
            .await?;
        let wire = read_json(response).await?;
        Ok(Coupon::from_wire(wire))
    }

    /// Submit the checkout payload and return the order receipt.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status or parse failures.
    #[instrument(skip(self, request), fields(items = request.items.len()))]
    pub async fn submit_checkout(
        &self,
        request: &CheckoutRequest<'_>,
    ) -> Result<CheckoutReceipt, ApiError> {
        let url = self.endpoint("products/checkout")?;
        let response = self.inner.http.post(url).json(request).send().await?;
        read_json(response).await
    }

    /// Exchange credentials for an access token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Backend`] for rejected credentials.
    #[instrument(skip(self, request), fields(email = request.email))]
    pub async fn login(&self, request: &LoginRequest<'_>) -> Result<LoginResponse, ApiError> {
        let url = self.endpoint("auth/login")?;
        let response = self.inner.http.post(url).json(request).send().await?;
        read_json(response).await
    }

    /// Create an account.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Backend`] when the backend rejects the account
    /// (typically an already-used email).
    #[instrument(skip(self, request), fields(email = request.email))]
    pub async fn register(&self, request: &RegisterRequest<'_>) -> Result<(), ApiError> {
        let url = self.endpoint("auth/register")?;
        let response = self.inner.http.post(url).json(request).send().await?;
        read_status(response).await
    }
}

impl ProductSource for ApiClient {
    async fn search(&self, query: CatalogQuery) -> Result<Vec<Product>, ApiError> {
        self.get_products(&query).await
    }
}

impl CouponSource for ApiClient {
    async fn resolve(&self, code: &str) -> Result<Coupon, ApiError> {
        self.resolve_coupon(code).await
    }
}

impl CheckoutGateway for ApiClient {
    async fn place_order(
        &self,
        items: &[CartLine],
        total: Price,
        coupon: &str,
    ) -> Result<CheckoutReceipt, ApiError> {
        self.submit_checkout(&CheckoutRequest {
            items,
            total,
            coupon,
        })
        .await
    }
}

impl AuthGateway for ApiClient {
    async fn sign_in(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        self.login(&LoginRequest { email, password }).await
    }

    async fn sign_up(&self, name: &str, email: &str, password: &str) -> Result<(), ApiError> {
        self.register(&RegisterRequest {
            name,
            email,
            password,
        })
        .await
    }
}

// =============================================================================
// Response handling
// =============================================================================

/// Read a JSON body, mapping non-success statuses to typed errors first.
async fn read_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ApiError> {
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
        ApiError::Parse(e)
    })
}

/// Check the status of a response whose body carries nothing useful.
async fn read_status(response: reqwest::Response) -> Result<(), ApiError> {
    let status = response.status();
    let text = response.text().await?;
    match status_error(status, &text) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn status_error(status: reqwest::StatusCode, body: &str) -> Option<ApiError> {
    if status.is_success() {
        return None;
    }

    let message = serde_json::from_str::<BackendError>(body)
        .ok()
        .and_then(|e| e.message.first().map(str::to_owned))
        .unwrap_or_else(|| format!("HTTP {status}"));

    if status == reqwest::StatusCode::NOT_FOUND {
        return Some(ApiError::NotFound(message));
    }

    Some(ApiError::Backend {
        status: status.as_u16(),
        message,
    })
}
