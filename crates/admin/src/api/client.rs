//! HTTP implementation of [`ProductApi`].

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, StatusCode};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use storeroom_core::{Product, ProductId, PublishStatus};
use tracing::instrument;
use url::Url;

use super::{
    ApiError, ProductApi, ProductEnvelope, ProductPage, ProductQuery, ProductResponse,
    UNEXPECTED_FAILURE,
};
use crate::config::CatalogApiConfig;

/// Product backend client over HTTP.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct HttpProductApi {
    inner: Arc<HttpProductApiInner>,
}

struct HttpProductApiInner {
    client: reqwest::Client,
    base_url: Url,
    admin_headers: HeaderMap,
}

impl HttpProductApi {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns error if the token is not a valid header value or the HTTP
    /// client fails to build.
    pub fn new(config: &CatalogApiConfig) -> Result<Self, ApiError> {
        let mut admin_headers = HeaderMap::new();
        admin_headers.insert("role", HeaderValue::from_static("admin"));

        if let Some(token) = &config.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
                .map_err(|e| ApiError::InvalidRequest(format!("Invalid token format: {e}")))?;
            value.set_sensitive(true);
            admin_headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(HttpProductApiInner {
                client,
                base_url: config.base_url.clone(),
                admin_headers,
            }),
        })
    }

    /// The backend base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Base URL with `segments` appended, each percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidRequest("base URL cannot take a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.inner.client.request(method, url)
    }

    fn admin_request(&self, method: Method, url: Url) -> RequestBuilder {
        self.request(method, url)
            .headers(self.inner.admin_headers.clone())
    }

    /// Send a request and parse the JSON body of a successful response.
    ///
    /// A 204 or blank body yields `None`.
    async fn fetch<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<Option<T>, ApiError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(Self::parse_error(response).await);
        }

        let body = response.text().await?;
        if status == StatusCode::NO_CONTENT || body.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&body)
            .map(Some)
            .map_err(|e| ApiError::Parse(format!("Failed to parse response: {e}")))
    }

    /// Like [`Self::fetch`], reading an empty body as `T::default()`.
    async fn send<T: DeserializeOwned + Default>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        Ok(self.fetch(request).await?.unwrap_or_default())
    }

    /// Turn an error response into an [`ApiError`].
    async fn parse_error(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body);

        tracing::warn!(status, %message, "Product backend returned an error");

        if status == 404 {
            return ApiError::NotFound(message);
        }
        ApiError::Backend { status, message }
    }
}

/// Best human-readable message in an error body.
///
/// Prefers a JSON `message` (or `error`) string field, then the raw body,
/// then a fixed fallback.
pub(crate) fn error_message(body: &str) -> String {
    let from_json = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["message", "error"].iter().find_map(|key| {
                value
                    .get(key)
                    .and_then(serde_json::Value::as_str)
                    .map(str::trim)
                    .filter(|message| !message.is_empty())
                    .map(str::to_string)
            })
        });

    from_json.unwrap_or_else(|| {
        let raw = body.trim();
        if raw.is_empty() {
            UNEXPECTED_FAILURE.to_string()
        } else {
            raw.to_string()
        }
    })
}

#[async_trait]
impl ProductApi for HttpProductApi {
    #[instrument(skip(self, product), fields(name = %product.name, variants = product.variations.len()))]
    async fn create_product(&self, product: &Product) -> Result<ProductResponse, ApiError> {
        let url = self.endpoint(&["api", "products"])?;
        let response: ProductResponse = self
            .send(self.admin_request(Method::POST, url).json(product))
            .await?;
        tracing::info!(message = %response.message, "Product created");
        Ok(response)
    }

    #[instrument(skip(self, product), fields(id = %id))]
    async fn update_product(
        &self,
        id: &ProductId,
        product: &Product,
    ) -> Result<ProductResponse, ApiError> {
        let url = self.endpoint(&[id.as_str()])?;
        self.send(self.admin_request(Method::PUT, url).json(product))
            .await
    }

    #[instrument(skip(self), fields(id = %id, status = %status))]
    async fn update_product_status(
        &self,
        id: &ProductId,
        status: PublishStatus,
    ) -> Result<ProductResponse, ApiError> {
        let url = self.endpoint(&["status", id.as_str()])?;
        let body = serde_json::json!({ "publishStatus": status });
        self.send(self.admin_request(Method::PATCH, url).json(&body))
            .await
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete_product(&self, id: &ProductId) -> Result<ProductResponse, ApiError> {
        let url = self.endpoint(&[id.as_str()])?;
        self.send(self.admin_request(Method::DELETE, url)).await
    }

    #[instrument(skip(self))]
    async fn list_products(&self, query: &ProductQuery) -> Result<ProductPage, ApiError> {
        let url = self.inner.base_url.clone();
        self.send(self.request(Method::GET, url).query(query)).await
    }

    #[instrument(skip(self))]
    async fn get_product_by_slug(&self, slug: &str) -> Result<Product, ApiError> {
        let url = self.endpoint(&[slug])?;
        let envelope: Option<ProductEnvelope> = self.fetch(self.request(Method::GET, url)).await?;
        envelope
            .map(ProductEnvelope::into_product)
            .ok_or_else(|| ApiError::NotFound(format!("Product {slug} not found")))
    }
}

impl std::fmt::Debug for HttpProductApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpProductApi")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}
