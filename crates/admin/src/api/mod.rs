//! Product backend API.
//!
//! [`ProductApi`] is the seam between the submission flow and the backend
//! that stores products. [`HttpProductApi`] talks to the real backend over
//! HTTP; tests substitute their own implementation.
//!
//! # Endpoints
//!
//! | Operation | Request |
//! |-----------|---------|
//! | create | `POST {base}/api/products` |
//! | update | `PUT {base}/{id}` |
//! | status | `PATCH {base}/status/{id}` with `{"publishStatus": ...}` |
//! | delete | `DELETE {base}/{id}` |
//! | list | `GET {base}/` with query parameters |
//! | by slug | `GET {base}/{slug}` |
//!
//! Admin operations send a `role: admin` header and, when configured, a
//! bearer token.

mod client;

pub use client::HttpProductApi;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use storeroom_core::{Product, ProductId, PublishStatus};
use thiserror::Error;

/// Fallback message when a failure carries no usable text.
pub const UNEXPECTED_FAILURE: &str = "Product submission failed due to an unexpected error.";

/// Errors that can occur when talking to the product backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend returned an error response.
    #[error("{message}")]
    Backend { status: u16, message: String },

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Failed to parse a successful response.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Request could not be built.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Message suitable for showing to the person submitting.
    #[must_use]
    pub fn user_message(&self) -> String {
        let message = match self {
            Self::Backend { message, .. } => message.trim().to_string(),
            other => other.to_string(),
        };
        if message.is_empty() {
            UNEXPECTED_FAILURE.to_string()
        } else {
            message
        }
    }
}

/// Response body of the backend's write operations.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default, alias = "data", skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,
}

/// Query parameters for listing products.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_status: Option<PublishStatus>,
    #[serde(rename = "q", skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// A page of products.
///
/// The backend answers list calls either with a bare array or with an object
/// carrying `products` and paging fields; both are accepted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "RawProductPage")]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub total: Option<u64>,
    pub page: Option<u32>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawProductPage {
    Bare(Vec<Product>),
    Paged {
        #[serde(default, alias = "data")]
        products: Vec<Product>,
        #[serde(default)]
        total: Option<u64>,
        #[serde(default)]
        page: Option<u32>,
    },
}

impl From<RawProductPage> for ProductPage {
    fn from(raw: RawProductPage) -> Self {
        match raw {
            RawProductPage::Bare(products) => Self {
                products,
                total: None,
                page: None,
            },
            RawProductPage::Paged {
                products,
                total,
                page,
            } => Self {
                products,
                total,
                page,
            },
        }
    }
}

/// A single product, bare or wrapped as `{"product": ...}`.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum ProductEnvelope {
    Wrapped {
        #[serde(alias = "data")]
        product: Product,
    },
    Bare(Product),
}

impl ProductEnvelope {
    pub(crate) fn into_product(self) -> Product {
        match self {
            Self::Wrapped { product } | Self::Bare(product) => product,
        }
    }
}

/// Operations the product backend offers.
#[async_trait]
pub trait ProductApi: Send + Sync {
    /// Create a product (admin).
    async fn create_product(&self, product: &Product) -> Result<ProductResponse, ApiError>;

    /// Replace a product (admin).
    async fn update_product(
        &self,
        id: &ProductId,
        product: &Product,
    ) -> Result<ProductResponse, ApiError>;

    /// Change a product's publish status (admin).
    async fn update_product_status(
        &self,
        id: &ProductId,
        status: PublishStatus,
    ) -> Result<ProductResponse, ApiError>;

    /// Delete a product (admin).
    async fn delete_product(&self, id: &ProductId) -> Result<ProductResponse, ApiError>;

    /// List products.
    async fn list_products(&self, query: &ProductQuery) -> Result<ProductPage, ApiError>;

    /// Fetch one product by slug.
    async fn get_product_by_slug(&self, slug: &str) -> Result<Product, ApiError>;
}
