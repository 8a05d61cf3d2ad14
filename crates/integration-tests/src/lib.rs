//! Integration test support for Storeroom.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p storeroom-integration-tests
//! ```
//!
//! No external services are needed:
//!
//! - [`InMemoryProductApi`] - A [`ProductApi`] backed by a map, for driving
//!   the submission flow
//! - [`StubServer`] - A loopback HTTP server with a canned reply, for driving
//!   [`storeroom_admin::HttpProductApi`] over a real socket
//! - [`fixtures`] - Product forms built through the edit reducer

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use storeroom_admin::ApiError;
use storeroom_admin::api::{ProductApi, ProductPage, ProductQuery, ProductResponse};
use storeroom_core::{Product, ProductId, PublishStatus, slugify};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

// =============================================================================
// In-memory backend
// =============================================================================

/// A call received by [`InMemoryProductApi`].
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    Create(Product),
    Update(ProductId, Product),
    Status(ProductId, PublishStatus),
    Delete(ProductId),
    List(ProductQuery),
    Get(String),
}

/// Product backend held in memory.
///
/// Created products get sequential IDs (`prod-1`, `prod-2`, ...). A backend
/// built with [`InMemoryProductApi::failing`] answers every call with the
/// same error response.
#[derive(Debug, Default)]
pub struct InMemoryProductApi {
    products: RwLock<BTreeMap<String, Product>>,
    next_id: RwLock<u32>,
    calls: Mutex<Vec<ApiCall>>,
    failure: Option<(u16, String)>,
}

impl InMemoryProductApi {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend that rejects every call with `status` and `message`.
    #[must_use]
    pub fn failing(status: u16, message: impl Into<String>) -> Self {
        Self {
            failure: Some((status, message.into())),
            ..Self::default()
        }
    }

    /// Every call received so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Products created through [`ProductApi::create_product`].
    #[must_use]
    pub fn created(&self) -> Vec<Product> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ApiCall::Create(product) => Some(product),
                _ => None,
            })
            .collect()
    }

    /// Stored products, ordered by ID.
    pub async fn stored(&self) -> Vec<Product> {
        self.products.read().await.values().cloned().collect()
    }

    fn record(&self, call: ApiCall) -> Result<(), ApiError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);

        match &self.failure {
            Some((status, message)) => Err(ApiError::Backend {
                status: *status,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

fn not_found(id: &ProductId) -> ApiError {
    ApiError::NotFound(format!("Product {id} not found"))
}

#[async_trait]
impl ProductApi for InMemoryProductApi {
    async fn create_product(&self, product: &Product) -> Result<ProductResponse, ApiError> {
        self.record(ApiCall::Create(product.clone()))?;

        let mut next_id = self.next_id.write().await;
        *next_id += 1;
        let id = format!("prod-{}", *next_id);

        let mut stored = product.clone();
        stored.id = Some(ProductId::new(id.clone()));
        self.products.write().await.insert(id, stored.clone());

        Ok(ProductResponse {
            message: "Product created successfully!".to_string(),
            product: Some(stored),
        })
    }

    async fn update_product(
        &self,
        id: &ProductId,
        product: &Product,
    ) -> Result<ProductResponse, ApiError> {
        self.record(ApiCall::Update(id.clone(), product.clone()))?;

        let mut products = self.products.write().await;
        let existing = products.get_mut(id.as_str()).ok_or_else(|| not_found(id))?;
        *existing = Product {
            id: Some(id.clone()),
            ..product.clone()
        };

        Ok(ProductResponse {
            message: "Product updated".to_string(),
            product: Some(existing.clone()),
        })
    }

    async fn update_product_status(
        &self,
        id: &ProductId,
        status: PublishStatus,
    ) -> Result<ProductResponse, ApiError> {
        self.record(ApiCall::Status(id.clone(), status))?;

        let mut products = self.products.write().await;
        let existing = products.get_mut(id.as_str()).ok_or_else(|| not_found(id))?;
        existing.publish_status = status;

        Ok(ProductResponse {
            message: format!("Status updated to {status}"),
            product: Some(existing.clone()),
        })
    }

    async fn delete_product(&self, id: &ProductId) -> Result<ProductResponse, ApiError> {
        self.record(ApiCall::Delete(id.clone()))?;

        self.products
            .write()
            .await
            .remove(id.as_str())
            .ok_or_else(|| not_found(id))?;

        Ok(ProductResponse {
            message: "Product deleted".to_string(),
            product: None,
        })
    }

    async fn list_products(&self, query: &ProductQuery) -> Result<ProductPage, ApiError> {
        self.record(ApiCall::List(query.clone()))?;

        let products: Vec<Product> = self
            .products
            .read()
            .await
            .values()
            .filter(|p| query.category.as_ref().is_none_or(|c| &p.category == c))
            .filter(|p| query.publish_status.is_none_or(|s| p.publish_status == s))
            .filter(|p| {
                query.search.as_ref().is_none_or(|term| {
                    p.name.to_lowercase().contains(&term.to_lowercase())
                })
            })
            .cloned()
            .collect();

        Ok(ProductPage {
            total: Some(products.len() as u64),
            page: query.page,
            products,
        })
    }

    async fn get_product_by_slug(&self, slug: &str) -> Result<Product, ApiError> {
        self.record(ApiCall::Get(slug.to_string()))?;

        self.products
            .read()
            .await
            .values()
            .find(|p| slugify(&p.name) == slug || p.variations.iter().any(|v| v.slug == slug))
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("Product {slug} not found")))
    }
}

// =============================================================================
// Loopback HTTP server
// =============================================================================

/// A request received by [`StubServer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    /// Path and query, as sent.
    pub target: String,
    /// Header names are lowercase.
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    /// First value of a header, by lowercase name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// The body parsed as JSON.
    ///
    /// # Errors
    ///
    /// Returns error if the body is not JSON.
    pub fn json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// Loopback HTTP server that answers every request with the same status and
/// body, recording what it receives.
#[derive(Debug)]
pub struct StubServer {
    base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: JoinHandle<()>,
}

#[derive(Debug, Clone)]
struct StubState {
    status: StatusCode,
    reply: Arc<str>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubServer {
    /// Bind a free loopback port and start serving.
    ///
    /// # Errors
    ///
    /// Returns error if `status` is not a valid status code or no port can
    /// be bound.
    pub async fn start(status: u16, body: impl Into<String>) -> std::io::Result<Self> {
        let status = StatusCode::from_u16(status)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let base_url = format!("http://{}", listener.local_addr()?);
        let requests = Arc::new(Mutex::new(Vec::new()));

        let app = Router::new()
            .fallback(record_and_reply)
            .with_state(StubState {
                status,
                reply: Arc::from(body.into().as_str()),
                requests: Arc::clone(&requests),
            });

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::debug!(error = %e, "Stub server stopped");
            }
        });

        Ok(Self {
            base_url,
            requests,
            handle,
        })
    }

    /// Base URL, e.g. `http://127.0.0.1:49152`.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Requests answered so far.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Record the request, then answer with the canned reply.
///
/// Recording happens before the reply is sent, so a client that has seen the
/// response also sees the request in [`StubServer::requests`].
async fn record_and_reply(
    State(state): State<StubState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let target = uri
        .path_and_query()
        .map_or_else(|| uri.path().to_string(), ToString::to_string);
    let headers = headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();

    state
        .requests
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(RecordedRequest {
            method: method.to_string(),
            target,
            headers,
            body: String::from_utf8_lossy(&body).into_owned(),
        });

    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.reply.to_string(),
    )
        .into_response()
}

// =============================================================================
// Fixtures
// =============================================================================

pub mod fixtures {
    //! Product forms built the way an editor would build them.

    use storeroom_core::form::{
        ColorEdit, DescriptionEdit, FieldEdit, FormEdit, ImageEdit, PriceEdit, ProductForm,
        SpecificationEdit, VariationEdit,
    };
    use storeroom_core::{ColorId, CurrencyCode, HexColor};

    /// Vendor ID present in the reference directory.
    pub const VENDOR_ID: &str = "VEN-2025-D303";

    /// A complete two-color tee, ready to submit.
    ///
    /// Navy is added first and is the prime color. Each color has one primary
    /// image and one size row.
    #[must_use]
    pub fn two_color_tee() -> (ProductForm, ColorId, ColorId) {
        let navy = ColorId::generate();
        let sand = ColorId::generate();

        let form = ProductForm::new(CurrencyCode::INR).apply_all([
            FormEdit::Field(FieldEdit::Name("Organic Crew Tee".to_string())),
            FormEdit::Field(FieldEdit::Brand("Loomcraft".to_string())),
            FormEdit::Field(FieldEdit::Sku("TEE-ORGANIC".to_string())),
            FormEdit::Field(FieldEdit::Category("Clothing & Apparel".to_string())),
            FormEdit::Field(FieldEdit::Vendor(VENDOR_ID.to_string())),
            FormEdit::Field(FieldEdit::Keywords("tee, organic, cotton".to_string())),
            FormEdit::Color(ColorEdit::Add { id: navy }),
            FormEdit::Color(ColorEdit::SetHex {
                id: navy,
                hex: HexColor::from_rgb(0x1E, 0x3A, 0x8A),
            }),
            FormEdit::Color(ColorEdit::Add { id: sand }),
            FormEdit::Color(ColorEdit::SetHex {
                id: sand,
                hex: HexColor::from_rgb(0xD6, 0xC2, 0x9C),
            }),
        ]);

        let form = [(navy, "1499", "20"), (sand, "1299", "0")]
            .into_iter()
            .fold(form, |form, (color, mrp, discount)| {
                form.apply_all([
                    FormEdit::Price {
                        color,
                        edit: PriceEdit::Mrp(mrp.to_string()),
                    },
                    FormEdit::Price {
                        color,
                        edit: PriceEdit::DiscountPercent(discount.to_string()),
                    },
                    FormEdit::Image {
                        color,
                        edit: ImageEdit::Url {
                            index: 0,
                            url: format!("https://cdn.example.com/tee-{color}.jpg"),
                        },
                    },
                    FormEdit::Specification {
                        color,
                        edit: SpecificationEdit::Key {
                            index: 0,
                            key: "Material".to_string(),
                        },
                    },
                    FormEdit::Specification {
                        color,
                        edit: SpecificationEdit::Value {
                            index: 0,
                            value: "Organic cotton".to_string(),
                        },
                    },
                    FormEdit::Description {
                        color,
                        edit: DescriptionEdit::Story("Garment-dyed in small batches.".to_string()),
                    },
                ])
            });

        let form = form.apply_all([
            FormEdit::Variation(VariationEdit::Color {
                index: 0,
                color: Some(navy),
            }),
            FormEdit::Variation(VariationEdit::Size {
                index: 0,
                size: "M".to_string(),
            }),
            FormEdit::Variation(VariationEdit::Stock {
                index: 0,
                stock: "12".to_string(),
            }),
            FormEdit::Variation(VariationEdit::Sku {
                index: 0,
                sku: "TEE-NAVY-M".to_string(),
            }),
            FormEdit::Variation(VariationEdit::Add),
            FormEdit::Variation(VariationEdit::Color {
                index: 1,
                color: Some(sand),
            }),
            FormEdit::Variation(VariationEdit::Size {
                index: 1,
                size: "L".to_string(),
            }),
            FormEdit::Variation(VariationEdit::Stock {
                index: 1,
                stock: "0".to_string(),
            }),
            FormEdit::Variation(VariationEdit::Sku {
                index: 1,
                sku: "TEE-SAND-L".to_string(),
            }),
        ]);

        (form, navy, sand)
    }
}
