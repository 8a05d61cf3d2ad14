//! Product submission flow.
//!
//! Runs the form's validation gate, assembles the payload and hands it to the
//! backend. Every outcome becomes a [`SubmissionNotice`]; validation failures
//! and backend failures are reported the same way.

use serde::Serialize;
use storeroom_core::form::ProductForm;

use crate::api::{ProductApi, ProductResponse, UNEXPECTED_FAILURE};

const SUCCESS_FALLBACK: &str = "Product created successfully.";

/// Message shown to the person submitting a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionNotice {
    pub message: String,
    pub is_error: bool,
}

impl SubmissionNotice {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            message: if message.trim().is_empty() {
                SUCCESS_FALLBACK.to_string()
            } else {
                message
            },
            is_error: false,
        }
    }

    /// An error notice, prefixed with `Error: `.
    #[must_use]
    pub fn error(message: impl AsRef<str>) -> Self {
        let message = message.as_ref().trim();
        let message = if message.is_empty() {
            UNEXPECTED_FAILURE
        } else {
            message
        };
        Self {
            message: format!("Error: {message}"),
            is_error: true,
        }
    }
}

impl std::fmt::Display for SubmissionNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// What a submission produced.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionOutcome {
    pub notice: SubmissionNotice,
    /// The backend's response on success.
    pub response: Option<ProductResponse>,
    /// The form to continue editing: a fresh form after success, the
    /// submitted form unchanged after a failure.
    pub form: ProductForm,
}

impl SubmissionOutcome {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        !self.notice.is_error
    }
}

/// Validate, assemble and create a product.
///
/// Never fails: every problem is reported through the returned notice.
pub async fn submit_product<A>(api: &A, form: ProductForm) -> SubmissionOutcome
where
    A: ProductApi + ?Sized,
{
    let product = match form.submission() {
        Ok(product) => product,
        Err(e) => {
            tracing::info!(error = %e, "Product form rejected before submission");
            return SubmissionOutcome {
                notice: SubmissionNotice::error(e.to_string()),
                response: None,
                form,
            };
        }
    };

    match api.create_product(&product).await {
        Ok(response) => {
            tracing::info!(
                name = %product.name,
                variants = product.variations.len(),
                "Product submitted"
            );
            SubmissionOutcome {
                notice: SubmissionNotice::success(response.message.clone()),
                response: Some(response),
                form: ProductForm::new(form.currency),
            }
        }
        Err(e) => {
            tracing::error!(error = %e, name = %product.name, "Product submission failed");
            SubmissionOutcome {
                notice: SubmissionNotice::error(e.user_message()),
                response: None,
                form,
            }
        }
    }
}
