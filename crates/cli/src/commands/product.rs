//! Product backend commands.
//!
//! # Usage
//!
//! ```bash
//! # Validate a saved product form and create it
//! sr-cli product submit new-tee.yaml
//!
//! # Move a product through the publishing workflow
//! sr-cli product status 6922bc641a947eb599a030e2 published
//!
//! # Fetch, list and delete
//! sr-cli product get premium-t-shirt-hk
//! sr-cli product list --status "pending review" --limit 20
//! sr-cli product delete 6922bc641a947eb599a030e2
//! ```
//!
//! # Environment Variables
//!
//! - `CATALOG_API_BASE_URL` - Product backend base URL
//! - `CATALOG_API_TOKEN` - Optional bearer token for admin calls
//! - `CATALOG_API_TIMEOUT_SECS` - Request timeout
//! - `CATALOG_DEFAULT_CURRENCY` - Currency for forms that do not name one

use std::io::Write;
use std::path::Path;

use storeroom_admin::api::{ProductApi, ProductQuery, ProductResponse};
use storeroom_admin::submit_product;
use storeroom_core::form::ProductForm;
use storeroom_core::{CurrencyCode, ProductId, PublishStatus};

use super::{CommandError, load_document};

/// Load a saved [`ProductForm`] from JSON or YAML.
///
/// Forms that do not name a currency get `default_currency`.
///
/// # Errors
///
/// Returns error if the file cannot be read or is not a product form.
pub fn load_form(
    path: &Path,
    default_currency: CurrencyCode,
) -> Result<ProductForm, CommandError> {
    let mut document: serde_json::Value = load_document(path)?;

    if let Some(fields) = document.as_object_mut() {
        fields
            .entry("currency")
            .or_insert_with(|| default_currency.code().into());
    }

    serde_json::from_value(document).map_err(|e| CommandError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Validate a saved form and create the product.
///
/// The submission notice is written either way.
///
/// # Errors
///
/// Returns [`CommandError::Rejected`] if validation or the backend rejected
/// the product, or error if the form cannot be loaded.
pub async fn submit<A>(
    api: &A,
    path: &Path,
    default_currency: CurrencyCode,
    out: &mut impl Write,
) -> Result<(), CommandError>
where
    A: ProductApi + ?Sized,
{
    let form = load_form(path, default_currency)?;
    let outcome = submit_product(api, form).await;

    writeln!(out, "{}", outcome.notice)?;
    if !outcome.is_success() {
        return Err(CommandError::Rejected(outcome.notice.message));
    }

    if let Some(id) = outcome
        .response
        .as_ref()
        .and_then(|response| response.product.as_ref())
        .and_then(|product| product.id.as_ref())
    {
        writeln!(out, "Product ID: {id}")?;
    }
    Ok(())
}

/// Change a product's publish status.
///
/// # Errors
///
/// Returns error if `status` is not a publish status or the backend call
/// fails.
pub async fn set_status<A>(
    api: &A,
    id: &str,
    status: &str,
    out: &mut impl Write,
) -> Result<(), CommandError>
where
    A: ProductApi + ?Sized,
{
    let status: PublishStatus = status.parse().map_err(CommandError::InvalidArgument)?;
    let response = api
        .update_product_status(&ProductId::new(id), status)
        .await?;
    write_response(&response, &format!("Product {id} is now {status}"), out)
}

/// Delete a product.
///
/// # Errors
///
/// Returns error if the backend call fails.
pub async fn delete<A>(api: &A, id: &str, out: &mut impl Write) -> Result<(), CommandError>
where
    A: ProductApi + ?Sized,
{
    let response = api.delete_product(&ProductId::new(id)).await?;
    write_response(&response, &format!("Product {id} deleted"), out)
}

/// Fetch a product by slug and write it as JSON.
///
/// # Errors
///
/// Returns error if the backend call fails.
pub async fn get<A>(api: &A, slug: &str, out: &mut impl Write) -> Result<(), CommandError>
where
    A: ProductApi + ?Sized,
{
    let product = api.get_product_by_slug(slug).await?;
    serde_json::to_writer_pretty(&mut *out, &product)?;
    writeln!(out)?;
    Ok(())
}

/// List products, one line each.
///
/// # Errors
///
/// Returns error if the backend call fails.
pub async fn list<A>(
    api: &A,
    query: &ProductQuery,
    out: &mut impl Write,
) -> Result<(), CommandError>
where
    A: ProductApi + ?Sized,
{
    let page = api.list_products(query).await?;

    for product in &page.products {
        let id = product
            .id
            .as_ref()
            .map_or_else(|| "-".to_string(), ToString::to_string);
        writeln!(
            out,
            "{id}  {} [{}] {} variants",
            product.name,
            product.publish_status,
            product.variations.len()
        )?;
    }

    match page.total {
        Some(total) => writeln!(out, "{} of {total} products", page.products.len())?,
        None => writeln!(out, "{} products", page.products.len())?,
    }
    Ok(())
}

fn write_response(
    response: &ProductResponse,
    fallback: &str,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let message = response.message.trim();
    writeln!(out, "{}", if message.is_empty() { fallback } else { message })?;
    Ok(())
}
