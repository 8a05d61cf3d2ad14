//! Assemble the create-product payload from a form.

use super::validate::SubmitError;
use super::{ColorEntry, ProductForm, VariationRow};
use crate::form::edit::parse_count;
use crate::types::{Color, Product, Variant, slugify, split_list};

/// Build the [`Product`] payload for a form.
///
/// Only variation rows with a SKU become variants. This does not run the
/// full validation gate; call [`validate_submission`](super::validate_submission)
/// first, or use [`ProductForm::submission`].
///
/// # Errors
///
/// Returns [`SubmitError::InvalidVariationReference`] for a SKU row whose
/// color is unset or unknown.
pub fn prepare_product(form: &ProductForm) -> Result<Product, SubmitError> {
    let product_slug = if form.slug.is_empty() {
        slugify(&form.name)
    } else {
        form.slug.clone()
    };

    let variations = form
        .variations
        .iter()
        .filter(|row| row.has_sku())
        .map(|row| {
            let color = row
                .color
                .and_then(|id| form.color(id))
                .ok_or_else(|| SubmitError::InvalidVariationReference {
                    sku: row.sku.trim().to_string(),
                })?;
            Ok(build_variant(form, &product_slug, color, row))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Product {
        id: None,
        name: form.name.trim().to_string(),
        brand: form.brand.trim().to_string(),
        sku: Some(form.sku.trim())
            .filter(|sku| !sku.is_empty())
            .map(str::to_string),
        category: form.category.clone(),
        sub_category: form.sub_category.trim().to_string(),
        highlight_heading: form.highlight_heading.trim().to_string(),
        vendor_id: form.vendor_id.clone(),
        vendor_name: form.vendor_name.clone(),
        publish_status: form.publish_status,
        keywords: split_list(&form.keywords),
        tags: split_list(&form.tags),
        variations,
        warranty_years: parse_count(&form.warranty_years),
        return_policy_days: parse_count(&form.return_policy_days),
    })
}

fn build_variant(
    form: &ProductForm,
    product_slug: &str,
    color: &ColorEntry,
    row: &VariationRow,
) -> Variant {
    let detail = form.detail(color.id);
    Variant {
        id: None,
        color: color.hex.clone(),
        size: row.size.trim().to_string(),
        stock: row.stock,
        sku: row.sku.trim().to_string(),
        slug: slugify(&format!("{product_slug}-{}", color.hex.digits())),
        product_colors: vec![Color::new(color.hex.clone(), color.is_prime)],
        images: detail
            .images
            .iter()
            .filter(|image| image.has_url())
            .cloned()
            .collect(),
        specifications: detail
            .specifications
            .iter()
            .filter(|spec| spec.is_complete())
            .cloned()
            .collect(),
        price: vec![detail.price.money(form.currency)],
        is_active: true,
        in_stock: row.stock > 0,
        description: detail.description.clone(),
        reviews: Vec::new(),
        product_ratings: 0.0,
    }
}
