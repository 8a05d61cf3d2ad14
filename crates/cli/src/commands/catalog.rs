//! Catalog inspection commands.
//!
//! # Usage
//!
//! ```bash
//! # Validate the bundled sample catalog
//! sr-cli catalog validate
//!
//! # List products in a catalog file with their display variant
//! sr-cli catalog list catalog.yaml
//!
//! # Walk the detail view: product 1, third variant, second image
//! sr-cli catalog show --product 1 --variant 2 --image 1
//! ```
//!
//! Commands read the bundled sample catalog when no file is given.

use std::io::Write;
use std::path::Path;

use storeroom_core::catalog::Catalog;
use storeroom_core::display::{
    DetailSelection, average_rating, resolve_display_image, resolve_display_variant,
};
use storeroom_core::{Image, Product, ProductId, Variant};

use super::{CommandError, load_document};

/// Load a catalog file, or the bundled sample when `path` is `None`.
///
/// # Errors
///
/// Returns error if the file cannot be read or parsed, or a product breaks a
/// catalog rule.
pub fn load(path: Option<&Path>) -> Result<Catalog, CommandError> {
    let catalog = match path {
        Some(path) => {
            let products: Vec<Product> = load_document(path)?;
            Catalog::from_products(products)?
        }
        None => Catalog::sample()?,
    };
    tracing::debug!(products = catalog.len(), "Catalog loaded");
    Ok(catalog)
}

/// Validate a catalog and report its size.
///
/// # Errors
///
/// Returns error if the catalog fails to load or validate.
pub fn validate(path: Option<&Path>, out: &mut impl Write) -> Result<(), CommandError> {
    let catalog = load(path)?;
    let variants: usize = catalog.iter().map(|p| p.variations.len()).sum();
    writeln!(
        out,
        "Catalog OK: {} products, {variants} variants",
        catalog.len()
    )?;
    Ok(())
}

/// List products with the variant, image and price a listing would show.
///
/// # Errors
///
/// Returns error if the catalog fails to load or a product has no variants.
pub fn list(path: Option<&Path>, out: &mut impl Write) -> Result<(), CommandError> {
    let catalog = load(path)?;
    let placeholder = Image::placeholder();

    for (index, product) in catalog.iter().enumerate() {
        let variant = resolve_display_variant(product)?;
        let image = resolve_display_image(&variant.images, &placeholder);

        writeln!(out, "[{index}] {} ({})", product.name, product.publish_status)?;
        writeln!(
            out,
            "    {} {} | {} | {}",
            variant.color,
            variant.size,
            price_label(variant),
            variant.stock_label()
        )?;
        writeln!(out, "    {}", image.display_url())?;
    }
    Ok(())
}

/// Walk the detail view's selection state for one product.
///
/// `product` is a catalog index, a product id, or a slug. The selection
/// starts at the display variant; `variant` then `image` are applied in
/// that order.
///
/// # Errors
///
/// Returns error if the product is unknown or an index is out of range.
pub fn show(
    path: Option<&Path>,
    product: &str,
    variant: Option<usize>,
    image: Option<usize>,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let catalog = load(path)?;
    let product = find_product(&catalog, product)?;

    let mut selection = DetailSelection::new(product)?;
    if let Some(index) = variant {
        selection = selection.select_variant(product, index)?;
    }
    if let Some(index) = image {
        selection = selection.select_image(product, index)?;
    }

    write_detail(product, selection, out)
}

fn find_product<'a>(catalog: &'a Catalog, key: &str) -> Result<&'a Product, CommandError> {
    let key = key.trim();
    let found = key
        .parse::<usize>()
        .ok()
        .and_then(|index| catalog.get(index))
        .or_else(|| catalog.find_by_id(&ProductId::new(key)))
        .or_else(|| catalog.find_by_slug(key));

    found.ok_or_else(|| CommandError::InvalidArgument(format!("no product matches '{key}'")))
}

fn price_label(variant: &Variant) -> String {
    variant
        .price()
        .map_or_else(|| "no price".to_string(), ToString::to_string)
}

fn write_detail(
    product: &Product,
    selection: DetailSelection,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let placeholder = Image::placeholder();
    let variant = selection.variant(product)?;
    let image = selection.image(product, &placeholder)?;

    writeln!(out, "{}", product.name)?;
    if !product.brand.is_empty() {
        writeln!(out, "by {}", product.brand)?;
    }
    if !product.highlight_heading.is_empty() {
        writeln!(out, "{}", product.highlight_heading)?;
    }
    writeln!(out)?;

    writeln!(out, "Price:  {}", price_label(variant))?;
    writeln!(out, "Stock:  {}", variant.stock_label())?;
    writeln!(out, "SKU:    {}", variant.sku)?;
    writeln!(
        out,
        "Rating: {:.1} ({} reviews)",
        average_rating(&variant.reviews),
        variant.reviews.len()
    )?;
    writeln!(
        out,
        "Image:  {} ({})",
        image.display_url(),
        image.display_alt(&product.name)
    )?;

    writeln!(out, "\nVariants:")?;
    for (index, candidate) in product.variations.iter().enumerate() {
        let marker = marker(index == selection.selected_variant_index());
        let prime = if candidate.has_prime_color() {
            " (prime)"
        } else {
            ""
        };
        writeln!(
            out,
            "  {marker} [{index}] {} {}{prime}",
            candidate.color, candidate.size
        )?;
    }

    if !variant.images.is_empty() {
        writeln!(out, "\nThumbnails:")?;
        for (index, thumb) in variant.images.iter().enumerate() {
            let marker = marker(index == selection.current_image_index());
            writeln!(out, "  {marker} [{index}] {}", thumb.display_url())?;
        }
    }

    let specs: Vec<_> = variant
        .specifications
        .iter()
        .filter(|spec| spec.is_complete())
        .collect();
    if !specs.is_empty() {
        writeln!(out, "\nSpecifications:")?;
        for spec in specs {
            writeln!(out, "  {}: {}", spec.key, spec.value)?;
        }
    }

    let description = &variant.description;
    for (heading, text) in [
        ("Story", &description.story),
        ("Details", &description.details),
        ("Style note", &description.style_note),
    ] {
        if !text.trim().is_empty() {
            writeln!(out, "\n{heading}:\n  {}", text.trim())?;
        }
    }

    Ok(())
}

const fn marker(selected: bool) -> char {
    if selected { '>' } else { ' ' }
}
