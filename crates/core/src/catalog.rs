//! Static catalog data.
//!
//! Catalog documents are lists of products in the backend's JSON shape. They
//! are normalized and validated once, when loaded, so the display layer can
//! rely on their structure:
//!
//! - every product has a name and at least one variation
//! - every variant has exactly one price entry
//! - at most one image per variant is primary
//! - at most one of a variant's colors is prime
//! - `inStock` agrees with `stock`
//!
//! A variant with an empty `productColors` list gets one non-prime entry for
//! its own color. Hex colors are checked while parsing.

use std::fmt;

use thiserror::Error;

use crate::primary::flagged_count;
use crate::types::{Color, Product, ProductId, Variant, slugify};

const SAMPLE_CATALOG: &str = include_str!("../data/sample_catalog.json");

/// What is wrong with a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogIssue {
    MissingName,
    NoVariations,
    PriceCount(usize),
    PrimaryImages(usize),
    PrimeColors(usize),
    StockMismatch { stock: u32, in_stock: bool },
}

impl fmt::Display for CatalogIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingName => f.write_str("product has no name"),
            Self::NoVariations => f.write_str("product has no variations"),
            Self::PriceCount(n) => write!(f, "expected exactly one price entry, found {n}"),
            Self::PrimaryImages(n) => write!(f, "at most one primary image allowed, found {n}"),
            Self::PrimeColors(n) => write!(f, "at most one prime color allowed, found {n}"),
            Self::StockMismatch { stock, in_stock } => {
                write!(f, "inStock is {in_stock} but stock is {stock}")
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("product {product}{}: {issue}", variant_label(.variant))]
    InvalidProduct {
        product: String,
        variant: Option<usize>,
        issue: CatalogIssue,
    },
}

#[allow(clippy::ref_option)]
fn variant_label(variant: &Option<usize>) -> String {
    variant.map_or_else(String::new, |index| format!(" variant {index}"))
}

/// A validated list of products.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Parse and validate a JSON catalog document.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] for malformed JSON (including invalid
    /// hex colors) and [`CatalogError::InvalidProduct`] for the first product
    /// that breaks a catalog rule.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::from_products(products)
    }

    /// Normalize and validate already-parsed products.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidProduct`] for the first product that
    /// breaks a catalog rule.
    pub fn from_products(products: Vec<Product>) -> Result<Self, CatalogError> {
        let products = products
            .into_iter()
            .enumerate()
            .map(|(index, product)| normalize_product(index, product))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { products })
    }

    /// The bundled two-product sample catalog.
    ///
    /// # Errors
    ///
    /// Fails only if the bundled document is broken.
    pub fn sample() -> Result<Self, CatalogError> {
        Self::from_json(SAMPLE_CATALOG)
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Product> {
        self.products.get(index)
    }

    #[must_use]
    pub fn find_by_id(&self, id: &ProductId) -> Option<&Product> {
        self.products
            .iter()
            .find(|product| product.id.as_ref() == Some(id))
    }

    /// Find a product by its own slug or one of its variants' slugs.
    #[must_use]
    pub fn find_by_slug(&self, slug: &str) -> Option<&Product> {
        self.products.iter().find(|product| {
            slugify(&product.name) == slug
                || product.variations.iter().any(|variant| variant.slug == slug)
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    #[must_use]
    pub fn into_products(self) -> Vec<Product> {
        self.products
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}

fn product_label(index: usize, product: &Product) -> String {
    if let Some(id) = &product.id {
        format!("{id}")
    } else if product.name.trim().is_empty() {
        format!("#{index}")
    } else {
        format!("'{}'", product.name)
    }
}

fn normalize_product(index: usize, mut product: Product) -> Result<Product, CatalogError> {
    let label = product_label(index, &product);
    let invalid = |variant, issue| CatalogError::InvalidProduct {
        product: label.clone(),
        variant,
        issue,
    };

    if product.name.trim().is_empty() {
        return Err(invalid(None, CatalogIssue::MissingName));
    }
    if product.variations.is_empty() {
        return Err(invalid(None, CatalogIssue::NoVariations));
    }

    for (position, variant) in product.variations.iter_mut().enumerate() {
        fill_product_colors(variant);
        check_variant(variant).map_err(|issue| invalid(Some(position), issue))?;
    }
    Ok(product)
}

fn fill_product_colors(variant: &mut Variant) {
    if variant.product_colors.is_empty() {
        variant
            .product_colors
            .push(Color::new(variant.color.clone(), false));
    }
}

fn check_variant(variant: &Variant) -> Result<(), CatalogIssue> {
    if variant.price.len() != 1 {
        return Err(CatalogIssue::PriceCount(variant.price.len()));
    }
    let primary = flagged_count(&variant.images);
    if primary > 1 {
        return Err(CatalogIssue::PrimaryImages(primary));
    }
    let prime = flagged_count(&variant.product_colors);
    if prime > 1 {
        return Err(CatalogIssue::PrimeColors(prime));
    }
    if variant.in_stock != (variant.stock > 0) {
        return Err(CatalogIssue::StockMismatch {
            stock: variant.stock,
            in_stock: variant.in_stock,
        });
    }
    Ok(())
}
