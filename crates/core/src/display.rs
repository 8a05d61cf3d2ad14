//! Variant and image resolution for list and detail views.
//!
//! Given a product, pick the one variant and one image to show first:
//!
//! - Variant: the first variant carrying a prime color, else the first variant.
//! - Image: the first prime image, else the first primary image, else the
//!   first image, else a caller-supplied placeholder.
//!
//! Resolution is pure and deterministic. [`DetailSelection`] layers the
//! detail view's two pieces of selection state on top.

use thiserror::Error;

use crate::types::{Image, Product, Review, Variant};

/// Errors from display resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DisplayError {
    /// The product has no variations to show.
    #[error("product has no variations")]
    EmptyVariants,
    /// A variant index outside the product's variations.
    #[error("variant index {index} out of range (product has {len})")]
    VariantOutOfRange { index: usize, len: usize },
    /// An image index outside the selected variant's images.
    #[error("image index {index} out of range (variant has {len})")]
    ImageOutOfRange { index: usize, len: usize },
}

/// Index of the variant to show for a product.
///
/// # Errors
///
/// Returns [`DisplayError::EmptyVariants`] if the product has no variations.
pub fn resolve_display_variant_index(product: &Product) -> Result<usize, DisplayError> {
    if product.variations.is_empty() {
        return Err(DisplayError::EmptyVariants);
    }
    Ok(product
        .variations
        .iter()
        .position(Variant::has_prime_color)
        .unwrap_or(0))
}

/// The variant to show for a product.
///
/// # Errors
///
/// Returns [`DisplayError::EmptyVariants`] if the product has no variations.
pub fn resolve_display_variant(product: &Product) -> Result<&Variant, DisplayError> {
    let index = resolve_display_variant_index(product)?;
    product
        .variations
        .get(index)
        .ok_or(DisplayError::EmptyVariants)
}

/// The image to show from a variant's images.
///
/// Priority: first `is_prime_image`, then first `is_primary`, then the first
/// image, then `placeholder`.
#[must_use]
pub fn resolve_display_image<'a>(images: &'a [Image], placeholder: &'a Image) -> &'a Image {
    images
        .iter()
        .find(|image| image.is_prime_image)
        .or_else(|| images.iter().find(|image| image.is_primary))
        .or_else(|| images.first())
        .unwrap_or(placeholder)
}

/// Index of the image [`resolve_display_image`] picks, matched by URL.
///
/// Returns `0` for an empty list or when no image matches.
#[must_use]
pub fn resolve_display_image_index(images: &[Image]) -> usize {
    let placeholder = Image::placeholder();
    let best = resolve_display_image(images, &placeholder);
    images
        .iter()
        .position(|image| image.url == best.url)
        .unwrap_or(0)
}

/// Average review rating rounded to one decimal place; `0.0` with no reviews.
#[must_use]
pub fn average_rating(reviews: &[Review]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }
    let total: f64 = reviews.iter().map(|review| review.rating).sum();
    #[allow(clippy::cast_precision_loss)] // review counts never approach 2^52
    let mean = total / reviews.len() as f64;
    (mean * 10.0).round() / 10.0
}

/// Selection state of the product detail view.
///
/// Holds the selected variant and the image shown for it. Switching variant
/// always resets the image to that variant's best image; picking an image only
/// moves the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailSelection {
    selected_variant: usize,
    current_image: usize,
}

impl DetailSelection {
    /// Initial selection: the display variant and its best image.
    ///
    /// # Errors
    ///
    /// Returns [`DisplayError::EmptyVariants`] if the product has no variations.
    pub fn new(product: &Product) -> Result<Self, DisplayError> {
        let variant = resolve_display_variant_index(product)?;
        let images = product
            .variations
            .get(variant)
            .map_or(&[][..], |v| v.images.as_slice());

        Ok(Self {
            selected_variant: variant,
            current_image: resolve_display_image_index(images),
        })
    }

    /// Index of the selected variant.
    #[must_use]
    pub const fn selected_variant_index(&self) -> usize {
        self.selected_variant
    }

    /// Index of the image being shown.
    #[must_use]
    pub const fn current_image_index(&self) -> usize {
        self.current_image
    }

    /// Select a variant, resetting the image to its best image.
    ///
    /// Selecting the already-selected variant keeps the current image.
    ///
    /// # Errors
    ///
    /// Returns [`DisplayError::VariantOutOfRange`] for an unknown index.
    pub fn select_variant(self, product: &Product, index: usize) -> Result<Self, DisplayError> {
        let variant = product
            .variations
            .get(index)
            .ok_or(DisplayError::VariantOutOfRange {
                index,
                len: product.variations.len(),
            })?;

        if index == self.selected_variant {
            return Ok(self);
        }

        Ok(Self {
            selected_variant: index,
            current_image: resolve_display_image_index(&variant.images),
        })
    }

    /// Select an image of the current variant.
    ///
    /// A variant without images only accepts index `0`, which shows the
    /// placeholder.
    ///
    /// # Errors
    ///
    /// Returns [`DisplayError::VariantOutOfRange`] if the selection no longer
    /// fits the product, or [`DisplayError::ImageOutOfRange`] for an unknown
    /// image index.
    pub fn select_image(self, product: &Product, index: usize) -> Result<Self, DisplayError> {
        let variant = self.variant(product)?;
        let len = variant.images.len();
        if index >= len.max(1) {
            return Err(DisplayError::ImageOutOfRange { index, len });
        }

        Ok(Self {
            current_image: index,
            ..self
        })
    }

    /// The selected variant.
    ///
    /// # Errors
    ///
    /// Returns [`DisplayError::VariantOutOfRange`] if the product has fewer
    /// variations than when the selection was made.
    pub fn variant<'a>(&self, product: &'a Product) -> Result<&'a Variant, DisplayError> {
        product
            .variations
            .get(self.selected_variant)
            .ok_or(DisplayError::VariantOutOfRange {
                index: self.selected_variant,
                len: product.variations.len(),
            })
    }

    /// The image being shown, or `placeholder` when the variant has none.
    ///
    /// # Errors
    ///
    /// Returns [`DisplayError::VariantOutOfRange`] if the selection no longer
    /// fits the product.
    pub fn image<'a>(
        &self,
        product: &'a Product,
        placeholder: &'a Image,
    ) -> Result<&'a Image, DisplayError> {
        let variant = self.variant(product)?;
        Ok(variant.images.get(self.current_image).unwrap_or(placeholder))
    }
}
