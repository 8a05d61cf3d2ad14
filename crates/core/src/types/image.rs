//! Variant images.

use serde::{Deserialize, Serialize};

use crate::primary::Flagged;

/// Image shown when a variant has no usable image.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://placehold.co/600x600/1f2937/ffffff?text=No+Image";

/// URLs this short or shorter are treated as unusable when rendering.
const MIN_RENDERABLE_URL_LEN: usize = 5;

/// An image belonging to one variant.
///
/// `is_primary` is the form-level "main image" flag kept unique by
/// [`crate::primary`]. `is_prime_image` is an independent, higher-priority
/// display flag that the form never touches.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub url: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default)]
    pub is_primary: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_prime_image: bool,
}

impl Image {
    /// Create an image with the given URL and alt text.
    #[must_use]
    pub fn new(url: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            alt: alt.into(),
            is_primary: false,
            is_prime_image: false,
        }
    }

    /// An empty form row, optionally marked primary.
    #[must_use]
    pub fn blank(is_primary: bool) -> Self {
        Self {
            is_primary,
            ..Self::default()
        }
    }

    /// The placeholder descriptor used by the display resolver.
    #[must_use]
    pub fn placeholder() -> Self {
        Self::new(PLACEHOLDER_IMAGE_URL, "Placeholder Image")
    }

    /// Mark this image as primary.
    #[must_use]
    pub const fn primary(mut self) -> Self {
        self.is_primary = true;
        self
    }

    /// Mark this image as the prime image.
    #[must_use]
    pub const fn prime(mut self) -> Self {
        self.is_prime_image = true;
        self
    }

    /// Returns `true` if the URL has been filled in.
    #[must_use]
    pub fn has_url(&self) -> bool {
        !self.url.trim().is_empty()
    }

    /// URL to render, falling back to the placeholder for unusable URLs.
    #[must_use]
    pub fn display_url(&self) -> &str {
        if self.url.len() > MIN_RENDERABLE_URL_LEN {
            &self.url
        } else {
            PLACEHOLDER_IMAGE_URL
        }
    }

    /// Alt text to render, falling back to the given label.
    #[must_use]
    pub fn display_alt<'a>(&'a self, fallback: &'a str) -> &'a str {
        if self.alt.is_empty() {
            fallback
        } else {
            &self.alt
        }
    }
}

impl Flagged for Image {
    fn is_flagged(&self) -> bool {
        self.is_primary
    }

    fn set_flagged(&mut self, flagged: bool) {
        self.is_primary = flagged;
    }
}
