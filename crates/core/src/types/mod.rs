//! Core types for Storeroom.
//!
//! This module provides type-safe wrappers for catalog domain concepts.

pub mod color;
pub mod id;
pub mod image;
pub mod money;
pub mod product;
pub mod slug;
pub mod status;

pub use color::{Color, HexColor, HexColorError};
pub use id::*;
pub use image::{Image, PLACEHOLDER_IMAGE_URL};
pub use money::{CurrencyCode, Money};
pub use product::{Description, Product, Review, Specification, Variant};
pub use slug::{slugify, split_list};
pub use status::PublishStatus;
