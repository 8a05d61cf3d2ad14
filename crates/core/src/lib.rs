//! Storeroom Core - catalog pricing, selection and product-form engine.
//!
//! This crate provides the domain types and pure logic shared by every
//! Storeroom component:
//! - `admin` - Product API client and submission flow
//! - `cli` - Command-line tools for pricing, catalog inspection and submission
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no logging. Every operation takes its full input and returns a
//! new value, which keeps it usable from any host.
//!
//! # Modules
//!
//! - [`types`] - Money, colors, images, variants, products and IDs
//! - [`pricing`] - Selling price derivation from MRP and discount
//! - [`primary`] - "At most one primary" maintenance over sibling collections
//! - [`display`] - Variant and image resolution for list and detail views
//! - [`form`] - Product form state, field-group updates and submission gate
//! - [`catalog`] - Validated static catalog data
//! - [`reference`] - Vendor directory and category list

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod display;
pub mod form;
pub mod pricing;
pub mod primary;
pub mod reference;
pub mod types;

pub use types::*;
