//! Storeroom Admin library.
//!
//! Connects the product form engine in `storeroom-core` to the product
//! backend:
//!
//! - [`config`] - Environment-driven settings for the backend connection
//! - [`api`] - The [`api::ProductApi`] seam and its HTTP implementation
//! - [`submission`] - Validate, assemble and create a product
//! - [`telemetry`] - Tracing subscriber setup for binaries
//!
//! # Security
//!
//! Admin calls can carry a bearer token. It is held in a `SecretString`
//! and redacted from every `Debug` output.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod submission;
pub mod telemetry;

pub use api::{ApiError, HttpProductApi, ProductApi};
pub use config::{AdminConfig, CatalogApiConfig, ConfigError};
pub use submission::{SubmissionNotice, SubmissionOutcome, submit_product};
