//! Command implementations.
//!
//! Each command writes its report to a caller-supplied writer so it can be
//! exercised without a terminal.

pub mod catalog;
pub mod price;
pub mod product;

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use storeroom_admin::{ApiError, ConfigError};
use storeroom_core::catalog::CatalogError;
use storeroom_core::display::DisplayError;
use thiserror::Error;

/// Errors shared by all commands.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Input file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input file is not valid JSON or YAML for the expected shape.
    #[error("Failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// Catalog failed load-time validation.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Detail selection was given an index the product does not have.
    #[error(transparent)]
    Display(#[from] DisplayError),

    /// Backend settings are invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Backend call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A command-line value was rejected.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The product was not submitted; carries the notice shown to the user.
    #[error("{0}")]
    Rejected(String),

    /// Writing the report failed.
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),

    /// Encoding a JSON report failed.
    #[error("Failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Input document formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Yaml,
}

impl Format {
    fn of(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Read and parse a JSON or YAML document.
///
/// `.yaml` and `.yml` files are parsed as YAML; anything else as JSON.
///
/// # Errors
///
/// Returns [`CommandError::Read`] if the file cannot be read, or
/// [`CommandError::Parse`] if it does not match `T`.
pub fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T, CommandError> {
    let text = std::fs::read_to_string(path).map_err(|source| CommandError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let parsed = match Format::of(path) {
        Format::Json => serde_json::from_str(&text).map_err(|e| e.to_string()),
        Format::Yaml => serde_yaml::from_str(&text).map_err(|e| e.to_string()),
    };

    parsed.map_err(|message| CommandError::Parse {
        path: path.to_path_buf(),
        message,
    })
}
