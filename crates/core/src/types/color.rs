//! Hex color type and the product color record.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::primary::{Flagged, Keyed};

/// Errors that can occur when parsing a [`HexColor`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum HexColorError {
    /// The input string is empty.
    #[error("color cannot be empty")]
    Empty,
    /// The input does not have exactly six hex digits.
    #[error("color must have 6 hex digits (got {len})")]
    InvalidLength {
        /// Number of digits found after the optional `#`.
        len: usize,
    },
    /// The input contains a non-hex character.
    #[error("color contains invalid hex digit '{0}'")]
    InvalidDigit(char),
}

/// A six-digit RGB hex color.
///
/// Parsing is case-insensitive and accepts an optional leading `#`; the
/// stored form is always `#RRGGBB` in upper case.
///
/// ## Examples
///
/// ```
/// use storeroom_core::HexColor;
///
/// let color = HexColor::parse("4f46e5").unwrap();
/// assert_eq!(color.as_str(), "#4F46E5");
///
/// assert!(HexColor::parse("#12345").is_err());
/// assert!(HexColor::parse("#GGGGGG").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    /// Parse a `HexColor` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, does not have exactly six
    /// digits after the optional `#`, or contains a non-hex character.
    pub fn parse(s: &str) -> Result<Self, HexColorError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(HexColorError::Empty);
        }

        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(HexColorError::InvalidDigit(bad));
        }
        if digits.len() != 6 {
            return Err(HexColorError::InvalidLength { len: digits.len() });
        }

        Ok(Self(format!("#{}", digits.to_ascii_uppercase())))
    }

    /// Build a color from its RGB components.
    #[must_use]
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(format!("#{r:02X}{g:02X}{b:02X}"))
    }

    /// White, the color given to newly added form colors.
    #[must_use]
    pub fn white() -> Self {
        Self::from_rgb(0xFF, 0xFF, 0xFF)
    }

    /// Returns the color as `#RRGGBB`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the six digits without the leading `#`.
    #[must_use]
    pub fn digits(&self) -> &str {
        self.0.trim_start_matches('#')
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for HexColor {
    type Err = HexColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for HexColor {
    type Error = HexColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.0
    }
}

impl AsRef<str> for HexColor {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A product color and whether it is the product's prime (featured) color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Color {
    pub hex: HexColor,
    #[serde(default)]
    pub is_prime: bool,
}

impl Color {
    #[must_use]
    pub const fn new(hex: HexColor, is_prime: bool) -> Self {
        Self { hex, is_prime }
    }
}

impl Flagged for Color {
    fn is_flagged(&self) -> bool {
        self.is_prime
    }

    fn set_flagged(&mut self, flagged: bool) {
        self.is_prime = flagged;
    }
}

impl Keyed for Color {
    type Key = HexColor;

    fn key(&self) -> &HexColor {
        &self.hex
    }
}
