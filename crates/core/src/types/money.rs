//! Type-safe price representation using decimal arithmetic.
//!
//! A [`Money`] record carries the MRP (maximum retail price), the discount
//! applied to it and the selling price derived from both. Use
//! [`crate::pricing::derive_price`] to build one; the fields are public so
//! static catalog data can be loaded as-is.

use core::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
///
/// Amounts are serialized as JSON numbers to match the catalog backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    /// Maximum retail price, in the currency's standard unit.
    #[serde(with = "rust_decimal::serde::float")]
    pub mrp: Decimal,
    /// Discount percentage in `[0, 100]`.
    #[serde(with = "rust_decimal::serde::float")]
    pub discount_percent: Decimal,
    /// Price shown to buyers.
    #[serde(with = "rust_decimal::serde::float")]
    pub selling_price: Decimal,
    /// ISO 4217 currency code.
    #[serde(default)]
    pub currency: CurrencyCode,
}

impl Money {
    /// A zero price in the given currency.
    #[must_use]
    pub const fn zero(currency: CurrencyCode) -> Self {
        Self {
            mrp: Decimal::ZERO,
            discount_percent: Decimal::ZERO,
            selling_price: Decimal::ZERO,
            currency,
        }
    }

    /// Returns `true` if the buyer pays less than the MRP.
    #[must_use]
    pub fn is_discounted(&self) -> bool {
        self.selling_price < self.mrp
    }

    /// Format the selling price for display (e.g., "₹4959.62").
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}{:.2}", self.currency.symbol(), self.selling_price)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (MRP {}{:.2}, {}% off)",
            self.display(),
            self.currency.symbol(),
            self.mrp,
            self.discount_percent.normalize()
        )
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    INR,
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// Currency symbol used when formatting amounts.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::INR => "₹",
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    /// Three-letter ISO code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::INR => "INR",
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CurrencyCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INR" => Ok(Self::INR),
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            "GBP" => Ok(Self::GBP),
            "CAD" => Ok(Self::CAD),
            "AUD" => Ok(Self::AUD),
            _ => Err(format!("unsupported currency: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_money_deserializes_numbers() {
        let money: Money = serde_json::from_str(
            r#"{"mrp": 5767, "sellingPrice": 4959.62, "discountPercent": 14, "currency": "INR"}"#,
        )
        .unwrap();
        assert_eq!(money.mrp, Decimal::new(5767, 0));
        assert_eq!(money.selling_price, Decimal::new(495_962, 2));
        assert_eq!(money.discount_percent, Decimal::new(14, 0));
        assert_eq!(money.currency, CurrencyCode::INR);
    }

    #[test]
    fn test_money_currency_defaults_to_inr() {
        let money: Money =
            serde_json::from_str(r#"{"mrp": 10, "sellingPrice": 10, "discountPercent": 0}"#)
                .unwrap();
        assert_eq!(money.currency, CurrencyCode::INR);
    }

    #[test]
    fn test_money_serializes_numbers() {
        let money = Money {
            mrp: Decimal::new(576, 0),
            discount_percent: Decimal::new(6, 0),
            selling_price: Decimal::new(54_144, 2),
            currency: CurrencyCode::INR,
        };
        let json = serde_json::to_value(&money).unwrap();
        assert_eq!(json["sellingPrice"], serde_json::json!(541.44));
        assert_eq!(json["currency"], "INR");
    }

    #[test]
    fn test_display() {
        let money = Money {
            mrp: Decimal::new(100, 0),
            discount_percent: Decimal::new(10, 0),
            selling_price: Decimal::new(90, 0),
            currency: CurrencyCode::USD,
        };
        assert_eq!(money.display(), "$90.00");
        assert!(money.is_discounted());
    }

    #[test]
    fn test_currency_from_str() {
        assert_eq!("usd".parse::<CurrencyCode>().unwrap(), CurrencyCode::USD);
        assert!("XYZ".parse::<CurrencyCode>().is_err());
    }
}
