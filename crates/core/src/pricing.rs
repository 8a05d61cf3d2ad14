//! Selling price derivation.
//!
//! The selling price is always derived from the MRP and the discount
//! percentage, never entered directly:
//!
//! ```text
//! selling = mrp > 0 ? round2(mrp * (1 - clamp(discount, 0, 100) / 100)) : 0
//! ```
//!
//! Inputs may be numbers or raw form strings. Anything that does not read as
//! a number counts as zero, so derivation never fails.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::{CurrencyCode, Money};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// A value that can be read as a monetary or percentage amount.
///
/// Implemented for raw form strings and the numeric types callers hold.
/// Conversion is total: unreadable input is [`Decimal::ZERO`].
pub trait Amount {
    /// Read the value as a decimal amount.
    fn to_amount(&self) -> Decimal;
}

impl Amount for Decimal {
    fn to_amount(&self) -> Decimal {
        *self
    }
}

impl Amount for str {
    fn to_amount(&self) -> Decimal {
        parse_amount(self)
    }
}

impl Amount for String {
    fn to_amount(&self) -> Decimal {
        parse_amount(self)
    }
}

impl Amount for f64 {
    fn to_amount(&self) -> Decimal {
        Decimal::from_f64(*self).unwrap_or(Decimal::ZERO)
    }
}

impl Amount for i64 {
    fn to_amount(&self) -> Decimal {
        Decimal::from(*self)
    }
}

impl Amount for u32 {
    fn to_amount(&self) -> Decimal {
        Decimal::from(*self)
    }
}

impl<T: Amount + ?Sized> Amount for &T {
    fn to_amount(&self) -> Decimal {
        (**self).to_amount()
    }
}

/// Read the leading number of a string.
///
/// Surrounding whitespace is ignored and the longest prefix of the form
/// `[+-]digits[.digits]` is used, so `"12abc"` reads as `12` and `".5"` as
/// `0.5`. Empty or non-numeric input reads as zero.
#[must_use]
pub fn parse_amount(input: &str) -> Decimal {
    let trimmed = input.trim();
    let bytes = trimmed.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        if frac_end > frac_start {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }

    if digits == 0 {
        return Decimal::ZERO;
    }

    trimmed
        .get(..end)
        .and_then(|number| number.strip_prefix('+').unwrap_or(number).parse().ok())
        .unwrap_or(Decimal::ZERO)
}

/// Round to two decimal places, halves away from zero.
#[must_use]
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Clamp a discount percentage to `[0, 100]`.
#[must_use]
pub fn clamp_discount(discount_percent: Decimal) -> Decimal {
    discount_percent.clamp(Decimal::ZERO, HUNDRED)
}

/// Selling price for an already-parsed MRP and discount.
#[must_use]
pub fn selling_price(mrp: Decimal, discount_percent: Decimal) -> Decimal {
    if mrp <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let discount = clamp_discount(discount_percent);
    round2(mrp * (HUNDRED - discount) / HUNDRED)
}

/// Derive a [`Money`] record in the default currency.
///
/// ```
/// use rust_decimal::Decimal;
/// use storeroom_core::pricing::derive_price;
///
/// let money = derive_price("5767", 14_i64);
/// assert_eq!(money.selling_price, Decimal::new(495_962, 2));
/// ```
#[must_use]
pub fn derive_price<M, D>(mrp: M, discount_percent: D) -> Money
where
    M: Amount,
    D: Amount,
{
    derive_price_in(mrp, discount_percent, CurrencyCode::default())
}

/// Derive a [`Money`] record in the given currency.
///
/// The stored discount is the clamped value used in the calculation. Raw user
/// input is kept by the form layer, not here.
#[must_use]
pub fn derive_price_in<M, D>(mrp: M, discount_percent: D, currency: CurrencyCode) -> Money
where
    M: Amount,
    D: Amount,
{
    let mrp = mrp.to_amount();
    let discount = clamp_discount(discount_percent.to_amount());

    Money {
        mrp,
        discount_percent: discount,
        selling_price: selling_price(mrp, discount),
        currency,
    }
}
