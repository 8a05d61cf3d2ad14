//! Price derivation command.
//!
//! # Usage
//!
//! ```bash
//! sr-cli price --mrp 5767 --discount 14
//! sr-cli price --mrp 19.99 --discount 10 --currency USD --json
//! ```

use std::io::Write;

use storeroom_core::CurrencyCode;
use storeroom_core::pricing::derive_price_in;

use super::CommandError;

/// Derive a selling price and write it as text or JSON.
///
/// Inputs are read leniently: `"12abc"` is `12`, blank is `0`, and the
/// discount is clamped to `[0, 100]`.
///
/// # Errors
///
/// Returns error if writing to `out` fails.
pub fn derive(
    mrp: &str,
    discount: &str,
    currency: CurrencyCode,
    json: bool,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let money = derive_price_in(mrp, discount, currency);
    tracing::debug!(%money, "Derived price");

    if json {
        serde_json::to_writer_pretty(&mut *out, &money)?;
        writeln!(out)?;
        return Ok(());
    }

    let symbol = money.currency.symbol();
    writeln!(out, "MRP:           {symbol}{:.2}", money.mrp)?;
    writeln!(out, "Discount:      {}%", money.discount_percent.normalize())?;
    writeln!(out, "Selling price: {}", money.display())?;
    Ok(())
}
