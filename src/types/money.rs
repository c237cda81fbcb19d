//! Money helpers built on `rust_decimal`.
//!
//! ## Overview
//!
//! Unit prices and order totals are `Decimal` values. Receipts carry totals
//! as integer cents so they encode to a fixed-size SSZ container.
//!
//! ## Scale Factor
//!
//! Cents use a scale factor of 10^2. Conversions round half away from zero.
//!
//! ## Examples
//!
//! ```
//! use catalog_store::types::money::{parse_price, to_cents, from_cents};
//!
//! let price = parse_price("2000.50").unwrap();
//! assert_eq!(to_cents(price), Some(200_050));
//! assert_eq!(from_cents(200_050), price);
//! ```

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Cents per currency unit
pub const CENTS_SCALE: u64 = 100;

/// Parse a non-negative decimal price string.
///
/// Returns `None` for malformed input or a negative value.
///
/// ```
/// use catalog_store::types::money::parse_price;
///
/// assert!(parse_price("1500").is_some());
/// assert!(parse_price("-1").is_none());
/// assert!(parse_price("abc").is_none());
/// ```
pub fn parse_price(s: &str) -> Option<Decimal> {
    let decimal = Decimal::from_str(s.trim()).ok()?;
    if decimal.is_sign_negative() && !decimal.is_zero() {
        return None;
    }
    Some(decimal)
}

/// Compute `unit_price * quantity`, or `None` on overflow.
pub fn line_total(unit_price: Decimal, quantity: u64) -> Option<Decimal> {
    unit_price.checked_mul(Decimal::from(quantity))
}

/// Convert a Decimal amount to integer cents.
///
/// Returns `None` if the value is negative or does not fit in `u64`.
pub fn to_cents(amount: Decimal) -> Option<u64> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return None;
    }

    let scaled = amount.checked_mul(Decimal::from(CENTS_SCALE))?;
    scaled
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
}

/// Convert integer cents back to a Decimal amount
pub fn from_cents(cents: u64) -> Decimal {
    Decimal::from(cents) / Decimal::from(CENTS_SCALE)
}

/// Format an amount with exactly two decimal places
///
/// ```
/// use catalog_store::types::money::format_price;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_price(Decimal::from(4000)), "4000.00");
/// ```
pub fn format_price(amount: Decimal) -> String {
    format!("{:.2}", amount)
}
