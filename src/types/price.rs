//! Fixed-point price utilities.
//!
//! ## Overview
//!
//! Prices are stored as u64 scaled by 10^8 so that every order carries an
//! exact value. Callers hand prices in as `rust_decimal::Decimal`; they are
//! converted once at submission and converted back for display.
//!
//! ## Unit Price
//!
//! The ranking key of an order is `price / quantity`. For display it is a
//! `Decimal` (see [`unit_price`]). For ranking, [`compare_unit_prices`]
//! cross-multiplies in u128 so no rounding ever enters a priority decision.
//!
//! ## Examples
//!
//! ```
//! use rust_decimal::Decimal;
//! use unit_book::types::price::{decimal_to_fixed, fixed_to_decimal};
//!
//! let price = decimal_to_fixed(Decimal::new(2300, 2)).unwrap();
//! assert_eq!(price, 2_300_000_000);
//! assert_eq!(fixed_to_decimal(price).normalize(), Decimal::from(23));
//!
//! // A ninth decimal place has no fixed-point representation
//! assert_eq!(decimal_to_fixed(Decimal::new(1_000_000_004, 9)), None);
//! ```

use std::cmp::Ordering;

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Scaling factor for fixed-point prices: 10^8
pub const SCALE: u64 = 100_000_000;

/// Number of decimal places carried by a fixed-point price
pub const DECIMALS: u32 = 8;

// ============================================================================
// Conversion Functions
// ============================================================================

/// Convert a Decimal to fixed-point u64
///
/// The conversion is exact; nothing is rounded.
///
/// # Returns
///
/// * `Some(u64)` - The fixed-point representation
/// * `None` - If value is negative, out of range, or carries more than
///   [`DECIMALS`] significant decimal places
pub fn decimal_to_fixed(d: Decimal) -> Option<u64> {
    if d.is_sign_negative() || d.normalize().scale() > DECIMALS {
        return None;
    }

    let scaled = d.checked_mul(Decimal::from(SCALE))?;
    scaled.to_u64()
}

/// Convert fixed-point u64 to a Decimal (exact)
pub fn fixed_to_decimal(value: u64) -> Decimal {
    Decimal::from_i128_with_scale(i128::from(value), DECIMALS)
}

// ============================================================================
// Unit Price
// ============================================================================

/// Price per unit of quantity, as a Decimal.
///
/// `quantity` must be non-zero; orders guarantee this at construction.
///
/// # Example
///
/// ```
/// use unit_book::types::price::unit_price;
/// use rust_decimal::Decimal;
///
/// let price = 2_000_000_000; // 20.00
/// assert_eq!(unit_price(price, 100), Decimal::new(2, 1)); // 0.2
/// ```
pub fn unit_price(price: u64, quantity: u64) -> Decimal {
    debug_assert!(quantity > 0, "unit price of an empty quantity");
    fixed_to_decimal(price) / Decimal::from(quantity)
}

/// Exact ordering of `a_price / a_quantity` against `b_price / b_quantity`.
///
/// Both quantities are positive, so comparing the cross products
/// `a_price * b_quantity` and `b_price * a_quantity` preserves the order of
/// the ratios. The products fit in u128 for any pair of u64 inputs.
#[inline]
pub fn compare_unit_prices(a_price: u64, a_quantity: u64, b_price: u64, b_quantity: u64) -> Ordering {
    let lhs = u128::from(a_price) * u128::from(b_quantity);
    let rhs = u128::from(b_price) * u128::from(a_quantity);
    lhs.cmp(&rhs)
}

// ============================================================================
// Unit Tests
// ============================================================================
