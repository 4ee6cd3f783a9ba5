//! Order types for the unit-price order book.
//!
//! ## Priority
//!
//! An order's ranking key is its unit price (`price / quantity`). A buy
//! ranks higher the more it pays per unit; a sell ranks higher the less it
//! asks per unit. Equal unit prices never outrank each other, which leaves
//! arrival order to break ties.
//!
//! ## Fixed-Point Representation
//!
//! Prices are stored as u64 scaled by 10^8 (see [`crate::types::price`]).

use std::cmp::Ordering;
use std::fmt;

use rust_decimal::Decimal;

use crate::types::price;
use crate::types::OrderView;

// ============================================================================
// Side enum
// ============================================================================

/// Order side: Buy or Sell
///
/// Represented as u8 in SSZ records:
/// - Buy = 0
/// - Sell = 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    /// Buy order (bid), best when paying the highest unit price
    #[default]
    Buy,
    /// Sell order (ask), best when asking the lowest unit price
    Sell,
}

impl Side {
    /// Convert to u8 for serialization
    pub fn to_u8(self) -> u8 {
        match self {
            Side::Buy => 0,
            Side::Sell => 1,
        }
    }

    /// Convert from u8 for deserialization
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Side::Buy),
            1 => Some(Side::Sell),
            _ => None,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => f.write_str("Buy"),
            Side::Sell => f.write_str("Sell"),
        }
    }
}

// ============================================================================
// Status enum
// ============================================================================

/// Lifecycle flag of an order.
///
/// `Active` -> `Removed` is the only transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Status {
    #[default]
    Active,
    Removed,
}

impl Status {
    /// Convert to u8 for serialization
    pub fn to_u8(self) -> u8 {
        match self {
            Status::Active => 0,
            Status::Removed => 1,
        }
    }

    /// Convert from u8 for deserialization
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Status::Active),
            1 => Some(Status::Removed),
            _ => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Active => f.write_str("Active"),
            Status::Removed => f.write_str("Removed"),
        }
    }
}

// ============================================================================
// Order struct
// ============================================================================

/// A resting order.
///
/// Orders are created by [`crate::OrderBook::submit`], which validates that
/// price and quantity are positive. Identity, side, price and quantity are
/// fixed for the life of the order; only the status changes.
///
/// ## Example
///
/// ```
/// use rust_decimal::Decimal;
/// use unit_book::types::{Order, Side};
///
/// // 23.00 for 50 units
/// let order = Order::new(3, Side::Buy, 2_300_000_000, 50);
/// assert_eq!(order.unit_price(), Decimal::new(46, 2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    id: u64,
    side: Side,
    /// Price in fixed-point (scaled by 10^8)
    price: u64,
    quantity: u64,
    status: Status,
}

impl Order {
    /// Create a new Active order
    ///
    /// # Arguments
    ///
    /// * `id` - Unique order identifier
    /// * `side` - Buy or Sell
    /// * `price` - Price in fixed-point (scaled by 10^8), positive
    /// * `quantity` - Unit count, positive
    pub fn new(id: u64, side: Side, price: u64, quantity: u64) -> Self {
        debug_assert!(price > 0 && quantity > 0, "order must have positive price and quantity");
        Self {
            id,
            side,
            price,
            quantity,
            status: Status::Active,
        }
    }

    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Price in fixed-point (scaled by 10^8)
    #[inline]
    pub fn price(&self) -> u64 {
        self.price
    }

    #[inline]
    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == Status::Active
    }

    /// Price per unit, `price / quantity`
    pub fn unit_price(&self) -> Decimal {
        price::unit_price(self.price, self.quantity)
    }

    /// Mark the order as removed. Calling it again has no further effect.
    pub fn mark_removed(&mut self) {
        self.status = Status::Removed;
    }

    /// Whether this order strictly outranks `other` on their shared side.
    ///
    /// Both orders must be on the same side.
    pub fn is_better_than(&self, other: &Order) -> bool {
        debug_assert_eq!(self.side, other.side, "compared orders across sides");
        let ordering =
            price::compare_unit_prices(self.price, self.quantity, other.price, other.quantity);
        match self.side {
            Side::Buy => ordering == Ordering::Greater,
            Side::Sell => ordering == Ordering::Less,
        }
    }

    /// Read-only snapshot of this order
    pub fn view(&self) -> OrderView {
        OrderView {
            id: self.id,
            side: self.side,
            price: price::fixed_to_decimal(self.price).normalize(),
            quantity: self.quantity,
            unit_price: self.unit_price(),
            status: self.status,
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
