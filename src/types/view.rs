//! Read-only order snapshots handed to callers.

use std::fmt;

use rust_decimal::Decimal;

use crate::types::{Side, Status};

/// Snapshot of an order at the time of the query.
///
/// Views are plain values: holding one never borrows the book, and later
/// mutations of the book do not change it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderView {
    pub id: u64,
    pub side: Side,
    /// Price with trailing zeros trimmed
    pub price: Decimal,
    pub quantity: u64,
    /// `price / quantity`
    pub unit_price: Decimal,
    pub status: Status,
}

impl OrderView {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == Status::Active
    }
}

impl fmt::Display for OrderView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Order({}, {}, {}, Price: {}, Quantity: {})",
            self.id, self.side, self.status, self.price, self.quantity
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Order;

    #[test]
    fn test_view_display() {
        let view = Order::new(3, Side::Buy, 2_300_000_000, 50).view();
        assert_eq!(view.to_string(), "Order(3, Buy, Active, Price: 23, Quantity: 50)");
    }

    #[test]
    fn test_view_display_removed_fraction() {
        let mut order = Order::new(9, Side::Sell, 1_250_000_000, 4);
        order.mark_removed();
        assert_eq!(
            order.view().to_string(),
            "Order(9, Sell, Removed, Price: 12.5, Quantity: 4)"
        );
        assert!(!order.view().is_active());
    }
}
