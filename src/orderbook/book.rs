//! Unit-price order book.
//!
//! ## Architecture
//!
//! - **Slab**: Storage that owns every order ever accepted
//! - **BTreeMap**: Order ID to slab key, iterated in ascending id order
//! - **PrioritySequence**: One best-first sequence of slab keys per side
//!
//! ## Priority Ordering
//!
//! - **Buys**: Highest unit price first
//! - **Sells**: Lowest unit price first
//! - Equal unit prices keep arrival order
//!
//! ## Soft Delete
//!
//! Cancelling marks the order `Removed` and drops it from its side's
//! sequence. The order stays in storage, so it is still reported by
//! [`OrderBook::list_orders`] and slab keys are never reused.
//!
//! ## Example
//!
//! ```
//! use rust_decimal::Decimal;
//! use unit_book::{OrderBook, Side};
//!
//! let mut book = OrderBook::with_capacity(16);
//!
//! let first = book.submit(Side::Buy, Decimal::from(20), 100).unwrap();
//! let second = book.submit(Side::Buy, Decimal::from(23), 50).unwrap();
//! assert_eq!(second.best.id, second.id);
//!
//! book.cancel(second.id).unwrap();
//! assert_eq!(book.best_buy().map(|o| o.id), Some(first.id));
//! ```

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use slab::Slab;
use tracing::{debug, warn};

use crate::error::{AuditError, BookError};
use crate::orderbook::PrioritySequence;
use crate::types::price::{decimal_to_fixed, DECIMALS};
use crate::types::{AuditReceipt, Order, OrderView, Side};

/// Result of a successful [`OrderBook::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// Id assigned to the new order
    pub id: u64,

    /// Best order on the submitted side after insertion
    pub best: OrderView,
}

/// Unit-price priority order book
#[derive(Debug)]
pub struct OrderBook {
    /// Order storage
    /// Key: slab index, Value: Order
    orders: Slab<Order>,

    /// Order ID to slab key mapping
    order_index: BTreeMap<u64, usize>,

    /// Buy sequence (descending unit price)
    buys: PrioritySequence,

    /// Sell sequence (ascending unit price)
    sells: PrioritySequence,

    /// Slab key of the best buy, mirrors `buys.head()`
    best_buy: Option<usize>,

    /// Slab key of the best sell, mirrors `sells.head()`
    best_sell: Option<usize>,

    /// Next order ID
    next_order_id: u64,
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderBook {
    /// Create a new empty book
    pub fn new() -> Self {
        Self::with_slab(Slab::new())
    }

    /// Create a book with pre-allocated order storage
    ///
    /// # Example
    ///
    /// ```
    /// use unit_book::OrderBook;
    ///
    /// let book = OrderBook::with_capacity(1_000);
    /// assert!(book.capacity() >= 1_000);
    /// ```
    pub fn with_capacity(order_capacity: usize) -> Self {
        Self::with_slab(Slab::with_capacity(order_capacity))
    }

    fn with_slab(orders: Slab<Order>) -> Self {
        Self {
            orders,
            order_index: BTreeMap::new(),
            buys: PrioritySequence::new(Side::Buy),
            sells: PrioritySequence::new(Side::Sell),
            best_buy: None,
            best_sell: None,
            next_order_id: 1,
        }
    }

    // ========================================================================
    // Capacity and Size
    // ========================================================================

    /// Get the current storage capacity
    #[inline]
    pub fn capacity(&self) -> usize {
        self.orders.capacity()
    }

    /// Number of orders ever accepted, removed ones included
    #[inline]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Number of active orders across both sides
    #[inline]
    pub fn active_count(&self) -> usize {
        self.buys.len() + self.sells.len()
    }

    /// Number of active orders on one side
    #[inline]
    pub fn depth(&self, side: Side) -> usize {
        self.sequence(side).len()
    }

    /// Id the next accepted order will receive
    #[inline]
    pub fn peek_next_order_id(&self) -> u64 {
        self.next_order_id
    }

    // ========================================================================
    // Order Management
    // ========================================================================

    /// Submit a new order.
    ///
    /// The price is stored exactly as fixed-point with 8 decimal places.
    /// Validation happens before anything changes, and a rejected submission
    /// does not consume an id.
    ///
    /// # Errors
    ///
    /// [`BookError::InvalidOrder`] if the quantity is zero, or the price is
    /// not positive, has more than 8 decimal places, or exceeds the
    /// fixed-point range.
    pub fn submit(&mut self, side: Side, price: Decimal, quantity: u64) -> Result<Submission, BookError> {
        let fixed_price = match validate(price, quantity) {
            Ok(fixed_price) => fixed_price,
            Err(err) => {
                warn!(%side, %price, quantity, error = %err, "rejected order submission");
                return Err(err);
            }
        };

        let id = self.next_order_id;
        self.next_order_id += 1;

        let order = Order::new(id, side, fixed_price, quantity);
        let key = self.orders.insert(order);
        self.order_index.insert(id, key);

        let position = {
            let (orders, sequence) = match side {
                Side::Buy => (&self.orders, &mut self.buys),
                Side::Sell => (&self.orders, &mut self.sells),
            };
            sequence.insert(key, &orders[key], orders)
        };
        self.refresh_best(side);

        // The sequence now holds at least this order, so a best always exists.
        let best = self
            .best_view(side)
            .unwrap_or_else(|| self.orders[key].view());

        debug!(
            order_id = id,
            %side,
            unit_price = %self.orders[key].unit_price(),
            position,
            best_id = best.id,
            "order submitted"
        );

        Ok(Submission { id, best })
    }

    /// Cancel an order by id.
    ///
    /// The order is marked `Removed` and leaves its side's sequence at once.
    /// Cancelling an order that is already removed succeeds without effect.
    ///
    /// # Errors
    ///
    /// [`BookError::OrderNotFound`] if the id was never issued.
    pub fn cancel(&mut self, order_id: u64) -> Result<(), BookError> {
        let Some(&key) = self.order_index.get(&order_id) else {
            warn!(order_id, "cancel for unknown order");
            return Err(BookError::OrderNotFound(order_id));
        };

        let order = &mut self.orders[key];
        if !order.is_active() {
            debug!(order_id, "order already removed");
            return Ok(());
        }
        order.mark_removed();
        let side = order.side();

        self.sequence_mut(side).remove(key);
        self.refresh_best(side);

        debug!(
            order_id,
            %side,
            best_id = ?self.best_view(side).map(|o| o.id),
            "order removed"
        );
        Ok(())
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Best active buy (highest unit price)
    pub fn best_buy(&self) -> Option<OrderView> {
        self.best_view(Side::Buy)
    }

    /// Best active sell (lowest unit price)
    pub fn best_sell(&self) -> Option<OrderView> {
        self.best_view(Side::Sell)
    }

    /// Best active order on `side`
    pub fn best_view(&self, side: Side) -> Option<OrderView> {
        let key = match side {
            Side::Buy => self.best_buy,
            Side::Sell => self.best_sell,
        }?;
        self.orders.get(key).map(Order::view)
    }

    /// Every order ever accepted, removed ones included, ascending id
    pub fn list_orders(&self) -> Vec<OrderView> {
        self.history().map(Order::view).collect()
    }

    /// Active orders on `side`, best first
    pub fn side_orders(&self, side: Side) -> Vec<OrderView> {
        self.sequence(side)
            .keys()
            .iter()
            .filter_map(|&key| self.orders.get(key))
            .map(Order::view)
            .collect()
    }

    /// Look up one order by id
    pub fn get(&self, order_id: u64) -> Option<OrderView> {
        let key = *self.order_index.get(&order_id)?;
        self.orders.get(key).map(Order::view)
    }

    /// Counts and history root over the full order history
    pub fn audit_receipt(&self) -> Result<AuditReceipt, AuditError> {
        AuditReceipt::from_history(self.history())
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn history(&self) -> impl Iterator<Item = &Order> + '_ {
        self.order_index
            .values()
            .filter_map(move |&key| self.orders.get(key))
    }

    fn sequence(&self, side: Side) -> &PrioritySequence {
        match side {
            Side::Buy => &self.buys,
            Side::Sell => &self.sells,
        }
    }

    fn sequence_mut(&mut self, side: Side) -> &mut PrioritySequence {
        match side {
            Side::Buy => &mut self.buys,
            Side::Sell => &mut self.sells,
        }
    }

    /// Point the side's cached best at its sequence head
    fn refresh_best(&mut self, side: Side) {
        match side {
            Side::Buy => self.best_buy = self.buys.head(),
            Side::Sell => self.best_sell = self.sells.head(),
        }
    }
}

/// Check price and quantity, returning the fixed-point price
fn validate(price: Decimal, quantity: u64) -> Result<u64, BookError> {
    if quantity == 0 {
        return Err(BookError::invalid("quantity must be positive"));
    }
    if price <= Decimal::ZERO {
        return Err(BookError::invalid("price must be positive"));
    }
    if price.normalize().scale() > DECIMALS {
        return Err(BookError::invalid("price has more than 8 decimal places"));
    }
    decimal_to_fixed(price).ok_or_else(|| BookError::invalid("price exceeds the supported range"))
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Status;

    fn dec(s: &str) -> Decimal {
        s.parse().expect("valid decimal")
    }

    #[test]
    fn test_book_new() {
        let book = OrderBook::new();

        assert!(book.is_empty());
        assert_eq!(book.len(), 0);
        assert_eq!(book.active_count(), 0);
        assert!(book.best_buy().is_none());
        assert!(book.best_sell().is_none());
        assert_eq!(book.peek_next_order_id(), 1);
    }

    #[test]
    fn test_book_with_capacity() {
        let book = OrderBook::with_capacity(10_000);

        assert!(book.capacity() >= 10_000);
        assert!(book.is_empty());
    }

    #[test]
    fn test_submit_buy_order() {
        let mut book = OrderBook::with_capacity(100);

        let submitted = book.submit(Side::Buy, dec("20.00"), 100).unwrap();

        assert_eq!(submitted.id, 1);
        assert_eq!(submitted.best.id, 1);
        assert_eq!(submitted.best.unit_price, dec("0.2"));
        assert_eq!(book.depth(Side::Buy), 1);
        assert_eq!(book.depth(Side::Sell), 0);
        assert!(book.best_sell().is_none());
    }

    #[test]
    fn test_submit_returns_side_best_not_new_order() {
        let mut book = OrderBook::with_capacity(100);

        book.submit(Side::Sell, dec("25.00"), 200).unwrap(); // 0.125
        let submitted = book.submit(Side::Sell, dec("28.00"), 100).unwrap(); // 0.28

        assert_eq!(submitted.id, 2);
        assert_eq!(submitted.best.id, 1);
    }

    #[test]
    fn test_buy_priority() {
        let mut book = OrderBook::with_capacity(100);

        book.submit(Side::Buy, dec("49"), 1).unwrap();
        book.submit(Side::Buy, dec("51"), 1).unwrap();
        book.submit(Side::Buy, dec("50"), 1).unwrap();

        let ids: Vec<u64> = book.side_orders(Side::Buy).iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
        assert_eq!(book.best_buy().map(|o| o.id), Some(2));
    }

    #[test]
    fn test_sell_priority() {
        let mut book = OrderBook::with_capacity(100);

        book.submit(Side::Sell, dec("52"), 1).unwrap();
        book.submit(Side::Sell, dec("50"), 1).unwrap();
        book.submit(Side::Sell, dec("51"), 1).unwrap();

        let ids: Vec<u64> = book.side_orders(Side::Sell).iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
        assert_eq!(book.best_sell().map(|o| o.id), Some(2));
    }

    #[test]
    fn test_equal_unit_price_keeps_arrival_order() {
        let mut book = OrderBook::with_capacity(100);

        book.submit(Side::Buy, dec("10"), 10).unwrap();
        book.submit(Side::Buy, dec("20"), 20).unwrap();

        let ids: Vec<u64> = book.side_orders(Side::Buy).iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(book.best_buy().map(|o| o.id), Some(1));
    }

    #[test]
    fn test_cancel_promotes_next_best() {
        let mut book = OrderBook::with_capacity(100);

        book.submit(Side::Buy, dec("20"), 100).unwrap(); // 0.2
        book.submit(Side::Buy, dec("23"), 50).unwrap(); // 0.46

        book.cancel(2).unwrap();

        assert_eq!(book.best_buy().map(|o| o.id), Some(1));
        assert_eq!(book.depth(Side::Buy), 1);
        assert_eq!(book.get(2).map(|o| o.status), Some(Status::Removed));
    }

    #[test]
    fn test_cancel_last_order_empties_side() {
        let mut book = OrderBook::with_capacity(100);

        book.submit(Side::Sell, dec("5"), 1).unwrap();
        book.cancel(1).unwrap();

        assert!(book.best_sell().is_none());
        assert_eq!(book.active_count(), 0);
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn test_cancel_twice_is_noop() {
        let mut book = OrderBook::with_capacity(100);

        book.submit(Side::Buy, dec("20"), 100).unwrap();
        book.submit(Side::Buy, dec("10"), 100).unwrap();
        book.cancel(1).unwrap();
        let before = book.list_orders();

        assert_eq!(book.cancel(1), Ok(()));
        assert_eq!(book.list_orders(), before);
        assert_eq!(book.best_buy().map(|o| o.id), Some(2));
    }

    #[test]
    fn test_cancel_nonexistent() {
        let mut book = OrderBook::with_capacity(100);
        book.submit(Side::Buy, dec("20"), 100).unwrap();
        let before = book.list_orders();

        assert_eq!(book.cancel(999), Err(BookError::OrderNotFound(999)));
        assert_eq!(book.list_orders(), before);
    }

    #[test]
    fn test_invalid_orders_do_not_consume_ids() {
        let mut book = OrderBook::with_capacity(100);

        assert!(matches!(
            book.submit(Side::Buy, dec("0"), 10),
            Err(BookError::InvalidOrder { .. })
        ));
        assert!(matches!(
            book.submit(Side::Buy, dec("-5"), 10),
            Err(BookError::InvalidOrder { .. })
        ));
        assert!(matches!(
            book.submit(Side::Sell, dec("5"), 0),
            Err(BookError::InvalidOrder { .. })
        ));
        assert!(matches!(
            book.submit(Side::Sell, dec("0.000000001"), 1),
            Err(BookError::InvalidOrder { .. })
        ));

        assert!(book.is_empty());
        assert_eq!(book.peek_next_order_id(), 1);

        let submitted = book.submit(Side::Buy, dec("1"), 1).unwrap();
        assert_eq!(submitted.id, 1);
    }

    #[test]
    fn test_extra_decimal_places_are_rejected() {
        let mut book = OrderBook::with_capacity(100);

        let result = book.submit(Side::Buy, dec("1.000000004"), 1);
        assert_eq!(
            result,
            Err(BookError::InvalidOrder {
                reason: "price has more than 8 decimal places".to_string()
            })
        );
        let result = book.submit(Side::Sell, dec("0.000000004"), 1);
        assert!(matches!(result, Err(BookError::InvalidOrder { .. })));

        assert!(book.is_empty());
        assert_eq!(book.peek_next_order_id(), 1);
    }

    #[test]
    fn test_eight_decimal_places_rank_exactly() {
        let mut book = OrderBook::with_capacity(100);

        book.submit(Side::Buy, dec("1"), 1).unwrap();
        let sub = book.submit(Side::Buy, dec("1.00000001"), 1).unwrap();
        assert_eq!(sub.best.id, 2);

        let stored = book.get(2).unwrap();
        assert_eq!(stored.price, dec("1.00000001"));
        assert_eq!(stored.unit_price, dec("1.00000001"));

        // Trailing zeros beyond the eighth place carry no extra precision
        let sub = book.submit(Side::Sell, dec("0.0000000100"), 1).unwrap();
        assert_eq!(sub.best.price, dec("0.00000001"));
    }

    #[test]
    fn test_price_out_of_range() {
        let mut book = OrderBook::new();

        let result = book.submit(Side::Buy, Decimal::MAX, 1);
        assert!(matches!(result, Err(BookError::InvalidOrder { .. })));
        assert!(book.is_empty());
    }

    #[test]
    fn test_list_orders_keeps_removed_history() {
        let mut book = OrderBook::with_capacity(100);

        book.submit(Side::Buy, dec("20"), 100).unwrap();
        book.submit(Side::Sell, dec("25"), 200).unwrap();
        book.submit(Side::Buy, dec("23"), 50).unwrap();
        book.cancel(3).unwrap();

        let listed = book.list_orders();
        let ids: Vec<u64> = listed.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(listed[2].status, Status::Removed);
        assert_eq!(listed[0].status, Status::Active);
    }

    #[test]
    fn test_get_order() {
        let mut book = OrderBook::with_capacity(100);
        book.submit(Side::Sell, dec("12.5"), 4).unwrap();

        let view = book.get(1).unwrap();
        assert_eq!(view.price, dec("12.5"));
        assert_eq!(view.quantity, 4);
        assert_eq!(view.side, Side::Sell);

        assert!(book.get(2).is_none());
    }

    #[test]
    fn test_audit_receipt_tracks_book() {
        let mut book = OrderBook::with_capacity(100);
        book.submit(Side::Buy, dec("20"), 100).unwrap();
        book.submit(Side::Sell, dec("25"), 200).unwrap();
        let before = book.audit_receipt().unwrap();

        book.cancel(1).unwrap();
        let after = book.audit_receipt().unwrap();

        assert_eq!(before.orders_recorded, 2);
        assert_eq!(before.active_buys, 1);
        assert_eq!(after.active_buys, 0);
        assert_eq!(after.active_sells, 1);
        assert_ne!(before.history_root, after.history_root);
    }
}
