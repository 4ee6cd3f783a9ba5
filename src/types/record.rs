//! SSZ order records and the audit receipt over the order history.
//!
//! Every order the book has accepted, removed ones included, is encoded as a
//! fixed-size [`OrderRecord`]. Hashing the records in ascending id order
//! gives a 32-byte history root that changes whenever an order is added or
//! its status flips.

use ssz_rs::prelude::*;
use sha2::{Digest, Sha256};

use crate::error::AuditError;
use crate::types::{Order, Side, Status};

/// Fixed-size SSZ encoding of one order.
///
/// ## SSZ Layout
///
/// 8 (id) + 1 (side) + 8 (price) + 8 (quantity) + 1 (status) = 26 bytes
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct OrderRecord {
    pub id: u64,

    /// 0=Buy, 1=Sell
    pub side_raw: u8,

    /// Price in fixed-point (scaled by 10^8)
    pub price: u64,

    pub quantity: u64,

    /// 0=Active, 1=Removed
    pub status_raw: u8,
}

impl OrderRecord {
    /// Decoded side, `None` for an unknown tag
    pub fn side(&self) -> Option<Side> {
        Side::from_u8(self.side_raw)
    }

    /// Decoded status, `None` for an unknown tag
    pub fn status(&self) -> Option<Status> {
        Status::from_u8(self.status_raw)
    }
}

impl From<&Order> for OrderRecord {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id(),
            side_raw: order.side().to_u8(),
            price: order.price(),
            quantity: order.quantity(),
            status_raw: order.status().to_u8(),
        }
    }
}

/// Summary of the book's history at one point in time.
///
/// ## Example
///
/// ```
/// use rust_decimal::Decimal;
/// use unit_book::{OrderBook, Side};
///
/// let mut book = OrderBook::new();
/// book.submit(Side::Buy, Decimal::from(20), 100).unwrap();
///
/// let receipt = book.audit_receipt().unwrap();
/// assert_eq!(receipt.orders_recorded, 1);
/// assert_eq!(receipt.history_root_hex().len(), 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct AuditReceipt {
    /// Orders ever accepted
    pub orders_recorded: u64,

    /// Active orders on the buy side
    pub active_buys: u64,

    /// Active orders on the sell side
    pub active_sells: u64,

    /// SHA-256 over the SSZ-encoded records, ascending id
    pub history_root: [u8; 32],
}

impl AuditReceipt {
    /// Build a receipt from the full order history.
    ///
    /// `history` must yield orders in ascending id order.
    pub fn from_history<'a, I>(history: I) -> Result<Self, AuditError>
    where
        I: IntoIterator<Item = &'a Order>,
    {
        let mut hasher = Sha256::new();
        let mut receipt = Self::default();

        for order in history {
            let record = OrderRecord::from(order);
            let bytes = ssz_rs::serialize(&record)
                .map_err(|e| AuditError::Encode(format!("{e:?}")))?;
            hasher.update(&bytes);

            receipt.orders_recorded += 1;
            if order.is_active() {
                match order.side() {
                    Side::Buy => receipt.active_buys += 1,
                    Side::Sell => receipt.active_sells += 1,
                }
            }
        }

        receipt.history_root.copy_from_slice(&hasher.finalize());
        Ok(receipt)
    }

    /// Get the history root as a hex string
    pub fn history_root_hex(&self) -> String {
        hex::encode(self.history_root)
    }

    /// Number of orders that are still active on either side
    pub fn active_orders(&self) -> u64 {
        self.active_buys + self.active_sells
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_history() -> Vec<Order> {
        vec![
            Order::new(1, Side::Buy, 2_000_000_000, 100),
            Order::new(2, Side::Sell, 2_500_000_000, 200),
            Order::new(3, Side::Buy, 2_300_000_000, 50),
        ]
    }

    #[test]
    fn test_record_ssz_size() {
        let record = OrderRecord::from(&Order::new(1, Side::Buy, 2_000_000_000, 100));
        let bytes = ssz_rs::serialize(&record).expect("Failed to serialize");

        assert_eq!(bytes.len(), 26, "OrderRecord should serialize to 26 bytes");
    }

    #[test]
    fn test_record_captures_status() {
        let mut order = Order::new(7, Side::Sell, 100_000_000, 1);
        assert_eq!(OrderRecord::from(&order).status_raw, 0);

        order.mark_removed();
        let record = OrderRecord::from(&order);
        assert_eq!(record.status(), Some(Status::Removed));
        assert_eq!(record.side(), Some(Side::Sell));
        assert_eq!(record.id, 7);
    }

    #[test]
    fn test_record_ssz_roundtrip() {
        let record = OrderRecord::from(&Order::new(3, Side::Buy, 2_300_000_000, 50));
        let bytes = ssz_rs::serialize(&record).expect("Failed to serialize");
        let decoded: OrderRecord = ssz_rs::deserialize(&bytes).expect("Failed to deserialize");

        assert_eq!(decoded, record);
        assert_eq!(decoded.side(), Some(Side::Buy));
        assert_eq!(decoded.status(), Some(Status::Active));
    }

    #[test]
    fn test_receipt_counts() {
        let mut history = sample_history();
        history[2].mark_removed();

        let receipt = AuditReceipt::from_history(&history).expect("receipt");
        assert_eq!(receipt.orders_recorded, 3);
        assert_eq!(receipt.active_buys, 1);
        assert_eq!(receipt.active_sells, 1);
        assert_eq!(receipt.active_orders(), 2);
    }

    #[test]
    fn test_receipt_root_determinism() {
        let history = sample_history();

        let a = AuditReceipt::from_history(&history).expect("receipt");
        let b = AuditReceipt::from_history(&history).expect("receipt");
        assert_eq!(a.history_root, b.history_root);
    }

    #[test]
    fn test_receipt_root_tracks_status() {
        let mut history = sample_history();
        let before = AuditReceipt::from_history(&history).expect("receipt");

        history[0].mark_removed();
        let after = AuditReceipt::from_history(&history).expect("receipt");

        assert_ne!(before.history_root, after.history_root);
    }

    #[test]
    fn test_empty_history_root() {
        let receipt = AuditReceipt::from_history(std::iter::empty()).expect("receipt");

        // SHA-256 of the empty string
        assert_eq!(
            receipt.history_root_hex(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(receipt.orders_recorded, 0);
    }

    #[test]
    fn test_receipt_ssz_size() {
        let bytes = ssz_rs::serialize(&AuditReceipt::default()).expect("Failed to serialize");

        // 8 + 8 + 8 + 32
        assert_eq!(bytes.len(), 56);
    }
}
