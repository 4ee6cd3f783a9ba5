//! Core data types for the unit-price order book
//!
//! ## Types
//!
//! - [`Order`]: A resting order and its priority rule
//! - [`Side`]: Buy or Sell
//! - [`Status`]: Active or Removed
//! - [`OrderView`]: Read-only snapshot returned by book queries
//! - [`OrderRecord`] / [`AuditReceipt`]: SSZ records behind the history root
//!
//! ## Fixed-Point Arithmetic
//!
//! Prices are stored as `u64` scaled by 10^8.
//! Example: 23.00 is stored as 2_300_000_000u64

mod order;
mod view;
mod record;
pub mod price;

pub use order::{Order, Side, Status};
pub use view::OrderView;
pub use record::{AuditReceipt, OrderRecord};
