//! # Unit Book
//!
//! Order book that ranks each side by unit price (`price / quantity`).
//!
//! ## Architecture
//!
//! - **Types**: Core data structures (Order, OrderView, AuditReceipt)
//! - **OrderBook**: Slab storage plus one priority sequence per side
//! - **CLI**: Interactive menu harness over the book
//!
//! ## Design Principles
//!
//! 1. **Exact Priority**: Unit prices are compared by cross-multiplication,
//!    never by rounded quotients
//! 2. **No Floating Point**: Prices are fixed-point (10^8 scaling)
//! 3. **Soft Delete**: Cancelled orders stay in the history
//! 4. **Synchronous Execution**: Single owner, no locks, no async

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: Order, OrderView, AuditReceipt
pub mod types;

/// Order book: priority sequences over slab storage
pub mod orderbook;

/// Error types
pub mod error;

/// Environment-driven configuration
pub mod config;

/// Tracing subscriber setup
pub mod logging;

/// Interactive terminal harness
pub mod cli;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use types::{AuditReceipt, Order, OrderView, Side, Status};
pub use orderbook::{OrderBook, PrioritySequence, Submission};
pub use error::{AuditError, BookError};
