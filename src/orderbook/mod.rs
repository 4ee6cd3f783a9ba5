//! Order book module.
//!
//! ## Architecture
//!
//! - **Slab-based storage**: every accepted order, including removed ones
//! - **Priority sequences**: one best-first sequence of slab keys per side
//! - **Unit-price priority**: FIFO among equal unit prices
//!
//! ## Components
//!
//! - [`PrioritySequence`]: Best-first ordering of one side
//! - [`OrderBook`]: Submit, cancel and best-order queries
//!
//! ## Complexity
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | Submit | O(log n) search + O(n) shift |
//! | Cancel by ID | O(log n) lookup + O(n) removal |
//! | Best buy/sell | O(1) |
//! | List orders | O(n) |

pub mod sequence;
pub mod book;

pub use sequence::PrioritySequence;
pub use book::{OrderBook, Submission};
