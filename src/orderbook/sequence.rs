//! Priority sequence for one side of the book.
//!
//! ## Design
//!
//! A `PrioritySequence` holds slab keys of the active orders on one side,
//! best first. The order data lives in the slab; this struct only holds the
//! ordering.
//!
//! ```text
//! head (best) -> key -> key -> ... -> tail (worst)
//! ```
//!
//! - A new order goes in front of the first entry it strictly outranks, so
//!   equal unit prices keep their arrival order (FIFO)
//! - Removing a key shifts the entries behind it forward

use slab::Slab;

use crate::types::{Order, Side};

/// Best-first ordering of the active orders on one side.
#[derive(Debug, Clone)]
pub struct PrioritySequence {
    side: Side,
    keys: Vec<usize>,
}

impl PrioritySequence {
    /// Create a new empty sequence for `side`
    pub fn new(side: Side) -> Self {
        Self {
            side,
            keys: Vec::new(),
        }
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Slab key of the best order, if any
    #[inline]
    pub fn head(&self) -> Option<usize> {
        self.keys.first().copied()
    }

    /// Slab keys, best first
    #[inline]
    pub fn keys(&self) -> &[usize] {
        &self.keys
    }

    /// Insert the order stored under `key` at its priority position.
    ///
    /// Entries are sorted, so every resting order that `incoming` does not
    /// strictly outrank forms a prefix; the insertion point is the end of
    /// that prefix.
    ///
    /// # Returns
    ///
    /// The position the order was inserted at (0 = new best)
    pub fn insert(&mut self, key: usize, incoming: &Order, orders: &Slab<Order>) -> usize {
        debug_assert_eq!(incoming.side(), self.side);

        let position = self.keys.partition_point(|&resting_key| {
            orders
                .get(resting_key)
                .map_or(false, |resting| !incoming.is_better_than(resting))
        });
        self.keys.insert(position, key);
        position
    }

    /// Remove `key` from the sequence
    ///
    /// # Returns
    ///
    /// `true` if the key was present
    pub fn remove(&mut self, key: usize) -> bool {
        match self.keys.iter().position(|&k| k == key) {
            Some(position) => {
                self.keys.remove(position);
                true
            }
            None => false,
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
