//! Error types for the order book.
//!
//! Every failure is recoverable: the book is left exactly as it was before
//! the failing call.

use thiserror::Error;

/// Errors returned by [`crate::OrderBook`] mutations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookError {
    /// Submission rejected before any state changed
    #[error("invalid order: {reason}")]
    InvalidOrder { reason: String },

    /// Cancel referenced an id the book never issued
    #[error("order {0} does not exist")]
    OrderNotFound(u64),
}

impl BookError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        BookError::InvalidOrder {
            reason: reason.into(),
        }
    }
}

/// Errors while building an [`crate::types::AuditReceipt`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuditError {
    #[error("failed to encode order record: {0}")]
    Encode(String),
}
