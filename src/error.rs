//! Error taxonomy for book mutations.
//!
//! These cover the recoverable failures: the sync controller reacts to a
//! [`BookError::SequenceGap`] or [`BookError::UnknownOrder`] by resetting
//! and resyncing, and to a [`BookError::DuplicateOrderId`] by reporting and
//! moving on. Internal tree invariant violations are not represented here -
//! they indicate the data structure's guarantees are broken, so they panic
//! instead of propagating.

use thiserror::Error;

/// Errors returned by order book mutations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BookError {
    /// Message sequence does not immediately follow the last applied one.
    #[error("sequence gap: expected {expected}, got {actual}")]
    SequenceGap { expected: u64, actual: u64 },

    /// A Change/Match/Done referenced an order absent from the index,
    /// typically a symptom of earlier data loss.
    #[error("unknown order id {0}")]
    UnknownOrder(u64),

    /// An Open referenced an id that is already resting.
    #[error("duplicate order id {0}")]
    DuplicateOrderId(u64),

    /// Tree deletion targeted a price with no empty level to remove.
    #[error("no removable price level at {0}")]
    LevelNotFound(u64),
}
