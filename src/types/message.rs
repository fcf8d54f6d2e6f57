//! Domain messages delivered by the transport adapter.
//!
//! Each book-affecting message carries a monotonically-intended sequence
//! number assigned by the venue. The sync controller uses it to detect gaps
//! and reordering; the book refuses to apply anything that does not
//! immediately follow its last applied sequence.
//!
//! Snapshots arrive through a separate request/response channel and are
//! slightly out of phase with the stream; reconciling the two is the sync
//! controller's job.

use serde::{Deserialize, Serialize};

use crate::types::Side;

// ============================================================================
// Stream messages
// ============================================================================

/// An incremental book update from the venue's message stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookMessage {
    /// A new order has been opened on the book
    Open {
        order_id: u64,
        side: Side,
        price: u64,
        size: u64,
        sequence: u64,
    },
    /// A resting order's size has changed (self-trade prevention, modify)
    Change {
        order_id: u64,
        new_size: u64,
        sequence: u64,
    },
    /// A trade executed against a resting maker order
    Match {
        maker_id: u64,
        taker_id: u64,
        price: u64,
        size: u64,
        sequence: u64,
    },
    /// An order has left the book (cancelled or completed)
    Done { order_id: u64, sequence: u64 },
}

impl BookMessage {
    /// The venue-assigned sequence number of this message
    #[inline]
    pub fn sequence(&self) -> u64 {
        match *self {
            BookMessage::Open { sequence, .. }
            | BookMessage::Change { sequence, .. }
            | BookMessage::Match { sequence, .. }
            | BookMessage::Done { sequence, .. } => sequence,
        }
    }
}

// ============================================================================
// Snapshots
// ============================================================================

/// One resting order in a snapshot, as listed by the venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotOrder {
    pub order_id: u64,
    pub price: u64,
    pub size: u64,
}

impl SnapshotOrder {
    pub fn new(order_id: u64, price: u64, size: u64) -> Self {
        Self {
            order_id,
            price,
            size,
        }
    }
}

/// A point-in-time full dump of the book, tagged with the sequence number
/// at which the venue generated it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Sequence the snapshot was generated at
    pub sequence: u64,
    /// Resting bid orders, in no guaranteed order
    pub bids: Vec<SnapshotOrder>,
    /// Resting ask orders, in no guaranteed order
    pub asks: Vec<SnapshotOrder>,
}

impl Snapshot {
    /// Create an empty snapshot at the given sequence
    pub fn new(sequence: u64) -> Self {
        Self {
            sequence,
            bids: Vec::new(),
            asks: Vec::new(),
        }
    }

    /// Total number of resting orders across both sides
    pub fn order_count(&self) -> usize {
        self.bids.len() + self.asks.len()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
