//! Order and side types for the book engine.
//!
//! ## Fixed-Point Representation
//!
//! Prices and sizes are stored as u64 scaled by 10^8 (see [`crate::types::price`]).
//! This keeps book state free of floating-point values, so replaying an
//! identical message log always reproduces an identical book.

use serde::{Deserialize, Serialize};

// ============================================================================
// Side enum
// ============================================================================

/// Book side: Bid or Ask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Side {
    /// Bid (buy) side - resting orders below the market
    #[default]
    Bid,
    /// Ask (sell) side - resting orders above the market
    Ask,
}

impl Side {
    /// Returns the opposite side
    pub fn opposite(self) -> Self {
        match self {
            Side::Bid => Side::Ask,
            Side::Ask => Side::Bid,
        }
    }
}

// ============================================================================
// Order struct
// ============================================================================

/// A resting limit order reconstructed from the venue's message stream.
///
/// All price/size fields use fixed-point representation (scaled by 10^8).
/// `sequence` records the stream sequence at which the order was last
/// mutated, which makes stale-data bugs visible in dumps and digests.
///
/// ## Example
///
/// ```
/// use seqbook::{Order, Side};
///
/// // A bid for 1.5 units at 100.00
/// let order = Order::new(42, Side::Bid, 10_000_000_000, 150_000_000, 7);
/// assert_eq!(order.remaining, 150_000_000);
/// assert!(!order.is_filled());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Venue-assigned order identifier, unique among resting orders
    pub id: u64,

    /// Which side of the book the order rests on
    pub side: Side,

    /// Price in fixed-point (scaled by 10^8)
    pub price: u64,

    /// Remaining (unfilled) size in fixed-point (scaled by 10^8)
    pub remaining: u64,

    /// Stream sequence at which this order was last mutated
    pub sequence: u64,
}

impl Order {
    /// Create a new resting order
    pub fn new(id: u64, side: Side, price: u64, remaining: u64, sequence: u64) -> Self {
        Self {
            id,
            side,
            price,
            remaining,
            sequence,
        }
    }

    /// Check if the order has no remaining size
    #[inline]
    pub fn is_filled(&self) -> bool {
        self.remaining == 0
    }

    /// Fill a portion of this order
    ///
    /// # Returns
    ///
    /// The actual size filled (capped at the remaining size)
    #[inline]
    pub fn fill(&mut self, size: u64) -> u64 {
        let actual = size.min(self.remaining);
        self.remaining -= actual;
        actual
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Bid.opposite(), Side::Ask);
        assert_eq!(Side::Ask.opposite(), Side::Bid);
    }

    #[test]
    fn test_order_new() {
        let order = Order::new(1, Side::Bid, 10_000_000_000, 150_000_000, 5);

        assert_eq!(order.id, 1);
        assert_eq!(order.side, Side::Bid);
        assert_eq!(order.price, 10_000_000_000);
        assert_eq!(order.remaining, 150_000_000);
        assert_eq!(order.sequence, 5);
        assert!(!order.is_filled());
    }

    #[test]
    fn test_order_fill() {
        let mut order = Order::new(1, Side::Ask, 10_000_000_000, 100_000_000, 1);

        // Partial fill
        let filled = order.fill(30_000_000);
        assert_eq!(filled, 30_000_000);
        assert_eq!(order.remaining, 70_000_000);
        assert!(!order.is_filled());

        // Fill the rest
        let filled = order.fill(70_000_000);
        assert_eq!(filled, 70_000_000);
        assert!(order.is_filled());
    }

    #[test]
    fn test_order_overfill() {
        let mut order = Order::new(1, Side::Bid, 10_000_000_000, 100_000_000, 1);

        // Filling more than available caps at the remaining size
        let filled = order.fill(200_000_000);
        assert_eq!(filled, 100_000_000);
        assert_eq!(order.remaining, 0);
        assert!(order.is_filled());
    }
}
