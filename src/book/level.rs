//! Price level management for orders resting at the same price.
//!
//! ## Design
//!
//! A `PriceLevel` represents all resting orders at a single price point.
//! Orders are maintained in a doubly-linked list in arrival order
//! (time priority).
//!
//! ## Queue Structure
//!
//! ```text
//! head (oldest) <-> order2 <-> order3 <-> tail (newest)
//! ```
//!
//! - New orders are appended at the tail
//! - Any order can be removed in O(1) using its arena key
//!
//! The order data itself lives in the book's order arena; this struct only
//! holds the queue metadata and the aggregate size, so moving a level
//! between tree slots during a delete is cheap.

use slab::Slab;

use crate::book::OrderNode;

/// A price level containing all orders resting at a single price.
#[derive(Debug, Clone)]
pub struct PriceLevel {
    /// Price for this level (fixed-point, scaled by 10^8)
    pub price: u64,

    /// Total remaining size at this level
    /// Updated when orders are added/removed/filled
    pub total_size: u64,

    /// Head of the order queue (oldest order, arena key)
    pub head: Option<usize>,

    /// Tail of the order queue (newest order, arena key)
    pub tail: Option<usize>,

    /// Number of orders at this price level
    pub order_count: usize,
}

impl PriceLevel {
    /// Create a new empty price level
    pub fn new(price: u64) -> Self {
        Self {
            price,
            total_size: 0,
            head: None,
            tail: None,
            order_count: 0,
        }
    }

    /// Check if the price level is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order_count == 0
    }

    /// Append an order to the tail of the queue
    ///
    /// This maintains FIFO ordering - the head is always the oldest order.
    ///
    /// # Panics
    ///
    /// Panics if the key doesn't exist in the arena
    pub fn push_back(&mut self, key: usize, orders: &mut Slab<OrderNode>) {
        let node = orders.get_mut(key).expect("invalid order key");
        let size = node.remaining();

        node.prev = self.tail;
        node.next = None;

        if let Some(tail_key) = self.tail {
            let tail_node = orders.get_mut(tail_key).expect("invalid tail key");
            tail_node.next = Some(key);
        } else {
            // Empty queue - this is also the head
            self.head = Some(key);
        }

        self.tail = Some(key);
        self.order_count += 1;
        self.total_size = self.total_size.saturating_add(size);
    }

    /// Unlink an order from the queue by arena key
    ///
    /// # Returns
    ///
    /// The remaining size of the removed order
    ///
    /// # Panics
    ///
    /// Panics if the key doesn't exist in the arena
    pub fn remove(&mut self, key: usize, orders: &mut Slab<OrderNode>) -> u64 {
        let node = orders.get(key).expect("invalid order key");
        let size = node.remaining();
        let prev_key = node.prev;
        let next_key = node.next;

        if let Some(prev) = prev_key {
            let prev_node = orders.get_mut(prev).expect("invalid prev key");
            prev_node.next = next_key;
        } else {
            // This was the head
            self.head = next_key;
        }

        if let Some(next) = next_key {
            let next_node = orders.get_mut(next).expect("invalid next key");
            next_node.prev = prev_key;
        } else {
            // This was the tail
            self.tail = prev_key;
        }

        let node = orders.get_mut(key).expect("invalid order key");
        node.prev = None;
        node.next = None;

        self.order_count -= 1;
        self.total_size = self.total_size.saturating_sub(size);

        size
    }

    /// Get the head order's arena key (oldest order at this price)
    #[inline]
    pub fn peek_head(&self) -> Option<usize> {
        self.head
    }

    /// Reduce the aggregate size after a partial fill or size change
    pub fn reduce_size(&mut self, delta: u64) {
        self.total_size = self.total_size.saturating_sub(delta);
    }

    /// Increase the aggregate size after an upward size change
    pub fn increase_size(&mut self, delta: u64) {
        self.total_size = self.total_size.saturating_add(delta);
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
