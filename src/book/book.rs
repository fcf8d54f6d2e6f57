//! The order book aggregate.
//!
//! ## Architecture
//!
//! `OrderBook` owns the order arena, one [`LevelTree`] per side, and the
//! order index:
//!
//! - **Order arena** (`Slab<OrderNode>`): every resting order, addressed by
//!   a stable key that tree rebalancing never disturbs
//! - **Level trees**: balanced price-level trees, bids queried at their
//!   maximum price and asks at their minimum
//! - **Order index**: order id -> (side, price, arena key), so cancels and
//!   amends skip the tree search
//!
//! ## Mutation contract
//!
//! Every mutation takes the message's sequence number and is rejected with
//! [`BookError::SequenceGap`] unless it immediately follows the last
//! applied one. On success `last_applied_sequence` advances by one, which
//! makes mutation a pure function of (book state, message): replaying the
//! same log from an empty book always rebuilds the same book.
//!
//! A crossed book (best bid >= best ask) after a mutation is reported
//! through the injected observer and deliberately not reverted - it is a
//! venue-side anomaly the book records faithfully.
//!
//! ## Example
//!
//! ```
//! use seqbook::{BookMessage, OrderBook, Side};
//!
//! let mut book = OrderBook::default();
//!
//! book.apply(&BookMessage::Open {
//!     order_id: 1,
//!     side: Side::Bid,
//!     price: 10_000_000_000,
//!     size: 500_000_000,
//!     sequence: 1,
//! })
//! .unwrap();
//!
//! assert_eq!(book.best_bid(), Some(10_000_000_000));
//! assert_eq!(book.order_count(), 1);
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use sha2::{Digest, Sha256};
use slab::Slab;

use crate::book::{Direction, LevelTree, OrderNode};
use crate::error::BookError;
use crate::observer::{BookObserver, NullObserver};
use crate::types::{BookMessage, Order, Side, Snapshot};

/// Location of a resting order.
///
/// Carries the side, the price, and the order's arena key - never a handle
/// into tree internals, so rotations cannot invalidate an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OrderRef {
    key: usize,
    side: Side,
    price: u64,
}

/// Order-level (L3) limit order book for a single market.
pub struct OrderBook {
    /// Arena holding every resting order
    orders: Slab<OrderNode>,

    /// Bid-side price levels (best = maximum price)
    bids: LevelTree,

    /// Ask-side price levels (best = minimum price)
    asks: LevelTree,

    /// Order id -> location, for O(log n) cancel/amend without a tree scan
    index: HashMap<u64, OrderRef>,

    /// Sequence of the last applied mutation (0 before anything applied)
    last_sequence: u64,

    /// Injected diagnostic reporter
    observer: Arc<dyn BookObserver>,
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new(Arc::new(NullObserver))
    }
}

impl std::fmt::Debug for OrderBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderBook")
            .field("orders", &self.orders.len())
            .field("bid_levels", &self.bids.len())
            .field("ask_levels", &self.asks.len())
            .field("last_sequence", &self.last_sequence)
            .finish_non_exhaustive()
    }
}

impl OrderBook {
    /// Create a new empty book reporting through the given observer
    pub fn new(observer: Arc<dyn BookObserver>) -> Self {
        Self {
            orders: Slab::new(),
            bids: LevelTree::new(),
            asks: LevelTree::new(),
            index: HashMap::new(),
            last_sequence: 0,
            observer,
        }
    }

    /// Create a book with pre-allocated order capacity
    pub fn with_capacity(order_capacity: usize, observer: Arc<dyn BookObserver>) -> Self {
        Self {
            orders: Slab::with_capacity(order_capacity),
            bids: LevelTree::new(),
            asks: LevelTree::new(),
            index: HashMap::with_capacity(order_capacity),
            last_sequence: 0,
            observer,
        }
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Apply a stream message to the book
    pub fn apply(&mut self, message: &BookMessage) -> Result<(), BookError> {
        match *message {
            BookMessage::Open {
                order_id,
                side,
                price,
                size,
                sequence,
            } => self.apply_open(order_id, side, price, size, sequence),
            BookMessage::Change {
                order_id,
                new_size,
                sequence,
            } => self.apply_change(order_id, new_size, sequence),
            BookMessage::Match {
                maker_id, size, sequence, ..
            } => self.apply_match(maker_id, size, sequence),
            BookMessage::Done { order_id, sequence } => self.apply_done(order_id, sequence),
        }
    }

    /// Open a new resting order.
    ///
    /// Inserts the order's price level if absent, appends the order at the
    /// level's FIFO tail, and registers it in the index.
    ///
    /// A duplicate id is rejected without touching book state, but its
    /// sequence number is still consumed - otherwise the very next valid
    /// message would read as a gap and force a pointless resync.
    pub fn apply_open(
        &mut self,
        order_id: u64,
        side: Side,
        price: u64,
        size: u64,
        sequence: u64,
    ) -> Result<(), BookError> {
        self.check_sequence(sequence)?;
        if self.index.contains_key(&order_id) {
            self.last_sequence = sequence;
            return Err(BookError::DuplicateOrderId(order_id));
        }

        self.insert_order(Order::new(order_id, side, price, size, sequence));
        self.last_sequence = sequence;
        self.report_if_crossed(sequence);
        Ok(())
    }

    /// Change a resting order's size, adjusting the level aggregate by the
    /// delta.
    pub fn apply_change(
        &mut self,
        order_id: u64,
        new_size: u64,
        sequence: u64,
    ) -> Result<(), BookError> {
        self.check_sequence(sequence)?;
        let entry = *self
            .index
            .get(&order_id)
            .ok_or(BookError::UnknownOrder(order_id))?;

        let old_size = {
            let node = &mut self.orders[entry.key];
            let old = node.order.remaining;
            node.order.remaining = new_size;
            node.order.sequence = sequence;
            old
        };

        let tree = self.tree_mut(entry.side);
        let level_key = tree
            .find(entry.price)
            .expect("indexed order has no price level");
        let level = tree.level_mut(level_key);
        if new_size >= old_size {
            level.increase_size(new_size - old_size);
        } else {
            level.reduce_size(old_size - new_size);
        }

        self.last_sequence = sequence;
        self.report_if_crossed(sequence);
        Ok(())
    }

    /// Execute a trade against a resting maker order.
    ///
    /// Decrements the maker's remaining size and the level aggregate; once
    /// the maker is exhausted it leaves the level, the index, and - if the
    /// level empties - the tree.
    pub fn apply_match(
        &mut self,
        maker_id: u64,
        size: u64,
        sequence: u64,
    ) -> Result<(), BookError> {
        self.check_sequence(sequence)?;
        let entry = *self
            .index
            .get(&maker_id)
            .ok_or(BookError::UnknownOrder(maker_id))?;

        let (filled, exhausted) = {
            let node = &mut self.orders[entry.key];
            let filled = node.order.fill(size);
            node.order.sequence = sequence;
            (filled, node.order.is_filled())
        };

        let tree = match entry.side {
            Side::Bid => &mut self.bids,
            Side::Ask => &mut self.asks,
        };
        let level_key = tree
            .find(entry.price)
            .expect("indexed order has no price level");
        tree.level_mut(level_key).reduce_size(filled);

        if exhausted {
            tree.level_mut(level_key).remove(entry.key, &mut self.orders);
            self.orders.remove(entry.key);
            self.index.remove(&maker_id);
            if tree.level(level_key).is_empty() {
                tree.remove(entry.price).expect("emptied level is removable");
            }
        }

        self.last_sequence = sequence;
        self.report_if_crossed(sequence);
        Ok(())
    }

    /// Remove an order from the book (cancel or completion).
    pub fn apply_done(&mut self, order_id: u64, sequence: u64) -> Result<(), BookError> {
        self.check_sequence(sequence)?;
        let entry = self
            .index
            .remove(&order_id)
            .ok_or(BookError::UnknownOrder(order_id))?;

        let tree = match entry.side {
            Side::Bid => &mut self.bids,
            Side::Ask => &mut self.asks,
        };
        let level_key = tree
            .find(entry.price)
            .expect("indexed order has no price level");
        tree.level_mut(level_key).remove(entry.key, &mut self.orders);
        self.orders.remove(entry.key);
        if tree.level(level_key).is_empty() {
            tree.remove(entry.price).expect("emptied level is removable");
        }

        self.last_sequence = sequence;
        self.report_if_crossed(sequence);
        Ok(())
    }

    /// Bulk-load the book from a snapshot, replacing all current state and
    /// setting the sequence to the snapshot's.
    ///
    /// Duplicate ids within the snapshot keep their first occurrence.
    pub fn load_snapshot(&mut self, snapshot: &Snapshot) {
        self.reset();

        for row in &snapshot.bids {
            if self.index.contains_key(&row.order_id) {
                continue;
            }
            self.insert_order(Order::new(
                row.order_id,
                Side::Bid,
                row.price,
                row.size,
                snapshot.sequence,
            ));
        }
        for row in &snapshot.asks {
            if self.index.contains_key(&row.order_id) {
                continue;
            }
            self.insert_order(Order::new(
                row.order_id,
                Side::Ask,
                row.price,
                row.size,
                snapshot.sequence,
            ));
        }

        self.last_sequence = snapshot.sequence;
    }

    /// Clear trees, arena, index, and sequence in one operation
    pub fn reset(&mut self) {
        self.orders.clear();
        self.bids.clear();
        self.asks.clear();
        self.index.clear();
        self.last_sequence = 0;
    }

    // ========================================================================
    // Queries (read-only, never advance the sequence)
    // ========================================================================

    /// Best (highest) bid price
    #[inline]
    pub fn best_bid(&self) -> Option<u64> {
        self.bids.max_level().map(|level| level.price)
    }

    /// Best (lowest) ask price
    #[inline]
    pub fn best_ask(&self) -> Option<u64> {
        self.asks.min_level().map(|level| level.price)
    }

    /// Best bid as (price, aggregate size)
    pub fn best_bid_level(&self) -> Option<(u64, u64)> {
        self.bids.max_level().map(|l| (l.price, l.total_size))
    }

    /// Best ask as (price, aggregate size)
    pub fn best_ask_level(&self) -> Option<(u64, u64)> {
        self.asks.min_level().map(|l| (l.price, l.total_size))
    }

    /// Spread (best ask - best bid); None when either side is empty or the
    /// book is crossed
    pub fn spread(&self) -> Option<u64> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) if ask >= bid => Some(ask - bid),
            _ => None,
        }
    }

    /// Midpoint of best bid and best ask
    pub fn mid_price(&self) -> Option<u64> {
        let bid = self.best_bid()?;
        let ask = self.best_ask()?;
        Some(((bid as u128 + ask as u128) / 2) as u64)
    }

    /// Lazy depth traversal: (price, aggregate size) pairs in price order,
    /// best first
    pub fn levels(&self, side: Side) -> impl Iterator<Item = (u64, u64)> + '_ {
        let (tree, direction) = match side {
            Side::Bid => (&self.bids, Direction::Descending),
            Side::Ask => (&self.asks, Direction::Ascending),
        };
        tree.iter(direction)
            .map(|(price, level)| (price, level.total_size))
    }

    /// Top `limit` levels for a side, best first
    pub fn depth(&self, side: Side, limit: usize) -> Vec<(u64, u64)> {
        self.levels(side).take(limit).collect()
    }

    /// Total number of resting orders across both sides
    #[inline]
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Number of bid price levels
    #[inline]
    pub fn bid_levels(&self) -> usize {
        self.bids.len()
    }

    /// Number of ask price levels
    #[inline]
    pub fn ask_levels(&self) -> usize {
        self.asks.len()
    }

    /// Check if the book holds no orders
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Sequence of the last applied mutation
    #[inline]
    pub fn current_sequence(&self) -> u64 {
        self.last_sequence
    }

    /// Check if an order id is resting in the book
    #[inline]
    pub fn contains_order(&self, order_id: u64) -> bool {
        self.index.contains_key(&order_id)
    }

    /// Look up a resting order by id
    pub fn get_order(&self, order_id: u64) -> Option<&Order> {
        let entry = self.index.get(&order_id)?;
        Some(&self.orders[entry.key].order)
    }

    // ========================================================================
    // Determinism & invariants
    // ========================================================================

    /// SHA-256 digest of the full book state.
    ///
    /// Covers the sequence, every level in price order, and every order in
    /// queue order, so two books with the same digest are identical down to
    /// time priority. Used to assert the replay contract: identical message
    /// logs from an empty book yield identical digests.
    pub fn state_digest(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(self.last_sequence.to_le_bytes());

        for (tag, tree, direction) in [
            (0u8, &self.bids, Direction::Descending),
            (1u8, &self.asks, Direction::Ascending),
        ] {
            hasher.update([tag]);
            for (price, level) in tree.iter(direction) {
                hasher.update(price.to_le_bytes());
                hasher.update(level.total_size.to_le_bytes());

                let mut next = level.head;
                while let Some(key) = next {
                    let node = &self.orders[key];
                    hasher.update(node.order.id.to_le_bytes());
                    hasher.update(node.order.remaining.to_le_bytes());
                    next = node.next;
                }
            }
        }

        hasher.finalize().into()
    }

    /// Verify every structural invariant, panicking on any violation.
    ///
    /// Checks both trees (ordering, balance, link consistency) and the
    /// index <-> arena <-> level cross-references. A failure means the
    /// data structure's guarantees are broken; no recovery is meaningful.
    pub fn check(&self) {
        self.bids.validate();
        self.asks.validate();

        assert_eq!(
            self.index.len(),
            self.orders.len(),
            "index size {} != order arena size {}",
            self.index.len(),
            self.orders.len()
        );

        let mut queued = 0usize;
        for tree in [&self.bids, &self.asks] {
            for (_, level) in tree.iter(Direction::Ascending) {
                assert!(
                    !level.is_empty(),
                    "empty level at {} survived in the tree",
                    level.price
                );
                queued += level.order_count;
            }
        }
        assert_eq!(
            queued,
            self.orders.len(),
            "level queues hold {} orders but arena holds {}",
            queued,
            self.orders.len()
        );

        for (id, entry) in &self.index {
            let node = self
                .orders
                .get(entry.key)
                .expect("index entry points at a vacant arena slot");
            assert_eq!(node.order.id, *id, "index id does not match arena order");
            assert_eq!(node.order.price, entry.price, "index price is stale");
            assert_eq!(node.order.side, entry.side, "index side is stale");
            let tree = match entry.side {
                Side::Bid => &self.bids,
                Side::Ask => &self.asks,
            };
            assert!(
                tree.contains(entry.price),
                "indexed price {} missing from tree",
                entry.price
            );
        }
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn check_sequence(&self, sequence: u64) -> Result<(), BookError> {
        let expected = self.last_sequence + 1;
        if sequence != expected {
            return Err(BookError::SequenceGap {
                expected,
                actual: sequence,
            });
        }
        Ok(())
    }

    fn tree_mut(&mut self, side: Side) -> &mut LevelTree {
        match side {
            Side::Bid => &mut self.bids,
            Side::Ask => &mut self.asks,
        }
    }

    fn insert_order(&mut self, order: Order) {
        let order_id = order.id;
        let side = order.side;
        let price = order.price;

        let key = self.orders.insert(OrderNode::new(order));
        let tree = match side {
            Side::Bid => &mut self.bids,
            Side::Ask => &mut self.asks,
        };
        let level_key = tree.insert(price);
        tree.level_mut(level_key).push_back(key, &mut self.orders);

        self.index.insert(order_id, OrderRef { key, side, price });
    }

    fn report_if_crossed(&self, sequence: u64) {
        if let (Some(bid), Some(ask)) = (self.best_bid(), self.best_ask()) {
            if bid >= ask {
                self.observer.crossed_book(bid, ask, sequence);
            }
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SnapshotOrder;
    use std::sync::Mutex;

    /// Observer that records crossed-book reports for assertions.
    #[derive(Default)]
    struct CrossedRecorder {
        events: Mutex<Vec<(u64, u64, u64)>>,
    }

    impl BookObserver for CrossedRecorder {
        fn crossed_book(&self, best_bid: u64, best_ask: u64, sequence: u64) {
            self.events.lock().unwrap().push((best_bid, best_ask, sequence));
        }
    }

    fn open(book: &mut OrderBook, id: u64, side: Side, price: u64, size: u64, seq: u64) {
        book.apply_open(id, side, price, size, seq).unwrap();
    }

    #[test]
    fn test_book_new() {
        let book = OrderBook::default();

        assert!(book.is_empty());
        assert_eq!(book.order_count(), 0);
        assert_eq!(book.current_sequence(), 0);
        assert!(book.best_bid().is_none());
        assert!(book.best_ask().is_none());
        assert!(book.spread().is_none());
    }

    #[test]
    fn test_level_lifecycle_scenario() {
        // Two bids at one price, then a match exhausting the first and a
        // done removing the second, emptying the level.
        let mut book = OrderBook::default();

        open(&mut book, 1, Side::Bid, 10_000_000_000, 500_000_000, 1);
        open(&mut book, 2, Side::Bid, 10_000_000_000, 300_000_000, 2);

        let (price, size) = book.best_bid_level().unwrap();
        assert_eq!(price, 10_000_000_000);
        assert_eq!(size, 800_000_000);
        assert_eq!(book.order_count(), 2);
        assert_eq!(book.bid_levels(), 1);

        book.apply_match(1, 500_000_000, 3).unwrap();
        assert!(!book.contains_order(1));
        assert_eq!(book.best_bid_level().unwrap().1, 300_000_000);

        book.apply_done(2, 4).unwrap();
        assert!(book.best_bid().is_none());
        assert_eq!(book.bid_levels(), 0);
        assert!(book.is_empty());
        book.check();
    }

    #[test]
    fn test_sequence_gap_rejected() {
        let mut book = OrderBook::default();

        open(&mut book, 1, Side::Bid, 10_000_000_000, 100_000_000, 1);

        let err = book
            .apply_open(2, Side::Bid, 9_900_000_000, 100_000_000, 5)
            .unwrap_err();
        assert_eq!(
            err,
            BookError::SequenceGap {
                expected: 2,
                actual: 5
            }
        );

        // The rejected message left no trace
        assert_eq!(book.order_count(), 1);
        assert_eq!(book.current_sequence(), 1);
    }

    #[test]
    fn test_duplicate_open_consumes_sequence() {
        let mut book = OrderBook::default();

        open(&mut book, 1, Side::Bid, 10_000_000_000, 100_000_000, 1);

        let err = book
            .apply_open(1, Side::Bid, 9_900_000_000, 100_000_000, 2)
            .unwrap_err();
        assert_eq!(err, BookError::DuplicateOrderId(1));

        // Book state is untouched, but the sequence advanced so the stream
        // can continue
        assert_eq!(book.order_count(), 1);
        assert_eq!(book.current_sequence(), 2);
        assert_eq!(book.get_order(1).unwrap().price, 10_000_000_000);

        // The next message is not a gap
        open(&mut book, 2, Side::Ask, 10_100_000_000, 100_000_000, 3);
    }

    #[test]
    fn test_unknown_order_rejected() {
        let mut book = OrderBook::default();

        assert_eq!(
            book.apply_change(99, 50_000_000, 1),
            Err(BookError::UnknownOrder(99))
        );
        assert_eq!(book.apply_match(99, 50_000_000, 1), Err(BookError::UnknownOrder(99)));
        assert_eq!(book.apply_done(99, 1), Err(BookError::UnknownOrder(99)));

        // Rejections never advance the sequence
        assert_eq!(book.current_sequence(), 0);
    }

    #[test]
    fn test_change_adjusts_level_aggregate() {
        let mut book = OrderBook::default();

        open(&mut book, 1, Side::Ask, 10_100_000_000, 500_000_000, 1);
        open(&mut book, 2, Side::Ask, 10_100_000_000, 300_000_000, 2);

        book.apply_change(1, 200_000_000, 3).unwrap();
        assert_eq!(book.best_ask_level().unwrap().1, 500_000_000);
        assert_eq!(book.get_order(1).unwrap().remaining, 200_000_000);

        // Upward change is handled too
        book.apply_change(1, 400_000_000, 4).unwrap();
        assert_eq!(book.best_ask_level().unwrap().1, 700_000_000);
        book.check();
    }

    #[test]
    fn test_partial_match_keeps_order() {
        let mut book = OrderBook::default();

        open(&mut book, 1, Side::Bid, 10_000_000_000, 500_000_000, 1);

        book.apply_match(1, 200_000_000, 2).unwrap();

        assert!(book.contains_order(1));
        assert_eq!(book.get_order(1).unwrap().remaining, 300_000_000);
        assert_eq!(book.best_bid_level().unwrap().1, 300_000_000);
        assert_eq!(book.get_order(1).unwrap().sequence, 2);
    }

    #[test]
    fn test_match_via_message_dispatch() {
        let mut book = OrderBook::default();

        open(&mut book, 1, Side::Ask, 10_100_000_000, 100_000_000, 1);

        book.apply(&BookMessage::Match {
            maker_id: 1,
            taker_id: 77,
            price: 10_100_000_000,
            size: 100_000_000,
            sequence: 2,
        })
        .unwrap();

        assert!(book.is_empty());
        assert_eq!(book.ask_levels(), 0);
    }

    #[test]
    fn test_crossed_book_reported_not_reverted() {
        let observer = Arc::new(CrossedRecorder::default());
        let mut book = OrderBook::new(observer.clone());

        open(&mut book, 1, Side::Ask, 10_000_000_000, 100_000_000, 1);
        open(&mut book, 2, Side::Bid, 10_100_000_000, 100_000_000, 2);

        let events = observer.events.lock().unwrap();
        assert_eq!(events.as_slice(), &[(10_100_000_000, 10_000_000_000, 2)]);
        drop(events);

        // Both levels remain queryable
        assert_eq!(book.best_bid(), Some(10_100_000_000));
        assert_eq!(book.best_ask(), Some(10_000_000_000));
        assert!(book.spread().is_none());
    }

    #[test]
    fn test_depth_query() {
        let mut book = OrderBook::default();

        open(&mut book, 1, Side::Bid, 10_000_000_000, 100_000_000, 1);
        open(&mut book, 2, Side::Bid, 9_900_000_000, 200_000_000, 2);
        open(&mut book, 3, Side::Bid, 9_800_000_000, 300_000_000, 3);
        open(&mut book, 4, Side::Ask, 10_100_000_000, 400_000_000, 4);
        open(&mut book, 5, Side::Ask, 10_200_000_000, 500_000_000, 5);

        let bids = book.depth(Side::Bid, 2);
        assert_eq!(
            bids,
            vec![(10_000_000_000, 100_000_000), (9_900_000_000, 200_000_000)]
        );

        let asks = book.depth(Side::Ask, 10);
        assert_eq!(
            asks,
            vec![(10_100_000_000, 400_000_000), (10_200_000_000, 500_000_000)]
        );
    }

    #[test]
    fn test_mid_price_and_spread() {
        let mut book = OrderBook::default();

        open(&mut book, 1, Side::Bid, 10_000_000_000, 100_000_000, 1);
        open(&mut book, 2, Side::Ask, 10_100_000_000, 100_000_000, 2);

        assert_eq!(book.spread(), Some(100_000_000));
        assert_eq!(book.mid_price(), Some(10_050_000_000));
    }

    #[test]
    fn test_load_snapshot() {
        let mut book = OrderBook::default();

        // Pre-existing state is replaced wholesale
        open(&mut book, 99, Side::Bid, 5_000_000_000, 100_000_000, 1);

        let mut snapshot = Snapshot::new(1000);
        snapshot.bids.push(SnapshotOrder::new(1, 10_000_000_000, 100_000_000));
        snapshot.bids.push(SnapshotOrder::new(2, 9_900_000_000, 200_000_000));
        snapshot.asks.push(SnapshotOrder::new(3, 10_100_000_000, 300_000_000));

        book.load_snapshot(&snapshot);

        assert_eq!(book.current_sequence(), 1000);
        assert_eq!(book.order_count(), 3);
        assert!(!book.contains_order(99));
        assert_eq!(book.best_bid(), Some(10_000_000_000));
        assert_eq!(book.best_ask(), Some(10_100_000_000));
        book.check();

        // Stream continues from the snapshot sequence
        book.apply_done(2, 1001).unwrap();
        assert_eq!(book.bid_levels(), 1);
    }

    #[test]
    fn test_reset() {
        let mut book = OrderBook::default();

        open(&mut book, 1, Side::Bid, 10_000_000_000, 100_000_000, 1);
        open(&mut book, 2, Side::Ask, 10_100_000_000, 100_000_000, 2);

        book.reset();

        assert!(book.is_empty());
        assert_eq!(book.current_sequence(), 0);
        assert!(book.best_bid().is_none());
        assert!(book.best_ask().is_none());
        assert!(!book.contains_order(1));
        book.check();
    }

    #[test]
    fn test_state_digest_tracks_content() {
        let mut book_a = OrderBook::default();
        let mut book_b = OrderBook::default();

        let empty = book_a.state_digest();
        assert_eq!(empty, book_b.state_digest());

        open(&mut book_a, 1, Side::Bid, 10_000_000_000, 100_000_000, 1);
        assert_ne!(book_a.state_digest(), empty);

        open(&mut book_b, 1, Side::Bid, 10_000_000_000, 100_000_000, 1);
        assert_eq!(book_a.state_digest(), book_b.state_digest());
    }

    #[test]
    fn test_fifo_priority_preserved_in_digest() {
        // Same orders arriving in different FIFO order at one price must
        // produce different digests - time priority is book state.
        let mut book_a = OrderBook::default();
        open(&mut book_a, 1, Side::Bid, 10_000_000_000, 100_000_000, 1);
        open(&mut book_a, 2, Side::Bid, 10_000_000_000, 100_000_000, 2);

        let mut book_b = OrderBook::default();
        open(&mut book_b, 2, Side::Bid, 10_000_000_000, 100_000_000, 1);
        open(&mut book_b, 1, Side::Bid, 10_000_000_000, 100_000_000, 2);

        assert_ne!(book_a.state_digest(), book_b.state_digest());
    }
}
