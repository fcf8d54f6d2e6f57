//! Concurrent access to the order book.
//!
//! ## Model
//!
//! A simple readers-writer discipline, not per-node locking: the sync
//! controller is the single logical writer and takes the write lock per
//! mutation; query consumers (charting, monitoring) clone the handle and
//! take the read lock. A depth traversal holds the read lock for its whole
//! duration, so it can never observe a tree mid-rotation or a level
//! mid-update; a reset happens inside one write-lock critical section, so
//! readers see either the pre-reset or the post-reset book, never a
//! partially cleared one.
//!
//! The sync state lives in its own cell so monitoring can poll it without
//! contending on the book lock.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::book::OrderBook;
use crate::observer::BookObserver;
use crate::sync::SyncState;
use crate::types::Side;

/// Cloneable handle to a shared order book and its sync state.
#[derive(Debug, Clone)]
pub struct SharedBook {
    book: Arc<RwLock<OrderBook>>,
    state: Arc<RwLock<SyncState>>,
}

impl SharedBook {
    /// Create a shared book reporting through the given observer
    pub fn new(observer: Arc<dyn BookObserver>) -> Self {
        Self {
            book: Arc::new(RwLock::new(OrderBook::new(observer))),
            state: Arc::new(RwLock::new(SyncState::Unsynced)),
        }
    }

    /// Create a shared book with pre-allocated order capacity
    pub fn with_capacity(order_capacity: usize, observer: Arc<dyn BookObserver>) -> Self {
        Self {
            book: Arc::new(RwLock::new(OrderBook::with_capacity(order_capacity, observer))),
            state: Arc::new(RwLock::new(SyncState::Unsynced)),
        }
    }

    // ========================================================================
    // Query interface
    // ========================================================================

    /// Best (highest) bid price
    pub fn best_bid(&self) -> Option<u64> {
        self.book.read().best_bid()
    }

    /// Best (lowest) ask price
    pub fn best_ask(&self) -> Option<u64> {
        self.book.read().best_ask()
    }

    /// Spread (best ask - best bid)
    pub fn spread(&self) -> Option<u64> {
        self.book.read().spread()
    }

    /// Midpoint of best bid and best ask
    pub fn mid_price(&self) -> Option<u64> {
        self.book.read().mid_price()
    }

    /// Top `limit` levels for a side, best first.
    ///
    /// The traversal runs under a single read guard, so the returned depth
    /// is one consistent observation of the book.
    pub fn depth(&self, side: Side, limit: usize) -> Vec<(u64, u64)> {
        self.book.read().depth(side, limit)
    }

    /// Total number of resting orders
    pub fn order_count(&self) -> usize {
        self.book.read().order_count()
    }

    /// Sequence of the last applied mutation
    pub fn current_sequence(&self) -> u64 {
        self.book.read().current_sequence()
    }

    /// Current sync state
    pub fn sync_state(&self) -> SyncState {
        *self.state.read()
    }

    /// SHA-256 digest of the full book state (one consistent observation)
    pub fn state_digest(&self) -> [u8; 32] {
        self.book.read().state_digest()
    }

    /// Acquire the read lock directly for a multi-query consistent view
    pub fn read(&self) -> RwLockReadGuard<'_, OrderBook> {
        self.book.read()
    }

    // ========================================================================
    // Writer interface (the sync controller is the single logical writer)
    // ========================================================================

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, OrderBook> {
        self.book.write()
    }

    pub(crate) fn set_sync_state(&self, state: SyncState) {
        *self.state.write() = state;
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
