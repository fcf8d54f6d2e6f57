//! Injected observer interface for book and sync events.
//!
//! The engine never logs through ambient global state: everything it wants
//! to report - state transitions, sequence gaps, crossed books - goes
//! through a [`BookObserver`] passed in explicitly. Binaries wire up
//! [`TracingObserver`]; tests inject recorders and assert on the events.

use crate::sync::SyncState;

/// Receiver for diagnostic events from the order book and sync controller.
///
/// All methods have no-op defaults, so implementors override only what they
/// care about. Implementations must be cheap and non-blocking: they are
/// called from the writer path, in some cases while the book's write lock
/// is held.
pub trait BookObserver: Send + Sync {
    /// The sync controller moved between states
    fn sync_transition(&self, _from: SyncState, _to: SyncState) {}

    /// A message's sequence did not follow the last applied one
    fn sequence_gap(&self, _expected: u64, _actual: u64) {}

    /// Best bid >= best ask after a mutation (diagnostic; the book keeps going)
    fn crossed_book(&self, _best_bid: u64, _best_ask: u64, _sequence: u64) {}

    /// An Open referenced an already-resting order id and was rejected
    fn duplicate_order(&self, _order_id: u64, _sequence: u64) {}

    /// A Change/Match/Done referenced an unindexed order id
    fn unknown_order(&self, _order_id: u64, _sequence: u64) {}

    /// A snapshot was installed into the book
    fn snapshot_installed(&self, _sequence: u64, _order_count: usize) {}

    /// A snapshot arrived in a state that cannot accept one and was dropped
    fn snapshot_discarded(&self, _sequence: u64, _state: SyncState) {}

    /// The buffered stream starts after the snapshot ends; the book cannot
    /// be completed and a resync follows
    fn snapshot_gap(&self, _snapshot_sequence: u64, _buffer_min: u64) {}

    /// Backfill drained the buffer, applying this many messages
    fn backfill_complete(&self, _applied: usize) {}

    /// The message buffer hit its capacity and evicted its oldest entry
    fn buffer_overflow(&self, _dropped_sequence: u64) {}
}

/// Observer that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl BookObserver for NullObserver {}

/// Observer that forwards events to the `tracing` macros.
///
/// Gap and crossed-book events are warnings; routine lifecycle events are
/// logged at debug/info.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl BookObserver for TracingObserver {
    fn sync_transition(&self, from: SyncState, to: SyncState) {
        tracing::info!(?from, ?to, "sync state transition");
    }

    fn sequence_gap(&self, expected: u64, actual: u64) {
        tracing::warn!(expected, actual, "sequence gap detected");
    }

    fn crossed_book(&self, best_bid: u64, best_ask: u64, sequence: u64) {
        tracing::warn!(best_bid, best_ask, sequence, "crossed book detected");
    }

    fn duplicate_order(&self, order_id: u64, sequence: u64) {
        tracing::warn!(order_id, sequence, "duplicate order id rejected");
    }

    fn unknown_order(&self, order_id: u64, sequence: u64) {
        tracing::warn!(order_id, sequence, "message referenced unknown order");
    }

    fn snapshot_installed(&self, sequence: u64, order_count: usize) {
        tracing::info!(sequence, order_count, "snapshot installed");
    }

    fn snapshot_discarded(&self, sequence: u64, state: SyncState) {
        tracing::warn!(sequence, ?state, "snapshot discarded");
    }

    fn snapshot_gap(&self, snapshot_sequence: u64, buffer_min: u64) {
        tracing::warn!(
            snapshot_sequence,
            buffer_min,
            "gap between snapshot and buffered stream"
        );
    }

    fn backfill_complete(&self, applied: usize) {
        tracing::info!(applied, "backfill complete");
    }

    fn buffer_overflow(&self, dropped_sequence: u64) {
        tracing::warn!(dropped_sequence, "message buffer overflow, dropped oldest");
    }
}
