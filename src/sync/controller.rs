//! Snapshot/stream synchronization state machine.
//!
//! ## Protocol
//!
//! The venue exposes book state through two incoherent channels: a
//! request/response snapshot and a live incremental stream that starts
//! slightly out of phase with it. The controller reconciles them:
//!
//! 1. **Unsynced**: book and buffer are clear; incoming messages are
//!    buffered. Once the configured delay from stream start has elapsed,
//!    one snapshot request goes to the provider and the controller moves to
//!    AwaitingSnapshot. The delay compensates for the venue generating
//!    snapshots behind its live stream; it is a tunable, not derived.
//! 2. **AwaitingSnapshot**: messages keep buffering. On snapshot arrival at
//!    sequence S the book is bulk-loaded. If the buffered stream starts
//!    after S+1 the book cannot be completed - full reset, no partial
//!    repair. Otherwise messages at or below S are discarded as stale.
//! 3. **Backfilling**: the surviving buffer drains in ascending sequence
//!    order through the book's mutation contract.
//! 4. **Synced**: messages apply directly as they arrive.
//!
//! Every detected inconsistency - a sequence gap at any stage, an unknown
//! order id, a snapshot/buffer gap - triggers a full reset back to
//! Unsynced. A handful of well-defined restart events beats silent,
//! hard-to-audit corruption.
//!
//! The controller processes its inputs strictly sequentially and is the
//! book's single logical writer; readers query concurrently through
//! [`SharedBook`].

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::book::SharedBook;
use crate::error::BookError;
use crate::observer::BookObserver;
use crate::sync::MessageBuffer;
use crate::types::{BookMessage, Snapshot};

// ============================================================================
// States and configuration
// ============================================================================

/// Synchronization lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncState {
    /// Book is clear; buffering while the snapshot request delay runs
    #[default]
    Unsynced,
    /// Snapshot requested; buffering until it arrives
    AwaitingSnapshot,
    /// Applying buffered messages on top of the installed snapshot
    Backfilling,
    /// Live: messages apply directly
    Synced,
}

/// External snapshot source.
///
/// `request_snapshot` is fire-and-forget: the transport adapter performs
/// the fetch on its own time and delivers the result through
/// [`SyncController::on_snapshot`]. Messages keep accumulating meanwhile.
///
/// Implemented for closures, so a test or a simple adapter can pass
/// `|| { ... }` directly.
pub trait SnapshotProvider {
    /// Ask the venue for a fresh snapshot
    fn request_snapshot(&mut self);
}

impl<F: FnMut()> SnapshotProvider for F {
    fn request_snapshot(&mut self) {
        self()
    }
}

/// Tunables for the synchronization protocol.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Delay between entering Unsynced (stream start) and issuing the
    /// snapshot request. The venue's snapshot generation lags its live
    /// stream by a small fixed offset; requesting too early yields a
    /// snapshot older than the first buffered message.
    pub snapshot_delay: Duration,

    /// Maximum number of messages buffered while waiting for a snapshot;
    /// overflow evicts the oldest.
    pub max_buffered: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            snapshot_delay: Duration::from_secs(1),
            max_buffered: 65_536,
        }
    }
}

// ============================================================================
// Controller
// ============================================================================

/// Outcome of pushing one message through the book.
enum Disposition {
    /// Mutation applied
    Applied,
    /// Message rejected but consumed; the stream continues
    Rejected,
    /// Inconsistency detected; full reset required
    Resync,
}

/// Drives the order book from the snapshot channel and the message stream.
pub struct SyncController<P: SnapshotProvider> {
    shared: SharedBook,
    provider: P,
    observer: Arc<dyn BookObserver>,
    config: SyncConfig,
    buffer: MessageBuffer,
    state: SyncState,
    /// When the current Unsynced period began; the snapshot request fires
    /// once `snapshot_delay` has elapsed from here
    unsynced_at: Instant,
}

impl<P: SnapshotProvider> SyncController<P> {
    /// Create a controller starting in Unsynced over the given shared book
    pub fn new(
        shared: SharedBook,
        provider: P,
        observer: Arc<dyn BookObserver>,
        config: SyncConfig,
    ) -> Self {
        let buffer = MessageBuffer::new(config.max_buffered);
        shared.set_sync_state(SyncState::Unsynced);
        Self {
            shared,
            provider,
            observer,
            config,
            buffer,
            state: SyncState::Unsynced,
            unsynced_at: Instant::now(),
        }
    }

    /// Current state of the machine
    #[inline]
    pub fn state(&self) -> SyncState {
        self.state
    }

    /// Number of currently buffered messages
    #[inline]
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Clone of the shared book handle for query consumers
    pub fn book(&self) -> SharedBook {
        self.shared.clone()
    }

    /// Feed one stream message into the machine.
    pub fn on_message(&mut self, message: BookMessage) {
        match self.state {
            SyncState::Unsynced => {
                self.buffer_message(message);
                if self.unsynced_at.elapsed() >= self.config.snapshot_delay {
                    self.provider.request_snapshot();
                    self.transition(SyncState::AwaitingSnapshot);
                }
            }
            SyncState::AwaitingSnapshot | SyncState::Backfilling => {
                self.buffer_message(message);
            }
            SyncState::Synced => {
                let sequence = message.sequence();
                let result = self.shared.write().apply(&message);
                if let Disposition::Resync = self.dispose(result, sequence) {
                    self.resync();
                }
            }
        }
    }

    /// Deliver a snapshot from the provider.
    ///
    /// Accepted only in AwaitingSnapshot; a response from a superseded
    /// request cycle that arrives in any other state is dropped.
    pub fn on_snapshot(&mut self, snapshot: Snapshot) {
        if self.state != SyncState::AwaitingSnapshot {
            self.observer.snapshot_discarded(snapshot.sequence, self.state);
            return;
        }

        let sequence = snapshot.sequence;
        self.shared.write().load_snapshot(&snapshot);
        self.observer.snapshot_installed(sequence, snapshot.order_count());

        // A buffered stream that starts after S+1 cannot complete the book:
        // restart rather than patch.
        if let Some(min) = self.buffer.min_sequence() {
            if min > sequence + 1 {
                self.observer.snapshot_gap(sequence, min);
                self.resync();
                return;
            }
        }

        self.buffer.discard_through(sequence);
        self.transition(SyncState::Backfilling);

        let mut applied = 0usize;
        while let Some(message) = self.buffer.pop_front() {
            let message_sequence = message.sequence();
            let result = self.shared.write().apply(&message);
            match self.dispose(result, message_sequence) {
                Disposition::Applied => applied += 1,
                Disposition::Rejected => {}
                Disposition::Resync => {
                    self.resync();
                    return;
                }
            }
        }

        self.observer.backfill_complete(applied);
        self.transition(SyncState::Synced);
    }

    /// Force a full reset: clear the book, the buffer, and the sequence in
    /// one exclusive operation, then start a fresh sync cycle.
    pub fn resync(&mut self) {
        self.shared.write().reset();
        self.buffer.clear();
        self.unsynced_at = Instant::now();
        self.transition(SyncState::Unsynced);
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn buffer_message(&mut self, message: BookMessage) {
        if let Some(dropped) = self.buffer.push(message) {
            self.observer.buffer_overflow(dropped);
        }
    }

    fn dispose(&self, result: Result<(), BookError>, sequence: u64) -> Disposition {
        match result {
            Ok(()) => Disposition::Applied,
            Err(BookError::DuplicateOrderId(order_id)) => {
                // Rejected but consumed: the book advanced its sequence
                self.observer.duplicate_order(order_id, sequence);
                Disposition::Rejected
            }
            Err(BookError::SequenceGap { expected, actual }) => {
                self.observer.sequence_gap(expected, actual);
                Disposition::Resync
            }
            Err(BookError::UnknownOrder(order_id)) => {
                // A reference to an order we never saw means data loss
                // upstream; the book can no longer be trusted
                self.observer.unknown_order(order_id, sequence);
                Disposition::Resync
            }
            Err(BookError::LevelNotFound(_)) => Disposition::Resync,
        }
    }

    fn transition(&mut self, to: SyncState) {
        if self.state == to {
            return;
        }
        let from = self.state;
        self.state = to;
        self.shared.set_sync_state(to);
        self.observer.sync_transition(from, to);
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
