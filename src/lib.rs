//! # seqbook
//!
//! Sequence-consistent L3 limit order book reconstruction.
//!
//! ## Architecture
//!
//! The engine rebuilds a full order-level book from two incoherent venue
//! channels - a request/response snapshot and a live incremental stream -
//! and keeps them reconciled:
//!
//! - **Types**: messages, snapshots, orders, fixed-point prices
//! - **Book**: arena-backed AVL price-level trees, order index, and the
//!   sequence-gated mutation contract
//! - **Sync**: the buffering/backfill state machine that feeds the book
//!
//! ## Design Principles
//!
//! 1. **Determinism**: mutation is a pure function of (book state,
//!    message); identical logs rebuild identical books
//! 2. **No Floating Point**: all prices and sizes are fixed-point u64
//!    (10^8 scaling)
//! 3. **Arena Storage**: tree and order nodes live in slabs and link by
//!    index, so rebalancing is pure index reassignment
//! 4. **No Silent Corruption**: any gap or unknown reference resets the
//!    whole book rather than patching around it
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use seqbook::{
//!     BookMessage, NullObserver, SharedBook, Side, Snapshot, SyncConfig, SyncController,
//!     SyncState,
//! };
//!
//! let shared = SharedBook::new(Arc::new(NullObserver));
//! let mut controller = SyncController::new(
//!     shared.clone(),
//!     || { /* kick off a snapshot fetch */ },
//!     Arc::new(NullObserver),
//!     SyncConfig { snapshot_delay: std::time::Duration::ZERO, ..SyncConfig::default() },
//! );
//!
//! // Stream messages buffer until the snapshot arrives...
//! controller.on_message(BookMessage::Open {
//!     order_id: 1,
//!     side: Side::Bid,
//!     price: 10_000_000_000,
//!     size: 100_000_000,
//!     sequence: 42,
//! });
//! controller.on_snapshot(Snapshot::new(42));
//!
//! assert_eq!(shared.sync_state(), SyncState::Synced);
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: Order, Side, BookMessage, Snapshot, fixed-point prices
pub mod types;

/// Error taxonomy for book mutations
pub mod error;

/// Injected observer interface for diagnostics
pub mod observer;

/// Order book: arena AVL trees, order index, mutation/query contract
pub mod book;

/// Snapshot/stream synchronization state machine
pub mod sync;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use book::{Direction, LevelTree, OrderBook, PriceLevel, SharedBook};
pub use error::BookError;
pub use observer::{BookObserver, NullObserver, TracingObserver};
pub use sync::{SnapshotProvider, SyncConfig, SyncController, SyncState};
pub use types::{BookMessage, Order, Side, Snapshot, SnapshotOrder};
