//! Snapshot/stream synchronization.
//!
//! ## Components
//!
//! - [`MessageBuffer`]: sequence-ordered bounded buffer for messages that
//!   arrive before the book is ready for them
//! - [`SyncController`]: the state machine that owns buffering, snapshot
//!   installation, gap detection, and the all-or-nothing resync policy
//! - [`SyncState`]: the externally visible lifecycle
//!   (Unsynced -> AwaitingSnapshot -> Backfilling -> Synced)
//!
//! The controller contains no tree logic; it drives [`crate::OrderBook`]
//! through its mutation contract and reacts to what comes back.

pub mod buffer;
pub mod controller;

pub use buffer::MessageBuffer;
pub use controller::{SnapshotProvider, SyncConfig, SyncController, SyncState};
