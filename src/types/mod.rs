//! Core data types for the book engine.
//!
//! All prices and sizes use fixed-point representation (u64 scaled by 10^8).
//!
//! ## Types
//!
//! - [`Order`]: A resting limit order
//! - [`Side`]: Bid or Ask
//! - [`BookMessage`]: Incremental stream message (Open/Change/Match/Done)
//! - [`Snapshot`]: Point-in-time full book dump with its sequence

mod message;
mod order;
pub mod price;

// Re-export all types at module level
pub use message::{BookMessage, Snapshot, SnapshotOrder};
pub use order::{Order, Side};
