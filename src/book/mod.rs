//! Order book module: arena storage, balanced price-level trees, and the
//! book aggregate.
//!
//! ## Architecture
//!
//! - [`OrderNode`]: wrapper around an order with linked-list keys for its
//!   price level queue
//! - [`PriceLevel`]: all orders resting at one price, FIFO
//! - [`LevelTree`]: per-side AVL tree of price levels in a slab arena
//! - [`OrderBook`]: both trees, the order arena, the order index, and the
//!   sequence-gated mutation contract
//! - [`SharedBook`]: cloneable readers-writer handle for concurrent queries
//!
//! ## Performance
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | Open | O(log n) |
//! | Change/Match/Done by id | O(log n) |
//! | Best bid/ask | O(log n) |
//! | Depth (k levels) | O(log n + k) |

pub mod book;
pub mod level;
pub mod node;
pub mod shared;
pub mod tree;

pub use book::OrderBook;
pub use level::PriceLevel;
pub use node::OrderNode;
pub use shared::SharedBook;
pub use tree::{Direction, LevelIter, LevelTree};
