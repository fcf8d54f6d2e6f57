//! Ordered buffer for stream messages awaiting a snapshot.
//!
//! While the controller waits for a snapshot, every incoming message lands
//! here, keyed by sequence. Backfill then drains in ascending sequence
//! order regardless of arrival order. The buffer is bounded: if a snapshot
//! takes pathologically long, the oldest message is evicted and the
//! resulting hole is caught by the normal gap checks instead of growing
//! memory without limit.

use std::collections::BTreeMap;

use crate::types::BookMessage;

/// Sequence-ordered, bounded message buffer.
#[derive(Debug)]
pub struct MessageBuffer {
    messages: BTreeMap<u64, BookMessage>,
    capacity: usize,
}

impl MessageBuffer {
    /// Create a buffer holding at most `capacity` messages
    pub fn new(capacity: usize) -> Self {
        Self {
            messages: BTreeMap::new(),
            capacity,
        }
    }

    /// Number of buffered messages
    #[inline]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Check if the buffer holds no messages
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Lowest buffered sequence number
    pub fn min_sequence(&self) -> Option<u64> {
        self.messages.keys().next().copied()
    }

    /// Buffer a message under its sequence number.
    ///
    /// A message whose sequence is already buffered is dropped (reconnects
    /// can replay; the first observation wins). If the buffer is full, the
    /// lowest-sequence message is evicted and its sequence returned.
    pub fn push(&mut self, message: BookMessage) -> Option<u64> {
        self.messages.entry(message.sequence()).or_insert(message);

        if self.messages.len() > self.capacity {
            let (evicted, _) = self.messages.pop_first().expect("over-capacity buffer is non-empty");
            return Some(evicted);
        }
        None
    }

    /// Remove and return the lowest-sequence message
    pub fn pop_front(&mut self) -> Option<BookMessage> {
        self.messages.pop_first().map(|(_, message)| message)
    }

    /// Drop every message with sequence <= `sequence`, returning how many
    /// were discarded
    pub fn discard_through(&mut self, sequence: u64) -> usize {
        let before = self.messages.len();
        self.messages = self.messages.split_off(&(sequence + 1));
        before - self.messages.len()
    }

    /// Drop everything
    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
