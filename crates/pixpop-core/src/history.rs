//! Bounded undo history of full-image snapshots.
//!
//! The history is a stack capped at a fixed number of entries. Pushing past
//! the cap evicts the oldest snapshot first.

use std::collections::VecDeque;

use thiserror::Error;

use crate::decode::PixelBuffer;

/// Default number of snapshots kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Returned by undo when no snapshot is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Nothing to undo")]
pub struct EmptyHistoryError;

/// Linear undo stack with FIFO eviction.
#[derive(Debug, Clone)]
pub struct UndoHistory {
    entries: VecDeque<PixelBuffer>,
    limit: usize,
}

impl Default for UndoHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl UndoHistory {
    /// Create an empty history holding at most `limit` snapshots.
    ///
    /// A limit of zero is raised to one.
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            entries: VecDeque::with_capacity(limit.min(DEFAULT_HISTORY_LIMIT)),
            limit,
        }
    }

    /// Push a snapshot. Returns the evicted oldest entry, if any.
    pub fn push(&mut self, snapshot: PixelBuffer) -> Option<PixelBuffer> {
        self.entries.push_back(snapshot);
        if self.entries.len() > self.limit {
            self.entries.pop_front()
        } else {
            None
        }
    }

    /// Remove and return the most recent snapshot.
    pub fn pop(&mut self) -> Result<PixelBuffer, EmptyHistoryError> {
        self.entries.pop_back().ok_or(EmptyHistoryError)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn marker(v: u8) -> PixelBuffer {
        PixelBuffer::filled(1, 1, [v, v, v])
    }

    #[test]
    fn test_pop_empty_history() {
        let mut history = UndoHistory::default();
        assert_eq!(history.pop(), Err(EmptyHistoryError));
        assert_eq!(EmptyHistoryError.to_string(), "Nothing to undo");
    }

    #[test]
    fn test_push_pop_is_lifo() {
        let mut history = UndoHistory::new(10);
        history.push(marker(1));
        history.push(marker(2));
        assert_eq!(history.len(), 2);
        assert_eq!(history.pop(), Ok(marker(2)));
        assert_eq!(history.pop(), Ok(marker(1)));
        assert!(history.is_empty());
    }

    #[test]
    fn test_101st_push_evicts_oldest() {
        let mut history = UndoHistory::default();
        for v in 0..100u8 {
            assert!(history.push(marker(v)).is_none());
        }
        assert_eq!(history.len(), 100);

        let evicted = history.push(marker(100));
        assert_eq!(evicted, Some(marker(0)));
        assert_eq!(history.len(), 100);

        // Oldest remaining is now 1
        let mut last = None;
        while let Ok(entry) = history.pop() {
            last = Some(entry);
        }
        assert_eq!(last, Some(marker(1)));
    }

    #[test]
    fn test_zero_limit_is_raised() {
        let mut history = UndoHistory::new(0);
        assert_eq!(history.limit(), 1);
        history.push(marker(1));
        history.push(marker(2));
        assert_eq!(history.len(), 1);
        assert_eq!(history.pop(), Ok(marker(2)));
    }

    #[test]
    fn test_clear() {
        let mut history = UndoHistory::new(3);
        history.push(marker(1));
        history.clear();
        assert!(history.is_empty());
    }

    proptest! {
        #[test]
        fn prop_length_never_exceeds_limit(limit in 1usize..16, pushes in 0usize..64) {
            let mut history = UndoHistory::new(limit);
            for i in 0..pushes {
                history.push(marker(i as u8));
                prop_assert!(history.len() <= limit);
            }
            prop_assert_eq!(history.len(), pushes.min(limit));
        }
    }
}
