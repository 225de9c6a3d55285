//! Offset and limit pagination shared by listing operations.

use serde::{Deserialize, Serialize};

/// Offset/limit window over an ordered listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Page {
    offset: u32,
    limit: u32,
}

impl Page {
    /// Page size used when the caller does not specify one.
    pub const DEFAULT_LIMIT: u32 = 100;

    /// Page size used for robot goal polling when unspecified.
    pub const DEFAULT_GOAL_POLL_LIMIT: u32 = 10;

    /// Creates a page skipping `offset` records and returning at most `limit`.
    #[must_use]
    pub const fn new(offset: u32, limit: u32) -> Self {
        Self { offset, limit }
    }

    /// Returns the number of records to skip.
    #[must_use]
    pub const fn offset(self) -> u32 {
        self.offset
    }

    /// Returns the maximum number of records to return.
    #[must_use]
    pub const fn limit(self) -> u32 {
        self.limit
    }

    /// Applies the window to an already ordered sequence.
    pub fn apply<T>(self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        let skip = usize::try_from(self.offset).unwrap_or(usize::MAX);
        let take = usize::try_from(self.limit).unwrap_or(usize::MAX);
        items.into_iter().skip(skip).take(take).collect()
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(0, Self::DEFAULT_LIMIT)
    }
}
