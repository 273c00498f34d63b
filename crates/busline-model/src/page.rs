//! Offset/limit paging
//!
//! The default view only ever asks for the first page, but the contract keeps
//! room for walking further with [`PageRequest::next`].

use crate::error::PageRequestError;
use crate::record::Record;
use serde::{Deserialize, Serialize};

/// Page size used by the default result view
pub const DEFAULT_PAGE_LIMIT: u32 = 20;

/// Window into a category's records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRequest {
    offset: u64,
    limit: u32,
}

impl PageRequest {
    /// Create page request
    ///
    /// # Errors
    /// - `PageRequestError::ZeroLimit` if `limit` is zero
    pub fn new(offset: u64, limit: u32) -> Result<Self, PageRequestError> {
        if limit == 0 {
            return Err(PageRequestError::ZeroLimit);
        }
        Ok(Self { offset, limit })
    }

    /// First page with the given size
    ///
    /// # Errors
    /// - `PageRequestError::ZeroLimit` if `limit` is zero
    #[inline]
    pub fn first(limit: u32) -> Result<Self, PageRequestError> {
        Self::new(0, limit)
    }

    /// The page directly after this one
    #[inline]
    #[must_use]
    pub fn next(&self) -> Self {
        Self {
            offset: self.offset.saturating_add(u64::from(self.limit)),
            limit: self.limit,
        }
    }

    #[inline]
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.offset
    }

    #[inline]
    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

/// One page of records for a category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordPage {
    /// Records in this window, in backend order
    pub items: Vec<Record>,
    /// Whether records exist past this window
    pub has_more: bool,
}

impl RecordPage {
    /// Page with no records and nothing after it
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build page from a window and the backend's total count
    #[must_use]
    pub fn from_window(items: Vec<Record>, total: u64, offset: u64) -> Self {
        let seen = offset.saturating_add(items.len() as u64);
        Self {
            has_more: seen < total,
            items,
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
