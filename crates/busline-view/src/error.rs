//! Error types for the search view
//!
//! Fetch failures never show up here: they degrade the view instead of
//! propagating. These errors cover misuse of the page API.

use crate::phase::ResultPhase;
use busline_model::{Category, PageRequestError, RecordId};

/// Search view error type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
    /// Phase change not in the transition table
    #[error("illegal transition: {from:?} -> {to:?}")]
    IllegalTransition { from: ResultPhase, to: ResultPhase },

    /// Value is not one of the listed lines
    #[error("unknown bus line: {0}")]
    UnknownCategory(Category),

    /// Line list has not arrived or failed to load
    #[error("bus lines are not available yet")]
    CategoriesUnavailable,

    /// No visible row carries this record
    #[error("no row for record {0}")]
    UnknownRecord(RecordId),

    /// Menu action needs an open overlay
    #[error("action menu for {0} is closed")]
    MenuClosed(RecordId),

    /// Delete already outstanding for this row
    #[error("delete already in progress for {0}")]
    DeleteInProgress(RecordId),

    /// Configured page window is unusable
    #[error("invalid page configuration: {0}")]
    InvalidPage(#[from] PageRequestError),
}
