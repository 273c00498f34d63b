//! Per-row action menu
//!
//! The menu owns only its overlay state. It closes itself when the delete
//! collaborator reports success; refreshing the list afterwards belongs to
//! whoever observes the page's outcomes.

use crate::error::ViewError;
use busline_model::{DeleteError, RecordId};

/// Overlay state of an action menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Closed,
    Open,
    /// Delete requested and not yet answered; the overlay stays pinned open
    Deleting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionMenu {
    record_id: RecordId,
    state: MenuState,
    last_error: Option<DeleteError>,
}

impl ActionMenu {
    /// Fresh menu bound to a record, always closed
    #[inline]
    #[must_use]
    pub fn new(record_id: RecordId) -> Self {
        Self {
            record_id,
            state: MenuState::Closed,
            last_error: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn record_id(&self) -> RecordId {
        self.record_id
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> MenuState {
        self.state
    }

    #[inline]
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state != MenuState::Closed
    }

    /// Failure from the most recent delete attempt, if any
    #[inline]
    #[must_use]
    pub fn last_error(&self) -> Option<&DeleteError> {
        self.last_error.as_ref()
    }

    pub fn open(&mut self) {
        if self.state == MenuState::Closed {
            self.state = MenuState::Open;
        }
    }

    /// Dismiss the overlay; ignored while a delete is outstanding
    pub fn close(&mut self) {
        if self.state == MenuState::Open {
            self.state = MenuState::Closed;
        }
    }

    /// Select the delete action
    ///
    /// Returns the record to delete; the caller runs the actual request.
    ///
    /// # Errors
    /// - `ViewError::MenuClosed` if the overlay is not open
    /// - `ViewError::DeleteInProgress` if a delete is already outstanding
    pub fn begin_delete(&mut self) -> Result<RecordId, ViewError> {
        match self.state {
            MenuState::Closed => Err(ViewError::MenuClosed(self.record_id)),
            MenuState::Deleting => Err(ViewError::DeleteInProgress(self.record_id)),
            MenuState::Open => {
                self.state = MenuState::Deleting;
                self.last_error = None;
                Ok(self.record_id)
            }
        }
    }

    /// Apply the collaborator's answer: close on success, stay open on failure
    pub fn finish_delete(&mut self, result: &Result<(), DeleteError>) {
        match result {
            Ok(()) => {
                self.state = MenuState::Closed;
                self.last_error = None;
            }
            Err(err) => {
                self.state = MenuState::Open;
                self.last_error = Some(err.clone());
            }
        }
    }
}
