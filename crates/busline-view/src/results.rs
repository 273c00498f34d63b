//! Result view state machine
//!
//! [`ResultView`] turns the chosen line into a record query and decides what
//! the result area shows. It performs no I/O itself: every category change
//! yields a [`RecordQuery`] for the caller to run, and the answer comes back
//! through [`ResultView::resolve`] together with the query's [`FetchTicket`].
//!
//! Only the answer for the most recently issued ticket is applied. Answers for
//! abandoned lines are dropped whenever they arrive, so a burst of selections
//! always settles on the last one.

use crate::error::ViewError;
use crate::menu::ActionMenu;
use crate::phase::{validate_transition, ResultPhase};
use busline_model::{Category, FetchError, PageRequest, Record, RecordId, RecordPage};

/// Identity of one issued record fetch
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FetchTicket {
    category: Category,
    seq: u64,
}

impl FetchTicket {
    #[inline]
    #[must_use]
    pub fn category(&self) -> &Category {
        &self.category
    }
}

/// Record fetch the caller should run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordQuery {
    pub ticket: FetchTicket,
    pub page: PageRequest,
}

/// Table row with its action menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub record: Record,
    pub menu: ActionMenu,
}

impl Row {
    fn new(record: Record) -> Self {
        Self {
            menu: ActionMenu::new(record.id),
            record,
        }
    }
}

/// What the result area currently holds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultState {
    NoSelection,
    Loading {
        category: Category,
    },
    Empty {
        category: Category,
        /// The fetch failed and the empty state stands in for its result
        degraded: bool,
    },
    Populated {
        category: Category,
        rows: Vec<Row>,
        has_more: bool,
    },
}

impl ResultState {
    #[must_use]
    pub fn phase(&self) -> ResultPhase {
        match self {
            Self::NoSelection => ResultPhase::NoSelection,
            Self::Loading { .. } => ResultPhase::Loading,
            Self::Empty { .. } => ResultPhase::Empty,
            Self::Populated { .. } => ResultPhase::Populated,
        }
    }
}

/// Coarse query status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    Idle,
    Loading,
    Ready,
}

/// Derived (category, status, data) view of a [`ResultView`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryState<'a> {
    pub category: &'a Category,
    pub status: QueryStatus,
    /// Present once ready; may be empty
    pub data: Option<&'a [Row]>,
}

#[derive(Debug, Clone)]
pub struct ResultView {
    category: Category,
    page: PageRequest,
    next_seq: u64,
    pending: Option<FetchTicket>,
    state: ResultState,
}

impl ResultView {
    /// Create view in the no-selection state
    #[inline]
    #[must_use]
    pub fn new(page: PageRequest) -> Self {
        Self {
            category: Category::unselected(),
            page,
            next_seq: 0,
            pending: None,
            state: ResultState::NoSelection,
        }
    }

    #[inline]
    #[must_use]
    pub fn category(&self) -> &Category {
        &self.category
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> &ResultState {
        &self.state
    }

    #[inline]
    #[must_use]
    pub fn phase(&self) -> ResultPhase {
        self.state.phase()
    }

    /// Ticket of the fetch whose answer would be applied
    #[inline]
    #[must_use]
    pub fn pending(&self) -> Option<&FetchTicket> {
        self.pending.as_ref()
    }

    #[must_use]
    pub fn query_state(&self) -> QueryState<'_> {
        let (status, data) = match &self.state {
            ResultState::NoSelection => (QueryStatus::Idle, None),
            ResultState::Loading { .. } => (QueryStatus::Loading, None),
            ResultState::Empty { .. } => (QueryStatus::Ready, Some(&[][..])),
            ResultState::Populated { rows, .. } => (QueryStatus::Ready, Some(rows.as_slice())),
        };
        QueryState {
            category: &self.category,
            status,
            data,
        }
    }

    /// Visible rows; empty unless populated
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        match &self.state {
            ResultState::Populated { rows, .. } => rows,
            _ => &[],
        }
    }

    #[must_use]
    pub fn row(&self, id: RecordId) -> Option<&Row> {
        self.rows().iter().find(|row| row.record.id == id)
    }

    pub(crate) fn menu_mut(&mut self, id: RecordId) -> Option<&mut ActionMenu> {
        match &mut self.state {
            ResultState::Populated { rows, .. } => rows
                .iter_mut()
                .find(|row| row.record.id == id)
                .map(|row| &mut row.menu),
            _ => None,
        }
    }

    /// Follow a change of the chosen line
    ///
    /// The unselected sentinel is gated: it moves to the no-selection state and
    /// yields no query. Setting the line that is already chosen is a no-op,
    /// unless its last fetch failed; then it is the retry.
    ///
    /// # Errors
    /// - `ViewError::IllegalTransition` if the phase table forbids the move
    pub fn set_category(&mut self, category: &Category) -> Result<Option<RecordQuery>, ViewError> {
        if *category == self.category {
            if self.is_degraded() {
                return self.begin_fetch(category.clone()).map(Some);
            }
            return Ok(None);
        }
        if !category.is_selected() {
            self.transition(ResultState::NoSelection)?;
            self.category = Category::unselected();
            self.pending = None;
            return Ok(None);
        }
        self.begin_fetch(category.clone()).map(Some)
    }

    /// Re-run the query for the current line, discarding shown results
    ///
    /// # Errors
    /// - `ViewError::IllegalTransition` if the phase table forbids the move
    pub fn refresh(&mut self) -> Result<Option<RecordQuery>, ViewError> {
        if !self.category.is_selected() {
            return Ok(None);
        }
        self.begin_fetch(self.category.clone()).map(Some)
    }

    /// Apply a fetch answer
    ///
    /// Returns `false` when the ticket is stale and the answer was dropped.
    /// A failed fetch degrades to the empty state.
    ///
    /// # Errors
    /// - `ViewError::IllegalTransition` if the phase table forbids the move
    pub fn resolve(
        &mut self,
        ticket: &FetchTicket,
        result: Result<RecordPage, FetchError>,
    ) -> Result<bool, ViewError> {
        if self.pending.as_ref() != Some(ticket) {
            tracing::debug!(
                category = %ticket.category,
                current = %self.category,
                "dropping stale record answer"
            );
            return Ok(false);
        }

        let category = ticket.category.clone();
        let next = match result {
            Ok(page) if page.is_empty() => ResultState::Empty {
                category,
                degraded: false,
            },
            Ok(page) => ResultState::Populated {
                category,
                has_more: page.has_more,
                rows: page.items.into_iter().map(Row::new).collect(),
            },
            Err(err) => {
                tracing::warn!(
                    category = %category,
                    error = %err,
                    retryable = err.is_retryable(),
                    "record fetch failed, showing empty state"
                );
                ResultState::Empty {
                    category,
                    degraded: true,
                }
            }
        };
        self.transition(next)?;
        self.pending = None;
        Ok(true)
    }

    fn is_degraded(&self) -> bool {
        matches!(self.state, ResultState::Empty { degraded: true, .. })
    }

    fn begin_fetch(&mut self, category: Category) -> Result<RecordQuery, ViewError> {
        self.transition(ResultState::Loading {
            category: category.clone(),
        })?;
        self.next_seq += 1;
        let ticket = FetchTicket {
            category: category.clone(),
            seq: self.next_seq,
        };
        self.category = category;
        self.pending = Some(ticket.clone());
        Ok(RecordQuery {
            ticket,
            page: self.page,
        })
    }

    fn transition(&mut self, next: ResultState) -> Result<(), ViewError> {
        let (from, to) = (self.state.phase(), next.phase());
        validate_transition(from, to)?;
        tracing::debug!(?from, ?to, "result transition");
        self.state = next;
        Ok(())
    }
}

impl Default for ResultView {
    fn default() -> Self {
        Self::new(PageRequest::default())
    }
}
