//! Search page
//!
//! Top-level composition. The page owns the chosen line and wires the
//! selector to the result view. Fetches run as tokio tasks and report back
//! over an mpsc channel; the page applies one completion per
//! [`SearchPage::next_event`] call, so all state changes happen on the
//! caller's task and nothing needs locking.

use crate::cache::CategoryCache;
use crate::config::ViewConfig;
use crate::error::ViewError;
use crate::menu::MenuState;
use crate::render::{MenuView, PageView, ResultsView, RowView};
use crate::results::{FetchTicket, RecordQuery, ResultState, ResultView};
use crate::selector::{CategorySelector, SelectorStatus};
use busline_model::{
    Category, CategoryProvider, DeleteError, FetchError, RecordDeleter, RecordId, RecordPage,
    RecordProvider,
};
use std::collections::VecDeque;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Backend collaborators of a page
#[derive(Clone)]
pub struct Providers {
    pub categories: Arc<dyn CategoryProvider>,
    pub records: Arc<dyn RecordProvider>,
    pub deleter: Arc<dyn RecordDeleter>,
}

impl std::fmt::Debug for Providers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Providers").finish_non_exhaustive()
    }
}

/// Completion delivered by a background task
#[derive(Debug)]
enum PageEvent {
    CategoriesLoaded(Result<Arc<Vec<Category>>, FetchError>),
    RecordsLoaded {
        ticket: FetchTicket,
        result: Result<RecordPage, FetchError>,
    },
    DeleteFinished {
        id: RecordId,
        result: Result<(), DeleteError>,
    },
}

/// Notification for whoever owns list refresh and delete feedback
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    RecordDeleted(RecordId),
    DeleteFailed { id: RecordId, error: DeleteError },
}

#[derive(Debug)]
pub struct SearchPage {
    selected: Category,
    selector: CategorySelector,
    results: ResultView,
    providers: Providers,
    cache: CategoryCache,
    events: mpsc::UnboundedSender<PageEvent>,
    inbox: mpsc::UnboundedReceiver<PageEvent>,
    in_flight: usize,
    outcomes: VecDeque<PageOutcome>,
}

impl SearchPage {
    /// Mount a fresh page and start loading the line list
    ///
    /// # Errors
    /// - `ViewError::InvalidPage` if the configured page limit is zero
    ///
    /// # Panics
    /// Panics when called outside a Tokio runtime.
    pub fn mount(config: &ViewConfig, providers: Providers) -> Result<Self, ViewError> {
        let page = config.first_page()?;
        let (events, inbox) = mpsc::unbounded_channel();
        let mut search = Self {
            selected: Category::unselected(),
            selector: CategorySelector::new(),
            results: ResultView::new(page),
            providers,
            cache: CategoryCache::new(),
            events,
            inbox,
            in_flight: 0,
            outcomes: VecDeque::new(),
        };
        tracing::info!(page_limit = page.limit(), "search page mounted");
        search.load_categories();
        Ok(search)
    }

    /// Currently chosen line; the unselected sentinel until the user picks one
    #[inline]
    #[must_use]
    pub fn selected(&self) -> &Category {
        &self.selected
    }

    #[inline]
    #[must_use]
    pub fn selector(&self) -> &CategorySelector {
        &self.selector
    }

    #[inline]
    #[must_use]
    pub fn results(&self) -> &ResultView {
        &self.results
    }

    /// True while any background task has not reported back
    #[inline]
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.in_flight > 0
    }

    /// Choose a line by name; a blank name clears the selection
    ///
    /// Choosing the current line again does nothing, except after its fetch
    /// failed, when it fetches again.
    ///
    /// # Errors
    /// - `ViewError::CategoriesUnavailable` while the line list is loading
    /// - `ViewError::UnknownCategory` if `value` is not a listed line
    pub fn select(&mut self, value: &str) -> Result<(), ViewError> {
        let category = self.selector.choose(value)?;
        self.set_selected(category)
    }

    /// Return to the no-selection state
    ///
    /// # Errors
    /// - `ViewError::IllegalTransition` if the phase table forbids the move
    pub fn clear(&mut self) -> Result<(), ViewError> {
        self.set_selected(Category::unselected())
    }

    /// Re-fetch records for the chosen line
    ///
    /// This is the hook for the delete collaborator after a successful delete.
    ///
    /// # Errors
    /// - `ViewError::IllegalTransition` if the phase table forbids the move
    pub fn refresh(&mut self) -> Result<(), ViewError> {
        if let Some(query) = self.results.refresh()? {
            tracing::info!(category = %self.selected, "refreshing records");
            self.fetch_records(query);
        }
        Ok(())
    }

    /// Ask for the line list again after it failed to load
    ///
    /// A list that loaded successfully stays as is for the page's lifetime.
    pub fn retry_categories(&mut self) {
        if matches!(self.selector.status(), SelectorStatus::Unavailable(_)) {
            self.selector.begin_reload();
            self.load_categories();
        }
    }

    /// # Errors
    /// - `ViewError::UnknownRecord` if no visible row has this record
    pub fn open_menu(&mut self, id: RecordId) -> Result<(), ViewError> {
        self.menu_mut(id)?.open();
        Ok(())
    }

    /// # Errors
    /// - `ViewError::UnknownRecord` if no visible row has this record
    pub fn close_menu(&mut self, id: RecordId) -> Result<(), ViewError> {
        self.menu_mut(id)?.close();
        Ok(())
    }

    /// Run the delete action from a row's open menu
    ///
    /// # Errors
    /// - `ViewError::UnknownRecord` if no visible row has this record
    /// - `ViewError::MenuClosed` if the row's menu is not open
    /// - `ViewError::DeleteInProgress` if a delete is already outstanding
    pub fn delete(&mut self, id: RecordId) -> Result<(), ViewError> {
        let id = self.menu_mut(id)?.begin_delete()?;
        tracing::info!(record = %id, "deleting record");
        let deleter = Arc::clone(&self.providers.deleter);
        self.spawn(
            async move {
                let result = deleter.delete_record(id).await;
                PageEvent::DeleteFinished { id, result }
            },
            move |reason| PageEvent::DeleteFinished {
                id,
                result: Err(DeleteError::Transport(reason)),
            },
        );
        Ok(())
    }

    /// Wait for and apply the next task completion
    ///
    /// Returns `false` right away when nothing is outstanding.
    ///
    /// # Errors
    /// Propagates `ViewError` from applying the completion.
    pub async fn next_event(&mut self) -> Result<bool, ViewError> {
        if self.in_flight == 0 {
            return Ok(false);
        }
        let Some(event) = self.inbox.recv().await else {
            return Ok(false);
        };
        self.in_flight -= 1;
        self.apply(event)?;
        Ok(true)
    }

    /// Apply completions until no task is outstanding
    ///
    /// # Errors
    /// Propagates `ViewError` from applying a completion.
    pub async fn settle(&mut self) -> Result<(), ViewError> {
        while self.next_event().await? {}
        Ok(())
    }

    /// Drain notifications produced since the last call
    pub fn take_outcomes(&mut self) -> Vec<PageOutcome> {
        self.outcomes.drain(..).collect()
    }

    #[must_use]
    pub fn render(&self) -> PageView {
        let results = match self.results.state() {
            ResultState::NoSelection => ResultsView::Prompt,
            ResultState::Loading { .. } => ResultsView::Loading,
            ResultState::Empty { degraded, .. } => ResultsView::Empty {
                degraded: *degraded,
            },
            ResultState::Populated { rows, has_more, .. } => ResultsView::Table {
                rows: rows
                    .iter()
                    .enumerate()
                    .map(|(i, row)| RowView {
                        index: i + 1,
                        id: row.record.id,
                        title: row.record.title.clone(),
                        description: row.record.description.clone().unwrap_or_default(),
                        menu: match row.menu.state() {
                            MenuState::Closed => MenuView::Closed,
                            MenuState::Open => MenuView::Open,
                            MenuState::Deleting => MenuView::Deleting,
                        },
                        error: row.menu.last_error().map(ToString::to_string),
                    })
                    .collect(),
                has_more: *has_more,
            },
        };
        PageView {
            selector: self.selector.render(&self.selected),
            results,
        }
    }

    fn set_selected(&mut self, category: Category) -> Result<(), ViewError> {
        let query = self.results.set_category(&category)?;
        if category != self.selected {
            tracing::debug!(from = %self.selected, to = %category, "selection changed");
            self.selected = category;
        }
        if let Some(query) = query {
            self.fetch_records(query);
        }
        Ok(())
    }

    fn load_categories(&mut self) {
        let cache = self.cache.clone();
        let provider = Arc::clone(&self.providers.categories);
        self.spawn(
            async move { PageEvent::CategoriesLoaded(cache.get_or_fetch(provider.as_ref()).await) },
            |reason| PageEvent::CategoriesLoaded(Err(FetchError::Transport(reason))),
        );
    }

    fn fetch_records(&mut self, query: RecordQuery) {
        let provider = Arc::clone(&self.providers.records);
        let fallback = query.ticket.clone();
        self.spawn(
            async move {
                let RecordQuery { ticket, page } = query;
                let result = provider.list_records_by_category(ticket.category(), page).await;
                PageEvent::RecordsLoaded { ticket, result }
            },
            move |reason| PageEvent::RecordsLoaded {
                ticket: fallback,
                result: Err(FetchError::Transport(reason)),
            },
        );
    }

    /// Run `task` in the background and report its event
    ///
    /// Every spawned task reports exactly once. If `task` panics or is
    /// cancelled, `aborted` builds the event from the join failure instead.
    fn spawn<F, A>(&mut self, task: F, aborted: A)
    where
        F: Future<Output = PageEvent> + Send + 'static,
        A: FnOnce(String) -> PageEvent + Send + 'static,
    {
        self.in_flight += 1;
        let events = self.events.clone();
        tokio::spawn(async move {
            let event = match tokio::spawn(task).await {
                Ok(event) => event,
                Err(err) => {
                    tracing::error!(error = %err, "page task aborted");
                    aborted(format!("task aborted: {err}"))
                }
            };
            if events.send(event).is_err() {
                tracing::debug!("page dropped before task completed");
            }
        });
    }

    fn apply(&mut self, event: PageEvent) -> Result<(), ViewError> {
        match event {
            PageEvent::CategoriesLoaded(result) => self.selector.load(result),
            PageEvent::RecordsLoaded { ticket, result } => {
                self.results.resolve(&ticket, result)?;
            }
            PageEvent::DeleteFinished { id, result } => {
                match self.results.menu_mut(id) {
                    Some(menu) => menu.finish_delete(&result),
                    None => tracing::debug!(record = %id, "delete finished for a row no longer shown"),
                }
                self.outcomes.push_back(match result {
                    Ok(()) => {
                        tracing::info!(record = %id, "record deleted");
                        PageOutcome::RecordDeleted(id)
                    }
                    Err(error) => {
                        tracing::warn!(
                            record = %id,
                            error = %error,
                            retryable = error.is_retryable(),
                            "delete failed"
                        );
                        PageOutcome::DeleteFailed { id, error }
                    }
                });
            }
        }
        Ok(())
    }

    fn menu_mut(&mut self, id: RecordId) -> Result<&mut crate::menu::ActionMenu, ViewError> {
        self.results.menu_mut(id).ok_or(ViewError::UnknownRecord(id))
    }
}
