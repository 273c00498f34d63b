//! Category selector
//!
//! A controlled single-choice control: it knows the options but never owns
//! the selected value. The page passes the current value in when rendering and
//! receives choices back from [`CategorySelector::choose`].

use crate::error::ViewError;
use crate::render::{SelectorOption, SelectorView};
use busline_model::{Category, FetchError};
use std::sync::Arc;

/// Load status of the option list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorStatus {
    /// Line list not yet fetched
    Loading,
    /// Options available
    Ready(Arc<Vec<Category>>),
    /// Fetch failed; the control degrades to an empty set
    Unavailable(FetchError),
}

#[derive(Debug, Clone)]
pub struct CategorySelector {
    status: SelectorStatus,
}

impl CategorySelector {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            status: SelectorStatus::Loading,
        }
    }

    #[inline]
    #[must_use]
    pub fn status(&self) -> &SelectorStatus {
        &self.status
    }

    /// Options to render; empty while loading or after a failure
    #[must_use]
    pub fn options(&self) -> &[Category] {
        match &self.status {
            SelectorStatus::Ready(list) => list.as_slice(),
            SelectorStatus::Loading | SelectorStatus::Unavailable(_) => &[],
        }
    }

    pub(crate) fn begin_reload(&mut self) {
        self.status = SelectorStatus::Loading;
    }

    pub(crate) fn load(&mut self, result: Result<Arc<Vec<Category>>, FetchError>) {
        self.status = match result {
            Ok(list) => {
                tracing::info!(count = list.len(), "bus lines loaded");
                SelectorStatus::Ready(list)
            }
            Err(err) => {
                tracing::warn!(error = %err, retryable = err.is_retryable(), "bus lines unavailable");
                SelectorStatus::Unavailable(err)
            }
        };
    }

    /// Resolve a user choice to one of the listed lines
    ///
    /// A blank value is always accepted and means "clear the selection".
    ///
    /// # Errors
    /// - `ViewError::CategoriesUnavailable` while the list is still loading
    /// - `ViewError::UnknownCategory` if `value` is not a listed line
    pub fn choose(&self, value: &str) -> Result<Category, ViewError> {
        let wanted = Category::new(value);
        if !wanted.is_selected() {
            return Ok(wanted);
        }
        if matches!(self.status, SelectorStatus::Loading) {
            return Err(ViewError::CategoriesUnavailable);
        }
        self.options()
            .iter()
            .find(|option| **option == wanted)
            .cloned()
            .ok_or(ViewError::UnknownCategory(wanted))
    }

    /// Snapshot for rendering with `selected` marked
    #[must_use]
    pub fn render(&self, selected: &Category) -> SelectorView {
        match &self.status {
            SelectorStatus::Loading => SelectorView::Loading,
            SelectorStatus::Ready(_) | SelectorStatus::Unavailable(_) => SelectorView::Choice {
                selected: selected.is_selected().then(|| selected.clone()),
                options: self
                    .options()
                    .iter()
                    .map(|category| SelectorOption {
                        selected: category == selected,
                        category: category.clone(),
                    })
                    .collect(),
                degraded: matches!(self.status, SelectorStatus::Unavailable(_)),
            },
        }
    }
}

impl Default for CategorySelector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use busline_test_utils::lines;

    fn ready(names: &[&str]) -> CategorySelector {
        let mut selector = CategorySelector::new();
        selector.load(Ok(Arc::new(lines(names))));
        selector
    }

    #[test]
    fn choosing_while_loading_is_rejected() {
        let selector = CategorySelector::new();
        assert_eq!(selector.choose("12"), Err(ViewError::CategoriesUnavailable));
        assert_eq!(selector.choose(""), Ok(Category::unselected()));
    }

    #[test]
    fn choose_only_listed_lines() {
        let selector = ready(&["12", "34"]);
        assert_eq!(selector.choose(" 34 "), Ok(Category::new("34")));
        assert_eq!(
            selector.choose("99"),
            Err(ViewError::UnknownCategory(Category::new("99")))
        );
    }

    #[test]
    fn failure_degrades_to_empty_options() {
        let mut selector = CategorySelector::new();
        selector.load(Err(FetchError::Transport("down".into())));
        assert!(selector.options().is_empty());
        assert!(matches!(selector.status(), SelectorStatus::Unavailable(_)));
        assert!(matches!(
            selector.render(&Category::unselected()),
            SelectorView::Choice { degraded: true, .. }
        ));
    }

    #[test]
    fn render_marks_controlled_value() {
        let selector = ready(&["12", "34"]);
        let SelectorView::Choice { selected, options, degraded } =
            selector.render(&Category::new("34"))
        else {
            panic!("expected choice");
        };
        assert_eq!(selected, Some(Category::new("34")));
        assert!(!degraded);
        let marked: Vec<_> = options.iter().filter(|o| o.selected).collect();
        assert_eq!(marked.len(), 1);
        assert_eq!(marked[0].category, Category::new("34"));
    }
}
