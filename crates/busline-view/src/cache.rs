//! Per-page category cache using moka
//!
//! The line list is fetched once per page instance and then treated as
//! stable:
//! - Concurrent first loads share one provider call
//! - Failures are not cached, so an explicit retry reaches the provider again
//! - No time-based expiry or background refresh

use busline_model::{Category, CategoryProvider, FetchError};
use moka::future::Cache;
use std::collections::HashSet;
use std::sync::Arc;

const CATEGORIES_KEY: &str = "categories";

/// Category list cache scoped to one page instance
#[derive(Debug, Clone)]
pub struct CategoryCache {
    inner: Cache<&'static str, Arc<Vec<Category>>>,
}

impl CategoryCache {
    /// Create an empty cache
    ///
    /// The list is the only entry, so one slot is all a page needs.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Cache::new(1),
        }
    }

    /// Return the cached list or fetch it from `provider`
    ///
    /// Blank and duplicate names from the provider are dropped; the first
    /// occurrence keeps its position.
    ///
    /// # Errors
    /// Returns the provider's `FetchError`. Nothing is cached in that case.
    pub async fn get_or_fetch(
        &self,
        provider: &dyn CategoryProvider,
    ) -> Result<Arc<Vec<Category>>, FetchError> {
        self.inner
            .try_get_with(CATEGORIES_KEY, async move {
                let fetched = provider.list_categories().await?;
                Ok::<_, FetchError>(Arc::new(normalize(fetched)))
            })
            .await
            .map_err(|err: Arc<FetchError>| (*err).clone())
    }
}

impl Default for CategoryCache {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize(fetched: Vec<Category>) -> Vec<Category> {
    let mut seen = HashSet::with_capacity(fetched.len());
    fetched
        .into_iter()
        .filter(|category| category.is_selected() && seen.insert(category.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use busline_test_utils::{lines, ScriptedCategoryProvider};

    #[tokio::test]
    async fn second_call_uses_cache() {
        let provider = ScriptedCategoryProvider::new(lines(&["12", "34"]));
        let cache = CategoryCache::default();

        let first = cache.get_or_fetch(&provider).await.unwrap();
        let second = cache.get_or_fetch(&provider).await.unwrap();

        assert_eq!(*first, lines(&["12", "34"]));
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn concurrent_loads_share_one_call() {
        let provider = ScriptedCategoryProvider::new(Vec::new());
        let gate = provider.gate();
        let cache = CategoryCache::default();

        let (a, b, ()) = tokio::join!(
            cache.get_or_fetch(&provider),
            cache.get_or_fetch(&provider),
            async move {
                tokio::task::yield_now().await;
                gate.release(Ok(lines(&["7"])));
            }
        );

        assert_eq!(*a.unwrap(), lines(&["7"]));
        assert_eq!(*b.unwrap(), lines(&["7"]));
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let provider =
            ScriptedCategoryProvider::failing(FetchError::Transport("connection refused".into()));
        let cache = CategoryCache::default();

        for _ in 0..2 {
            let err = cache.get_or_fetch(&provider).await.unwrap_err();
            assert_eq!(err, FetchError::Transport("connection refused".into()));
        }
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn recovers_after_failure() {
        let provider = ScriptedCategoryProvider::new(lines(&["12"]));
        provider
            .gate()
            .release(Err(FetchError::Status { status: 503, message: "busy".into() }));
        let cache = CategoryCache::default();

        assert!(cache.get_or_fetch(&provider).await.is_err());
        assert_eq!(*cache.get_or_fetch(&provider).await.unwrap(), lines(&["12"]));
        assert_eq!(*cache.get_or_fetch(&provider).await.unwrap(), lines(&["12"]));
        assert_eq!(provider.calls(), 2);
    }

    #[test]
    fn normalize_drops_blanks_and_duplicates() {
        let raw = vec![
            Category::new("34"),
            Category::unselected(),
            Category::new("12"),
            Category::new("34"),
        ];
        assert_eq!(normalize(raw), lines(&["34", "12"]));
    }
}
