//! Provider contracts
//!
//! The search view talks to the backend only through these three traits, so
//! the HTTP client, the scripted test providers and mocks are interchangeable.

use crate::category::Category;
use crate::error::{DeleteError, FetchError};
use crate::page::{PageRequest, RecordPage};
use crate::record::RecordId;
use async_trait::async_trait;

/// Source of the full set of selectable lines
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait CategoryProvider: Send + Sync {
    /// Fetch every valid category
    ///
    /// Idempotent read with no parameters. Order carries no meaning.
    async fn list_categories(&self) -> Result<Vec<Category>, FetchError>;
}

/// Source of records filtered by line
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait RecordProvider: Send + Sync {
    /// Fetch one page of records belonging to `category`
    ///
    /// Callers must not pass the unselected sentinel; providers trust that
    /// gating has already happened and do not re-check membership.
    async fn list_records_by_category(
        &self,
        category: &Category,
        page: PageRequest,
    ) -> Result<RecordPage, FetchError>;
}

/// The destructive action behind a row's menu
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait RecordDeleter: Send + Sync {
    /// Delete a record by ID
    async fn delete_record(&self, id: RecordId) -> Result<(), DeleteError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;
    use std::sync::Arc;

    #[tokio::test]
    async fn traits_are_object_safe() {
        let mut categories = MockCategoryProvider::new();
        categories
            .expect_list_categories()
            .returning(|| Ok(vec![Category::new("12")]));
        let categories: Arc<dyn CategoryProvider> = Arc::new(categories);
        assert_eq!(categories.list_categories().await.unwrap().len(), 1);

        let mut records = MockRecordProvider::new();
        records
            .expect_list_records_by_category()
            .withf(|category, page| category.as_str() == "12" && page.offset() == 0)
            .returning(|_, _| Ok(RecordPage::from_window(vec![Record::new("a")], 1, 0)));
        let records: Arc<dyn RecordProvider> = Arc::new(records);
        let page = records
            .list_records_by_category(&Category::new("12"), PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.len(), 1);
        assert!(!page.has_more);
    }
}
