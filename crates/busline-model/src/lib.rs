//! Busline Model
//!
//! Domain types and provider contracts shared by the busline search stack.
//!
//! # Core Concepts
//!
//! - [`Category`]: Transit-line identifier used to filter records; empty means "nothing chosen"
//! - [`Record`]: Read-only entity displayed as a table row, addressed by [`RecordId`]
//! - [`PageRequest`] / [`RecordPage`]: Offset/limit window and the page it yields
//! - [`CategoryProvider`], [`RecordProvider`], [`RecordDeleter`]: Async seams to the backend
//!
//! # Example
//!
//! ```rust,ignore
//! use busline_model::{Category, PageRequest, RecordProvider};
//!
//! let line = Category::new("34");
//! let page = provider.list_records_by_category(&line, PageRequest::default()).await?;
//! println!("{} records, more: {}", page.len(), page.has_more);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod category;
mod error;
mod page;
mod provider;
mod record;

pub use category::Category;
pub use error::{DeleteError, FetchError, PageRequestError};
pub use page::{PageRequest, RecordPage, DEFAULT_PAGE_LIMIT};
pub use provider::{CategoryProvider, RecordDeleter, RecordProvider};
pub use record::{Record, RecordId};

#[cfg(any(test, feature = "mock"))]
pub use provider::{MockCategoryProvider, MockRecordDeleter, MockRecordProvider};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
