//! Busline View
//!
//! The filtered-query view lifecycle behind bus-line search:
//! - Loads the line list once per page and offers it as a controlled choice
//! - Turns each selection into a record query, gating the empty selection
//! - Shows prompt, loading, empty or populated results
//! - Ignores answers for lines the user has already moved away from
//! - Gives every row an action menu that closes itself after a successful delete
//!
//! # Example
//!
//! ```rust,ignore
//! use busline_view::{Providers, SearchPage, ViewConfig};
//!
//! let mut page = SearchPage::mount(&ViewConfig::new(), providers)?;
//! page.settle().await?;            // line list arrives
//! page.select("34")?;              // results go to Loading immediately
//! page.settle().await?;
//! println!("{}", page.render());
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod cache;
pub mod config;
pub mod error;
pub mod menu;
pub mod page;
pub mod phase;
pub mod render;
pub mod results;
pub mod selector;

pub use cache::CategoryCache;
pub use config::ViewConfig;
pub use error::ViewError;
pub use menu::{ActionMenu, MenuState};
pub use page::{PageOutcome, Providers, SearchPage};
pub use phase::{allowed_transitions, validate_transition, ResultPhase};
pub use render::{MenuView, PageView, ResultsView, RowView, SelectorOption, SelectorView};
pub use results::{FetchTicket, QueryState, QueryStatus, RecordQuery, ResultState, ResultView, Row};
pub use selector::{CategorySelector, SelectorStatus};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
