//! Busline Client
//!
//! Implements [`CategoryProvider`](busline_model::CategoryProvider),
//! [`RecordProvider`](busline_model::RecordProvider) and
//! [`RecordDeleter`](busline_model::RecordDeleter) against the backend REST API:
//!
//! | operation | request |
//! |---|---|
//! | list lines | `GET {prefix}/buses/` |
//! | records by line | `GET {prefix}/items/bus/{line}?skip=&limit=` |
//! | delete record | `DELETE {prefix}/items/{id}` |

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod client;
mod config;
mod error;

pub use client::BuslineClient;
pub use config::ClientConfig;
pub use error::ClientError;
