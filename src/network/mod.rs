//! Network layer - the remote data service behind reference collections
//!
//! `RestService` talks to the managed backend; `MemoryService` serves the
//! same queries from in-process tables.

pub mod client;
pub mod memory;

use futures_util::future::BoxFuture;
use serde_json::Value;

use crate::error::FetchError;
use crate::resource::CollectionQuery;

pub use client::RestService;
pub use memory::MemoryService;

/// Raw rows of a collection; `None` when the service returned no body
pub type Rows = Option<Vec<Value>>;

/// Remote data service reachable by named collection queries
pub trait DataService: Send + Sync + 'static {
    /// Issue a query. The returned future owns everything it needs.
    fn select(&self, query: &CollectionQuery) -> BoxFuture<'static, Result<Rows, FetchError>>;
}
