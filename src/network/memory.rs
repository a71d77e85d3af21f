//! In-process data service evaluating collection queries over fixed tables

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use parking_lot::Mutex;
use serde_json::Value;

use crate::error::FetchError;
use crate::network::{DataService, Rows};
use crate::resource::CollectionQuery;

#[derive(Default)]
pub struct MemoryService {
    tables: Mutex<HashMap<String, Vec<Value>>>,
    failures: Mutex<HashMap<String, FetchError>>,
    latency: Option<Duration>,
    calls: AtomicUsize,
}

impl MemoryService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(self, collection: impl Into<String>, rows: Vec<Value>) -> Self {
        self.set_table(collection, rows);
        self
    }

    /// Delay every response by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn set_table(&self, collection: impl Into<String>, rows: Vec<Value>) {
        self.tables.lock().insert(collection.into(), rows);
    }

    /// Make every query against `collection` fail with `error`
    pub fn fail(&self, collection: impl Into<String>, error: FetchError) {
        self.failures.lock().insert(collection.into(), error);
    }

    pub fn recover(&self, collection: &str) {
        self.failures.lock().remove(collection);
    }

    /// Number of queries issued so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DataService for MemoryService {
    fn select(&self, query: &CollectionQuery) -> BoxFuture<'static, Result<Rows, FetchError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let failure = self.failures.lock().get(&query.collection).cloned();
        let rows = self
            .tables
            .lock()
            .get(&query.collection)
            .map(|table| query.apply(table));
        let latency = self.latency;

        async move {
            if let Some(latency) = latency {
                tokio::time::sleep(latency).await;
            }
            match failure {
                Some(e) => Err(e),
                None => Ok(rows),
            }
        }
        .boxed()
    }
}
