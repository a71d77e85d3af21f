//! Generic reference-collection loader

use std::collections::HashSet;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::watch;

use crate::diagnostics::DiagnosticSink;
use crate::error::FetchError;
use crate::lifecycle::Liveness;
use crate::models::ReferenceItem;
use crate::network::{DataService, Rows};
use crate::resource::datasets::Dataset;
use crate::resource::query::CollectionQuery;
use crate::resource::state::{LoadState, ResourceView};

/// Loads one collection for one consumer.
///
/// Each instance owns its data; nothing is shared between consumers mounting
/// the same dataset. Dropping the instance tears it down: a fetch still in
/// flight completes but its result is discarded.
pub struct Resource<T: ReferenceItem> {
    service: Arc<dyn DataService>,
    query: CollectionQuery,
    diagnostics: Arc<dyn DiagnosticSink>,
    state: Arc<watch::Sender<ResourceView<T>>>,
    liveness: Liveness,
}

impl<T: ReferenceItem> Resource<T> {
    pub fn new(
        service: Arc<dyn DataService>,
        query: CollectionQuery,
        diagnostics: Arc<dyn DiagnosticSink>,
    ) -> Self {
        let (state, _) = watch::channel(ResourceView::default());
        Resource {
            service,
            query,
            diagnostics,
            state: Arc::new(state),
            liveness: Liveness::new(),
        }
    }

    pub fn for_dataset<D>(service: Arc<dyn DataService>, diagnostics: Arc<dyn DiagnosticSink>) -> Self
    where
        D: Dataset<Item = T>,
    {
        Self::new(service, D::query(), diagnostics)
    }

    pub fn query(&self) -> &CollectionQuery {
        &self.query
    }

    /// Observable state cell; sees every transition of this instance
    pub fn subscribe(&self) -> watch::Receiver<ResourceView<T>> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> ResourceView<T> {
        self.state.borrow().clone()
    }

    /// Start a fetch. Returns false when one is already in flight or the
    /// instance has been unmounted.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn load(&self) -> bool {
        if !self.liveness.is_alive() {
            return false;
        }

        let mut issued = false;
        self.state.send_if_modified(|view| {
            if view.loading {
                return false;
            }
            view.state = LoadState::Loading;
            view.loading = true;
            issued = true;
            true
        });

        if !issued {
            tracing::debug!(collection = %self.query.collection, "Fetch already in flight");
            return false;
        }

        let fetch = self.service.select(&self.query);
        let token = self.liveness.token();
        let state = Arc::clone(&self.state);
        let diagnostics = Arc::clone(&self.diagnostics);
        let collection = self.query.collection.clone();

        tracing::info!(collection, "Loading reference collection");
        tokio::spawn(async move {
            let outcome = match fetch.await {
                Ok(rows) => decode::<T>(&collection, rows),
                Err(e) => Err(e),
            };

            let next = match outcome {
                Ok(items) => {
                    tracing::info!(collection, items = items.len(), "Reference collection ready");
                    LoadState::Ready(items)
                }
                Err(e) => {
                    diagnostics.report(&format!("loading {}", collection), &e);
                    LoadState::Failed(e)
                }
            };

            if !token.is_alive() {
                tracing::debug!(collection, "Consumer unmounted, discarding result");
                return;
            }

            state.send_modify(|view| {
                view.state = next;
                view.loading = false;
            });
        });

        true
    }

    /// Detach the consumer; later results are discarded
    pub fn unmount(&self) {
        self.liveness.revoke();
    }

    pub fn is_mounted(&self) -> bool {
        self.liveness.is_alive()
    }
}

fn decode<T: ReferenceItem>(collection: &str, rows: Rows) -> Result<Vec<T>, FetchError> {
    let rows: Vec<Value> = rows.unwrap_or_default();
    let items = rows
        .into_iter()
        .map(serde_json::from_value::<T>)
        .collect::<Result<Vec<T>, _>>()
        .map_err(|e| FetchError::Decode {
            collection: collection.to_string(),
            message: e.to_string(),
        })?;

    let mut seen = HashSet::with_capacity(items.len());
    if let Some(dup) = items.iter().find(|item| !seen.insert(item.id())) {
        tracing::warn!(collection, id = dup.id(), "Duplicate id in reference collection");
    }

    Ok(items)
}
