//! # Sazyar
//!
//! Terminal client for a construction-services marketplace, built around a
//! resilient client-side resource layer.
//!
//! ## Features
//! - Reference collections (provinces, service categories, activity types,
//!   positions) loaded into observable tri-state cells
//! - Online/offline tracking with an automatic offline notice
//! - Hold-to-confirm long-press gesture
//! - Deferred sections rendered behind a suspense fallback
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (state machine owning resources, connectivity and gestures)
//! - Resource/Network Layer (Tokio runtime)

pub mod app;
pub mod config;
pub mod connectivity;
pub mod constants;
pub mod deferred;
pub mod diagnostics;
pub mod error;
pub mod gesture;
pub mod lifecycle;
pub mod messages;
pub mod models;
pub mod network;
pub mod resource;
pub mod ui;

// Re-export commonly used types
pub use app::{AppActor, AppContext, AppState};
pub use config::AppConfig;
pub use connectivity::{ConnectivityMonitor, ConnectivitySource, ManualSource, Subscription};
pub use deferred::{lazy, suspense, Component, Lazy, Node};
pub use diagnostics::{DiagnosticSink, RecordingSink, TracingSink};
pub use error::{ConfigError, DeferredError, FetchError};
pub use gesture::{LongPress, PressEvent, PressState};
pub use messages::{RenderState, UiEvent};
pub use models::{DescribedItem, Province, ReferenceItem};
pub use network::{DataService, MemoryService, RestService};
pub use resource::{CollectionQuery, Dataset, LoadState, Resource, ResourceView};
