//! Message types for inter-layer communication in the actor-based architecture.
//!
//! UI events flow from the terminal loop to the App actor; render state flows back.

pub mod render;
pub mod ui_events;

pub use render::{ListEntry, ListView, RenderState};
pub use ui_events::{DatasetTab, UiEvent};
