//! App layer - central state management and event processing
//!
//! The App actor owns the resources, the connectivity subscription and the
//! long-press gesture; it turns their updates and UI events into render state.

pub mod actor;
pub mod details;
pub mod state;

pub use actor::{AppActor, AppContext};
pub use state::AppState;
