//! Deferred layer - sections whose code arrives asynchronously
//!
//! `lazy` wraps a module loader; `suspense` is the environment side that shows
//! the fallback until the shared module future resolves.

pub mod lazy;
pub mod suspense;
pub mod view;

pub use lazy::{lazy, Lazy, Module, Render, Suspension};
pub use suspense::suspense;
pub use view::{Component, Node};
