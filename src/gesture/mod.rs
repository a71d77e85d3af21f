//! Gesture layer - confirm-by-holding interactions

pub mod long_press;

pub use long_press::{LongPress, PressEvent, PressState};
