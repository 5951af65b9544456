//! The fixed gesture catalog the operator cycles through.
pub mod catalog;

pub use catalog::{GESTURE_COUNT, GESTURES, is_known, name, next_index};
