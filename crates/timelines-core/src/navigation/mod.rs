//! Navigation state and the controller that owns it.
//!
//! The controller is the only writer of [`TimelineState`]: every pan,
//! zoom, selection and source change goes through one of its actions, and
//! each action that moves the view recomputes the visible range.

mod controller;
mod input;

pub use controller::{TimelineController, TimelineState};
pub use input::{Direction, Key, Modifiers, NavCommand, NavStep};
