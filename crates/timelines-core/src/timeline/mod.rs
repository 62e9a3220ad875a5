//! Date-scale engine and event filtering.
//!
//! This module provides:
//! - Visible date window per center date and scale
//! - Ruler tick generation with primary/secondary/current emphasis
//! - Visibility and query filters over timeline events
//!
//! Everything here is pure: same inputs, same outputs, no retained state.

mod filter;
mod range;
mod ticks;

pub use filter::{filter_visible, EventFilter};
pub use range::{compute_visible_range, VisibleRange};
pub use ticks::{
    center_marker, generate_ticks, CenterMarker, Ruler, TickEmphasis, TickIter, TickMarker,
};
