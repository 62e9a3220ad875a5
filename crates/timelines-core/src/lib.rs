//! # Timelines Core Library
//!
//! This library provides the core logic for browsing a curated list of
//! historical events on a zoomable timeline. The CLI binary is a thin layer
//! over the same library.
//!
//! ## Architecture
//!
//! - **Date-Scale Engine**: Pure functions mapping a center date and zoom
//!   scale to a visible window and ruler ticks
//! - **Navigation**: A controller owning the view state; pans, zooms and
//!   selections go through its actions
//! - **Sources**: Local sample events plus simulated database, REST and
//!   hosted-backend sources
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`VisibleRange`]: Inclusive date window for a center date and scale
//! - [`Ruler`]: Ticks and center label for one view
//! - [`TimelineController`]: Navigation state machine
//! - [`SourceConnector`]: Merges local and remote events
//! - [`Config`]: Application configuration management

pub mod error;
pub mod event;
pub mod navigation;
pub mod scale;
pub mod source;
pub mod storage;
pub mod timeline;

pub use error::{ConfigError, CoreError, SourceError, ValidationError};
pub use event::{EventPriority, TimeType, TimelineEvent};
pub use navigation::{Direction, NavCommand, NavStep, TimelineController, TimelineState};
pub use scale::Scale;
pub use source::{
    ConnectionState, ConnectionTest, DataSourceConfig, DataSourceKind, EventBackend,
    SimulatedBackend, SimulationConfig, SourceConnector,
};
pub use storage::{Config, SourceStatus};
pub use timeline::{
    compute_visible_range, filter_visible, generate_ticks, CenterMarker, EventFilter, Ruler,
    TickEmphasis, TickMarker, VisibleRange,
};
