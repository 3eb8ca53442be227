//! scrollchart-rs: coordinate-mapping and scroll-viewport engine for
//! time-series charts.
//!
//! This crate is the headless core of a scrollable chart. It converts (x, y)
//! series plus a visible-window definition into screen-space geometry and
//! axis bounds, and resolves nearest-point highlights from pointer input.
//! Rendering, gesture recognition and data decoding live in host layers.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod telemetry;
pub mod viewport;

pub use api::{ChartEngine, ChartEngineConfig};
pub use error::{ChartError, ChartResult};
