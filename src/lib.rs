//! wavescope: axis, zoom and tick engine for oscilloscope-style waveform
//! chart viewers.
//!
//! The crate owns the math and state machines behind an interactive chart:
//! axis controllers with animated pan/zoom, "nice number" tick generation,
//! multi-chart pixel layout and pointer-gesture handling. Rendering and event
//! plumbing stay with the host, which pushes sizes and pointer points in and
//! reads windows, ticks and rectangles out.

pub mod core;
pub mod error;
pub mod interaction;
pub mod telemetry;

pub use core::{AxisController, AxisModel, ChartsController, Unit};
pub use error::{ChartError, ChartResult};
