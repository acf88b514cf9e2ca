//! plot-layout: geometry engine for 2-D plot widgets.
//!
//! Partitions a plot rectangle among title, footer, legend, four axis scales
//! and the data canvas. Painting, text shaping and event handling stay with
//! the host toolkit, which reports geometry through the traits in
//! [`widgets`].

pub mod core;
pub mod error;
pub mod interaction;
pub mod layout;
pub mod telemetry;
pub mod widgets;

pub use error::{PlotError, PlotResult};
pub use layout::{LayoutOptions, LayoutRects, PlotLayout, PlotParts};
