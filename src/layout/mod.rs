//! The plot layout engine.
//!
//! [`PlotLayout::activate`] captures the collaborators in [`PlotParts`] once,
//! places title and legend, negotiates footer and axis thicknesses to a
//! fixed point, and emits a [`LayoutRects`] set.

mod axis_negotiator;
mod config;
mod engine;
mod json_contract;
mod legend_placement;
mod options;
mod rects;
mod scale_alignment;
mod snapshot;

pub use axis_negotiator::AxisDimension;
pub use config::{LayoutConfig, LegendPosition};
pub use engine::{AxisHints, PlotLayout};
pub use json_contract::{LAYOUT_RECTS_JSON_SCHEMA_V1, LayoutRectsJsonContractV1};
pub use legend_placement::{FloatAnchor, FloatingLegend};
pub use options::LayoutOptions;
pub use rects::LayoutRects;
pub use snapshot::{AxisSettings, PlotParts};
