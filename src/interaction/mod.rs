//! Rectangle-selection zooming on top of the laid out canvas.

mod canvas_map;
mod zoomer;

pub use canvas_map::CanvasMap;
pub use zoomer::{
    MIN_SELECTION_SIZE, MIN_SINGLE_AXIS_SELECTION, ZoomCommand, ZoomIntervals, ZoomStack, Zoomer,
};
