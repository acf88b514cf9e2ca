//! Collaborator contracts consumed by the layout engine.
//!
//! The engine never paints or measures text itself. It queries these traits
//! once per layout pass (see `layout::PlotParts`). Reference
//! implementations are provided for headless use and tests.

mod legend_box;
mod scale_widget;
mod text;

pub use legend_box::LegendBox;
pub use scale_widget::ScaleWidgetGeometry;
pub use text::{FontSpec, MonospaceMetrics, TextBlock, TextMetrics};

use crate::core::{Orientation, Size};

/// Length used when a label should be measured without wrapping.
pub const UNBOUNDED_LENGTH: f64 = 16_777_215.0;

/// A wrapped text label such as the plot title, the footer or an axis title.
pub trait TextLabel {
    fn is_empty(&self) -> bool;

    /// Height needed to render the text wrapped into `width`.
    fn height_for_width(&self, width: f64) -> f64;

    fn frame_width(&self) -> f64 {
        0.0
    }
}

/// Geometry reported by an axis scale widget.
pub trait ScaleGeometry {
    fn is_enabled(&self) -> bool {
        true
    }

    fn font(&self) -> &FontSpec;

    /// Distance from the widget start to the first tick position.
    fn start_border_dist(&self) -> f64;

    /// Distance from the last tick position to the widget end.
    fn end_border_dist(&self) -> f64;

    /// Gap between the backbone and the canvas-facing widget border.
    fn margin(&self) -> f64;

    /// Major tick length, or `0.0` when ticks are not drawn.
    fn tick_length(&self) -> f64;

    /// Thickness needed for a scale of the given `length`, title included.
    fn dim_for_length(&self, length: f64, font: &FontSpec) -> f64;

    fn has_title(&self) -> bool;

    fn title_height_for_width(&self, width: f64) -> f64;

    /// Size of the exponent index badge, when the scale factors one out.
    fn index_badge_size(&self) -> Option<Size> {
        None
    }
}

/// Geometry reported by a legend widget.
pub trait LegendGeometry {
    fn is_empty(&self) -> bool;

    fn frame_width(&self) -> f64;

    /// Extra extent a scroll bar adds in `orientation`.
    ///
    /// `Horizontal` is the width of the vertical scroll bar, `Vertical` the
    /// height of the horizontal one.
    fn scroll_extent(&self, orientation: Orientation) -> f64;

    fn size_hint(&self) -> Size;

    /// Preferred height for `width`, or a value `<= 0` when unknown.
    fn height_for_width(&self, width: f64) -> f64;
}
