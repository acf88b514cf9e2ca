use serde::{Deserialize, Serialize};

use crate::core::{Axis, AxisMap, Size};
use crate::error::{PlotError, PlotResult};

/// Where the legend goes relative to the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LegendPosition {
    Left,
    Right,
    Top,
    #[default]
    Bottom,
    /// Positioned by pixel offset or a preset anchor, overlapping the plot.
    Floating,
    Hidden,
}

impl LegendPosition {
    /// Ratio used when the caller passes a ratio `<= 0`.
    #[must_use]
    pub fn default_ratio(self) -> f64 {
        match self {
            Self::Top | Self::Bottom => 0.33,
            Self::Left | Self::Right => 0.5,
            Self::Floating | Self::Hidden => 1.0,
        }
    }

    /// `true` for the four edge-docked positions.
    #[must_use]
    pub fn is_docked(self) -> bool {
        matches!(self, Self::Left | Self::Right | Self::Top | Self::Bottom)
    }
}

/// Persisted layout settings; untouched by `PlotLayout::invalidate`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    canvas_margin: AxisMap<f64>,
    align_canvas_to_scale: AxisMap<bool>,
    spacing: f64,
    legend_position: LegendPosition,
    legend_ratio: f64,
    min_canvas_size: Size,
    /// Pixels of a floating legend that always stay inside the plot.
    pub floating_slack: f64,
    /// Distance from the edges kept when a floating legend is renormalized.
    pub floating_edge_margin: f64,
    /// Upper bound on line-break expansion rounds.
    pub max_line_break_rounds: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            canvas_margin: AxisMap::splat(4.0),
            align_canvas_to_scale: AxisMap::splat(false),
            spacing: 5.0,
            legend_position: LegendPosition::Bottom,
            legend_ratio: LegendPosition::Bottom.default_ratio(),
            min_canvas_size: Size::new(40.0, 40.0),
            floating_slack: 5.0,
            floating_edge_margin: 10.0,
            max_line_break_rounds: 32,
        }
    }
}

impl LayoutConfig {
    /// Sets the margin between the scale tick ends and the canvas border.
    ///
    /// `axis == None` sets all four sides. Margins below `-1` are clamped to
    /// `-1`, which excludes the scale border distances.
    pub fn set_canvas_margin(&mut self, margin: f64, axis: Option<Axis>) -> PlotResult<()> {
        if !margin.is_finite() {
            return Err(PlotError::InvalidConfig(
                "canvas margin must be finite".to_owned(),
            ));
        }
        let margin = margin.max(-1.0);
        match axis {
            Some(axis) => self.canvas_margin[axis] = margin,
            None => self.canvas_margin = AxisMap::splat(margin),
        }
        Ok(())
    }

    #[must_use]
    pub fn canvas_margin(&self, axis: Axis) -> f64 {
        self.canvas_margin[axis]
    }

    pub fn set_align_canvas_to_scales(&mut self, on: bool) {
        self.align_canvas_to_scale = AxisMap::splat(on);
    }

    /// Aligns the ends of the perpendicular scales with the canvas border on `axis`.
    pub fn set_align_canvas_to_scale(&mut self, axis: Axis, on: bool) {
        self.align_canvas_to_scale[axis] = on;
    }

    #[must_use]
    pub fn align_canvas_to_scale(&self, axis: Axis) -> bool {
        self.align_canvas_to_scale[axis]
    }

    pub fn set_spacing(&mut self, spacing: f64) -> PlotResult<()> {
        if !spacing.is_finite() {
            return Err(PlotError::InvalidConfig("spacing must be finite".to_owned()));
        }
        self.spacing = spacing.max(0.0);
        Ok(())
    }

    #[must_use]
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Sets the legend position and its ratio of the available space.
    ///
    /// Ratios above `1.0` are clamped to `1.0`; ratios `<= 0.0` fall back to
    /// [`LegendPosition::default_ratio`]. `Hidden` keeps the current ratio.
    pub fn set_legend_position(&mut self, position: LegendPosition, ratio: f64) -> PlotResult<()> {
        if ratio.is_nan() {
            return Err(PlotError::InvalidConfig(
                "legend ratio must not be NaN".to_owned(),
            ));
        }
        let ratio = ratio.min(1.0);
        match position {
            LegendPosition::Hidden => {}
            LegendPosition::Floating => self.legend_ratio = ratio,
            _ => {
                self.legend_ratio = if ratio <= 0.0 {
                    position.default_ratio()
                } else {
                    ratio
                };
            }
        }
        self.legend_position = position;
        Ok(())
    }

    pub fn set_legend_ratio(&mut self, ratio: f64) -> PlotResult<()> {
        self.set_legend_position(self.legend_position, ratio)
    }

    #[must_use]
    pub fn legend_position(&self) -> LegendPosition {
        self.legend_position
    }

    #[must_use]
    pub fn legend_ratio(&self) -> f64 {
        self.legend_ratio
    }

    /// Below this canvas size everything but the canvas is dropped.
    pub fn set_canvas_min_size(&mut self, width: f64, height: f64) -> PlotResult<()> {
        if !width.is_finite() || !height.is_finite() {
            return Err(PlotError::InvalidConfig(
                "minimum canvas size must be finite".to_owned(),
            ));
        }
        self.min_canvas_size = Size::new(width, height);
        Ok(())
    }

    #[must_use]
    pub fn min_canvas_size(&self) -> Size {
        self.min_canvas_size
    }
}
