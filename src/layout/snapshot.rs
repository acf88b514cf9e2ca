use crate::core::{Axis, AxisMap, Margins, Orientation, Rect, Size};
use crate::widgets::{LegendGeometry, ScaleGeometry, TextLabel, UNBOUNDED_LENGTH};

use super::LayoutOptions;

/// The live collaborators of one plot, borrowed for a layout pass.
///
/// Absent parts contribute nothing; an axis without a scale is disabled.
#[derive(Clone, Copy, Default)]
pub struct PlotParts<'a> {
    pub title: Option<&'a dyn TextLabel>,
    pub footer: Option<&'a dyn TextLabel>,
    pub legend: Option<&'a dyn LegendGeometry>,
    pub scales: AxisMap<Option<&'a dyn ScaleGeometry>>,
    pub canvas_margins: Margins,
}

impl<'a> PlotParts<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_title(mut self, title: &'a dyn TextLabel) -> Self {
        self.title = Some(title);
        self
    }

    #[must_use]
    pub fn with_footer(mut self, footer: &'a dyn TextLabel) -> Self {
        self.footer = Some(footer);
        self
    }

    #[must_use]
    pub fn with_legend(mut self, legend: &'a dyn LegendGeometry) -> Self {
        self.legend = Some(legend);
        self
    }

    #[must_use]
    pub fn with_scale(mut self, axis: Axis, scale: &'a dyn ScaleGeometry) -> Self {
        self.scales[axis] = Some(scale);
        self
    }

    #[must_use]
    pub fn with_canvas_margins(mut self, margins: Margins) -> Self {
        self.canvas_margins = margins;
        self
    }

    #[must_use]
    pub fn axis_enabled(&self, axis: Axis) -> bool {
        self.scales[axis].is_some_and(|scale| scale.is_enabled())
    }
}

/// Externally controlled dimensions of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct AxisSettings {
    /// Forced thickness including the axis title; `0` means automatic.
    pub fixed_dim: f64,
    /// Minimum thickness suggested by sibling plots.
    pub hint_dim: f64,
    /// Minimum outer margin suggested by sibling plots.
    pub hint_margin: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct LegendSnapshot {
    pub present: bool,
    pub frame_width: f64,
    pub horizontal_scroll_extent: f64,
    pub vertical_scroll_extent: f64,
    /// Preferred size fitted to the plot width.
    pub hint: Size,
    /// Unconstrained preferred size, used by the floating legend.
    pub max_hint: Size,
}

#[derive(Clone, Copy, Default)]
pub(crate) struct TextSnapshot<'a> {
    label: Option<&'a dyn TextLabel>,
    pub frame_width: f64,
}

impl TextSnapshot<'_> {
    pub fn is_present(&self) -> bool {
        self.label.is_some()
    }

    pub fn height_for_width(&self, width: f64) -> f64 {
        self.label
            .map_or(0.0, |label| label.height_for_width(width.max(0.0)))
    }
}

#[derive(Clone, Default)]
pub(crate) struct ScaleSnapshot<'a> {
    geometry: Option<&'a dyn ScaleGeometry>,
    pub enabled: bool,
    pub start: f64,
    pub end: f64,
    pub tick_offset: f64,
    /// Thickness without the axis title (fixed or measured).
    pub dim_without_title: f64,
    /// Measured thickness for unbounded length, `0` when disabled.
    pub auto_dim: f64,
    pub index_badge: Option<Size>,
    pub settings: AxisSettings,
}

impl ScaleSnapshot<'_> {
    pub fn has_title(&self) -> bool {
        self.enabled && self.geometry.is_some_and(|scale| scale.has_title())
    }

    pub fn title_height_for_width(&self, width: f64) -> f64 {
        self.geometry
            .map_or(0.0, |scale| scale.title_height_for_width(width.max(0.0)))
    }

    pub fn is_fixed(&self) -> bool {
        self.settings.fixed_dim != 0.0
    }
}

/// Collaborator state captured once at the start of `activate`.
#[derive(Clone, Default)]
pub(crate) struct LayoutSnapshot<'a> {
    pub legend: LegendSnapshot,
    pub title: TextSnapshot<'a>,
    pub footer: TextSnapshot<'a>,
    pub scales: AxisMap<ScaleSnapshot<'a>>,
    pub canvas_margins: AxisMap<f64>,
}

impl<'a> LayoutSnapshot<'a> {
    pub fn capture(
        parts: &PlotParts<'a>,
        rect: Rect,
        options: LayoutOptions,
        settings: &AxisMap<AxisSettings>,
    ) -> Self {
        Self {
            legend: capture_legend(parts.legend, rect, options),
            title: capture_text(parts.title),
            footer: capture_text(parts.footer),
            scales: AxisMap::from_fn(|axis| capture_scale(parts, axis, settings[axis])),
            canvas_margins: parts.canvas_margins.into(),
        }
    }
}

fn capture_legend(
    legend: Option<&dyn LegendGeometry>,
    rect: Rect,
    options: LayoutOptions,
) -> LegendSnapshot {
    let Some(legend) = legend else {
        return LegendSnapshot::default();
    };

    let max_hint = legend.size_hint();
    let horizontal_scroll_extent = legend.scroll_extent(Orientation::Horizontal);
    let vertical_scroll_extent = legend.scroll_extent(Orientation::Vertical);

    let mut width = max_hint.width.min(rect.width.floor());
    let mut height = legend.height_for_width(width);
    if height <= 0.0 {
        height = max_hint.height;
    }
    if !options.contains(LayoutOptions::IGNORE_SCROLLBARS) && height > rect.height {
        width += horizontal_scroll_extent;
    }

    LegendSnapshot {
        present: !legend.is_empty() && !max_hint.is_empty(),
        frame_width: legend.frame_width(),
        horizontal_scroll_extent,
        vertical_scroll_extent,
        hint: Size::new(width, height),
        max_hint,
    }
}

fn capture_text(label: Option<&dyn TextLabel>) -> TextSnapshot<'_> {
    match label {
        Some(label) if !label.is_empty() => TextSnapshot {
            label: Some(label),
            frame_width: label.frame_width(),
        },
        _ => TextSnapshot::default(),
    }
}

fn capture_scale<'a>(
    parts: &PlotParts<'a>,
    axis: Axis,
    settings: AxisSettings,
) -> ScaleSnapshot<'a> {
    let fixed = settings.fixed_dim;
    let geometry = parts.scales[axis];
    let Some(scale) = geometry.filter(|scale| scale.is_enabled()) else {
        return ScaleSnapshot {
            geometry,
            dim_without_title: fixed,
            settings,
            ..ScaleSnapshot::default()
        };
    };

    let title = if scale.has_title() {
        scale.title_height_for_width(UNBOUNDED_LENGTH)
    } else {
        0.0
    };
    let auto_dim = scale.dim_for_length(UNBOUNDED_LENGTH, scale.font());
    let dim_without_title = if fixed != 0.0 {
        fixed - title
    } else {
        auto_dim - title
    };

    ScaleSnapshot {
        geometry,
        enabled: true,
        start: scale.start_border_dist(),
        end: scale.end_border_dist(),
        tick_offset: scale.margin() + scale.tick_length(),
        dim_without_title,
        auto_dim,
        index_badge: scale.index_badge_size(),
        settings,
    }
}
