use tracing::{debug, trace, warn};

use crate::core::{Axis, AxisMap, Point, Rect, Size};
use crate::error::{PlotError, PlotResult};

use super::axis_negotiator::{
    AxisDimension, AxisNegotiation, NegotiationInput, backbone_offsets, negotiate,
};
use super::config::{LayoutConfig, LegendPosition};
use super::legend_placement::{
    DockedLegendInput, FloatAnchor, FloatingLegend, FloatingTuning, align_to_canvas,
    place_docked, place_floating, subtract_docked,
};
use super::scale_alignment::{AlignmentInput, align_scales};
use super::snapshot::{AxisSettings, LayoutSnapshot, PlotParts};
use super::{LayoutOptions, LayoutRects};

/// Horizontal inset of the left axis' index badge from its scale's right edge.
const LEFT_INDEX_INSET: f64 = 10.0;

/// Partitions a plot rectangle among title, footer, legend, the four scales
/// and the canvas.
///
/// One instance lives as long as its plot view. Configuration, the floating
/// legend state, per-axis fixed/hint dimensions and the dimensions published
/// by the previous pass survive [`PlotLayout::invalidate`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlotLayout {
    config: LayoutConfig,
    axis_settings: AxisMap<AxisSettings>,
    records: AxisMap<AxisDimension>,
    floating: FloatingLegend,
    legend_offset: Point,
    legend_total: Option<Size>,
    rects: LayoutRects,
    dim_changed: bool,
}

impl PlotLayout {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: LayoutConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut LayoutConfig {
        &mut self.config
    }

    /// Sets the legend position; see [`LayoutConfig::set_legend_position`].
    ///
    /// Switching to `Floating` keeps the current floating state.
    pub fn set_legend_position(&mut self, position: LegendPosition, ratio: f64) -> PlotResult<()> {
        self.config.set_legend_position(position, ratio)
    }

    #[must_use]
    pub fn legend_position(&self) -> LegendPosition {
        self.config.legend_position()
    }

    /// Clears the output rectangles and the dimension-changed flag.
    pub fn invalidate(&mut self) {
        self.rects = LayoutRects::default();
        self.dim_changed = false;
    }

    /// Forgets everything learned from previous passes: published axis
    /// dimensions, the floating legend offset and the fixed/hint settings.
    pub fn reset_state(&mut self) {
        self.invalidate();
        self.axis_settings = AxisMap::default();
        self.records = AxisMap::default();
        self.floating = FloatingLegend::default();
        self.legend_offset = Point::default();
        self.legend_total = None;
    }

    /// Runs one layout pass over `plot_rect`.
    pub fn activate(
        &mut self,
        parts: &PlotParts<'_>,
        plot_rect: Rect,
        options: LayoutOptions,
    ) -> &LayoutRects {
        self.invalidate();
        if !plot_rect.is_finite() || plot_rect.is_empty() {
            debug!(
                width = plot_rect.width,
                height = plot_rect.height,
                "skip layout of empty plot rect"
            );
            return &self.rects;
        }

        let snapshot = LayoutSnapshot::capture(parts, plot_rect, options, &self.axis_settings);
        let spacing = self.config.spacing();
        let frames = !options.contains(LayoutOptions::IGNORE_FRAMES);

        // undistributed rest of the plot rect
        let mut rect = plot_rect;
        let mut axis_margin = AxisMap::splat(0.0_f64);
        let mut axis_subtracted = AxisMap::splat(0.0_f64);

        let mut title_dim = 0.0;
        if !options.contains(LayoutOptions::IGNORE_TITLE) && snapshot.title.is_present() {
            title_dim = snapshot.title.height_for_width(rect.width).ceil();
            if frames {
                title_dim += 2.0 * snapshot.title.frame_width;
            }
            axis_subtracted.top += title_dim + spacing;
            self.rects.title = Rect::new(rect.left(), rect.top(), rect.width, title_dim);
            rect.set_top(self.rects.title.bottom() + spacing);
        }

        let position = self.config.legend_position();
        let legend_enabled = !options.contains(LayoutOptions::IGNORE_LEGEND)
            && snapshot.legend.present
            && position != LegendPosition::Hidden;
        if legend_enabled {
            if position == LegendPosition::Floating {
                self.rects.legend = self.place_floating_legend(rect, snapshot.legend.max_hint);
            } else {
                let legend = place_docked(
                    DockedLegendInput {
                        position,
                        ratio: self.config.legend_ratio(),
                        hint: snapshot.legend.hint,
                        horizontal_scroll_extent: snapshot.legend.horizontal_scroll_extent,
                        vertical_scroll_extent: snapshot.legend.vertical_scroll_extent,
                        ignore_scrollbars: options.contains(LayoutOptions::IGNORE_SCROLLBARS),
                    },
                    rect,
                );
                rect = subtract_docked(rect, legend, position);
                let (axis, consumed) = match position {
                    LegendPosition::Left => {
                        rect.set_left(rect.left() + spacing);
                        (Axis::Left, legend.width)
                    }
                    LegendPosition::Right => {
                        rect.set_right(rect.right() - spacing);
                        (Axis::Right, legend.width)
                    }
                    LegendPosition::Top => {
                        rect.set_top(rect.top() + spacing);
                        (Axis::Top, legend.height)
                    }
                    _ => {
                        rect.set_bottom(rect.bottom() - spacing);
                        (Axis::Bottom, legend.height)
                    }
                };
                axis_margin[axis] += consumed + spacing;
                axis_subtracted[axis] += consumed + spacing;
                self.rects.legend = legend;
            }
        }

        let negotiation = negotiate(&NegotiationInput {
            snapshot: &snapshot,
            rect,
            options,
            spacing,
            canvas_margin: self.canvas_margins(),
            align_canvas: self.align_canvas_flags(),
            title_dim,
            axis_margin,
            previous: self.records,
            max_rounds: self.config.max_line_break_rounds,
        });
        self.publish(&negotiation);

        let dims = negotiation.display_dims;
        let margins = negotiation.margins;

        let footer_dim = negotiation.footer_dim;
        if footer_dim > 0.0 {
            axis_subtracted.bottom += footer_dim + spacing;
            let mut footer = Rect::new(
                rect.left(),
                rect.bottom() - footer_dim,
                rect.width,
                footer_dim,
            );
            rect.set_bottom(footer.top() - spacing);

            if snapshot.scales.left.enabled != snapshot.scales.right.enabled {
                // only one y axis: centre the footer on the canvas
                footer.x = rect.left() + dims.left;
                footer.width = (rect.width - dims.left - dims.right).max(0.0);
            }
            self.rects.footer = footer;
        }

        rect.set_top(rect.top() + margins.top - axis_subtracted.top);
        rect.set_bottom(rect.bottom() - margins.bottom + axis_subtracted.bottom);
        rect.set_left(rect.left() + margins.left - axis_subtracted.left);
        rect.set_right(rect.right() - margins.right + axis_subtracted.right);

        let mut canvas = Rect::new(
            rect.left() + dims.left,
            rect.top() + dims.top,
            rect.width - dims.left - dims.right,
            rect.height - dims.top - dims.bottom,
        );

        let min_size = self.config.min_canvas_size();
        if canvas.width < min_size.width || canvas.height < min_size.height || canvas.is_empty() {
            self.collapse(parts, plot_rect);
            debug!(
                width = plot_rect.width,
                height = plot_rect.height,
                canvas_width = canvas.width,
                canvas_height = canvas.height,
                "canvas below minimum size, collapsed layout"
            );
            return &self.rects;
        }

        self.rects.scale_visible = true;
        let extents = negotiation.index_extents;
        let mut scales = AxisMap::splat(Rect::EMPTY);
        for axis in Axis::ALL {
            let dim = dims[axis];
            if dim <= 0.0 {
                continue;
            }
            let mut scale = canvas;
            match axis {
                Axis::Left => {
                    scale.x = canvas.left() - dim;
                    scale.width = dim;
                    scale.set_top(scale.top() - extents.left);
                }
                Axis::Right => {
                    scale.x = canvas.right();
                    scale.width = dim;
                    scale.set_top(scale.top() - extents.right);
                }
                Axis::Bottom => {
                    scale.y = canvas.bottom();
                    scale.height = dim;
                    scale.width += extents.bottom;
                }
                Axis::Top => {
                    scale.y = canvas.top() - dim;
                    scale.height = dim;
                }
            }
            scales[axis] = scale.normalized().intersected(plot_rect);
        }

        if options.contains(LayoutOptions::ALIGN_SCALES) {
            let input = AlignmentInput {
                backbone_offset: backbone_offsets(
                    &snapshot,
                    options,
                    &self.canvas_margins(),
                    &self.align_canvas_flags(),
                ),
                align_canvas: self.align_canvas_flags(),
                start: snapshot.scales.map(|_, scale| scale.start),
                end: snapshot.scales.map(|_, scale| scale.end),
                tick_offset: snapshot.scales.map(|_, scale| scale.tick_offset),
                contents_margins: if frames {
                    snapshot.canvas_margins
                } else {
                    AxisMap::splat(0.0)
                },
            };
            align_scales(&input, &mut canvas, &mut scales);
            for axis in Axis::ALL {
                if !scales[axis].is_empty() {
                    scales[axis] = scales[axis].normalized().intersected(plot_rect);
                }
            }
        }

        self.rects.scale_index = AxisMap::from_fn(|axis| {
            match snapshot.scales[axis].index_badge {
                Some(badge) if !scales[axis].is_empty() => index_rect(axis, scales[axis], badge),
                _ => Rect::EMPTY,
            }
        });
        self.rects.scales = scales;
        self.rects.canvas = canvas;

        if !self.rects.legend.is_empty() && position.is_docked() {
            // prefer aligning the legend to the canvas, not the whole plot
            self.rects.legend = align_to_canvas(position, snapshot.legend.hint, canvas, self.rects.legend);
        }

        debug!(
            width = plot_rect.width,
            height = plot_rect.height,
            canvas_x = canvas.x,
            canvas_y = canvas.y,
            canvas_width = canvas.width,
            canvas_height = canvas.height,
            rounds = negotiation.rounds,
            "plot layout activated"
        );
        &self.rects
    }

    fn place_floating_legend(&mut self, area: Rect, hint: Size) -> Rect {
        let placement = place_floating(
            self.floating,
            area,
            hint,
            FloatingTuning {
                slack: self.config.floating_slack,
                edge_margin: self.config.floating_edge_margin,
            },
        );
        trace!(
            x = placement.offset.x,
            y = placement.offset.y,
            "floating legend placed"
        );
        self.floating = placement.state;
        self.legend_offset = placement.offset;
        self.legend_total = Some(area.size());
        placement.rect
    }

    fn publish(&mut self, negotiation: &AxisNegotiation) {
        self.records = negotiation.records;
        if negotiation.dim_changed {
            self.dim_changed = true;
            debug!(
                left = self.records.left.dim,
                right = self.records.right.dim,
                bottom = self.records.bottom.dim,
                top = self.records.top.dim,
                "axis dimensions changed"
            );
        }
    }

    /// Degenerate terminal state: the canvas takes the whole plot and each
    /// enabled axis keeps a 1 px sliver on its edge.
    fn collapse(&mut self, parts: &PlotParts<'_>, plot_rect: Rect) {
        self.rects.title = Rect::EMPTY;
        self.rects.footer = Rect::EMPTY;
        self.rects.legend = Rect::EMPTY;
        self.rects.canvas = plot_rect;
        self.rects.scale_visible = false;

        let width = plot_rect.width.min(1.0);
        let height = plot_rect.height.min(1.0);
        for axis in Axis::ALL {
            if !parts.axis_enabled(axis) {
                continue;
            }
            let mut sliver = plot_rect;
            match axis {
                Axis::Left => sliver.width = width,
                Axis::Right => {
                    sliver.x = plot_rect.right() - width;
                    sliver.width = width;
                }
                Axis::Bottom => {
                    sliver.y = plot_rect.bottom() - height;
                    sliver.height = height;
                }
                Axis::Top => sliver.height = height,
            }
            self.rects.scales[axis] = sliver;
        }
    }

    fn canvas_margins(&self) -> AxisMap<f64> {
        AxisMap::from_fn(|axis| self.config.canvas_margin(axis))
    }

    fn align_canvas_flags(&self) -> AxisMap<bool> {
        AxisMap::from_fn(|axis| self.config.align_canvas_to_scale(axis))
    }

    #[must_use]
    pub fn rects(&self) -> &LayoutRects {
        &self.rects
    }

    #[must_use]
    pub fn title_rect(&self) -> Rect {
        self.rects.title
    }

    #[must_use]
    pub fn footer_rect(&self) -> Rect {
        self.rects.footer
    }

    #[must_use]
    pub fn legend_rect(&self) -> Rect {
        self.rects.legend
    }

    #[must_use]
    pub fn scale_rect(&self, axis: Axis) -> Rect {
        self.rects.scales[axis]
    }

    #[must_use]
    pub fn scale_index_rect(&self, axis: Axis) -> Rect {
        self.rects.scale_index[axis]
    }

    #[must_use]
    pub fn canvas_rect(&self) -> Rect {
        self.rects.canvas
    }

    /// `false` while the layout is collapsed to the canvas.
    #[must_use]
    pub fn scale_visible(&self) -> bool {
        self.rects.scale_visible
    }

    /// `true` when the last pass published dimensions that differ from the
    /// pass before; siblings should pick up the new hints.
    #[must_use]
    pub fn is_dim_changed(&self) -> bool {
        self.dim_changed
    }

    /// Dimensions published by the last pass.
    #[must_use]
    pub fn axis_dimensions(&self) -> AxisMap<AxisDimension> {
        self.records
    }

    #[must_use]
    pub fn dim_of_axis(&self, axis: Axis) -> f64 {
        self.records[axis].dim
    }

    #[must_use]
    pub fn margin_of_axis(&self, axis: Axis) -> f64 {
        self.records[axis].margin
    }

    #[must_use]
    pub fn axis_settings(&self, axis: Axis) -> AxisSettings {
        self.axis_settings[axis]
    }

    #[must_use]
    pub fn fixed_dim_of_axis(&self, axis: Axis) -> f64 {
        self.axis_settings[axis].fixed_dim
    }

    /// Forces the thickness of `axis`, title included; `0` restores auto.
    pub fn set_fixed_dim_of_axis(&mut self, axis: Axis, dim: f64) -> PlotResult<()> {
        self.axis_settings[axis].fixed_dim = validate_dim(dim, "fixed axis dimension")?;
        Ok(())
    }

    #[must_use]
    pub fn hint_dim_of_axis(&self, axis: Axis) -> f64 {
        self.axis_settings[axis].hint_dim
    }

    pub fn set_hint_dim_of_axis(&mut self, axis: Axis, dim: f64) -> PlotResult<()> {
        self.axis_settings[axis].hint_dim = validate_dim(dim, "hint axis dimension")?;
        Ok(())
    }

    #[must_use]
    pub fn hint_margin_of_axis(&self, axis: Axis) -> f64 {
        self.axis_settings[axis].hint_margin
    }

    pub fn set_hint_margin_of_axis(&mut self, axis: Axis, margin: f64) -> PlotResult<()> {
        self.axis_settings[axis].hint_margin = validate_dim(margin, "hint axis margin")?;
        Ok(())
    }

    /// Applies hints gathered from sibling plots.
    pub fn apply_hints(&mut self, hints: &AxisHints) {
        for axis in Axis::ALL {
            self.axis_settings[axis].hint_dim = hints.dims[axis];
            self.axis_settings[axis].hint_margin = hints.margins[axis];
        }
    }

    #[must_use]
    pub fn floating_legend(&self) -> FloatingLegend {
        self.floating
    }

    /// Offset of the floating legend from the working rectangle's top-left,
    /// as resolved by the last pass.
    #[must_use]
    pub fn legend_offset(&self) -> Point {
        self.legend_offset
    }

    /// Moves the floating legend by a drag delta. The result is clamped on
    /// the next pass.
    pub fn adjust_legend_offset(&mut self, dx: f64, dy: f64) {
        let offset = Point::new(self.legend_offset.x + dx, self.legend_offset.y + dy);
        self.free_drag_to(offset);
    }

    /// Places the floating legend at `(x, y)`; the offset is rescaled when
    /// the plot is resized.
    pub fn set_legend_offset(&mut self, x: f64, y: f64) {
        self.free_drag_to(Point::new(x, y));
    }

    /// Pins the floating legend at `(x, y)`; the offset is never rescaled.
    pub fn pin_legend_offset(&mut self, x: f64, y: f64) {
        self.legend_offset = Point::new(x, y);
        self.floating = FloatingLegend::Fixed(self.legend_offset);
    }

    /// Switches to a floating legend placed by `anchor`.
    pub fn set_float_anchor(&mut self, anchor: FloatAnchor) {
        self.floating = FloatingLegend::Preset(anchor);
        let ratio = self.config.legend_ratio();
        if let Err(err) = self.config.set_legend_position(LegendPosition::Floating, ratio) {
            warn!(error = %err, "keeping docked legend position");
        }
    }

    #[must_use]
    pub fn float_anchor(&self) -> Option<FloatAnchor> {
        match self.floating {
            FloatingLegend::Preset(anchor) => Some(anchor),
            _ => None,
        }
    }

    fn free_drag_to(&mut self, offset: Point) {
        self.legend_offset = offset;
        self.floating = FloatingLegend::FreeDragged {
            offset,
            last_total: self.legend_total,
        };
    }
}

fn validate_dim(value: f64, what: &str) -> PlotResult<f64> {
    if !value.is_finite() {
        return Err(PlotError::InvalidConfig(format!("{what} must be finite")));
    }
    Ok(value.max(0.0))
}

/// Exponent index badge rectangle inside `scale`.
fn index_rect(axis: Axis, scale: Rect, badge: Size) -> Rect {
    let x = match axis {
        Axis::Left => (scale.right() - badge.width - LEFT_INDEX_INSET).max(scale.left()),
        Axis::Right => scale.left(),
        Axis::Bottom => scale.right() - badge.width,
        Axis::Top => scale.right(),
    };
    Rect::new(x, scale.top(), badge.width, badge.height)
}

/// Largest published dimensions across a group of sibling plots.
///
/// Feeding the result back with [`PlotLayout::apply_hints`] and re-running
/// every pass until no plot reports [`PlotLayout::is_dim_changed`] keeps
/// the axes of all siblings aligned.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxisHints {
    pub dims: AxisMap<f64>,
    pub margins: AxisMap<f64>,
}

impl AxisHints {
    pub fn collect<'a>(layouts: impl IntoIterator<Item = &'a PlotLayout>) -> Self {
        let mut hints = Self::default();
        for layout in layouts {
            for axis in Axis::ALL {
                let record = layout.records[axis];
                hints.dims[axis] = hints.dims[axis].max(record.dim);
                hints.margins[axis] = hints.margins[axis].max(record.margin);
            }
        }
        hints
    }
}
