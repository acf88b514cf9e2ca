use serde::{Deserialize, Serialize};

use crate::core::{Point, Rect, Size};

use super::config::LegendPosition;

/// Nine-point compass anchors for a floating legend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FloatAnchor {
    TopLeft,
    #[default]
    TopCenter,
    TopRight,
    LeftCenter,
    Center,
    RightCenter,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl FloatAnchor {
    /// Offset of a `hint`-sized legend from the top-left of `area`.
    #[must_use]
    pub fn offset(self, area: Rect, hint: Size) -> Point {
        let left = 0.0;
        let center_x = area.width / 2.0 - hint.width / 2.0;
        let right = area.width - hint.width;
        let top = 0.0;
        let center_y = area.height / 2.0 - hint.height / 2.0;
        let bottom = area.height - hint.height;

        match self {
            Self::TopLeft => Point::new(left, top),
            Self::TopCenter => Point::new(center_x, top),
            Self::TopRight => Point::new(right, top),
            Self::LeftCenter => Point::new(left, center_y),
            Self::Center => Point::new(center_x, center_y),
            Self::RightCenter => Point::new(right, center_y),
            Self::BottomLeft => Point::new(left, bottom),
            Self::BottomCenter => Point::new(center_x, bottom),
            Self::BottomRight => Point::new(right, bottom),
        }
    }
}

/// How a floating legend is positioned.
///
/// - `Preset`: recomputed from the anchor on every pass.
/// - `Fixed`: a caller-pinned offset; only clamped, never rescaled.
/// - `FreeDragged`: a dragged or programmatically placed offset that is
///   rescaled by its centre when the plot area is resized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FloatingLegend {
    Preset(FloatAnchor),
    Fixed(Point),
    FreeDragged {
        offset: Point,
        last_total: Option<Size>,
    },
}

impl Default for FloatingLegend {
    fn default() -> Self {
        Self::Preset(FloatAnchor::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct FloatingTuning {
    pub slack: f64,
    pub edge_margin: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct FloatingPlacement {
    pub rect: Rect,
    pub offset: Point,
    pub state: FloatingLegend,
}

/// Places a floating legend of size `hint` inside `area`.
///
/// Returns the legend rectangle, the resolved offset and the state to keep
/// for the next pass.
pub(crate) fn place_floating(
    state: FloatingLegend,
    area: Rect,
    hint: Size,
    tuning: FloatingTuning,
) -> FloatingPlacement {
    let total = area.size();
    let raw_offset = match state {
        FloatingLegend::Preset(anchor) => anchor.offset(area, hint),
        FloatingLegend::Fixed(offset) => offset,
        FloatingLegend::FreeDragged { offset, last_total } => match last_total {
            Some(last) => Point::new(
                renormalize_offset(
                    offset.x,
                    hint.width,
                    last.width,
                    total.width,
                    tuning.edge_margin,
                ),
                renormalize_offset(
                    offset.y,
                    hint.height,
                    last.height,
                    total.height,
                    tuning.edge_margin,
                ),
            ),
            None => offset,
        },
    };

    let x = clamp_to_slack(
        area.left() + raw_offset.x,
        area.left(),
        area.right(),
        hint.width,
        tuning.slack,
    );
    let y = clamp_to_slack(
        area.top() + raw_offset.y,
        area.top(),
        area.bottom(),
        hint.height,
        tuning.slack,
    );
    let offset = Point::new(x - area.left(), y - area.top());

    let state = match state {
        FloatingLegend::Preset(anchor) => FloatingLegend::Preset(anchor),
        FloatingLegend::Fixed(_) => FloatingLegend::Fixed(offset),
        FloatingLegend::FreeDragged { .. } => FloatingLegend::FreeDragged {
            offset,
            last_total: Some(total),
        },
    };

    FloatingPlacement {
        rect: Rect::new(x, y, hint.width, hint.height),
        offset,
        state,
    }
}

/// Rescales one offset component after the plot area changed from
/// `old_total` to `new_total`.
///
/// A legend that sits past the far edge is shifted by the size delta, one
/// hugging the near edge is left alone, anything else keeps its centre ratio.
fn renormalize_offset(
    offset: f64,
    hint: f64,
    old_total: f64,
    new_total: f64,
    edge_margin: f64,
) -> f64 {
    if old_total <= 0.0 || old_total == new_total {
        return offset;
    }

    let past_far_edge = offset + hint + edge_margin > old_total;
    let near_edge = offset < edge_margin;
    if past_far_edge {
        offset + (new_total - old_total)
    } else if !near_edge {
        let center_ratio = (offset + hint / 2.0) / old_total;
        (center_ratio * new_total - hint / 2.0)
            .max(edge_margin)
            .min(new_total - hint - edge_margin)
    } else {
        offset
    }
}

/// Keeps at least `slack` pixels of a `length`-long legend inside `[near, far]`.
fn clamp_to_slack(position: f64, near: f64, far: f64, length: f64, slack: f64) -> f64 {
    position.max(near + slack - length).min(far - slack)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct DockedLegendInput {
    pub position: LegendPosition,
    pub ratio: f64,
    pub hint: Size,
    pub horizontal_scroll_extent: f64,
    pub vertical_scroll_extent: f64,
    pub ignore_scrollbars: bool,
}

/// Rectangle of an edge-docked legend, flush against its edge of `area`.
pub(crate) fn place_docked(input: DockedLegendInput, area: Rect) -> Rect {
    let hint = input.hint;
    match input.position {
        LegendPosition::Left | LegendPosition::Right => {
            let mut dim = hint.width.min((area.width * input.ratio).floor());
            if !input.ignore_scrollbars && hint.height > area.height {
                // the legend will need a vertical scroll bar
                dim += input.horizontal_scroll_extent;
            }
            let dim = dim.min(area.width).max(0.0);
            let x = if input.position == LegendPosition::Left {
                area.left()
            } else {
                area.right() - dim
            };
            Rect::new(x, area.top(), dim, area.height)
        }
        LegendPosition::Top | LegendPosition::Bottom => {
            let cap = (area.height * input.ratio).floor();
            let mut dim = hint.height.min(cap);
            if !input.ignore_scrollbars {
                // room for the horizontal scroll bar, but never past the ratio
                dim = dim.max(input.vertical_scroll_extent).min(cap);
            }
            let dim = dim.min(area.height).max(0.0);
            let y = if input.position == LegendPosition::Top {
                area.top()
            } else {
                area.bottom() - dim
            };
            Rect::new(area.left(), y, area.width, dim)
        }
        LegendPosition::Floating | LegendPosition::Hidden => Rect::EMPTY,
    }
}

/// Removes a docked legend band from `area`.
pub(crate) fn subtract_docked(area: Rect, legend: Rect, position: LegendPosition) -> Rect {
    let mut rest = area;
    match position {
        LegendPosition::Left => rest.set_left(legend.right().min(area.right())),
        LegendPosition::Right => rest.set_right(legend.left().max(area.left())),
        LegendPosition::Top => rest.set_top(legend.bottom().min(area.bottom())),
        LegendPosition::Bottom => rest.set_bottom(legend.top().max(area.top())),
        LegendPosition::Floating | LegendPosition::Hidden => {}
    }
    rest
}

/// Stretches a docked legend along the canvas when it is shorter than the canvas.
pub(crate) fn align_to_canvas(
    position: LegendPosition,
    hint: Size,
    canvas: Rect,
    legend: Rect,
) -> Rect {
    let mut aligned = legend;
    match position {
        LegendPosition::Top | LegendPosition::Bottom if hint.width < canvas.width => {
            aligned.x = canvas.x;
            aligned.width = canvas.width;
        }
        LegendPosition::Left | LegendPosition::Right if hint.height < canvas.height => {
            aligned.y = canvas.y;
            aligned.height = canvas.height;
        }
        _ => {}
    }
    aligned
}
