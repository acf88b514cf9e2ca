//! Fixed-point negotiation of the footer height and the four axis
//! thicknesses, plus the fixed/hint dimension protocol between sibling plots.

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::core::{Axis, AxisMap, Rect};
use crate::widgets::UNBOUNDED_LENGTH;

use super::LayoutOptions;
use super::snapshot::LayoutSnapshot;

/// Dimension of one axis as published to sibling plots after a pass.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisDimension {
    /// Thickness the axis needs on its own, ignoring hints.
    pub dim: f64,
    /// Offset pushed onto the axis by title, footer or a docked legend.
    pub margin: f64,
    /// `dim` or `margin` differs from the previous pass.
    pub changed: bool,
}

pub(crate) struct NegotiationInput<'s, 'a> {
    pub snapshot: &'s LayoutSnapshot<'a>,
    /// Working rectangle after title and legend were taken out.
    pub rect: Rect,
    pub options: LayoutOptions,
    pub spacing: f64,
    pub canvas_margin: AxisMap<f64>,
    pub align_canvas: AxisMap<bool>,
    pub title_dim: f64,
    /// Margins accumulated from the title and a docked legend.
    pub axis_margin: AxisMap<f64>,
    pub previous: AxisMap<AxisDimension>,
    pub max_rounds: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct AxisNegotiation {
    pub footer_dim: f64,
    /// Thickness each scale band is drawn with.
    pub display_dims: AxisMap<f64>,
    /// Extent of the exponent index badges along their axis' cross direction.
    pub index_extents: AxisMap<f64>,
    pub margins: AxisMap<f64>,
    pub records: AxisMap<AxisDimension>,
    pub dim_changed: bool,
    pub rounds: usize,
}

/// Distance from the canvas border to each scale backbone.
pub(crate) fn backbone_offsets(
    snapshot: &LayoutSnapshot<'_>,
    options: LayoutOptions,
    canvas_margin: &AxisMap<f64>,
    align_canvas: &AxisMap<bool>,
) -> AxisMap<f64> {
    AxisMap::from_fn(|axis| {
        let mut offset = 0.0;
        if !options.contains(LayoutOptions::IGNORE_FRAMES) {
            offset += snapshot.canvas_margins[axis];
        }
        if !align_canvas[axis] {
            offset += canvas_margin[axis];
        }
        offset
    })
}

pub(crate) fn negotiate(input: &NegotiationInput<'_, '_>) -> AxisNegotiation {
    let snapshot = input.snapshot;
    let scales = &snapshot.scales;
    let frames = !input.options.contains(LayoutOptions::IGNORE_FRAMES);
    let footer_active =
        !input.options.contains(LayoutOptions::IGNORE_FOOTER) && snapshot.footer.is_present();
    let backbone = backbone_offsets(
        snapshot,
        input.options,
        &input.canvas_margin,
        &input.align_canvas,
    );
    let index_extents = AxisMap::from_fn(|axis| {
        let scale = &scales[axis];
        match scale.index_badge {
            Some(badge) if scale.enabled => {
                if axis.is_horizontal() {
                    badge.width
                } else {
                    badge.height
                }
            }
            _ => 0.0,
        }
    });

    let mut footer_dim: f64 = 0.0;
    let mut dims = AxisMap::splat(0.0_f64);
    let mut rounds = 0;
    let mut converged = false;

    while rounds < input.max_rounds.max(1) {
        rounds += 1;
        let mut done = true;

        if footer_active {
            let mut width = input.rect.width;
            if scales.left.enabled != scales.right.enabled {
                // centred on the canvas
                width -= dims.left + dims.right;
            }
            let mut d = snapshot.footer.height_for_width(width).ceil();
            if frames {
                d += 2.0 * snapshot.footer.frame_width;
            }
            if d > footer_dim {
                footer_dim = d;
                done = false;
            }
        }

        for axis in Axis::ALL {
            let scale = &scales[axis];
            let mut d = scale.dim_without_title;
            if scale.has_title() {
                let length = if scale.is_fixed() {
                    UNBOUNDED_LENGTH
                } else {
                    axis_length(input, axis, &dims, &backbone, footer_dim).floor()
                };
                d += scale.title_height_for_width(length);
            }

            if !scale.enabled {
                dims[axis] = d;
            } else if d > dims[axis] {
                dims[axis] = d;
                done = false;
            }
        }

        trace!(
            round = rounds,
            footer = footer_dim,
            left = dims.left,
            right = dims.right,
            bottom = dims.bottom,
            top = dims.top,
            "axis negotiation round"
        );

        if done {
            converged = true;
            break;
        }
    }

    if !converged {
        warn!(
            rounds,
            "line break expansion did not converge, keeping last dimensions"
        );
    }

    // Index badges of the perpendicular axes are drawn into the top and
    // right bands.
    let top_coupling = index_extents.left.max(index_extents.right);
    let right_coupling = index_extents.top.max(index_extents.bottom);
    if !scales.top.is_fixed() {
        dims.top = dims.top.max(top_coupling);
    }
    if !scales.right.is_fixed() {
        dims.right = dims.right.max(right_coupling);
    }

    let mut margins = input.axis_margin;
    if input.title_dim > 0.0 {
        margins.top += input.title_dim + input.spacing;
    }
    if footer_dim > 0.0 {
        margins.bottom += footer_dim + input.spacing;
    }

    let mut dim_changed = false;
    let records = AxisMap::from_fn(|axis| {
        let scale = &scales[axis];
        let mut dim = if scale.enabled { scale.auto_dim } else { 0.0 };
        match axis {
            Axis::Right => dim = dim.max(right_coupling),
            Axis::Top => dim = dim.max(top_coupling),
            Axis::Left | Axis::Bottom => {}
        }
        let previous = input.previous[axis];
        let changed = previous.dim != dim || previous.margin != margins[axis];
        dim_changed |= changed;
        AxisDimension {
            dim,
            margin: margins[axis],
            changed,
        }
    });

    let mut display_dims = dims;
    for axis in Axis::ALL {
        let settings = scales[axis].settings;
        if !scales[axis].is_fixed() {
            display_dims[axis] = display_dims[axis].max(settings.hint_dim);
        }
        margins[axis] = margins[axis].max(settings.hint_margin);
    }

    AxisNegotiation {
        footer_dim,
        display_dims,
        index_extents,
        margins,
        records,
        dim_changed,
        rounds,
    }
}

/// Length available to the scale on `axis`, used to wrap its title.
fn axis_length(
    input: &NegotiationInput<'_, '_>,
    axis: Axis,
    dims: &AxisMap<f64>,
    backbone: &AxisMap<f64>,
    footer_dim: f64,
) -> f64 {
    let scales = &input.snapshot.scales;
    let scale = &scales[axis];
    let mut length;

    if axis.is_horizontal() {
        length = input.rect.width - dims.left - dims.right;
        length -= scale.start + scale.end;
        length += dims.left.min(scale.start - backbone.left);
        length += dims.right.min(scale.end - backbone.right);
    } else {
        length = input.rect.height - dims.top - dims.bottom;
        length -= scale.start + scale.end;
        if dims.bottom > 0.0 {
            length += scales.bottom.tick_offset.min(scale.start - backbone.bottom);
        }
        if dims.top > 0.0 {
            length += scales.top.tick_offset.min(scale.end - backbone.top);
        }
        if footer_dim > 0.0 {
            length -= footer_dim + input.spacing;
        }
    }

    length.max(0.0)
}
