//! Moves the end labels of the scales into the empty plot corners so the
//! ticks, not the labels, line up with the canvas.

use crate::core::{Axis, AxisMap, Rect};

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct AlignmentInput {
    /// Distance from the canvas border to the scale backbone, per side.
    pub backbone_offset: AxisMap<f64>,
    pub align_canvas: AxisMap<bool>,
    pub start: AxisMap<f64>,
    pub end: AxisMap<f64>,
    pub tick_offset: AxisMap<f64>,
    /// Canvas frame margins, `0` on every side when frames are ignored.
    pub contents_margins: AxisMap<f64>,
}

/// Aligns `scales` to `canvas`, shrinking `canvas` where an axis is flagged
/// to align the canvas to its scale and the scale needs more room.
pub(crate) fn align_scales(input: &AlignmentInput, canvas: &mut Rect, scales: &mut AxisMap<Rect>) {
    for axis in Axis::ALL {
        if scales[axis].is_empty() {
            continue;
        }
        if axis.is_horizontal() {
            align_horizontal(input, axis, canvas, scales);
        } else {
            align_vertical(input, axis, canvas, scales);
        }
    }

    // The canvas now fits the scale with the largest border distances;
    // realign the others to it.
    for axis in Axis::ALL {
        let rect = &mut scales[axis];
        if rect.is_empty() {
            continue;
        }
        let start = input.start[axis];
        let end = input.end[axis];
        let margins = input.contents_margins;

        if axis.is_horizontal() {
            if input.align_canvas[Axis::Left] {
                rect.set_left(canvas.left() - start + margins[Axis::Left]);
            }
            if input.align_canvas[Axis::Right] {
                rect.set_right(canvas.right() + end - margins[Axis::Right]);
            }
            if input.align_canvas[axis] {
                if axis == Axis::Top {
                    rect.set_bottom(canvas.top());
                } else {
                    rect.set_top(canvas.bottom());
                }
            }
        } else {
            if input.align_canvas[Axis::Top] {
                rect.set_top(canvas.top() - start + margins[Axis::Top]);
            }
            if input.align_canvas[Axis::Bottom] {
                rect.set_bottom(canvas.bottom() + end - margins[Axis::Bottom]);
            }
            if input.align_canvas[axis] {
                if axis == Axis::Left {
                    rect.set_right(canvas.left());
                } else {
                    rect.set_left(canvas.right());
                }
            }
        }
    }
}

fn align_horizontal(input: &AlignmentInput, axis: Axis, canvas: &mut Rect, scales: &mut AxisMap<Rect>) {
    let left_scale = scales[Axis::Left];
    let right_scale = scales[Axis::Right];
    let rect = &mut scales[axis];

    let left_offset = input.backbone_offset[Axis::Left] - input.start[axis];
    if !left_scale.is_empty() {
        let dx = left_offset + left_scale.width;
        if input.align_canvas[Axis::Left] && dx < 0.0 {
            // the axis needs more room than the left scale offers
            canvas.set_left(canvas.left().max(rect.left() - dx));
        } else {
            rect.set_left((rect.left() + left_offset).max(left_scale.left()));
        }
    } else if input.align_canvas[Axis::Left] && left_offset < 0.0 {
        canvas.set_left(canvas.left().max(rect.left() - left_offset));
    } else if left_offset > 0.0 {
        rect.set_left(rect.left() + left_offset);
    }

    let right_offset = input.backbone_offset[Axis::Right] - input.end[axis];
    if !right_scale.is_empty() {
        let dx = right_offset + right_scale.width;
        if input.align_canvas[Axis::Right] && dx < 0.0 {
            canvas.set_right(canvas.right().min(rect.right() + dx));
        }
        rect.set_right((rect.right() - right_offset).min(right_scale.right()));
    } else if input.align_canvas[Axis::Right] && right_offset < 0.0 {
        canvas.set_right(canvas.right().min(rect.right() + right_offset));
    } else if right_offset > 0.0 {
        rect.set_right(rect.right() - right_offset);
    }
}

fn align_vertical(input: &AlignmentInput, axis: Axis, canvas: &mut Rect, scales: &mut AxisMap<Rect>) {
    let bottom_scale = scales[Axis::Bottom];
    let top_scale = scales[Axis::Top];
    let rect = &mut scales[axis];

    let bottom_offset = input.backbone_offset[Axis::Bottom] - input.end[axis];
    if !bottom_scale.is_empty() {
        let dy = bottom_offset + bottom_scale.height;
        if input.align_canvas[Axis::Bottom] && dy < 0.0 {
            canvas.set_bottom(canvas.bottom().min(rect.bottom() + dy));
        } else {
            let max_bottom = bottom_scale.top() + input.tick_offset[Axis::Bottom];
            rect.set_bottom((rect.bottom() - bottom_offset).min(max_bottom));
        }
    } else if input.align_canvas[Axis::Bottom] && bottom_offset < 0.0 {
        canvas.set_bottom(canvas.bottom().min(rect.bottom() + bottom_offset));
    } else if bottom_offset > 0.0 {
        rect.set_bottom(rect.bottom() - bottom_offset);
    }

    let top_offset = input.backbone_offset[Axis::Top] - input.start[axis];
    if !top_scale.is_empty() {
        let dy = top_offset + top_scale.height;
        if input.align_canvas[Axis::Top] && dy < 0.0 {
            canvas.set_top(canvas.top().max(rect.top() - dy));
        } else {
            let min_top = top_scale.bottom() - input.tick_offset[Axis::Top];
            rect.set_top((rect.top() + top_offset).max(min_top));
        }
    } else if input.align_canvas[Axis::Top] && top_offset < 0.0 {
        canvas.set_top(canvas.top().max(rect.top() - top_offset));
    } else if top_offset > 0.0 {
        rect.set_top(rect.top() + top_offset);
    }
}
