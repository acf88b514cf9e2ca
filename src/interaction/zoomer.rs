use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use crate::core::{Axis, AxisMap, Point, Rect, Size};
use crate::error::{PlotError, PlotResult};

use super::CanvasMap;

/// A single-axis selection narrower than this along the zoomed axis is rejected.
pub const MIN_SINGLE_AXIS_SELECTION: f64 = 15.0;
/// Accepted selections are expanded to at least this many pixels per side.
pub const MIN_SELECTION_SIZE: f64 = 20.0;

/// Ratio between the zoom base and the smallest rectangle it may be zoomed to.
const MIN_ZOOM_DIVISOR: f64 = 1.0e5;

/// Rectangles in scale coordinates; index 0 is the zoom base.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomStack {
    rects: SmallVec<[Rect; 8]>,
    index: usize,
    /// Maximum number of zoom steps above the base, `None` for unlimited.
    max_depth: Option<usize>,
}

impl ZoomStack {
    #[must_use]
    pub fn new(base: Rect) -> Self {
        let mut rects = SmallVec::new();
        rects.push(base.normalized());
        Self {
            rects,
            index: 0,
            max_depth: None,
        }
    }

    /// Re-initializes the stack with `base` united with the `current` scale
    /// rectangle, zoomed to `current` when they differ.
    pub fn set_base(&mut self, base: Rect, current: Rect) {
        self.rects.clear();
        self.rects.push(base.united(current));
        self.index = 0;
        if base != current {
            self.rects.push(current);
            self.index = 1;
        }
        trace!(depth = self.rects.len(), "zoom base reset");
    }

    #[must_use]
    pub fn base(&self) -> Rect {
        self.rects[0]
    }

    #[must_use]
    pub fn current(&self) -> Rect {
        self.rects[self.index]
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    #[must_use]
    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    #[must_use]
    pub fn is_depth_exhausted(&self) -> bool {
        self.max_depth.is_some_and(|depth| self.index >= depth)
    }

    /// Limits the number of zoom steps; zooms out and drops trailing
    /// rectangles when the stack is already deeper.
    pub fn set_max_stack_depth(&mut self, depth: Option<usize>) -> Option<Rect> {
        self.max_depth = depth;
        let depth = depth?;
        let zoom_out = (self.rects.len() - 1).saturating_sub(depth);
        if zoom_out == 0 {
            return None;
        }
        let current = self.zoom_by(-(zoom_out as isize));
        self.rects.truncate(self.index + 1);
        Some(current)
    }

    /// Pushes `rect` above the current position, discarding anything above it.
    ///
    /// Returns the new zoom rectangle, or `None` when the depth limit is
    /// reached or `rect` equals the current rectangle.
    pub fn zoom(&mut self, rect: Rect) -> Option<Rect> {
        if self.is_depth_exhausted() {
            return None;
        }
        let rect = rect.normalized();
        if rect == self.current() {
            return None;
        }
        self.rects.truncate(self.index + 1);
        self.rects.push(rect);
        self.index += 1;
        trace!(index = self.index, "zoom in");
        Some(rect)
    }

    /// Moves `offset` positions on the stack; `0` returns to the base.
    pub fn zoom_by(&mut self, offset: isize) -> Rect {
        self.index = if offset == 0 {
            0
        } else {
            let last = self.rects.len() - 1;
            self.index.saturating_add_signed(offset).min(last)
        };
        trace!(index = self.index, offset, "zoom step");
        self.current()
    }

    /// Replaces the whole stack. `index == None` or out of range selects the top.
    pub fn set_zoom_stack(
        &mut self,
        rects: impl IntoIterator<Item = Rect>,
        index: Option<usize>,
    ) -> PlotResult<Option<Rect>> {
        let rects: SmallVec<[Rect; 8]> = rects.into_iter().collect();
        if rects.is_empty() {
            return Err(PlotError::InvalidData("zoom stack must not be empty".to_owned()));
        }
        if let Some(depth) = self.max_depth.filter(|&depth| rects.len() > depth) {
            return Err(PlotError::InvalidData(format!(
                "zoom stack of {} rects exceeds max depth {depth}",
                rects.len()
            )));
        }

        let last = rects.len() - 1;
        let index = index.filter(|&index| index <= last).unwrap_or(last);
        let changed = rects[index] != self.current();
        self.rects = rects;
        self.index = index;
        Ok(changed.then(|| self.current()))
    }

    pub fn move_by(&mut self, dx: f64, dy: f64) -> Option<Rect> {
        let current = self.current();
        self.move_to(Point::new(current.left() + dx, current.top() + dy))
    }

    /// Moves the current rectangle to `pos`, limited by the zoom base.
    pub fn move_to(&mut self, pos: Point) -> Option<Rect> {
        let base = self.base();
        let current = self.current();
        let x = pos.x.min(base.right() - current.width).max(base.left());
        let y = pos.y.min(base.bottom() - current.height).max(base.top());
        if x == current.left() && y == current.top() {
            return None;
        }
        self.rects[self.index].move_to(x, y);
        Some(self.current())
    }

    /// Smallest size the zoom rectangle may shrink to.
    #[must_use]
    pub fn min_zoom_size(&self) -> Size {
        let base = self.base();
        Size::new(base.width / MIN_ZOOM_DIVISOR, base.height / MIN_ZOOM_DIVISOR)
    }
}

/// Navigation on the zoom stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoomCommand {
    /// Back to the zoom base.
    Home,
    /// One step out.
    Undo,
    /// One step back in.
    Redo,
}

/// Scale intervals the host applies after a zoom transition.
///
/// `None` leaves the scales of that direction untouched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomIntervals {
    pub x: Option<(f64, f64)>,
    pub y: Option<(f64, f64)>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Selection {
    start: Point,
    end: Point,
}

impl Selection {
    fn rect(self) -> Rect {
        Rect::from_points(self.start, self.end)
    }
}

/// Rubber-band zoom controller layered on the canvas geometry.
///
/// Pixel positions are in canvas coordinates. Transitions that change the
/// zoom return the new zoom rectangle in scale coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Zoomer {
    stack: ZoomStack,
    axis_enabled: AxisMap<bool>,
    selection: Option<Selection>,
    finished: bool,
}

impl Zoomer {
    #[must_use]
    pub fn new(base: Rect) -> Self {
        Self {
            stack: ZoomStack::new(base),
            axis_enabled: AxisMap::splat(true),
            selection: None,
            finished: false,
        }
    }

    #[must_use]
    pub fn stack(&self) -> &ZoomStack {
        &self.stack
    }

    pub fn stack_mut(&mut self) -> &mut ZoomStack {
        &mut self.stack
    }

    /// Disabling an axis of a direction turns off zooming along it.
    pub fn set_axis_enabled(&mut self, axis: Axis, on: bool) {
        self.axis_enabled[axis] = on;
    }

    #[must_use]
    pub fn is_axis_enabled(&self, axis: Axis) -> bool {
        self.axis_enabled[axis]
    }

    #[must_use]
    pub fn zooms_x(&self) -> bool {
        self.axis_enabled[Axis::Bottom] && self.axis_enabled[Axis::Top]
    }

    #[must_use]
    pub fn zooms_y(&self) -> bool {
        self.axis_enabled[Axis::Left] && self.axis_enabled[Axis::Right]
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.selection.is_some()
    }

    /// Whether a new selection may start: the depth limit is not reached
    /// and the current rectangle is larger than the minimum zoom size.
    #[must_use]
    pub fn can_begin(&self) -> bool {
        if self.stack.is_depth_exhausted() {
            return false;
        }
        let min = self.stack.min_zoom_size();
        if min.is_empty() {
            return true;
        }
        let current = self.stack.current().size();
        let width = current.width * 0.9999;
        let height = current.height * 0.9999;
        !(min.width >= width && min.height >= height)
    }

    /// Starts a selection at `pos`. Returns `false` when zooming is blocked.
    pub fn press(&mut self, pos: Point) -> bool {
        if !self.can_begin() {
            trace!("zoom selection rejected at begin");
            return false;
        }
        self.selection = Some(Selection {
            start: pos,
            end: pos,
        });
        self.finished = false;
        true
    }

    pub fn drag(&mut self, pos: Point) {
        if let Some(selection) = self.selection.as_mut() {
            selection.end = pos;
        }
    }

    pub fn cancel(&mut self) {
        self.selection = None;
    }

    /// Rubber band in pixels while a selection is active.
    #[must_use]
    pub fn selection_rect(&self) -> Option<Rect> {
        self.selection.map(Selection::rect)
    }

    /// Validates a pixel selection and expands it to the minimum size
    /// around its centre.
    #[must_use]
    pub fn accept(&self, start: Point, end: Point) -> Option<Rect> {
        let rect = Rect::from_points(start, end);
        if !self.zooms_y() && rect.width < MIN_SINGLE_AXIS_SELECTION {
            return None;
        }
        if !self.zooms_x() && rect.height < MIN_SINGLE_AXIS_SELECTION {
            return None;
        }
        let center = rect.center();
        let size = rect
            .size()
            .expanded_to(Size::new(MIN_SELECTION_SIZE, MIN_SELECTION_SIZE));
        let mut accepted = Rect::from_size(size);
        accepted.move_center(center);
        Some(accepted)
    }

    /// Finishes the selection at `pos` and zooms to it.
    pub fn release(&mut self, pos: Point, x_map: CanvasMap, y_map: CanvasMap) -> Option<Rect> {
        let mut selection = self.selection.take()?;
        selection.end = pos;
        let pixels = self.accept(selection.start, selection.end)?;
        self.finished = true;

        let rect = CanvasMap::inv_transform_rect(x_map, y_map, pixels);
        let rect = expanded_zoom_rect(rect, self.stack.min_zoom_size());
        self.stack.zoom(rect)
    }

    /// Applies a navigation command; ignored while a selection is active.
    pub fn command(&mut self, command: ZoomCommand) -> Option<Rect> {
        if self.is_active() {
            return None;
        }
        let offset = match command {
            ZoomCommand::Home => 0,
            ZoomCommand::Undo => -1,
            ZoomCommand::Redo => 1,
        };
        Some(self.stack.zoom_by(offset))
    }

    /// Scale intervals for `rect`, honoring single-axis zoom and the
    /// direction of the current scales.
    #[must_use]
    pub fn intervals(&self, rect: Rect, x_map: CanvasMap, y_map: CanvasMap) -> ZoomIntervals {
        let oriented = |map: CanvasMap, a: f64, b: f64| {
            if map.is_increasing() { (a, b) } else { (b, a) }
        };
        ZoomIntervals {
            x: self
                .zooms_x()
                .then(|| oriented(x_map, rect.left(), rect.right())),
            y: self
                .zooms_y()
                .then(|| oriented(y_map, rect.top(), rect.bottom())),
        }
    }

    /// Text next to the cursor: the position at `pos` (scale coordinates)
    /// or, while selecting, the extent of the selection.
    #[must_use]
    pub fn tracker_text(&self, pos: Point, x_map: CanvasMap, y_map: CanvasMap) -> String {
        let selection = match self.selection {
            Some(selection) if !self.finished && selection.start != selection.end => selection,
            _ => return format!("x={:.2},y={:.2}", pos.x, pos.y),
        };

        let rect = CanvasMap::inv_transform_rect(x_map, y_map, selection.rect());
        if !self.zooms_y() {
            format!("x1={:.2},x2={:.2}", rect.left(), rect.right())
        } else if !self.zooms_x() {
            format!("y1={:.2},y2={:.2}", rect.top(), rect.bottom())
        } else {
            format!("x={:.2},y={:.2}", rect.right(), rect.bottom())
        }
    }
}

/// Grows each side of `rect` shorter than `min_size` to exactly that
/// length around its centre.
fn expanded_zoom_rect(rect: Rect, min_size: Size) -> Rect {
    let mut expanded = rect;
    if min_size.width > rect.width {
        let (min, max) = expanded_interval(rect.left(), rect.right(), min_size.width);
        expanded.x = min;
        expanded.width = max - min;
    }
    if min_size.height > rect.height {
        let (min, max) = expanded_interval(rect.top(), rect.bottom(), min_size.height);
        expanded.y = min;
        expanded.height = max - min;
    }
    expanded
}

fn expanded_interval(min: f64, max: f64, min_range: f64) -> (f64, f64) {
    if max - min >= min_range {
        return (min, max);
    }
    let min = 0.5 * (min + max - min_range);
    (min, min + min_range)
}
