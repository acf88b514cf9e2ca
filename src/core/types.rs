use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// `true` when either side is zero or negative.
    #[must_use]
    pub fn is_empty(self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    #[must_use]
    pub fn expanded_to(self, other: Size) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }
}

/// Axis-aligned rectangle in plot coordinates (y grows downwards).
///
/// `right()` and `bottom()` are `x + width` and `y + height`; there is no
/// off-by-one pixel convention.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const EMPTY: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn from_points(a: Point, b: Point) -> Self {
        Self::new(a.x, a.y, b.x - a.x, b.y - a.y).normalized()
    }

    #[must_use]
    pub fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    #[must_use]
    pub fn left(self) -> f64 {
        self.x
    }

    #[must_use]
    pub fn top(self) -> f64 {
        self.y
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    #[must_use]
    pub fn center(self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// `true` when the rectangle covers no area.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.size().is_empty()
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
    }

    /// Moves the left edge, keeping the right edge in place.
    pub fn set_left(&mut self, left: f64) {
        self.width += self.x - left;
        self.x = left;
    }

    /// Moves the top edge, keeping the bottom edge in place.
    pub fn set_top(&mut self, top: f64) {
        self.height += self.y - top;
        self.y = top;
    }

    pub fn set_right(&mut self, right: f64) {
        self.width = right - self.x;
    }

    pub fn set_bottom(&mut self, bottom: f64) {
        self.height = bottom - self.y;
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    pub fn move_center(&mut self, center: Point) {
        self.x = center.x - self.width / 2.0;
        self.y = center.y - self.height / 2.0;
    }

    #[must_use]
    pub fn normalized(self) -> Self {
        let (x, width) = if self.width < 0.0 {
            (self.x + self.width, -self.width)
        } else {
            (self.x, self.width)
        };
        let (y, height) = if self.height < 0.0 {
            (self.y + self.height, -self.height)
        } else {
            (self.y, self.height)
        };
        Self::new(x, y, width, height)
    }

    /// Intersection, or [`Rect::EMPTY`] when the rectangles do not overlap.
    #[must_use]
    pub fn intersected(self, other: Rect) -> Self {
        let left = self.left().max(other.left());
        let top = self.top().max(other.top());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right < left || bottom < top {
            return Self::EMPTY;
        }
        Self::new(left, top, right - left, bottom - top)
    }

    /// Bounding rectangle of both; an empty operand is ignored.
    #[must_use]
    pub fn united(self, other: Rect) -> Self {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return self;
        }
        let left = self.left().min(other.left());
        let top = self.top().min(other.top());
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Self::new(left, top, right - left, bottom - top)
    }

    #[must_use]
    pub fn contains_rect(self, other: Rect, epsilon: f64) -> bool {
        other.left() >= self.left() - epsilon
            && other.top() >= self.top() - epsilon
            && other.right() <= self.right() + epsilon
            && other.bottom() <= self.bottom() + epsilon
    }
}

/// Per-side distances, e.g. the contents margins of the canvas frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Margins {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Margins {
    #[must_use]
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    #[must_use]
    pub fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }
}
