use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::core::types::Margins;

/// One of the four fixed scale positions around the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Left,
    Right,
    Bottom,
    Top,
}

impl Axis {
    pub const ALL: [Axis; 4] = [Axis::Left, Axis::Right, Axis::Bottom, Axis::Top];

    /// `true` for the x axes (`Top`, `Bottom`), whose scales run horizontally.
    #[must_use]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Axis::Top | Axis::Bottom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Fixed four-slot map keyed by [`Axis`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AxisMap<T> {
    pub left: T,
    pub right: T,
    pub bottom: T,
    pub top: T,
}

impl<T> AxisMap<T> {
    #[must_use]
    pub fn new(left: T, right: T, bottom: T, top: T) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
        }
    }

    pub fn from_fn(mut f: impl FnMut(Axis) -> T) -> Self {
        Self {
            left: f(Axis::Left),
            right: f(Axis::Right),
            bottom: f(Axis::Bottom),
            top: f(Axis::Top),
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(Axis, &T) -> U) -> AxisMap<U> {
        AxisMap::from_fn(|axis| f(axis, &self[axis]))
    }

}

impl<T: Copy> AxisMap<T> {
    #[must_use]
    pub fn splat(value: T) -> Self {
        Self::new(value, value, value, value)
    }
}

impl<T> Index<Axis> for AxisMap<T> {
    type Output = T;

    fn index(&self, axis: Axis) -> &T {
        match axis {
            Axis::Left => &self.left,
            Axis::Right => &self.right,
            Axis::Bottom => &self.bottom,
            Axis::Top => &self.top,
        }
    }
}

impl<T> IndexMut<Axis> for AxisMap<T> {
    fn index_mut(&mut self, axis: Axis) -> &mut T {
        match axis {
            Axis::Left => &mut self.left,
            Axis::Right => &mut self.right,
            Axis::Bottom => &mut self.bottom,
            Axis::Top => &mut self.top,
        }
    }
}

impl From<Margins> for AxisMap<f64> {
    fn from(margins: Margins) -> Self {
        Self::new(margins.left, margins.right, margins.bottom, margins.top)
    }
}
