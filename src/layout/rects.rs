use serde::{Deserialize, Serialize};

use crate::core::{Axis, AxisMap, Rect};

/// Output of one layout pass, in the coordinates of the bounding rectangle.
///
/// An empty rectangle means the part is not drawn this pass.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutRects {
    pub title: Rect,
    pub footer: Rect,
    pub legend: Rect,
    pub scales: AxisMap<Rect>,
    /// Exponent index badge inside each scale rectangle.
    pub scale_index: AxisMap<Rect>,
    pub canvas: Rect,
    /// `false` after the canvas collapsed to the whole plot.
    pub scale_visible: bool,
}

impl LayoutRects {
    #[must_use]
    pub fn scale(&self, axis: Axis) -> Rect {
        self.scales[axis]
    }

    #[must_use]
    pub fn scale_index(&self, axis: Axis) -> Rect {
        self.scale_index[axis]
    }

    /// Union of every non-empty rectangle.
    #[must_use]
    pub fn bounding_rect(&self) -> Rect {
        let parts = [self.title, self.footer, self.legend, self.canvas];
        parts
            .into_iter()
            .chain(Axis::ALL.into_iter().map(|axis| self.scales[axis]))
            .fold(Rect::EMPTY, Rect::united)
    }
}
