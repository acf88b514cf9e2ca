use serde::{Deserialize, Serialize};

use crate::core::{Axis, Rect};
use crate::error::{PlotError, PlotResult};

/// Linear map between a scale interval and a pixel interval on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasMap {
    scale_start: f64,
    scale_end: f64,
    pixel_start: f64,
    pixel_end: f64,
}

impl CanvasMap {
    pub fn new(scale_start: f64, scale_end: f64, pixel_start: f64, pixel_end: f64) -> PlotResult<Self> {
        if !scale_start.is_finite() || !scale_end.is_finite() || scale_start == scale_end {
            return Err(PlotError::InvalidData(
                "scale interval must be finite and non-zero".to_owned(),
            ));
        }
        if !pixel_start.is_finite() || !pixel_end.is_finite() || pixel_start == pixel_end {
            return Err(PlotError::InvalidGeometry {
                width: pixel_end - pixel_start,
                height: 0.0,
            });
        }

        Ok(Self {
            scale_start,
            scale_end,
            pixel_start,
            pixel_end,
        })
    }

    /// Map for the scale on `axis` drawn along `canvas`.
    ///
    /// Vertical scales grow upwards, so their pixel interval runs from the
    /// canvas bottom to its top.
    pub fn for_canvas(axis: Axis, canvas: Rect, scale_start: f64, scale_end: f64) -> PlotResult<Self> {
        if axis.is_horizontal() {
            Self::new(scale_start, scale_end, canvas.left(), canvas.right())
        } else {
            Self::new(scale_start, scale_end, canvas.bottom(), canvas.top())
        }
    }

    #[must_use]
    pub fn scale_interval(self) -> (f64, f64) {
        (self.scale_start, self.scale_end)
    }

    #[must_use]
    pub fn pixel_interval(self) -> (f64, f64) {
        (self.pixel_start, self.pixel_end)
    }

    #[must_use]
    pub fn is_increasing(self) -> bool {
        self.scale_end > self.scale_start
    }

    #[must_use]
    pub fn transform(self, value: f64) -> f64 {
        let ratio = (value - self.scale_start) / (self.scale_end - self.scale_start);
        self.pixel_start + ratio * (self.pixel_end - self.pixel_start)
    }

    #[must_use]
    pub fn inv_transform(self, pixel: f64) -> f64 {
        let ratio = (pixel - self.pixel_start) / (self.pixel_end - self.pixel_start);
        self.scale_start + ratio * (self.scale_end - self.scale_start)
    }

    /// Converts a pixel rectangle into a normalized rectangle in scale
    /// coordinates.
    #[must_use]
    pub fn inv_transform_rect(x_map: CanvasMap, y_map: CanvasMap, rect: Rect) -> Rect {
        let x1 = x_map.inv_transform(rect.left());
        let x2 = x_map.inv_transform(rect.right());
        let y1 = y_map.inv_transform(rect.top());
        let y2 = y_map.inv_transform(rect.bottom());
        Rect::new(x1, y1, x2 - x1, y2 - y1).normalized()
    }
}
