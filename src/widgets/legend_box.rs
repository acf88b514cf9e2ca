use serde::{Deserialize, Serialize};

use crate::core::{Orientation, Size};

use super::{FontSpec, LegendGeometry, TextMetrics};

/// Reference legend: a uniform grid of identical item cells.
///
/// Items flow left to right into as many columns as fit (capped by
/// `max_columns`, `0` meaning unlimited), then top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegendBox {
    pub item_count: usize,
    pub item_size: Size,
    pub spacing: f64,
    pub max_columns: usize,
    pub frame_width: f64,
    /// Width of the vertical scroll bar.
    pub vertical_scrollbar_width: f64,
    /// Height of the horizontal scroll bar.
    pub horizontal_scrollbar_height: f64,
}

impl Default for LegendBox {
    fn default() -> Self {
        Self {
            item_count: 0,
            item_size: Size::ZERO,
            spacing: 2.0,
            max_columns: 0,
            frame_width: 0.0,
            vertical_scrollbar_width: 16.0,
            horizontal_scrollbar_height: 16.0,
        }
    }
}

impl LegendBox {
    #[must_use]
    pub fn new(item_count: usize, item_size: Size) -> Self {
        Self {
            item_count,
            item_size,
            ..Self::default()
        }
    }

    /// Builds a legend sized for `labels` drawn next to an icon.
    #[must_use]
    pub fn from_labels<M: TextMetrics>(
        labels: &[&str],
        font: &FontSpec,
        metrics: &M,
        icon_size: Size,
    ) -> Self {
        let spacing = Self::default().spacing;
        let item_size = labels.iter().fold(Size::ZERO, |acc, label| {
            let text = metrics.text_size(label, font);
            acc.expanded_to(Size::new(
                icon_size.width + spacing + text.width,
                icon_size.height.max(text.height),
            ))
        });
        Self::new(labels.len(), item_size)
    }

    #[must_use]
    pub fn with_max_columns(mut self, max_columns: usize) -> Self {
        self.max_columns = max_columns;
        self
    }

    #[must_use]
    pub fn with_frame_width(mut self, frame_width: f64) -> Self {
        self.frame_width = frame_width.max(0.0);
        self
    }

    #[must_use]
    pub fn with_scrollbar_extents(mut self, vertical_width: f64, horizontal_height: f64) -> Self {
        self.vertical_scrollbar_width = vertical_width.max(0.0);
        self.horizontal_scrollbar_height = horizontal_height.max(0.0);
        self
    }

    fn column_cap(&self) -> usize {
        if self.max_columns == 0 {
            self.item_count
        } else {
            self.max_columns.min(self.item_count)
        }
    }

    fn grid_extent(count: usize, cell: f64, spacing: f64) -> f64 {
        if count == 0 {
            return 0.0;
        }
        count as f64 * cell + (count - 1) as f64 * spacing
    }

    fn rows_for(&self, columns: usize) -> usize {
        self.item_count.div_ceil(columns.max(1))
    }
}

impl LegendGeometry for LegendBox {
    fn is_empty(&self) -> bool {
        self.item_count == 0
    }

    fn frame_width(&self) -> f64 {
        self.frame_width
    }

    fn scroll_extent(&self, orientation: Orientation) -> f64 {
        match orientation {
            Orientation::Horizontal => self.vertical_scrollbar_width,
            Orientation::Vertical => self.horizontal_scrollbar_height,
        }
    }

    fn size_hint(&self) -> Size {
        if self.item_count == 0 {
            return Size::ZERO;
        }
        let columns = self.column_cap();
        let rows = self.rows_for(columns);
        let frame = 2.0 * self.frame_width;
        Size::new(
            Self::grid_extent(columns, self.item_size.width, self.spacing) + frame,
            Self::grid_extent(rows, self.item_size.height, self.spacing) + frame,
        )
    }

    fn height_for_width(&self, width: f64) -> f64 {
        if self.item_count == 0 || self.item_size.width <= 0.0 {
            return 0.0;
        }
        let inner = width - 2.0 * self.frame_width;
        let fitting = ((inner + self.spacing) / (self.item_size.width + self.spacing)).floor();
        let columns = if fitting >= 1.0 {
            (fitting as usize).min(self.column_cap())
        } else {
            1
        };
        let rows = self.rows_for(columns);
        Self::grid_extent(rows, self.item_size.height, self.spacing) + 2.0 * self.frame_width
    }
}
