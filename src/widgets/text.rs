use serde::{Deserialize, Serialize};

use crate::core::Size;

use super::TextLabel;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub family: String,
    pub point_size: f64,
}

impl FontSpec {
    #[must_use]
    pub fn new(family: impl Into<String>, point_size: f64) -> Self {
        Self {
            family: family.into(),
            point_size,
        }
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::new("Sans", 10.0)
    }
}

/// Text measurement service.
///
/// Layout only needs single-line extents; wrapping is built on top of it by
/// [`TextBlock`].
pub trait TextMetrics {
    /// Size of `text` rendered on a single line.
    fn text_size(&self, text: &str, font: &FontSpec) -> Size;

    fn line_height(&self, font: &FontSpec) -> f64;
}

/// Heuristic metrics: every glyph advances by a fixed fraction of the point size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonospaceMetrics {
    pub advance_ratio: f64,
    pub line_height_ratio: f64,
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self {
            advance_ratio: 0.6,
            line_height_ratio: 1.2,
        }
    }
}

impl TextMetrics for MonospaceMetrics {
    fn text_size(&self, text: &str, font: &FontSpec) -> Size {
        let width = self.advance_ratio * font.point_size * text.chars().count() as f64;
        Size::new(width, self.line_height(font))
    }

    fn line_height(&self, font: &FontSpec) -> f64 {
        (self.line_height_ratio * font.point_size).ceil()
    }
}

/// A word-wrapped text label.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock<M = MonospaceMetrics> {
    text: String,
    font: FontSpec,
    metrics: M,
    frame_width: f64,
}

impl TextBlock<MonospaceMetrics> {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_metrics(text, FontSpec::default(), MonospaceMetrics::default())
    }
}

impl<M: TextMetrics> TextBlock<M> {
    #[must_use]
    pub fn with_metrics(text: impl Into<String>, font: FontSpec, metrics: M) -> Self {
        Self {
            text: text.into(),
            font,
            metrics,
            frame_width: 0.0,
        }
    }

    #[must_use]
    pub fn with_font(mut self, font: FontSpec) -> Self {
        self.font = font;
        self
    }

    #[must_use]
    pub fn with_frame_width(mut self, frame_width: f64) -> Self {
        self.frame_width = frame_width.max(0.0);
        self
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn font(&self) -> &FontSpec {
        &self.font
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Unwrapped size: the widest paragraph by the number of paragraphs.
    #[must_use]
    pub fn text_size(&self) -> Size {
        if self.text.is_empty() {
            return Size::ZERO;
        }
        let mut width: f64 = 0.0;
        let mut lines = 0usize;
        for paragraph in self.text.lines() {
            width = width.max(self.metrics.text_size(paragraph, &self.font).width);
            lines += 1;
        }
        Size::new(width, lines as f64 * self.metrics.line_height(&self.font))
    }

    /// Number of lines after greedy word wrapping into `width`.
    ///
    /// A word wider than `width` occupies a line of its own.
    #[must_use]
    pub fn line_count(&self, width: f64) -> usize {
        let mut count = 0;
        for paragraph in self.text.lines() {
            let mut line = String::new();
            let mut paragraph_lines = 1;
            for word in paragraph.split_whitespace() {
                let candidate = if line.is_empty() {
                    word.to_owned()
                } else {
                    format!("{line} {word}")
                };
                let fits = self.metrics.text_size(&candidate, &self.font).width <= width;
                if fits || line.is_empty() {
                    line = candidate;
                } else {
                    paragraph_lines += 1;
                    line = word.to_owned();
                }
            }
            count += paragraph_lines;
        }
        count
    }
}

impl<M: TextMetrics> TextLabel for TextBlock<M> {
    fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    fn height_for_width(&self, width: f64) -> f64 {
        if TextLabel::is_empty(self) {
            return 0.0;
        }
        self.line_count(width) as f64 * self.metrics.line_height(&self.font)
    }

    fn frame_width(&self) -> f64 {
        self.frame_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_words_greedily() {
        // 10pt font, 6px per glyph, 12px per line.
        let block = TextBlock::new("alpha beta gamma");
        assert_eq!(block.line_count(1_000.0), 1);
        // "alpha beta" is 60px wide.
        assert_eq!(block.line_count(60.0), 2);
        assert_eq!(block.line_count(10.0), 3);
        assert_eq!(block.height_for_width(60.0), 24.0);
    }

    #[test]
    fn empty_text_has_no_height() {
        let block = TextBlock::new("   ");
        assert!(TextLabel::is_empty(&block));
        assert_eq!(block.height_for_width(100.0), 0.0);
        assert_eq!(TextBlock::new("").text_size(), Size::ZERO);
    }

    #[test]
    fn explicit_line_breaks_start_new_lines() {
        let block = TextBlock::new("x\n10^3");
        assert_eq!(block.line_count(1_000.0), 2);
        let size = block.text_size();
        assert_eq!(size.width, 24.0);
        assert_eq!(size.height, 24.0);
    }
}
