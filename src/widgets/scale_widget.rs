use crate::core::{Axis, Size};

use super::{FontSpec, MonospaceMetrics, ScaleGeometry, TextBlock, TextLabel, TextMetrics};

/// Padding added around the exponent index text on each axis.
const INDEX_BADGE_PADDING: f64 = 10.0;

/// Reference axis scale widget geometry.
///
/// Models a scale drawn as backbone, ticks and tick labels, with an optional
/// rotated title and an optional exponent index badge (e.g. `x10^3`).
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleWidgetGeometry<M = MonospaceMetrics> {
    axis: Axis,
    enabled: bool,
    font: FontSpec,
    metrics: M,
    tick_labels: Vec<String>,
    label_spacing: f64,
    tick_length: f64,
    backbone_width: f64,
    minimum_extent: f64,
    margin: f64,
    title_spacing: f64,
    min_border_dist: (f64, f64),
    title: Option<TextBlock<M>>,
    index_label: Option<String>,
}

impl ScaleWidgetGeometry<MonospaceMetrics> {
    #[must_use]
    pub fn new(axis: Axis) -> Self {
        Self::with_metrics(axis, FontSpec::default(), MonospaceMetrics::default())
    }
}

impl<M: TextMetrics + Clone> ScaleWidgetGeometry<M> {
    #[must_use]
    pub fn with_metrics(axis: Axis, font: FontSpec, metrics: M) -> Self {
        Self {
            axis,
            enabled: true,
            font,
            metrics,
            tick_labels: Vec::new(),
            label_spacing: 4.0,
            tick_length: 8.0,
            backbone_width: 1.0,
            minimum_extent: 0.0,
            margin: 2.0,
            title_spacing: 2.0,
            min_border_dist: (0.0, 0.0),
            title: None,
            index_label: None,
        }
    }

    #[must_use]
    pub fn with_tick_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tick_labels = labels.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(TextBlock::with_metrics(
            title,
            self.font.clone(),
            self.metrics.clone(),
        ));
        self
    }

    /// Enables the exponent index badge showing `label`.
    #[must_use]
    pub fn with_index_label(mut self, label: impl Into<String>) -> Self {
        let label = label.into();
        self.index_label = (!label.is_empty()).then_some(label);
        self
    }

    #[must_use]
    pub fn with_tick_length(mut self, tick_length: f64) -> Self {
        self.tick_length = tick_length.max(0.0);
        self
    }

    #[must_use]
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin.max(0.0);
        self
    }

    #[must_use]
    pub fn with_minimum_extent(mut self, extent: f64) -> Self {
        self.minimum_extent = extent.max(0.0);
        self
    }

    #[must_use]
    pub fn with_min_border_dist(mut self, start: f64, end: f64) -> Self {
        self.min_border_dist = (start.max(0.0), end.max(0.0));
        self
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    #[must_use]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Labels, ticks and backbone extent perpendicular to the scale.
    #[must_use]
    pub fn extent(&self, font: &FontSpec) -> f64 {
        let label_extent = self
            .tick_labels
            .iter()
            .map(|label| {
                let size = self.metrics.text_size(label, font);
                if self.axis.is_horizontal() {
                    size.height
                } else {
                    size.width
                }
            })
            .fold(0.0, f64::max);

        let mut extent = 0.0;
        if label_extent > 0.0 {
            extent += label_extent + self.label_spacing;
        }
        extent += self.tick_length + self.backbone_width.max(1.0);
        extent.max(self.minimum_extent)
    }

    fn first_and_last_label_extent(&self) -> (f64, f64) {
        let along = |label: &String| {
            let size = self.metrics.text_size(label, &self.font);
            if self.axis.is_horizontal() {
                size.width
            } else {
                size.height
            }
        };
        match (self.tick_labels.first(), self.tick_labels.last()) {
            (Some(first), Some(last)) => (along(first), along(last)),
            _ => (0.0, 0.0),
        }
    }
}

impl<M: TextMetrics + Clone> ScaleGeometry for ScaleWidgetGeometry<M> {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn font(&self) -> &FontSpec {
        &self.font
    }

    fn start_border_dist(&self) -> f64 {
        let (first, _) = self.first_and_last_label_extent();
        (first / 2.0).ceil().max(self.min_border_dist.0)
    }

    fn end_border_dist(&self) -> f64 {
        let (_, last) = self.first_and_last_label_extent();
        (last / 2.0).ceil().max(self.min_border_dist.1)
    }

    fn margin(&self) -> f64 {
        self.margin
    }

    fn tick_length(&self) -> f64 {
        self.tick_length
    }

    fn dim_for_length(&self, length: f64, font: &FontSpec) -> f64 {
        let mut extent = self.extent(font).ceil();
        if let Some(badge) = self.index_badge_size() {
            let badge_extent = if self.axis.is_horizontal() {
                badge.height
            } else {
                badge.width
            };
            extent = extent.max(badge_extent);
        }

        let mut dim = self.margin + extent + 1.0;
        if self.has_title() {
            dim += self.title_height_for_width(length) + self.title_spacing;
        }
        dim
    }

    fn has_title(&self) -> bool {
        self.title
            .as_ref()
            .is_some_and(|title| !TextLabel::is_empty(title))
    }

    fn title_height_for_width(&self, width: f64) -> f64 {
        self.title
            .as_ref()
            .map_or(0.0, |title| title.height_for_width(width).ceil())
    }

    fn index_badge_size(&self) -> Option<Size> {
        let label = self.index_label.as_ref()?;
        let text = self.metrics.text_size(label, &self.font);
        Some(Size::new(
            text.width + INDEX_BADGE_PADDING,
            text.height + INDEX_BADGE_PADDING,
        ))
    }
}
