use bitflags::bitflags;

bitflags! {
    /// Per-pass switches for [`PlotLayout::activate`](super::PlotLayout::activate).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct LayoutOptions: u8 {
        /// Extend the scale ends into the empty corners around the canvas.
        const ALIGN_SCALES = 1 << 0;
        /// Ignore scroll bar extents, e.g. when rendering to an image.
        const IGNORE_SCROLLBARS = 1 << 1;
        /// Ignore all frame widths and canvas contents margins.
        const IGNORE_FRAMES = 1 << 2;
        const IGNORE_LEGEND = 1 << 3;
        const IGNORE_TITLE = 1 << 4;
        const IGNORE_FOOTER = 1 << 5;
    }
}
