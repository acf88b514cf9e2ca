use plot_layout::core::{Axis, Rect, Size};
use plot_layout::layout::{LayoutOptions, LegendPosition, PlotLayout, PlotParts};
use plot_layout::widgets::{LegendBox, ScaleWidgetGeometry, TextBlock};

fn left_scale() -> ScaleWidgetGeometry {
    // 40px thick, 6px border distances
    ScaleWidgetGeometry::new(Axis::Left).with_tick_labels(["0", "500", "1000"])
}

fn bottom_scale() -> ScaleWidgetGeometry {
    // 28px thick, 3px border distances
    ScaleWidgetGeometry::new(Axis::Bottom).with_tick_labels(["0", "1"])
}

fn plot_rect() -> Rect {
    Rect::new(0.0, 0.0, 400.0, 300.0)
}

#[test]
fn scales_are_flush_against_the_canvas() {
    let left = left_scale();
    let bottom = bottom_scale();
    let parts = PlotParts::new()
        .with_scale(Axis::Left, &left)
        .with_scale(Axis::Bottom, &bottom);

    let mut layout = PlotLayout::new();
    layout.activate(&parts, plot_rect(), LayoutOptions::empty());

    assert!(layout.scale_visible());
    assert_eq!(layout.canvas_rect(), Rect::new(40.0, 0.0, 360.0, 272.0));
    assert_eq!(layout.scale_rect(Axis::Left), Rect::new(0.0, 0.0, 40.0, 272.0));
    assert_eq!(
        layout.scale_rect(Axis::Bottom),
        Rect::new(40.0, 272.0, 360.0, 28.0)
    );
    assert!(layout.scale_rect(Axis::Right).is_empty());
    assert!(layout.scale_rect(Axis::Top).is_empty());
    assert!(layout.title_rect().is_empty());
    assert!(layout.footer_rect().is_empty());
    assert!(layout.legend_rect().is_empty());
}

#[test]
fn title_band_is_reserved_at_the_top() {
    let left = left_scale();
    let bottom = bottom_scale();
    let title = TextBlock::new("Power");
    let parts = PlotParts::new()
        .with_title(&title)
        .with_scale(Axis::Left, &left)
        .with_scale(Axis::Bottom, &bottom);

    let mut layout = PlotLayout::new();
    layout.activate(&parts, plot_rect(), LayoutOptions::empty());

    assert_eq!(layout.title_rect(), Rect::new(0.0, 0.0, 400.0, 12.0));
    // title 12 + spacing 5
    assert_eq!(layout.canvas_rect(), Rect::new(40.0, 17.0, 360.0, 255.0));
    assert_eq!(layout.margin_of_axis(Axis::Top), 17.0);
}

#[test]
fn title_frame_counts_unless_frames_are_ignored() {
    let title = TextBlock::new("Power").with_frame_width(2.0);
    let parts = PlotParts::new().with_title(&title);

    let mut layout = PlotLayout::new();
    layout.activate(&parts, plot_rect(), LayoutOptions::empty());
    assert_eq!(layout.title_rect().height, 16.0);

    layout.activate(&parts, plot_rect(), LayoutOptions::IGNORE_FRAMES);
    assert_eq!(layout.title_rect().height, 12.0);
}

#[test]
fn ignored_title_takes_no_space() {
    let title = TextBlock::new("Power");
    let parts = PlotParts::new().with_title(&title);

    let mut layout = PlotLayout::new();
    layout.activate(&parts, plot_rect(), LayoutOptions::IGNORE_TITLE);

    assert!(layout.title_rect().is_empty());
    assert_eq!(layout.canvas_rect(), plot_rect());
}

#[test]
fn bottom_legend_is_docked_and_aligned_to_the_canvas() {
    let left = left_scale();
    let bottom = bottom_scale();
    let legend = LegendBox::new(2, Size::new(60.0, 16.0));
    let parts = PlotParts::new()
        .with_legend(&legend)
        .with_scale(Axis::Left, &left)
        .with_scale(Axis::Bottom, &bottom);

    let mut layout = PlotLayout::new();
    layout.activate(&parts, plot_rect(), LayoutOptions::empty());

    // 16px legend + 5px spacing at the bottom
    assert_eq!(layout.canvas_rect(), Rect::new(40.0, 0.0, 360.0, 251.0));
    assert_eq!(
        layout.scale_rect(Axis::Bottom),
        Rect::new(40.0, 251.0, 360.0, 28.0)
    );
    // the 122px wide legend is stretched along the canvas
    assert_eq!(layout.legend_rect(), Rect::new(40.0, 284.0, 360.0, 16.0));
    assert_eq!(layout.margin_of_axis(Axis::Bottom), 21.0);
}

#[test]
fn footer_is_centred_on_the_canvas_with_a_single_y_axis() {
    let left = left_scale();
    let bottom = bottom_scale();
    let footer = TextBlock::new("Source: lab");
    let parts = PlotParts::new()
        .with_footer(&footer)
        .with_scale(Axis::Left, &left)
        .with_scale(Axis::Bottom, &bottom);

    let mut layout = PlotLayout::new();
    layout.activate(&parts, plot_rect(), LayoutOptions::empty());

    assert_eq!(layout.footer_rect(), Rect::new(40.0, 288.0, 360.0, 12.0));
    assert_eq!(layout.canvas_rect(), Rect::new(40.0, 0.0, 360.0, 255.0));
}

#[test]
fn footer_spans_the_plot_with_both_y_axes() {
    let left = left_scale();
    let right = ScaleWidgetGeometry::new(Axis::Right).with_tick_labels(["0", "500", "1000"]);
    let footer = TextBlock::new("Source: lab");
    let parts = PlotParts::new()
        .with_footer(&footer)
        .with_scale(Axis::Left, &left)
        .with_scale(Axis::Right, &right);

    let mut layout = PlotLayout::new();
    layout.activate(&parts, plot_rect(), LayoutOptions::IGNORE_FOOTER);
    assert!(layout.footer_rect().is_empty());

    layout.activate(&parts, plot_rect(), LayoutOptions::empty());
    assert_eq!(layout.footer_rect(), Rect::new(0.0, 288.0, 400.0, 12.0));
    assert_eq!(layout.canvas_rect(), Rect::new(40.0, 0.0, 320.0, 283.0));
}

#[test]
fn empty_plot_rect_yields_empty_outputs() {
    let left = left_scale();
    let parts = PlotParts::new().with_scale(Axis::Left, &left);

    let mut layout = PlotLayout::new();
    let rects = *layout.activate(&parts, Rect::new(0.0, 0.0, 0.0, 200.0), LayoutOptions::empty());

    assert!(rects.canvas.is_empty());
    assert!(rects.scales[Axis::Left].is_empty());
    assert!(!rects.scale_visible);

    let rects = *layout.activate(
        &parts,
        Rect::new(0.0, 0.0, f64::NAN, 200.0),
        LayoutOptions::empty(),
    );
    assert!(rects.canvas.is_empty());
}

#[test]
fn empty_legend_is_a_no_op_in_every_position() {
    let left = left_scale();
    let bottom = bottom_scale();
    let empty = LegendBox::new(0, Size::new(60.0, 16.0));
    let without = PlotParts::new()
        .with_scale(Axis::Left, &left)
        .with_scale(Axis::Bottom, &bottom);
    let with_empty = without.with_legend(&empty);

    let mut reference = PlotLayout::new();
    reference.activate(&without, plot_rect(), LayoutOptions::empty());

    for position in [
        LegendPosition::Left,
        LegendPosition::Right,
        LegendPosition::Top,
        LegendPosition::Bottom,
        LegendPosition::Floating,
    ] {
        let mut layout = PlotLayout::new();
        layout
            .set_legend_position(position, 0.0)
            .expect("valid ratio");
        layout.activate(&with_empty, plot_rect(), LayoutOptions::empty());

        assert!(layout.legend_rect().is_empty(), "{position:?}");
        assert_eq!(layout.canvas_rect(), reference.canvas_rect(), "{position:?}");
    }
}

#[test]
fn hidden_or_ignored_legend_consumes_no_space() {
    let left = left_scale();
    let legend = LegendBox::new(3, Size::new(60.0, 16.0));
    let parts = PlotParts::new()
        .with_legend(&legend)
        .with_scale(Axis::Left, &left);

    let mut layout = PlotLayout::new();
    layout.activate(&parts, plot_rect(), LayoutOptions::IGNORE_LEGEND);
    assert!(layout.legend_rect().is_empty());
    assert_eq!(layout.canvas_rect(), Rect::new(40.0, 0.0, 360.0, 300.0));

    layout
        .set_legend_position(LegendPosition::Hidden, 0.0)
        .expect("valid ratio");
    layout.activate(&parts, plot_rect(), LayoutOptions::empty());
    assert!(layout.legend_rect().is_empty());
    assert_eq!(layout.canvas_rect(), Rect::new(40.0, 0.0, 360.0, 300.0));
}

#[test]
fn canvas_margins_are_reserved_around_a_fixed_axis() {
    let mut layout = PlotLayout::new();
    let left = left_scale();
    let parts = PlotParts::new().with_scale(Axis::Left, &left);

    layout
        .set_fixed_dim_of_axis(Axis::Left, 60.0)
        .expect("finite dim");
    layout.activate(&parts, plot_rect(), LayoutOptions::empty());

    assert_eq!(layout.scale_rect(Axis::Left).width, 60.0);
    assert_eq!(layout.canvas_rect().left(), 60.0);
}

#[test]
fn invalidate_clears_outputs_but_keeps_settings() {
    let left = left_scale();
    let parts = PlotParts::new().with_scale(Axis::Left, &left);

    let mut layout = PlotLayout::new();
    layout
        .set_hint_dim_of_axis(Axis::Left, 55.0)
        .expect("finite hint");
    layout.activate(&parts, plot_rect(), LayoutOptions::empty());
    assert!(!layout.canvas_rect().is_empty());

    layout.invalidate();
    assert!(layout.canvas_rect().is_empty());
    assert!(!layout.is_dim_changed());
    assert_eq!(layout.hint_dim_of_axis(Axis::Left), 55.0);
    assert_eq!(layout.dim_of_axis(Axis::Left), 40.0);

    layout.reset_state();
    assert_eq!(layout.hint_dim_of_axis(Axis::Left), 0.0);
    assert_eq!(layout.dim_of_axis(Axis::Left), 0.0);
}

#[test]
fn bounding_rect_covers_every_part() {
    let left = left_scale();
    let bottom = bottom_scale();
    let title = TextBlock::new("Power");
    let parts = PlotParts::new()
        .with_title(&title)
        .with_scale(Axis::Left, &left)
        .with_scale(Axis::Bottom, &bottom);

    let mut layout = PlotLayout::new();
    let rects = *layout.activate(&parts, plot_rect(), LayoutOptions::empty());
    assert_eq!(rects.bounding_rect(), plot_rect());
}
