use plot_layout::core::{Axis, Rect};
use plot_layout::layout::{AxisHints, LayoutOptions, PlotLayout, PlotParts};
use plot_layout::widgets::{FontSpec, MonospaceMetrics, ScaleWidgetGeometry, TextBlock};

fn plot_rect() -> Rect {
    Rect::new(0.0, 0.0, 400.0, 300.0)
}

fn narrow_left() -> ScaleWidgetGeometry {
    // 22px thick
    ScaleWidgetGeometry::new(Axis::Left).with_tick_labels(["0", "1"])
}

fn wide_left() -> ScaleWidgetGeometry {
    // 40px thick
    ScaleWidgetGeometry::new(Axis::Left).with_tick_labels(["0", "500", "1000"])
}

#[test]
fn shared_hint_aligns_left_axes_of_sibling_plots() {
    let left = wide_left();
    let short_title = TextBlock::new("Pressure");
    let long_title =
        TextBlock::new("Pressure measured at the inlet valve during the second calibration run");

    let first_parts = PlotParts::new()
        .with_title(&short_title)
        .with_scale(Axis::Left, &left);
    let second_parts = PlotParts::new()
        .with_title(&long_title)
        .with_scale(Axis::Left, &left);

    let mut first = PlotLayout::new();
    let mut second = PlotLayout::new();
    for layout in [&mut first, &mut second] {
        layout
            .set_hint_dim_of_axis(Axis::Left, 70.0)
            .expect("finite hint");
    }
    first.activate(&first_parts, plot_rect(), LayoutOptions::empty());
    second.activate(&second_parts, plot_rect(), LayoutOptions::empty());

    assert!(second.title_rect().height > first.title_rect().height);
    assert_eq!(first.scale_rect(Axis::Left).width, 70.0);
    assert_eq!(
        first.scale_rect(Axis::Left).width,
        second.scale_rect(Axis::Left).width
    );
    // published dimensions ignore the hint
    assert_eq!(first.dim_of_axis(Axis::Left), 40.0);
}

#[test]
fn hint_below_the_intrinsic_need_is_ignored() {
    let left = wide_left();
    let parts = PlotParts::new().with_scale(Axis::Left, &left);

    let mut layout = PlotLayout::new();
    layout
        .set_hint_dim_of_axis(Axis::Left, 10.0)
        .expect("finite hint");
    layout.activate(&parts, plot_rect(), LayoutOptions::empty());

    assert_eq!(layout.scale_rect(Axis::Left).width, 40.0);
}

#[test]
fn dimension_change_is_reported_once() {
    let left = wide_left();
    let parts = PlotParts::new().with_scale(Axis::Left, &left);

    let mut layout = PlotLayout::new();
    layout.activate(&parts, plot_rect(), LayoutOptions::empty());
    assert!(layout.is_dim_changed());
    assert!(layout.axis_dimensions()[Axis::Left].changed);

    layout.activate(&parts, plot_rect(), LayoutOptions::empty());
    assert!(!layout.is_dim_changed());
    assert!(!layout.axis_dimensions()[Axis::Left].changed);

    let narrow = narrow_left();
    let narrow_parts = PlotParts::new().with_scale(Axis::Left, &narrow);
    layout.activate(&narrow_parts, plot_rect(), LayoutOptions::empty());
    assert!(layout.is_dim_changed());
    assert_eq!(layout.dim_of_axis(Axis::Left), 22.0);
}

#[test]
fn hint_margin_pushes_the_axis_inwards() {
    let left = wide_left();
    let parts = PlotParts::new().with_scale(Axis::Left, &left);

    let mut layout = PlotLayout::new();
    layout
        .set_hint_margin_of_axis(Axis::Left, 30.0)
        .expect("finite margin");
    layout.activate(&parts, plot_rect(), LayoutOptions::empty());

    assert_eq!(layout.scale_rect(Axis::Left), Rect::new(30.0, 0.0, 40.0, 300.0));
    assert_eq!(layout.canvas_rect().left(), 70.0);
    assert_eq!(layout.margin_of_axis(Axis::Left), 0.0);
}

#[test]
fn sibling_plots_converge_through_collected_hints() {
    let narrow = narrow_left();
    let wide = wide_left();
    let narrow_parts = PlotParts::new().with_scale(Axis::Left, &narrow);
    let wide_parts = PlotParts::new().with_scale(Axis::Left, &wide);

    let mut plots = [PlotLayout::new(), PlotLayout::new()];
    let parts = [narrow_parts, wide_parts];

    let mut passes = 0;
    loop {
        passes += 1;
        for (layout, parts) in plots.iter_mut().zip(parts.iter()) {
            layout.activate(parts, plot_rect(), LayoutOptions::empty());
        }
        if plots.iter().all(|layout| !layout.is_dim_changed()) {
            break;
        }
        let hints = AxisHints::collect(plots.iter());
        for layout in &mut plots {
            layout.apply_hints(&hints);
        }
        assert!(passes < 5, "sibling layout did not settle");
    }

    assert_eq!(plots[0].scale_rect(Axis::Left).width, 40.0);
    assert_eq!(plots[1].scale_rect(Axis::Left).width, 40.0);
    assert_eq!(plots[0].canvas_rect(), plots[1].canvas_rect());
}

#[test]
fn fixed_dimension_wins_over_title_and_hint() {
    let left = wide_left().with_title("Amplitude in millivolts");
    let parts = PlotParts::new().with_scale(Axis::Left, &left);

    let mut layout = PlotLayout::new();
    layout
        .set_fixed_dim_of_axis(Axis::Left, 60.0)
        .expect("finite dim");
    layout
        .set_hint_dim_of_axis(Axis::Left, 90.0)
        .expect("finite hint");
    layout.activate(&parts, plot_rect(), LayoutOptions::empty());

    assert_eq!(layout.scale_rect(Axis::Left).width, 60.0);
    assert_eq!(layout.fixed_dim_of_axis(Axis::Left), 60.0);
    assert!(layout.set_fixed_dim_of_axis(Axis::Left, f64::INFINITY).is_err());
}

#[test]
fn axis_title_wraps_against_the_axis_length() {
    // 19px extent, 6px border distances, 132px title
    let left = narrow_left().with_title("alpha beta gamma delta");
    let parts = PlotParts::new().with_scale(Axis::Left, &left);

    let mut layout = PlotLayout::new();
    layout.activate(&parts, Rect::new(0.0, 0.0, 400.0, 120.0), LayoutOptions::empty());

    // 108px of axis length wraps the title into two lines
    assert_eq!(layout.scale_rect(Axis::Left).width, 48.0);
    // unbounded: a single title line
    assert_eq!(layout.dim_of_axis(Axis::Left), 36.0);
}

#[test]
fn index_badge_reserves_a_top_band() {
    // badge 40 x 22, scale 43px thick
    let left = wide_left().with_index_label("x10^3");
    let parts = PlotParts::new().with_scale(Axis::Left, &left);

    let mut layout = PlotLayout::new();
    layout.activate(&parts, plot_rect(), LayoutOptions::empty());

    assert_eq!(layout.canvas_rect(), Rect::new(43.0, 22.0, 357.0, 278.0));
    assert_eq!(layout.scale_rect(Axis::Left), Rect::new(0.0, 0.0, 43.0, 300.0));
    assert_eq!(layout.scale_rect(Axis::Top), Rect::new(43.0, 0.0, 357.0, 22.0));
    assert_eq!(layout.scale_index_rect(Axis::Left), Rect::new(0.0, 0.0, 40.0, 22.0));
    assert_eq!(layout.dim_of_axis(Axis::Top), 22.0);
}

#[test]
fn fixed_top_axis_is_not_widened_by_badges() {
    let left = wide_left().with_index_label("x10^3");
    let parts = PlotParts::new().with_scale(Axis::Left, &left);

    let mut layout = PlotLayout::new();
    layout
        .set_fixed_dim_of_axis(Axis::Top, 8.0)
        .expect("finite dim");
    layout.activate(&parts, plot_rect(), LayoutOptions::empty());

    assert_eq!(layout.canvas_rect().top(), 8.0);
}

#[test]
fn bottom_badge_widens_the_right_band() {
    // badge 40 x 22
    let left = wide_left();
    let bottom = ScaleWidgetGeometry::new(Axis::Bottom)
        .with_tick_labels(["0", "1"])
        .with_index_label("x10^3");
    let parts = PlotParts::new()
        .with_scale(Axis::Left, &left)
        .with_scale(Axis::Bottom, &bottom);

    let mut layout = PlotLayout::new();
    layout.activate(&parts, plot_rect(), LayoutOptions::empty());

    assert_eq!(layout.canvas_rect(), Rect::new(40.0, 0.0, 320.0, 272.0));
    assert_eq!(layout.scale_rect(Axis::Right), Rect::new(360.0, 0.0, 40.0, 272.0));
    // the bottom scale reaches under the right band
    assert_eq!(
        layout.scale_rect(Axis::Bottom),
        Rect::new(40.0, 272.0, 360.0, 28.0)
    );
    assert_eq!(
        layout.scale_index_rect(Axis::Bottom),
        Rect::new(360.0, 272.0, 40.0, 22.0)
    );
    assert_eq!(layout.dim_of_axis(Axis::Right), 40.0);
}

#[test]
fn top_badge_sits_past_the_right_end() {
    let left = wide_left();
    let top = ScaleWidgetGeometry::new(Axis::Top)
        .with_tick_labels(["0", "1"])
        .with_index_label("x10^3");
    let parts = PlotParts::new()
        .with_scale(Axis::Left, &left)
        .with_scale(Axis::Top, &top);

    let mut layout = PlotLayout::new();
    layout.activate(&parts, plot_rect(), LayoutOptions::empty());

    assert_eq!(layout.canvas_rect(), Rect::new(40.0, 28.0, 320.0, 272.0));
    assert_eq!(layout.scale_rect(Axis::Top), Rect::new(40.0, 0.0, 320.0, 28.0));
    assert_eq!(
        layout.scale_index_rect(Axis::Top),
        Rect::new(360.0, 0.0, 40.0, 22.0)
    );
    assert_eq!(layout.dim_of_axis(Axis::Right), 40.0);
}

#[test]
fn right_badge_sits_at_the_scale_start() {
    // badge 46 x 22, scale 49px thick
    let left = wide_left();
    let right = ScaleWidgetGeometry::new(Axis::Right)
        .with_tick_labels(["1"])
        .with_index_label("x10^12");
    let parts = PlotParts::new()
        .with_scale(Axis::Left, &left)
        .with_scale(Axis::Right, &right);

    let mut layout = PlotLayout::new();
    layout.activate(&parts, plot_rect(), LayoutOptions::empty());

    assert_eq!(layout.canvas_rect(), Rect::new(40.0, 22.0, 311.0, 278.0));
    assert_eq!(layout.scale_rect(Axis::Right), Rect::new(351.0, 0.0, 49.0, 300.0));
    assert_eq!(
        layout.scale_index_rect(Axis::Right),
        Rect::new(351.0, 0.0, 46.0, 22.0)
    );
    assert_eq!(layout.dim_of_axis(Axis::Top), 22.0);
}

#[test]
fn fixed_right_axis_is_not_widened_by_badges() {
    let left = wide_left();
    let bottom = ScaleWidgetGeometry::new(Axis::Bottom)
        .with_tick_labels(["0", "1"])
        .with_index_label("x10^3");
    let parts = PlotParts::new()
        .with_scale(Axis::Left, &left)
        .with_scale(Axis::Bottom, &bottom);

    let mut layout = PlotLayout::new();
    layout
        .set_fixed_dim_of_axis(Axis::Right, 10.0)
        .expect("finite dim");
    layout.activate(&parts, plot_rect(), LayoutOptions::empty());

    assert_eq!(layout.canvas_rect(), Rect::new(40.0, 0.0, 350.0, 272.0));
    assert_eq!(layout.scale_rect(Axis::Right), Rect::new(390.0, 0.0, 10.0, 272.0));
    // inflated by the badge, then clipped to the plot
    assert_eq!(
        layout.scale_rect(Axis::Bottom),
        Rect::new(40.0, 272.0, 360.0, 28.0)
    );
}

#[test]
fn scale_is_measured_with_its_own_font() {
    // 12px glyphs: 12 + 4 + 8 + 1 extent, 2 margin, 1 pen
    let left = ScaleWidgetGeometry::with_metrics(
        Axis::Left,
        FontSpec::new("Sans", 20.0),
        MonospaceMetrics::default(),
    )
    .with_tick_labels(["0", "1"]);
    let parts = PlotParts::new().with_scale(Axis::Left, &left);

    let mut layout = PlotLayout::new();
    layout.activate(&parts, plot_rect(), LayoutOptions::empty());

    assert_eq!(layout.dim_of_axis(Axis::Left), 28.0);
    assert_eq!(layout.scale_rect(Axis::Left).width, 28.0);
}

// 396px on one line, two lines once the left axis takes 40px
const WRAPPING_FOOTER: &str = "readings were sampled at ten hertz and averaged over short windows";

#[test]
fn footer_rewraps_once_the_axis_width_is_known() {
    let left = wide_left();
    let footer = TextBlock::new(WRAPPING_FOOTER);
    let parts = PlotParts::new()
        .with_footer(&footer)
        .with_scale(Axis::Left, &left);

    let mut layout = PlotLayout::new();
    layout.activate(&parts, plot_rect(), LayoutOptions::empty());

    assert_eq!(layout.footer_rect(), Rect::new(40.0, 276.0, 360.0, 24.0));
    assert_eq!(layout.canvas_rect(), Rect::new(40.0, 0.0, 360.0, 271.0));
}

#[test]
fn round_limit_keeps_the_last_computed_dimensions() {
    let left = wide_left();
    let footer = TextBlock::new(WRAPPING_FOOTER);
    let parts = PlotParts::new()
        .with_footer(&footer)
        .with_scale(Axis::Left, &left);

    for rounds in [0, 1] {
        let mut layout = PlotLayout::new();
        layout.config_mut().max_line_break_rounds = rounds;
        let rects = *layout.activate(&parts, plot_rect(), LayoutOptions::empty());

        // stopped before the footer saw the axis width
        assert!(rects.scale_visible);
        assert_eq!(rects.footer, Rect::new(40.0, 288.0, 360.0, 12.0));
        assert_eq!(rects.canvas, Rect::new(40.0, 0.0, 360.0, 283.0));
        assert_eq!(layout.dim_of_axis(Axis::Left), 40.0);
        assert!(plot_rect().contains_rect(rects.bounding_rect(), 1e-9));
    }
}
