use approx::assert_relative_eq;
use wavescope::core::units::UnitStyle;
use wavescope::core::view_options::AxesLinesType;
use wavescope::core::{AxisModel, ChartMode, ChartsController, LineModel, Unit, ViewOptions};

fn test_unit() -> Unit {
    Unit::new("volt", "V", vec![1.0, 5.0, 10.0], 2, UnitStyle::Si)
}

fn controller(kind: AxesLinesType) -> ChartsController {
    let mut view_options = ViewOptions::default();
    view_options.axes_lines.kind = kind;
    let x_model = AxisModel::new(Unit::time(), 0.0, 1.0);
    ChartsController::new(ChartMode::Interactive, x_model, view_options).expect("valid model")
}

#[test]
fn empty_controller_has_unit_extent() {
    let charts = controller(AxesLinesType::Dynamic);
    assert_eq!(charts.x_extent(), (0.0, 1.0));
    assert_eq!(charts.num_samples(), 0);
    assert!(!charts.is_zoom_all_enabled());
}

#[test]
fn x_extent_spans_all_charts() {
    let mut charts = controller(AxesLinesType::Dynamic);
    charts
        .add_chart("ch1", AxisModel::new(test_unit(), -1.0, 1.0))
        .expect("chart")
        .add_line(LineModel::new(0.0, 4.0, -1.0, 1.0));
    charts
        .add_chart("ch2", AxisModel::new(test_unit(), 0.0, 5.0))
        .expect("chart")
        .add_line(LineModel::new(-2.0, 3.0, 0.0, 5.0));

    assert_eq!(charts.x_extent(), (-2.0, 4.0));
}

#[test]
fn sync_pushes_extents_and_pixel_spans_into_axes() {
    let mut charts = controller(AxesLinesType::Dynamic);
    charts
        .add_chart("ch1", AxisModel::new(test_unit(), 0.0, 0.0))
        .expect("chart")
        .add_line(LineModel::new(0.0, 2.0, -3.0, 3.0));
    charts.set_view_size(1290.0, 800.0);
    charts.sync();

    assert_eq!(charts.x_axis.from(), 0.0);
    assert_eq!(charts.x_axis.to(), 2.0);
    assert_eq!(charts.x_axis.distance_px(), charts.chart_width());

    let chart = charts.chart("ch1").expect("chart");
    assert_eq!(chart.y_axis.from(), -3.0);
    assert_eq!(chart.y_axis.to(), 3.0);
    assert_eq!(chart.y_axis.distance_px(), charts.chart_height());
}

#[test]
fn dynamic_layout_margins() {
    let mut charts = controller(AxesLinesType::Dynamic);
    charts.set_view_size(1290.0, 800.0);

    // No measured labels yet: y band is the 70 px minimum, plus scrollbar.
    assert_eq!(charts.min_left_margin(), 16.0 + 70.0);
    assert_eq!(charts.min_right_margin(), 16.0 + 1.0);
    assert_eq!(charts.min_top_margin(), 10.0);
    assert_eq!(charts.x_axis_height(), 16.0 + f64::max(32.0, 20.0));

    assert_eq!(charts.chart_width(), 1290.0 - 86.0 - 17.0);
    assert_eq!(charts.chart_height(), 800.0 - 20.0);

    let rect = charts.chart_rect();
    assert_eq!(rect.left, 86.5);
    assert_eq!(rect.top, 10.5);
}

#[test]
fn measured_labels_widen_margins() {
    let mut charts = controller(AxesLinesType::Dynamic);
    charts
        .add_chart("ch1", AxisModel::new(test_unit(), 0.0, 1.0))
        .expect("chart");
    charts.set_view_size(1290.0, 800.0);

    charts
        .chart_mut("ch1")
        .expect("chart")
        .y_axis
        .set_label_metrics(90.0, 14.0);

    // 90 px labels + 10 px gap exceed the 70 px minimum.
    assert_eq!(charts.min_left_margin(), 16.0 + 100.0);
}

#[test]
fn hiding_labels_and_buttons_shrinks_bands() {
    let mut charts = controller(AxesLinesType::Dynamic);
    charts.view_options.show_axis_labels = false;
    charts.view_options.show_zoom_buttons = false;
    charts.set_view_size(1000.0, 600.0);

    assert_eq!(charts.min_left_margin(), 16.0);
    assert_eq!(charts.x_axis_height(), 16.0);
    assert!(!charts.are_zoom_buttons_visible());
}

#[test]
fn preview_mode_hides_zoom_buttons() {
    let x_model = AxisModel::new(Unit::time(), 0.0, 1.0);
    let charts = ChartsController::new(ChartMode::Preview, x_model, ViewOptions::default())
        .expect("valid model");
    assert!(!charts.are_zoom_buttons_visible());
}

#[test]
fn fixed_layout_locks_aspect_ratio_and_centers() {
    let mut charts = controller(AxesLinesType::Fixed);
    charts.set_view_size(1290.0, 800.0);

    // max area 1187x780; 24:8 grid is width-bound here.
    let width = charts.chart_width();
    let height = charts.chart_height();
    assert_eq!(width, 1187.0);
    assert_relative_eq!(height, 8.0 * 1187.0 / 24.0);
    assert_relative_eq!(width / height, 24.0 / 8.0, epsilon = 1e-9);

    // Vertical slack is split between top and bottom margins.
    let slack = 780.0 - height;
    assert_relative_eq!(charts.top_margin(), 10.0 + (slack / 2.0).round());
    assert_relative_eq!(
        charts.top_margin() + charts.bottom_margin(),
        20.0 + slack,
        epsilon = 1e-9
    );
}

#[test]
fn zoom_all_fans_out_to_every_axis() {
    let mut charts = controller(AxesLinesType::Dynamic);
    charts
        .add_chart("ch1", AxisModel::new(test_unit(), 0.0, 0.0))
        .expect("chart")
        .add_line(LineModel::new(0.0, 10.0, 0.0, 5.0));
    charts.set_view_size(1000.0, 600.0);
    charts.global_options.enable_zoom_animations = false;
    charts.sync();

    charts.x_axis.zoom(2.0, 4.0);
    charts
        .chart_mut("ch1")
        .expect("chart")
        .y_axis
        .zoom(1.0, 2.0);
    assert!(charts.is_zoom_all_enabled());

    charts.zoom_all();
    assert_eq!(charts.x_axis.from(), 0.0);
    assert_eq!(charts.x_axis.to(), 10.0);
    let chart = charts.chart("ch1").expect("chart");
    assert_eq!(chart.y_axis.from(), 0.0);
    assert_eq!(chart.y_axis.to(), 5.0);
    assert!(!charts.is_zoom_all_enabled());
}

#[test]
fn advance_animations_reports_activity_across_axes() {
    let mut charts = controller(AxesLinesType::Dynamic);
    charts
        .add_chart("ch1", AxisModel::new(test_unit(), 0.0, 0.0))
        .expect("chart")
        .add_line(LineModel::new(0.0, 10.0, 0.0, 5.0));
    charts.set_view_size(1000.0, 600.0);
    charts.sync();

    charts.x_axis.zoom(2.0, 4.0);
    assert!(charts.x_axis.is_animation_active());

    assert!(charts.advance_animations(100.0));
    assert!(!charts.advance_animations(150.0));
    assert_eq!(charts.x_axis.from(), 2.0);
    assert_eq!(charts.x_axis.to(), 4.0);
}

#[test]
fn right_axis_tracks_its_own_lines() {
    let mut charts = controller(AxesLinesType::Dynamic);
    let chart = charts
        .add_chart("ch1", AxisModel::new(test_unit(), 0.0, 0.0))
        .expect("chart");
    chart
        .set_right_axis(AxisModel::new(Unit::current(), 0.0, 0.0))
        .expect("valid model");
    chart.add_line(LineModel::new(0.0, 1.0, -2.0, 2.0));
    chart.add_line(LineModel::new(0.0, 1.0, 0.0, 0.5).on_right_axis());
    charts.set_view_size(1000.0, 600.0);
    charts.sync();

    let chart = charts.chart("ch1").expect("chart");
    let right = chart.y_axis_right.as_ref().expect("right axis");
    assert_eq!(right.from(), 0.0);
    assert_eq!(right.to(), 0.5);
    assert_eq!(chart.y_axis.from(), -2.0);
    assert_eq!(chart.y_axis.to(), 2.0);

    // A right axis widens the right margin.
    assert!(charts.min_right_margin() > 17.0);
}

#[test]
fn waveform_lengths_drive_num_samples() {
    let mut charts = controller(AxesLinesType::Dynamic);
    charts
        .add_chart("ch1", AxisModel::new(test_unit(), 0.0, 1.0))
        .expect("chart")
        .set_waveform_length(5000);
    charts
        .add_chart("ch2", AxisModel::new(test_unit(), 0.0, 1.0))
        .expect("chart")
        .set_waveform_length(12000);

    assert_eq!(charts.num_samples(), 12000);
}
