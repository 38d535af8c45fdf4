use approx::assert_relative_eq;
use smallvec::SmallVec;
use wavescope::core::{AxisController, AxisEnv, AxisKind, AxisModel, AxisPosition, Unit, ZoomMode};
use wavescope::core::units::UnitStyle;

fn test_unit() -> Unit {
    Unit::new("volt", "V", vec![1.0, 5.0, 10.0], 2, UnitStyle::Si)
}

fn dynamic_axis(data_min: f64, data_max: f64, distance_px: f64) -> AxisController {
    let model = AxisModel::new(test_unit(), data_min, data_max);
    let mut axis =
        AxisController::new(AxisKind::Dynamic, AxisPosition::X, model).expect("valid model");
    axis.set_env(AxisEnv {
        data_min,
        data_max,
        distance_px,
        steps: SmallVec::new(),
        animations_enabled: false,
        ..AxisEnv::default()
    });
    axis
}

#[test]
fn all_mode_pins_window_to_data_extent() {
    let axis = dynamic_axis(0.0, 10.0, 1000.0);
    assert_eq!(axis.from(), 0.0);
    assert_eq!(axis.to(), 10.0);
    assert!(!axis.is_scroll_enabled());
}

#[test]
fn default_mode_uses_model_window() {
    let model = AxisModel::new(test_unit(), 0.0, 10.0).with_default_window(2.0, 8.0);
    let mut axis =
        AxisController::new(AxisKind::Dynamic, AxisPosition::X, model).expect("valid model");
    axis.set_env(AxisEnv {
        data_min: 0.0,
        data_max: 10.0,
        distance_px: 1000.0,
        animations_enabled: false,
        ..AxisEnv::default()
    });
    assert_eq!(axis.from(), 2.0);
    assert_eq!(axis.to(), 8.0);
}

#[test]
fn zoom_sets_custom_window_synchronously_when_animations_are_off() {
    let mut axis = dynamic_axis(0.0, 10.0, 1000.0);
    axis.zoom(2.0, 4.0);
    assert!(!axis.is_animation_active());
    assert_eq!(axis.from(), 2.0);
    assert_eq!(axis.to(), 4.0);
    assert_eq!(axis.model.dynamic.zoom_mode, ZoomMode::Custom);
    assert!(axis.is_scroll_enabled());
}

#[test]
fn zoom_window_is_clamped_to_data_extent() {
    let mut axis = dynamic_axis(0.0, 10.0, 1000.0);
    axis.zoom(8.0, 14.0);
    assert_relative_eq!(axis.from(), 4.0);
    assert_eq!(axis.to(), 10.0);
}

#[test]
fn zoom_narrower_than_finest_step_widens_to_one_step() {
    let mut axis = dynamic_axis(0.0, 10.0, 1000.0);
    // Requested window is 0.3 wide; steps[0] is 1.
    axis.zoom(9.5, 9.8);
    assert_relative_eq!(axis.from(), 9.0);
    assert_relative_eq!(axis.to(), 10.0);
}

#[test]
fn zoom_in_then_zoom_out_restores_full_extent() {
    let mut axis = dynamic_axis(0.0, 10.0, 1000.0);
    axis.zoom_in();
    assert_relative_eq!(axis.from(), 0.0);
    assert_relative_eq!(axis.to(), 10.0 / 1.5);
    axis.zoom_out();
    assert_eq!(axis.from(), 0.0);
    assert_eq!(axis.to(), 10.0);
}

#[test]
fn zoom_out_at_full_extent_is_rejected() {
    let mut axis = dynamic_axis(0.0, 10.0, 1000.0);
    assert!(!axis.zoom_out_enabled());
    axis.zoom_out();
    assert_eq!(axis.from(), 0.0);
    assert_eq!(axis.to(), 10.0);
}

#[test]
fn zoom_around_pivot_keeps_value_under_pivot_fixed() {
    let mut axis = dynamic_axis(0.0, 10.0, 1000.0);
    let pivot_px = 250.0;
    let pinned = axis.px_to_value(pivot_px);

    axis.zoom_around_pivot(pivot_px, true);

    assert_relative_eq!(axis.px_to_value(pivot_px), pinned, epsilon = 1e-9);
    assert!(axis.distance() < 10.0);
}

#[test]
fn pan_is_clamped_to_data_extent() {
    let mut axis = dynamic_axis(0.0, 10.0, 1000.0);
    axis.zoom(2.0, 4.0);

    axis.pan_to(-5.0);
    assert_eq!(axis.from(), 0.0);
    assert_eq!(axis.to(), 2.0);

    axis.pan_to(9.5);
    assert_eq!(axis.from(), 8.0);
    assert_eq!(axis.to(), 10.0);
}

#[test]
fn pan_by_direction_moves_five_percent_of_distance() {
    let mut axis = dynamic_axis(0.0, 100.0, 1000.0);
    axis.zoom(40.0, 60.0);
    axis.pan_by_direction(1.0);
    assert_relative_eq!(axis.from(), 41.0);
    assert_relative_eq!(axis.to(), 61.0);
}

#[test]
fn page_and_home_end_navigation() {
    let mut axis = dynamic_axis(0.0, 100.0, 1000.0);
    axis.zoom(0.0, 20.0);

    axis.page_up();
    assert_relative_eq!(axis.from(), 20.0);
    assert_relative_eq!(axis.to(), 40.0);

    axis.page_down();
    assert_relative_eq!(axis.from(), 0.0);

    axis.end();
    assert_relative_eq!(axis.from(), 80.0);
    assert_relative_eq!(axis.to(), 100.0);

    axis.home();
    assert_relative_eq!(axis.from(), 0.0);
}

#[test]
fn zoom_all_returns_to_data_extent() {
    let mut axis = dynamic_axis(0.0, 10.0, 1000.0);
    axis.zoom(2.0, 4.0);
    axis.zoom_all();
    assert_eq!(axis.from(), 0.0);
    assert_eq!(axis.to(), 10.0);
    assert_eq!(axis.model.dynamic.zoom_mode, ZoomMode::All);
}

#[test]
fn pixel_transforms_round_trip_on_linear_axis() {
    let mut axis = dynamic_axis(-5.0, 5.0, 800.0);
    axis.zoom(-2.0, 3.0);
    for value in [-2.0, -0.5, 0.0, 1.25, 3.0] {
        let px = axis.value_to_px(value);
        assert_relative_eq!(axis.px_to_value(px), value, epsilon = 1e-9);
    }
}

#[test]
fn degenerate_window_has_distance_one() {
    let model = AxisModel::new(test_unit(), 3.0, 3.0);
    let mut axis =
        AxisController::new(AxisKind::Dynamic, AxisPosition::X, model).expect("valid model");
    axis.set_env(AxisEnv {
        data_min: 3.0,
        data_max: 3.0,
        distance_px: 1000.0,
        animations_enabled: false,
        ..AxisEnv::default()
    });
    assert_eq!(axis.distance(), 1.0);
    assert_eq!(axis.scale(), 1000.0);
}

#[test]
fn animated_zoom_interpolates_and_lands_on_target() {
    let mut axis = dynamic_axis(0.0, 10.0, 1000.0);
    let mut env = axis.env().clone();
    env.animations_enabled = true;
    axis.set_env(env);

    axis.zoom(2.0, 4.0);
    assert!(axis.is_animation_active());
    assert_eq!(axis.from(), 0.0);
    assert_eq!(axis.to(), 10.0);

    assert!(axis.advance_animation(125.0));
    assert_relative_eq!(axis.from(), 1.0);
    assert_relative_eq!(axis.to(), 7.0);

    assert!(!axis.advance_animation(125.0));
    assert!(!axis.is_animation_active());
    assert_eq!(axis.from(), 2.0);
    assert_eq!(axis.to(), 4.0);
}

#[test]
fn superseding_zoom_starts_from_interpolated_window() {
    let mut axis = dynamic_axis(0.0, 10.0, 1000.0);
    let mut env = axis.env().clone();
    env.animations_enabled = true;
    axis.set_env(env);

    axis.zoom(2.0, 4.0);
    axis.advance_animation(125.0);

    // The second zoom supersedes the first; the model already holds [2, 4],
    // so the new tween ends on the second target regardless.
    axis.zoom(6.0, 8.0);
    assert!(axis.is_animation_active());
    assert!(!axis.advance_animation(250.0));
    assert_eq!(axis.from(), 6.0);
    assert_eq!(axis.to(), 8.0);
}

#[test]
fn logarithmic_transform_round_trips_in_range() {
    let model = AxisModel::new(test_unit(), 1.0, 100.0).with_logarithmic(true);
    let mut axis =
        AxisController::new(AxisKind::Dynamic, AxisPosition::Y, model).expect("valid model");
    axis.set_env(AxisEnv {
        data_min: 1.0,
        data_max: 100.0,
        distance_px: 1000.0,
        animations_enabled: false,
        ..AxisEnv::default()
    });

    for value in [5.0, 10.0, 50.0, 100.0] {
        let px = axis.value_to_px(value);
        assert_relative_eq!(axis.px_to_value(px), value, epsilon = 1e-9);
    }
}

#[test]
fn logarithmic_transform_clamps_to_data_extent() {
    let model = AxisModel::new(test_unit(), 1.0, 100.0).with_logarithmic(true);
    let mut axis =
        AxisController::new(AxisKind::Dynamic, AxisPosition::Y, model).expect("valid model");
    axis.set_env(AxisEnv {
        data_min: 1.0,
        data_max: 100.0,
        distance_px: 1000.0,
        animations_enabled: false,
        ..AxisEnv::default()
    });

    assert_eq!(axis.to_log_scale(1000.0), 100.0);
    assert_eq!(axis.from_log_scale(0.5), 1.0);
}

#[test]
fn invalid_model_is_rejected() {
    let mut model = AxisModel::new(test_unit(), 0.0, 10.0);
    model.max_value = f64::NAN;
    assert!(AxisController::new(AxisKind::Dynamic, AxisPosition::X, model).is_err());

    let mut model = AxisModel::new(test_unit(), 0.0, 10.0);
    model.min_scale = Some(-1.0);
    assert!(AxisController::new(AxisKind::Dynamic, AxisPosition::X, model).is_err());
}
