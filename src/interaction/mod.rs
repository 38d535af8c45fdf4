//! Pointer-gesture state machines.
//!
//! These mirror the pointer protocol of a typical host: `begin` on pointer
//! down, `move_to` on every move, `finish`/`cancel` on pointer up. Points are
//! in chart-local pixels with the origin at the bottom-left of the plot area
//! (x right, y up), matching the axis pixel transforms. The gestures hold no
//! axis references; the host passes the affected controllers into each call.

use ordered_float::OrderedFloat;
use tracing::debug;

use crate::core::axis::AxisController;
use crate::core::ticks::Tick;

/// A zoom rectangle thinner than this (per dimension) commits nothing;
/// it was almost certainly a slipped click.
pub const MIN_ZOOM_RECT_SIZE_PX: f64 = 5.0;

/// Aspect ratio beyond which a zoom rectangle locks to one dimension.
const ORIENTATION_LOCK_RATIO: f64 = 4.0;

/// Accumulated wheel travel needed to trigger one zoom/pan step.
const WHEEL_STEP_THRESHOLD: f64 = 10.0;

/// Chart-local pixel point, y up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Drag-to-pan: horizontal motion pans the x axis, vertical motion pans the
/// chart's y axes.
#[derive(Debug, Clone, Copy)]
pub struct PanGesture {
    last_point: Point,
}

impl PanGesture {
    #[must_use]
    pub fn begin(point: Point) -> Self {
        Self { last_point: point }
    }

    pub fn move_to<'a>(
        &mut self,
        point: Point,
        x_axis: &mut AxisController,
        y_axes: impl IntoIterator<Item = &'a mut AxisController>,
    ) {
        let dx = self.last_point.x - point.x;
        x_axis.pan_by_distance_in_px(dx);

        let dy = self.last_point.y - point.y;
        for axis in y_axes {
            axis.pan_by_distance_in_px(dy);
        }

        self.last_point = point;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RectOrientation {
    X,
    Y,
    Both,
}

/// Live zoom-rectangle overlay, in chart-local pixels (y up).
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomRectOverlay {
    pub left: f64,
    pub bottom: f64,
    pub width: f64,
    pub height: f64,
    /// Value span of the rectangle along x, formatted with the x unit.
    pub x_range_label: Option<String>,
    pub y_range_label: Option<String>,
}

/// Drag-a-rectangle-to-zoom.
///
/// A long thin rectangle locks to its dominant dimension so users can zoom
/// one axis without disturbing the other.
#[derive(Debug, Clone, Copy)]
pub struct ZoomRectGesture {
    chart_width: f64,
    chart_height: f64,
    start: Point,
    end: Point,
    orientation: Option<RectOrientation>,
}

impl ZoomRectGesture {
    #[must_use]
    pub fn begin(point: Point, chart_width: f64, chart_height: f64) -> Self {
        let start = clamp_point(point, chart_width, chart_height);
        Self {
            chart_width,
            chart_height,
            start,
            end: start,
            orientation: None,
        }
    }

    pub fn move_to(&mut self, point: Point) {
        self.end = clamp_point(point, self.chart_width, self.chart_height);

        let width = (self.start.x - self.end.x).abs();
        let height = (self.start.y - self.end.y).abs();

        self.orientation = Some(if width / height > ORIENTATION_LOCK_RATIO {
            RectOrientation::X
        } else if height / width > ORIENTATION_LOCK_RATIO {
            RectOrientation::Y
        } else {
            RectOrientation::Both
        });
    }

    #[must_use]
    pub fn orientation(&self) -> Option<RectOrientation> {
        self.orientation
    }

    /// Commits the zoom. Dimensions thinner than [`MIN_ZOOM_RECT_SIZE_PX`]
    /// are dropped; cancelling instead of finishing commits nothing.
    pub fn finish(self, x_axis: &mut AxisController, y_axis: &mut AxisController) {
        let Some(orientation) = self.orientation else {
            return;
        };

        if matches!(orientation, RectOrientation::X | RectOrientation::Both) {
            let from_px = self.start.x.min(self.end.x);
            let to_px = self.start.x.max(self.end.x);
            if to_px - from_px >= MIN_ZOOM_RECT_SIZE_PX {
                x_axis.zoom(
                    x_axis.px_to_linear_value(from_px),
                    x_axis.px_to_linear_value(to_px),
                );
            } else {
                debug!("zoom rect narrower than {MIN_ZOOM_RECT_SIZE_PX} px, x ignored");
            }
        }

        if matches!(orientation, RectOrientation::Y | RectOrientation::Both) {
            let from_px = self.start.y.min(self.end.y);
            let to_px = self.start.y.max(self.end.y);
            if to_px - from_px >= MIN_ZOOM_RECT_SIZE_PX {
                y_axis.zoom(
                    y_axis.px_to_linear_value(from_px),
                    y_axis.px_to_linear_value(to_px),
                );
            } else {
                debug!("zoom rect narrower than {MIN_ZOOM_RECT_SIZE_PX} px, y ignored");
            }
        }
    }

    /// Rectangle to draw while the gesture is live, expanded to the full
    /// chart along a locked dimension.
    #[must_use]
    pub fn overlay(&self, x_axis: &AxisController, y_axis: &AxisController) -> Option<ZoomRectOverlay> {
        let orientation = self.orientation?;

        let mut left = self.start.x.min(self.end.x);
        let mut bottom = self.start.y.min(self.end.y);
        let mut width = (self.start.x - self.end.x).abs();
        let mut height = (self.start.y - self.end.y).abs();

        match orientation {
            RectOrientation::X => {
                bottom = 0.0;
                height = self.chart_height;
            }
            RectOrientation::Y => {
                left = 0.0;
                width = self.chart_width;
            }
            RectOrientation::Both => {}
        }

        let x_range_label = matches!(orientation, RectOrientation::X | RectOrientation::Both)
            .then(|| range_label(x_axis, left, left + width));
        let y_range_label = matches!(orientation, RectOrientation::Y | RectOrientation::Both)
            .then(|| range_label(y_axis, bottom, bottom + height));

        Some(ZoomRectOverlay {
            left,
            bottom,
            width,
            height,
            x_range_label,
            y_range_label,
        })
    }
}

fn range_label(axis: &AxisController, from_px: f64, to_px: f64) -> String {
    let span = axis.px_to_linear_value(to_px) - axis.px_to_linear_value(from_px);
    axis.model.unit.format_value_with_precision(span, 4)
}

fn clamp_point(point: Point, chart_width: f64, chart_height: f64) -> Point {
    Point {
        x: point.x.clamp(0.0, chart_width),
        y: point.y.clamp(0.0, chart_height),
    }
}

/// What an accumulated wheel step should do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WheelAction {
    ZoomAroundPivot { zoom_in: bool },
    Pan { direction: f64 },
}

/// Accumulates fractional wheel deltas and emits one action per
/// [`WHEEL_STEP_THRESHOLD`] of travel. Ctrl-wheel zooms, plain wheel pans.
#[derive(Debug, Clone, Copy, Default)]
pub struct WheelAccumulator {
    delta: f64,
}

impl WheelAccumulator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, delta_y: f64, ctrl_key: bool) -> Option<WheelAction> {
        self.delta += delta_y;
        if self.delta.abs() <= WHEEL_STEP_THRESHOLD {
            return None;
        }

        let up = self.delta < 0.0;
        self.delta = 0.0;

        Some(if ctrl_key {
            WheelAction::ZoomAroundPivot { zoom_in: up }
        } else {
            WheelAction::Pan {
                direction: if up { 1.0 } else { -1.0 },
            }
        })
    }

    pub fn reset(&mut self) {
        self.delta = 0.0;
    }
}

/// Applies a wheel action to one axis. Pans are dropped when the axis
/// already shows its full extent.
pub fn apply_wheel_action(action: WheelAction, pivot_px: f64, axis: &mut AxisController) {
    match action {
        WheelAction::ZoomAroundPivot { zoom_in } => axis.zoom_around_pivot(pivot_px, zoom_in),
        WheelAction::Pan { direction } => {
            if axis.is_scroll_enabled() {
                axis.pan_by_direction(direction);
            }
        }
    }
}

/// Resolves a dragged value against the axis ticks: the nearest snappable
/// tick wins unless snapping is off or bypassed (shift key).
#[must_use]
pub fn snap_to_value(value: f64, ticks: &[Tick], snap_enabled: bool) -> f64 {
    if !snap_enabled {
        return value;
    }
    ticks
        .iter()
        .filter(|tick| tick.allow_snap_to)
        .min_by_key(|tick| OrderedFloat((tick.value - value).abs()))
        .map_or(value, |tick| tick.value)
}
