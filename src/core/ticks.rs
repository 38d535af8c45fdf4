//! Tick and grid-line generation.
//!
//! Ticks are derived on demand from the axis window, never stored. Colors
//! come out as CSS color strings so hosts can feed them straight into SVG or
//! canvas attributes; the palette switches on the black/white background
//! option.

use std::collections::HashSet;

use crate::core::axis::{AxisController, AxisKind, AxisPosition};
use crate::core::units::Unit;

/// A step level whose on-screen spacing falls below this is skipped.
pub const MIN_TICK_DISTANCE_PX: f64 = 4.0;
/// Spacing at which tick opacity reaches its maximum.
pub const MAX_TICK_DISTANCE_PX: f64 = 400.0;
/// Minimum spacing between labeled x-axis ticks.
pub const X_AXIS_MIN_TICK_LABEL_WIDTH_PX: f64 = 100.0;
/// Minimum spacing between labeled y-axis ticks.
pub const Y_AXIS_MIN_TICK_LABEL_WIDTH_PX: f64 = 20.0;

const LINE_MIN_OPACITY: f64 = 0.1;
const LINE_MAX_OPACITY: f64 = 0.9;
const TEXT_MIN_OPACITY: f64 = 0.8;
const TEXT_MAX_OPACITY: f64 = 1.0;

const LINE_RGB_ON_BLACK: &str = "192, 192, 192";
const LINE_RGB_ON_WHITE: &str = "164, 164, 164";
const TEXT_RGB_ON_BLACK: &str = "255, 255, 255";
const TEXT_RGB_ON_WHITE: &str = "0, 0, 0";

const FIXED_MAJOR_LINE_ON_WHITE: &str = "#ccc";
const FIXED_MINOR_LINE_ON_WHITE: &str = "#f0f0f0";
const FIXED_MAJOR_LINE_ON_BLACK: &str = "#444";
const FIXED_MINOR_LINE_ON_BLACK: &str = "#222";
const FIXED_MAJOR_TEXT_ON_WHITE: &str = "#666";
const FIXED_MINOR_TEXT_ON_WHITE: &str = "#999";
const FIXED_MAJOR_TEXT_ON_BLACK: &str = "#eee";
const FIXED_MINOR_TEXT_ON_BLACK: &str = "#ddd";

/// One grid line / axis label.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Pixel position along the axis, measured from `from`.
    pub px: f64,
    pub value: f64,
    /// Empty when the tick draws a line but no label.
    pub label: String,
    pub line_color: String,
    pub text_color: String,
    pub is_major_line: bool,
    /// Cursor snapping may target this tick.
    pub allow_snap_to: bool,
    /// Step level that produced the tick; `None` for fallback ticks.
    pub step: Option<f64>,
}

/// Generates the tick set for the axis' current window.
#[must_use]
pub fn generate_ticks(axis: &AxisController) -> Vec<Tick> {
    match axis.kind() {
        AxisKind::Dynamic => dynamic_ticks(axis),
        AxisKind::Fixed => fixed_ticks(axis),
    }
}

fn min_label_px(position: AxisPosition) -> f64 {
    if position.is_horizontal() {
        X_AXIS_MIN_TICK_LABEL_WIDTH_PX
    } else {
        Y_AXIS_MIN_TICK_LABEL_WIDTH_PX
    }
}

fn opacity_for_spacing(unit_px: f64, min: f64, max: f64) -> f64 {
    let t = min
        + (max - min) * (unit_px - MIN_TICK_DISTANCE_PX)
            / (MAX_TICK_DISTANCE_PX - MIN_TICK_DISTANCE_PX);
    t.clamp(min, max)
}

fn dynamic_line_color(black_background: bool, opacity: f64) -> String {
    let rgb = if black_background {
        LINE_RGB_ON_BLACK
    } else {
        LINE_RGB_ON_WHITE
    };
    format!("rgba({rgb}, {opacity})")
}

fn dynamic_text_color(black_background: bool, opacity: f64) -> String {
    let rgb = if black_background {
        TEXT_RGB_ON_BLACK
    } else {
        TEXT_RGB_ON_WHITE
    };
    format!("rgba({rgb}, {opacity})")
}

fn format_axis_value(axis: &AxisController, unit: &Unit, value: f64) -> String {
    let value = match axis.model.semi_logarithmic {
        Some(params) => 10f64.powf(value + params.a) + params.b,
        None => value,
    };
    unit.format_value_with_precision(value, 4)
}

struct DynamicTickPass<'a> {
    axis: &'a AxisController,
    steps: &'a [f64],
    scale: f64,
    min_label_px: f64,
    black_background: bool,
}

impl DynamicTickPass<'_> {
    fn push_tick(&self, ticks: &mut Vec<Tick>, value: f64, unit_px: f64, label: String, step: f64) {
        let opacity = opacity_for_spacing(unit_px, LINE_MIN_OPACITY, LINE_MAX_OPACITY);
        let text_opacity = opacity_for_spacing(unit_px, TEXT_MIN_OPACITY, TEXT_MAX_OPACITY);
        ticks.push(Tick {
            px: self.axis.value_to_px(value),
            value,
            label,
            line_color: dynamic_line_color(self.black_background, opacity),
            text_color: dynamic_text_color(self.black_background, text_opacity),
            is_major_line: false,
            allow_snap_to: true,
            step: Some(step),
        });
    }

    /// Recursive additive subdivision, coarsest step level first. Finer
    /// levels fill the gaps between the ticks of the level above.
    fn add_linear_lines(&self, ticks: &mut Vec<Tick>, from: f64, to: f64, i_step: usize) {
        if from >= to {
            return;
        }

        let step = self.steps[i_step];

        let unit_px = step * self.scale;
        if unit_px < MIN_TICK_DISTANCE_PX {
            return;
        }

        let from_value = (from / step).ceil() * step;
        let to_value = (to / step).floor() * step;

        let mut last_value = from;
        let mut value = from_value;
        while value <= to_value {
            let label = if unit_px >= self.min_label_px {
                format_axis_value(self.axis, &self.axis.model.unit, value)
            } else {
                String::new()
            };
            self.push_tick(ticks, value, unit_px, label, step);

            if i_step > 0 {
                self.add_linear_lines(ticks, last_value, value, i_step - 1);
            }
            last_value = value;
            value += step;
        }

        if i_step > 0 {
            self.add_linear_lines(ticks, last_value, to, i_step - 1);
        }
    }

    /// Multiplicative variant for logarithmic axes: spacing is measured
    /// through the log transform, labels are assigned afterwards.
    fn add_logarithmic_lines(&self, ticks: &mut Vec<Tick>, from: f64, to: f64, i_step: usize) {
        let step = self.steps[i_step];

        let from_value = (from / step).ceil() * step;
        let to_value = (to / step).floor() * step;

        let unit_px = self.axis.value_to_px(from_value) - self.axis.value_to_px(from_value - step);
        if unit_px < MIN_TICK_DISTANCE_PX {
            return;
        }

        let mut last_value = from;
        let mut value = from_value;
        while value <= to_value {
            self.push_tick(ticks, value, unit_px, String::new(), step);

            if i_step > 0 {
                self.add_logarithmic_lines(ticks, last_value, value, i_step - 1);
            }
            last_value = value;
            value += step;
        }

        if i_step > 0 {
            self.add_logarithmic_lines(ticks, last_value, to, i_step - 1);
        }
    }
}

fn dynamic_ticks(axis: &AxisController) -> Vec<Tick> {
    let steps = axis.steps();
    if steps.is_empty() {
        return Vec::new();
    }

    let black_background = axis.env().black_background;
    let pass = DynamicTickPass {
        axis,
        steps,
        scale: axis.scale(),
        min_label_px: min_label_px(axis.position()),
        black_background,
    };

    let mut ticks = Vec::new();

    let logarithmic = axis.model.logarithmic;
    if logarithmic {
        let from = axis.px_to_value(axis.linear_value_to_px(axis.from()));
        let to = axis.px_to_value(axis.linear_value_to_px(axis.to()));
        pass.add_logarithmic_lines(&mut ticks, from, to, steps.len() - 1);
    } else {
        pass.add_linear_lines(&mut ticks, axis.from(), axis.to(), steps.len() - 1);
    }

    if ticks.is_empty() && !logarithmic {
        // No step level fit the window, mark at least its boundaries.
        let step = steps[0];
        for value in [
            (axis.from() / step).ceil() * step,
            (axis.to() / step).floor() * step,
        ] {
            ticks.push(Tick {
                px: axis.value_to_px(value),
                value,
                label: axis.model.unit.format_value(value),
                line_color: dynamic_line_color(black_background, LINE_MAX_OPACITY),
                text_color: dynamic_text_color(black_background, TEXT_MAX_OPACITY),
                is_major_line: false,
                allow_snap_to: false,
                step: None,
            });
        }
    } else if logarithmic {
        ticks.sort_by(|a, b| a.px.total_cmp(&b.px));
        assign_logarithmic_labels(axis, steps, &mut ticks, pass.min_label_px);
    }

    dedup_labels(&mut ticks);

    ticks
}

/// Places labels from the coarsest step level down, skipping any tick whose
/// label would crowd an already labeled neighbor.
fn assign_logarithmic_labels(
    axis: &AxisController,
    steps: &[f64],
    ticks: &mut [Tick],
    min_label_px: f64,
) {
    for &step in steps.iter().rev() {
        for i_tick in 0..ticks.len() {
            if ticks[i_tick].step != Some(step) {
                continue;
            }
            let px = ticks[i_tick].px;

            let crowded_left = ticks[..i_tick]
                .iter()
                .rev()
                .take_while(|t| px - t.px < min_label_px)
                .any(|t| !t.label.is_empty());
            let crowded_right = ticks[i_tick + 1..]
                .iter()
                .take_while(|t| t.px - px < min_label_px)
                .any(|t| !t.label.is_empty());
            if crowded_left || crowded_right {
                continue;
            }

            ticks[i_tick].label = axis.model.unit.format_value(ticks[i_tick].value);
        }
    }
}

/// Drops later ticks that repeat a non-empty label.
fn dedup_labels(ticks: &mut Vec<Tick>) {
    let mut seen = HashSet::new();
    ticks.retain(|tick| tick.label.is_empty() || seen.insert(tick.label.clone()));
}

/// Evenly spaced `major * minor` grid, inclusive of both window edges.
fn fixed_ticks(axis: &AxisController) -> Vec<Tick> {
    let env = axis.env();
    // Hosts can push zero subdivision counts; treat them as 1 so the grid
    // math never divides by zero.
    let n = env.major_subdivision.max(1);
    let m = env.minor_subdivision.max(1);
    let black_background = env.black_background;

    let from = axis.from();
    let to = axis.to();
    let minor_step = (to - from) / f64::from(m * n);

    let (major_line, minor_line, major_text, minor_text) = if black_background {
        (
            FIXED_MAJOR_LINE_ON_BLACK,
            FIXED_MINOR_LINE_ON_BLACK,
            FIXED_MAJOR_TEXT_ON_BLACK,
            FIXED_MINOR_TEXT_ON_BLACK,
        )
    } else {
        (
            FIXED_MAJOR_LINE_ON_WHITE,
            FIXED_MINOR_LINE_ON_WHITE,
            FIXED_MAJOR_TEXT_ON_WHITE,
            FIXED_MINOR_TEXT_ON_WHITE,
        )
    };

    let min_label_px = min_label_px(axis.position());
    let is_x = axis.position().is_horizontal();

    let mut ticks = Vec::with_capacity((n * m + 1) as usize);
    let mut visible_label_px = 0.0;

    for i in 0..=n * m {
        let value = from + f64::from(i) * minor_step;
        let is_major_line = i % m == 0;
        let px = axis.value_to_px(value).round();

        // On the x axis, labels appear at both edges and wherever there is
        // room against the previous label and the right edge. The y axis
        // labels every major line.
        let mut label_visible = false;
        if is_major_line {
            if is_x {
                if i == 0 || i == n * m {
                    label_visible = true;
                } else if px - visible_label_px >= min_label_px
                    && axis.value_to_px(to).round() - px >= min_label_px
                {
                    label_visible = true;
                }
                if label_visible {
                    visible_label_px = px;
                }
            } else {
                label_visible = true;
            }
        }

        ticks.push(Tick {
            px,
            value,
            label: if label_visible {
                axis.model.unit.format_value(value)
            } else {
                String::new()
            },
            line_color: if is_major_line { major_line } else { minor_line }.to_owned(),
            text_color: if is_major_line { major_text } else { minor_text }.to_owned(),
            is_major_line,
            allow_snap_to: true,
            step: None,
        });
    }

    ticks
}
