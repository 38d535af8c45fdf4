//! Axis controllers.
//!
//! One [`AxisController`] drives one axis (x, y or right-hand y) and owns its
//! window `[from, to]`, the value/pixel transforms and every pan/zoom
//! operation. The two axis flavors are a tagged union: a [`AxisKind::Dynamic`]
//! axis zooms continuously against the unit's nice-step table, a
//! [`AxisKind::Fixed`] axis locks to an oscilloscope-style `k * 10^i`
//! subdivision grid.
//!
//! The controller carries no references to the rest of the chart. Everything
//! it needs from the outside (data extents, pixel span, resolved step table,
//! grid subdivision counts) arrives through [`AxisEnv`], pushed in by the
//! charts controller on every sync.

use smallvec::SmallVec;
use tracing::debug;

use crate::core::animation::RangeTween;
use crate::core::model::{AxisModel, ZoomMode};
use crate::error::ChartResult;

/// Zoom in/out distance factor.
pub const ZOOM_STEP: f64 = 1.5;
/// Pan-by-direction step, as a fraction of the visible distance.
pub const PAN_STEP: f64 = 0.05;

const MIN_FIXED_SCALE_POWER: i32 = -15;
const MAX_FIXED_SCALE_POWER: i32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisKind {
    Dynamic,
    Fixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisPosition {
    X,
    Y,
    YRight,
}

impl AxisPosition {
    #[must_use]
    pub fn is_horizontal(self) -> bool {
        matches!(self, AxisPosition::X)
    }
}

/// Environment pushed into an axis by the charts controller.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisEnv {
    /// Data extent along this axis.
    pub data_min: f64,
    pub data_max: f64,
    /// Pixel span the axis maps onto (chart width or height).
    pub distance_px: f64,
    /// Resolved nice-step table; empty means "use the unit's own steps".
    pub steps: SmallVec<[f64; 32]>,
    /// Fixed-grid subdivision counts along this axis.
    pub major_subdivision: u32,
    pub minor_subdivision: u32,
    /// Whether zoom/pan mutations animate.
    pub animations_enabled: bool,
    /// Tick palette selector.
    pub black_background: bool,
}

impl Default for AxisEnv {
    fn default() -> Self {
        Self {
            data_min: 0.0,
            data_max: 1.0,
            distance_px: 1.0,
            steps: SmallVec::new(),
            major_subdivision: 24,
            minor_subdivision: 5,
            animations_enabled: true,
            black_background: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AxisController {
    kind: AxisKind,
    position: AxisPosition,
    pub model: AxisModel,
    env: AxisEnv,
    tween: Option<RangeTween>,
    label_width_px: f64,
    label_height_px: f64,
}

impl AxisController {
    pub fn new(kind: AxisKind, position: AxisPosition, model: AxisModel) -> ChartResult<Self> {
        model.validate()?;
        Ok(Self {
            kind,
            position,
            model,
            env: AxisEnv::default(),
            tween: None,
            label_width_px: 0.0,
            label_height_px: 0.0,
        })
    }

    #[must_use]
    pub fn kind(&self) -> AxisKind {
        self.kind
    }

    #[must_use]
    pub fn position(&self) -> AxisPosition {
        self.position
    }

    #[must_use]
    pub fn env(&self) -> &AxisEnv {
        &self.env
    }

    pub fn set_env(&mut self, env: AxisEnv) {
        self.env = env;
    }

    /// Host-measured bounding box of the rendered tick labels, used by the
    /// charts controller when computing margins.
    pub fn set_label_metrics(&mut self, width_px: f64, height_px: f64) {
        self.label_width_px = width_px;
        self.label_height_px = height_px;
    }

    #[must_use]
    pub fn label_width_px(&self) -> f64 {
        self.label_width_px
    }

    #[must_use]
    pub fn label_height_px(&self) -> f64 {
        self.label_height_px
    }

    /// Nice-step table for this axis: the view-options override when present,
    /// the unit's own steps otherwise.
    #[must_use]
    pub fn steps(&self) -> &[f64] {
        if self.env.steps.is_empty() {
            self.model.unit.steps()
        } else {
            &self.env.steps
        }
    }

    fn first_step(&self) -> f64 {
        self.steps().first().copied().unwrap_or(1.0)
    }

    // ---- data extent ----

    /// Smallest value the window may reach. Fixed axes outside "all" mode
    /// extend the extent to whatever the grid currently shows.
    #[must_use]
    pub fn min_value(&self) -> f64 {
        match self.kind {
            AxisKind::Dynamic => self.env.data_min,
            AxisKind::Fixed => {
                if self.model.fixed.zoom_mode == ZoomMode::All {
                    self.env.data_min
                } else {
                    self.env.data_min.min(self.from())
                }
            }
        }
    }

    #[must_use]
    pub fn max_value(&self) -> f64 {
        match self.kind {
            AxisKind::Dynamic => self.env.data_max,
            AxisKind::Fixed => {
                if self.model.fixed.zoom_mode == ZoomMode::All {
                    self.env.data_max
                } else {
                    self.env.data_max.max(self.to())
                }
            }
        }
    }

    #[must_use]
    pub fn range(&self) -> f64 {
        self.max_value() - self.min_value()
    }

    // ---- visible window ----

    #[must_use]
    pub fn from(&self) -> f64 {
        if let Some(tween) = &self.tween {
            return tween.current().0;
        }
        match self.kind {
            AxisKind::Dynamic => self.dynamic_from(),
            AxisKind::Fixed => self.subdivision_offset(),
        }
    }

    #[must_use]
    pub fn to(&self) -> f64 {
        if let Some(tween) = &self.tween {
            return tween.current().1;
        }
        match self.kind {
            AxisKind::Dynamic => self.dynamic_to(),
            AxisKind::Fixed => {
                self.subdivision_offset()
                    + self.subdivision_scale() * f64::from(self.env.major_subdivision)
            }
        }
    }

    fn dynamic_from(&self) -> f64 {
        match self.model.dynamic.zoom_mode {
            ZoomMode::Default => self.model.default_from,
            ZoomMode::All => self.min_value(),
            ZoomMode::Custom => {
                let mut from = self.model.dynamic.from;
                let to = self.model.dynamic.to;
                let step = self.first_step();
                // A window narrower than the finest step widens to one step,
                // kept inside the data extent.
                if to - from < step && from + step > self.max_value() {
                    from = self.max_value() - step;
                }
                from
            }
        }
    }

    fn dynamic_to(&self) -> f64 {
        match self.model.dynamic.zoom_mode {
            ZoomMode::Default => self.model.default_to,
            ZoomMode::All => self.max_value(),
            ZoomMode::Custom => {
                let mut from = self.model.dynamic.from;
                let mut to = self.model.dynamic.to;
                let step = self.first_step();
                if to - from < step {
                    if from + step > self.max_value() {
                        from = self.max_value() - step;
                    }
                    to = from + step;
                }
                to
            }
        }
    }

    fn set_dynamic_from(&mut self, value: f64) {
        self.model.dynamic.zoom_mode = ZoomMode::Custom;
        self.model.dynamic.from = value.max(self.env.data_min);
    }

    fn set_dynamic_to(&mut self, value: f64) {
        self.model.dynamic.zoom_mode = ZoomMode::Custom;
        self.model.dynamic.to = value;
    }

    /// Grid origin of a fixed axis, resolved through its zoom mode.
    #[must_use]
    pub fn subdivision_offset(&self) -> f64 {
        let major = f64::from(self.env.major_subdivision);
        match self.model.fixed.zoom_mode {
            ZoomMode::Default => self.model.default_subdivision_offset.unwrap_or_else(|| {
                calc_subdivision_scale_offset(self.model.default_from, self.model.default_to, major)
                    .1
            }),
            ZoomMode::All => {
                calc_subdivision_scale_offset(self.env.data_min, self.env.data_max, major).1
            }
            ZoomMode::Custom => self.model.fixed.subdivision_offset,
        }
    }

    /// Value span of one major grid cell of a fixed axis.
    #[must_use]
    pub fn subdivision_scale(&self) -> f64 {
        let major = f64::from(self.env.major_subdivision);
        match self.model.fixed.zoom_mode {
            ZoomMode::Default => self.model.default_subdivision_scale.unwrap_or_else(|| {
                calc_subdivision_scale_offset(self.model.default_from, self.model.default_to, major)
                    .0
            }),
            ZoomMode::All => {
                calc_subdivision_scale_offset(self.env.data_min, self.env.data_max, major).0
            }
            ZoomMode::Custom => self.model.fixed.subdivision_scale,
        }
    }

    /// Visible distance; a degenerate window counts as 1 so the transforms
    /// never divide by zero.
    #[must_use]
    pub fn distance(&self) -> f64 {
        let distance = self.to() - self.from();
        if distance == 0.0 { 1.0 } else { distance }
    }

    #[must_use]
    pub fn distance_px(&self) -> f64 {
        self.env.distance_px
    }

    /// Pixels per value unit.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.env.distance_px / self.distance()
    }

    #[must_use]
    pub fn min_scale(&self) -> f64 {
        self.model
            .min_scale
            .unwrap_or_else(|| self.env.distance_px / self.range())
    }

    #[must_use]
    pub fn max_scale(&self) -> f64 {
        if let Some(max_scale) = self.model.max_scale {
            return max_scale;
        }
        match self.kind {
            AxisKind::Dynamic => self.env.distance_px / self.first_step(),
            AxisKind::Fixed => {
                let step = self.model.unit.steps().first().copied().unwrap_or(1.0);
                self.env.distance_px / step
            }
        }
    }

    // ---- value/pixel transforms ----

    /// Maps a stored value onto the logarithmic display scale, clamped to the
    /// data extent.
    #[must_use]
    pub fn to_log_scale(&self, value: f64) -> f64 {
        let max = self.max_value();
        let value = 10f64.powf(value * max.log10() / max);
        value.clamp(self.min_value(), max)
    }

    #[must_use]
    pub fn from_log_scale(&self, value: f64) -> f64 {
        let max = self.max_value();
        let value = value.log10() * max / max.log10();
        value.clamp(self.min_value(), max)
    }

    #[must_use]
    pub fn px_to_linear_value(&self, px: f64) -> f64 {
        self.from() + px / self.scale()
    }

    #[must_use]
    pub fn px_to_value(&self, px: f64) -> f64 {
        if self.model.logarithmic {
            self.to_log_scale(self.px_to_linear_value(px))
        } else {
            self.px_to_linear_value(px)
        }
    }

    #[must_use]
    pub fn linear_value_to_px(&self, value: f64) -> f64 {
        (value - self.from()) * self.scale()
    }

    #[must_use]
    pub fn value_to_px(&self, value: f64) -> f64 {
        if self.model.logarithmic {
            self.linear_value_to_px(self.from_log_scale(value))
        } else {
            self.linear_value_to_px(value)
        }
    }

    // ---- enablement ----

    /// True when the window shows less than the full data extent.
    #[must_use]
    pub fn is_scroll_enabled(&self) -> bool {
        (self.from() > self.min_value() || self.to() < self.max_value()) && self.range() != 0.0
    }

    #[must_use]
    pub fn zoom_in_enabled(&self) -> bool {
        self.scale() < self.max_scale()
    }

    #[must_use]
    pub fn zoom_out_enabled(&self) -> bool {
        self.is_scroll_enabled()
    }

    // ---- panning (never animated) ----

    pub fn pan_by_distance_in_px(&mut self, distance_px: f64) {
        self.pan_by_distance(distance_px / self.scale());
    }

    pub fn pan_by_distance(&mut self, distance: f64) {
        self.pan_to(self.from() + distance);
    }

    /// Pans one "step" left (`direction < 0`) or right (`direction > 0`):
    /// 5% of the distance for dynamic axes, 1.1 subdivisions for fixed.
    pub fn pan_by_direction(&mut self, direction: f64) {
        match self.kind {
            AxisKind::Dynamic => self.pan_by_distance(direction * PAN_STEP * self.distance()),
            AxisKind::Fixed => self.pan_by_distance(direction * 1.1 * self.subdivision_scale()),
        }
    }

    pub fn pan_to(&mut self, new_from: f64) {
        match self.kind {
            AxisKind::Dynamic => self.dynamic_pan_to(new_from),
            AxisKind::Fixed => self.fixed_pan_to(new_from),
        }
    }

    fn dynamic_pan_to(&mut self, mut new_from: f64) {
        let distance = self.distance();

        if new_from < self.min_value() {
            new_from = self.min_value();
        } else if new_from + distance > self.max_value() {
            new_from = self.max_value() - distance;
        }

        if new_from > self.from() {
            let max_to = self.to().max(self.max_value());
            if new_from + distance > max_to {
                new_from = max_to - distance;
            }
        }

        self.set_dynamic_from(new_from);
        let from = self.dynamic_from();
        self.set_dynamic_to(from + distance);
    }

    fn fixed_pan_to(&mut self, mut new_from: f64) {
        let distance = self.distance();

        if new_from < self.min_value() {
            new_from = self.min_value();
        } else if new_from + distance > self.max_value() {
            new_from = self.max_value() - distance;
        }

        let scale = self.subdivision_scale();
        // Offset stays on the scale lattice.
        self.model.fixed.subdivision_offset = (new_from / scale).floor() * scale;
    }

    pub fn page_up(&mut self) {
        self.pan_to(self.from() + self.distance());
    }

    pub fn page_down(&mut self) {
        self.pan_to(self.from() - self.distance());
    }

    pub fn home(&mut self) {
        self.pan_to(self.min_value());
    }

    pub fn end(&mut self) {
        self.pan_to(self.max_value() - self.distance());
    }

    // ---- zooming (animated) ----

    pub fn zoom_all(&mut self) {
        self.animate(|axis| match axis.kind {
            AxisKind::Dynamic => axis.model.dynamic.zoom_mode = ZoomMode::All,
            AxisKind::Fixed => axis.model.fixed.zoom_mode = ZoomMode::All,
        });
    }

    pub fn zoom_default(&mut self) {
        self.animate(|axis| match axis.kind {
            AxisKind::Dynamic => axis.model.dynamic.zoom_mode = ZoomMode::Default,
            AxisKind::Fixed => axis.model.fixed.zoom_mode = ZoomMode::Default,
        });
    }

    pub fn zoom_in(&mut self) {
        match self.kind {
            AxisKind::Dynamic => {
                let from = self.from();
                self.zoom(from, from + self.distance() / ZOOM_STEP);
            }
            AxisKind::Fixed => {
                if !self.zoom_in_enabled() {
                    debug!("zoom in rejected, already at max scale");
                    return;
                }
                let scale = scale_zoom_in(self.subdivision_scale());
                self.set_fixed_window(self.subdivision_offset(), scale);
            }
        }
    }

    pub fn zoom_out(&mut self) {
        match self.kind {
            AxisKind::Dynamic => {
                let from = self.from();
                self.zoom(from, from + self.distance() * ZOOM_STEP);
            }
            AxisKind::Fixed => {
                if !self.zoom_out_enabled() {
                    debug!("zoom out rejected, full extent already visible");
                    return;
                }
                let scale = scale_zoom_out(self.subdivision_scale());
                self.set_fixed_window(self.subdivision_offset(), scale);
            }
        }
    }

    /// Zooms to the value window `[from, to]`.
    pub fn zoom(&mut self, from: f64, to: f64) {
        match self.kind {
            AxisKind::Dynamic => self.dynamic_zoom(from, to),
            AxisKind::Fixed => self.fixed_zoom(from, to),
        }
    }

    fn dynamic_zoom(&mut self, mut from: f64, mut to: f64) {
        let mut distance = to - from;

        // Never closer than the max scale allows; keep the window centered.
        if distance * self.max_scale() < self.env.distance_px {
            distance = self.env.distance_px / self.max_scale();
            from = (from + to - distance) / 2.0;
            to = from + distance;
        }

        if distance < self.distance() {
            if !self.zoom_in_enabled() {
                debug!("zoom rejected, already at max scale");
                return;
            }
        } else if !self.zoom_out_enabled() {
            debug!("zoom rejected, full extent already visible");
            return;
        }

        if distance > self.range() {
            distance = self.range();
        }

        if from < self.min_value() {
            from = self.min_value();
            to = from + distance;
        }

        if to > self.max_value() {
            to = self.max_value();
            from = to - distance;
        }

        debug!(from, to, "zoom");
        self.animate(|axis| {
            axis.set_dynamic_from(from);
            axis.set_dynamic_to(to);
        });
    }

    fn fixed_zoom(&mut self, from: f64, to: f64) {
        if to - from < self.distance() {
            if !self.zoom_in_enabled() {
                debug!("zoom rejected, already at max scale");
                return;
            }
        } else if !self.zoom_out_enabled() {
            debug!("zoom rejected, full extent already visible");
            return;
        }

        let major = f64::from(self.env.major_subdivision);
        let (scale, offset) = calc_subdivision_scale_offset(from, to, major);
        debug!(from, to, scale, offset, "zoom to grid window");
        self.set_fixed_window(offset, scale);
    }

    /// Zooms while keeping the value under `pivot_px` at the same pixel.
    pub fn zoom_around_pivot(&mut self, pivot_px: f64, zoom_in: bool) {
        if zoom_in {
            if !self.zoom_in_enabled() {
                return;
            }
        } else if !self.zoom_out_enabled() {
            return;
        }

        match self.kind {
            AxisKind::Dynamic => self.dynamic_zoom_around_pivot(pivot_px, zoom_in),
            AxisKind::Fixed => self.fixed_zoom_around_pivot(pivot_px, zoom_in),
        }
    }

    fn dynamic_zoom_around_pivot(&mut self, pivot_px: f64, zoom_in: bool) {
        let mut distance = if zoom_in {
            self.distance() / ZOOM_STEP
        } else {
            self.distance() * ZOOM_STEP
        };

        if distance > self.range() {
            distance = self.range();
        }

        let mut from =
            self.from() + (self.distance() - distance) * pivot_px / self.env.distance_px;
        let mut to = from + distance;

        if from < self.min_value() {
            from = self.min_value();
            to = from + distance;
        }
        if to > self.max_value() {
            to = self.max_value();
            from = to - distance;
        }

        self.animate(|axis| {
            axis.set_dynamic_from(from);
            axis.set_dynamic_to(to);
        });
    }

    fn fixed_zoom_around_pivot(&mut self, pivot_px: f64, zoom_in: bool) {
        let old_scale = self.subdivision_scale();
        let new_scale = if zoom_in {
            scale_zoom_in(old_scale)
        } else {
            scale_zoom_out(old_scale)
        };
        if new_scale == old_scale {
            return;
        }

        let major = f64::from(self.env.major_subdivision);
        let mut offset = self.subdivision_offset()
            + (old_scale - new_scale) * major * pivot_px / self.env.distance_px;

        if offset > self.max_value() - major * new_scale {
            offset = self.max_value() - major * new_scale;
        }
        if offset < self.min_value() {
            offset = self.min_value();
        }

        offset = (offset / new_scale).floor() * new_scale;

        self.set_fixed_window(offset, new_scale);
    }

    fn set_fixed_window(&mut self, offset: f64, scale: f64) {
        self.animate(|axis| {
            axis.model.fixed.subdivision_offset = offset;
            axis.model.fixed.subdivision_scale = scale;
            axis.model.fixed.zoom_mode = ZoomMode::Custom;
        });
    }

    // ---- animation ----

    /// Applies a window mutation, wrapping it in a 250 ms tween when
    /// animations are on. The model change lands immediately either way; the
    /// tween only shapes what `from()`/`to()` report while it plays. Starting
    /// a new tween force-finishes a running one.
    fn animate<F: FnOnce(&mut Self)>(&mut self, mutate: F) {
        if !self.env.animations_enabled {
            self.tween = None;
            mutate(self);
            return;
        }

        self.tween = None;
        let old_from = self.from();
        let old_to = self.to();

        mutate(self);

        let new_from = self.from();
        let new_to = self.to();

        self.tween = Some(RangeTween::new(old_from, old_to, new_from, new_to));
    }

    #[must_use]
    pub fn is_animation_active(&self) -> bool {
        self.tween.is_some()
    }

    /// Advances a running tween; returns `true` while one is still playing.
    pub fn advance_animation(&mut self, delta_ms: f64) -> bool {
        if let Some(tween) = &mut self.tween {
            if tween.advance(delta_ms) {
                return true;
            }
            self.tween = None;
        }
        false
    }
}

/// Finds the smallest "nice" grid: the scale `k * 10^i` (mantissa `k` in
/// `[1, 10)` with two decimals, integer `i` in `[-15, 15]`) whose
/// floor-aligned offset covers `[from, to]` with `subdivision` cells.
/// Falls back to the exact span division when nothing in range covers.
///
/// Candidates are scanned in ascending scale order, so the first hit is the
/// smallest.
#[must_use]
pub fn calc_subdivision_scale_offset(from: f64, to: f64, subdivision: f64) -> (f64, f64) {
    for i in MIN_FIXED_SCALE_POWER..=MAX_FIXED_SCALE_POWER {
        for k in 100..1000u32 {
            let scale = f64::from(k) * 10f64.powi(i - 2);
            let offset = (from / scale).floor() * scale;
            let range = scale * subdivision;
            if offset + range >= to {
                return (scale, offset);
            }
        }
    }

    ((to - from) / subdivision, from)
}

/// Largest lattice scale `k * 10^i` (integer `k` in `[1, 9]`) strictly below
/// `current_scale`, or `current_scale` when already at the bottom.
#[must_use]
pub fn scale_zoom_in(current_scale: f64) -> f64 {
    for i in (MIN_FIXED_SCALE_POWER..=MAX_FIXED_SCALE_POWER).rev() {
        for k in (1..=9u32).rev() {
            let scale = f64::from(k) * 10f64.powi(i);
            if scale < current_scale {
                return scale;
            }
        }
    }
    current_scale
}

/// Smallest lattice scale strictly above `current_scale`, or `current_scale`
/// when already at the top.
#[must_use]
pub fn scale_zoom_out(current_scale: f64) -> f64 {
    for i in MIN_FIXED_SCALE_POWER..=MAX_FIXED_SCALE_POWER {
        for k in 1..=9u32 {
            let scale = f64::from(k) * 10f64.powi(i);
            if scale > current_scale {
                return scale;
            }
        }
    }
    current_scale
}
