//! Chart group controller and pixel layout.
//!
//! A [`ChartsController`] owns the shared x axis, an ordered set of stacked
//! [`ChartController`]s and the margin/rectangle math that places the plot
//! area inside the host view. It is the single writer of every axis'
//! [`AxisEnv`]: `sync` recomputes data extents, pixel spans and resolved step
//! tables and pushes them down, so axes stay free of back references.

use indexmap::IndexMap;
use smallvec::SmallVec;
use tracing::debug;

use crate::core::axis::{AxisController, AxisEnv, AxisKind, AxisPosition};
use crate::core::model::{AxisModel, LineModel, YAxisSide};
use crate::core::view_options::{AxesLinesType, ChartMode, GlobalViewOptions, ViewOptions};
use crate::error::ChartResult;

pub const SCROLL_BAR_SIZE_PX: f64 = 16.0;
pub const ZOOM_ICON_SIZE_PX: f64 = 32.0;
pub const ZOOM_ICON_PADDING_PX: f64 = 4.0;
pub const LABEL_TICK_GAP_PX: f64 = 10.0;
pub const MIN_Y_SCALE_LABELS_WIDTH_PX: f64 = 70.0;
pub const MIN_X_AXIS_BAND_HEIGHT_PX: f64 = 20.0;

/// Plot-area rectangle in view pixels, y growing downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// One stacked chart: its y axis (or axes) and the lines plotted on them.
#[derive(Debug, Clone)]
pub struct ChartController {
    id: String,
    kind: AxisKind,
    pub y_axis: AxisController,
    pub y_axis_right: Option<AxisController>,
    lines: Vec<LineModel>,
    waveform_length: usize,
}

impl ChartController {
    fn new(id: String, kind: AxisKind, y_axis_model: AxisModel) -> ChartResult<Self> {
        Ok(Self {
            id,
            kind,
            y_axis: AxisController::new(kind, AxisPosition::Y, y_axis_model)?,
            y_axis_right: None,
            lines: Vec::new(),
            waveform_length: 0,
        })
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_right_axis(&mut self, model: AxisModel) -> ChartResult<()> {
        self.y_axis_right = Some(AxisController::new(self.kind, AxisPosition::YRight, model)?);
        Ok(())
    }

    pub fn add_line(&mut self, line: LineModel) {
        self.lines.push(line);
    }

    #[must_use]
    pub fn lines(&self) -> &[LineModel] {
        &self.lines
    }

    /// Sample count of the waveform behind this chart, for hosts that render
    /// sampled data.
    pub fn set_waveform_length(&mut self, length: usize) {
        self.waveform_length = length;
    }

    #[must_use]
    pub fn waveform_length(&self) -> usize {
        self.waveform_length
    }

    /// X data extent over all lines, `(0, 1)` when there are none.
    #[must_use]
    pub fn x_extent(&self) -> (f64, f64) {
        extent(self.lines.iter().map(|line| (line.x_min, line.x_max)))
    }

    /// Y data extent over the lines bound to the given side.
    #[must_use]
    pub fn y_extent(&self, side: YAxisSide) -> (f64, f64) {
        extent(
            self.lines
                .iter()
                .filter(|line| line.y_axis == side)
                .map(|line| (line.y_min, line.y_max)),
        )
    }

    pub fn zoom_all(&mut self) {
        self.y_axis.zoom_all();
        if let Some(right) = &mut self.y_axis_right {
            right.zoom_all();
        }
    }

    pub fn zoom_default(&mut self) {
        self.y_axis.zoom_default();
        if let Some(right) = &mut self.y_axis_right {
            right.zoom_default();
        }
    }
}

fn extent(ranges: impl Iterator<Item = (f64, f64)>) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for (lo, hi) in ranges {
        min = min.min(lo);
        max = max.max(hi);
    }
    if min > max { (0.0, 1.0) } else { (min, max) }
}

#[derive(Debug, Clone)]
pub struct ChartsController {
    mode: ChartMode,
    pub view_options: ViewOptions,
    pub global_options: GlobalViewOptions,
    pub x_axis: AxisController,
    charts: IndexMap<String, ChartController>,
    view_width: Option<f64>,
    view_height: Option<f64>,
}

impl ChartsController {
    pub fn new(
        mode: ChartMode,
        x_axis_model: AxisModel,
        view_options: ViewOptions,
    ) -> ChartResult<Self> {
        let kind = axis_kind(view_options.axes_lines.kind);
        Ok(Self {
            mode,
            view_options,
            global_options: GlobalViewOptions::default(),
            x_axis: AxisController::new(kind, AxisPosition::X, x_axis_model)?,
            charts: IndexMap::new(),
            view_width: None,
            view_height: None,
        })
    }

    #[must_use]
    pub fn mode(&self) -> ChartMode {
        self.mode
    }

    pub fn add_chart(
        &mut self,
        id: impl Into<String>,
        y_axis_model: AxisModel,
    ) -> ChartResult<&mut ChartController> {
        let id = id.into();
        let kind = axis_kind(self.view_options.axes_lines.kind);
        let chart = ChartController::new(id.clone(), kind, y_axis_model)?;
        Ok(self.charts.entry(id).or_insert(chart))
    }

    #[must_use]
    pub fn chart(&self, id: &str) -> Option<&ChartController> {
        self.charts.get(id)
    }

    pub fn chart_mut(&mut self, id: &str) -> Option<&mut ChartController> {
        self.charts.get_mut(id)
    }

    pub fn charts(&self) -> impl Iterator<Item = &ChartController> {
        self.charts.values()
    }

    pub fn charts_mut(&mut self) -> impl Iterator<Item = &mut ChartController> {
        self.charts.values_mut()
    }

    /// Host view size in pixels; layout reports a 1x1 plot area until set.
    pub fn set_view_size(&mut self, width: f64, height: f64) {
        self.view_width = Some(width);
        self.view_height = Some(height);
    }

    // ---- data extents ----

    /// X data extent across every chart, `(0, 1)` when there are none.
    #[must_use]
    pub fn x_extent(&self) -> (f64, f64) {
        extent(self.charts.values().map(ChartController::x_extent))
    }

    /// Largest waveform sample count across charts.
    #[must_use]
    pub fn num_samples(&self) -> usize {
        self.charts
            .values()
            .map(ChartController::waveform_length)
            .max()
            .unwrap_or(0)
    }

    // ---- layout ----

    fn has_right_axis(&self) -> bool {
        self.charts.values().any(|c| c.y_axis_right.is_some())
    }

    #[must_use]
    pub fn are_zoom_buttons_visible(&self) -> bool {
        self.mode != ChartMode::Preview && self.view_options.show_zoom_buttons
    }

    fn x_axis_label_height(&self) -> f64 {
        MIN_X_AXIS_BAND_HEIGHT_PX.max(self.x_axis.label_height_px())
    }

    fn y_axis_labels_width(&self) -> f64 {
        let mut max_width = 0f64;
        for chart in self.charts.values() {
            max_width = max_width.max(chart.y_axis.label_width_px());
            if let Some(right) = &chart.y_axis_right {
                max_width = max_width.max(right.label_width_px());
            }
        }
        MIN_Y_SCALE_LABELS_WIDTH_PX.max(max_width + LABEL_TICK_GAP_PX)
    }

    /// Height of the x-axis band below the plot area.
    #[must_use]
    pub fn x_axis_height(&self) -> f64 {
        SCROLL_BAR_SIZE_PX + self.axis_band_size(self.x_axis_label_height())
    }

    fn axis_band_size(&self, labels_size: f64) -> f64 {
        let zoom_buttons = self.view_options.show_zoom_buttons;
        let labels = self.view_options.show_axis_labels;
        if zoom_buttons && labels {
            ZOOM_ICON_SIZE_PX.max(labels_size)
        } else if zoom_buttons {
            ZOOM_ICON_SIZE_PX
        } else if labels {
            labels_size
        } else {
            0.0
        }
    }

    #[must_use]
    pub fn min_left_margin(&self) -> f64 {
        SCROLL_BAR_SIZE_PX + self.axis_band_size(self.y_axis_labels_width())
    }

    #[must_use]
    pub fn min_right_margin(&self) -> f64 {
        let mut margin = SCROLL_BAR_SIZE_PX;
        if self.has_right_axis() {
            margin += self.axis_band_size(self.y_axis_labels_width());
        }
        margin + 1.0
    }

    #[must_use]
    pub fn min_top_margin(&self) -> f64 {
        LABEL_TICK_GAP_PX
    }

    #[must_use]
    pub fn min_bottom_margin(&self) -> f64 {
        LABEL_TICK_GAP_PX
    }

    fn max_chart_width(&self) -> f64 {
        self.view_width
            .map_or(1.0, |w| {
                (w - self.min_left_margin() - self.min_right_margin()).max(1.0)
            })
    }

    fn max_chart_height(&self) -> f64 {
        self.view_height
            .map_or(1.0, |h| {
                (h - self.min_top_margin() - self.min_bottom_margin()).max(1.0)
            })
    }

    fn fixed_aspect_is_width_bound(&self) -> bool {
        let major = self.view_options.axes_lines.major_subdivision;
        self.max_chart_width() / f64::from(major.horizontal)
            < self.max_chart_height() / f64::from(major.vertical)
    }

    /// Plot-area width. Fixed-grid mode locks the aspect to the major
    /// subdivision counts so grid cells stay square-ish.
    #[must_use]
    pub fn chart_width(&self) -> f64 {
        if self.view_options.axes_lines.kind == AxesLinesType::Dynamic {
            return self.max_chart_width();
        }
        if self.fixed_aspect_is_width_bound() {
            return self.max_chart_width();
        }
        let major = self.view_options.axes_lines.major_subdivision;
        f64::from(major.horizontal) * self.max_chart_height() / f64::from(major.vertical)
    }

    #[must_use]
    pub fn chart_height(&self) -> f64 {
        if self.view_options.axes_lines.kind == AxesLinesType::Dynamic {
            return self.max_chart_height();
        }
        if self.fixed_aspect_is_width_bound() {
            let major = self.view_options.axes_lines.major_subdivision;
            return f64::from(major.vertical) * self.max_chart_width() / f64::from(major.horizontal);
        }
        self.max_chart_height()
    }

    /// The shrunken dimension of a fixed-aspect chart is centered inside the
    /// available area.
    #[must_use]
    pub fn left_margin(&self) -> f64 {
        let slack = self.max_chart_width() - self.chart_width();
        if slack == 0.0 {
            return self.min_left_margin();
        }
        self.min_left_margin() + (slack / 2.0).round()
    }

    #[must_use]
    pub fn right_margin(&self) -> f64 {
        let slack = self.max_chart_width() - self.chart_width();
        if slack == 0.0 {
            return self.min_right_margin();
        }
        self.min_right_margin() + slack - (slack / 2.0).round()
    }

    #[must_use]
    pub fn top_margin(&self) -> f64 {
        let slack = self.max_chart_height() - self.chart_height();
        if slack == 0.0 {
            return self.min_top_margin();
        }
        self.min_top_margin() + (slack / 2.0).round()
    }

    #[must_use]
    pub fn bottom_margin(&self) -> f64 {
        let slack = self.max_chart_height() - self.chart_height();
        if slack == 0.0 {
            return self.min_bottom_margin();
        }
        self.min_bottom_margin() + slack - (slack / 2.0).round()
    }

    /// Plot-area rectangle; the half-pixel nudge keeps 1 px grid lines crisp.
    #[must_use]
    pub fn chart_rect(&self) -> Rect {
        Rect {
            left: self.left_margin() + 0.5,
            top: self.top_margin() + 0.5,
            width: self.chart_width(),
            height: self.chart_height(),
        }
    }

    // ---- synchronization ----

    /// Recomputes every axis' environment and pushes it down.
    ///
    /// Call after changing lines, view options, global options, view size or
    /// label metrics; axis reads between mutations and `sync` see the stale
    /// environment, exactly as explicit invalidation implies.
    pub fn sync(&mut self) {
        let animations_enabled = self.global_options.enable_zoom_animations;
        let black_background = self.global_options.black_background;
        let major = self.view_options.axes_lines.major_subdivision;
        let minor = self.view_options.axes_lines.minor_subdivision;

        let (x_min, x_max) = self.x_extent();
        let x_env = AxisEnv {
            data_min: x_min,
            data_max: x_max,
            distance_px: self.chart_width(),
            steps: SmallVec::from_slice(&self.view_options.axes_lines.steps_x),
            major_subdivision: major.horizontal,
            minor_subdivision: minor.horizontal,
            animations_enabled,
            black_background,
        };
        self.x_axis.set_env(x_env);

        let chart_height = self.chart_height();
        let steps_y = self.view_options.axes_lines.steps_y.clone();
        for (index, chart) in self.charts.values_mut().enumerate() {
            let steps: SmallVec<[f64; 32]> = steps_y
                .get(index)
                .map(|steps| SmallVec::from_slice(steps))
                .unwrap_or_default();

            let (y_min, y_max) = chart.y_extent(YAxisSide::Left);
            chart.y_axis.set_env(AxisEnv {
                data_min: y_min,
                data_max: y_max,
                distance_px: chart_height,
                steps: steps.clone(),
                major_subdivision: major.vertical,
                minor_subdivision: minor.vertical,
                animations_enabled,
                black_background,
            });

            if let Some(right) = &mut chart.y_axis_right {
                let (y_min, y_max) = chart_right_extent(&chart.lines);
                right.set_env(AxisEnv {
                    data_min: y_min,
                    data_max: y_max,
                    distance_px: chart_height,
                    steps,
                    major_subdivision: major.vertical,
                    minor_subdivision: minor.vertical,
                    animations_enabled,
                    black_background,
                });
            }
        }

        debug!(
            charts = self.charts.len(),
            width = self.chart_width(),
            height = self.chart_height(),
            "synced axis environments"
        );
    }

    // ---- zoom fan-out ----

    /// True when any axis shows less than its full data extent.
    #[must_use]
    pub fn is_zoom_all_enabled(&self) -> bool {
        let (x_min, x_max) = self.x_extent();
        if self.x_axis.from() != x_min || self.x_axis.to() != x_max {
            return true;
        }
        self.charts.values().any(|chart| {
            chart.y_axis.is_scroll_enabled()
                || chart
                    .y_axis_right
                    .as_ref()
                    .is_some_and(AxisController::is_scroll_enabled)
        })
    }

    pub fn zoom_all(&mut self) {
        self.x_axis.zoom_all();
        for chart in self.charts.values_mut() {
            chart.zoom_all();
        }
    }

    pub fn zoom_default(&mut self) {
        self.x_axis.zoom_default();
        for chart in self.charts.values_mut() {
            chart.zoom_default();
        }
    }

    /// Drives every running axis tween; returns `true` while any is still
    /// playing, so hosts keep scheduling frames until it goes `false`.
    pub fn advance_animations(&mut self, delta_ms: f64) -> bool {
        let mut active = self.x_axis.advance_animation(delta_ms);
        for chart in self.charts.values_mut() {
            active |= chart.y_axis.advance_animation(delta_ms);
            if let Some(right) = &mut chart.y_axis_right {
                active |= right.advance_animation(delta_ms);
            }
        }
        active
    }
}

fn chart_right_extent(lines: &[LineModel]) -> (f64, f64) {
    extent(
        lines
            .iter()
            .filter(|line| line.y_axis == YAxisSide::Right)
            .map(|line| (line.y_min, line.y_max)),
    )
}

fn axis_kind(kind: AxesLinesType) -> AxisKind {
    match kind {
        AxesLinesType::Dynamic => AxisKind::Dynamic,
        AxesLinesType::Fixed => AxisKind::Fixed,
    }
}
