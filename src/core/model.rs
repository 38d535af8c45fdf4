use serde::{Deserialize, Serialize};

use crate::core::units::Unit;
use crate::error::{ChartError, ChartResult};

/// Which range an axis shows when no explicit user window is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ZoomMode {
    /// Full data extent.
    #[default]
    All,
    /// Model-supplied initial window.
    Default,
    /// Explicit user pan/zoom window.
    Custom,
}

/// Zoom state for a continuously zoomable axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DynamicZoomState {
    pub zoom_mode: ZoomMode,
    pub from: f64,
    pub to: f64,
}

impl Default for DynamicZoomState {
    fn default() -> Self {
        Self {
            zoom_mode: ZoomMode::All,
            from: 0.0,
            to: 1.0,
        }
    }
}

/// Zoom state for a fixed-grid axis: the window is
/// `[subdivision_offset, subdivision_offset + subdivision_scale * major_subdivision]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixedZoomState {
    pub zoom_mode: ZoomMode,
    pub subdivision_offset: f64,
    pub subdivision_scale: f64,
}

impl Default for FixedZoomState {
    fn default() -> Self {
        Self {
            zoom_mode: ZoomMode::All,
            subdivision_offset: 0.0,
            subdivision_scale: 1.0,
        }
    }
}

/// Semi-logarithmic display transform: a stored value `v` represents the
/// physical quantity `10^(v + a) + b`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SemiLogParams {
    pub a: f64,
    pub b: f64,
}

/// Per-axis model: unit, data bounds, default window and both zoom-state
/// records.
///
/// Exactly one of `dynamic`/`fixed` is authoritative depending on the active
/// axes-lines type; the other is carried so switching grid types preserves
/// the user's window in each mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisModel {
    pub unit: Unit,

    pub default_from: f64,
    pub default_to: f64,

    pub min_value: f64,
    pub max_value: f64,

    #[serde(default)]
    pub min_scale: Option<f64>,
    #[serde(default)]
    pub max_scale: Option<f64>,

    #[serde(default)]
    pub dynamic: DynamicZoomState,
    #[serde(default)]
    pub fixed: FixedZoomState,

    #[serde(default)]
    pub default_subdivision_offset: Option<f64>,
    #[serde(default)]
    pub default_subdivision_scale: Option<f64>,

    #[serde(default)]
    pub label: String,

    #[serde(default)]
    pub logarithmic: bool,
    #[serde(default)]
    pub semi_logarithmic: Option<SemiLogParams>,
}

impl AxisModel {
    /// Creates a model whose default window spans the given data bounds.
    #[must_use]
    pub fn new(unit: Unit, min_value: f64, max_value: f64) -> Self {
        Self {
            unit,
            default_from: min_value,
            default_to: max_value,
            min_value,
            max_value,
            min_scale: None,
            max_scale: None,
            dynamic: DynamicZoomState::default(),
            fixed: FixedZoomState::default(),
            default_subdivision_offset: None,
            default_subdivision_scale: None,
            label: String::new(),
            logarithmic: false,
            semi_logarithmic: None,
        }
    }

    #[must_use]
    pub fn with_default_window(mut self, from: f64, to: f64) -> Self {
        self.default_from = from;
        self.default_to = to;
        self.dynamic.zoom_mode = ZoomMode::Default;
        self.fixed.zoom_mode = ZoomMode::Default;
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    #[must_use]
    pub fn with_logarithmic(mut self, logarithmic: bool) -> Self {
        self.logarithmic = logarithmic;
        self
    }

    /// Rejects models no axis controller can work from.
    ///
    /// Degenerate windows (`from == to`) are legal; non-finite bounds are not.
    pub fn validate(&self) -> ChartResult<()> {
        for (name, value) in [
            ("default_from", self.default_from),
            ("default_to", self.default_to),
            ("min_value", self.min_value),
            ("max_value", self.max_value),
        ] {
            if !value.is_finite() {
                return Err(ChartError::InvalidModel(format!(
                    "axis {name} must be finite"
                )));
            }
        }
        if self.min_value > self.max_value {
            return Err(ChartError::InvalidModel(
                "axis min_value must not exceed max_value".to_owned(),
            ));
        }
        if let Some(scale) = self.min_scale {
            if !scale.is_finite() || scale <= 0.0 {
                return Err(ChartError::InvalidModel(
                    "axis min_scale must be finite and > 0".to_owned(),
                ));
            }
        }
        if let Some(scale) = self.max_scale {
            if !scale.is_finite() || scale <= 0.0 {
                return Err(ChartError::InvalidModel(
                    "axis max_scale must be finite and > 0".to_owned(),
                ));
            }
        }
        Ok(())
    }
}

/// Which vertical axis a line is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum YAxisSide {
    #[default]
    Left,
    Right,
}

/// Data extents of one rendered line; seeds axis ranges in "all" zoom mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineModel {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    #[serde(default)]
    pub y_axis: YAxisSide,
}

impl LineModel {
    #[must_use]
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
            y_axis: YAxisSide::Left,
        }
    }

    #[must_use]
    pub fn on_right_axis(mut self) -> Self {
        self.y_axis = YAxisSide::Right;
        self
    }
}
