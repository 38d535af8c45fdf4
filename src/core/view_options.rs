//! Per-instance and global view options.
//!
//! `ViewOptions` travel with a chart instance and serialize into its
//! document. `GlobalViewOptions` are user-wide and persist through a host
//! [`SettingsStore`] as JSON under a fixed key.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ChartError, ChartResult};

/// Storage key for [`GlobalViewOptions`].
pub const GLOBAL_VIEW_OPTIONS_KEY: &str = "wavescope/globalViewOptions";

/// How the chart is presented and which gestures are live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartMode {
    /// Thumbnail rendering, no interaction, no zoom buttons.
    Preview,
    /// Pan/zoom gestures enabled.
    Interactive,
    /// Interactive plus line editing hooks.
    Editable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AxesLinesType {
    #[default]
    Dynamic,
    Fixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultZoomMode {
    Default,
    All,
}

/// Per-dimension subdivision counts for the fixed grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subdivision {
    pub horizontal: u32,
    pub vertical: u32,
}

/// Grid configuration shared by every axis of one chart group.
///
/// `steps_x`/`steps_y` override the unit step tables for dynamic axes;
/// an empty table means "use the unit's own steps". `steps_y` is indexed
/// by chart position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxesLinesOptions {
    #[serde(rename = "type")]
    pub kind: AxesLinesType,
    #[serde(default)]
    pub steps_x: Vec<f64>,
    #[serde(default)]
    pub steps_y: Vec<Vec<f64>>,
    pub major_subdivision: Subdivision,
    pub minor_subdivision: Subdivision,
    pub snap_to_grid: bool,
    pub default_zoom_mode: DefaultZoomMode,
}

impl Default for AxesLinesOptions {
    fn default() -> Self {
        Self {
            kind: AxesLinesType::Dynamic,
            steps_x: Vec::new(),
            steps_y: Vec::new(),
            major_subdivision: Subdivision {
                horizontal: 24,
                vertical: 8,
            },
            minor_subdivision: Subdivision {
                horizontal: 5,
                vertical: 5,
            },
            snap_to_grid: true,
            default_zoom_mode: DefaultZoomMode::All,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewOptions {
    pub axes_lines: AxesLinesOptions,
    pub show_axis_labels: bool,
    pub show_zoom_buttons: bool,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            axes_lines: AxesLinesOptions::default(),
            show_axis_labels: true,
            show_zoom_buttons: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RenderAlgorithm {
    Avg,
    #[default]
    Minmax,
    Gradually,
}

/// User-wide chart presentation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalViewOptions {
    pub enable_zoom_animations: bool,
    pub black_background: bool,
    pub render_algorithm: RenderAlgorithm,
    pub show_sampled_data: bool,
}

impl Default for GlobalViewOptions {
    fn default() -> Self {
        Self {
            enable_zoom_animations: true,
            black_background: false,
            render_algorithm: RenderAlgorithm::Minmax,
            show_sampled_data: false,
        }
    }
}

/// Host-provided key-value settings storage.
pub trait SettingsStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

impl GlobalViewOptions {
    /// Loads stored options; unreadable or corrupt JSON yields defaults.
    #[must_use]
    pub fn load(store: &dyn SettingsStore) -> Self {
        match store.get(GLOBAL_VIEW_OPTIONS_KEY) {
            Some(json) => match serde_json::from_str(&json) {
                Ok(options) => options,
                Err(err) => {
                    warn!(%err, "stored global view options are corrupt, using defaults");
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }

    /// Writes the options back to the store. Persistence is explicit, no
    /// mutation of `self` implies a save.
    pub fn save(&self, store: &mut dyn SettingsStore) -> ChartResult<()> {
        let json = serde_json::to_string(self)
            .map_err(|err| ChartError::InvalidSettings(err.to_string()))?;
        store.set(GLOBAL_VIEW_OPTIONS_KEY, &json);
        Ok(())
    }
}
