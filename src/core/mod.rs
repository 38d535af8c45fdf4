pub mod animation;
pub mod axis;
pub mod charts;
pub mod model;
pub mod ticks;
pub mod units;
pub mod view_options;
pub mod waveform;

pub use axis::{AxisController, AxisEnv, AxisKind, AxisPosition};
pub use charts::{ChartController, ChartsController, Rect};
pub use model::{AxisModel, LineModel, ZoomMode};
pub use ticks::Tick;
pub use units::Unit;
pub use view_options::{ChartMode, GlobalViewOptions, SettingsStore, ViewOptions};
pub use waveform::Waveform;
