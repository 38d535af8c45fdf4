use std::collections::HashMap;

use wavescope::core::view_options::{
    AxesLinesType, DefaultZoomMode, GlobalViewOptions, RenderAlgorithm, SettingsStore, ViewOptions,
    GLOBAL_VIEW_OPTIONS_KEY,
};

#[derive(Default)]
struct MemoryStore {
    entries: HashMap<String, String>,
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_owned(), value.to_owned());
    }
}

#[test]
fn defaults_match_documented_values() {
    let options = GlobalViewOptions::default();
    assert!(options.enable_zoom_animations);
    assert!(!options.black_background);
    assert_eq!(options.render_algorithm, RenderAlgorithm::Minmax);
    assert!(!options.show_sampled_data);

    let view = ViewOptions::default();
    assert_eq!(view.axes_lines.kind, AxesLinesType::Dynamic);
    assert_eq!(view.axes_lines.default_zoom_mode, DefaultZoomMode::All);
    assert!(view.axes_lines.snap_to_grid);
    assert!(view.show_axis_labels);
}

#[test]
fn global_options_round_trip_through_store() {
    let mut store = MemoryStore::default();
    let mut options = GlobalViewOptions::default();
    options.black_background = true;
    options.render_algorithm = RenderAlgorithm::Gradually;

    options.save(&mut store).expect("save");
    assert!(store.entries.contains_key(GLOBAL_VIEW_OPTIONS_KEY));

    let loaded = GlobalViewOptions::load(&store);
    assert_eq!(loaded, options);
}

#[test]
fn missing_store_entry_yields_defaults() {
    let store = MemoryStore::default();
    assert_eq!(GlobalViewOptions::load(&store), GlobalViewOptions::default());
}

#[test]
fn corrupt_store_entry_yields_defaults() {
    let mut store = MemoryStore::default();
    store.set(GLOBAL_VIEW_OPTIONS_KEY, "{not json");
    assert_eq!(GlobalViewOptions::load(&store), GlobalViewOptions::default());
}

#[test]
fn partial_store_entry_keeps_defaults_for_missing_fields() {
    let mut store = MemoryStore::default();
    store.set(GLOBAL_VIEW_OPTIONS_KEY, r#"{"black_background": true}"#);

    let loaded = GlobalViewOptions::load(&store);
    assert!(loaded.black_background);
    assert!(loaded.enable_zoom_animations);
    assert_eq!(loaded.render_algorithm, RenderAlgorithm::Minmax);
}

#[test]
fn no_save_without_explicit_call() {
    let mut store = MemoryStore::default();
    let mut options = GlobalViewOptions::load(&store);
    options.black_background = true;
    // Mutating options does not touch the store.
    assert!(store.entries.is_empty());
    options.save(&mut store).expect("save");
    assert_eq!(store.entries.len(), 1);
}

#[test]
fn view_options_survive_json_round_trip() {
    let mut view = ViewOptions::default();
    view.axes_lines.kind = AxesLinesType::Fixed;
    view.axes_lines.steps_x = vec![0.1, 0.5, 1.0];
    view.axes_lines.steps_y = vec![vec![1.0, 5.0]];
    view.show_zoom_buttons = false;

    let json = serde_json::to_string(&view).expect("serialize");
    assert!(json.contains("\"type\""));
    let back: ViewOptions = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, view);
}
