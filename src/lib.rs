//! Ringwheel - WASM Module
//!
//! Radial hierarchy (sunburst) layout for a three-level tree of categories,
//! groups and items. The host hands in tree snapshots; the module returns
//! the angular and radial extent of every slice, ready-made SVG outlines,
//! pointer hit testing and hover/pin selection state. It is compiled to
//! WebAssembly and exposes a JavaScript-friendly API via wasm-bindgen.
//!
//! # Architecture
//!
//! - `tree`: Host-supplied tree snapshot and identifier-based slice keys
//! - `layout`: Angular allocation, ring bands, colors, sector outlines
//! - `slice`: Slice index of one layout pass, with a petgraph hierarchy
//! - `spatial`: R-tree hit index over slice sectors
//! - `interaction`: Hover/pin state machine
//! - `engine`: Owns all of the above and keeps them consistent

use js_sys::Float64Array;
use serde::Serialize;
use wasm_bindgen::prelude::*;

pub mod config;
pub mod engine;
pub mod error;
pub mod interaction;
pub mod layout;
pub mod logging;
pub mod slice;
pub mod spatial;
pub mod tree;

pub use config::WheelConfig;
pub use engine::WheelEngine;
pub use error::{ColorParseError, ConfigError, TreeError, WheelError, WheelResult};
pub use interaction::{Interaction, Selection};
pub use layout::{Hsla, SectorPath, SunburstLayout};
pub use slice::{Level, Slice, SliceIndex};
pub use tree::{Category, Group, Item, NodeKey, Tree};

use layout::ColorConfig;

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    logging::init_logging(logging::default_log_level());
}

/// Change the console log level (`off`, `error`, `warn`, `info`, `debug`,
/// `trace`).
#[wasm_bindgen(js_name = setLogLevel)]
pub fn set_log_level(level: &str) -> Result<(), JsError> {
    let level = logging::parse_level(level).map_err(|e| JsError::new(&e))?;
    logging::init_logging(level);
    Ok(())
}

fn decode<T: serde::de::DeserializeOwned>(value: JsValue) -> WheelResult<T> {
    serde_wasm_bindgen::from_value(value).map_err(|e| WheelError::Decode(e.to_string()))
}

fn encode<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsError> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsError::new(&e.to_string()))
}

/// `[start0, end0, start1, end1, ...]` in slice order.
fn flat_angles(slices: &[Slice]) -> Vec<f64> {
    slices
        .iter()
        .flat_map(|s| [s.start_angle, s.end_angle])
        .collect()
}

/// SVG outline per slice, empty for slices that cannot be drawn.
fn svg_paths(engine: &WheelEngine) -> Vec<String> {
    (0..engine.slices().len())
        .map(|position| engine.path(position).map(|p| p.to_svg()).unwrap_or_default())
        .collect()
}

/// Colors of the three rings for one category base color.
#[derive(Debug, Clone, PartialEq, Serialize)]
struct DerivedColors {
    category: Hsla,
    group: Hsla,
    item: Hsla,
}

fn derive_colors_with(config: &ColorConfig, color: &str) -> WheelResult<DerivedColors> {
    let base: Hsla = color.parse().map_err(WheelError::Color)?;
    Ok(DerivedColors {
        category: config.color_for(Level::Category, base),
        group: config.color_for(Level::Group, base),
        item: config.color_for(Level::Item, base),
    })
}

/// Main entry point for the wheel.
///
/// This struct wraps the internal WheelEngine and provides the public API
/// exposed to JavaScript.
#[wasm_bindgen]
pub struct RingwheelWasm {
    engine: WheelEngine,
}

#[wasm_bindgen]
impl RingwheelWasm {
    /// Create a wheel with the default configuration and an empty tree.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            engine: WheelEngine::with_defaults(),
        }
    }

    /// Create a wheel from a (possibly partial) configuration object.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config: JsValue) -> Result<RingwheelWasm, JsError> {
        let config: WheelConfig = decode(config)?;
        Ok(Self {
            engine: WheelEngine::new(config)?,
        })
    }

    // =========================================================================
    // Inputs
    // =========================================================================

    /// Replace the tree snapshot.
    ///
    /// The object has the shape `{ categories: [{ id, title, color?,
    /// groups: [{ id, title, items: [{ id, title, dueDate? }] }] }] }`.
    #[wasm_bindgen(js_name = setTree)]
    pub fn set_tree(&mut self, tree: JsValue) -> Result<(), JsError> {
        let tree: Tree = decode(tree)?;
        self.engine.set_tree(tree)?;
        Ok(())
    }

    /// Replace the configuration.
    #[wasm_bindgen(js_name = setConfig)]
    pub fn set_config(&mut self, config: JsValue) -> Result<(), JsError> {
        let config: WheelConfig = decode(config)?;
        self.engine.set_config(config)?;
        Ok(())
    }

    /// Fit the wheel into a `width` x `height` viewport.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.engine.resize(width, height);
    }

    // =========================================================================
    // Slices
    // =========================================================================

    /// Number of slices in the current layout.
    #[wasm_bindgen(js_name = sliceCount)]
    pub fn slice_count(&self) -> usize {
        self.engine.slices().len()
    }

    /// All slices as plain objects, in layout order.
    pub fn slices(&self) -> Result<JsValue, JsError> {
        encode(self.engine.slices())
    }

    /// One slice by position, or `undefined`.
    #[wasm_bindgen(js_name = getSlice)]
    pub fn get_slice(&self, index: usize) -> Result<JsValue, JsError> {
        match self.engine.index().get(index) {
            Some(slice) => encode(slice),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    /// Slice angles as a Float64Array of `[start0, end0, start1, end1, ...]`.
    #[wasm_bindgen(js_name = getAngles)]
    pub fn get_angles(&self) -> Float64Array {
        Float64Array::from(&flat_angles(self.engine.slices())[..])
    }

    /// SVG path data per slice, positioned at the wheel center.
    ///
    /// Slices without area get an empty string.
    #[wasm_bindgen(js_name = getPaths)]
    pub fn get_paths(&self) -> Vec<String> {
        svg_paths(&self.engine)
    }

    /// Position of the slice under `(x, y)`, if any.
    #[wasm_bindgen(js_name = sliceAt)]
    pub fn slice_at(&self, x: f64, y: f64) -> Option<usize> {
        self.engine.slice_at(x, y)
    }

    // =========================================================================
    // Interaction
    // =========================================================================

    /// Pointer moved to `(x, y)`. Returns the selected slice position.
    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Option<usize> {
        self.engine.pointer_move(x, y)
    }

    /// Pointer left the wheel.
    #[wasm_bindgen(js_name = pointerLeave)]
    pub fn pointer_leave(&mut self) {
        self.engine.pointer_leave();
    }

    /// Click or tap at `(x, y)`. Returns the selected slice position.
    #[wasm_bindgen(js_name = activateAt)]
    pub fn activate_at(&mut self, x: f64, y: f64) -> Option<usize> {
        self.engine.activate_at(x, y)
    }

    /// Hover the slice at `index`, e.g. from keyboard focus.
    #[wasm_bindgen(js_name = hoverSlice)]
    pub fn hover_slice(&mut self, index: usize) {
        if let Some(key) = self.engine.index().get(index).map(|s| s.key.clone()) {
            self.engine.pointer_enter(&key);
        }
    }

    /// Activate the slice at `index`. Out of range counts as empty space.
    #[wasm_bindgen(js_name = activateSlice)]
    pub fn activate_slice(&mut self, index: usize) {
        let key = self.engine.index().get(index).map(|s| s.key.clone());
        self.engine.activate(key.as_ref());
    }

    #[wasm_bindgen(js_name = clearPin)]
    pub fn clear_pin(&mut self) {
        self.engine.clear_pin();
    }

    /// Position of the selected slice, if any.
    #[wasm_bindgen(js_name = selectionIndex)]
    pub fn selection_index(&self) -> Option<usize> {
        self.engine.selected_position()
    }

    /// Selection state as `{ state: "idle" | "hovering" | "pinned", key? }`.
    pub fn selection(&self) -> Result<JsValue, JsError> {
        encode(self.engine.selection())
    }

    /// Slices from the selection's category out to the selection itself.
    #[wasm_bindgen(js_name = selectionLineage)]
    pub fn selection_lineage(&self) -> Result<JsValue, JsError> {
        encode(&self.engine.selection_lineage())
    }
}

impl Default for RingwheelWasm {
    fn default() -> Self {
        Self::new()
    }
}

/// SVG path data for one annular sector centered at the origin.
///
/// Returns `undefined` when the sector has no area.
#[wasm_bindgen(js_name = buildPath)]
pub fn build_path(
    start_angle: f64,
    end_angle: f64,
    inner_radius: f64,
    outer_radius: f64,
) -> Option<String> {
    layout::build_path(start_angle, end_angle, inner_radius, outer_radius).map(|p| p.to_svg())
}

/// Category, group and item colors derived from one base color, using the
/// default fade factors.
#[wasm_bindgen(js_name = deriveColors)]
pub fn derive_colors(color: &str) -> Result<JsValue, JsError> {
    let colors = derive_colors_with(&ColorConfig::default(), color)?;
    encode(&colors)
}

#[cfg(test)]
mod integration_tests {
    use super::*;

    fn planner() -> Tree {
        Tree::new()
            .with_category(
                Category::new("health", "Health")
                    .with_color("#3366cc")
                    .with_group(
                        Group::new("run", "Running")
                            .with_item(Item::new("5k", "5k"))
                            .with_item(Item::new("10k", "10k").with_due_date("2026-12-01")),
                    )
                    .with_group(Group::new("sleep", "Sleep")),
            )
            .with_category(Category::new("work", "Work"))
    }

    /// Full pipeline: tree → engine → angles and outlines, as the facade
    /// hands them to JavaScript.
    #[test]
    fn test_tree_to_angles_and_paths() {
        let mut engine = WheelEngine::with_defaults();
        engine.set_tree(planner()).unwrap();

        // health: run 3 + sleep 2 = 5; work: 1; total 6.
        assert_eq!(engine.index().total_units(), 6);

        let angles = flat_angles(engine.slices());
        assert_eq!(angles.len(), engine.slices().len() * 2);
        assert_eq!(angles[0], 0.0);
        assert_eq!(angles[1], 300.0);

        let paths = svg_paths(&engine);
        assert_eq!(paths.len(), engine.slices().len());
        assert!(paths.iter().all(|p| p.starts_with("M ") && p.ends_with('Z')));
    }

    #[test]
    fn test_placeholders_present() {
        let mut engine = WheelEngine::with_defaults();
        engine.set_tree(planner()).unwrap();

        let sleep = engine.slice(&NodeKey::group("health", "sleep")).unwrap();
        let empty = engine
            .slice(&NodeKey::EmptyGroup {
                category: "health".into(),
                group: "sleep".into(),
            })
            .unwrap();
        assert_eq!(empty.level, Level::Item);
        assert_eq!(
            (empty.start_angle, empty.end_angle),
            (sleep.start_angle, sleep.end_angle)
        );

        let work = engine
            .slice(&NodeKey::EmptyCategory {
                category: "work".into(),
            })
            .unwrap();
        assert_eq!(work.level, Level::Group);
        assert_eq!(work.end_angle, 360.0);
    }

    #[test]
    fn test_explicit_color_families() {
        let mut engine = WheelEngine::with_defaults();
        engine.set_tree(planner()).unwrap();

        let base: Hsla = "#3366cc".parse().unwrap();
        let category = engine.slice(&NodeKey::category("health")).unwrap();
        let item = engine.slice(&NodeKey::item("health", "run", "5k")).unwrap();
        assert_eq!(category.color, base);
        assert!((item.color.a - 0.35).abs() < 1e-9);
        assert_eq!(item.color.h, base.h);
    }

    #[test]
    fn test_derive_colors() {
        let colors = derive_colors_with(&ColorConfig::default(), "hsl(210, 50%, 40%)").unwrap();
        assert_eq!(colors.category, Hsla::new(210.0, 0.5, 0.4, 1.0));
        assert!((colors.group.a - 0.7).abs() < 1e-9);
        assert!((colors.item.a - 0.35).abs() < 1e-9);

        let json = serde_json::to_value(&colors).unwrap();
        assert!(json["group"].as_str().unwrap().starts_with("hsla(210"));

        assert!(matches!(
            derive_colors_with(&ColorConfig::default(), "teal-ish"),
            Err(WheelError::Color(ColorParseError::Unsupported(_)))
        ));
    }

    #[test]
    fn test_tree_decodes_from_host_shape() {
        let tree: Tree = serde_json::from_str(
            r#"{"categories":[{"id":"c","title":"C","groups":[
                {"id":"g","title":"G","items":[{"id":"i","title":"I","dueDate":"2026-01-01"}]}
            ]}]}"#,
        )
        .unwrap();
        let mut engine = WheelEngine::with_defaults();
        engine.set_tree(tree).unwrap();
        assert_eq!(engine.slices().len(), 3);
        assert_eq!(engine.slices()[2].end_angle, 360.0);
    }

    #[test]
    fn test_slices_serialize_for_host() {
        let mut engine = WheelEngine::with_defaults();
        engine.set_tree(planner()).unwrap();
        let json = serde_json::to_value(engine.slices()).unwrap();
        let first = &json[0];
        assert_eq!(first["key"]["kind"], "category");
        assert_eq!(first["startAngle"], 0.0);
        assert_eq!(first["innerRadius"], 0.0);
        assert!(first["color"].as_str().unwrap().starts_with("hsla("));
    }

    #[test]
    fn test_resize_then_interact() {
        let mut engine = WheelEngine::with_defaults();
        engine.set_tree(planner()).unwrap();
        engine.resize(440.0, 440.0);

        // Center (220, 220); health covers [0, 300).
        let position = engine.activate_at(240.0, 221.0).unwrap();
        assert_eq!(engine.slices()[position].key, NodeKey::category("health"));
        assert!(engine.selection().is_pinned());

        // Empty space clears it.
        assert_eq!(engine.activate_at(0.0, 0.0), None);
        assert_eq!(engine.selection(), &Selection::Idle);
    }

    #[test]
    fn test_build_path_free_function() {
        assert_eq!(
            build_path(0.0, 90.0, 10.0, 20.0).as_deref(),
            Some("M 10 0 L 20 0 A 20 20 0 0 1 0 20 L 0 10 A 10 10 0 0 0 10 0 Z")
        );
        assert_eq!(build_path(10.0, 10.0, 10.0, 20.0), None);
    }
}
