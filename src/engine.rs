//! WheelEngine - owns one wheel's state.
//!
//! The engine holds:
//! - the latest tree snapshot from the host
//! - the base configuration and the viewport-fitted configuration
//! - the slice index of the last layout pass
//! - the spatial index used for pointer hit testing
//! - the hover/pin interaction state
//!
//! Any change to the tree, configuration or viewport recomputes the slice
//! index and hit index from scratch before returning, then drops any
//! selection that no longer resolves. Callers never observe a half-updated
//! layout.

use crate::config::WheelConfig;
use crate::error::{TreeError, WheelError, WheelResult};
use crate::interaction::{Interaction, Selection};
use crate::layout::path::{Point, SectorPath};
use crate::layout::SunburstLayout;
use crate::slice::{Slice, SliceIndex};
use crate::spatial::SliceHitIndex;
use crate::tree::{NodeKey, Tree};

/// Viewport size in scene units.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Viewport {
    width: f64,
    height: f64,
}

/// The radial hierarchy engine.
pub struct WheelEngine {
    /// Configuration as supplied by the host.
    base_config: WheelConfig,

    /// Last accepted viewport, if any.
    viewport: Option<Viewport>,

    /// Layout built from `base_config` fitted to `viewport`.
    layout: SunburstLayout,

    /// Current tree snapshot.
    tree: Tree,

    /// Slices of the last layout pass.
    index: SliceIndex,

    /// Hit index matching `index`.
    hits: SliceHitIndex,

    /// Hover/pin state.
    interaction: Interaction,
}

impl WheelEngine {
    /// Create an engine with an empty tree.
    pub fn new(config: WheelConfig) -> WheelResult<Self> {
        config.validate()?;
        Ok(Self::empty(config))
    }

    /// Create an engine with the default configuration.
    pub fn with_defaults() -> Self {
        Self::empty(WheelConfig::default())
    }

    fn empty(config: WheelConfig) -> Self {
        Self {
            layout: SunburstLayout::new(config.clone()),
            base_config: config,
            viewport: None,
            tree: Tree::new(),
            index: SliceIndex::empty(),
            hits: SliceHitIndex::new(),
            interaction: Interaction::new(),
        }
    }

    // =========================================================================
    // Inputs
    // =========================================================================

    /// Replace the tree snapshot and recompute.
    ///
    /// Trees with duplicate sibling identifiers are accepted but lay out as
    /// an empty wheel. Trees with empty identifiers are rejected and leave
    /// the engine unchanged.
    pub fn set_tree(&mut self, tree: Tree) -> WheelResult<()> {
        if let Err(err @ TreeError::MissingIdentifier { .. }) = tree.validate() {
            return Err(WheelError::Tree(err));
        }
        self.tree = tree;
        self.recompute();
        Ok(())
    }

    /// Replace the configuration and recompute.
    pub fn set_config(&mut self, config: WheelConfig) -> WheelResult<()> {
        config.validate()?;
        self.base_config = config;
        self.refit();
        Ok(())
    }

    /// Fit the wheel to a new viewport and recompute.
    ///
    /// A viewport without area is ignored.
    pub fn resize(&mut self, width: f64, height: f64) {
        if self.base_config.fitted_to(width, height).is_none() {
            log::warn!("event=resize_ignored width={width} height={height}");
            return;
        }
        self.viewport = Some(Viewport { width, height });
        self.refit();
    }

    fn refit(&mut self) {
        let config = self
            .viewport
            .and_then(|v| self.base_config.fitted_to(v.width, v.height))
            .unwrap_or_else(|| self.base_config.clone());
        self.layout = SunburstLayout::new(config);
        self.recompute();
    }

    fn recompute(&mut self) {
        let index = self.layout.compute(&self.tree);
        let hits = SliceHitIndex::build(&index, self.center());
        self.index = index;
        self.hits = hits;

        // A key must name a node of the snapshot and have a slice to point at.
        let (tree, index) = (&self.tree, &self.index);
        self.interaction
            .reconcile(|key| tree.contains(key) && index.contains(key));
    }

    // =========================================================================
    // Layout access
    // =========================================================================

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Configuration in effect, after viewport fitting.
    pub fn config(&self) -> &WheelConfig {
        self.layout.config()
    }

    pub fn center(&self) -> Point {
        self.config().center()
    }

    pub fn index(&self) -> &SliceIndex {
        &self.index
    }

    pub fn slices(&self) -> &[Slice] {
        self.index.slices()
    }

    pub fn slice(&self, key: &NodeKey) -> Option<&Slice> {
        self.index.slice(key)
    }

    /// Outline of the slice at `position`, if drawable.
    pub fn path(&self, position: usize) -> Option<SectorPath> {
        self.index.get(position)?.path(self.center())
    }

    /// Outlines of every drawable slice, paired with their positions.
    pub fn paths(&self) -> Vec<(usize, SectorPath)> {
        self.index
            .iter()
            .enumerate()
            .filter_map(|(position, slice)| Some((position, slice.path(self.center())?)))
            .collect()
    }

    /// Position of the slice under scene point `(x, y)`.
    pub fn slice_at(&self, x: f64, y: f64) -> Option<usize> {
        self.hits.slice_at(x, y)
    }

    // =========================================================================
    // Interaction
    // =========================================================================

    pub fn selection(&self) -> &Selection {
        self.interaction.state()
    }

    /// The selected slice: pinned if any, else hovered.
    pub fn selected_slice(&self) -> Option<&Slice> {
        self.interaction
            .selected()
            .and_then(|key| self.index.slice(key))
    }

    /// Category → group → item breadcrumb of the selection.
    pub fn selection_lineage(&self) -> Vec<&Slice> {
        self.interaction
            .selected()
            .map(|key| self.index.lineage(key))
            .unwrap_or_default()
    }

    /// Pointer moved to `(x, y)`; hovers whatever is under it.
    ///
    /// Returns the position of the selected slice afterwards.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Option<usize> {
        match self.slice_at(x, y) {
            Some(position) => {
                let key = self.index.slices()[position].key.clone();
                if self.interaction.hovered() != Some(&key) {
                    self.interaction.pointer_enter(key);
                }
            }
            None => self.interaction.pointer_leave(),
        }
        self.selected_position()
    }

    /// Pointer entered the slice with `key`. Unknown keys are ignored.
    pub fn pointer_enter(&mut self, key: &NodeKey) {
        if self.index.contains(key) {
            self.interaction.pointer_enter(key.clone());
        }
    }

    pub fn pointer_leave(&mut self) {
        self.interaction.pointer_leave();
    }

    /// Activation at `(x, y)`: pins the slice under it, or clears the pin
    /// when nothing is there.
    pub fn activate_at(&mut self, x: f64, y: f64) -> Option<usize> {
        let key = self
            .slice_at(x, y)
            .map(|position| self.index.slices()[position].key.clone());
        self.interaction.activate(key);
        self.selected_position()
    }

    /// Activation on the slice with `key`, or on empty space with `None`.
    ///
    /// Unknown keys count as empty space.
    pub fn activate(&mut self, key: Option<&NodeKey>) {
        let key = key.filter(|k| self.index.contains(k)).cloned();
        self.interaction.activate(key);
    }

    pub fn clear_pin(&mut self) {
        self.interaction.clear_pin();
    }

    /// Position of the selected slice in the index.
    pub fn selected_position(&self) -> Option<usize> {
        self.interaction
            .selected()
            .and_then(|key| self.index.position(key))
    }
}

impl Default for WheelEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slice::Level;
    use crate::tree::{Category, Group, Item};

    fn tree() -> Tree {
        // a: weight 3 on [0, 180); b: weight 3 on [180, 360)
        Tree::new()
            .with_category(
                Category::new("a", "A").with_group(
                    Group::new("g", "G")
                        .with_item(Item::new("i1", "one"))
                        .with_item(Item::new("i2", "two")),
                ),
            )
            .with_category(
                Category::new("b", "B").with_group(
                    Group::new("h", "H")
                        .with_item(Item::new("x", "x"))
                        .with_item(Item::new("y", "y")),
                ),
            )
    }

    fn engine() -> WheelEngine {
        let mut engine = WheelEngine::with_defaults();
        engine.set_tree(tree()).unwrap();
        engine
    }

    #[test]
    fn test_set_tree_builds_slices_and_hits() {
        let engine = engine();
        assert_eq!(engine.slices().len(), 8);
        assert_eq!(engine.paths().len(), 8);
        assert_eq!(
            engine.slice_at(40.0, 1.0).map(|p| engine.slices()[p].key.clone()),
            Some(NodeKey::category("a"))
        );
    }

    #[test]
    fn test_rejects_missing_identifier_without_changing_state() {
        let mut engine = engine();
        let mut bad = tree();
        bad.categories[0].id.clear();
        let err = engine.set_tree(bad).unwrap_err();
        assert!(matches!(
            err,
            WheelError::Tree(TreeError::MissingIdentifier { .. })
        ));
        assert_eq!(engine.slices().len(), 8);
    }

    #[test]
    fn test_duplicate_identifiers_give_empty_wheel() {
        let mut engine = engine();
        let dup = tree().with_category(Category::new("a", "again"));
        engine.set_tree(dup).unwrap();
        assert!(engine.slices().is_empty());
        assert_eq!(engine.slice_at(40.0, 1.0), None);
    }

    #[test]
    fn test_pointer_scenario() {
        let mut engine = engine();
        let a = NodeKey::category("a");
        let b = NodeKey::category("b");

        // Hover a.
        let selected = engine.pointer_move(40.0, 1.0);
        assert_eq!(selected, engine.index().position(&a));

        // Click a.
        engine.activate_at(40.0, 1.0);
        assert_eq!(engine.selection(), &Selection::Pinned(a.clone()));

        // Move over b: still a.
        engine.pointer_move(-40.0, -1.0);
        assert_eq!(engine.selected_slice().unwrap().key, a);

        // Click the gap between rings: idle.
        assert_eq!(engine.activate_at(85.0, 0.5), None);
        assert_eq!(engine.selection(), &Selection::Idle);

        // Hover b surfaces again.
        engine.pointer_move(-40.0, -1.0);
        assert_eq!(engine.selected_slice().unwrap().key, b);

        // Off the wheel.
        engine.pointer_move(1000.0, 0.0);
        assert_eq!(engine.selection(), &Selection::Idle);
    }

    #[test]
    fn test_key_based_interaction() {
        let mut engine = engine();
        let item = NodeKey::item("a", "g", "i2");
        engine.pointer_enter(&item);
        assert_eq!(engine.selected_slice().unwrap().title, "two");

        engine.activate(Some(&NodeKey::item("a", "g", "nope")));
        assert_eq!(engine.selection(), &Selection::Idle);

        engine.pointer_enter(&NodeKey::category("zzz"));
        assert_eq!(engine.selection(), &Selection::Idle);

        engine.activate(Some(&item));
        engine.clear_pin();
        assert_eq!(engine.selection(), &Selection::Idle);
    }

    #[test]
    fn test_selection_lineage() {
        let mut engine = engine();
        engine.activate(Some(&NodeKey::item("b", "h", "y")));
        let levels: Vec<_> = engine.selection_lineage().iter().map(|s| s.level).collect();
        assert_eq!(levels, vec![Level::Category, Level::Group, Level::Item]);
        assert_eq!(engine.selection_lineage()[0].title, "B");
    }

    #[test]
    fn test_pin_survives_unrelated_edit_and_drops_when_removed() {
        let mut engine = engine();
        let pinned = NodeKey::item("a", "g", "i1");
        engine.activate(Some(&pinned));

        // Add an item elsewhere: pin stays, angles move.
        let before = engine.slice(&pinned).unwrap().end_angle;
        let mut edited = tree();
        edited.categories[1].groups[0]
            .items
            .push(Item::new("z", "z"));
        engine.set_tree(edited.clone()).unwrap();
        assert_eq!(engine.selection(), &Selection::Pinned(pinned.clone()));
        assert!(engine.slice(&pinned).unwrap().end_angle < before);

        // Remove the pinned item: back to idle.
        edited.categories[0].groups[0].items.remove(0);
        engine.set_tree(edited).unwrap();
        assert_eq!(engine.selection(), &Selection::Idle);
    }

    #[test]
    fn test_placeholder_pin_drops_once_owner_fills() {
        let mut engine = WheelEngine::with_defaults();
        let mut tree = Tree::new().with_category(
            Category::new("c", "C").with_group(Group::new("g", "G")),
        );
        engine.set_tree(tree.clone()).unwrap();

        let empty = NodeKey::EmptyGroup {
            category: "c".into(),
            group: "g".into(),
        };
        engine.activate(Some(&empty));
        assert!(engine.selection().is_pinned());

        tree.categories[0].groups[0].items.push(Item::new("i", "I"));
        assert!(!tree.contains(&empty));
        engine.set_tree(tree).unwrap();
        assert_eq!(engine.selection(), &Selection::Idle);
    }

    #[test]
    fn test_pin_drops_when_tree_stops_laying_out() {
        let mut engine = engine();
        engine.activate(Some(&NodeKey::category("b")));

        // "b" still exists in the snapshot, but duplicates leave no slice.
        let dup = tree().with_category(Category::new("a", "again"));
        assert!(dup.contains(&NodeKey::category("b")));
        engine.set_tree(dup).unwrap();
        assert_eq!(engine.selection(), &Selection::Idle);
    }

    #[test]
    fn test_constructors_agree() {
        let validated = WheelEngine::new(WheelConfig::default()).unwrap();
        let default = WheelEngine::with_defaults();
        assert_eq!(validated.config(), default.config());
        assert!(validated.slices().is_empty());
        assert_eq!(validated.selection(), &Selection::Idle);

        let mut bad = WheelConfig::default();
        bad.colors.palette.clear();
        assert!(matches!(WheelEngine::new(bad), Err(WheelError::Config(_))));
    }

    #[test]
    fn test_resize_refits_and_rebuilds_hits() {
        let mut engine = engine();
        engine.resize(1000.0, 500.0);
        assert_eq!(engine.center(), Point::new(500.0, 250.0));
        assert!((engine.config().bands.outer_radius() - 250.0).abs() < 1e-9);

        // Slightly right of center is category a in the new frame.
        let hit = engine.slice_at(520.0, 251.0).unwrap();
        assert_eq!(engine.slices()[hit].key, NodeKey::category("a"));

        // Degenerate viewport is ignored.
        engine.resize(0.0, 500.0);
        assert_eq!(engine.center(), Point::new(500.0, 250.0));
    }

    #[test]
    fn test_set_config_validates() {
        let mut engine = engine();
        let mut config = WheelConfig::default();
        config.bands.group.inner = 10.0;
        assert!(matches!(engine.set_config(config), Err(WheelError::Config(_))));

        let mut config = WheelConfig::default();
        config.center_x = 100.0;
        engine.set_config(config).unwrap();
        assert_eq!(engine.center().x, 100.0);
        assert!(engine.slice_at(140.0, 1.0).is_some());
    }
}
