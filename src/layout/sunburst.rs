//! Sunburst layout: tree snapshot in, slice index out.
//!
//! Runs the angular allocator, places each allocation on its level's ring
//! and resolves its color. The pass is a pure function of the tree and the
//! configuration, so running it twice on the same input gives identical
//! output.

use std::collections::HashMap;

use crate::config::WheelConfig;
use crate::error::TreeError;
use crate::layout::allocator::allocate;
use crate::layout::color::Hsla;
use crate::slice::{Slice, SliceIndex};
use crate::tree::{NodeKey, Tree};

/// Computes slice indices for tree snapshots.
#[derive(Debug, Clone)]
pub struct SunburstLayout {
    config: WheelConfig,
}

impl SunburstLayout {
    pub fn new(config: WheelConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(WheelConfig::default())
    }

    pub fn config(&self) -> &WheelConfig {
        &self.config
    }

    /// Lay out `tree`, rejecting any tree that fails validation.
    pub fn try_compute(&self, tree: &Tree) -> Result<SliceIndex, TreeError> {
        tree.validate()?;
        Ok(self.layout(tree))
    }

    /// Lay out `tree`.
    ///
    /// Trees with duplicate sibling identifiers are invalid input and yield
    /// an empty index.
    ///
    /// # Panics
    ///
    /// Panics if any node has an empty identifier. Hosts never produce such
    /// nodes from user actions, so this is a contract violation.
    pub fn compute(&self, tree: &Tree) -> SliceIndex {
        match self.try_compute(tree) {
            Ok(index) => index,
            Err(err @ TreeError::DuplicateIdentifier(_)) => {
                log::warn!("event=layout_rejected reason=\"{err}\"");
                SliceIndex::empty()
            }
            Err(err @ TreeError::MissingIdentifier { .. }) => {
                panic!("malformed tree: {err}")
            }
        }
    }

    fn layout(&self, tree: &Tree) -> SliceIndex {
        let allocation = allocate(tree);
        let colors = &self.config.colors;

        let base_colors: Vec<Hsla> = tree
            .categories
            .iter()
            .enumerate()
            .map(|(position, c)| colors.base_color(position, c.color.as_deref()))
            .collect();
        let titles = titles(tree);

        let slices: Vec<Slice> = allocation
            .allocations
            .into_iter()
            .map(|a| {
                let band = self.config.bands.band(a.level);
                let title = titles.get(&a.key).copied().unwrap_or_default().to_string();
                Slice {
                    color: colors.color_for(a.level, base_colors[a.category_position]),
                    title,
                    key: a.key,
                    level: a.level,
                    start_angle: a.start_angle,
                    end_angle: a.end_angle,
                    inner_radius: band.inner,
                    outer_radius: band.outer,
                }
            })
            .collect();

        log::debug!(
            "event=layout_computed categories={} slices={} total_units={}",
            tree.categories.len(),
            slices.len(),
            allocation.total_units
        );

        SliceIndex::new(slices, allocation.total_units)
    }
}

impl Default for SunburstLayout {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Display titles by key. Placeholders have none.
fn titles(tree: &Tree) -> HashMap<NodeKey, &str> {
    let mut titles = HashMap::with_capacity(tree.node_count());
    for category in &tree.categories {
        titles.insert(NodeKey::category(category.id.clone()), category.title.as_str());
        for group in &category.groups {
            titles.insert(
                NodeKey::group(category.id.clone(), group.id.clone()),
                group.title.as_str(),
            );
            for item in &group.items {
                titles.insert(
                    NodeKey::item(category.id.clone(), group.id.clone(), item.id.clone()),
                    item.title.as_str(),
                );
            }
        }
    }
    titles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slice::Level;
    use crate::tree::{Category, Group, Item};

    fn sample() -> Tree {
        Tree::new()
            .with_category(
                Category::new("health", "Health")
                    .with_group(
                        Group::new("run", "Running")
                            .with_item(Item::new("5k", "Run a 5k"))
                            .with_item(Item::new("10k", "Run a 10k")),
                    )
                    .with_group(Group::new("sleep", "Sleep")),
            )
            .with_category(Category::new("work", "Work").with_color("#336699"))
    }

    #[test]
    fn test_slices_get_band_radii_titles_and_colors() {
        let layout = SunburstLayout::with_defaults();
        let index = layout.compute(&sample());
        let bands = layout.config().bands;

        for slice in index.iter() {
            let band = bands.band(slice.level);
            assert_eq!(slice.inner_radius, band.inner);
            assert_eq!(slice.outer_radius, band.outer);
            assert!(slice.inner_radius < slice.outer_radius);
        }

        let run = index.slice(&NodeKey::group("health", "run")).unwrap();
        assert_eq!(run.title, "Running");
        assert_eq!(run.level, Level::Group);

        let placeholder = index
            .slice(&NodeKey::EmptyGroup {
                category: "health".into(),
                group: "sleep".into(),
            })
            .unwrap();
        assert_eq!(placeholder.title, "");
        assert_eq!(placeholder.level, Level::Item);

        let work = index.slice(&NodeKey::category("work")).unwrap();
        let explicit: Hsla = "#336699".parse().unwrap();
        assert_eq!(work.color, explicit);
    }

    #[test]
    fn test_descendant_colors_fade_from_category() {
        let layout = SunburstLayout::with_defaults();
        let index = layout.compute(&sample());

        let category = index.slice(&NodeKey::category("health")).unwrap();
        let group = index.slice(&NodeKey::group("health", "run")).unwrap();
        let item = index.slice(&NodeKey::item("health", "run", "5k")).unwrap();

        assert_eq!(category.color, layout.config().colors.palette_color(0));
        assert_eq!(group.color.h, category.color.h);
        assert!(group.color.a < category.color.a);
        assert!(item.color.a < group.color.a);
    }

    #[test]
    fn test_idempotent() {
        let layout = SunburstLayout::with_defaults();
        let a = layout.compute(&sample());
        let b = layout.compute(&sample());
        assert_eq!(a.slices(), b.slices());
    }

    #[test]
    fn test_empty_tree() {
        let index = SunburstLayout::with_defaults().compute(&Tree::new());
        assert!(index.is_empty());
    }

    #[test]
    fn test_lone_empty_category() {
        let tree = Tree::new().with_category(Category::new("solo", "Solo"));
        let index = SunburstLayout::with_defaults().compute(&tree);

        assert_eq!(index.len(), 2);
        let placeholders: Vec<_> = index.iter().filter(|s| s.key.is_placeholder()).collect();
        assert_eq!(placeholders.len(), 1);
        assert_eq!(placeholders[0].start_angle, 0.0);
        assert_eq!(placeholders[0].end_angle, 360.0);
        let levels: Vec<_> = index.iter().map(|s| s.level).collect();
        assert_eq!(levels, vec![Level::Category, Level::Group]);
    }

    #[test]
    fn test_duplicate_ids_yield_empty_index() {
        let tree = sample().with_category(Category::new("work", "Dup"));
        let index = SunburstLayout::with_defaults().compute(&tree);
        assert!(index.is_empty());
    }

    #[test]
    #[should_panic(expected = "malformed tree")]
    fn test_missing_identifier_panics() {
        let mut tree = sample();
        tree.categories[0].groups[0].id.clear();
        SunburstLayout::with_defaults().compute(&tree);
    }

    #[test]
    fn test_try_compute_reports_missing_identifier() {
        let mut tree = sample();
        tree.categories[1].id.clear();
        assert!(matches!(
            SunburstLayout::with_defaults().try_compute(&tree),
            Err(TreeError::MissingIdentifier { level: "category", .. })
        ));
    }
}
