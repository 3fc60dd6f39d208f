//! Category, group and item records.
//!
//! These mirror what the host application stores. Only identifiers, order
//! and the optional category color matter to the layout; titles and item
//! metadata travel along so slices can be labelled without a second lookup.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::NodeKey;
use crate::error::TreeError;

/// A leaf of the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Free-form due date. Not used by the layout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

impl Item {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            due_date: None,
        }
    }

    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }
}

/// Middle level: an ordered run of items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Group {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            items: Vec::new(),
        }
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }
}

/// Top level: a weighted category with an optional explicit color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Any CSS color notation the color deriver understands.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub groups: Vec<Group>,
}

impl Category {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            color: None,
            groups: Vec::new(),
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_group(mut self, group: Group) -> Self {
        self.groups.push(group);
        self
    }
}

/// A full snapshot of the hierarchy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tree {
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.categories.push(category);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Total number of nodes at all three levels.
    pub fn node_count(&self) -> usize {
        self.categories
            .iter()
            .map(|c| 1 + c.groups.iter().map(|g| 1 + g.items.len()).sum::<usize>())
            .sum()
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Whether `key` still resolves to something in this snapshot.
    ///
    /// Placeholder keys resolve only while their owner is still empty.
    pub fn contains(&self, key: &NodeKey) -> bool {
        let Some(category) = self.category(key.category_id()) else {
            return false;
        };
        let group = key
            .group_id()
            .and_then(|id| category.groups.iter().find(|g| g.id == id));

        match key {
            NodeKey::Category { .. } => true,
            NodeKey::EmptyCategory { .. } => category.groups.is_empty(),
            NodeKey::Group { .. } => group.is_some(),
            NodeKey::EmptyGroup { .. } => group.is_some_and(|g| g.items.is_empty()),
            NodeKey::Item { item, .. } => {
                group.is_some_and(|g| g.items.iter().any(|i| &i.id == item))
            }
        }
    }

    /// Check identifiers at every level.
    ///
    /// Identifiers must be non-empty. Category ids must be unique in the
    /// tree, group ids unique within their category and item ids unique
    /// within their group.
    pub fn validate(&self) -> Result<(), TreeError> {
        let mut category_ids = HashSet::new();
        for (ci, category) in self.categories.iter().enumerate() {
            if category.id.is_empty() {
                return Err(TreeError::MissingIdentifier {
                    level: "category",
                    position: ci,
                    parent: None,
                });
            }
            if !category_ids.insert(category.id.as_str()) {
                return Err(TreeError::DuplicateIdentifier(NodeKey::category(
                    category.id.clone(),
                )));
            }

            let mut group_ids = HashSet::new();
            for (gi, group) in category.groups.iter().enumerate() {
                if group.id.is_empty() {
                    return Err(TreeError::MissingIdentifier {
                        level: "group",
                        position: gi,
                        parent: Some(NodeKey::category(category.id.clone())),
                    });
                }
                if !group_ids.insert(group.id.as_str()) {
                    return Err(TreeError::DuplicateIdentifier(NodeKey::group(
                        category.id.clone(),
                        group.id.clone(),
                    )));
                }

                let mut item_ids = HashSet::new();
                for (ii, item) in group.items.iter().enumerate() {
                    if item.id.is_empty() {
                        return Err(TreeError::MissingIdentifier {
                            level: "item",
                            position: ii,
                            parent: Some(NodeKey::group(category.id.clone(), group.id.clone())),
                        });
                    }
                    if !item_ids.insert(item.id.as_str()) {
                        return Err(TreeError::DuplicateIdentifier(NodeKey::item(
                            category.id.clone(),
                            group.id.clone(),
                            item.id.clone(),
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Tree {
        Tree::new()
            .with_category(
                Category::new("health", "Health")
                    .with_group(
                        Group::new("run", "Running")
                            .with_item(Item::new("5k", "5k"))
                            .with_item(Item::new("10k", "10k").with_due_date("2026-12-01")),
                    )
                    .with_group(Group::new("sleep", "Sleep")),
            )
            .with_category(Category::new("work", "Work"))
    }

    #[test]
    fn test_node_count() {
        // 2 categories + 2 groups + 2 items
        assert_eq!(sample().node_count(), 6);
        assert_eq!(Tree::new().node_count(), 0);
    }

    #[test]
    fn test_validate_accepts_well_formed_tree() {
        assert_eq!(sample().validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_empty_identifier() {
        let mut tree = sample();
        tree.categories[0].groups[0].items[1].id.clear();
        match tree.validate() {
            Err(TreeError::MissingIdentifier {
                level, position, ..
            }) => {
                assert_eq!(level, "item");
                assert_eq!(position, 1);
            }
            other => panic!("expected MissingIdentifier, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_duplicate_siblings() {
        let tree = sample().with_category(Category::new("work", "Work again"));
        assert_eq!(
            tree.validate(),
            Err(TreeError::DuplicateIdentifier(NodeKey::category("work")))
        );
    }

    #[test]
    fn test_same_group_id_under_different_categories_is_fine() {
        let tree = Tree::new()
            .with_category(Category::new("a", "A").with_group(Group::new("g", "G")))
            .with_category(Category::new("b", "B").with_group(Group::new("g", "G")));
        assert_eq!(tree.validate(), Ok(()));
    }

    #[test]
    fn test_contains() {
        let tree = sample();
        assert!(tree.contains(&NodeKey::category("health")));
        assert!(tree.contains(&NodeKey::group("health", "run")));
        assert!(tree.contains(&NodeKey::item("health", "run", "10k")));
        assert!(!tree.contains(&NodeKey::item("health", "run", "marathon")));
        assert!(tree.contains(&NodeKey::EmptyGroup {
            category: "health".into(),
            group: "sleep".into(),
        }));
        assert!(!tree.contains(&NodeKey::EmptyGroup {
            category: "health".into(),
            group: "run".into(),
        }));
        assert!(tree.contains(&NodeKey::EmptyCategory {
            category: "work".into(),
        }));
        assert!(!tree.contains(&NodeKey::category("play")));
    }

    #[test]
    fn test_deserialize_camel_case_with_defaults() {
        let json = r#"{
            "categories": [
                {"id": "c1", "title": "One", "color": "hsla(10, 50%, 40%, 1)",
                 "groups": [{"id": "g1", "items": [{"id": "i1", "dueDate": "2026-01-01"}]}]},
                {"id": "c2"}
            ]
        }"#;
        let tree: Tree = serde_json::from_str(json).unwrap();
        assert_eq!(tree.categories.len(), 2);
        assert_eq!(
            tree.categories[0].groups[0].items[0].due_date.as_deref(),
            Some("2026-01-01")
        );
        assert!(tree.categories[1].groups.is_empty());
        assert_eq!(tree.categories[1].title, "");
    }

    #[test]
    fn test_missing_id_field_fails_to_decode() {
        let json = r#"{"categories": [{"title": "no id"}]}"#;
        assert!(serde_json::from_str::<Tree>(json).is_err());
    }
}
