//! Identifier-based slice identity.
//!
//! A `NodeKey` names the tree node a slice represents by the caller's
//! identifiers, never by position or reference. Keys therefore survive
//! recomputation: a key built before an edit compares equal to the key of
//! the same node after the edit, as long as its identifiers are unchanged.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identity of a slice in the wheel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum NodeKey {
    /// A top-level category.
    Category { category: String },
    /// A group inside a category.
    Group { category: String, group: String },
    /// A leaf item inside a group.
    Item {
        category: String,
        group: String,
        item: String,
    },
    /// Item-band placeholder for a group without items.
    EmptyGroup { category: String, group: String },
    /// Group-band placeholder for a category without groups.
    EmptyCategory { category: String },
}

impl NodeKey {
    /// Key of a category slice.
    pub fn category(category: impl Into<String>) -> Self {
        Self::Category {
            category: category.into(),
        }
    }

    /// Key of a group slice.
    pub fn group(category: impl Into<String>, group: impl Into<String>) -> Self {
        Self::Group {
            category: category.into(),
            group: group.into(),
        }
    }

    /// Key of an item slice.
    pub fn item(
        category: impl Into<String>,
        group: impl Into<String>,
        item: impl Into<String>,
    ) -> Self {
        Self::Item {
            category: category.into(),
            group: group.into(),
            item: item.into(),
        }
    }

    /// Identifier of the category this key belongs to.
    pub fn category_id(&self) -> &str {
        match self {
            Self::Category { category }
            | Self::Group { category, .. }
            | Self::Item { category, .. }
            | Self::EmptyGroup { category, .. }
            | Self::EmptyCategory { category } => category,
        }
    }

    /// Identifier of the group this key belongs to, if any.
    pub fn group_id(&self) -> Option<&str> {
        match self {
            Self::Group { group, .. }
            | Self::Item { group, .. }
            | Self::EmptyGroup { group, .. } => Some(group.as_str()),
            Self::Category { .. } | Self::EmptyCategory { .. } => None,
        }
    }

    /// Identifier of the item, if this key names one.
    pub fn item_id(&self) -> Option<&str> {
        match self {
            Self::Item { item, .. } => Some(item.as_str()),
            _ => None,
        }
    }

    /// Whether this key names a placeholder rather than a real node.
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::EmptyGroup { .. } | Self::EmptyCategory { .. })
    }

    /// Key of the slice one ring further in, if any.
    pub fn parent(&self) -> Option<NodeKey> {
        match self {
            Self::Category { .. } => None,
            Self::Group { category, .. } | Self::EmptyCategory { category } => {
                Some(Self::category(category.clone()))
            }
            Self::Item {
                category, group, ..
            }
            | Self::EmptyGroup { category, group } => {
                Some(Self::group(category.clone(), group.clone()))
            }
        }
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Category { category } => write!(f, "Category({category})"),
            Self::Group { category, group } => write!(f, "Group({category}/{group})"),
            Self::Item {
                category,
                group,
                item,
            } => write!(f, "Item({category}/{group}/{item})"),
            Self::EmptyGroup { category, group } => {
                write!(f, "EmptyGroup({category}/{group})")
            }
            Self::EmptyCategory { category } => write!(f, "EmptyCategory({category})"),
        }
    }
}
