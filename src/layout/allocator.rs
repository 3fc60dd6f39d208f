//! Angular allocator.
//!
//! Partitions the full turn among the nodes of a tree in proportion to their
//! weight, using one global denominator so nested ranges tile exactly.
//!
//! # Weights
//!
//! - Group: `1 + max(1, item_count)`. An empty group keeps one phantom item
//!   unit so its ring has the thickness of a single item.
//! - Category: sum of its group weights, or `1` with no groups.
//! - Total units: sum of category weights.
//!
//! # Exactness
//!
//! Every boundary is a rational position on the turn,
//! `360 * numerator / denominator`, with integer numerator and denominator.
//! Items tile their group evenly, so an item boundary inside a group of
//! `n` items uses denominator `total * n`. Both factors are exact in `f64`
//! and IEEE division is correctly rounded, so two slices meeting at the same
//! rational position get bit-identical boundaries, and the last category
//! ends at exactly `360.0`.
//!
//! The walk is a set of pure functions: each subtree returns its allocations
//! together with the number of units it consumed, and the caller advances
//! its cursor by that amount.

use crate::slice::Level;
use crate::tree::{Category, Group, NodeKey, Tree};

/// Degrees in a full turn.
pub const FULL_TURN: f64 = 360.0;

/// Angular range assigned to one slice.
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    pub key: NodeKey,
    pub level: Level,
    /// Position of the owning category among its siblings.
    pub category_position: usize,
    pub start_angle: f64,
    pub end_angle: f64,
}

/// Result of one allocation pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AngularAllocation {
    /// Allocations in pre-order: category, then each group followed by its
    /// items or placeholder.
    pub allocations: Vec<Allocation>,
    /// Denominator of every category and group range; zero for an empty tree.
    pub total_units: u64,
}

/// Weight of a group in units.
#[inline]
pub fn group_weight(group: &Group) -> u64 {
    1 + group.items.len().max(1) as u64
}

/// Weight of a category in units.
pub fn category_weight(category: &Category) -> u64 {
    if category.groups.is_empty() {
        1
    } else {
        category.groups.iter().map(group_weight).sum()
    }
}

/// Sum of all category weights.
pub fn total_units(tree: &Tree) -> u64 {
    tree.categories.iter().map(category_weight).sum()
}

/// Degrees at the rational position `numerator / denominator` of a turn.
#[inline]
fn degrees(numerator: u64, denominator: u64) -> f64 {
    FULL_TURN * numerator as f64 / denominator as f64
}

/// Allocate angles for every node of `tree`.
///
/// An empty tree yields no allocations.
pub fn allocate(tree: &Tree) -> AngularAllocation {
    let total = total_units(tree);
    if total == 0 {
        return AngularAllocation::default();
    }

    let (allocations, consumed) = tree.categories.iter().enumerate().fold(
        (Vec::with_capacity(tree.node_count() + 1), 0_u64),
        |(mut acc, cursor), (position, category)| {
            let (mut slices, used) = allocate_category(position, category, cursor, total);
            acc.append(&mut slices);
            (acc, cursor + used)
        },
    );
    debug_assert_eq!(consumed, total);

    AngularAllocation {
        allocations,
        total_units: total,
    }
}

/// Allocate a category starting at unit `start`.
///
/// Returns the allocations of the whole subtree and the units consumed.
fn allocate_category(
    position: usize,
    category: &Category,
    start: u64,
    total: u64,
) -> (Vec<Allocation>, u64) {
    let weight = category_weight(category);
    let mut allocations = vec![Allocation {
        key: NodeKey::category(category.id.clone()),
        level: Level::Category,
        category_position: position,
        start_angle: degrees(start, total),
        end_angle: degrees(start + weight, total),
    }];

    if category.groups.is_empty() {
        allocations.push(Allocation {
            key: NodeKey::EmptyCategory {
                category: category.id.clone(),
            },
            level: Level::Group,
            category_position: position,
            start_angle: degrees(start, total),
            end_angle: degrees(start + weight, total),
        });
        return (allocations, weight);
    }

    let mut cursor = start;
    for group in &category.groups {
        let (mut slices, used) = allocate_group(position, &category.id, group, cursor, total);
        allocations.append(&mut slices);
        cursor += used;
    }
    debug_assert_eq!(cursor - start, weight);

    (allocations, weight)
}

/// Allocate a group starting at unit `start`.
fn allocate_group(
    position: usize,
    category_id: &str,
    group: &Group,
    start: u64,
    total: u64,
) -> (Vec<Allocation>, u64) {
    let weight = group_weight(group);
    let mut allocations = Vec::with_capacity(group.items.len() + 1);
    allocations.push(Allocation {
        key: NodeKey::group(category_id, group.id.clone()),
        level: Level::Group,
        category_position: position,
        start_angle: degrees(start, total),
        end_angle: degrees(start + weight, total),
    });

    if group.items.is_empty() {
        allocations.push(Allocation {
            key: NodeKey::EmptyGroup {
                category: category_id.to_string(),
                group: group.id.clone(),
            },
            level: Level::Item,
            category_position: position,
            start_angle: degrees(start, total),
            end_angle: degrees(start + weight, total),
        });
        return (allocations, weight);
    }

    // Item i of n covers [start + i*w/n, start + (i+1)*w/n) units.
    let n = group.items.len() as u64;
    let denominator = total * n;
    let boundary = |i: u64| degrees(start * n + i * weight, denominator);
    for (i, item) in (0_u64..).zip(&group.items) {
        allocations.push(Allocation {
            key: NodeKey::item(category_id, group.id.clone(), item.id.clone()),
            level: Level::Item,
            category_position: position,
            start_angle: boundary(i),
            end_angle: boundary(i + 1),
        });
    }

    (allocations, weight)
}
