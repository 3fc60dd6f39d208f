//! SliceIndex - the flat slice list produced by one layout pass.
//!
//! Slices are stored in pre-order: each category is followed by its groups,
//! each group by its items (or its placeholder). Sibling order matches the
//! source tree. Alongside the list the index keeps the ring-to-ring
//! topology in a petgraph `StableGraph` so hosts can walk from any slice to
//! its children or up to its category.

use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::{Directed, Direction};
use std::collections::HashMap;

use super::types::{Level, Slice};
use crate::tree::NodeKey;

/// Immutable result of a layout pass.
#[derive(Debug, Clone, Default)]
pub struct SliceIndex {
    /// Slices in pre-order.
    slices: Vec<Slice>,

    /// Map from stable key to position in `slices`
    positions: HashMap<NodeKey, usize>,

    /// Ring topology; node weights are positions in `slices`.
    hierarchy: StableGraph<usize, (), Directed>,

    /// Graph node for each slice position
    nodes: Vec<NodeIndex>,

    /// Denominator used by the allocator
    total_units: u64,
}

impl SliceIndex {
    /// An index with no slices.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build an index from slices in pre-order.
    ///
    /// A slice whose parent key is not present earlier in the list is kept
    /// but left unattached in the hierarchy.
    pub fn new(slices: Vec<Slice>, total_units: u64) -> Self {
        let mut hierarchy = StableGraph::with_capacity(slices.len(), slices.len());
        let mut positions = HashMap::with_capacity(slices.len());
        let mut nodes = Vec::with_capacity(slices.len());

        for (position, slice) in slices.iter().enumerate() {
            let node = hierarchy.add_node(position);
            nodes.push(node);
            positions.insert(slice.key.clone(), position);

            if let Some(parent) = slice.key.parent().and_then(|k| positions.get(&k)) {
                hierarchy.add_edge(nodes[*parent], node, ());
            }
        }

        Self {
            slices,
            positions,
            hierarchy,
            nodes,
            total_units,
        }
    }

    pub fn len(&self) -> usize {
        self.slices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// Sum of category weights used as the angular denominator.
    ///
    /// Zero for an empty index.
    pub fn total_units(&self) -> u64 {
        self.total_units
    }

    pub fn slices(&self) -> &[Slice] {
        &self.slices
    }

    pub fn iter(&self) -> impl Iterator<Item = &Slice> {
        self.slices.iter()
    }

    pub fn get(&self, position: usize) -> Option<&Slice> {
        self.slices.get(position)
    }

    pub fn position(&self, key: &NodeKey) -> Option<usize> {
        self.positions.get(key).copied()
    }

    pub fn slice(&self, key: &NodeKey) -> Option<&Slice> {
        self.position(key).map(|p| &self.slices[p])
    }

    pub fn contains(&self, key: &NodeKey) -> bool {
        self.positions.contains_key(key)
    }

    /// Slices on one ring, in angular order.
    pub fn at_level(&self, level: Level) -> impl Iterator<Item = &Slice> {
        self.slices.iter().filter(move |s| s.level == level)
    }

    /// Direct children of `key` on the next ring out, in angular order.
    pub fn children(&self, key: &NodeKey) -> Vec<&Slice> {
        let Some(position) = self.position(key) else {
            return Vec::new();
        };
        let mut children: Vec<usize> = self
            .hierarchy
            .neighbors_directed(self.nodes[position], Direction::Outgoing)
            .filter_map(|n| self.hierarchy.node_weight(n).copied())
            .collect();
        // neighbors come back newest-first
        children.sort_unstable();
        children.into_iter().map(|p| &self.slices[p]).collect()
    }

    /// Path from the category ring down to `key`, inclusive.
    ///
    /// Empty when `key` is not in the index.
    pub fn lineage(&self, key: &NodeKey) -> Vec<&Slice> {
        let Some(position) = self.position(key) else {
            return Vec::new();
        };
        let mut chain = vec![&self.slices[position]];
        let mut node = self.nodes[position];
        while let Some(parent) = self
            .hierarchy
            .neighbors_directed(node, Direction::Incoming)
            .next()
        {
            if let Some(&p) = self.hierarchy.node_weight(parent) {
                chain.push(&self.slices[p]);
            }
            node = parent;
        }
        chain.reverse();
        chain
    }
}
