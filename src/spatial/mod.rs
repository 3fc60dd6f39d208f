//! Spatial indexing for O(log n) hit testing.
//!
//! This module provides an R-tree based index that resolves pointer
//! coordinates to the slice under them.

mod rtree;

pub use rtree::{SliceHitIndex, polar_angle};
