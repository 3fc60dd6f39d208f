//! Slices and the slice index.
//!
//! A slice is one annular sector of the wheel. The index is the flat,
//! ordered list of every slice produced by a layout pass, plus the
//! parent/child topology between rings for lineage queries.

mod index;
mod types;

pub use index::SliceIndex;
pub use types::{Level, Slice};
