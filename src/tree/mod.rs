//! Tree model consumed by the layout engine.
//!
//! The hierarchy is exactly three levels deep: categories contain groups,
//! groups contain items. The host owns the tree and hands the engine an
//! immutable snapshot for each layout pass; the engine never mutates it.

mod key;
mod node;

pub use key::NodeKey;
pub use node::{Category, Group, Item, Tree};
