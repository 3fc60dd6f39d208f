//! Hover and pin interaction over the slice index.
//!
//! One controller owns the selection state. Slices are compared by their
//! identifier-based keys, so a recomputed layout never leaves the controller
//! pointing at a stale slice.

mod state;

pub use state::{Interaction, Selection};
