//! Layout pipeline for the radial hierarchy.
//!
//! The allocator assigns angles, the band mapper assigns radii, the color
//! deriver assigns fills and the path builder turns the result into
//! drawable outlines. `sunburst` strings them together into a `SliceIndex`.

pub mod allocator;
pub mod bands;
pub mod color;
pub mod path;
pub mod sunburst;

pub use allocator::{AngularAllocation, allocate};
pub use bands::{Band, RadialBands};
pub use color::{ColorConfig, Hsla};
pub use path::{PathCommand, Point, SectorPath, build_path, build_path_at};
pub use sunburst::SunburstLayout;
