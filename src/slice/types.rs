//! Slice record and ring levels.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::layout::color::Hsla;
use crate::layout::path::{Point, SectorPath, build_path_at};
use crate::tree::NodeKey;

/// Ring a slice is drawn on, innermost first.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Level {
    Category = 0,
    Group = 1,
    Item = 2,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Group => "group",
            Self::Item => "item",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One rendering unit of the wheel.
///
/// Angles are degrees with `0 <= start_angle < end_angle <= 360`, measured
/// from the positive x axis in the direction of increasing y (clockwise on
/// screen).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Slice {
    pub key: NodeKey,
    pub level: Level,
    /// Display title of the node, empty for placeholders.
    pub title: String,
    pub start_angle: f64,
    pub end_angle: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub color: Hsla,
}

impl Slice {
    /// Angular extent in degrees.
    #[inline]
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Closed outline of this slice around `center`.
    ///
    /// Returns `None` for zero-width slices, which are never drawn.
    pub fn path(&self, center: Point) -> Option<SectorPath> {
        build_path_at(
            center,
            self.start_angle,
            self.end_angle,
            self.inner_radius,
            self.outer_radius,
        )
    }
}
