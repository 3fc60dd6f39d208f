//! Radial band mapper.
//!
//! Each level of the hierarchy is drawn on its own fixed ring. Ring radii do
//! not depend on tree content; they only change when the host reconfigures
//! the wheel or the viewport is resized.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::slice::Level;

/// Inner and outer radius of one ring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Band {
    pub inner: f64,
    pub outer: f64,
}

impl Band {
    pub const fn new(inner: f64, outer: f64) -> Self {
        Self { inner, outer }
    }

    pub fn thickness(self) -> f64 {
        self.outer - self.inner
    }
}

/// Ring radii for the three levels.
///
/// Must satisfy `0 <= category.inner < category.outer < group.inner <
/// group.outer < item.inner < item.outer` so the rings never touch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RadialBands {
    pub category: Band,
    pub group: Band,
    pub item: Band,
}

impl Default for RadialBands {
    fn default() -> Self {
        Self {
            category: Band::new(0.0, 80.0),
            group: Band::new(90.0, 150.0),
            item: Band::new(160.0, 220.0),
        }
    }
}

impl RadialBands {
    /// Ring for `level`.
    #[inline]
    pub fn band(&self, level: Level) -> Band {
        match level {
            Level::Category => self.category,
            Level::Group => self.group,
            Level::Item => self.item,
        }
    }

    /// Radius of the outermost edge of the wheel.
    #[inline]
    pub fn outer_radius(&self) -> f64 {
        self.item.outer
    }

    /// All six radii from the center outwards.
    pub fn radii(&self) -> [f64; 6] {
        [
            self.category.inner,
            self.category.outer,
            self.group.inner,
            self.group.outer,
            self.item.inner,
            self.item.outer,
        ]
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let radii = self.radii();
        let ordered = radii.windows(2).all(|w| w[0] < w[1]);
        if !(radii[0] >= 0.0) || !ordered || !radii[5].is_finite() {
            return Err(ConfigError::BandOrder(radii));
        }
        Ok(())
    }

    /// Every radius multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        let scale = |b: Band| Band::new(b.inner * factor, b.outer * factor);
        Self {
            category: scale(self.category),
            group: scale(self.group),
            item: scale(self.item),
        }
    }
}
