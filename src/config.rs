//! Wheel configuration.
//!
//! Everything here is visual configuration: ring radii, palette, fade
//! factors and the wheel center. None of it depends on tree content. The
//! JavaScript host may pass a partial object; missing fields take their
//! defaults.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::layout::bands::RadialBands;
use crate::layout::color::ColorConfig;
use crate::layout::path::Point;

/// Configuration for the sunburst layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WheelConfig {
    /// Ring radii per level.
    pub bands: RadialBands,
    /// Palette and fade factors.
    pub colors: ColorConfig,
    /// Wheel center X in scene coordinates.
    pub center_x: f64,
    /// Wheel center Y in scene coordinates.
    pub center_y: f64,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            bands: RadialBands::default(),
            colors: ColorConfig::default(),
            center_x: 0.0,
            center_y: 0.0,
        }
    }
}

impl WheelConfig {
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(self.center_x, self.center_y)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bands.validate()?;
        self.colors.validate()
    }

    /// This configuration fitted to a `width` x `height` viewport.
    ///
    /// The wheel is centered in the viewport and its rings scaled uniformly
    /// so the outer edge touches the shorter side. Returns `None` when the
    /// viewport has no area.
    pub fn fitted_to(&self, width: f64, height: f64) -> Option<Self> {
        if !(width > 0.0 && height > 0.0) || !width.is_finite() || !height.is_finite() {
            return None;
        }
        let factor = width.min(height) / 2.0 / self.bands.outer_radius();
        Some(Self {
            bands: self.bands.scaled(factor),
            colors: self.colors.clone(),
            center_x: width / 2.0,
            center_y: height / 2.0,
        })
    }
}
