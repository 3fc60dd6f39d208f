//! Ring colors.
//!
//! Every category gets a base color, either its own explicit color or the
//! palette entry at its sibling position (cycling). Groups use the base
//! color at reduced alpha, items reduce it further, so the three rings of a
//! category read as one family while staying distinguishable.
//!
//! Colors are handled as structured HSLA values. Explicit colors may be
//! given in any of the usual CSS notations (`hsl()`, `hsla()`, `rgb()`,
//! `rgba()`, `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`) and are converted on
//! the way in; output is always `hsla(h, s%, l%, a)`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ColorParseError, ConfigError};
use crate::slice::Level;

/// Color in hue/saturation/lightness/alpha form.
///
/// `h` is in degrees `[0, 360)`, the other channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Hsla {
    pub h: f64,
    pub s: f64,
    pub l: f64,
    pub a: f64,
}

impl Hsla {
    /// Build a color, wrapping the hue and clamping the other channels.
    pub fn new(h: f64, s: f64, l: f64, a: f64) -> Self {
        Self {
            h: h.rem_euclid(360.0),
            s: s.clamp(0.0, 1.0),
            l: l.clamp(0.0, 1.0),
            a: a.clamp(0.0, 1.0),
        }
    }

    /// Same hue, saturation and lightness with alpha scaled by `factor`.
    pub fn fade(self, factor: f64) -> Self {
        Self::new(self.h, self.s, self.l, self.a * factor)
    }

    /// Convert from 8-bit RGB channels and a `[0, 1]` alpha.
    pub fn from_rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        let r = f64::from(r) / 255.0;
        let g = f64::from(g) / 255.0;
        let b = f64::from(b) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;
        let delta = max - min;

        if delta == 0.0 {
            return Self::new(0.0, 0.0, l, a);
        }

        let s = delta / (1.0 - (2.0 * l - 1.0).abs());
        let h = if max == r {
            60.0 * ((g - b) / delta).rem_euclid(6.0)
        } else if max == g {
            60.0 * ((b - r) / delta + 2.0)
        } else {
            60.0 * ((r - g) / delta + 4.0)
        };

        Self::new(h, s, l, a)
    }
}

impl fmt::Display for Hsla {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsla({}, {}%, {}%, {})",
            round3(self.h),
            round3(self.s * 100.0),
            round3(self.l * 100.0),
            round3(self.a)
        )
    }
}

fn round3(v: f64) -> f64 {
    let r = (v * 1000.0).round() / 1000.0;
    if r == 0.0 { 0.0 } else { r }
}

impl From<Hsla> for String {
    fn from(color: Hsla) -> Self {
        color.to_string()
    }
}

impl TryFrom<String> for Hsla {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl FromStr for Hsla {
    type Err = ColorParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let text = input.trim().to_ascii_lowercase();

        if let Some(hex) = text.strip_prefix('#') {
            return parse_hex(input, hex);
        }

        let Some((name, rest)) = text.split_once('(') else {
            return Err(ColorParseError::Unsupported(input.to_string()));
        };
        let Some(body) = rest.strip_suffix(')') else {
            return Err(ColorParseError::Unsupported(input.to_string()));
        };
        let parts = split_components(body);

        match (name.trim(), parts.len()) {
            ("hsl" | "hsla", 3 | 4) => {
                let h = parse_hue(input, parts[0])?;
                let s = parse_percent(input, parts[1])?;
                let l = parse_percent(input, parts[2])?;
                let a = parts
                    .get(3)
                    .map(|p| parse_alpha(input, p))
                    .transpose()?
                    .unwrap_or(1.0);
                Ok(Self::new(h, s, l, a))
            }
            ("rgb" | "rgba", 3 | 4) => {
                let r = parse_channel(input, parts[0])?;
                let g = parse_channel(input, parts[1])?;
                let b = parse_channel(input, parts[2])?;
                let a = parts
                    .get(3)
                    .map(|p| parse_alpha(input, p))
                    .transpose()?
                    .unwrap_or(1.0);
                Ok(Self::from_rgba(r, g, b, a))
            }
            _ => Err(ColorParseError::Unsupported(input.to_string())),
        }
    }
}

/// Split on commas, whitespace, or the `/` before alpha in modern syntax.
fn split_components(body: &str) -> Vec<&str> {
    body.split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect()
}

fn component_error(input: &str, component: &str) -> ColorParseError {
    ColorParseError::Component {
        input: input.to_string(),
        component: component.to_string(),
    }
}

fn parse_number(input: &str, component: &str) -> Result<f64, ColorParseError> {
    component
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| component_error(input, component))
}

fn parse_hue(input: &str, component: &str) -> Result<f64, ColorParseError> {
    parse_number(input, component.strip_suffix("deg").unwrap_or(component))
}

fn parse_percent(input: &str, component: &str) -> Result<f64, ColorParseError> {
    let value = component
        .strip_suffix('%')
        .ok_or_else(|| component_error(input, component))?;
    Ok(parse_number(input, value)? / 100.0)
}

fn parse_alpha(input: &str, component: &str) -> Result<f64, ColorParseError> {
    match component.strip_suffix('%') {
        Some(value) => Ok(parse_number(input, value)? / 100.0),
        None => parse_number(input, component),
    }
}

fn parse_channel(input: &str, component: &str) -> Result<u8, ColorParseError> {
    let value = match component.strip_suffix('%') {
        Some(value) => parse_number(input, value)? * 255.0 / 100.0,
        None => parse_number(input, component)?,
    };
    Ok(value.round().clamp(0.0, 255.0) as u8)
}

fn parse_hex(input: &str, hex: &str) -> Result<Hsla, ColorParseError> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(component_error(input, hex));
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..=i], 16).map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
    let bad = |_| component_error(input, hex);

    let (r, g, b, a) = match hex.len() {
        3 | 4 => (
            nibble(0).map_err(bad)?,
            nibble(1).map_err(bad)?,
            nibble(2).map_err(bad)?,
            if hex.len() == 4 { nibble(3).map_err(bad)? } else { 255 },
        ),
        6 | 8 => (
            byte(0).map_err(bad)?,
            byte(2).map_err(bad)?,
            byte(4).map_err(bad)?,
            if hex.len() == 8 { byte(6).map_err(bad)? } else { 255 },
        ),
        _ => return Err(ColorParseError::Unsupported(input.to_string())),
    };

    Ok(Hsla::from_rgba(r, g, b, f64::from(a) / 255.0))
}

/// Palette and fade factors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ColorConfig {
    /// Category colors, indexed by sibling position modulo length.
    pub palette: Vec<Hsla>,
    /// Alpha multiplier from a category to its groups.
    pub group_alpha: f64,
    /// Alpha multiplier from a group to its items.
    pub item_alpha: f64,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            palette: default_palette(),
            group_alpha: 0.7,
            item_alpha: 0.5,
        }
    }
}

/// Eight evenly spaced hues at matching saturation and lightness.
pub fn default_palette() -> Vec<Hsla> {
    (0..8)
        .map(|i| Hsla::new(f64::from(i) * 45.0 + 200.0, 0.65, 0.55, 1.0))
        .collect()
}

impl ColorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        for (name, value) in [("groupAlpha", self.group_alpha), ("itemAlpha", self.item_alpha)] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::AlphaFactor { name, value });
            }
        }
        Ok(())
    }

    /// Palette entry for the category at `position`.
    pub fn palette_color(&self, position: usize) -> Hsla {
        self.palette
            .get(position % self.palette.len().max(1))
            .copied()
            .unwrap_or_else(|| Hsla::new(0.0, 0.0, 0.5, 1.0))
    }

    /// Base color of a category.
    ///
    /// An explicit color wins when it parses; otherwise the palette entry for
    /// the category's position is used and the problem is logged.
    pub fn base_color(&self, position: usize, explicit: Option<&str>) -> Hsla {
        match explicit.map(str::parse::<Hsla>) {
            Some(Ok(color)) => color,
            Some(Err(err)) => {
                log::warn!(
                    "event=color_fallback position={} reason=\"{}\"",
                    position,
                    err
                );
                self.palette_color(position)
            }
            None => self.palette_color(position),
        }
    }

    /// Color of a slice on `level` whose category has `base`.
    pub fn color_for(&self, level: Level, base: Hsla) -> Hsla {
        match level {
            Level::Category => base,
            Level::Group => base.fade(self.group_alpha),
            Level::Item => base.fade(self.group_alpha).fade(self.item_alpha),
        }
    }
}
