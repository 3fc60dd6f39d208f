//! Annular sector ("donut slice") outlines.
//!
//! A sector is traced as:
//!
//! 1. move to the inner-start corner,
//! 2. line out to the outer-start corner,
//! 3. arc along the outer radius to the outer-end corner (positive sweep),
//! 4. line in to the inner-end corner,
//! 5. arc back along the inner radius to the inner-start corner (negative
//!    sweep),
//! 6. close.
//!
//! The inner arc must sweep in the opposite direction to the outer arc or
//! the outline self-intersects. Coordinates follow the SVG convention:
//! `x = cx + r*cos(θ)`, `y = cy + r*sin(θ)` with y growing downwards, so
//! increasing angles turn clockwise on screen and SVG `sweep-flag = 1`
//! matches the positive-angle direction.

use serde::Serialize;

/// Spans within this many degrees of a full turn are drawn as a ring.
const FULL_TURN_EPSILON: f64 = 1e-9;

/// A 2D point in scene coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `radius` and `angle` degrees from `self`.
    #[inline]
    pub fn polar(self, radius: f64, angle: f64) -> Self {
        let theta = angle.to_radians();
        Self {
            x: self.x + radius * theta.cos(),
            y: self.y + radius * theta.sin(),
        }
    }
}

/// One drawing command of a sector outline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    /// Circular arc to `to`. `sweep` is true for the positive-angle direction.
    ArcTo {
        radius: f64,
        large_arc: bool,
        sweep: bool,
        to: Point,
    },
    Close,
}

/// Closed outline of one annular sector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorPath {
    commands: Vec<PathCommand>,
    corners: [Point; 4],
}

impl SectorPath {
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Corners in drawing order: inner-start, outer-start, outer-end,
    /// inner-end.
    pub fn corners(&self) -> [Point; 4] {
        self.corners
    }

    /// Large-arc flags of every arc in the outline, in drawing order.
    pub fn arc_flags(&self) -> Vec<(bool, bool)> {
        self.commands
            .iter()
            .filter_map(|c| match *c {
                PathCommand::ArcTo {
                    large_arc, sweep, ..
                } => Some((large_arc, sweep)),
                _ => None,
            })
            .collect()
    }

    /// SVG path data (`d` attribute).
    pub fn to_svg(&self) -> String {
        self.commands
            .iter()
            .map(|command| match *command {
                PathCommand::MoveTo(p) => format!("M {} {}", num(p.x), num(p.y)),
                PathCommand::LineTo(p) => format!("L {} {}", num(p.x), num(p.y)),
                PathCommand::ArcTo {
                    radius,
                    large_arc,
                    sweep,
                    to,
                } => format!(
                    "A {r} {r} 0 {} {} {} {}",
                    u8::from(large_arc),
                    u8::from(sweep),
                    num(to.x),
                    num(to.y),
                    r = num(radius),
                ),
                PathCommand::Close => "Z".to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Round to 1/1000 and fold `-0` into `0` so output is stable.
fn num(v: f64) -> f64 {
    let r = (v * 1000.0).round() / 1000.0;
    if r == 0.0 { 0.0 } else { r }
}

/// Outline of a sector centered on the origin.
///
/// See [`build_path_at`].
pub fn build_path(
    start_angle: f64,
    end_angle: f64,
    inner_radius: f64,
    outer_radius: f64,
) -> Option<SectorPath> {
    build_path_at(Point::ORIGIN, start_angle, end_angle, inner_radius, outer_radius)
}

/// Outline of the sector between two angles (degrees) and two radii.
///
/// Returns `None` for input that has nothing to draw: a zero or negative
/// angular span, a span beyond one full turn, a non-positive radial
/// thickness, a negative inner radius or any NaN.
///
/// The large-arc flag is set when the span exceeds 180°. A span of a full
/// turn is drawn as a ring by splitting each arc at its midpoint, since a
/// single SVG arc with coincident endpoints draws nothing. An inner radius of
/// zero produces a pie wedge without an inner arc.
pub fn build_path_at(
    center: Point,
    start_angle: f64,
    end_angle: f64,
    inner_radius: f64,
    outer_radius: f64,
) -> Option<SectorPath> {
    let span = end_angle - start_angle;
    if !(span > 0.0 && span <= 360.0)
        || !(outer_radius > inner_radius)
        || !(inner_radius >= 0.0)
    {
        return None;
    }

    let large_arc = span > 180.0;
    let full_turn = span >= 360.0 - FULL_TURN_EPSILON;
    let mid_angle = start_angle + span / 2.0;

    let inner_start = center.polar(inner_radius, start_angle);
    let outer_start = center.polar(outer_radius, start_angle);
    let outer_end = center.polar(outer_radius, end_angle);
    let inner_end = center.polar(inner_radius, end_angle);

    let mut commands = Vec::with_capacity(8);
    commands.push(PathCommand::MoveTo(inner_start));
    commands.push(PathCommand::LineTo(outer_start));

    if full_turn {
        for to in [center.polar(outer_radius, mid_angle), outer_end] {
            commands.push(PathCommand::ArcTo {
                radius: outer_radius,
                large_arc: false,
                sweep: true,
                to,
            });
        }
    } else {
        commands.push(PathCommand::ArcTo {
            radius: outer_radius,
            large_arc,
            sweep: true,
            to: outer_end,
        });
    }

    commands.push(PathCommand::LineTo(inner_end));

    if inner_radius > 0.0 {
        if full_turn {
            for to in [center.polar(inner_radius, mid_angle), inner_start] {
                commands.push(PathCommand::ArcTo {
                    radius: inner_radius,
                    large_arc: false,
                    sweep: false,
                    to,
                });
            }
        } else {
            commands.push(PathCommand::ArcTo {
                radius: inner_radius,
                large_arc,
                sweep: false,
                to: inner_start,
            });
        }
    }

    commands.push(PathCommand::Close);

    Some(SectorPath {
        commands,
        corners: [inner_start, outer_start, outer_end, inner_end],
    })
}
