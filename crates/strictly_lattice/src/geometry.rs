//! Planar geometry of the lattice: point positions and stroke direction checks.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Horizontal distance between neighbouring points in a row.
pub const H_SPACING: f64 = 100.0;

/// Margin around the widest row and the first/last rows.
pub const PADDING: f64 = 50.0;

/// Maximum deviation, in degrees, from a lattice direction.
pub const ANGLE_TOLERANCE_DEG: f64 = 1.5;

/// Cross-product threshold below which three points count as collinear.
pub const COLLINEAR_EPSILON: f64 = 1e-6;

/// Lattice directions, as absolute angles in degrees.
const LATTICE_ANGLES: [f64; 4] = [0.0, 60.0, 120.0, 180.0];

/// Vertical distance between rows (height of an equilateral triangle).
pub fn v_spacing() -> f64 {
    H_SPACING * 3f64.sqrt() / 2.0
}

/// A position in board space. `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Vec2 {
    /// Creates a position.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Returns true if the direction from `from` to `to` lies within
/// [`ANGLE_TOLERANCE_DEG`] of 0°, 60°, 120° or 180°.
///
/// Identical positions have no direction and pass; they are rejected later
/// because they decompose into zero segments.
#[instrument]
pub fn is_aligned(from: Vec2, to: Vec2) -> bool {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    if dx == 0.0 && dy == 0.0 {
        return true;
    }
    let angle = dy.atan2(dx).to_degrees().abs();
    LATTICE_ANGLES
        .iter()
        .any(|target| (angle - target).abs() < ANGLE_TOLERANCE_DEG)
}

/// Returns true if `p` lies on the line through `a` and `b`.
pub(crate) fn is_collinear(a: Vec2, b: Vec2, p: Vec2) -> bool {
    let cross = (b.y - a.y) * (p.x - b.x) - (p.y - b.y) * (b.x - a.x);
    cross.abs() < COLLINEAR_EPSILON
}

/// Returns true if `p` lies in the bounding box of `a` and `b`, widened by one unit.
pub(crate) fn in_bounds(a: Vec2, b: Vec2, p: Vec2) -> bool {
    p.x >= a.x.min(b.x) - 1.0
        && p.x <= a.x.max(b.x) + 1.0
        && p.y >= a.y.min(b.y) - 1.0
        && p.y <= a.y.max(b.y) + 1.0
}

/// Orders positions along a segment: by `x`, then by `y` when `x` ties.
pub(crate) fn along_segment(a: &Vec2, b: &Vec2) -> std::cmp::Ordering {
    if (a.x - b.x).abs() > COLLINEAR_EPSILON {
        a.x.total_cmp(&b.x)
    } else {
        a.y.total_cmp(&b.y)
    }
}
