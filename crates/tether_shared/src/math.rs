//! Geometry shared by records and proxies.
//!
//! Positions are host pixels. Every distance in the crate goes through
//! [`Bounds::distance`], so unit-to-unit, unit-to-point and center-to-center
//! queries agree on the metric and only differ in the boxes they feed it.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Pixel position on the host map.
#[repr(C)]
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize,
)]
pub struct Position {
    /// X coordinate in pixels.
    pub x: i16,
    /// Y coordinate in pixels.
    pub y: i16,
}

impl Position {
    /// Creates a new position.
    #[inline]
    #[must_use]
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    /// Straight-line distance to another point, truncated to whole pixels.
    #[inline]
    #[must_use]
    pub fn distance(self, other: Self) -> u32 {
        Bounds::point(self).distance(&Bounds::point(other))
    }
}

/// Position on the coarse build grid.
#[repr(C)]
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize,
)]
pub struct TilePosition {
    /// Tile column.
    pub x: u16,
    /// Tile row.
    pub y: u16,
}

impl TilePosition {
    /// Creates a new tile position.
    #[inline]
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// Extents of a unit type's box, measured from its center.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitDimensions {
    /// Pixels from center to the left edge.
    pub left: u16,
    /// Pixels from center to the top edge.
    pub up: u16,
    /// Pixels from center to the right edge.
    pub right: u16,
    /// Pixels from center to the bottom edge.
    pub down: u16,
}

impl UnitDimensions {
    /// Creates dimensions from the four extents.
    #[inline]
    #[must_use]
    pub const fn new(left: u16, up: u16, right: u16, down: u16) -> Self {
        Self { left, up, right, down }
    }

    /// A square box `size` pixels wide, centered on the unit.
    #[inline]
    #[must_use]
    pub const fn square(size: u16) -> Self {
        let half = size / 2;
        Self::new(half, half, half, half)
    }

    /// Zero-sized box. Used for unknown types.
    pub const POINT: Self = Self::new(0, 0, 0, 0);
}

/// Axis-aligned box in pixel space. Edges are inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    /// Left edge.
    pub left: i32,
    /// Top edge.
    pub top: i32,
    /// Right edge.
    pub right: i32,
    /// Bottom edge.
    pub bottom: i32,
}

impl Bounds {
    /// Box around `center` with the given extents.
    #[inline]
    #[must_use]
    pub fn around(center: Position, dims: UnitDimensions) -> Self {
        let (x, y) = (i32::from(center.x), i32::from(center.y));
        Self {
            left: x - i32::from(dims.left),
            top: y - i32::from(dims.up),
            right: x + i32::from(dims.right),
            bottom: y + i32::from(dims.down),
        }
    }

    /// Degenerate box covering a single point.
    #[inline]
    #[must_use]
    pub fn point(at: Position) -> Self {
        Self::around(at, UnitDimensions::POINT)
    }

    /// Distance between the nearest edges of two boxes.
    ///
    /// Each axis contributes zero when the boxes overlap on it, otherwise the
    /// gap between the facing edges. The two gaps combine as a Euclidean norm
    /// truncated to whole pixels.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn distance(&self, other: &Self) -> u32 {
        let dx = f64::from(axis_gap(self.left, self.right, other.left, other.right));
        let dy = f64::from(axis_gap(self.top, self.bottom, other.top, other.bottom));
        (dx * dx + dy * dy).sqrt() as u32
    }
}

#[inline]
fn axis_gap(a_min: i32, a_max: i32, b_min: i32, b_max: i32) -> u32 {
    if b_min > a_max {
        b_min.abs_diff(a_max)
    } else if a_min > b_max {
        a_min.abs_diff(b_max)
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_distance_uses_edges() {
        let a = Bounds::around(Position::new(100, 100), UnitDimensions::square(32));
        let b = Bounds::around(Position::new(200, 100), UnitDimensions::square(32));
        assert_eq!(a.distance(&b), 68);
        assert_eq!(b.distance(&a), 68);
    }

    #[test]
    fn test_overlapping_boxes_touch() {
        let a = Bounds::around(Position::new(100, 100), UnitDimensions::square(32));
        let b = Bounds::around(Position::new(110, 90), UnitDimensions::square(32));
        assert_eq!(a.distance(&b), 0);
        assert_eq!(a.distance(&a), 0);
    }

    #[test]
    fn test_diagonal_gap_is_euclidean() {
        let a = Bounds::point(Position::new(0, 0));
        let b = Bounds::point(Position::new(30, 40));
        assert_eq!(a.distance(&b), 50);
        assert_eq!(Position::new(0, 0).distance(Position::new(30, 40)), 50);
    }

    #[test]
    fn test_position_bytemuck() {
        let p = Position::new(1, -2);
        let bytes: &[u8] = bytemuck::bytes_of(&p);
        assert_eq!(bytes.len(), 4);
    }
}
