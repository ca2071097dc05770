//! World-space geometry: points and axis-aligned rectangles.
//!
//! The world uses a y-up coordinate system with the origin in the
//! bottom-left corner, so "stacking upward" means increasing `y`.

use serde::{Deserialize, Serialize};

/// A point in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, derive_new::new)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate, growing upward.
    pub y: f32,
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

/// Axis-aligned rectangle described by its centre and half extents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, derive_new::new)]
pub struct AaRect {
    /// Centre of the rectangle.
    pub center: Point,
    /// Half of the rectangle's width.
    pub half_width: f32,
    /// Half of the rectangle's height.
    pub half_height: f32,
}

impl AaRect {
    /// Returns true if `point` lies inside the rectangle or on its edge.
    pub fn contains(&self, point: Point) -> bool {
        (point.x - self.center.x).abs() <= self.half_width
            && (point.y - self.center.y).abs() <= self.half_height
    }

    /// Returns true if the two rectangles share interior area.
    ///
    /// Rectangles that only touch along an edge do not overlap.
    pub fn overlaps(&self, other: &AaRect) -> bool {
        (self.center.x - other.center.x).abs() < self.half_width + other.half_width
            && (self.center.y - other.center.y).abs() < self.half_height + other.half_height
    }

    /// Horizontal distance between the two centres.
    pub fn horizontal_distance(&self, other: &AaRect) -> f32 {
        (self.center.x - other.center.x).abs()
    }

    /// Left edge.
    pub fn left(&self) -> f32 {
        self.center.x - self.half_width
    }

    /// Right edge.
    pub fn right(&self) -> f32 {
        self.center.x + self.half_width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f32 {
        self.center.y - self.half_height
    }

    /// Top edge.
    pub fn top(&self) -> f32 {
        self.center.y + self.half_height
    }
}
