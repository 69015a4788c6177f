//! Value types: points, vectors, sizes, rectangles, lines and segments.

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// Screen-space point (y grows downward).
pub type Point = Point2<f64>;
/// Screen-space displacement.
pub type Vector = Vector2<f64>;

/// Which side of a directed line a point lies on.
///
/// `Left` means a strictly negative cross product `direction × (p - origin)`;
/// everything else, including points on the line, is `Right`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[inline]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Axis-aligned rectangle given by its top-left corner and extent.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[inline]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
    #[inline]
    pub fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }
    #[inline]
    pub fn left(&self) -> f64 {
        self.x
    }
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }
    #[inline]
    pub fn top(&self) -> f64 {
        self.y
    }
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
    /// Corners in clockwise screen order: top-left, top-right, bottom-right, bottom-left.
    #[inline]
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.left(), self.top()),
            Point::new(self.right(), self.top()),
            Point::new(self.right(), self.bottom()),
            Point::new(self.left(), self.bottom()),
        ]
    }
}

/// Infinite line through `origin` along `direction` (not normalized).
///
/// Invariant: `direction` must be non-zero for intersection, side and mirror
/// queries; results are meaningless otherwise.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub origin: Point,
    pub direction: Vector,
}

impl Line {
    #[inline]
    pub fn new(origin: Point, direction: Vector) -> Self {
        Self { origin, direction }
    }
    /// Line through `a` and `b`, directed from `a` to `b`.
    #[inline]
    pub fn through(a: Point, b: Point) -> Self {
        Self::new(a, b - a)
    }
    #[inline]
    pub fn horizontal(y: f64) -> Self {
        Self::new(Point::new(0.0, y), Vector::new(1.0, 0.0))
    }
    #[inline]
    pub fn vertical(x: f64) -> Self {
        Self::new(Point::new(x, 0.0), Vector::new(0.0, 1.0))
    }
    /// Angle of the direction in degrees, as `atan2(dy, dx)`.
    #[inline]
    pub fn angle_degrees(&self) -> f64 {
        self.direction.y.atan2(self.direction.x).to_degrees()
    }
}

/// Closed segment `start → end`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    #[inline]
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }
    #[inline]
    pub fn length_squared(&self) -> f64 {
        (self.end - self.start).norm_squared()
    }
    #[inline]
    pub fn midpoint(&self) -> Point {
        nalgebra::center(&self.start, &self.end)
    }

    /// Perpendicular bisector; its direction is the segment direction rotated
    /// by +90° (`(-dy, dx)`), so it is zero for a zero-length segment.
    pub fn perpendicular_bisector(&self) -> Line {
        let d = self.end - self.start;
        Line::new(self.midpoint(), Vector::new(-d.y, d.x))
    }

    /// Quadrilateral of total width `thickness` centered on the segment.
    ///
    /// Order: start+offset, end+offset, end-offset, start-offset.
    pub fn expand(&self, thickness: f64) -> [Point; 4] {
        let d = self.end - self.start;
        let n = Vector::new(-d.y, d.x);
        let norm = n.norm();
        let offset = if norm > 0.0 {
            n * (thickness / 2.0 / norm)
        } else {
            Vector::zeros()
        };
        [
            self.start + offset,
            self.end + offset,
            self.end - offset,
            self.start - offset,
        ]
    }
}
