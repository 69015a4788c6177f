use super::types::{Line, Point, Side};

/// Cross-product magnitude below which two directions count as parallel.
pub const PARALLEL_EPS: f64 = 1e-10;

/// Intersection of two infinite lines.
///
/// Returns a NaN point when the directions are parallel within `PARALLEL_EPS`.
pub fn intersect(a: &Line, b: &Line) -> Point {
    let d1 = a.direction;
    let d2 = b.direction;
    let den = d1.x * d2.y - d1.y * d2.x;
    if den.abs() < PARALLEL_EPS {
        return Point::new(f64::NAN, f64::NAN);
    }
    let diff = b.origin - a.origin;
    let t = (diff.x * d2.y - diff.y * d2.x) / den;
    a.origin + d1 * t
}

/// Side of `p` relative to the directed line; on-line resolves to `Right`.
#[inline]
pub fn side_of(line: &Line, p: Point) -> Side {
    let to = p - line.origin;
    let cross = line.direction.x * to.y - line.direction.y * to.x;
    if cross < 0.0 {
        Side::Left
    } else {
        Side::Right
    }
}

/// Reflection of `p` across the line.
pub fn mirror(line: &Line, p: Point) -> Point {
    let d = line.direction.normalize();
    let to = p - line.origin;
    let along = d * to.dot(&d);
    let perp = to - along;
    line.origin + along - perp
}

#[inline]
pub fn is_finite_point(p: &Point) -> bool {
    p.x.is_finite() && p.y.is_finite()
}
