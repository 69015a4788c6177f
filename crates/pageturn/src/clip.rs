//! Split a convex polygon (in practice a page-half rectangle) by a line.
//!
//! Single pass over the corners with wrap-around: whenever consecutive corners
//! fall on different sides, the crossing with that edge is emitted before the
//! current corner. Corners on the other side are dropped. Winding order of the
//! input is preserved and the output is implicitly closed.
//!
//! A rectangle cut by one line yields 3–5 vertices on each side. A line that
//! misses the rectangle leaves all four corners on one side and none on the
//! other; an empty polygon renders as nothing.

use crate::geom::{intersect, side_of, Line, Point, Rect, Side};

/// Vertices of `corners` that lie on `keep`'s side of `line`, plus the edge crossings.
pub fn clip_polygon(corners: &[Point], line: &Line, keep: Side) -> Vec<Point> {
    let mut out = Vec::with_capacity(corners.len() + 2);
    let Some(&first) = corners.first() else {
        return out;
    };
    let first_side = side_of(line, first);
    if first_side == keep {
        out.push(first);
    }
    let mut last_side = first_side;
    for pair in corners.windows(2) {
        let (prev, cur) = (pair[0], pair[1]);
        let cur_side = side_of(line, cur);
        if cur_side != last_side {
            out.push(intersect(line, &Line::through(prev, cur)));
        }
        if cur_side == keep {
            out.push(cur);
        }
        last_side = cur_side;
    }
    if last_side != first_side {
        let last = corners[corners.len() - 1];
        out.push(intersect(line, &Line::through(last, first)));
    }
    out
}

/// Both halves of `rect` split by `line`: `(left, right)`.
pub fn split_rect(rect: &Rect, line: &Line) -> (Vec<Point>, Vec<Point>) {
    let corners = rect.corners();
    (
        clip_polygon(&corners, line, Side::Left),
        clip_polygon(&corners, line, Side::Right),
    )
}

/// Shoelace area (absolute value).
pub fn polygon_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut twice = 0.0;
    for (i, p) in points.iter().enumerate() {
        let q = points[(i + 1) % points.len()];
        twice += p.x * q.y - q.x * p.y;
    }
    twice.abs() / 2.0
}
