//! Shadow strips: the fixed spine shadow and the shadow running along the fold.

use serde::{Deserialize, Serialize};

use crate::draw::{Color, GradientStop, LinearGradient};
use crate::geom::{intersect, is_finite_point, Line, Point, Rect, Segment, Size};

/// Quadrilateral filled with a transparent → dark → transparent gradient.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShadowStrip {
    pub quad: [Point; 4],
    pub gradient: LinearGradient,
}

/// Gradient stops shared by every shadow.
pub fn shadow_stops(opacity: f64) -> Vec<GradientStop> {
    vec![
        GradientStop::new(0.0, Color::TRANSPARENT),
        GradientStop::new(0.5, Color::black_alpha(opacity)),
        GradientStop::new(1.0, Color::TRANSPARENT),
    ]
}

/// Vertical strip `2 × spine_gap` wide, centered on the spine.
pub fn spine_shadow(book: Size, spine_gap: f64, opacity: f64) -> ShadowStrip {
    let rect = Rect::new(book.width / 2.0 - spine_gap, 0.0, spine_gap * 2.0, book.height);
    ShadowStrip {
        quad: rect.corners(),
        gradient: LinearGradient {
            start: Point::new(rect.left(), 0.0),
            end: Point::new(rect.right(), 0.0),
            stops: shadow_stops(opacity),
            angle_degrees: 0.0,
        },
    }
}

/// The two points where `line` crosses the border of `rect`.
///
/// Edges are tested top, bottom, left, right; hits outside an edge's span are
/// dropped, and a hit through a corner counts once.
pub fn hit_rect(line: &Line, rect: &Rect) -> Option<(Point, Point)> {
    const SPAN_EPS: f64 = 1e-9;
    let edges = [
        (Line::horizontal(rect.top()), true),
        (Line::horizontal(rect.bottom()), true),
        (Line::vertical(rect.left()), false),
        (Line::vertical(rect.right()), false),
    ];
    let mut hits: Vec<Point> = Vec::with_capacity(4);
    for (edge, horizontal) in edges {
        let p = intersect(line, &edge);
        if !is_finite_point(&p) {
            continue;
        }
        let within = if horizontal {
            p.x >= rect.left() - SPAN_EPS && p.x <= rect.right() + SPAN_EPS
        } else {
            p.y >= rect.top() - SPAN_EPS && p.y <= rect.bottom() + SPAN_EPS
        };
        if within && hits.iter().all(|h| (h - p).norm() > SPAN_EPS) {
            hits.push(p);
        }
    }
    match hits.as_slice() {
        [a, b, ..] => Some((*a, *b)),
        _ => None,
    }
}

/// Strip `2 × width` wide along the part of `line` inside `book`.
///
/// The gradient runs across the strip, so the darkest band sits on the fold.
pub fn fold_shadow(line: &Line, book: &Rect, width: f64, opacity: f64) -> Option<ShadowStrip> {
    let (a, b) = hit_rect(line, book)?;
    let quad = Segment::new(a, b).expand(width * 2.0);
    Some(ShadowStrip {
        quad,
        gradient: LinearGradient {
            start: quad[1],
            end: quad[2],
            stops: shadow_stops(opacity),
            angle_degrees: line.angle_degrees(),
        },
    })
}
