//! Split-line solver: where the turning page folds for the current drag.
//!
//! The fold is the perpendicular bisector between the fixed edge the page
//! pivots from (the anchor) and the live drag point, clamped so it never
//! crosses the spine into the other page half.
//!
//! Orientation
//! - `Next` lines point up the screen, `Prev` lines point down. In both modes
//!   the part of the turning half that the page has lifted off lies on
//!   `Side::Right` of the line, which is what `fold_regions` clips to.

use serde::{Deserialize, Serialize};

use crate::clip::clip_polygon;
use crate::geom::{intersect, is_finite_point, mirror, Line, Point, Rect, Segment, Side, Size, Vector};

/// Squared drag length below which the bisector direction is unreliable.
pub const DEGENERATE_DRAG_LEN_SQ: f64 = 0.5;

/// Direction of the page turn implied by a drag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnMode {
    #[default]
    None,
    /// Left page lifted toward the right: back one spread.
    Prev,
    /// Right page lifted toward the left: forward one spread.
    Next,
}

impl TurnMode {
    /// `Prev` for a press left of the spine moving right, `Next` for a press
    /// right of the spine moving left, otherwise `None`.
    pub fn detect(book_width: f64, drag_start: Point, drag_current: Point) -> TurnMode {
        let center = book_width / 2.0;
        if drag_start.x < center && drag_current.x > drag_start.x {
            TurnMode::Prev
        } else if drag_start.x > center && drag_current.x < drag_start.x {
            TurnMode::Next
        } else {
            TurnMode::None
        }
    }

    /// Fixed outer-edge point the page pivots from, at the press height.
    pub fn anchor(self, book_width: f64, y: f64) -> Option<Point> {
        match self {
            TurnMode::Prev => Some(Point::new(0.0, y)),
            TurnMode::Next => Some(Point::new(book_width - 1.0, y)),
            TurnMode::None => None,
        }
    }

    /// Page half the turning page starts on.
    pub fn turning_half(self, book: Size) -> Option<Rect> {
        let half = book.width / 2.0;
        match self {
            TurnMode::Prev => Some(Rect::new(0.0, 0.0, half, book.height)),
            TurnMode::Next => Some(Rect::new(half, 0.0, half, book.height)),
            TurnMode::None => None,
        }
    }
}

/// Last non-degenerate fold direction, reused while the drag sits on the anchor.
#[derive(Clone, Copy, Debug, Default)]
pub struct FoldLineCache {
    direction: Option<Vector>,
}

impl FoldLineCache {
    #[inline]
    pub fn direction(&self) -> Option<Vector> {
        self.direction
    }
    #[inline]
    pub fn clear(&mut self) {
        self.direction = None;
    }
}

/// Solved fold for one frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FoldLine {
    pub mode: TurnMode,
    pub line: Line,
}

/// Compute the fold line for a drag, or `None` when no page is turning.
///
/// Near-zero drags reuse the cached direction; other frames refresh it.
pub fn solve_split_line(
    book: Size,
    drag_start: Point,
    drag_current: Point,
    cache: &mut FoldLineCache,
) -> Option<FoldLine> {
    let mode = TurnMode::detect(book.width, drag_start, drag_current);
    let anchor = mode.anchor(book.width, drag_start.y)?;

    let seg = Segment::new(anchor, drag_current);
    let degenerate = seg.length_squared() < DEGENERATE_DRAG_LEN_SQ;
    let mut bisector = seg.perpendicular_bisector();
    if let (true, Some(d)) = (degenerate, cache.direction) {
        bisector.direction = d;
    }
    if bisector.direction.norm_squared() == 0.0 {
        return None;
    }

    let line = clamp_to_spine(book, mode, &bisector)?;
    // Only directions from a drag long enough to trust are cached.
    if !degenerate {
        cache.direction = Some(line.direction);
    }
    Some(FoldLine { mode, line })
}

/// Rebuild `line` through its top/bottom edge hits, each clamped to the turning half.
fn clamp_to_spine(book: Size, mode: TurnMode, line: &Line) -> Option<Line> {
    let center = book.width / 2.0;
    let top = intersect(line, &Line::horizontal(0.0));
    let bottom = intersect(line, &Line::horizontal(book.height));
    if !is_finite_point(&top) || !is_finite_point(&bottom) {
        return None;
    }
    match mode {
        TurnMode::Next => {
            let top = Point::new(top.x.max(center), top.y);
            let bottom = Point::new(bottom.x.max(center), bottom.y);
            Some(Line::through(bottom, top))
        }
        TurnMode::Prev => {
            let top = Point::new(top.x.min(center), top.y);
            let bottom = Point::new(bottom.x.min(center), bottom.y);
            Some(Line::through(top, bottom))
        }
        TurnMode::None => None,
    }
}

/// Screen regions of a fold.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FoldRegions {
    /// Part of the turning half the page has lifted off; shows the page underneath.
    pub revealed: Vec<Point>,
    /// `revealed` mirrored across the fold; shows the back of the turning page.
    pub curled: Vec<Point>,
}

impl FoldRegions {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.revealed.len() < 3
    }
}

pub fn fold_regions(book: Size, fold: &FoldLine) -> FoldRegions {
    let Some(half) = fold.mode.turning_half(book) else {
        return FoldRegions::default();
    };
    let revealed = clip_polygon(&half.corners(), &fold.line, Side::Right);
    let curled = revealed.iter().map(|p| mirror(&fold.line, *p)).collect();
    FoldRegions { revealed, curled }
}
