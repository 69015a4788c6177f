//! Page placement: the fixed spread layout and the mirrored turning-page map.

use crate::config::Padding;
use crate::fold::{FoldLine, TurnMode};
use crate::geom::{mirror, Affine2, Point, Size, Vector};

/// Where the two stationary pages sit inside the book.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpreadLayout {
    /// Content size of a single page.
    pub page_size: Size,
    /// Page-local → screen for the left page.
    pub left: Affine2,
    /// Page-local → screen for the right page.
    pub right: Affine2,
}

impl SpreadLayout {
    pub fn new(book: Size, padding: Padding, spine_gap: f64) -> Self {
        let page_size = Size::new(
            book.width / 2.0 - spine_gap - padding.left - padding.right,
            book.height - padding.top - padding.bottom,
        );
        Self {
            page_size,
            left: Affine2::translation(Vector::new(padding.left, padding.top)),
            right: Affine2::translation(Vector::new(
                book.width / 2.0 + spine_gap + padding.left,
                padding.top,
            )),
        }
    }
}

/// Page-local → screen map for the back of the turning page.
///
/// The back is first laid out unflipped (horizontally mirrored relative to the
/// page it sits behind), then origin and basis endpoints are reflected through
/// the fold. When the fold reaches the spine the result coincides with the
/// opposite page's placement.
///
/// Panics for `TurnMode::None`: a fold without a turn direction is a logic error.
pub fn turn_transform(book: Size, padding: Padding, spine_gap: f64, fold: &FoldLine) -> Affine2 {
    let origin = match fold.mode {
        TurnMode::Next => Point::new(book.width - padding.left, padding.top),
        TurnMode::Prev => Point::new(book.width / 2.0 - spine_gap - padding.left, padding.top),
        TurnMode::None => panic!("turn transform requested without a turning page"),
    };
    let i_hat = Vector::new(-1.0, 0.0);
    let j_hat = Vector::new(0.0, 1.0);

    let line = &fold.line;
    let o = mirror(line, origin);
    let i = mirror(line, origin + i_hat) - o;
    let j = mirror(line, origin + j_hat) - o;
    Affine2::from_basis(o, i, j)
}
