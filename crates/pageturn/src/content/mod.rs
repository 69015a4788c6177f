//! Page content: the capability the engine asks for page counts and page drawing.
//!
//! Content draws once per page in page-local coordinates (origin at the page's
//! top-left, extent `page_size`). The engine decides where that lands on screen:
//! the stationary spread, the page revealed under a fold, or the mirrored back
//! of the turning page.
//!
//! Implementations
//! - `GridPages`: numbered grid pages for demos and tests.
//! - `TextPages`: plain text paginated by page size.
//! - `ElementPages`: one interactive element per page.

mod elements;
mod grid;
mod text;

pub use elements::ElementPages;
pub use grid::GridPages;
pub use text::{TextMetrics, TextPages};

use crate::draw::{Brush, Color, DrawTarget};
use crate::geom::{Point, Rect, Size};

pub trait BookContent {
    /// Number of pages at the given page size (may repaginate).
    fn page_count(&mut self, page_size: Size) -> usize;

    /// Draw page `index`. The engine only calls this for `index < page_count`.
    fn render_page(&mut self, index: usize, page_size: Size, canvas: &mut PageCanvas<'_>);
}

impl<C: BookContent + ?Sized> BookContent for Box<C> {
    fn page_count(&mut self, page_size: Size) -> usize {
        (**self).page_count(page_size)
    }
    fn render_page(&mut self, index: usize, page_size: Size, canvas: &mut PageCanvas<'_>) {
        (**self).render_page(index, page_size, canvas)
    }
}

/// Drawing sink handed to content for one page.
///
/// Exposes primitives and element registration only; the engine's transform
/// and clip layers stay out of reach.
pub struct PageCanvas<'a> {
    target: &'a mut dyn DrawTarget,
    size: Size,
}

impl<'a> PageCanvas<'a> {
    pub fn new(target: &'a mut dyn DrawTarget, size: Size) -> Self {
        Self { target, size }
    }
    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }
    pub fn fill_rect(&mut self, rect: Rect, brush: &Brush) {
        self.target.fill_rect(rect, brush);
    }
    pub fn fill_polygon(&mut self, points: &[Point], brush: &Brush) {
        self.target.fill_polygon(points, brush);
    }
    pub fn stroke_line(&mut self, from: Point, to: Point, width: f64, color: Color) {
        self.target.stroke_line(from, to, width, color);
    }
    pub fn draw_text(&mut self, origin: Point, text: &str, font_size: f64, color: Color) {
        self.target.draw_text(origin, text, font_size, color);
    }
    /// Element covering the whole page; it moves with the page's transform.
    pub fn register_element(&mut self, id: &str) {
        self.target.register_element(id, self.size);
    }
}
