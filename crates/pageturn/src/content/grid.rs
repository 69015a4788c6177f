use crate::draw::Color;
use crate::geom::{Point, Rect, Size};

use super::{BookContent, PageCanvas, TextMetrics};

const GRID_STEP: f64 = 10.0;
const LABEL_SIZE: f64 = 32.0;

/// Fixed number of white pages with a light grid and a centered "Page N" label.
#[derive(Clone, Copy, Debug)]
pub struct GridPages {
    pub count: usize,
}

impl GridPages {
    pub fn new(count: usize) -> Self {
        Self { count }
    }
}

impl BookContent for GridPages {
    fn page_count(&mut self, _page_size: Size) -> usize {
        self.count
    }

    fn render_page(&mut self, index: usize, page_size: Size, canvas: &mut PageCanvas<'_>) {
        canvas.fill_rect(Rect::from_size(page_size), &Color::WHITE.into());

        let mut x = 0.0;
        while x <= page_size.width {
            canvas.stroke_line(
                Point::new(x, 0.0),
                Point::new(x, page_size.height),
                0.5,
                Color::LIGHT_GRAY,
            );
            x += GRID_STEP;
        }
        let mut y = 0.0;
        while y <= page_size.height {
            canvas.stroke_line(
                Point::new(0.0, y),
                Point::new(page_size.width, y),
                0.5,
                Color::LIGHT_GRAY,
            );
            y += GRID_STEP;
        }

        let label = format!("Page {}", index + 1);
        let metrics = TextMetrics::new(LABEL_SIZE);
        let origin = Point::new(
            (page_size.width - metrics.width(&label)) / 2.0,
            (page_size.height - metrics.line_height()) / 2.0,
        );
        canvas.draw_text(origin, &label, LABEL_SIZE, Color::BLACK);
    }
}
