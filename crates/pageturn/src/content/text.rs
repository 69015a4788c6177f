//! Plain-text pagination with fixed-advance font metrics.

use crate::draw::Color;
use crate::geom::{Point, Size};

use super::{BookContent, PageCanvas};

/// Approximate metrics for a monospaced face at `font_size`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextMetrics {
    pub font_size: f64,
}

impl TextMetrics {
    #[inline]
    pub fn new(font_size: f64) -> Self {
        Self { font_size }
    }
    #[inline]
    pub fn advance(&self) -> f64 {
        self.font_size * 0.6
    }
    #[inline]
    pub fn line_height(&self) -> f64 {
        self.font_size * 1.2
    }
    #[inline]
    pub fn width(&self, s: &str) -> f64 {
        s.chars().count() as f64 * self.advance()
    }
}

type Page = Vec<String>;

/// Text split into pages of word-wrapped lines; blank lines are kept.
///
/// Pagination is cached per page size and recomputed when the size changes.
#[derive(Clone, Debug)]
pub struct TextPages {
    text: String,
    metrics: TextMetrics,
    color: Color,
    cache: Option<(Size, Vec<Page>)>,
}

impl TextPages {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            metrics: TextMetrics::new(14.0),
            color: Color::BLACK,
            cache: None,
        }
    }

    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.metrics = TextMetrics::new(font_size);
        self.cache = None;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    fn pages(&mut self, page_size: Size) -> &[Page] {
        let stale = !matches!(&self.cache, Some((size, _)) if *size == page_size);
        if stale {
            let pages = paginate(&self.text, self.metrics, page_size);
            tracing::trace!(pages = pages.len(), width = page_size.width, "repaginated text");
            self.cache = Some((page_size, pages));
        }
        match &self.cache {
            Some((_, pages)) => pages.as_slice(),
            None => &[],
        }
    }
}

/// Greedy word wrap of paragraphs into pages of at most `height / line_height` lines.
///
/// Always returns at least one page. When not even one line fits, the whole
/// text becomes a single page.
pub fn paginate(text: &str, metrics: TextMetrics, page_size: Size) -> Vec<Page> {
    if text.is_empty() {
        return vec![vec![String::new()]];
    }
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let max_lines = (page_size.height / metrics.line_height()).floor();
    if max_lines.is_nan() || max_lines < 1.0 {
        return vec![normalized.split('\n').map(str::to_owned).collect()];
    }
    let max_lines = max_lines as usize;

    let mut pages: Vec<Page> = Vec::new();
    let mut current: Page = Vec::new();
    let push_line = |line: String, current: &mut Page, pages: &mut Vec<Page>| {
        if current.len() >= max_lines {
            pages.push(std::mem::take(current));
        }
        current.push(line);
    };

    for paragraph in normalized.split('\n') {
        if paragraph.is_empty() {
            push_line(String::new(), &mut current, &mut pages);
            continue;
        }
        for line in wrap(paragraph, metrics, page_size.width) {
            push_line(line, &mut current, &mut pages);
        }
    }
    if !current.is_empty() {
        pages.push(current);
    }
    if pages.is_empty() {
        pages.push(vec![String::new()]);
    }
    pages
}

fn wrap(paragraph: &str, metrics: TextMetrics, max_width: f64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in paragraph.split(' ') {
        let candidate_width = if line.is_empty() {
            metrics.width(word)
        } else {
            metrics.width(&line) + metrics.advance() + metrics.width(word)
        };
        if candidate_width > max_width && !line.is_empty() {
            lines.push(std::mem::take(&mut line));
            line.push_str(word);
        } else {
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    if lines.is_empty() {
        lines.push(paragraph.to_owned());
    }
    lines
}

impl BookContent for TextPages {
    fn page_count(&mut self, page_size: Size) -> usize {
        self.pages(page_size).len()
    }

    fn render_page(&mut self, index: usize, page_size: Size, canvas: &mut PageCanvas<'_>) {
        let metrics = self.metrics;
        let color = self.color;
        let Some(page) = self.pages(page_size).get(index) else {
            return;
        };
        for (row, line) in page.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let origin = Point::new(0.0, row as f64 * metrics.line_height());
            canvas.draw_text(origin, line, metrics.font_size, color);
        }
    }
}
