//! The simulated book: pointer handling, per-frame settle ticks, and drawing.
//!
//! Frame order
//! 1. Close a finished settle window (may commit the page turn).
//! 2. Background, then the two stationary pages.
//! 3. Spine shadow.
//! 4. While a page turns: the revealed region with the page underneath, the
//!    curled region with the mirrored back of the turning page, and the fold
//!    shadow clipped to both regions.
//!
//! Page requests outside `0..page_count` are skipped, never forwarded to the
//! content. The host serialises pointer events and `render` onto one thread.

use std::time::Duration;

use crate::config::{BookConfig, ConfigError};
use crate::content::{BookContent, PageCanvas};
use crate::draw::{Brush, DrawTarget};
use crate::drag::{DragState, Phase, Release, SpreadContext};
use crate::fold::{fold_regions, solve_split_line, FoldLine, FoldLineCache, TurnMode};
use crate::geom::{Affine2, Point, Rect, Size};
use crate::shadow::{fold_shadow, spine_shadow};
use crate::transform::turn_transform;

pub struct SimulatedBook<C> {
    content: C,
    config: BookConfig,
    /// Left page of the visible spread; always even.
    current_page: usize,
    drag: DragState,
    fold_cache: FoldLineCache,
    last_now: Duration,
}

impl<C: BookContent> SimulatedBook<C> {
    pub fn new(content: C, config: BookConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            content,
            config,
            current_page: 0,
            drag: DragState::default(),
            fold_cache: FoldLineCache::default(),
            last_now: Duration::ZERO,
        })
    }

    #[inline]
    pub fn config(&self) -> &BookConfig {
        &self.config
    }

    /// Replace the configuration; takes effect on the next frame.
    pub fn set_config(&mut self, config: BookConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    #[inline]
    pub fn content(&self) -> &C {
        &self.content
    }
    #[inline]
    pub fn content_mut(&mut self) -> &mut C {
        &mut self.content
    }

    #[inline]
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Jump to the spread containing `page` (aligned down to even).
    pub fn set_current_page(&mut self, page: usize) {
        self.current_page = page - page % 2;
    }

    #[inline]
    pub fn page_size(&self) -> Size {
        self.config.layout().page_size
    }

    pub fn page_count(&mut self) -> usize {
        let size = self.page_size();
        self.content.page_count(size)
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.drag.phase()
    }

    /// Returns whether the press started a drag.
    pub fn on_pointer_down(&mut self, p: Point, now: Duration) -> bool {
        self.last_now = now;
        if !self.drag.press(p, self.config.size.width) {
            return false;
        }
        self.fold_cache.clear();
        tracing::debug!(x = p.x, y = p.y, page = self.current_page, "page drag started");
        true
    }

    /// Returns whether a redraw is due.
    pub fn on_pointer_move(&mut self, p: Point, now: Duration) -> bool {
        self.last_now = now;
        self.drag.move_to(p, now)
    }

    /// Returns whether a redraw is due.
    pub fn on_pointer_up(&mut self, p: Point, now: Duration) -> bool {
        self.last_now = now;
        let spread = SpreadContext {
            book_width: self.config.size.width,
            current_page: self.current_page,
            page_count: self.page_count(),
        };
        match self.drag.release(p, now, &self.config.animation, spread) {
            Release::Ignored => false,
            Release::Cancelled => {
                tracing::debug!("page drag cancelled without movement");
                true
            }
            Release::Settling { target_page } => {
                tracing::debug!(
                    x = p.x,
                    y = p.y,
                    commit = target_page.is_some(),
                    target_page = ?target_page,
                    "page drag released"
                );
                true
            }
        }
    }

    /// Close a finished settle window; returns the newly committed page, if any.
    pub fn advance(&mut self, now: Duration) -> Option<usize> {
        self.last_now = now;
        let committed = self.drag.tick(now, &self.config.animation)?;
        self.fold_cache.clear();
        match committed {
            Some(page) => {
                tracing::debug!(from = self.current_page, to = page, "page turn committed");
                self.current_page = page;
            }
            None => tracing::debug!(page = self.current_page, "page turn reverted"),
        }
        committed
    }

    /// Turn direction implied by the displayed drag at `now`.
    pub fn turn_mode(&self, now: Duration) -> TurnMode {
        match self.drag.sample(now, &self.config.animation) {
            Some(s) => TurnMode::detect(self.config.size.width, s.start, s.current),
            None => TurnMode::None,
        }
    }

    /// Fold line for the displayed drag at `now`, if a page is turning.
    pub fn fold(&mut self, now: Duration) -> Option<FoldLine> {
        let sample = self.drag.sample(now, &self.config.animation)?;
        solve_split_line(
            self.config.size,
            sample.start,
            sample.current,
            &mut self.fold_cache,
        )
    }

    /// An easing window is open and the host should keep rendering frames.
    pub fn needs_continuous_redraw(&self) -> bool {
        self.drag.needs_ticks(self.last_now, &self.config.animation)
    }

    /// Draw one frame; returns `needs_continuous_redraw()`.
    pub fn render(&mut self, target: &mut dyn DrawTarget, now: Duration) -> bool {
        self.advance(now);

        let cfg = self.config;
        let layout = cfg.layout();
        let page_size = layout.page_size;
        let page_count = self.content.page_count(page_size);
        let page = self.current_page;
        let background = Brush::from(cfg.background);

        target.fill_rect(Rect::from_size(cfg.size), &background);
        let mut pages = PagePainter {
            content: &mut self.content,
            page_size,
            page_count,
        };
        pages.draw(target, Some(page), &layout.left);
        pages.draw(target, page.checked_add(1), &layout.right);

        let spine = spine_shadow(cfg.size, cfg.spine_gap, cfg.shadow_opacity);
        target.fill_polygon(&spine.quad, &spine.gradient.into());

        let Some(fold) = self.fold(now) else {
            return self.needs_continuous_redraw();
        };
        let regions = fold_regions(cfg.size, &fold);
        if regions.is_empty() {
            return self.needs_continuous_redraw();
        }
        let (under, back, under_placement) = match fold.mode {
            TurnMode::Next => (page.checked_add(3), page.checked_add(2), layout.right),
            TurnMode::Prev => (page.checked_sub(2), page.checked_sub(1), layout.left),
            TurnMode::None => unreachable!("solved folds always carry a turn direction"),
        };
        let mut pages = PagePainter {
            content: &mut self.content,
            page_size,
            page_count,
        };

        target.push_clip(&[regions.revealed.as_slice()]);
        target.fill_polygon(&regions.revealed, &background);
        pages.draw(target, under, &under_placement);
        target.pop();

        target.push_clip(&[regions.curled.as_slice()]);
        target.fill_polygon(&regions.curled, &background);
        let back_placement = turn_transform(cfg.size, cfg.padding, cfg.spine_gap, &fold);
        pages.draw(target, back, &back_placement);
        target.pop();

        if let Some(shadow) = fold_shadow(
            &fold.line,
            &Rect::from_size(cfg.size),
            cfg.fold_shadow_width,
            cfg.shadow_opacity,
        ) {
            target.push_clip(&[regions.revealed.as_slice(), regions.curled.as_slice()]);
            target.fill_polygon(&shadow.quad, &shadow.gradient.into());
            target.pop();
        }

        self.needs_continuous_redraw()
    }
}

/// Range-checked page drawing for one frame.
struct PagePainter<'a, C> {
    content: &'a mut C,
    page_size: Size,
    page_count: usize,
}

impl<C: BookContent> PagePainter<'_, C> {
    fn draw(&mut self, target: &mut dyn DrawTarget, index: Option<usize>, placement: &Affine2) {
        let Some(index) = index.filter(|i| *i < self.page_count) else {
            return;
        };
        target.push_transform(*placement);
        self.content
            .render_page(index, self.page_size, &mut PageCanvas::new(target, self.page_size));
        target.pop();
    }
}

#[cfg(test)]
mod tests;
