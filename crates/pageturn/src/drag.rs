//! Drag and settle state machine, polled once per frame.
//!
//! Phases
//! - `Idle` → `Dragging` on press (the press is snapped to the nearest outer edge).
//! - `Dragging`: the displayed point eases from the press toward the live
//!   pointer during the start window, then follows it directly.
//! - On release the turn either commits (`SettlingForward`, target spread
//!   recorded) or reverts (`SettlingBack`). The displayed point then eases from
//!   where it was toward the fully-turned point or back to the press: cubic
//!   ease-out on x, quadratic on y.
//! - `Settling*` → `Idle` on the first tick at or past the end window; the
//!   pending page is handed back to the caller exactly once.
//!
//! Nothing here subscribes to a clock. `needs_ticks` tells the host whether to
//! keep calling in while an easing window is open.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::AnimationCfg;
use crate::geom::Point;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Idle,
    Dragging,
    SettlingBack,
    SettlingForward,
}

impl Phase {
    #[inline]
    pub fn is_settling(self) -> bool {
        matches!(self, Phase::SettlingBack | Phase::SettlingForward)
    }
}

#[inline]
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

#[inline]
pub fn ease_out_quad(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(2)
}

/// Elapsed fraction of a window; a zero-length window is always complete.
fn window_fraction(now: Duration, opened: Duration, len: Duration) -> f64 {
    if len.is_zero() {
        return 1.0;
    }
    now.saturating_sub(opened).as_secs_f64() / len.as_secs_f64()
}

/// What the release needs to know about the book.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpreadContext {
    pub book_width: f64,
    pub current_page: usize,
    pub page_count: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Release {
    /// Not dragging; nothing changed.
    Ignored,
    /// Released without moving; back to idle at once.
    Cancelled,
    Settling { target_page: Option<usize> },
}

/// Drag anchor and current point for one frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DragSample {
    pub start: Point,
    pub current: Point,
}

#[derive(Clone, Debug)]
pub struct DragState {
    phase: Phase,
    drag_start: Point,
    /// Last live pointer position.
    pointer: Point,
    /// First move after the press; opens the start window.
    drag_start_time: Option<Duration>,
    /// Displayed point at release; the settle eases away from here.
    release_from: Point,
    drag_end_time: Duration,
    drag_end_target: Point,
    pending_target_page: Option<usize>,
}

impl Default for DragState {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            drag_start: Point::origin(),
            pointer: Point::origin(),
            drag_start_time: None,
            release_from: Point::origin(),
            drag_end_time: Duration::ZERO,
            drag_end_target: Point::origin(),
            pending_target_page: None,
        }
    }
}

impl DragState {
    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }
    #[inline]
    pub fn drag_start(&self) -> Point {
        self.drag_start
    }
    #[inline]
    pub fn pending_target_page(&self) -> Option<usize> {
        self.pending_target_page
    }

    /// Begin a drag. Ignored unless idle.
    pub fn press(&mut self, p: Point, book_width: f64) -> bool {
        if self.phase != Phase::Idle {
            return false;
        }
        let center = book_width / 2.0;
        let x = if p.x < center {
            0.0
        } else if p.x > center {
            book_width - 1.0
        } else {
            p.x
        };
        *self = DragState {
            phase: Phase::Dragging,
            drag_start: Point::new(x, p.y),
            pointer: Point::new(x, p.y),
            ..DragState::default()
        };
        tracing::trace!(x, y = p.y, "drag pressed");
        true
    }

    /// Track the live pointer. The first move opens the start window.
    pub fn move_to(&mut self, p: Point, now: Duration) -> bool {
        if self.phase != Phase::Dragging {
            return false;
        }
        self.pointer = p;
        if self.drag_start_time.is_none() {
            self.drag_start_time = Some(now);
        }
        true
    }

    /// Decide commit or revert and open the settle window.
    ///
    /// Commits when the release crossed the spine away from the press side and
    /// the spread two pages over exists.
    pub fn release(
        &mut self,
        p: Point,
        now: Duration,
        anim: &AnimationCfg,
        spread: SpreadContext,
    ) -> Release {
        if self.phase != Phase::Dragging {
            return Release::Ignored;
        }
        if self.drag_start_time.is_none() {
            *self = DragState::default();
            return Release::Cancelled;
        }
        self.release_from = self.position(now, anim);
        self.pointer = p;

        let center = spread.book_width / 2.0;
        let start = self.drag_start;
        let forward = start.x > center
            && p.x < center
            && spread.current_page + 2 < spread.page_count;
        let backward = start.x < center && p.x > center && spread.current_page >= 2;

        if forward || backward {
            self.phase = Phase::SettlingForward;
            // The press point mirrored across the spine: fold lands on the spine.
            self.drag_end_target = Point::new(spread.book_width - start.x, start.y);
            self.pending_target_page = Some(if forward {
                spread.current_page + 2
            } else {
                spread.current_page - 2
            });
        } else {
            self.phase = Phase::SettlingBack;
            self.drag_end_target = start;
            self.pending_target_page = None;
        }
        self.drag_end_time = now;
        Release::Settling {
            target_page: self.pending_target_page,
        }
    }

    /// Close the settle window once it has elapsed.
    ///
    /// Returns `Some(target)` when settling finished, where `target` is the
    /// committed page (if the turn went through). The state is idle afterwards.
    pub fn tick(&mut self, now: Duration, anim: &AnimationCfg) -> Option<Option<usize>> {
        if !self.phase.is_settling() {
            return None;
        }
        if window_fraction(now, self.drag_end_time, anim.end()) < 1.0 {
            return None;
        }
        let committed = self.pending_target_page.take();
        *self = DragState::default();
        Some(committed)
    }

    /// Whether another frame is needed to advance an open easing window.
    pub fn needs_ticks(&self, now: Duration, anim: &AnimationCfg) -> bool {
        match self.phase {
            Phase::Idle => false,
            Phase::Dragging => self
                .drag_start_time
                .is_some_and(|t0| window_fraction(now, t0, anim.start()) < 1.0),
            Phase::SettlingBack | Phase::SettlingForward => true,
        }
    }

    /// Displayed drag point at `now`. Pure: repeated calls agree.
    pub fn position(&self, now: Duration, anim: &AnimationCfg) -> Point {
        match self.phase {
            Phase::Idle => self.drag_start,
            Phase::Dragging => match self.drag_start_time {
                None => self.drag_start,
                Some(t0) => {
                    let k = ease_out_cubic(window_fraction(now, t0, anim.start()));
                    self.drag_start + (self.pointer - self.drag_start) * k
                }
            },
            Phase::SettlingBack | Phase::SettlingForward => {
                let f = window_fraction(now, self.drag_end_time, anim.end());
                let from = self.release_from;
                let to = self.drag_end_target;
                Point::new(
                    from.x + (to.x - from.x) * ease_out_cubic(f),
                    from.y + (to.y - from.y) * ease_out_quad(f),
                )
            }
        }
    }

    /// Anchor and displayed point, or `None` while idle.
    pub fn sample(&self, now: Duration, anim: &AnimationCfg) -> Option<DragSample> {
        if self.phase == Phase::Idle {
            return None;
        }
        Some(DragSample {
            start: self.drag_start,
            current: self.position(now, anim),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: f64 = 800.0;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn anim() -> AnimationCfg {
        AnimationCfg {
            start_ms: 100,
            end_ms: 200,
        }
    }

    fn spread(current_page: usize) -> SpreadContext {
        SpreadContext {
            book_width: W,
            current_page,
            page_count: 10,
        }
    }

    #[test]
    fn easing_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert_eq!(ease_out_quad(2.0), 1.0);
        assert!((ease_out_cubic(0.5) - 0.875).abs() < 1e-12);
        assert!((ease_out_quad(0.5) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn press_snaps_to_outer_edges() {
        let mut d = DragState::default();
        assert!(d.press(Point::new(620.0, 40.0), W));
        assert_eq!(d.drag_start(), Point::new(799.0, 40.0));
        // A second press while dragging is ignored.
        assert!(!d.press(Point::new(10.0, 40.0), W));
        assert_eq!(d.drag_start(), Point::new(799.0, 40.0));

        let mut d = DragState::default();
        d.press(Point::new(120.0, 40.0), W);
        assert_eq!(d.drag_start(), Point::new(0.0, 40.0));

        let mut d = DragState::default();
        d.press(Point::new(400.0, 40.0), W);
        assert_eq!(d.drag_start(), Point::new(400.0, 40.0));
    }

    #[test]
    fn start_window_eases_toward_pointer() {
        let a = anim();
        let mut d = DragState::default();
        d.press(Point::new(790.0, 300.0), W);
        assert_eq!(d.position(ms(0), &a), Point::new(799.0, 300.0));
        assert!(!d.needs_ticks(ms(0), &a));

        d.move_to(Point::new(399.0, 300.0), ms(1000));
        assert!(d.needs_ticks(ms(1000), &a));
        let half = d.position(ms(1050), &a);
        assert!((half.x - (799.0 - 400.0 * 0.875)).abs() < 1e-9);
        // Later moves do not restart the window.
        d.move_to(Point::new(299.0, 300.0), ms(1080));
        assert_eq!(d.position(ms(1100), &a), Point::new(299.0, 300.0));
        assert!(!d.needs_ticks(ms(1100), &a));
        // Sampling is pure.
        assert_eq!(d.position(ms(1050), &a), d.position(ms(1050), &a));
    }

    #[test]
    fn release_without_move_cancels() {
        let mut d = DragState::default();
        d.press(Point::new(700.0, 10.0), W);
        assert_eq!(d.release(Point::new(700.0, 10.0), ms(5), &anim(), spread(0)), Release::Cancelled);
        assert_eq!(d.phase(), Phase::Idle);
    }

    #[test]
    fn release_past_spine_commits_forward() {
        let a = anim();
        let mut d = DragState::default();
        d.press(Point::new(780.0, 300.0), W);
        d.move_to(Point::new(100.0, 280.0), ms(0));
        let r = d.release(Point::new(100.0, 280.0), ms(500), &a, spread(4));
        assert_eq!(r, Release::Settling { target_page: Some(6) });
        assert_eq!(d.phase(), Phase::SettlingForward);

        // Settle eases toward the mirrored press point.
        let mid = d.position(ms(600), &a);
        assert!((mid.x - (100.0 + (1.0 - 100.0) * 0.875)).abs() < 1e-9);
        assert!((mid.y - (280.0 + 20.0 * 0.75)).abs() < 1e-9);
        assert!(d.needs_ticks(ms(600), &a));
        assert_eq!(d.tick(ms(699), &a), None);

        assert_eq!(d.tick(ms(700), &a), Some(Some(6)));
        assert_eq!(d.phase(), Phase::Idle);
        assert!(!d.needs_ticks(ms(700), &a));
        assert_eq!(d.tick(ms(800), &a), None);
    }

    #[test]
    fn release_without_next_spread_reverts() {
        let mut d = DragState::default();
        d.press(Point::new(780.0, 300.0), W);
        d.move_to(Point::new(50.0, 300.0), ms(0));
        let r = d.release(Point::new(50.0, 300.0), ms(10), &anim(), spread(8));
        assert_eq!(r, Release::Settling { target_page: None });
        assert_eq!(d.phase(), Phase::SettlingBack);
        assert_eq!(d.position(ms(210), &anim()), d.drag_start());
        assert_eq!(d.tick(ms(210), &anim()), Some(None));
    }

    #[test]
    fn backward_turn_needs_a_previous_spread() {
        let mut d = DragState::default();
        d.press(Point::new(20.0, 300.0), W);
        d.move_to(Point::new(700.0, 300.0), ms(0));
        let r = d.release(Point::new(700.0, 300.0), ms(10), &anim(), spread(0));
        assert_eq!(r, Release::Settling { target_page: None });

        let mut d = DragState::default();
        d.press(Point::new(20.0, 300.0), W);
        d.move_to(Point::new(700.0, 300.0), ms(0));
        let r = d.release(Point::new(700.0, 300.0), ms(10), &anim(), spread(2));
        assert_eq!(r, Release::Settling { target_page: Some(0) });
        assert_eq!(d.position(ms(1000), &anim()), Point::new(800.0, 300.0));
    }

    #[test]
    fn settling_ignores_pointer_input() {
        let mut d = DragState::default();
        d.press(Point::new(780.0, 300.0), W);
        d.move_to(Point::new(600.0, 300.0), ms(0));
        d.release(Point::new(600.0, 300.0), ms(10), &anim(), spread(0));
        assert!(!d.press(Point::new(10.0, 10.0), W));
        assert!(!d.move_to(Point::new(10.0, 10.0), ms(20)));
        assert_eq!(d.release(Point::new(10.0, 10.0), ms(30), &anim(), spread(0)), Release::Ignored);
        assert_eq!(d.phase(), Phase::SettlingBack);
    }
}
