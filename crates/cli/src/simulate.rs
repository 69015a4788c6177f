//! Scripted gestures against a book and the per-frame trace they produce.

use std::time::Duration;

use pageturn::clip::polygon_area;
use pageturn::content::BookContent;
use pageturn::drag::Phase;
use pageturn::fold::{fold_regions, TurnMode};
use pageturn::geom::Point;
use pageturn::{CommandRecorder, SimulatedBook};
use serde::Serialize;

/// Press at `from`, move in `moves` equal steps to `to`, release at `to`.
#[derive(Clone, Copy, Debug)]
pub struct Gesture {
    pub from: Point,
    pub to: Point,
    pub moves: usize,
}

#[derive(Clone, Debug, Serialize)]
pub struct FrameRecord {
    pub t_ms: f64,
    pub phase: Phase,
    pub mode: TurnMode,
    pub current_page: usize,
    pub revealed: Vec<Point>,
    pub curled: Vec<Point>,
    pub revealed_area: f64,
    pub commands: usize,
}

/// Frames rendered after release before giving up on the settle.
const MAX_SETTLE_FRAMES: usize = 100_000;

/// Play `gesture` at a fixed frame step and record every rendered frame until
/// the book is idle again.
pub fn run_gesture<C: BookContent>(
    book: &mut SimulatedBook<C>,
    gesture: Gesture,
    step: Duration,
) -> Vec<FrameRecord> {
    let mut now = Duration::ZERO;
    let mut frames = Vec::new();
    if !book.on_pointer_down(gesture.from, now) {
        tracing::warn!("book is busy; gesture ignored");
        return frames;
    }
    frames.push(record(book, now));

    let moves = gesture.moves.max(1);
    for k in 1..=moves {
        now += step;
        let f = k as f64 / moves as f64;
        let p = gesture.from + (gesture.to - gesture.from) * f;
        book.on_pointer_move(p, now);
        frames.push(record(book, now));
    }
    book.on_pointer_up(gesture.to, now);

    for _ in 0..MAX_SETTLE_FRAMES {
        if book.phase() == Phase::Idle {
            break;
        }
        now += step;
        frames.push(record(book, now));
    }
    frames
}

fn record<C: BookContent>(book: &mut SimulatedBook<C>, now: Duration) -> FrameRecord {
    let mut rec = CommandRecorder::new();
    book.render(&mut rec, now);
    let size = book.config().size;
    let fold = book.fold(now);
    let regions = fold.map(|f| fold_regions(size, &f)).unwrap_or_default();
    FrameRecord {
        t_ms: now.as_secs_f64() * 1000.0,
        phase: book.phase(),
        mode: fold.map(|f| f.mode).unwrap_or_default(),
        current_page: book.current_page(),
        revealed_area: polygon_area(&regions.revealed),
        revealed: regions.revealed,
        curled: regions.curled,
        commands: rec.commands().len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pageturn::content::GridPages;
    use pageturn::BookConfig;

    fn book(pages: usize) -> SimulatedBook<GridPages> {
        SimulatedBook::new(GridPages::new(pages), BookConfig::default()).unwrap()
    }

    #[test]
    fn forward_gesture_ends_on_next_spread() {
        let mut b = book(6);
        let g = Gesture {
            from: Point::new(790.0, 300.0),
            to: Point::new(20.0, 300.0),
            moves: 10,
        };
        let frames = run_gesture(&mut b, g, Duration::from_millis(16));
        let last = frames.last().unwrap();
        assert_eq!(last.phase, Phase::Idle);
        assert_eq!(last.current_page, 2);
        assert_eq!(last.mode, TurnMode::None);
        assert!(frames.iter().any(|f| f.mode == TurnMode::Next && f.revealed_area > 0.0));
        assert!(frames.windows(2).all(|w| w[0].t_ms < w[1].t_ms));
    }

    #[test]
    fn short_gesture_reverts() {
        let mut b = book(6);
        let g = Gesture {
            from: Point::new(790.0, 300.0),
            to: Point::new(600.0, 300.0),
            moves: 3,
        };
        let frames = run_gesture(&mut b, g, Duration::from_millis(16));
        assert!(frames.iter().all(|f| f.current_page == 0));
        assert_eq!(frames.last().unwrap().phase, Phase::Idle);
    }

    #[test]
    fn trace_serializes() {
        let mut b = book(4);
        let g = Gesture {
            from: Point::new(10.0, 100.0),
            to: Point::new(200.0, 100.0),
            moves: 2,
        };
        let frames = run_gesture(&mut b, g, Duration::from_millis(20));
        let v = serde_json::to_value(&frames).unwrap();
        assert_eq!(v[0]["phase"], "Dragging");
        // The first move only opens the start window; the fold shows a frame later.
        assert_eq!(v[1]["mode"], "None");
        assert_eq!(v[2]["mode"], "Prev");
    }
}
