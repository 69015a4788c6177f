use super::*;
use crate::clip::polygon_area;
use crate::content::{ElementPages, GridPages};
use crate::draw::{CommandRecorder, DrawCommand};
use crate::fold::fold_regions;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn grid_book(pages: usize) -> SimulatedBook<GridPages> {
    SimulatedBook::new(GridPages::new(pages), BookConfig::default()).unwrap()
}

fn element_book(pages: usize) -> SimulatedBook<ElementPages> {
    let content: ElementPages = (0..pages).map(|i| format!("p{i}")).collect();
    SimulatedBook::new(content, BookConfig::default()).unwrap()
}

fn frame<C: BookContent>(book: &mut SimulatedBook<C>, now: Duration) -> (Vec<DrawCommand>, bool) {
    let mut rec = CommandRecorder::new();
    let more = book.render(&mut rec, now);
    assert_eq!(rec.depth(), 0, "unbalanced layers");
    (rec.into_commands(), more)
}

fn has_fold(commands: &[DrawCommand]) -> bool {
    commands
        .iter()
        .any(|c| matches!(c, DrawCommand::PushClip { .. }))
}

fn element_ids(book: &mut SimulatedBook<ElementPages>, now: Duration) -> Vec<(String, Affine2)> {
    let mut rec = CommandRecorder::new();
    book.render(&mut rec, now);
    rec.elements().map(|(id, t)| (id.to_owned(), *t)).collect()
}

fn revealed_area<C: BookContent>(book: &mut SimulatedBook<C>, now: Duration) -> f64 {
    let size = book.config().size;
    book.fold(now)
        .map(|f| polygon_area(&fold_regions(size, &f).revealed))
        .unwrap_or(0.0)
}

#[test]
fn rejects_invalid_config() {
    let mut cfg = BookConfig::default();
    cfg.shadow_opacity = -0.1;
    assert!(SimulatedBook::new(GridPages::new(2), cfg).is_err());

    let mut book = grid_book(2);
    cfg.shadow_opacity = 0.2;
    assert!(book.set_config(cfg).is_ok());
    cfg.size.width = f64::NAN;
    assert!(book.set_config(cfg).is_err());
    assert_eq!(book.config().shadow_opacity, 0.2);
}

#[test]
fn current_page_stays_even() {
    let mut book = grid_book(10);
    book.set_current_page(5);
    assert_eq!(book.current_page(), 4);
    book.set_current_page(6);
    assert_eq!(book.current_page(), 6);
}

#[test]
fn idle_frame_draws_spread_and_spine() {
    let mut book = grid_book(10);
    let (commands, more) = frame(&mut book, ms(0));
    assert!(!more);
    assert!(!has_fold(&commands));
    assert!(matches!(commands[0], DrawCommand::FillRect { .. }));
    let pushes = commands
        .iter()
        .filter(|c| matches!(c, DrawCommand::PushTransform { .. }))
        .count();
    assert_eq!(pushes, 2);
    let labels: Vec<&str> = commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(labels, vec!["Page 1", "Page 2"]);
}

#[test]
fn drag_past_spine_turns_forward_one_spread() {
    let mut book = grid_book(10);
    assert!(book.on_pointer_down(Point::new(790.0, 300.0), ms(0)));
    assert!(book.on_pointer_move(Point::new(400.0, 300.0), ms(10)));
    assert!(book.needs_continuous_redraw());
    assert!(book.on_pointer_move(Point::new(10.0, 300.0), ms(50)));
    assert!(book.on_pointer_up(Point::new(10.0, 300.0), ms(60)));
    assert_eq!(book.phase(), Phase::SettlingForward);

    let (commands, more) = frame(&mut book, ms(100));
    assert!(more);
    assert!(has_fold(&commands));
    assert_eq!(book.turn_mode(ms(100)), TurnMode::Next);
    assert_eq!(book.current_page(), 0);

    // Default settle window is 300 ms after release.
    let (commands, more) = frame(&mut book, ms(360));
    assert!(!more);
    assert!(!book.needs_continuous_redraw());
    assert!(!has_fold(&commands));
    assert_eq!(book.current_page(), 2);
    assert_eq!(book.phase(), Phase::Idle);

    // Nothing further happens on later frames.
    frame(&mut book, ms(1000));
    assert_eq!(book.current_page(), 2);
}

#[test]
fn short_drag_snaps_back_and_fold_shrinks() {
    let mut book = grid_book(10);
    book.on_pointer_down(Point::new(790.0, 300.0), ms(0));
    book.on_pointer_move(Point::new(600.0, 300.0), ms(0));
    book.on_pointer_up(Point::new(600.0, 300.0), ms(200));
    assert_eq!(book.phase(), Phase::SettlingBack);

    let early = revealed_area(&mut book, ms(250));
    let mid = revealed_area(&mut book, ms(350));
    let late = revealed_area(&mut book, ms(485));
    assert!(early > mid && mid > late && late > 0.0);

    let (commands, more) = frame(&mut book, ms(500));
    assert!(!more);
    assert!(!has_fold(&commands));
    assert_eq!(book.current_page(), 0);
}

#[test]
fn no_turn_past_last_spread() {
    let mut book = element_book(6);
    book.set_current_page(4);
    book.on_pointer_down(Point::new(790.0, 300.0), ms(0));
    book.on_pointer_move(Point::new(20.0, 300.0), ms(0));

    // Pages 6 and 7 do not exist: the fold draws only background there.
    let ids: Vec<String> = element_ids(&mut book, ms(200)).into_iter().map(|(id, _)| id).collect();
    assert_eq!(ids, vec!["p4", "p5"]);

    book.on_pointer_up(Point::new(20.0, 300.0), ms(200));
    assert_eq!(book.phase(), Phase::SettlingBack);
    frame(&mut book, ms(600));
    assert_eq!(book.current_page(), 4);
}

#[test]
fn backward_drag_on_first_spread_skips_missing_pages() {
    let mut book = element_book(6);
    book.on_pointer_down(Point::new(10.0, 300.0), ms(0));
    book.on_pointer_move(Point::new(300.0, 300.0), ms(0));
    let (commands, _) = frame(&mut book, ms(200));
    assert!(has_fold(&commands));
    assert_eq!(book.turn_mode(ms(200)), TurnMode::Prev);
    let ids: Vec<String> = element_ids(&mut book, ms(200)).into_iter().map(|(id, _)| id).collect();
    assert_eq!(ids, vec!["p0", "p1"]);
}

#[test]
fn turning_page_elements_follow_the_fold() {
    let mut book = element_book(6);
    book.on_pointer_down(Point::new(790.0, 300.0), ms(0));
    book.on_pointer_move(Point::new(300.0, 300.0), ms(0));
    let placed = element_ids(&mut book, ms(200));
    let ids: Vec<&str> = placed.iter().map(|(id, _)| id.as_str()).collect();
    // Base spread, page under the fold, back of the turning page.
    assert_eq!(ids, vec!["p0", "p1", "p3", "p2"]);

    let layout = book.config().layout();
    assert_eq!(placed[2].1, layout.right);

    // Vertical fold at x = 549.5: the back of page 2 starts at x = 299.
    let back = &placed[3].1;
    assert!(back.is_orientation_preserving());
    assert!((back.apply(Point::origin()) - Point::new(299.0, 0.0)).norm() < 1e-9);
    assert!((back.m - nalgebra::Matrix2::identity()).norm() < 1e-9);
}

#[test]
fn render_is_idempotent_for_a_fixed_time() {
    let mut book = grid_book(10);
    book.on_pointer_down(Point::new(790.0, 500.0), ms(0));
    book.on_pointer_move(Point::new(350.0, 200.0), ms(5));
    let (a, _) = frame(&mut book, ms(40));
    let (b, _) = frame(&mut book, ms(40));
    assert_eq!(a, b);

    book.on_pointer_up(Point::new(350.0, 200.0), ms(60));
    let (c, _) = frame(&mut book, ms(355));
    let (d, _) = frame(&mut book, ms(355));
    assert_eq!(c, d);
}

#[test]
fn short_first_drag_is_idempotent() {
    let mut book = grid_book(10);
    book.on_pointer_down(Point::new(700.0, 300.0), ms(0));
    // Barely off the snapped anchor at (799, 300): no trusted direction yet.
    book.on_pointer_move(Point::new(798.9, 299.4), ms(0));
    let first = book.fold(ms(1000));
    assert!(first.is_some());
    assert_eq!(book.fold(ms(1000)), first);

    let (a, _) = frame(&mut book, ms(1000));
    let (b, _) = frame(&mut book, ms(1000));
    assert_eq!(a, b);
}

#[test]
fn fold_shadow_is_clipped_to_both_regions() {
    let mut book = grid_book(10);
    book.on_pointer_down(Point::new(790.0, 300.0), ms(0));
    book.on_pointer_move(Point::new(300.0, 300.0), ms(0));
    let (commands, _) = frame(&mut book, ms(200));
    let regions = fold_regions(book.config().size, &book.fold(ms(200)).unwrap());

    let at = commands
        .iter()
        .rposition(|c| matches!(c, DrawCommand::PushClip { .. }))
        .unwrap();
    match &commands[at] {
        DrawCommand::PushClip { regions: clip } => {
            assert_eq!(clip, &vec![regions.revealed.clone(), regions.curled.clone()]);
        }
        other => panic!("unexpected {other:?}"),
    }
    assert!(matches!(commands[at + 1], DrawCommand::FillPolygon { .. }));
    assert_eq!(commands[at + 2], DrawCommand::Pop);
    assert_eq!(commands.len(), at + 3);
}

#[test]
fn second_press_during_drag_is_ignored() {
    let mut book = grid_book(10);
    assert!(book.on_pointer_down(Point::new(790.0, 300.0), ms(0)));
    assert!(!book.on_pointer_down(Point::new(10.0, 300.0), ms(1)));
    book.on_pointer_move(Point::new(500.0, 300.0), ms(2));
    assert_eq!(book.turn_mode(ms(500)), TurnMode::Next);
}

#[test]
fn click_without_move_changes_nothing() {
    let mut book = grid_book(10);
    book.on_pointer_down(Point::new(790.0, 300.0), ms(0));
    assert!(book.on_pointer_up(Point::new(790.0, 300.0), ms(10)));
    assert_eq!(book.phase(), Phase::Idle);
    let (commands, more) = frame(&mut book, ms(20));
    assert!(!more && !has_fold(&commands));
    assert!(!book.on_pointer_up(Point::new(790.0, 300.0), ms(30)));
}

#[test]
fn boxed_content_works() {
    let content: Box<dyn BookContent> = Box::new(GridPages::new(4));
    let mut book = SimulatedBook::new(content, BookConfig::default()).unwrap();
    assert_eq!(book.page_count(), 4);
    let (commands, _) = frame(&mut book, ms(0));
    assert!(!commands.is_empty());
}
