//! Drive one forward page turn with a scripted pointer and print each frame's
//! command count and fold line.
//!
//! Run: `cargo run -p pageturn --example scripted_turn`

use std::time::Duration;

use pageturn::prelude::*;

fn main() {
    let mut book = match SimulatedBook::new(GridPages::new(8), BookConfig::default()) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("invalid config: {e}");
            return;
        }
    };

    let frame = Duration::from_millis(16);
    let mut now = Duration::ZERO;
    book.on_pointer_down(Point::new(790.0, 520.0), now);
    for step in 1..=20 {
        now += frame;
        let x = 790.0 - 40.0 * step as f64;
        book.on_pointer_move(Point::new(x, 520.0 - 6.0 * step as f64), now);
        report(&mut book, now);
    }
    book.on_pointer_up(Point::new(-10.0, 400.0), now);

    while book.needs_continuous_redraw() || book.phase() != Phase::Idle {
        now += frame;
        report(&mut book, now);
    }
    println!("settled on page {}", book.current_page());
}

fn report(book: &mut SimulatedBook<GridPages>, now: Duration) {
    let fold = book.fold(now);
    let mut rec = CommandRecorder::new();
    book.render(&mut rec, now);
    match fold {
        Some(f) => println!(
            "{:>5} ms  {:?}  {:>4} cmds  fold at ({:.1}, {:.1}) angle {:.1}°",
            now.as_millis(),
            f.mode,
            rec.commands().len(),
            f.line.origin.x,
            f.line.origin.y,
            f.line.angle_degrees()
        ),
        None => println!("{:>5} ms  idle  {:>4} cmds", now.as_millis(), rec.commands().len()),
    }
}
