mod provenance;
mod simulate;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pageturn::content::GridPages;
use pageturn::geom::Point;
use pageturn::{BookConfig, CommandRecorder, SimulatedBook};
use provenance::{ensure_parent, write_sidecar, Payload};
use simulate::{run_gesture, Gesture};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::fmt::SubscriberBuilder;

#[derive(Parser)]
#[command(name = "pageturn-cli")]
#[command(about = "Drive the page-turn engine headlessly and dump traces")]
struct Cmd {
    /// JSON book config; missing fields take their defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Play a press/move/release gesture and write a per-frame JSON trace
    Simulate {
        #[arg(long, value_parser = parse_point)]
        from: Point,
        #[arg(long, value_parser = parse_point)]
        to: Point,
        /// Pointer moves between press and release
        #[arg(long, default_value_t = 20)]
        frames: usize,
        #[arg(long, default_value_t = 60.0)]
        fps: f64,
        #[arg(long, default_value_t = 10)]
        pages: usize,
        #[arg(long)]
        out: PathBuf,
    },
    /// Render one drag frame and write its draw commands as JSON
    Frame {
        #[arg(long, value_parser = parse_point)]
        from: Point,
        #[arg(long, value_parser = parse_point)]
        to: Point,
        #[arg(long, default_value_t = 10)]
        pages: usize,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print version, resolved config and provenance JSON
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    let config = load_config(cmd.config.as_deref())?;
    match cmd.action {
        Action::Simulate {
            from,
            to,
            frames,
            fps,
            pages,
            out,
        } => simulate(config, Gesture { from, to, moves: frames }, fps, pages, &out),
        Action::Frame {
            from,
            to,
            pages,
            out,
        } => frame(config, from, to, pages, &out),
        Action::Report => report(config),
    }
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {s:?}"))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("bad x in {s:?}: {e}"))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("bad y in {s:?}: {e}"))?;
    if !(x.is_finite() && y.is_finite()) {
        return Err(format!("non-finite point {s:?}"));
    }
    Ok(Point::new(x, y))
}

fn load_config(path: Option<&Path>) -> Result<BookConfig> {
    let Some(path) = path else {
        return Ok(BookConfig::default());
    };
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let config: BookConfig = serde_json::from_slice(&bytes)
        .with_context(|| format!("parsing config {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    tracing::info!(path = %path.display(), "loaded config");
    Ok(config)
}

fn simulate(config: BookConfig, gesture: Gesture, fps: f64, pages: usize, out: &Path) -> Result<()> {
    anyhow::ensure!(fps.is_finite() && fps > 0.0, "fps must be positive, got {fps}");
    tracing::info!(?gesture, fps, pages, out = %out.display(), "simulate");
    let step = Duration::from_secs_f64(1.0 / fps);
    let mut book = SimulatedBook::new(GridPages::new(pages), config)?;
    let trace = run_gesture(&mut book, gesture, step);
    let final_page = book.current_page();
    tracing::info!(frames = trace.len(), final_page, "gesture settled");

    ensure_parent(out)?;
    std::fs::write(out, serde_json::to_vec_pretty(&trace)?)
        .with_context(|| format!("writing {}", out.display()))?;
    write_sidecar(
        out,
        Payload::new(
            "simulate",
            serde_json::json!({
                "config": config,
                "from": [gesture.from.x, gesture.from.y],
                "to": [gesture.to.x, gesture.to.y],
                "moves": gesture.moves,
                "fps": fps,
                "pages": pages,
                "frames": trace.len(),
                "final_page": final_page,
            }),
        ),
    )?;
    Ok(())
}

fn frame(config: BookConfig, from: Point, to: Point, pages: usize, out: &Path) -> Result<()> {
    tracing::info!(out = %out.display(), "frame");
    let mut book = SimulatedBook::new(GridPages::new(pages), config)?;
    book.on_pointer_down(from, Duration::ZERO);
    book.on_pointer_move(to, Duration::ZERO);
    // Past the start window the displayed point is the pointer itself.
    let now = config.animation.start();
    let mut rec = CommandRecorder::new();
    book.render(&mut rec, now);
    let fold = book.fold(now);
    if fold.is_none() {
        tracing::warn!("drag does not turn a page; writing the static spread");
    }

    ensure_parent(out)?;
    std::fs::write(out, serde_json::to_vec_pretty(rec.commands())?)
        .with_context(|| format!("writing {}", out.display()))?;
    write_sidecar(
        out,
        Payload::new(
            "frame",
            serde_json::json!({
                "config": config,
                "from": [from.x, from.y],
                "to": [to.x, to.y],
                "pages": pages,
                "fold": fold,
                "commands": rec.commands().len(),
            }),
        ),
    )?;
    Ok(())
}

fn report(config: BookConfig) -> Result<()> {
    let obj = serde_json::json!({
        "revision": provenance::Revision::current(),
        "config": config,
        "page_size": config.layout().page_size,
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
