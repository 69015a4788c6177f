//! Page-turn engine for a two-page book spread.
//!
//! The host feeds pointer events and a monotonic frame time into
//! [`SimulatedBook`] and hands it a [`DrawTarget`] each frame. The engine solves
//! the fold line for the current drag, clips the turning half into the revealed
//! and curled regions, places the turning page's back with a mirrored affine map,
//! and adds spine and fold shadows. Page content comes from a [`BookContent`].
//!
//! Coordinates are book-local with y growing downward; one unit is one pixel at
//! scale 1.
//!
//! Modules
//! - `geom`: points, lines, rects, affine maps.
//! - `clip`: half-plane polygon clipping.
//! - `fold`: split-line solver and fold regions.
//! - `transform`: spread layout and the turning-page map.
//! - `shadow`: spine and fold shadow strips.
//! - `drag`: drag and settle state machine.
//! - `draw`, `content`: the drawing seam and page providers.
//! - `book`: the engine tying the above together.

pub mod book;
pub mod clip;
pub mod config;
pub mod content;
pub mod drag;
pub mod draw;
pub mod fold;
pub mod geom;
pub mod shadow;
pub mod transform;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use book::SimulatedBook;
pub use config::{AnimationCfg, BookConfig, ConfigError, Padding};
pub use content::{BookContent, PageCanvas};
pub use draw::{Brush, Color, CommandRecorder, DrawCommand, DrawTarget};

/// Common exports for hosts driving a book.
pub mod prelude {
    pub use crate::book::SimulatedBook;
    pub use crate::config::{AnimationCfg, BookConfig, Padding};
    pub use crate::content::{BookContent, ElementPages, GridPages, PageCanvas, TextPages};
    pub use crate::drag::Phase;
    pub use crate::draw::{Brush, Color, CommandRecorder, DrawCommand, DrawTarget};
    pub use crate::fold::{FoldLine, TurnMode};
    pub use crate::geom::{Affine2, Point, Rect, Size};
}
