//! Planar geometry for the page-turn engine.
//!
//! Purpose
//! - Value types (`Line`, `Segment`, `Rect`, `Size`) and the three hot-path
//!   predicates every other module builds on: `intersect`, `side_of`, `mirror`.
//! - A 2D affine map (`Affine2`) used to place page content on screen.
//!
//! Numerics
//! - Intersections of (near-)parallel lines return a NaN point instead of an
//!   error. Callers check `is_finite_point` before use; the geometry runs on
//!   every pointer event and near-parallel queries are expected there.
//! - Points exactly on a line resolve to `Side::Right`. The polygon clipper
//!   relies on this tie-break being stable.
//!
//! Code cross-refs: `clip::clip_polygon`, `fold::solve_split_line`,
//! `transform::turn_transform`.

mod affine;
mod line;
mod types;

pub use affine::Affine2;
pub use line::{intersect, is_finite_point, mirror, side_of, PARALLEL_EPS};
pub use types::{Line, Point, Rect, Segment, Side, Size, Vector};
