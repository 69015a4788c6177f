//! Draw surface the engine renders into, and a recorder implementation.
//!
//! `DrawTarget` is the host seam: a windowing backend implements it over its
//! own canvas. `CommandRecorder` captures the calls as serialisable
//! `DrawCommand`s for tests and headless traces, and resolves every
//! registered interactive element to the transform that was active when its
//! page drew it.

use serde::{Deserialize, Serialize};

use crate::geom::{Affine2, Point, Rect, Size};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);
    pub const LIGHT_GRAY: Color = Color::rgba(211, 211, 211, 255);

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Black with alpha `255 × opacity`, truncated.
    #[inline]
    pub fn black_alpha(opacity: f64) -> Self {
        Self::rgba(0, 0, 0, (255.0 * opacity.clamp(0.0, 1.0)) as u8)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Color,
}

impl GradientStop {
    #[inline]
    pub fn new(offset: f64, color: Color) -> Self {
        Self { offset, color }
    }
}

/// Gradient along `start → end` in absolute coordinates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearGradient {
    pub start: Point,
    pub end: Point,
    pub stops: Vec<GradientStop>,
    /// Orientation of the strip the gradient fills, for backends that want an angle.
    pub angle_degrees: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Brush {
    Solid { color: Color },
    Linear { gradient: LinearGradient },
}

impl From<Color> for Brush {
    fn from(color: Color) -> Self {
        Brush::Solid { color }
    }
}

impl From<LinearGradient> for Brush {
    fn from(gradient: LinearGradient) -> Self {
        Brush::Linear { gradient }
    }
}

/// Immediate-mode canvas with a transform/clip layer stack.
///
/// Every `push_*` is matched by exactly one `pop`.
pub trait DrawTarget {
    fn fill_rect(&mut self, rect: Rect, brush: &Brush);
    fn fill_polygon(&mut self, points: &[Point], brush: &Brush);
    fn stroke_line(&mut self, from: Point, to: Point, width: f64, color: Color);
    fn draw_text(&mut self, origin: Point, text: &str, font_size: f64, color: Color);
    fn push_transform(&mut self, transform: Affine2);
    /// Clip to the union of the given polygons.
    fn push_clip(&mut self, regions: &[&[Point]]);
    fn pop(&mut self);

    /// Place an interactive element over the current page, in page-local
    /// coordinates. Backends without interactive content ignore it.
    fn register_element(&mut self, id: &str, size: Size) {
        let _ = (id, size);
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        brush: Brush,
    },
    FillPolygon {
        points: Vec<Point>,
        brush: Brush,
    },
    StrokeLine {
        from: Point,
        to: Point,
        width: f64,
        color: Color,
    },
    Text {
        origin: Point,
        text: String,
        font_size: f64,
        color: Color,
    },
    PushTransform {
        transform: Affine2,
    },
    PushClip {
        regions: Vec<Vec<Point>>,
    },
    Pop,
    /// Interactive element with its resolved page-local → screen transform.
    Element {
        id: String,
        size: Size,
        transform: Affine2,
    },
}

#[derive(Clone, Copy, Debug)]
enum Layer {
    Transform(Affine2),
    Clip,
}

#[derive(Clone, Debug, Default)]
pub struct CommandRecorder {
    commands: Vec<DrawCommand>,
    layers: Vec<Layer>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }
    #[inline]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }
    #[inline]
    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }
    /// Open layers; zero after a complete frame.
    #[inline]
    pub fn depth(&self) -> usize {
        self.layers.len()
    }
    pub fn clear(&mut self) {
        self.commands.clear();
        self.layers.clear();
    }

    /// Composition of all open transforms, outermost applied last.
    pub fn current_transform(&self) -> Affine2 {
        self.layers
            .iter()
            .fold(Affine2::identity(), |acc, layer| match layer {
                Layer::Transform(t) => acc.compose(t),
                Layer::Clip => acc,
            })
    }

    /// Registered elements with their screen placement.
    pub fn elements(&self) -> impl Iterator<Item = (&str, &Affine2)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Element { id, transform, .. } => Some((id.as_str(), transform)),
            _ => None,
        })
    }
}

impl DrawTarget for CommandRecorder {
    fn fill_rect(&mut self, rect: Rect, brush: &Brush) {
        self.commands.push(DrawCommand::FillRect {
            rect,
            brush: brush.clone(),
        });
    }

    fn fill_polygon(&mut self, points: &[Point], brush: &Brush) {
        self.commands.push(DrawCommand::FillPolygon {
            points: points.to_vec(),
            brush: brush.clone(),
        });
    }

    fn stroke_line(&mut self, from: Point, to: Point, width: f64, color: Color) {
        self.commands.push(DrawCommand::StrokeLine {
            from,
            to,
            width,
            color,
        });
    }

    fn draw_text(&mut self, origin: Point, text: &str, font_size: f64, color: Color) {
        self.commands.push(DrawCommand::Text {
            origin,
            text: text.to_owned(),
            font_size,
            color,
        });
    }

    fn push_transform(&mut self, transform: Affine2) {
        self.layers.push(Layer::Transform(transform));
        self.commands.push(DrawCommand::PushTransform { transform });
    }

    fn push_clip(&mut self, regions: &[&[Point]]) {
        self.layers.push(Layer::Clip);
        self.commands.push(DrawCommand::PushClip {
            regions: regions.iter().map(|r| r.to_vec()).collect(),
        });
    }

    fn pop(&mut self) {
        let popped = self.layers.pop();
        debug_assert!(popped.is_some(), "pop without a matching push");
        self.commands.push(DrawCommand::Pop);
    }

    fn register_element(&mut self, id: &str, size: Size) {
        self.commands.push(DrawCommand::Element {
            id: id.to_owned(),
            size,
            transform: self.current_transform(),
        });
    }
}
