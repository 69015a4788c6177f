//! Host-supplied book configuration, read every frame.
//!
//! Defaults match a plain white two-page spread with thin shadows. `validate`
//! is the only place configuration can fail; the per-frame geometry assumes a
//! validated config and never errors.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::draw::Color;
use crate::geom::Size;
use crate::transform::SpreadLayout;

/// Four-sided inner padding of each page, in book units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Padding {
    #[inline]
    pub fn uniform(v: f64) -> Self {
        Self {
            left: v,
            top: v,
            right: v,
            bottom: v,
        }
    }
}

/// Easing windows: smoothing right after the first move, and the settle after release.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationCfg {
    pub start_ms: u64,
    pub end_ms: u64,
}

impl Default for AnimationCfg {
    fn default() -> Self {
        Self {
            start_ms: 120,
            end_ms: 300,
        }
    }
}

impl AnimationCfg {
    #[inline]
    pub fn start(&self) -> Duration {
        Duration::from_millis(self.start_ms)
    }
    #[inline]
    pub fn end(&self) -> Duration {
        Duration::from_millis(self.end_ms)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookConfig {
    /// Whole spread, both pages.
    pub size: Size,
    pub padding: Padding,
    /// Half-width of the spine seam; also the spine shadow half-width.
    pub spine_gap: f64,
    /// Half-width of the shadow strip along the fold.
    pub fold_shadow_width: f64,
    /// Peak shadow alpha in [0, 1].
    pub shadow_opacity: f64,
    pub background: Color,
    pub animation: AnimationCfg,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            size: Size::new(800.0, 600.0),
            padding: Padding::default(),
            spine_gap: 5.0,
            fold_shadow_width: 5.0,
            shadow_opacity: 0.5,
            background: Color::WHITE,
            animation: AnimationCfg::default(),
        }
    }
}

impl BookConfig {
    #[inline]
    pub fn layout(&self) -> SpreadLayout {
        SpreadLayout::new(self.size, self.padding, self.spine_gap)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let Size { width, height } = self.size;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ConfigError::NonPositiveSize { width, height });
        }
        let lengths = [
            ("padding.left", self.padding.left),
            ("padding.top", self.padding.top),
            ("padding.right", self.padding.right),
            ("padding.bottom", self.padding.bottom),
            ("spine_gap", self.spine_gap),
            ("fold_shadow_width", self.fold_shadow_width),
        ];
        for (field, value) in lengths {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::NegativeLength { field, value });
            }
        }
        if !(0.0..=1.0).contains(&self.shadow_opacity) {
            return Err(ConfigError::OpacityOutOfRange(self.shadow_opacity));
        }
        let page = self.layout().page_size;
        if page.is_empty() {
            return Err(ConfigError::PageCollapsed {
                width: page.width,
                height: page.height,
            });
        }
        Ok(())
    }
}

/// Rejected configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NonPositiveSize { width: f64, height: f64 },
    NegativeLength { field: &'static str, value: f64 },
    OpacityOutOfRange(f64),
    /// Padding and spine leave no room for page content.
    PageCollapsed { width: f64, height: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveSize { width, height } => {
                write!(f, "book size must be finite and positive, got {width}x{height}")
            }
            Self::NegativeLength { field, value } => {
                write!(f, "{field} must be finite and non-negative, got {value}")
            }
            Self::OpacityOutOfRange(v) => write!(f, "shadow_opacity must lie in [0, 1], got {v}"),
            Self::PageCollapsed { width, height } => {
                write!(f, "page area collapses to {width}x{height} after padding and spine")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
