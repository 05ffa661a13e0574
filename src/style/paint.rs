use serde::{Deserialize, Serialize};

use crate::style::color::Color;

/// Stroke and fill settings of a shape.
///
/// Defaults: white stroke of width 1, fully opaque, no fill.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Stroke color; `None` disables the stroke.
    pub stroke_color: Option<Color>,
    /// Stroke width in canvas units.
    pub stroke_width: f64,
    /// Stroke opacity in `0..=1`.
    pub stroke_alpha: f64,
    /// Fill color; `None` disables the fill.
    pub fill_color: Option<Color>,
    /// Fill opacity in `0..=1`.
    pub fill_alpha: f64,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            stroke_color: Some(Color::WHITE),
            stroke_width: 1.0,
            stroke_alpha: 1.0,
            fill_color: None,
            fill_alpha: 1.0,
        }
    }
}

impl StyleConfig {
    /// Replace the stroke settings.
    pub fn with_stroke(mut self, color: Option<Color>, width: f64, alpha: f64) -> Self {
        self.stroke_color = color;
        self.stroke_width = width;
        self.stroke_alpha = alpha;
        self
    }

    /// Replace the fill settings.
    pub fn with_fill(mut self, color: Option<Color>, alpha: f64) -> Self {
        self.fill_color = color;
        self.fill_alpha = alpha;
        self
    }

    /// The stroke to draw with, if any.
    ///
    /// No pen when the color is unset, the width is not positive or the alpha is not positive.
    pub fn pen(&self) -> Option<Pen> {
        let color = self.stroke_color?;
        if !positive(self.stroke_width) || !positive(self.stroke_alpha) {
            return None;
        }
        Some(Pen {
            color,
            width: self.stroke_width,
            opacity: opacity_u8(self.stroke_alpha),
        })
    }

    /// The fill to draw with, if any.
    pub fn brush(&self) -> Option<Brush> {
        let color = self.fill_color?;
        if !positive(self.fill_alpha) {
            return None;
        }
        Some(Brush {
            color,
            opacity: opacity_u8(self.fill_alpha),
        })
    }
}

/// Resolved stroke.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pen {
    /// Stroke color.
    pub color: Color,
    /// Stroke width.
    pub width: f64,
    /// Opacity, `floor(255 * alpha)`.
    pub opacity: u8,
}

impl Pen {
    /// Straight-alpha RGBA8.
    pub fn rgba8(&self) -> [u8; 4] {
        let [r, g, b] = self.color.to_rgb8();
        [r, g, b, self.opacity]
    }
}

/// Resolved fill.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Brush {
    /// Fill color.
    pub color: Color,
    /// Opacity, `floor(255 * alpha)`.
    pub opacity: u8,
}

impl Brush {
    /// Straight-alpha RGBA8.
    pub fn rgba8(&self) -> [u8; 4] {
        let [r, g, b] = self.color.to_rgb8();
        [r, g, b, self.opacity]
    }
}

fn positive(v: f64) -> bool {
    v > 0.0
}

fn opacity_u8(alpha: f64) -> u8 {
    (255.0 * alpha.clamp(0.0, 1.0)).floor() as u8
}

#[cfg(test)]
#[path = "../../tests/unit/style/paint.rs"]
mod tests;
