use crate::foundation::error::{ProgError, ProgResult};

pub use kurbo::{Affine, BezPath, Point, Vec2};

/// Default canvas width in pixels.
pub const DEF_WIDTH: u32 = 640;
/// Default canvas height in pixels.
pub const DEF_HEIGHT: u32 = 480;
/// Default frame rate.
pub const DEF_FPS: u32 = 30;

/// Whole frames-per-second used for playback and encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Fps(u32);

impl Fps {
    /// Create a validated FPS value.
    pub fn new(fps: u32) -> ProgResult<Self> {
        if fps == 0 {
            return Err(ProgError::invalid_argument("fps must be positive"));
        }
        Ok(Self(fps))
    }

    /// Validate a floating-point rate: it must be finite, positive and integral.
    pub fn from_f64(fps: f64) -> ProgResult<Self> {
        if !fps.is_finite() {
            return Err(ProgError::invalid_argument("fps must be a finite number"));
        }
        if fps <= 0.0 {
            return Err(ProgError::invalid_argument("fps must be positive"));
        }
        if fps.fract() != 0.0 {
            return Err(ProgError::invalid_argument(format!(
                "fps must be an integer, got {fps}"
            )));
        }
        if fps > f64::from(u32::MAX) {
            return Err(ProgError::invalid_argument("fps is out of range"));
        }
        Self::new(fps as u32)
    }

    /// Frames per second.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Duration of one frame in whole milliseconds, rounded up.
    pub fn frame_delay_ms(self) -> u64 {
        1000_u64.div_ceil(u64::from(self.0))
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self(DEF_FPS)
    }
}

impl TryFrom<u32> for Fps {
    type Error = ProgError;

    fn try_from(value: u32) -> ProgResult<Self> {
        Self::new(value)
    }
}

impl From<Fps> for u32 {
    fn from(value: Fps) -> Self {
        value.0
    }
}

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a validated canvas; both sides must fit the rasterizer's `u16` surfaces.
    pub fn new(width: u32, height: u32) -> ProgResult<Self> {
        if width == 0 || height == 0 {
            return Err(ProgError::invalid_argument(
                "canvas width/height must be non-zero",
            ));
        }
        if width > u32::from(u16::MAX) || height > u32::from(u16::MAX) {
            return Err(ProgError::invalid_argument(
                "canvas width/height must not exceed 65535",
            ));
        }
        Ok(Self { width, height })
    }

    /// Byte length of an RGBA8 buffer covering the canvas.
    pub fn rgba_len(self) -> usize {
        (self.width as usize) * (self.height as usize) * 4
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: DEF_WIDTH,
            height: DEF_HEIGHT,
        }
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel premultiplied by alpha.
    pub r: u8,
    /// Green channel premultiplied by alpha.
    pub g: u8,
    /// Blue channel premultiplied by alpha.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Convert straight-alpha RGBA8 into premultiplied RGBA8.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    /// Channels in RGBA order.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
