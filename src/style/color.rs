use std::fmt;
use std::str::FromStr;

use palette::{FromColor, Hsv, Srgb};
use serde::{Deserialize, Serialize};

use crate::foundation::error::{ProgError, ProgResult};

/// Straight RGB color with channels in `0..=1`.
///
/// Every accepted input form is normalized into this value once, at construction. Alpha lives
/// next to the color in the shape style, not in the color itself.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ColorSpec", into = "[f64; 3]")]
pub struct Color {
    /// Red channel.
    pub r: f64,
    /// Green channel.
    pub g: f64,
    /// Blue channel.
    pub b: f64,
}

impl Color {
    /// Opaque white, the default stroke color.
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };
    /// Black.
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    /// Validated RGB triple; each channel must be a finite number in `0..=1`.
    pub fn rgb(r: f64, g: f64, b: f64) -> ProgResult<Self> {
        check_unit("rgb", [r, g, b])?;
        Ok(Self { r, g, b })
    }

    /// HSL with hue as a fraction of the color wheel (`0..=1`).
    pub fn hsl(h: f64, s: f64, l: f64) -> ProgResult<Self> {
        check_unit("hsl", [h, s, l])?;
        Ok(hsl_to_rgb(h * 360.0, s, l))
    }

    /// HSV with hue as a fraction of the color wheel (`0..=1`).
    pub fn hsv(h: f64, s: f64, v: f64) -> ProgResult<Self> {
        check_unit("hsv", [h, s, v])?;
        let hsv = Hsv::<palette::encoding::Srgb, f64>::new(h * 360.0, s, v);
        let rgb = Srgb::<f64>::from_color(hsv);
        Ok(Self {
            r: rgb.red.clamp(0.0, 1.0),
            g: rgb.green.clamp(0.0, 1.0),
            b: rgb.blue.clamp(0.0, 1.0),
        })
    }

    /// `#rgb` or `#rrggbb`, case-insensitive.
    pub fn from_hex(s: &str) -> ProgResult<Self> {
        parse_hex(s).map_err(ProgError::invalid_color)
    }

    /// CSS color keyword such as `"white"` or `"cornflowerblue"`.
    pub fn from_name(name: &str) -> ProgResult<Self> {
        let key: String = name
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect();
        let rgb = palette::named::from_str(&key)
            .ok_or_else(|| ProgError::invalid_color(format!("unknown color name \"{name}\"")))?;
        Ok(Self::from_rgb8(rgb.red, rgb.green, rgb.blue))
    }

    /// Build from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: f64::from(r) / 255.0,
            g: f64::from(g) / 255.0,
            b: f64::from(b) / 255.0,
        }
    }

    /// Channels rounded to 8 bits.
    pub fn to_rgb8(self) -> [u8; 3] {
        fn to_u8(x: f64) -> u8 {
            (x.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        [to_u8(self.r), to_u8(self.g), to_u8(self.b)]
    }

    /// Long hex form, `#rrggbb`.
    pub fn hex_l(self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex_l())
    }
}

/// Hex strings first, then color names.
impl FromStr for Color {
    type Err = ProgError;

    fn from_str(s: &str) -> ProgResult<Self> {
        let s = s.trim();
        if s.starts_with('#') {
            Self::from_hex(s)
        } else {
            Self::from_name(s)
        }
    }
}

impl From<Color> for [f64; 3] {
    fn from(c: Color) -> Self {
        [c.r, c.g, c.b]
    }
}

impl TryFrom<ColorSpec> for Color {
    type Error = ProgError;

    fn try_from(spec: ColorSpec) -> ProgResult<Self> {
        spec.resolve()
    }
}

/// Every input form a color may be written in.
///
/// ```json
/// "white"                     "#ff8800"          [1.0, 0.5, 0.0]
/// ["hsl", 0.5, 1.0, 0.5]      {"rgb": [1, 0, 0]}  {"hsl": [0.1, 1, 0.5]}
/// {"hex": "#0f0"}             {"red": 1, "green": 0, "blue": 0}
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    /// A name or a `#`-prefixed hex string.
    Text(String),
    /// RGB floats in `0..=1`.
    Triple([f64; 3]),
    /// `("rgb" | "hsl" | "hsv", x, y, z)`.
    Tagged(String, f64, f64, f64),
    /// `{"rgb": [r, g, b]}`.
    RgbKey {
        /// Channels.
        rgb: [f64; 3],
    },
    /// `{"hsl": [h, s, l]}`.
    HslKey {
        /// Hue fraction, saturation, lightness.
        hsl: [f64; 3],
    },
    /// `{"hsv": [h, s, v]}`.
    HsvKey {
        /// Hue fraction, saturation, value.
        hsv: [f64; 3],
    },
    /// `{"hex": "#rrggbb"}`.
    HexKey {
        /// Hex string.
        hex: String,
    },
    /// `{"red": r, "green": g, "blue": b}`.
    Channels {
        /// Red channel.
        red: f64,
        /// Green channel.
        green: f64,
        /// Blue channel.
        blue: f64,
    },
}

impl ColorSpec {
    /// Normalize into a [`Color`], failing with [`ProgError::InvalidColor`].
    pub fn resolve(&self) -> ProgResult<Color> {
        match self {
            Self::Text(s) => s.parse(),
            Self::Triple([r, g, b]) | Self::RgbKey { rgb: [r, g, b] } => Color::rgb(*r, *g, *b),
            Self::Tagged(kind, x, y, z) => match kind.as_str() {
                "rgb" => Color::rgb(*x, *y, *z),
                "hsl" => Color::hsl(*x, *y, *z),
                "hsv" => Color::hsv(*x, *y, *z),
                other => Err(ProgError::invalid_color(format!(
                    "invalid color type \"{other}\" (expected rgb, hsl or hsv)"
                ))),
            },
            Self::HslKey { hsl: [h, s, l] } => Color::hsl(*h, *s, *l),
            Self::HsvKey { hsv: [h, s, v] } => Color::hsv(*h, *s, *v),
            Self::HexKey { hex } => Color::from_hex(hex),
            Self::Channels { red, green, blue } => Color::rgb(*red, *green, *blue),
        }
    }
}

impl From<&str> for ColorSpec {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<Color> for ColorSpec {
    fn from(c: Color) -> Self {
        Self::Triple([c.r, c.g, c.b])
    }
}

fn check_unit(kind: &str, values: [f64; 3]) -> ProgResult<()> {
    if values.iter().all(|v| v.is_finite() && (0.0..=1.0).contains(v)) {
        Ok(())
    } else {
        Err(ProgError::invalid_color(format!(
            "{kind} components must be numbers in 0..=1, got {values:?}"
        )))
    }
}

fn parse_hex(s: &str) -> Result<Color, String> {
    let s = s.trim();
    let digits = s.strip_prefix('#').unwrap_or(s);

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    if !digits.is_ascii() {
        return Err(format!("invalid hex color \"{s}\""));
    }
    match digits.len() {
        3 => {
            let mut rgb = [0u8; 3];
            for (i, c) in digits.chars().enumerate() {
                rgb[i] = hex_byte(&format!("{c}{c}"))?;
            }
            Ok(Color::from_rgb8(rgb[0], rgb[1], rgb[2]))
        }
        6 => Ok(Color::from_rgb8(
            hex_byte(&digits[0..2])?,
            hex_byte(&digits[2..4])?,
            hex_byte(&digits[4..6])?,
        )),
        _ => Err(format!(
            "hex color must be #rgb or #rrggbb (case-insensitive), got \"{s}\""
        )),
    }
}

fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Color {
    // Standard HSL -> RGB conversion, hue in degrees.
    let h = (h % 360.0 + 360.0) % 360.0 / 360.0;

    if s == 0.0 {
        return Color { r: l, g: l, b: l };
    }

    fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            return p + (q - p) * 6.0 * t;
        }
        if t < 1.0 / 2.0 {
            return q;
        }
        if t < 2.0 / 3.0 {
            return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
        }
        p
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    Color {
        r: hue_to_rgb(p, q, h + 1.0 / 3.0),
        g: hue_to_rgb(p, q, h),
        b: hue_to_rgb(p, q, h - 1.0 / 3.0),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/color.rs"]
mod tests;
