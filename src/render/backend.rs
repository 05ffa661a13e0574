use crate::foundation::core::{BezPath, Canvas, Point, Rgba8Premul, Vec2};
use crate::foundation::error::{ProgError, ProgResult};
use crate::geometry::path::PathData;
use crate::geometry::transform::Transform;
use crate::style::paint::{Brush, Pen};

/// Flattening tolerance for arcs.
const ARC_TOLERANCE: f64 = 0.1;

/// A rendered frame as RGBA8 pixels.
///
/// Frames are **premultiplied alpha** by default. The `premultiplied` flag is included to make
/// this explicit at API boundaries.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// A premultiplied frame with every pixel set to `color`.
    pub fn filled(canvas: Canvas, color: Rgba8Premul) -> Self {
        let px = color.to_array();
        let mut data = Vec::with_capacity(canvas.rgba_len());
        for _ in 0..(canvas.width as usize * canvas.height as usize) {
            data.extend_from_slice(&px);
        }
        Self {
            width: canvas.width,
            height: canvas.height,
            data,
            premultiplied: true,
        }
    }

    /// The RGBA bytes at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> ProgResult<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return Err(ProgError::invalid_argument(format!(
                "pixel ({x}, {y}) is outside the {}x{} frame",
                self.width, self.height
            )));
        }
        let i = ((y as usize) * (self.width as usize) + x as usize) * 4;
        Ok([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }
}

/// Transform and style in effect for the primitives of one shape.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawState {
    /// Global transform of the shape.
    pub transform: Transform,
    /// Stroke, if the shape is stroked.
    pub pen: Option<Pen>,
    /// Fill, if the shape is filled.
    pub brush: Option<Brush>,
}

/// Ellipse bounding box `(x0, y0)..(x1, y1)`, or the two end points of a line.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Bounds {
    /// First corner x.
    pub x0: f64,
    /// First corner y.
    pub y0: f64,
    /// Second corner x.
    pub x1: f64,
    /// Second corner y.
    pub y1: f64,
}

impl Bounds {
    /// Validated bounds; every coordinate must be finite.
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> ProgResult<Self> {
        if [x0, y0, x1, y1].iter().any(|v| !v.is_finite()) {
            return Err(ProgError::invalid_argument(
                "bounds must be four finite numbers",
            ));
        }
        Ok(Self { x0, y0, x1, y1 })
    }

    /// Bounds spanned by two points.
    pub fn from_points(p0: Point, p1: Point) -> ProgResult<Self> {
        Self::new(p0.x, p0.y, p1.x, p1.y)
    }

    fn ellipse(&self, start: i32, end: i32) -> kurbo::Arc {
        let center = Point::new((self.x0 + self.x1) / 2.0, (self.y0 + self.y1) / 2.0);
        let radii = Vec2::new((self.x1 - self.x0).abs() / 2.0, (self.y1 - self.y0).abs() / 2.0);
        let gap = i64::from(end) - i64::from(start);
        let sweep = if gap >= 360 {
            360
        } else {
            gap.rem_euclid(360)
        };
        kurbo::Arc {
            center,
            radii,
            start_angle: f64::from(start).to_radians(),
            sweep_angle: (sweep as f64).to_radians(),
            x_rotation: 0.0,
        }
    }
}

/// Geometry handed to a [`Renderer`].
///
/// Angles are whole degrees measured clockwise from 3 o'clock on the y-down canvas.
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    /// Interleaved cubic path of a vector shape.
    Path(PathData),
    /// Arbitrary path, e.g. a parsed SVG symbol.
    Bez(BezPath),
    /// Straight line between the two corners of the bounds.
    Line(Bounds),
    /// Open elliptic arc; stroked only.
    Arc {
        /// Ellipse box.
        bounds: Bounds,
        /// Start angle.
        start: i32,
        /// End angle.
        end: i32,
    },
    /// Arc closed by the straight chord between its ends.
    Chord {
        /// Ellipse box.
        bounds: Bounds,
        /// Start angle.
        start: i32,
        /// End angle.
        end: i32,
    },
    /// Arc closed through the ellipse center.
    PieSlice {
        /// Ellipse box.
        bounds: Bounds,
        /// Start angle.
        start: i32,
        /// End angle.
        end: i32,
    },
}

impl Primitive {
    /// `false` for lines and arcs, which ignore the brush.
    pub fn is_fillable(&self) -> bool {
        !matches!(self, Self::Line(_) | Self::Arc { .. })
    }

    /// Outline of the primitive in local coordinates.
    pub fn to_bez_path(&self) -> BezPath {
        match self {
            Self::Path(path) => path.to_bez_path(),
            Self::Bez(path) => path.clone(),
            Self::Line(b) => {
                let mut p = BezPath::new();
                p.move_to((b.x0, b.y0));
                p.line_to((b.x1, b.y1));
                p
            }
            Self::Arc { bounds, start, end } => {
                use kurbo::Shape as _;
                bounds.ellipse(*start, *end).to_path(ARC_TOLERANCE)
            }
            Self::Chord { bounds, start, end } => {
                use kurbo::Shape as _;
                let mut p = bounds.ellipse(*start, *end).to_path(ARC_TOLERANCE);
                p.close_path();
                p
            }
            Self::PieSlice { bounds, start, end } => {
                let arc = bounds.ellipse(*start, *end);
                let (s, c) = arc.start_angle.sin_cos();
                let mut p = BezPath::new();
                p.move_to(arc.center);
                p.line_to(arc.center + Vec2::new(arc.radii.x * c, arc.radii.y * s));
                for el in arc.append_iter(ARC_TOLERANCE) {
                    p.push(el);
                }
                p.close_path();
                p
            }
        }
    }
}

/// Drawing capability consumed by the scene traversal.
///
/// States nest: every `push_state` is matched by one `pop_state`, and primitives drawn in between
/// use the innermost state.
pub trait Renderer {
    /// Enter a shape's transform and style.
    fn push_state(&mut self, state: &DrawState);
    /// Leave the innermost state.
    fn pop_state(&mut self);
    /// Draw one primitive with the innermost state.
    fn draw(&mut self, primitive: &Primitive) -> ProgResult<()>;
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
