//! Concrete shape geometries.
//!
//! Path shapes ([`Polyline`], [`Rectangle`]) keep the parameters they were built from and derive
//! their [`VShape`] points from them. The remaining kinds map directly onto one renderer
//! [`Primitive`].

use crate::foundation::core::{BezPath, Point};
use crate::foundation::error::{ProgError, ProgResult};
use crate::geometry::bezier::slice_curve;
use crate::geometry::path::PathData;
use crate::geometry::spline::get_flat_handles;
use crate::render::backend::{Bounds, Primitive};
use crate::scene::vshape::{VShape, VShapeConfig};

/// Path through an ordered list of points.
#[derive(Clone, Debug, PartialEq)]
pub struct Polyline {
    anchors: Vec<Point>,
    smooth: bool,
    closed: bool,
    shape: VShape,
}

impl Polyline {
    /// Build the path; `closed` wraps the handle computation around to the first point.
    pub fn new(anchors: Vec<Point>, smooth: bool, closed: bool) -> ProgResult<Self> {
        let shape = VShape::from_anchors(VShapeConfig { make_closed: closed }, &anchors, smooth)?;
        Ok(Self {
            anchors,
            smooth,
            closed,
            shape,
        })
    }

    /// Points the polyline was built from.
    pub fn anchors(&self) -> &[Point] {
        &self.anchors
    }

    /// `true` when handles are smoothed.
    pub fn smooth(&self) -> bool {
        self.smooth
    }

    /// `true` when the path wraps around.
    pub fn closed(&self) -> bool {
        self.closed
    }

    /// Move one source point and rebuild the path.
    pub fn set_anchor(&mut self, index: usize, point: Point) -> ProgResult<()> {
        let Some(slot) = self.anchors.get_mut(index) else {
            return Err(ProgError::invalid_argument(format!(
                "anchor index {index} out of range for {} anchors",
                self.anchors.len()
            )));
        };
        let previous = std::mem::replace(slot, point);
        if let Err(e) = self.shape.set_anchors(&self.anchors, self.smooth) {
            self.anchors[index] = previous;
            return Err(e);
        }
        Ok(())
    }

    /// Derived path geometry.
    pub fn vshape(&self) -> &VShape {
        &self.shape
    }

    /// Derived path geometry, for in-place edits.
    pub fn vshape_mut(&mut self) -> &mut VShape {
        &mut self.shape
    }
}

/// Axis-aligned rectangle with a corner at the origin, drawn as a closed flat path.
#[derive(Clone, Debug, PartialEq)]
pub struct Rectangle {
    width: f64,
    height: f64,
    shape: VShape,
}

impl Rectangle {
    /// Corners `(0,0)`, `(0,h)`, `(w,h)`, `(w,0)` in that order.
    pub fn new(width: f64, height: f64) -> ProgResult<Self> {
        if !width.is_finite() || !height.is_finite() {
            return Err(ProgError::invalid_argument(
                "rectangle width/height must be finite",
            ));
        }
        Ok(Self::build(width, height))
    }

    fn build(width: f64, height: f64) -> Self {
        let corners = [
            Point::new(0.0, 0.0),
            Point::new(0.0, height),
            Point::new(width, height),
            Point::new(width, 0.0),
            Point::new(0.0, 0.0),
        ];
        let (h0, h1) = get_flat_handles(&corners);
        let shape = VShape::from_path(
            VShapeConfig { make_closed: true },
            PathData::interleave(&corners, &h0, &h1),
        );
        Self {
            width,
            height,
            shape,
        }
    }

    /// Width.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Height.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Derived path geometry.
    pub fn vshape(&self) -> &VShape {
        &self.shape
    }

    /// Derived path geometry, for in-place edits.
    pub fn vshape_mut(&mut self) -> &mut VShape {
        &mut self.shape
    }
}

impl Default for Rectangle {
    fn default() -> Self {
        Self::build(1.0, 1.0)
    }
}

/// Straight line between two points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    bounds: Bounds,
}

impl Line {
    /// Line from `p0` to `p1`.
    pub fn new(p0: Point, p1: Point) -> ProgResult<Self> {
        Ok(Self {
            bounds: Bounds::from_points(p0, p1)?,
        })
    }

    /// The end points as bounds.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }
}

/// Part of an ellipse, shared by arcs, chords and pie slices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SliceShape {
    /// Ellipse box.
    pub bounds: Bounds,
    /// Start angle in degrees.
    pub start_angle: i32,
    /// End angle in degrees.
    pub end_angle: i32,
}

impl SliceShape {
    /// Slice of the ellipse inscribed in `bounds`.
    pub fn new(bounds: Bounds, start_angle: i32, end_angle: i32) -> Self {
        Self {
            bounds,
            start_angle,
            end_angle,
        }
    }
}

/// Raw SVG path.
#[derive(Clone, Debug, PartialEq)]
pub struct Symbol {
    path: String,
    bez: BezPath,
}

impl Symbol {
    /// Parse `path`; unparseable input fails with [`ProgError::InvalidArgument`].
    pub fn new(path: impl Into<String>) -> ProgResult<Self> {
        let path = path.into();
        let bez = BezPath::from_svg(path.trim())
            .map_err(|e| ProgError::invalid_argument(format!("invalid svg path \"{path}\": {e}")))?;
        Ok(Self { path, bez })
    }

    /// Source string.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Parsed geometry.
    pub fn bez_path(&self) -> &BezPath {
        &self.bez
    }
}

/// Cubic bezier curve drawn only over `[0, slice_pos]`.
#[derive(Clone, Debug, PartialEq)]
pub struct BezierCurve {
    anchors: [Point; 4],
    slice_pos: f64,
    close_path: bool,
    drawn: [Point; 4],
}

impl BezierCurve {
    /// Full curve through the four control points.
    pub fn new(p0: Point, p1: Point, p2: Point, p3: Point) -> ProgResult<Self> {
        let anchors = [p0, p1, p2, p3];
        if anchors.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(ProgError::invalid_argument(
                "curve coordinates must be finite numbers",
            ));
        }
        Ok(Self {
            anchors,
            slice_pos: 1.0,
            close_path: false,
            drawn: anchors,
        })
    }

    /// Close the drawn slice back to its start.
    pub fn with_close_path(mut self, close_path: bool) -> Self {
        self.close_path = close_path;
        self
    }

    /// Builder form of [`BezierCurve::slice`].
    pub fn with_slice(mut self, t: f64) -> Self {
        self.slice(t);
        self
    }

    /// Draw only the part of the curve over `[0, t]`.
    pub fn slice(&mut self, t: f64) {
        self.slice_pos = t;
        let [p0, p1, p2, p3] = self.anchors;
        self.drawn = slice_curve(t, p0, p1, p2, p3);
    }

    /// Current slice end.
    pub fn slice_pos(&self) -> f64 {
        self.slice_pos
    }

    /// Original control points.
    pub fn anchors(&self) -> [Point; 4] {
        self.anchors
    }

    /// Control points of the drawn slice.
    pub fn drawn(&self) -> [Point; 4] {
        self.drawn
    }

    /// Drawn slice as an SVG path string with coordinates truncated to integers.
    pub fn path_string(&self) -> String {
        let c: Vec<i64> = self
            .drawn
            .iter()
            .flat_map(|p| [p.x as i64, p.y as i64])
            .collect();
        let mut out = format!(
            "M {} {} C {} {}, {} {}, {} {}",
            c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7]
        );
        if self.close_path {
            out.push_str(" Z");
        }
        out
    }

    pub(crate) fn primitive(&self) -> Option<Primitive> {
        if self.slice_pos == 0.0 {
            return None;
        }
        let [p0, p1, p2, p3] = self.drawn;
        let mut path = BezPath::new();
        path.move_to(p0);
        path.curve_to(p1, p2, p3);
        if self.close_path {
            path.close_path();
        }
        Some(Primitive::Bez(path))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/shapes.rs"]
mod tests;
