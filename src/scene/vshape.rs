//! Shapes made only of cubic bezier paths.

use serde::{Deserialize, Serialize};

use crate::foundation::core::{Point, Vec2};
use crate::foundation::error::{ProgError, ProgResult};
use crate::geometry::bezier::subdivide_cubic;
use crate::geometry::path::PathData;
use crate::geometry::spline::{get_flat_handles, get_smooth_handles, is_closed};

/// Construction options of a [`VShape`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VShapeConfig {
    /// Append a copy of the first anchor when the anchors do not already close the path.
    pub make_closed: bool,
}

/// Cubic bezier path geometry stored as interleaved anchors and handles.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VShape {
    config: VShapeConfig,
    path: PathData,
}

impl VShape {
    /// An empty shape.
    pub fn new(config: VShapeConfig) -> Self {
        Self {
            config,
            path: PathData::default(),
        }
    }

    /// A shape through `anchors`; see [`VShape::set_anchors`].
    pub fn from_anchors(config: VShapeConfig, anchors: &[Point], smooth: bool) -> ProgResult<Self> {
        let mut out = Self::new(config);
        out.set_anchors(anchors, smooth)?;
        Ok(out)
    }

    pub(crate) fn from_path(config: VShapeConfig, path: PathData) -> Self {
        Self { config, path }
    }

    /// Construction options.
    pub fn config(&self) -> VShapeConfig {
        self.config
    }

    /// Rebuild the path through `anchors`.
    ///
    /// Handles come from [`get_smooth_handles`] when `smooth`, otherwise they sit at the thirds of
    /// each straight segment. An empty list clears the path.
    pub fn set_anchors(&mut self, anchors: &[Point], smooth: bool) -> ProgResult<()> {
        self.path = self.path_through(anchors, smooth)?;
        Ok(())
    }

    fn path_through(&self, anchors: &[Point], smooth: bool) -> ProgResult<PathData> {
        if anchors.is_empty() {
            return Ok(PathData::default());
        }
        if anchors.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(ProgError::invalid_argument(
                "anchor coordinates must be finite numbers",
            ));
        }
        let mut anchors = anchors.to_vec();
        if self.config.make_closed && !is_closed(&anchors) {
            anchors.push(anchors[0]);
        }
        let (h0, h1) = if smooth {
            get_smooth_handles(&anchors)?
        } else {
            get_flat_handles(&anchors)
        };
        PathData::from_parts(&anchors, &h0, &h1)
    }

    /// Store `[A0, H0_0, H1_0, A1, ...]` built from explicit anchors and handles.
    pub fn set_points(&mut self, anchors: &[Point], h0: &[Point], h1: &[Point]) -> ProgResult<()> {
        self.path = PathData::from_parts(anchors, h0, h1)?;
        Ok(())
    }

    /// Split back into `(anchors, h0, h1)`.
    pub fn get_points(&self) -> (Vec<Point>, Vec<Point>, Vec<Point>) {
        self.path.split()
    }

    /// The interleaved points.
    pub fn points(&self) -> &[Point] {
        self.path.points()
    }

    /// The path geometry.
    pub fn path(&self) -> &PathData {
        &self.path
    }

    /// `true` when the shape has point data.
    pub fn has_points(&self) -> bool {
        !self.path.is_empty()
    }

    /// Number of anchors.
    pub fn count_anchors(&self) -> usize {
        self.path.count_anchors()
    }

    /// `true` when the path ends where it starts.
    pub fn is_closed(&self) -> bool {
        self.path.is_closed()
    }

    /// The path in `M x y C x1 y1, x2 y2, x y ... Z` form.
    pub fn to_path_string(&self) -> String {
        self.path.to_svg_string()
    }

    /// Replace every cubic with `count` cubics over equal parameter windows.
    ///
    /// `count <= 1` leaves the shape unchanged.
    pub fn subdivide(&mut self, count: usize) {
        if count <= 1 || self.path.is_empty() {
            return;
        }
        let mut points = vec![self.path.points()[0]];
        for segment in self.path.segments() {
            points.extend_from_slice(&subdivide_cubic(&segment, count)[1..]);
        }
        self.path = PathData::from_points_unchecked(points);
    }

    /// Move every anchor through `f` and recompute smooth handles.
    pub fn transform_nonlinear(&mut self, f: impl FnMut(Point) -> Point) -> ProgResult<()> {
        self.path = self.mapped_path(f)?;
        Ok(())
    }

    /// The path [`transform_nonlinear`](Self::transform_nonlinear) would produce, leaving `self`
    /// untouched.
    pub fn mapped_path(&self, f: impl FnMut(Point) -> Point) -> ProgResult<PathData> {
        if self.path.is_empty() {
            return Ok(PathData::default());
        }
        let (anchors, _, _) = self.get_points();
        let moved: Vec<Point> = anchors.into_iter().map(f).collect();
        self.path_through(&moved, true)
    }

    pub(crate) fn replace_path(&mut self, path: PathData) {
        self.path = path;
    }

    /// Translate every point.
    pub fn shift(&mut self, delta: Vec2) -> &mut Self {
        for p in self.path.points_mut() {
            *p += delta;
        }
        self
    }

    /// Scale every point about the origin.
    pub fn scale(&mut self, s: f64) -> &mut Self {
        for p in self.path.points_mut() {
            *p = Point::new(p.x * s, p.y * s);
        }
        self
    }

    /// Blend pointwise towards `other`: `(1 - alpha) * self + alpha * other`.
    ///
    /// Fails with [`ProgError::ShapeMismatch`] when the point counts differ.
    pub fn interpolate(&mut self, other: &VShape, alpha: f64) -> ProgResult<&mut Self> {
        if self.points().len() != other.points().len() {
            return Err(ProgError::shape_mismatch(format!(
                "cannot interpolate {} points with {} points",
                self.points().len(),
                other.points().len()
            )));
        }
        for (p, q) in self.path.points_mut().iter_mut().zip(other.points()) {
            *p = Point::new(
                (1.0 - alpha) * p.x + alpha * q.x,
                (1.0 - alpha) * p.y + alpha * q.y,
            );
        }
        Ok(self)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/vshape.rs"]
mod tests;
