use std::fmt;
use std::ops::Mul;

use crate::foundation::core::{Affine, Point};
use crate::foundation::error::{ProgError, ProgResult};

/// Affine 2D transform.
///
/// ```text
/// | x1 |   | a b c |   | x0 |
/// | y1 | = | d e f | * | y0 |
/// | 1  |   | 0 0 1 |   | 1  |
/// ```
///
/// Composition order matters. [`Transform::combine`] multiplies `self · other` (`other` reaches
/// a point first), [`Transform::merge`] multiplies `other · self` (`self` reaches a point
/// first). Every `then_*` builder is a `merge`: the new operation happens after the existing
/// ones.
///
/// Only [`Transform::new`] (and deserialization) validates its input. The factories, builders
/// and setters take plain numbers unchecked, so non-finite arguments give a non-finite map; use
/// [`Transform::is_finite`] or [`Transform::validated`] where that matters.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "[f64; 6]", into = "[f64; 6]")]
pub struct Transform {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
    f: f64,
}

impl Transform {
    /// The identity map.
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 0.0,
        e: 1.0,
        f: 0.0,
    };

    /// Create a transform from its six free parameters.
    ///
    /// Fails with [`ProgError::InvalidArgument`] when a parameter is NaN or infinite.
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> ProgResult<Self> {
        if [a, b, c, d, e, f].iter().any(|v| !v.is_finite()) {
            return Err(ProgError::invalid_argument(
                "transform parameters must be finite numbers",
            ));
        }
        Ok(Self { a, b, c, d, e, f })
    }

    /// `true` when every parameter is finite.
    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|v| v.is_finite())
    }

    /// `self`, or [`ProgError::InvalidArgument`] when a parameter is NaN or infinite.
    pub fn validated(self) -> ProgResult<Self> {
        let [a, b, c, d, e, f] = self.to_array();
        Self::new(a, b, c, d, e, f)
    }

    const fn raw(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// The identity map.
    pub fn identity() -> Self {
        Self::IDENTITY
    }

    /// Parameters as `(a, b, c, d, e, f)`.
    pub fn to_array(&self) -> [f64; 6] {
        [self.a, self.b, self.c, self.d, self.e, self.f]
    }

    /// Convert to a `kurbo` affine for the rasterizer.
    pub fn to_affine(&self) -> Affine {
        Affine::new([self.a, self.d, self.b, self.e, self.c, self.f])
    }

    /// Apply the matrix to a point.
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.b * y + self.c,
            self.d * x + self.e * y + self.f,
        )
    }

    /// Apply the matrix to a [`Point`].
    pub fn apply_point(&self, p: Point) -> Point {
        let (x, y) = self.apply(p.x, p.y);
        Point::new(x, y)
    }

    fn product(l: &Self, r: &Self) -> Self {
        Self::raw(
            l.a * r.a + l.b * r.d,
            l.a * r.b + l.b * r.e,
            l.a * r.c + l.b * r.f + l.c,
            l.d * r.a + l.e * r.d,
            l.d * r.b + l.e * r.e,
            l.d * r.c + l.e * r.f + l.f,
        )
    }

    /// `self = self · other` (self on the left).
    pub fn combine(&mut self, other: &Transform) -> &mut Self {
        *self = Self::product(self, other);
        self
    }

    /// `self = other · self` (self on the right).
    pub fn merge(&mut self, other: &Transform) -> &mut Self {
        *self = Self::product(other, self);
        self
    }

    // Factories. Arguments are not validated.

    /// Translation by `(dx, dy)`.
    pub fn shift(dx: f64, dy: f64) -> Self {
        Self::raw(1.0, 0.0, dx, 0.0, 1.0, dy)
    }

    /// Linear map `[[a, b], [c, d]]` that keeps `(xcenter, ycenter)` fixed.
    ///
    /// Equivalent to `shift(cx, cy) · linear · shift(-cx, -cy)`; the translation is solved
    /// directly as `(I - L) · center`.
    pub fn skew_about(xcenter: f64, ycenter: f64, a: f64, b: f64, c: f64, d: f64) -> Self {
        let (ox, oy) = if xcenter != 0.0 || ycenter != 0.0 {
            (
                (1.0 - a) * xcenter - b * ycenter,
                -c * xcenter + (1.0 - d) * ycenter,
            )
        } else {
            (0.0, 0.0)
        };
        Self::raw(a, b, ox, c, d, oy)
    }

    /// Linear map `[[a, b], [c, d]]` about the origin.
    pub fn skew(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self::skew_about(0.0, 0.0, a, b, c, d)
    }

    /// Axis-aligned scaling about a pivot.
    pub fn resize_about(xcenter: f64, ycenter: f64, xscalar: f64, yscalar: f64) -> Self {
        Self::skew_about(xcenter, ycenter, xscalar, 0.0, 0.0, yscalar)
    }

    /// Axis-aligned scaling about the origin.
    pub fn resize(xscalar: f64, yscalar: f64) -> Self {
        Self::resize_about(0.0, 0.0, xscalar, yscalar)
    }

    /// Uniform scaling about a pivot.
    pub fn scale_about(xcenter: f64, ycenter: f64, scalar: f64) -> Self {
        Self::resize_about(xcenter, ycenter, scalar, scalar)
    }

    /// Uniform scaling about the origin.
    pub fn scale(scalar: f64) -> Self {
        Self::scale_about(0.0, 0.0, scalar)
    }

    /// Rotation by `angle` degrees about a pivot.
    pub fn rotate_about(xcenter: f64, ycenter: f64, angle: f64) -> Self {
        let [a, b, c, d] = rotation_matrix(angle);
        Self::skew_about(xcenter, ycenter, a, b, c, d)
    }

    /// Rotation by `angle` degrees about the origin.
    pub fn rotate(angle: f64) -> Self {
        Self::rotate_about(0.0, 0.0, angle)
    }

    // In-place builders.

    /// Add `(ddx, ddy)` to the translation, i.e. shift after the current map.
    pub fn then_shift(&mut self, ddx: f64, ddy: f64) -> &mut Self {
        self.c += ddx;
        self.f += ddy;
        self
    }

    /// Apply a linear map after the current one.
    pub fn then_skew(&mut self, a: f64, b: f64, c: f64, d: f64) -> &mut Self {
        self.merge(&Self::skew(a, b, c, d))
    }

    /// Apply a pivoted linear map after the current one.
    pub fn then_skew_about(
        &mut self,
        xcenter: f64,
        ycenter: f64,
        a: f64,
        b: f64,
        c: f64,
        d: f64,
    ) -> &mut Self {
        self.merge(&Self::skew_about(xcenter, ycenter, a, b, c, d))
    }

    /// Apply an axis-aligned scaling after the current map.
    pub fn then_resize(&mut self, xscalar: f64, yscalar: f64) -> &mut Self {
        self.merge(&Self::resize(xscalar, yscalar))
    }

    /// Apply a pivoted axis-aligned scaling after the current map.
    pub fn then_resize_about(
        &mut self,
        xcenter: f64,
        ycenter: f64,
        xscalar: f64,
        yscalar: f64,
    ) -> &mut Self {
        self.merge(&Self::resize_about(xcenter, ycenter, xscalar, yscalar))
    }

    /// Apply a uniform scaling after the current map.
    pub fn then_scale(&mut self, scalar: f64) -> &mut Self {
        self.merge(&Self::scale(scalar))
    }

    /// Apply a pivoted uniform scaling after the current map.
    pub fn then_scale_about(&mut self, xcenter: f64, ycenter: f64, scalar: f64) -> &mut Self {
        self.merge(&Self::scale_about(xcenter, ycenter, scalar))
    }

    /// Apply a rotation (degrees) after the current map.
    pub fn then_rotate(&mut self, angle: f64) -> &mut Self {
        self.merge(&Self::rotate(angle))
    }

    /// Apply a pivoted rotation (degrees) after the current map.
    pub fn then_rotate_about(&mut self, xcenter: f64, ycenter: f64, angle: f64) -> &mut Self {
        self.merge(&Self::rotate_about(xcenter, ycenter, angle))
    }

    // Setters.

    /// Overwrite the translation part.
    pub fn set_shift(&mut self, dx: f64, dy: f64) -> &mut Self {
        self.c = dx;
        self.f = dy;
        self
    }

    /// Overwrite the linear part.
    pub fn set_skew(&mut self, a: f64, b: f64, c: f64, d: f64) -> &mut Self {
        self.a = a;
        self.b = b;
        self.d = c;
        self.e = d;
        self
    }

    /// Overwrite the linear part with an axis-aligned scaling.
    pub fn set_resize(&mut self, xscalar: f64, yscalar: f64) -> &mut Self {
        self.set_skew(xscalar, 0.0, 0.0, yscalar)
    }

    /// Overwrite the linear part with a uniform scaling.
    pub fn set_scale(&mut self, scalar: f64) -> &mut Self {
        self.set_resize(scalar, scalar)
    }

    /// Overwrite the linear part with a rotation (degrees).
    pub fn set_rotate(&mut self, angle: f64) -> &mut Self {
        let [a, b, c, d] = rotation_matrix(angle);
        self.set_skew(a, b, c, d)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl TryFrom<[f64; 6]> for Transform {
    type Error = ProgError;

    fn try_from([a, b, c, d, e, f]: [f64; 6]) -> ProgResult<Self> {
        Self::new(a, b, c, d, e, f)
    }
}

impl From<Transform> for [f64; 6] {
    fn from(t: Transform) -> Self {
        t.to_array()
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{Transform: [{}, {}, {}, {}, {}, {}]}}",
            self.a, self.b, self.c, self.d, self.e, self.f
        )
    }
}

impl Mul for Transform {
    type Output = Transform;

    fn mul(self, rhs: Transform) -> Transform {
        Transform::product(&self, &rhs)
    }
}

impl Mul<Point> for Transform {
    type Output = Point;

    fn mul(self, rhs: Point) -> Point {
        self.apply_point(rhs)
    }
}

/// Row-major `[[cos, -sin], [sin, cos]]` for an angle in degrees.
fn rotation_matrix(angle: f64) -> [f64; 4] {
    let (s, c) = angle.to_radians().sin_cos();
    [c, -s, s, c]
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/transform.rs"]
mod tests;
