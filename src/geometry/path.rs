//! Interleaved cubic path data.
//!
//! A path is stored as `[A0, H0_out, H1_in, A1, H1_out, H2_in, A2, ...]`: the first anchor
//! followed by one `(handle, handle, anchor)` triplet per cubic segment. Its string form is
//!
//! ```text
//! M x y C x1 y1, x2 y2, x y [C ...] [Z]
//! ```

use std::fmt;

use crate::foundation::core::{BezPath, Point};
use crate::foundation::error::{ProgError, ProgResult};
use crate::geometry::spline;

/// Cubic bezier path geometry, `0` or `3k + 1` points long.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathData {
    points: Vec<Point>,
}

impl PathData {
    /// Wrap an interleaved point array, rejecting lengths other than `0` or `3k + 1`.
    pub fn new(points: Vec<Point>) -> ProgResult<Self> {
        if !points.is_empty() && (points.len() - 1) % 3 != 0 {
            return Err(ProgError::invalid_argument(format!(
                "path data must hold 3k+1 points, got {}",
                points.len()
            )));
        }
        Ok(Self { points })
    }

    /// Build from anchors and the two handle lists of each segment.
    pub fn from_parts(anchors: &[Point], h0: &[Point], h1: &[Point]) -> ProgResult<Self> {
        if h0.len() != h1.len() {
            return Err(ProgError::invalid_argument(
                "handle lists must have the same length",
            ));
        }
        if anchors.len() != h0.len() + 1 {
            return Err(ProgError::invalid_argument(format!(
                "expected {} anchors for {} handle pairs, got {}",
                h0.len() + 1,
                h0.len(),
                anchors.len()
            )));
        }
        Ok(Self::interleave(anchors, h0, h1))
    }

    /// Interleave without validation; extra entries of the longer lists are ignored.
    pub(crate) fn interleave(anchors: &[Point], h0: &[Point], h1: &[Point]) -> Self {
        let Some(first) = anchors.first() else {
            return Self::default();
        };
        let mut points = Vec::with_capacity(3 * h0.len() + 1);
        points.push(*first);
        for ((a, b), c) in h0.iter().zip(h1).zip(&anchors[1..]) {
            points.extend_from_slice(&[*a, *b, *c]);
        }
        Self { points }
    }

    /// Wrap points whose length is already known to be `3k + 1`.
    pub(crate) fn from_points_unchecked(points: Vec<Point>) -> Self {
        debug_assert!(points.is_empty() || (points.len() - 1) % 3 == 0);
        Self { points }
    }

    /// The raw interleaved points.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Mutable access for in-place edits; the length must not change.
    pub(crate) fn points_mut(&mut self) -> &mut [Point] {
        &mut self.points
    }

    /// Consume into the raw points.
    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    /// `true` when there is no geometry.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of anchors (`0` for an empty path).
    pub fn count_anchors(&self) -> usize {
        if self.points.is_empty() {
            0
        } else {
            (self.points.len() - 1) / 3 + 1
        }
    }

    /// `true` when the first and last point coincide within tolerance.
    pub fn is_closed(&self) -> bool {
        spline::is_closed(&self.points)
    }

    /// Split back into `(anchors, h0, h1)`.
    pub fn split(&self) -> (Vec<Point>, Vec<Point>, Vec<Point>) {
        let take = |offset: usize| -> Vec<Point> {
            self.points.iter().skip(offset).step_by(3).copied().collect()
        };
        (take(0), take(1), take(2))
    }

    /// Each cubic segment as its four control points.
    pub fn segments(&self) -> impl Iterator<Item = [Point; 4]> + '_ {
        self.points
            .windows(4)
            .step_by(3)
            .map(|w| [w[0], w[1], w[2], w[3]])
    }

    /// Serialize in the `M x y C x1 y1, x2 y2, x y ... Z` form.
    ///
    /// An empty path yields an empty string.
    pub fn to_svg_string(&self) -> String {
        let Some(first) = self.points.first() else {
            return String::new();
        };
        let mut out = format!("M {} {}", num(first.x), num(first.y));
        for [_, c1, c2, p] in self.segments() {
            out.push_str(&format!(
                " C {} {}, {} {}, {} {}",
                num(c1.x),
                num(c1.y),
                num(c2.x),
                num(c2.y),
                num(p.x),
                num(p.y)
            ));
        }
        if self.is_closed() {
            out.push_str(" Z");
        }
        out
    }

    /// Convert to a `kurbo` path for rasterization.
    pub fn to_bez_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let Some(first) = self.points.first() else {
            return path;
        };
        path.move_to(*first);
        for [_, c1, c2, p] in self.segments() {
            path.curve_to(c1, c2, p);
        }
        if self.is_closed() {
            path.close_path();
        }
        path
    }
}

impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_svg_string())
    }
}

/// Shortest round-trip formatting with negative zero folded to `0`.
fn num(v: f64) -> f64 {
    if v == 0.0 { 0.0 } else { v }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/path.rs"]
mod tests;
