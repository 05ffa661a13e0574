//! Bezier evaluation and re-parameterization.
//!
//! Curves are plain control-point slices; cubics (four points) are the only degree produced by
//! path shapes, but evaluation and splitting work for any degree.

use crate::foundation::core::Point;
use crate::foundation::math::choose;

/// Evaluate the bezier curve with control `points` at parameter `t`.
///
/// Uses the Bernstein form `sum C(n,k) (1-t)^(n-k) t^k P_k`. An empty slice evaluates to the
/// origin.
pub fn calc_bezier(points: &[Point], t: f64) -> Point {
    let Some(n) = points.len().checked_sub(1) else {
        return Point::ZERO;
    };
    let mut x = 0.0;
    let mut y = 0.0;
    for (k, p) in points.iter().enumerate() {
        let w = choose(n, k) * (1.0 - t).powi((n - k) as i32) * t.powi(k as i32);
        x += w * p.x;
        y += w * p.y;
    }
    Point::new(x, y)
}

/// Control points of the sub-curve covering parameters `[a, b]`.
///
/// The curve is first re-based onto `[a, 1]`; the result is then cut at `(b - a) / (1 - a)`,
/// which is where `b` lands in the new parameterization.
pub fn split_bezier(points: &[Point], a: f64, b: f64) -> Vec<Point> {
    let Some(&last) = points.last() else {
        return Vec::new();
    };
    if a == 1.0 {
        return vec![last; points.len()];
    }
    let a_to_1: Vec<Point> = (0..points.len())
        .map(|i| calc_bezier(&points[i..], a))
        .collect();
    let end = (b - a) / (1.0 - a);
    (0..a_to_1.len())
        .map(|i| calc_bezier(&a_to_1[..=i], end))
        .collect()
}

/// The slice `[0, t]` of the cubic `p0, p1, p2, p3`.
pub fn slice_curve(t: f64, p0: Point, p1: Point, p2: Point, p3: Point) -> [Point; 4] {
    let s = split_bezier(&[p0, p1, p2, p3], 0.0, t);
    [s[0], s[1], s[2], s[3]]
}

/// Split a cubic into `count` cubics over equal parameter windows `[i/n, (i+1)/n]`.
///
/// Returns `3 * count + 1` interleaved points sharing the start anchor.
pub fn subdivide_cubic(curve: &[Point; 4], count: usize) -> Vec<Point> {
    let count = count.max(1);
    let step = 1.0 / count as f64;
    let mut out = Vec::with_capacity(3 * count + 1);
    out.push(curve[0]);
    for i in 0..count {
        let a = i as f64 * step;
        let b = if i + 1 == count {
            1.0
        } else {
            (i + 1) as f64 * step
        };
        out.extend_from_slice(&split_bezier(curve, a, b)[1..]);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/bezier.rs"]
mod tests;
