//! Handle placement for cubic splines through anchor points.
//!
//! Unknowns are stored interleaved as `[H0_0, H1_0, H0_1, H1_1, ...]`, where `H0_i` is the
//! outgoing handle after anchor `i` and `H1_i` the incoming handle before anchor `i + 1`.
//! See <https://www.particleincell.com/2012/bezier-splines/> for the derivation of the rows.

use nalgebra::DMatrix;

use crate::foundation::core::Point;
use crate::foundation::error::{ProgError, ProgResult};

/// Distance under which the first and last anchor count as the same point.
pub const ZERO_TOLERANCE: f64 = 0.1;

/// Outgoing and incoming handle lists, one entry per curve segment.
pub type Handles = (Vec<Point>, Vec<Point>);

/// `true` when the first and last point coincide within [`ZERO_TOLERANCE`].
pub fn is_closed(points: &[Point]) -> bool {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) if points.len() > 1 => first.distance(*last) <= ZERO_TOLERANCE,
        _ => false,
    }
}

/// Handles at 1/3 and 2/3 of each straight segment.
pub fn get_flat_handles(anchors: &[Point]) -> Handles {
    anchors
        .windows(2)
        .map(|w| (w[0].lerp(w[1], 1.0 / 3.0), w[0].lerp(w[1], 2.0 / 3.0)))
        .unzip()
}

/// Handles that make the spline through `anchors` C1 and C2 continuous.
///
/// Open paths solve a banded system; closed paths (see [`is_closed`]) add wrap-around rows and
/// are solved densely.
pub fn get_smooth_handles(anchors: &[Point]) -> ProgResult<Handles> {
    let segments = anchors.len().saturating_sub(1);
    if segments == 0 {
        return Ok((Vec::new(), Vec::new()));
    }
    let size = 2 * segments;

    let mut rhs = vec![Point::ZERO; size];
    for (i, p) in anchors.iter().enumerate().skip(1) {
        rhs[2 * i - 1] = Point::new(2.0 * p.x, 2.0 * p.y);
    }
    rhs[0] = anchors[0];
    rhs[size - 1] = anchors[segments];

    let band = open_system(segments);
    let solution = if is_closed(anchors) {
        let mut matrix = band.to_dense();
        // Second derivative continuity across the seam.
        let last = size - 1;
        for (col, v) in [(0, 2.0), (1, -1.0), (size - 2, 1.0), (size - 1, -2.0)] {
            matrix[(last, col)] = v;
        }
        // First derivative continuity across the seam.
        matrix.row_mut(0).fill(0.0);
        for col in [0, size - 1] {
            matrix[(0, col)] = 1.0;
        }
        rhs[0] = Point::new(2.0 * anchors[0].x, 2.0 * anchors[0].y);
        rhs[last] = Point::ZERO;
        solve_dense(matrix, &rhs)?
    } else {
        band.solve(&rhs)?
    };

    Ok(solution
        .chunks_exact(2)
        .map(|pair| (pair[0], pair[1]))
        .unzip())
}

/// Coefficient matrix for the open-path system, one lower band deeper than it is wide above.
fn open_system(segments: usize) -> BandedMatrix {
    let size = 2 * segments;
    let mut m = BandedMatrix::zeros(size, 2, 1);
    for j in 0..size {
        m.set(j, j, if j % 2 == 0 { 2.0 } else { 1.0 });
    }
    for j in 1..size {
        m.set(j - 1, j, if j % 2 == 1 { -1.0 } else { 1.0 });
    }
    for j in (1..size.saturating_sub(2)).step_by(2) {
        m.set(j + 1, j, -2.0);
    }
    for j in (0..size.saturating_sub(3)).step_by(2) {
        m.set(j + 2, j, 1.0);
    }
    m.set(size - 1, size - 2, -1.0);
    m.set(size - 1, size - 1, 2.0);
    m
}

/// Square matrix stored by diagonals: `lower` bands below the main one, `upper` above.
#[derive(Clone, Debug)]
pub(crate) struct BandedMatrix {
    size: usize,
    lower: usize,
    upper: usize,
    data: Vec<f64>,
}

impl BandedMatrix {
    pub(crate) fn zeros(size: usize, lower: usize, upper: usize) -> Self {
        Self {
            size,
            lower,
            upper,
            data: vec![0.0; size * (lower + upper + 1)],
        }
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.size || col >= self.size || col + self.lower < row || row + self.upper < col
        {
            return None;
        }
        Some(row * (self.lower + self.upper + 1) + (col + self.lower - row))
    }

    pub(crate) fn get(&self, row: usize, col: usize) -> f64 {
        self.index(row, col).map_or(0.0, |i| self.data[i])
    }

    /// Writes outside the band are ignored.
    pub(crate) fn set(&mut self, row: usize, col: usize, value: f64) {
        if let Some(i) = self.index(row, col) {
            self.data[i] = value;
        }
    }

    pub(crate) fn to_dense(&self) -> DMatrix<f64> {
        DMatrix::from_fn(self.size, self.size, |r, c| self.get(r, c))
    }

    /// Gaussian elimination restricted to the band.
    ///
    /// No pivoting: the spline systems are diagonally dominant enough that fill-in never leaves
    /// the band.
    pub(crate) fn solve(&self, rhs: &[Point]) -> ProgResult<Vec<Point>> {
        if rhs.len() != self.size {
            return Err(ProgError::invalid_argument(
                "banded solve: right-hand side length does not match the matrix",
            ));
        }
        let mut m = self.clone();
        let mut b: Vec<(f64, f64)> = rhs.iter().map(|p| (p.x, p.y)).collect();
        let n = self.size;

        for k in 0..n {
            let pivot = m.get(k, k);
            if pivot.abs() < 1e-12 {
                return Err(ProgError::invalid_argument(
                    "banded solve: singular system",
                ));
            }
            for i in (k + 1)..n.min(k + m.lower + 1) {
                let factor = m.get(i, k) / pivot;
                if factor == 0.0 {
                    continue;
                }
                for j in k..n.min(k + m.upper + 1) {
                    let v = m.get(i, j) - factor * m.get(k, j);
                    m.set(i, j, v);
                }
                b[i].0 -= factor * b[k].0;
                b[i].1 -= factor * b[k].1;
            }
        }

        let mut x = vec![(0.0, 0.0); n];
        for i in (0..n).rev() {
            let (mut sx, mut sy) = b[i];
            for j in (i + 1)..n.min(i + m.upper + 1) {
                sx -= m.get(i, j) * x[j].0;
                sy -= m.get(i, j) * x[j].1;
            }
            let d = m.get(i, i);
            x[i] = (sx / d, sy / d);
        }
        Ok(x.into_iter().map(|(x, y)| Point::new(x, y)).collect())
    }
}

fn solve_dense(matrix: DMatrix<f64>, rhs: &[Point]) -> ProgResult<Vec<Point>> {
    let b = DMatrix::from_fn(rhs.len(), 2, |r, c| if c == 0 { rhs[r].x } else { rhs[r].y });
    let x = matrix
        .lu()
        .solve(&b)
        .ok_or_else(|| ProgError::invalid_argument("closed spline system is singular"))?;
    Ok((0..rhs.len())
        .map(|r| Point::new(x[(r, 0)], x[(r, 1)]))
        .collect())
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/spline.rs"]
mod tests;
