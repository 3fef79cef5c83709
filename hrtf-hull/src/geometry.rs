//! Geometric predicates and point-set statistics

use crate::types::Vertex;

/// Determinant of the 3x3 matrix with rows `a`, `b`, `c`
#[inline]
fn det3(a: &[f64; 3], b: &[f64; 3], c: &[f64; 3]) -> f64 {
    a[0] * (b[1] * c[2] - b[2] * c[1]) - a[1] * (b[0] * c[2] - b[2] * c[0])
        + a[2] * (b[0] * c[1] - b[1] * c[0])
}

/// Determinant of the 4x4 matrix whose rows are the homogeneous points
/// `q`, `a`, `b`, `c` (last column all ones).
///
/// Subtracting the first row from the others zeroes the last column, so the
/// determinant reduces to a 3x3 one on the differences. Coincident or exactly
/// coplanar inputs therefore give an exact zero.
///
/// Sign convention: the result is positive when `q` lies on the positive side
/// of the plane through `a`, `b`, `c` with normal `(b - a) x (c - a)`, i.e.
/// when `q` can see the triangle `(a, b, c)`.
pub fn orientation_det(q: &[f64; 4], a: &[f64; 4], b: &[f64; 4], c: &[f64; 4]) -> f64 {
    let row = |p: &[f64; 4]| [p[0] - q[0], p[1] - q[1], p[2] - q[2]];
    -det3(&row(a), &row(b), &row(c))
}

/// Per-axis value range (max - min); zero for an empty set
pub fn axis_spread(points: &[Vertex]) -> [f64; 3] {
    let mut spread = [0.0; 3];
    if points.is_empty() {
        return spread;
    }

    for (axis, s) in spread.iter_mut().enumerate() {
        let (min, max) = points
            .iter()
            .map(|p| p.axis(axis))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        *s = max - min;
    }

    spread
}

/// Arithmetic mean of a set of points; the origin for an empty set
pub fn centroid<'a, I>(points: I) -> Vertex
where
    I: IntoIterator<Item = &'a Vertex>,
{
    let (sum, n) = points
        .into_iter()
        .fold((Vertex::new(0.0, 0.0, 0.0), 0usize), |(acc, n), p| {
            (acc.add(p), n + 1)
        });
    if n == 0 { sum } else { sum.scale(1.0 / n as f64) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h(x: f64, y: f64, z: f64) -> [f64; 4] {
        [x, y, z, 1.0]
    }

    /// Plain cofactor expansion, used as a reference for the reduced form.
    fn det4_reference(m: &[[f64; 4]; 4]) -> f64 {
        let mut det = 0.0;
        for col in 0..4 {
            let mut minor = [[0.0; 3]; 3];
            for (r, row) in m.iter().skip(1).enumerate() {
                let mut k = 0;
                for (c, v) in row.iter().enumerate() {
                    if c != col {
                        minor[r][k] = *v;
                        k += 1;
                    }
                }
            }
            let sign = if col % 2 == 0 { 1.0 } else { -1.0 };
            det += sign * m[0][col] * det3(&minor[0], &minor[1], &minor[2]);
        }
        det
    }

    #[test]
    fn test_orientation_sign_convention() {
        let a = h(0.0, 0.0, 0.0);
        let b = h(1.0, 0.0, 0.0);
        let c = h(0.0, 1.0, 0.0);

        // normal (b - a) x (c - a) is +z
        assert!(orientation_det(&h(0.2, 0.2, 1.0), &a, &b, &c) > 0.0);
        assert!(orientation_det(&h(0.2, 0.2, -1.0), &a, &b, &c) < 0.0);
        // swapping two vertices flips the sign
        assert!(orientation_det(&h(0.2, 0.2, 1.0), &a, &c, &b) < 0.0);
    }

    #[test]
    fn test_orientation_matches_full_determinant() {
        let q = h(0.3, -1.2, 2.5);
        let a = h(1.0, 2.0, -0.5);
        let b = h(-0.7, 0.4, 1.1);
        let c = h(2.2, -0.3, 0.9);

        let full = det4_reference(&[q, a, b, c]);
        assert!((orientation_det(&q, &a, &b, &c) - full).abs() < 1e-12);
    }

    #[test]
    fn test_orientation_exact_zero_when_degenerate() {
        let p = h(0.1, 0.2, 0.3);
        assert_eq!(orientation_det(&p, &p, &p, &p), 0.0);

        // all on z = 0.5
        let q = h(3.0, -1.0, 0.5);
        let a = h(0.0, 0.0, 0.5);
        let b = h(1.0, 0.0, 0.5);
        let c = h(0.0, 1.0, 0.5);
        assert_eq!(orientation_det(&q, &a, &b, &c), 0.0);
    }

    #[test]
    fn test_axis_spread() {
        let points = vec![
            Vertex::new(-1.0, 0.0, 5.0),
            Vertex::new(2.0, 0.5, 5.0),
            Vertex::new(0.0, -0.5, 5.0),
        ];
        assert_eq!(axis_spread(&points), [3.0, 1.0, 0.0]);
        assert_eq!(axis_spread(&[]), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_centroid() {
        let points = [
            Vertex::new(0.0, 0.0, 0.0),
            Vertex::new(2.0, 0.0, 0.0),
            Vertex::new(0.0, 4.0, 0.0),
            Vertex::new(2.0, 4.0, 8.0),
        ];
        let c = centroid(&points);
        assert_eq!(c, Vertex::new(1.0, 2.0, 2.0));
        assert_eq!(centroid(std::iter::empty()), Vertex::new(0.0, 0.0, 0.0));
    }
}
