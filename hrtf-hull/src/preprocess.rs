//! Input conditioning: bounded perturbation and homogeneous coordinates

use rand::Rng;

use crate::geometry::axis_spread;
use crate::types::Vertex;
use crate::{HullError, Result};

/// Perturbed copy of the input, index-aligned with it
#[derive(Debug, Clone)]
pub(crate) struct PreparedPoints {
    /// `[x, y, z, 1]` per point, in unit-box coordinates
    points: Vec<[f64; 4]>,
    /// Per-axis range of the unperturbed input, after scaling
    spread: [f64; 3],
}

fn axis_minimum(points: &[Vertex]) -> Vertex {
    if points.is_empty() {
        return Vertex::new(0.0, 0.0, 0.0);
    }
    let [x, y, z] = [0, 1, 2].map(|axis| {
        points
            .iter()
            .map(|p| p.axis(axis))
            .fold(f64::INFINITY, f64::min)
    });
    Vertex::new(x, y, z)
}

impl PreparedPoints {
    /// Move the cloud to the unit box, then offset every coordinate by an
    /// independent uniform value bounded by `noise_fraction` times the spread
    /// of its axis.
    ///
    /// Each axis is translated to start at zero and all axes are divided by
    /// the largest spread, so orientation determinants neither overflow nor
    /// underflow for very large or very small clouds. The map is the same
    /// for every point, so orientations and visibility are unchanged.
    ///
    /// Exact duplicates and exactly coplanar subsets are the main source of
    /// zero orientation determinants; after the offset they have measure zero.
    /// An axis without spread is left untouched.
    pub(crate) fn new<R: Rng>(
        input: &[Vertex],
        noise_fraction: f64,
        rng: &mut R,
    ) -> Result<Self> {
        if let Some(index) = input.iter().position(|p| !p.is_finite()) {
            return Err(HullError::NonFiniteCoordinate { index });
        }

        let raw_spread = axis_spread(input);
        if let Some(axis) = raw_spread.iter().position(|s| !s.is_finite()) {
            return Err(HullError::CoordinateRange { axis });
        }

        let origin = axis_minimum(input);
        let extent = raw_spread.iter().copied().fold(0.0, f64::max);
        let unit = if extent > 0.0 { extent } else { 1.0 };
        let spread = raw_spread.map(|s| s / unit);
        let bounds = spread.map(|s| noise_fraction * s);

        let points = input
            .iter()
            .map(|p| {
                let d = p.sub(&origin);
                let mut h = [d.x / unit, d.y / unit, d.z / unit, 1.0];
                for (coord, &bound) in h.iter_mut().zip(bounds.iter()) {
                    if bound > 0.0 {
                        *coord += rng.random_range(-bound..bound);
                    }
                }
                h
            })
            .collect();

        log::debug!(
            "prepared {} points, spread ({:.3e}, {:.3e}, {:.3e})",
            input.len(),
            raw_spread[0],
            raw_spread[1],
            raw_spread[2]
        );

        Ok(Self { points, spread })
    }

    pub(crate) fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub(crate) fn homogeneous(&self, index: usize) -> &[f64; 4] {
        &self.points[index]
    }

    #[inline]
    pub(crate) fn vertex(&self, index: usize) -> Vertex {
        let [x, y, z, _] = self.points[index];
        Vertex::new(x, y, z)
    }

    pub(crate) fn spread(&self) -> [f64; 3] {
        self.spread
    }

    /// Largest axis spread, the length scale of the point cloud
    pub(crate) fn extent(&self) -> f64 {
        self.spread.iter().copied().fold(0.0, f64::max)
    }
}
