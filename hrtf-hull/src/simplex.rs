//! Initial tetrahedron from the first four points

use crate::hull_mesh::{HullFace, HullMesh};
use crate::preprocess::PreparedPoints;
use crate::types::Face;
use crate::{HullError, Result};

/// Number of points consumed by the simplex
pub(crate) const SIMPLEX_SIZE: usize = 4;

/// Face `k` is made of every simplex point except `k`
const SIMPLEX_FACES: [[usize; 3]; SIMPLEX_SIZE] = [[1, 2, 3], [0, 2, 3], [0, 1, 3], [0, 1, 2]];

/// Build the four faces of the tetrahedron on points 0..4.
///
/// Face `k` omits point `k`, and is flipped whenever point `k` can see it,
/// so no simplex vertex sees its opposite face. Fails with
/// [`HullError::DegenerateInput`] if the four points are coplanar (some
/// face has no plane, or a zero orientation determinant).
pub(crate) fn initial_simplex(points: &PreparedPoints) -> Result<HullMesh> {
    if points.len() < SIMPLEX_SIZE {
        return Err(HullError::InsufficientPoints {
            found: points.len(),
        });
    }

    let mut faces = Vec::with_capacity(SIMPLEX_SIZE);
    let mut flips = 0;

    for (omitted, &[v0, v1, v2]) in SIMPLEX_FACES.iter().enumerate() {
        let mut face =
            HullFace::new(Face::new(v0, v1, v2), points).ok_or(HullError::DegenerateInput)?;

        let det = face.orientation(omitted, points);
        if det == 0.0 || !det.is_finite() {
            log::debug!("simplex face {} has zero orientation determinant", face.face);
            return Err(HullError::DegenerateInput);
        }
        if face.orient_with(det) {
            flips += 1;
        }
        faces.push(face);
    }

    log::debug!("initial simplex built, {} of 4 faces flipped", flips);

    Ok(HullMesh::from_faces(faces))
}
