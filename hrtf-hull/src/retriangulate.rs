//! Replace the visible faces by a fan from the horizon to the new point

use crate::horizon::HorizonEdge;
use crate::hull_mesh::{HullFace, HullMesh};
use crate::preprocess::PreparedPoints;
use crate::types::Face;
use crate::visibility::Visibility;
use crate::{EPSILON, HullError, Result};

/// Inputs of one retriangulation step
pub(crate) struct Insertion<'a> {
    /// Index of the point being added
    pub(crate) apex: usize,
    pub(crate) visibility: &'a Visibility,
    pub(crate) horizon: &'a [HorizonEdge],
    /// Points already on or inside the hull, in insertion order
    pub(crate) references: &'a [usize],
}

/// Orientation determinant of `face` against the first reference point that
/// is clearly off its plane.
///
/// A reference almost coplanar with the new face gives a determinant whose
/// sign is noise, so it is skipped for the next one. If every candidate is
/// below `tolerance`, the largest nonzero determinant is used; `None` means
/// all of them are exactly zero.
fn reference_det(
    face: &HullFace,
    points: &PreparedPoints,
    references: &[usize],
    tolerance: f64,
) -> Option<f64> {
    let mut best = 0.0_f64;
    for (tried, &r) in references
        .iter()
        .filter(|&&r| !face.face.contains(r))
        .enumerate()
    {
        let det = face.orientation(r, points);
        if det.abs() > tolerance {
            if tried > 0 {
                log::trace!(
                    "face {}: reference {} used after {} near-coplanar candidates",
                    face.face,
                    r,
                    tried
                );
            }
            return Some(det);
        }
        if det.abs() > best.abs() {
            best = det;
        }
    }

    if best != 0.0 {
        log::warn!(
            "face {}: no reference point above tolerance, using |det| = {:.3e}",
            face.face,
            best.abs()
        );
        Some(best)
    } else {
        None
    }
}

/// Remove the visible faces, connect every horizon edge to the apex and
/// orient each new face outward.
///
/// Fails with [`HullError::FaceLimitExceeded`] before touching the mesh if
/// the result would have more than `max_faces` faces.
pub(crate) fn retriangulate(
    mesh: &mut HullMesh,
    insertion: &Insertion<'_>,
    points: &PreparedPoints,
    max_faces: usize,
) -> Result<()> {
    let faces_after = mesh.len() - insertion.visibility.num_visible + insertion.horizon.len();
    if faces_after > max_faces {
        log::error!(
            "inserting point {} would leave {} faces (limit {})",
            insertion.apex,
            faces_after,
            max_faces
        );
        return Err(HullError::FaceLimitExceeded {
            limit: max_faces,
            faces: faces_after,
        });
    }

    let tolerance = EPSILON * points.extent().powi(3);

    let mut new_faces = Vec::with_capacity(insertion.horizon.len());
    for edge in insertion.horizon {
        let mut face = HullFace::new(Face::new(edge.from, edge.to, insertion.apex), points)
            .ok_or(HullError::DegenerateInput)?;

        let det = reference_det(&face, points, insertion.references, tolerance)
            .ok_or(HullError::DegenerateInput)?;
        face.orient_with(det);
        new_faces.push(face);
    }

    mesh.replace(&insertion.visibility.visible, new_faces);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::horizon::trace_horizon;
    use crate::simplex::initial_simplex;
    use crate::types::Vertex;
    use crate::visibility::classify;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;

    fn setup(extra: Vertex) -> (PreparedPoints, HullMesh) {
        let input = [
            Vertex::new(0.0, 0.0, 0.0),
            Vertex::new(1.0, 0.0, 0.0),
            Vertex::new(0.0, 1.0, 0.0),
            Vertex::new(0.0, 0.0, 1.0),
            extra,
        ];
        let points = PreparedPoints::new(&input, 1e-9, &mut StdRng::seed_from_u64(5)).unwrap();
        let mesh = initial_simplex(&points).unwrap();
        (points, mesh)
    }

    fn insert(mesh: &mut HullMesh, points: &PreparedPoints, max_faces: usize) -> Result<()> {
        let apex = 4;
        let visibility = classify(mesh, &points.vertex(apex), usize::MAX);
        let horizon = trace_horizon(mesh, &visibility);
        let insertion = Insertion {
            apex,
            visibility: &visibility,
            horizon: &horizon,
            references: &[0, 1, 2, 3],
        };
        retriangulate(mesh, &insertion, points, max_faces)
    }

    #[test]
    fn test_insert_point_outside_one_face() {
        let (points, mut mesh) = setup(Vertex::new(1.0, 1.0, 1.0));
        insert(&mut mesh, &points, 100).unwrap();

        // one face replaced by three
        assert_eq!(mesh.len(), 6);

        // closed, and every point is on the inner side of every face
        let mut edges: HashMap<(usize, usize), usize> = HashMap::new();
        for f in mesh.faces() {
            for (a, b) in f.face.edges() {
                *edges.entry((a.min(b), a.max(b))).or_insert(0) += 1;
            }
            for i in 0..points.len() {
                if !f.face.contains(i) {
                    assert!(f.plane.signed_distance(&points.vertex(i)) < 0.0);
                }
            }
        }
        assert!(edges.values().all(|&c| c == 2));
    }

    #[test]
    fn test_face_limit_leaves_mesh_untouched() {
        let (points, mut mesh) = setup(Vertex::new(1.0, 1.0, 1.0));
        let before: Vec<Face> = mesh.faces().iter().map(|f| f.face).collect();

        let err = insert(&mut mesh, &points, 5).unwrap_err();
        assert!(matches!(
            err,
            HullError::FaceLimitExceeded { limit: 5, faces: 6 }
        ));
        let after: Vec<Face> = mesh.faces().iter().map(|f| f.face).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_reference_skips_points_on_face() {
        let (points, mesh) = setup(Vertex::new(1.0, 1.0, 1.0));
        let face = mesh.faces()[0];
        // face 0 is (1, 2, 3) in some winding; only the origin is usable
        let det = reference_det(&face, &points, &[1, 2, 3, 0], 0.0).unwrap();
        assert!(det < 0.0);
        assert_eq!(reference_det(&face, &points, &[1, 2, 3], 0.0), None);
    }

    #[test]
    fn test_reference_falls_back_to_largest_det() {
        let (points, mesh) = setup(Vertex::new(1.0, 1.0, 1.0));
        let face = mesh.faces()[0];
        // plane x + y + z = 1: the origin sits one unit inside, (1, 1, 1) two outside
        for references in [[0, 4], [4, 0]] {
            let det = reference_det(&face, &points, &references, 10.0).unwrap();
            assert!((det - 2.0).abs() < 1e-6, "det {}", det);
        }
        let det = reference_det(&face, &points, &[0], 10.0).unwrap();
        assert!((det + 1.0).abs() < 1e-6, "det {}", det);

        // the second candidate clears the tolerance
        let det = reference_det(&face, &points, &[0, 4], 1.5).unwrap();
        assert!((det - 2.0).abs() < 1e-6, "det {}", det);
    }
}
