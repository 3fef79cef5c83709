//! Which hull faces a candidate point can see

use rayon::prelude::*;

use crate::hull_mesh::HullMesh;
use crate::types::Vertex;

/// Visible/not-visible partition of the hull faces for one point
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Visibility {
    /// Index-aligned with the mesh faces
    pub(crate) visible: Vec<bool>,
    pub(crate) num_visible: usize,
}

impl Visibility {
    /// True when the point is inside (or on) the current hull
    pub(crate) fn is_empty(&self) -> bool {
        self.num_visible == 0
    }

    pub(crate) fn visible_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.visible
            .iter()
            .enumerate()
            .filter_map(|(i, &v)| v.then_some(i))
    }
}

/// Evaluate `dot(normal, point) + offset` for every face; a strictly
/// positive score means visible.
///
/// Single read-only pass over the faces. From `parallel_threshold` faces on,
/// the scan runs on the rayon pool; the result is the same either way.
pub(crate) fn classify(mesh: &HullMesh, point: &Vertex, parallel_threshold: usize) -> Visibility {
    let faces = mesh.faces();
    let visible: Vec<bool> = if faces.len() >= parallel_threshold {
        faces
            .par_iter()
            .map(|f| f.plane.signed_distance(point) > 0.0)
            .collect()
    } else {
        faces
            .iter()
            .map(|f| f.plane.signed_distance(point) > 0.0)
            .collect()
    };
    let num_visible = visible.iter().filter(|&&v| v).count();

    Visibility {
        visible,
        num_visible,
    }
}
