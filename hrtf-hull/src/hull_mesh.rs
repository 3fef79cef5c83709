//! Mutable hull state during construction

use crate::geometry::orientation_det;
use crate::preprocess::PreparedPoints;
use crate::types::{Face, Plane};

/// A face together with its cached plane equation
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct HullFace {
    pub(crate) face: Face,
    pub(crate) plane: Plane,
}

impl HullFace {
    /// Face with the plane through its three (perturbed) points, or `None`
    /// if they are collinear
    pub(crate) fn new(face: Face, points: &PreparedPoints) -> Option<Self> {
        let plane = Plane::through(
            &points.vertex(face.v0),
            &points.vertex(face.v1),
            &points.vertex(face.v2),
        )?;
        Some(Self { face, plane })
    }

    /// Homogeneous orientation determinant of `reference` against this face;
    /// positive when `reference` sees the face
    #[inline]
    pub(crate) fn orientation(&self, reference: usize, points: &PreparedPoints) -> f64 {
        orientation_det(
            points.homogeneous(reference),
            points.homogeneous(self.face.v0),
            points.homogeneous(self.face.v1),
            points.homogeneous(self.face.v2),
        )
    }

    /// Swap the last two vertices and negate the plane
    pub(crate) fn flip(&mut self) {
        self.face = self.face.flipped();
        self.plane = self.plane.flipped();
    }

    /// Flip the face if `det`, the orientation determinant of a point known
    /// to lie inside the hull, says that point can see it. Returns whether a
    /// flip happened.
    pub(crate) fn orient_with(&mut self, det: f64) -> bool {
        if det > 0.0 {
            self.flip();
            true
        } else {
            false
        }
    }
}

/// The current set of hull faces
///
/// Only the simplex initialisation and the retriangulation step write to it;
/// classification reads it.
#[derive(Debug, Clone, Default)]
pub(crate) struct HullMesh {
    faces: Vec<HullFace>,
}

impl HullMesh {
    pub(crate) fn from_faces(faces: Vec<HullFace>) -> Self {
        Self { faces }
    }

    pub(crate) fn faces(&self) -> &[HullFace] {
        &self.faces
    }

    pub(crate) fn len(&self) -> usize {
        self.faces.len()
    }

    /// Drop the faces flagged in `visible` (index-aligned with the current
    /// faces) and append `new_faces`
    pub(crate) fn replace(&mut self, visible: &[bool], new_faces: Vec<HullFace>) {
        debug_assert_eq!(visible.len(), self.faces.len());
        self.faces = std::mem::take(&mut self.faces)
            .into_iter()
            .zip(visible)
            .filter_map(|(face, &vis)| (!vis).then_some(face))
            .chain(new_faces)
            .collect();
    }

    pub(crate) fn into_faces(self) -> Vec<Face> {
        self.faces.into_iter().map(|f| f.face).collect()
    }
}
