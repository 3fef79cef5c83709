//! Boundary between the visible and the surviving part of the hull

use std::collections::HashMap;

use crate::hull_mesh::HullMesh;
use crate::visibility::Visibility;

/// A horizon edge, oriented as it runs in the visible face that owns it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct HorizonEdge {
    pub(crate) from: usize,
    pub(crate) to: usize,
}

/// Undirected edge key
#[inline]
fn edge_key(a: usize, b: usize) -> (usize, usize) {
    if a < b { (a, b) } else { (b, a) }
}

/// Collect the edges shared by a visible and a not-visible face.
///
/// On a closed mesh every edge has exactly two faces, so an edge of a
/// visible face is on the horizon iff no other visible face has it. Edges
/// are reported in discovery order (visible faces in mesh order, edges in
/// winding order). For a point outside a valid hull they form one closed
/// loop; that is not checked here.
pub(crate) fn trace_horizon(mesh: &HullMesh, visibility: &Visibility) -> Vec<HorizonEdge> {
    let faces = mesh.faces();

    let mut shared: HashMap<(usize, usize), usize> =
        HashMap::with_capacity(visibility.num_visible * 3);
    for i in visibility.visible_indices() {
        for (a, b) in faces[i].face.edges() {
            *shared.entry(edge_key(a, b)).or_insert(0) += 1;
        }
    }

    let mut horizon = Vec::new();
    for i in visibility.visible_indices() {
        for (a, b) in faces[i].face.edges() {
            if shared.get(&edge_key(a, b)) == Some(&1) {
                horizon.push(HorizonEdge { from: a, to: b });
            }
        }
    }

    horizon
}
