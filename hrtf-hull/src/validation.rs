//! Structural and geometric checks on a finished hull
//!
//! None of these run during construction. They are meant for tests, for the
//! command line tool and for callers that load triangulations from disk.

use std::collections::HashMap;
use std::fmt;

use crate::geometry::centroid;
use crate::types::{Face, Plane, Vertex};

/// Outcome of [`validate`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidationReport {
    /// Every face index points into the vertex array
    pub indices_in_range: bool,
    /// Every undirected edge is shared by exactly two faces
    pub closed_manifold: bool,
    /// Every directed edge appears once, and its reverse appears once
    pub consistent_winding: bool,
    /// `V - E + F == 2` over the vertices that faces use
    pub euler_characteristic: bool,
    /// Every face normal points away from the centroid of the used vertices
    pub outward_oriented: bool,
    /// Largest signed distance of any point in front of any face plane,
    /// `0.0` if every point is behind or on every plane
    pub max_outside_distance: f64,
    /// Tolerance `max_outside_distance` was judged against
    pub epsilon: f64,
}

impl ValidationReport {
    pub fn is_convex(&self) -> bool {
        self.max_outside_distance <= self.epsilon
    }

    /// All checks passed
    pub fn is_valid(&self) -> bool {
        self.indices_in_range
            && self.closed_manifold
            && self.consistent_winding
            && self.euler_characteristic
            && self.outward_oriented
            && self.is_convex()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "indices in range:   {}", self.indices_in_range)?;
        writeln!(f, "closed manifold:    {}", self.closed_manifold)?;
        writeln!(f, "consistent winding: {}", self.consistent_winding)?;
        writeln!(f, "euler (V-E+F=2):    {}", self.euler_characteristic)?;
        writeln!(f, "outward oriented:   {}", self.outward_oriented)?;
        write!(
            f,
            "convex:             {} (max outside distance {:.3e}, eps {:.1e})",
            self.is_convex(),
            self.max_outside_distance,
            self.epsilon
        )
    }
}

/// Run every check on a triangulation of `vertices`
pub fn validate(vertices: &[Vertex], faces: &[Face], epsilon: f64) -> ValidationReport {
    if !indices_in_range(vertices, faces) {
        return ValidationReport {
            indices_in_range: false,
            closed_manifold: false,
            consistent_winding: false,
            euler_characteristic: false,
            outward_oriented: false,
            max_outside_distance: f64::INFINITY,
            epsilon,
        };
    }

    ValidationReport {
        indices_in_range: true,
        closed_manifold: check_closed_manifold(faces),
        consistent_winding: check_consistent_winding(faces),
        euler_characteristic: euler_characteristic_holds(faces),
        outward_oriented: check_outward_orientation(vertices, faces),
        max_outside_distance: max_outside_distance(vertices, faces),
        epsilon,
    }
}

fn indices_in_range(vertices: &[Vertex], faces: &[Face]) -> bool {
    faces
        .iter()
        .flat_map(|f| f.indices())
        .all(|i| i < vertices.len())
}

fn undirected_edge_counts(faces: &[Face]) -> HashMap<(usize, usize), usize> {
    let mut counts = HashMap::with_capacity(faces.len() * 3 / 2);
    for face in faces {
        for (a, b) in face.edges() {
            *counts.entry((a.min(b), a.max(b))).or_insert(0) += 1;
        }
    }
    counts
}

/// Every undirected edge belongs to exactly two faces.
///
/// An empty face list is not a closed surface.
pub fn check_closed_manifold(faces: &[Face]) -> bool {
    !faces.is_empty() && undirected_edge_counts(faces).values().all(|&c| c == 2)
}

/// Adjacent faces traverse their shared edge in opposite directions
pub fn check_consistent_winding(faces: &[Face]) -> bool {
    let mut directed: HashMap<(usize, usize), usize> = HashMap::with_capacity(faces.len() * 3);
    for face in faces {
        for edge in face.edges() {
            *directed.entry(edge).or_insert(0) += 1;
        }
    }
    directed
        .iter()
        .all(|(&(a, b), &count)| count == 1 && directed.get(&(b, a)) == Some(&1))
}

/// Euler's formula for a sphere-like surface, `V - E + F = 2`.
///
/// For a closed triangulation this is the same as `F = 2V - 4`.
pub fn euler_characteristic_holds(faces: &[Face]) -> bool {
    let mut used: Vec<usize> = faces.iter().flat_map(|f| f.indices()).collect();
    used.sort_unstable();
    used.dedup();

    let v = used.len() as i64;
    let e = undirected_edge_counts(faces).len() as i64;
    let f = faces.len() as i64;
    v - e + f == 2
}

/// Every face normal points away from the centroid of the used vertices
pub fn check_outward_orientation(vertices: &[Vertex], faces: &[Face]) -> bool {
    let mut used: Vec<usize> = faces.iter().flat_map(|f| f.indices()).collect();
    used.sort_unstable();
    used.dedup();
    let center = centroid(used.iter().map(|&i| &vertices[i]));

    faces.iter().all(|face| {
        let v0 = &vertices[face.v0];
        let n = vertices[face.v1].sub(v0).cross(&vertices[face.v2].sub(v0));
        n.dot(&face.centroid(vertices).sub(&center)) > 0.0
    })
}

/// Largest distance by which any point lies in front of any face plane.
///
/// Planes are rebuilt from `vertices` as given, so a hull computed on
/// perturbed coordinates is judged against the points the caller owns.
/// Collinear faces are skipped.
pub fn max_outside_distance(vertices: &[Vertex], faces: &[Face]) -> f64 {
    let mut worst = 0.0_f64;
    for face in faces {
        let Some(plane) = Plane::through(
            &vertices[face.v0],
            &vertices[face.v1],
            &vertices[face.v2],
        ) else {
            log::debug!("face {} is collinear, skipped in convexity check", face);
            continue;
        };

        for (i, p) in vertices.iter().enumerate() {
            if face.contains(i) {
                continue;
            }
            worst = worst.max(plane.signed_distance(p));
        }
    }
    worst
}

/// Every point lies behind or within `epsilon` of every face plane
pub fn check_convexity(vertices: &[Vertex], faces: &[Face], epsilon: f64) -> bool {
    max_outside_distance(vertices, faces) <= epsilon
}
