//! Core data types: points, faces, plane equations and the output mesh

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::HullConfig;
use crate::validation::{self, ValidationReport};

/// A 3D point or direction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vertex {
    /// Create a new vertex
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Create a vertex from spherical coordinates (azimuth, elevation in radians, radius)
    ///
    /// Azimuth is measured counter-clockwise from +x in the horizontal plane,
    /// elevation upwards from that plane towards +z.
    pub fn from_spherical(azimuth: f64, elevation: f64, radius: f64) -> Self {
        let x = radius * elevation.cos() * azimuth.cos();
        let y = radius * elevation.cos() * azimuth.sin();
        let z = radius * elevation.sin();
        Self { x, y, z }
    }

    /// Create a vertex from spherical coordinates in degrees
    pub fn from_spherical_deg(azimuth_deg: f64, elevation_deg: f64, radius: f64) -> Self {
        Self::from_spherical(azimuth_deg.to_radians(), elevation_deg.to_radians(), radius)
    }

    /// Coordinate along `axis` (0 = x, 1 = y, 2 = z)
    #[inline]
    pub fn axis(&self, axis: usize) -> f64 {
        match axis {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    /// The point with an appended `1`, as used by orientation determinants
    #[inline]
    pub fn to_homogeneous(&self) -> [f64; 4] {
        [self.x, self.y, self.z, 1.0]
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    #[inline]
    pub fn dot(&self, other: &Vertex) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn cross(&self, other: &Vertex) -> Vertex {
        Vertex {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    #[inline]
    pub fn sub(&self, other: &Vertex) -> Vertex {
        Vertex {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }

    #[inline]
    pub fn add(&self, other: &Vertex) -> Vertex {
        Vertex {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }

    #[inline]
    pub fn scale(&self, s: f64) -> Vertex {
        Vertex {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
        }
    }

    /// Euclidean length
    pub fn magnitude(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction, or `None` for a zero (or
    /// non-finite) vector
    pub fn try_normalize(&self) -> Option<Vertex> {
        let mag = self.magnitude();
        if mag > 0.0 && mag.is_finite() {
            Some(self.scale(1.0 / mag))
        } else {
            None
        }
    }

    pub fn distance(&self, other: &Vertex) -> f64 {
        self.sub(other).magnitude()
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6}, {:.6})", self.x, self.y, self.z)
    }
}

/// A triangular face: three indices into the point array, in winding order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Face {
    pub v0: usize,
    pub v1: usize,
    pub v2: usize,
}

impl Face {
    /// Create a new face from three vertex indices
    pub fn new(v0: usize, v1: usize, v2: usize) -> Self {
        Self { v0, v1, v2 }
    }

    /// Get vertex indices as an array
    pub fn indices(&self) -> [usize; 3] {
        [self.v0, self.v1, self.v2]
    }

    /// Check if this face contains a vertex index
    pub fn contains(&self, v: usize) -> bool {
        self.v0 == v || self.v1 == v || self.v2 == v
    }

    /// The three directed edges, following the winding
    pub fn edges(&self) -> [(usize, usize); 3] {
        [(self.v0, self.v1), (self.v1, self.v2), (self.v2, self.v0)]
    }

    /// Same triangle with the opposite winding (last two vertices swapped)
    pub fn flipped(&self) -> Face {
        Face::new(self.v0, self.v2, self.v1)
    }

    /// Unit normal following the right-hand rule on the winding
    pub fn normal(&self, vertices: &[Vertex]) -> Vertex {
        let v0 = &vertices[self.v0];
        let e1 = vertices[self.v1].sub(v0);
        let e2 = vertices[self.v2].sub(v0);
        e1.cross(&e2)
            .try_normalize()
            .unwrap_or(Vertex::new(0.0, 0.0, 0.0))
    }

    pub fn centroid(&self, vertices: &[Vertex]) -> Vertex {
        vertices[self.v0]
            .add(&vertices[self.v1])
            .add(&vertices[self.v2])
            .scale(1.0 / 3.0)
    }

    pub fn area(&self, vertices: &[Vertex]) -> f64 {
        let v0 = &vertices[self.v0];
        let e1 = vertices[self.v1].sub(v0);
        let e2 = vertices[self.v2].sub(v0);
        e1.cross(&e2).magnitude() / 2.0
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.v0, self.v1, self.v2)
    }
}

/// Plane equation `dot(normal, p) + offset = 0`
///
/// The positive side is the outside of the hull: a point `p` with
/// `signed_distance(p) > 0` can see the face carrying this plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub normal: Vertex,
    pub offset: f64,
}

impl Plane {
    /// Plane through three points, normal following `(b - a) x (c - a)`.
    ///
    /// Returns `None` when the points are collinear or coincident.
    pub fn through(a: &Vertex, b: &Vertex, c: &Vertex) -> Option<Plane> {
        let normal = b.sub(a).cross(&c.sub(a)).try_normalize()?;
        Some(Plane {
            normal,
            offset: -normal.dot(a),
        })
    }

    #[inline]
    pub fn signed_distance(&self, p: &Vertex) -> f64 {
        self.normal.dot(p) + self.offset
    }

    /// Same plane with the sides swapped
    pub fn flipped(&self) -> Plane {
        Plane {
            normal: self.normal.scale(-1.0),
            offset: -self.offset,
        }
    }
}

/// A finished convex hull: the caller's original points and the outward
/// oriented triangles indexing them
///
/// An empty mesh (no faces) stands for a construction that was abandoned,
/// see [`Mesh::build_or_empty`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    faces: Vec<Face>,
}

impl Mesh {
    pub(crate) fn new(vertices: Vec<Vertex>, faces: Vec<Face>) -> Self {
        Self { vertices, faces }
    }

    /// A mesh with the given points and no faces
    pub fn empty(vertices: &[Vertex]) -> Self {
        Self::new(vertices.to_vec(), Vec::new())
    }

    /// Build the convex hull of `vertices`
    pub fn build(vertices: &[Vertex], config: &HullConfig) -> crate::Result<Self> {
        crate::quickhull::build_hull(vertices, config)
    }

    /// Build the convex hull, falling back to an empty mesh on any failure.
    ///
    /// The failure is logged; callers that need to tell failures apart
    /// should use [`Mesh::build`].
    pub fn build_or_empty(vertices: &[Vertex], config: &HullConfig) -> Self {
        match Self::build(vertices, config) {
            Ok(mesh) => mesh,
            Err(e) => {
                if e.is_recoverable() {
                    log::debug!("hull skipped: {}", e);
                } else {
                    log::warn!(
                        "hull construction failed for {} points: {}",
                        vertices.len(),
                        e
                    );
                }
                Self::empty(vertices)
            }
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Number of input points (used or not)
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Sorted indices of the points referenced by at least one face
    pub fn used_vertices(&self) -> Vec<usize> {
        let mut used: Vec<usize> = self.faces.iter().flat_map(|f| f.indices()).collect();
        used.sort_unstable();
        used.dedup();
        used
    }

    /// Flat index buffer, three entries per face
    pub fn index_buffer(&self) -> Vec<u32> {
        self.faces
            .iter()
            .flat_map(|f| f.indices())
            .map(|i| i as u32)
            .collect()
    }

    /// Outward unit normal of every face
    pub fn face_normals(&self) -> Vec<Vertex> {
        self.faces.iter().map(|f| f.normal(&self.vertices)).collect()
    }

    /// Enclosed volume (divergence theorem over the faces)
    pub fn volume(&self) -> f64 {
        let mut volume = 0.0;

        for face in &self.faces {
            let v0 = &self.vertices[face.v0];
            let v1 = &self.vertices[face.v1];
            let v2 = &self.vertices[face.v2];

            // Volume of tetrahedron formed by origin and face
            volume += v0.dot(&v1.cross(v2)) / 6.0;
        }

        volume.abs()
    }

    pub fn surface_area(&self) -> f64 {
        self.faces.iter().map(|f| f.area(&self.vertices)).sum()
    }

    /// Run every structural and geometric check on this mesh
    pub fn validate(&self, epsilon: f64) -> ValidationReport {
        validation::validate(&self.vertices, &self.faces, epsilon)
    }
}
