//! Point sets for tests and benchmarks
//!
//! Measurement grids are stand-ins for real HRTF layouts: a Fibonacci lattice
//! has the near-uniform density of a t-design, and jittered random spheres
//! mimic grids whose loudspeaker radius varies slightly.

use crate::types::Vertex;
use rand::Rng;
use std::f64::consts::PI;

/// Generate random points near a sphere
///
/// Directions are uniform on the sphere; each radius is drawn from
/// `radius * [1 - jitter, 1 + jitter)`.
pub fn random_sphere_points<R: Rng>(
    n: usize,
    radius: f64,
    jitter: f64,
    rng: &mut R,
) -> Vec<Vertex> {
    (0..n)
        .map(|_| {
            let azimuth = rng.random::<f64>() * 2.0 * PI;
            let elevation = (rng.random::<f64>() * 2.0 - 1.0).asin();
            let r = radius * (1.0 + jitter * (2.0 * rng.random::<f64>() - 1.0));
            Vertex::from_spherical(azimuth, elevation, r)
        })
        .collect()
}

/// Generate uniformly distributed points on a sphere using Fibonacci lattice
pub fn fibonacci_sphere_points(n: usize, radius: f64) -> Vec<Vertex> {
    let golden_ratio = (1.0 + 5.0_f64.sqrt()) / 2.0;

    (0..n)
        .map(|i| {
            let theta = 2.0 * PI * (i as f64) / golden_ratio;
            let phi = ((2 * i + 1) as f64 / n as f64 - 1.0).acos();
            Vertex::new(
                radius * phi.sin() * theta.cos(),
                radius * phi.sin() * theta.sin(),
                radius * phi.cos(),
            )
        })
        .collect()
}

/// A regular azimuth/elevation grid as used by many measurement rigs:
/// `rings` elevations strictly between the poles, `per_ring` azimuths each,
/// plus both poles.
pub fn elevation_ring_points(rings: usize, per_ring: usize, radius: f64) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(rings * per_ring + 2);
    for ring in 0..rings {
        let elevation = -90.0 + 180.0 * (ring + 1) as f64 / (rings + 1) as f64;
        for k in 0..per_ring {
            let azimuth = 360.0 * k as f64 / per_ring as f64;
            vertices.push(Vertex::from_spherical_deg(azimuth, elevation, radius));
        }
    }
    vertices.push(Vertex::from_spherical_deg(0.0, 90.0, radius));
    vertices.push(Vertex::from_spherical_deg(0.0, -90.0, radius));
    vertices
}

/// Generate a cube's vertices, centred at the origin
pub fn cube_vertices(size: f64) -> Vec<Vertex> {
    let s = size / 2.0;
    vec![
        Vertex::new(-s, -s, -s),
        Vertex::new(s, -s, -s),
        Vertex::new(s, s, -s),
        Vertex::new(-s, s, -s),
        Vertex::new(-s, -s, s),
        Vertex::new(s, -s, s),
        Vertex::new(s, s, s),
        Vertex::new(-s, s, s),
    ]
}

/// Cube corners followed by `n_interior` points strictly inside the cube
pub fn cube_with_interior_points<R: Rng>(size: f64, n_interior: usize, rng: &mut R) -> Vec<Vertex> {
    let mut vertices = cube_vertices(size);
    // keep clear of the faces so interior points never touch the hull
    let s = 0.45 * size;

    vertices.extend((0..n_interior).map(|_| {
        Vertex::new(
            rng.random_range(-s..s),
            rng.random_range(-s..s),
            rng.random_range(-s..s),
        )
    }));
    vertices
}

/// Regular tetrahedron with unit edges
pub fn tetrahedron_vertices() -> Vec<Vertex> {
    vec![
        Vertex::new(0.0, 0.0, 0.0),
        Vertex::new(1.0, 0.0, 0.0),
        Vertex::new(0.5, (3.0_f64).sqrt() / 2.0, 0.0),
        Vertex::new(0.5, (3.0_f64).sqrt() / 6.0, (2.0 / 3.0_f64).sqrt()),
    ]
}

/// Generate vertices for an icosahedron
pub fn icosahedron_vertices() -> Vec<Vertex> {
    let phi = (1.0 + 5.0_f64.sqrt()) / 2.0; // Golden ratio

    vec![
        Vertex::new(-1.0, phi, 0.0),
        Vertex::new(1.0, phi, 0.0),
        Vertex::new(-1.0, -phi, 0.0),
        Vertex::new(1.0, -phi, 0.0),
        Vertex::new(0.0, -1.0, phi),
        Vertex::new(0.0, 1.0, phi),
        Vertex::new(0.0, -1.0, -phi),
        Vertex::new(0.0, 1.0, -phi),
        Vertex::new(phi, 0.0, -1.0),
        Vertex::new(phi, 0.0, 1.0),
        Vertex::new(-phi, 0.0, -1.0),
        Vertex::new(-phi, 0.0, 1.0),
    ]
}

/// The six unit axis directions
pub fn octahedron_vertices() -> Vec<Vertex> {
    vec![
        Vertex::new(1.0, 0.0, 0.0),
        Vertex::new(-1.0, 0.0, 0.0),
        Vertex::new(0.0, 1.0, 0.0),
        Vertex::new(0.0, -1.0, 0.0),
        Vertex::new(0.0, 0.0, 1.0),
        Vertex::new(0.0, 0.0, -1.0),
    ]
}
