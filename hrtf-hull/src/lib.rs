//! Convex hull triangulation of HRTF measurement directions
//!
//! Head-related impulse responses are measured at a discrete set of
//! directions around the listener. To interpolate between them at runtime,
//! the directions are triangulated by computing the convex hull of the
//! (roughly spherical) point cloud: for any query direction, the hull face it
//! passes through names the three measurements that bound it.
//!
//! The hull is built with an incremental 3D Quickhull: the first four points
//! form a simplex, the remaining points are inserted from the farthest to the
//! nearest (relative to the centroid), and every insertion replaces the faces
//! visible from the new point by a fan connecting the horizon to it.
//!
//! Inputs are perturbed once by a small, seeded, bounded noise so that exact
//! duplicates and coplanar configurations do not produce zero determinants.
//! Output faces index the caller's original points.
//!
//! # Example
//! ```
//! use hrtf_hull::{HullConfig, Mesh, Vertex};
//!
//! let directions = vec![
//!     Vertex::from_spherical_deg(0.0, 0.0, 1.0),
//!     Vertex::from_spherical_deg(120.0, 0.0, 1.0),
//!     Vertex::from_spherical_deg(240.0, 0.0, 1.0),
//!     Vertex::from_spherical_deg(0.0, 90.0, 1.0),
//!     Vertex::from_spherical_deg(0.0, -90.0, 1.0),
//! ];
//!
//! let mesh = Mesh::build(&directions, &HullConfig::default()).unwrap();
//! assert_eq!(mesh.num_faces(), 6);
//! ```

mod export;
mod geometry;
mod horizon;
mod hull_mesh;
mod import;
mod preprocess;
mod queue;
mod quickhull;
mod retriangulate;
mod simplex;
mod types;
mod visibility;

pub mod config;
pub mod testdata;
pub mod validation;

pub use config::{HullConfig, HullConfigBuilder};
pub use export::{export_m, export_obj, write_m, write_obj};
pub use import::{load_obj_vertices, parse_obj_vertices};
pub use quickhull::{build_hull, build_hull_with_rng};
pub use types::{Face, Mesh, Plane, Vertex};
pub use validation::ValidationReport;

/// Error types for hull construction and mesh I/O
#[derive(Debug, thiserror::Error)]
pub enum HullError {
    /// Fewer than the 4 points a 3D simplex needs.
    #[error("not enough points to form a hull: {found} given, at least 4 required")]
    InsufficientPoints {
        /// Number of points supplied
        found: usize,
    },

    /// The initial simplex (or a new face) has no usable orientation, even
    /// after perturbation.
    #[error("points are coplanar or collinear even after perturbation")]
    DegenerateInput,

    /// An input coordinate is NaN or infinite.
    #[error("point {index} has a non-finite coordinate")]
    NonFiniteCoordinate {
        /// Index of the offending point
        index: usize,
    },

    /// The span of an axis (max - min) overflows to infinity.
    #[error("coordinate range along axis {axis} is not representable")]
    CoordinateRange {
        /// 0 = x, 1 = y, 2 = z
        axis: usize,
    },

    /// The face count grew past the configured ceiling.
    #[error("face limit exceeded: {faces} faces (limit {limit})")]
    FaceLimitExceeded {
        /// Configured ceiling
        limit: usize,
        /// Face count the last insertion would have produced
        faces: usize,
    },

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A vertex line of an OBJ file could not be parsed.
    #[error("line {line}: {message}")]
    Parse {
        /// 1-based line number
        line: usize,
        /// What went wrong
        message: String,
    },

    /// Reading or writing a mesh or config file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A config file is not valid JSON for [`HullConfig`].
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HullError {
    /// Whether the caller is expected to carry on with an empty mesh.
    ///
    /// Only a too-short input is; every other construction failure is
    /// all-or-nothing and should be reported.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, HullError::InsufficientPoints { .. })
    }
}

pub type Result<T> = std::result::Result<T, HullError>;

/// Numerical tolerance for floating-point comparisons, relative to the
/// extent of the point cloud.
pub(crate) const EPSILON: f64 = 1e-10;
