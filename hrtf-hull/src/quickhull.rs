//! Incremental Quickhull driver
//!
//! Based on:
//! - Barber, C.B., Dobkin, D.P., and Huhdanpaa, H.T., "The Quickhull algorithm
//!   for convex hulls," ACM Trans. on Mathematical Software, 22(4):469-483, 1996.
//!
//! Construction goes `Initializing -> Expanding -> Done | Failed`:
//! the simplex is built from the first four points, then every queued point
//! is either discarded (it sees no face) or inserted (visible faces replaced
//! by a fan from the horizon). A failure at any step abandons the whole
//! construction; there is no partial result.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::HullConfig;
use crate::horizon::trace_horizon;
use crate::hull_mesh::HullMesh;
use crate::preprocess::PreparedPoints;
use crate::queue::PendingPointQueue;
use crate::retriangulate::{Insertion, retriangulate};
use crate::simplex::{SIMPLEX_SIZE, initial_simplex};
use crate::types::{Mesh, Vertex};
use crate::visibility::classify;
use crate::{HullError, Result};

/// Construction phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
    Initializing,
    Expanding,
    Done,
    Failed,
}

/// What happened to one queued point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StepOutcome {
    /// Inside the current hull
    Discarded,
    /// Added to the hull
    Inserted { removed: usize, added: usize },
}

/// Hull under construction
pub(crate) struct HullBuilder<'a> {
    config: &'a HullConfig,
    points: PreparedPoints,
    mesh: HullMesh,
    queue: PendingPointQueue,
    /// Simplex points, then every inserted point
    references: Vec<usize>,
    phase: Phase,
}

impl<'a> HullBuilder<'a> {
    /// Build the simplex; on success the builder is `Expanding`.
    pub(crate) fn new(points: PreparedPoints, config: &'a HullConfig) -> Result<Self> {
        log::trace!("{:?}: {} points", Phase::Initializing, points.len());

        let mesh = initial_simplex(&points)?;
        let queue = PendingPointQueue::new(&points);

        Ok(Self {
            config,
            points,
            mesh,
            queue,
            references: (0..SIMPLEX_SIZE).collect(),
            phase: Phase::Expanding,
        })
    }

    pub(crate) fn phase(&self) -> Phase {
        self.phase
    }

    /// Process the next queued point. `None` once the queue is empty.
    pub(crate) fn step(&mut self) -> Option<Result<StepOutcome>> {
        if self.phase != Phase::Expanding {
            return None;
        }
        let Some(index) = self.queue.pop() else {
            self.phase = Phase::Done;
            return None;
        };

        let outcome = self.insert(index);
        if outcome.is_err() {
            self.phase = Phase::Failed;
        }
        Some(outcome)
    }

    fn insert(&mut self, index: usize) -> Result<StepOutcome> {
        let point = self.points.vertex(index);
        let visibility = classify(&self.mesh, &point, self.config.parallel_threshold);
        if visibility.is_empty() {
            return Ok(StepOutcome::Discarded);
        }

        let horizon = trace_horizon(&self.mesh, &visibility);
        log::trace!(
            "point {}: {} visible faces, horizon of {} edges",
            index,
            visibility.num_visible,
            horizon.len()
        );

        let insertion = Insertion {
            apex: index,
            visibility: &visibility,
            horizon: &horizon,
            references: &self.references,
        };
        retriangulate(&mut self.mesh, &insertion, &self.points, self.config.max_faces)?;
        self.references.push(index);

        Ok(StepOutcome::Inserted {
            removed: visibility.num_visible,
            added: horizon.len(),
        })
    }

    /// Run to completion
    pub(crate) fn run(mut self) -> Result<HullMesh> {
        let pending = self.queue.len();
        let mut inserted = 0usize;
        let mut faces_removed = 0usize;
        let mut faces_created = 0usize;

        while let Some(outcome) = self.step() {
            match outcome? {
                StepOutcome::Inserted { removed, added } => {
                    inserted += 1;
                    faces_removed += removed;
                    faces_created += added;
                }
                StepOutcome::Discarded => {}
            }
        }

        log::debug!(
            "{:?}: {} faces ({} created, {} removed), {} of {} queued points inserted",
            self.phase(),
            self.mesh.len(),
            faces_created,
            faces_removed,
            inserted,
            pending
        );
        Ok(self.mesh)
    }
}

/// Build the convex hull of `points`, perturbing with a generator seeded
/// from `config.seed`.
///
/// Faces of the result index `points`. Fewer than four points give
/// [`HullError::InsufficientPoints`]; see [`crate::Mesh::build_or_empty`]
/// for the empty-mesh fallback.
pub fn build_hull(points: &[Vertex], config: &HullConfig) -> Result<Mesh> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    build_hull_with_rng(points, config, &mut rng)
}

/// Same as [`build_hull`] with a caller-provided perturbation generator.
pub fn build_hull_with_rng<R: Rng>(
    points: &[Vertex],
    config: &HullConfig,
    rng: &mut R,
) -> Result<Mesh> {
    config.validate()?;
    if points.len() < SIMPLEX_SIZE {
        return Err(HullError::InsufficientPoints {
            found: points.len(),
        });
    }

    let prepared = PreparedPoints::new(points, config.noise_fraction, rng)?;
    let mesh = HullBuilder::new(prepared, config)?.run()?;

    Ok(Mesh::new(points.to_vec(), mesh.into_faces()))
}
