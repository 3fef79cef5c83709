//! Insertion order of the points left after the simplex

use std::collections::VecDeque;

use crate::preprocess::PreparedPoints;
use crate::simplex::SIMPLEX_SIZE;

/// Indices of the points still to insert, farthest from the centroid first.
///
/// The order is fixed once at construction and consumed front to back.
/// Distances are measured per axis relative to that axis's spread, so a
/// flattened cloud is not dominated by its long axis. Far points grow the
/// hull early, which lets most later points be discarded as interior.
#[derive(Debug, Clone)]
pub(crate) struct PendingPointQueue {
    order: VecDeque<usize>,
}

impl PendingPointQueue {
    pub(crate) fn new(points: &PreparedPoints) -> Self {
        let n = points.len();
        if n <= SIMPLEX_SIZE {
            return Self {
                order: VecDeque::new(),
            };
        }

        let remaining = SIMPLEX_SIZE..n;
        let count = remaining.len() as f64;

        let mut mean = [0.0; 3];
        for i in remaining.clone() {
            let p = points.homogeneous(i);
            for (m, c) in mean.iter_mut().zip(p.iter()) {
                *m += c;
            }
        }
        for m in &mut mean {
            *m /= count;
        }

        // an axis without spread contributes nothing, whatever the scale
        let spread = points.spread().map(|s| if s > 0.0 { s } else { 1.0 });

        let mut keyed: Vec<(usize, f64)> = remaining
            .map(|i| {
                let p = points.homogeneous(i);
                let dist: f64 = (0..3)
                    .map(|axis| ((p[axis] - mean[axis]) / spread[axis]).powi(2))
                    .sum();
                (i, dist)
            })
            .collect();

        // stable, so ties keep input order
        keyed.sort_by(|a, b| b.1.total_cmp(&a.1));

        Self {
            order: keyed.into_iter().map(|(i, _)| i).collect(),
        }
    }

    pub(crate) fn pop(&mut self) -> Option<usize> {
        self.order.pop_front()
    }

    pub(crate) fn len(&self) -> usize {
        self.order.len()
    }
}
