//! Result data types.

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

/// Raw trajectory sampled on the dense output grid of the integrator.
#[derive(Clone, Debug)]
pub struct SimRecord {
    /// Time points (seconds).
    pub t: Vec<f64>,
    /// Full closed-loop state snapshots, `[plant state, controller state]`.
    pub x: Vec<DVector<f64>>,
}

impl SimRecord {
    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }
}

/// Physically meaningful series derived from a raw trajectory.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExtractedStates {
    /// Time points (seconds).
    pub t: Vec<f64>,
    /// Wrapped joint angles (rad).
    pub q1: Vec<f64>,
    pub q2: Vec<f64>,
    /// Joint rates (rad/s).
    pub qd1: Vec<f64>,
    pub qd2: Vec<f64>,
    /// Reference angles (rad).
    pub r1: Vec<f64>,
    pub r2: Vec<f64>,
    /// Per-sample tracking error norm `|r - wrapped q|`.
    pub error_norm: Vec<f64>,
    /// Per-sample compensator state norm (zero for memoryless controllers).
    pub ctrl_norm: Vec<f64>,
}

impl ExtractedStates {
    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    /// Largest tracking error norm over the sample index range `[lo, hi)`.
    pub fn max_error_norm(&self, lo: usize, hi: usize) -> f64 {
        self.error_norm[lo..hi.min(self.error_norm.len())]
            .iter()
            .fold(0.0_f64, |acc, e| acc.max(*e))
    }
}

/// Metadata describing a saved run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunManifest {
    pub run_id: String,
    pub controller: String,
    pub system: String,
    pub model_uncertainty: bool,
    pub t_end_s: f64,
    pub samples: usize,
    pub timestamp: String,
}
