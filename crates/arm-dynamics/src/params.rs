//! Physical parameters of the planar two-link arm.

use crate::error::{DynamicsError, DynamicsResult};

/// Rigid-body parameters of a planar two-link arm.
///
/// Joint angles are measured from the hanging (straight-down) equilibrium,
/// so gravity torques vanish at `q = 0`.
#[derive(Clone, Copy, Debug)]
pub struct TwoLinkParams {
    /// Link masses (kg).
    pub m1: f64,
    pub m2: f64,
    /// Link lengths (m).
    pub l1: f64,
    pub l2: f64,
    /// Distance from each joint to the link center of mass (m).
    pub lc1: f64,
    pub lc2: f64,
    /// Link rotational inertias about their centers of mass (kg m^2).
    pub i1: f64,
    pub i2: f64,
    /// Gravitational acceleration (m/s^2).
    pub gravity: f64,
}

impl TwoLinkParams {
    /// Nominal arm: unit links, uniform thin rods.
    pub fn nominal() -> Self {
        Self {
            m1: 1.0,
            m2: 1.0,
            l1: 1.0,
            l2: 1.0,
            lc1: 0.5,
            lc2: 0.5,
            i1: 1.0 / 12.0,
            i2: 1.0 / 12.0,
            gravity: 9.81,
        }
    }

    /// Nominal arm with a heavier, longer second link.
    ///
    /// Used when the run requests model uncertainty: the plant integrates
    /// these parameters while the controller keeps its nominal tuning.
    pub fn perturbed() -> Self {
        let nominal = Self::nominal();
        Self {
            m2: 1.25 * nominal.m2,
            lc2: 1.1 * nominal.lc2,
            i2: 1.2 * nominal.i2,
            ..nominal
        }
    }

    pub fn validate(&self) -> DynamicsResult<()> {
        let positive = [
            self.m1, self.m2, self.l1, self.l2, self.lc1, self.lc2, self.i1, self.i2,
        ];
        if positive.iter().any(|v| !v.is_finite() || *v <= 0.0) {
            return Err(DynamicsError::InvalidArg {
                what: "arm parameters must be finite and positive",
            });
        }
        if !self.gravity.is_finite() || self.gravity < 0.0 {
            return Err(DynamicsError::InvalidArg {
                what: "gravity must be finite and non-negative",
            });
        }
        if self.lc1 > self.l1 || self.lc2 > self.l2 {
            return Err(DynamicsError::InvalidArg {
                what: "center of mass must lie on the link",
            });
        }
        Ok(())
    }

    /// Inertia lumping used by the mass matrix: `(a1, a2, a3)` with
    /// `M11 = a1 + 2 a2 cos(q2)`, `M12 = a3 + a2 cos(q2)`, `M22 = a3`.
    pub(crate) fn inertia_terms(&self) -> (f64, f64, f64) {
        let a1 = self.i1
            + self.i2
            + self.m1 * self.lc1 * self.lc1
            + self.m2 * (self.l1 * self.l1 + self.lc2 * self.lc2);
        let a2 = self.m2 * self.l1 * self.lc2;
        let a3 = self.i2 + self.m2 * self.lc2 * self.lc2;
        (a1, a2, a3)
    }

    /// Gravity torque coefficients `(b1, b2)` with
    /// `g1 = b1 sin(q1) + b2 sin(q1 + q2)` and `g2 = b2 sin(q1 + q2)`.
    pub(crate) fn gravity_terms(&self) -> (f64, f64) {
        let b1 = (self.m1 * self.lc1 + self.m2 * self.l1) * self.gravity;
        let b2 = self.m2 * self.lc2 * self.gravity;
        (b1, b2)
    }
}
