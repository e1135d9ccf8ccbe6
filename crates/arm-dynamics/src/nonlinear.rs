//! Nonlinear rigid-body dynamics of the planar two-link arm.

use nalgebra::{DMatrix, DVector, Matrix2, Vector2};

use arm_core::{ensure_all_finite, wrap_angle};

use crate::error::{DynamicsError, DynamicsResult};
use crate::params::TwoLinkParams;
use crate::plant::Plant;
use crate::trajectory::Trajectory;

/// Full nonlinear arm: `M(q) qdd + C(q, qd) qd + g(q) = u`.
///
/// State layout is `[q1, q2, qd1, qd2]`. The raw output `g` is the joint
/// rate vector; the prewrapped output `g_prewrap` is the joint angle vector
/// wrapped into `(-pi, pi]`.
pub struct NonlinearTwoLink {
    params: TwoLinkParams,
    bhat: DMatrix<f64>,
    trajectory: Box<dyn Trajectory>,
}

impl NonlinearTwoLink {
    pub fn new(
        params: TwoLinkParams,
        bhat: DMatrix<f64>,
        trajectory: Box<dyn Trajectory>,
    ) -> DynamicsResult<Self> {
        params.validate()?;
        if bhat.nrows() != 2 {
            return Err(DynamicsError::InvalidArg {
                what: "bhat must have one row per actuator channel",
            });
        }
        if trajectory.dim() != 2 {
            return Err(DynamicsError::InvalidArg {
                what: "trajectory must have one channel per joint",
            });
        }
        Ok(Self {
            params,
            bhat,
            trajectory,
        })
    }

    /// Mass matrix at configuration `q`.
    pub fn mass_matrix(&self, q: &Vector2<f64>) -> Matrix2<f64> {
        let (a1, a2, a3) = self.params.inertia_terms();
        let c2 = q[1].cos();
        Matrix2::new(a1 + 2.0 * a2 * c2, a3 + a2 * c2, a3 + a2 * c2, a3)
    }

    /// Coriolis/centrifugal matrix at `(q, qd)`.
    fn coriolis_matrix(&self, q: &Vector2<f64>, qd: &Vector2<f64>) -> Matrix2<f64> {
        let (_, a2, _) = self.params.inertia_terms();
        let h = -a2 * q[1].sin();
        Matrix2::new(h * qd[1], h * (qd[0] + qd[1]), -h * qd[0], 0.0)
    }

    /// Gravity torque vector at `q`.
    fn gravity_torque(&self, q: &Vector2<f64>) -> Vector2<f64> {
        let (b1, b2) = self.params.gravity_terms();
        let s1 = q[0].sin();
        let s12 = (q[0] + q[1]).sin();
        Vector2::new(b1 * s1 + b2 * s12, b2 * s12)
    }
}

impl Plant for NonlinearTwoLink {
    fn state_dim(&self) -> usize {
        4
    }

    fn input_dim(&self) -> usize {
        2
    }

    fn output_dim(&self) -> usize {
        2
    }

    fn f(&self, x_sys: &DVector<f64>, u: &DVector<f64>) -> DynamicsResult<DVector<f64>> {
        if x_sys.len() != 4 {
            return Err(DynamicsError::InvalidArg {
                what: "plant state must have 4 entries",
            });
        }
        if u.len() != 2 {
            return Err(DynamicsError::InvalidArg {
                what: "plant input must have 2 entries",
            });
        }
        ensure_all_finite(x_sys.iter().chain(u.iter()), "plant state or input")?;

        let q = Vector2::new(x_sys[0], x_sys[1]);
        let qd = Vector2::new(x_sys[2], x_sys[3]);
        let torque = Vector2::new(u[0], u[1]);

        let mass = self.mass_matrix(&q);
        let rhs = torque - self.coriolis_matrix(&q, &qd) * qd - self.gravity_torque(&q);
        let qdd = mass
            .lu()
            .solve(&rhs)
            .ok_or_else(|| DynamicsError::Numeric {
                what: "mass matrix solve failed".to_string(),
            })?;

        Ok(DVector::from_column_slice(&[qd[0], qd[1], qdd[0], qdd[1]]))
    }

    fn g(&self, x_sys: &DVector<f64>) -> DVector<f64> {
        DVector::from_column_slice(&[x_sys[2], x_sys[3]])
    }

    fn g_prewrap(&self, x_sys: &DVector<f64>) -> DVector<f64> {
        DVector::from_column_slice(&[wrap_angle(x_sys[0]), wrap_angle(x_sys[1])])
    }

    fn bhat(&self) -> &DMatrix<f64> {
        &self.bhat
    }

    fn trajectory(&self) -> &dyn Trajectory {
        self.trajectory.as_ref()
    }
}
