//! Linearized arm dynamics about the hanging equilibrium.

use nalgebra::{DMatrix, DVector, Matrix2};

use arm_core::{ensure_all_finite, wrap_angle};

use crate::error::{DynamicsError, DynamicsResult};
use crate::params::TwoLinkParams;
use crate::plant::Plant;
use crate::trajectory::Trajectory;

/// Linear arm: `x_dot = A x + B u`, obtained by linearizing the rigid-body
/// model at `q = qd = 0`. Shares the output maps of the nonlinear plant.
pub struct LinearTwoLink {
    a: DMatrix<f64>,
    b: DMatrix<f64>,
    bhat: DMatrix<f64>,
    trajectory: Box<dyn Trajectory>,
}

impl LinearTwoLink {
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

        let (a1, a2, a3) = params.inertia_terms();
        let (b1, b2) = params.gravity_terms();

        // Mass matrix and gravity stiffness at the equilibrium.
        let mass0 = Matrix2::new(a1 + 2.0 * a2, a3 + a2, a3 + a2, a3);
        let stiffness = Matrix2::new(b1 + b2, b2, b2, b2);
        let mass0_inv = mass0.try_inverse().ok_or_else(|| DynamicsError::Numeric {
            what: "equilibrium mass matrix is singular".to_string(),
        })?;

        let accel_q = -mass0_inv * stiffness;
        let accel_u = mass0_inv;

        let mut a = DMatrix::zeros(4, 4);
        a[(0, 2)] = 1.0;
        a[(1, 3)] = 1.0;
        for i in 0..2 {
            for j in 0..2 {
                a[(2 + i, j)] = accel_q[(i, j)];
            }
        }

        let mut b = DMatrix::zeros(4, 2);
        for i in 0..2 {
            for j in 0..2 {
                b[(2 + i, j)] = accel_u[(i, j)];
            }
        }

        Ok(Self {
            a,
            b,
            bhat,
            trajectory,
        })
    }

    pub fn a_matrix(&self) -> &DMatrix<f64> {
        &self.a
    }

    pub fn b_matrix(&self) -> &DMatrix<f64> {
        &self.b
    }
}

impl Plant for LinearTwoLink {
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
        Ok(&self.a * x_sys + &self.b * u)
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nonlinear::NonlinearTwoLink;
    use crate::trajectory::SetpointTrajectory;
    use approx::assert_relative_eq;
    use nalgebra::dvector;

    fn setpoint() -> Box<dyn Trajectory> {
        Box::new(SetpointTrajectory::new(dvector![0.0, 0.0]))
    }

    #[test]
    fn equilibrium_is_stationary() {
        let arm =
            LinearTwoLink::new(TwoLinkParams::nominal(), DMatrix::identity(2, 2), setpoint())
                .unwrap();
        let xdot = arm
            .f(&dvector![0.0, 0.0, 0.0, 0.0], &dvector![0.0, 0.0])
            .unwrap();
        for i in 0..4 {
            assert_relative_eq!(xdot[i], 0.0);
        }
    }

    #[test]
    fn matches_nonlinear_model_near_equilibrium() {
        let params = TwoLinkParams::nominal();
        let linear =
            LinearTwoLink::new(params, DMatrix::identity(2, 2), setpoint()).unwrap();
        let nonlinear =
            NonlinearTwoLink::new(params, DMatrix::identity(2, 2), setpoint()).unwrap();

        let x = dvector![1e-4, -2e-4, 3e-4, 1e-4];
        let u = dvector![1e-4, -1e-4];
        let xdot_lin = linear.f(&x, &u).unwrap();
        let xdot_nl = nonlinear.f(&x, &u).unwrap();

        for i in 0..4 {
            assert_relative_eq!(xdot_lin[i], xdot_nl[i], epsilon = 1e-6);
        }
    }

    #[test]
    fn velocity_rows_are_identity_shift() {
        let arm =
            LinearTwoLink::new(TwoLinkParams::nominal(), DMatrix::identity(2, 2), setpoint())
                .unwrap();
        let a = arm.a_matrix();
        assert_eq!(a[(0, 2)], 1.0);
        assert_eq!(a[(1, 3)], 1.0);
        assert_eq!(a[(0, 0)], 0.0);
        assert_eq!(a[(1, 1)], 0.0);
    }
}
