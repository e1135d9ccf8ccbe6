//! Very strictly passive rate compensator.

use arm_core::ensure_all_finite;
use nalgebra::{DMatrix, DVector};

use crate::controller::Controller;
use crate::error::{ControlError, ControlResult};

/// Linear dynamic compensator driven by the rate error:
///
/// ```text
/// x_dot = A x + B error_dot
/// g     = C x + D error_dot
/// ```
///
/// with a proportional feedthrough `g_prewrap = Kp * error` acting on the
/// prewrapped angle error. With `A = -w I`, `B = w I`, `C = Kd`, `D = 0`
/// this is a first-order filtered derivative action, which keeps the
/// compensator strictly proper and the error-to-output map very strictly
/// passive.
pub struct VspCompensator {
    a: DMatrix<f64>,
    b: DMatrix<f64>,
    c: DMatrix<f64>,
    d: DMatrix<f64>,
    kp: DMatrix<f64>,
}

impl VspCompensator {
    /// Build a compensator from its state-space and feedthrough matrices.
    ///
    /// Shapes: `A` is n x n, `B` is n x m, `C` is p x n, `D` is p x m,
    /// `Kp` is p x m, where m is the number of error channels and p the
    /// number of output channels.
    pub fn new(
        a: DMatrix<f64>,
        b: DMatrix<f64>,
        c: DMatrix<f64>,
        d: DMatrix<f64>,
        kp: DMatrix<f64>,
    ) -> ControlResult<Self> {
        if a.nrows() != a.ncols() {
            return Err(ControlError::ShapeMismatch {
                what: "A must be square",
            });
        }
        if b.nrows() != a.nrows() {
            return Err(ControlError::ShapeMismatch {
                what: "B must have as many rows as A",
            });
        }
        if c.ncols() != a.nrows() {
            return Err(ControlError::ShapeMismatch {
                what: "C must have as many columns as A has rows",
            });
        }
        if d.nrows() != c.nrows() || d.ncols() != b.ncols() {
            return Err(ControlError::ShapeMismatch {
                what: "D must be output_dim x error_dim",
            });
        }
        if kp.nrows() != c.nrows() || kp.ncols() != b.ncols() {
            return Err(ControlError::ShapeMismatch {
                what: "Kp must be output_dim x error_dim",
            });
        }
        Ok(Self { a, b, c, d, kp })
    }

    /// Compensator tuned for the nominal two-link arm.
    ///
    /// Gains come from an offline LQR design on the linearized arm; the
    /// derivative action is rolled off at 40 rad/s per joint.
    pub fn lqr_tuned() -> Self {
        let rolloff = 40.0;
        let a = DMatrix::from_diagonal_element(2, 2, -rolloff);
        let b = DMatrix::from_diagonal_element(2, 2, rolloff);
        let c = DMatrix::from_partial_diagonal(2, 2, &[22.0, 9.0]);
        let d = DMatrix::zeros(2, 2);
        let kp = DMatrix::from_partial_diagonal(2, 2, &[120.0, 45.0]);
        // Shapes above are consistent by construction.
        Self::new(a, b, c, d, kp).expect("preset compensator shapes are valid")
    }
}

impl Controller for VspCompensator {
    fn state_dim(&self) -> usize {
        self.a.nrows()
    }

    fn output_dim(&self) -> usize {
        self.c.nrows()
    }

    fn f(&self, x_ctrl: &DVector<f64>, error_dot: &DVector<f64>) -> ControlResult<DVector<f64>> {
        if x_ctrl.len() != self.a.nrows() {
            return Err(ControlError::ShapeMismatch {
                what: "compensator state has wrong length",
            });
        }
        if error_dot.len() != self.b.ncols() {
            return Err(ControlError::ShapeMismatch {
                what: "rate error has wrong length",
            });
        }
        ensure_all_finite(
            x_ctrl.iter().chain(error_dot.iter()),
            "compensator state or rate error",
        )?;
        Ok(&self.a * x_ctrl + &self.b * error_dot)
    }

    fn g(&self, x_ctrl: &DVector<f64>, error_dot: &DVector<f64>) -> ControlResult<DVector<f64>> {
        if x_ctrl.len() != self.c.ncols() || error_dot.len() != self.d.ncols() {
            return Err(ControlError::ShapeMismatch {
                what: "compensator output arguments have wrong length",
            });
        }
        Ok(&self.c * x_ctrl + &self.d * error_dot)
    }

    fn g_prewrap(&self, error: &DVector<f64>) -> ControlResult<DVector<f64>> {
        if error.len() != self.kp.ncols() {
            return Err(ControlError::ShapeMismatch {
                what: "tracking error has wrong length",
            });
        }
        Ok(&self.kp * error)
    }
}
