//! Memoryless proportional-derivative law.

use arm_core::ensure_all_finite;
use nalgebra::{DMatrix, DVector};

use crate::controller::Controller;
use crate::error::{ControlError, ControlResult};

/// Static PD law with no internal state.
///
/// `g_prewrap(error) = Kp * error` and `g(_, error_dot) = Kd * error_dot`;
/// `state_dim()` is zero and `f` returns an empty vector. Useful as a
/// baseline and for exercising the zero-dimension compensator path of the
/// closed loop.
pub struct PdController {
    kp: DMatrix<f64>,
    kd: DMatrix<f64>,
}

impl PdController {
    pub fn new(kp: DMatrix<f64>, kd: DMatrix<f64>) -> ControlResult<Self> {
        if kp.shape() != kd.shape() {
            return Err(ControlError::ShapeMismatch {
                what: "Kp and Kd must have the same shape",
            });
        }
        ensure_all_finite(kp.iter().chain(kd.iter()), "PD gains")?;
        Ok(Self { kp, kd })
    }

    /// PD gains matched to the nominal two-link arm.
    pub fn tuned() -> Self {
        let kp = DMatrix::from_partial_diagonal(2, 2, &[120.0, 45.0]);
        let kd = DMatrix::from_partial_diagonal(2, 2, &[22.0, 9.0]);
        Self::new(kp, kd).expect("preset PD gains are valid")
    }
}

impl Controller for PdController {
    fn state_dim(&self) -> usize {
        0
    }

    fn output_dim(&self) -> usize {
        self.kd.nrows()
    }

    fn f(&self, x_ctrl: &DVector<f64>, _error_dot: &DVector<f64>) -> ControlResult<DVector<f64>> {
        if !x_ctrl.is_empty() {
            return Err(ControlError::ShapeMismatch {
                what: "PD controller has no internal state",
            });
        }
        Ok(DVector::zeros(0))
    }

    fn g(&self, _x_ctrl: &DVector<f64>, error_dot: &DVector<f64>) -> ControlResult<DVector<f64>> {
        if error_dot.len() != self.kd.ncols() {
            return Err(ControlError::ShapeMismatch {
                what: "rate error has wrong length",
            });
        }
        Ok(&self.kd * error_dot)
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
