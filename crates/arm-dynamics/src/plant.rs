//! Plant capability trait.

use nalgebra::{DMatrix, DVector};

use crate::error::DynamicsResult;
use crate::trajectory::Trajectory;

/// A controllable plant with dual measurement views.
///
/// The plant exposes its state derivative `f`, a raw output map `g`, and a
/// prewrapped output map `g_prewrap`. The two output maps are related but
/// distinct: for the two-link arm, `g` returns joint rates while `g_prewrap`
/// returns joint angles wrapped into `(-pi, pi]`. Callers must not assume
/// the two views agree.
///
/// The plant also owns the reference trajectory it is asked to track and the
/// actuation distribution matrix `bhat` mapping controller output channels
/// onto plant input channels.
pub trait Plant {
    /// Dimension of the plant state vector.
    fn state_dim(&self) -> usize;

    /// Dimension of the plant input vector (actuator channels).
    fn input_dim(&self) -> usize;

    /// Dimension of both output maps.
    fn output_dim(&self) -> usize;

    /// State derivative `x_dot = f(x_sys, u)`.
    fn f(&self, x_sys: &DVector<f64>, u: &DVector<f64>) -> DynamicsResult<DVector<f64>>;

    /// Raw output map `y = g(x_sys)`.
    fn g(&self, x_sys: &DVector<f64>) -> DVector<f64>;

    /// Prewrapped output map `yp = g_prewrap(x_sys)`.
    fn g_prewrap(&self, x_sys: &DVector<f64>) -> DVector<f64>;

    /// Actuation distribution matrix (input_dim rows).
    fn bhat(&self) -> &DMatrix<f64>;

    /// Reference trajectory this plant is asked to track.
    fn trajectory(&self) -> &dyn Trajectory;
}
