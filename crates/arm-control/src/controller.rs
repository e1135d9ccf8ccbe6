//! Controller capability trait.

use nalgebra::DVector;

use crate::error::ControlResult;

/// A dynamic compensator with dual output maps.
///
/// The closed loop combines both maps into the plant input:
/// `u = g_prewrap(error) + bhat * g(x_ctrl, error_dot)`. Both terms are
/// always present; a variant without internal dynamics reports
/// `state_dim() == 0` and returns a zero vector from one of its maps.
pub trait Controller {
    /// Dimension of the internal compensator state.
    fn state_dim(&self) -> usize;

    /// Number of output channels fed through `bhat`.
    fn output_dim(&self) -> usize;

    /// Compensator state derivative `x_dot = f(x_ctrl, error_dot)`.
    fn f(&self, x_ctrl: &DVector<f64>, error_dot: &DVector<f64>) -> ControlResult<DVector<f64>>;

    /// Dynamic output contribution `g(x_ctrl, error_dot)`.
    fn g(&self, x_ctrl: &DVector<f64>, error_dot: &DVector<f64>) -> ControlResult<DVector<f64>>;

    /// Direct feedthrough on the prewrapped tracking error.
    fn g_prewrap(&self, error: &DVector<f64>) -> ControlResult<DVector<f64>>;
}
