//! Coupled plant/compensator vector field.

use nalgebra::DVector;

use arm_control::Controller;
use arm_dynamics::Plant;

use crate::error::{SimError, SimResult};

/// The closed-loop system: plant and compensator integrated jointly.
///
/// The full state is the concatenation `[x_sys, x_ctrl]` with the split
/// index fixed at construction. Construction validates every dimension
/// contract between the plant, the compensator, `bhat`, and the trajectory,
/// so the vector field itself never sees a mismatched configuration.
pub struct ClosedLoop {
    plant: Box<dyn Plant>,
    ctrl: Box<dyn Controller>,
    n_sys: usize,
    n_ctrl: usize,
}

impl ClosedLoop {
    pub fn new(plant: Box<dyn Plant>, ctrl: Box<dyn Controller>) -> SimResult<Self> {
        let n_sys = plant.state_dim();
        let n_ctrl = ctrl.state_dim();
        let n_out = plant.output_dim();

        let bhat = plant.bhat();
        if bhat.nrows() != plant.input_dim() {
            return Err(SimError::Config {
                what: format!(
                    "bhat has {} rows but the plant has {} input channels",
                    bhat.nrows(),
                    plant.input_dim()
                ),
            });
        }
        if bhat.ncols() != ctrl.output_dim() {
            return Err(SimError::Config {
                what: format!(
                    "bhat has {} columns but the controller has {} output channels",
                    bhat.ncols(),
                    ctrl.output_dim()
                ),
            });
        }
        if plant.trajectory().dim() != n_out {
            return Err(SimError::Config {
                what: format!(
                    "trajectory has {} channels but the plant output has {}",
                    plant.trajectory().dim(),
                    n_out
                ),
            });
        }

        // Probe both compensator maps once so shape errors surface here
        // rather than mid-integration.
        let zero_err = DVector::zeros(n_out);
        let zero_state = DVector::zeros(n_ctrl);
        let feedthrough = ctrl.g_prewrap(&zero_err).map_err(|e| SimError::Config {
            what: format!("controller feedthrough rejects the error vector: {e}"),
        })?;
        if feedthrough.len() != plant.input_dim() {
            return Err(SimError::Config {
                what: format!(
                    "controller feedthrough produces {} channels but the plant has {} inputs",
                    feedthrough.len(),
                    plant.input_dim()
                ),
            });
        }
        let dynamic = ctrl.g(&zero_state, &zero_err).map_err(|e| SimError::Config {
            what: format!("controller output rejects the rate error: {e}"),
        })?;
        if dynamic.len() != ctrl.output_dim() {
            return Err(SimError::Config {
                what: format!(
                    "controller output produces {} channels but reports {}",
                    dynamic.len(),
                    ctrl.output_dim()
                ),
            });
        }

        Ok(Self {
            plant,
            ctrl,
            n_sys,
            n_ctrl,
        })
    }

    /// Dimension of the concatenated closed-loop state.
    pub fn state_dim(&self) -> usize {
        self.n_sys + self.n_ctrl
    }

    pub fn plant(&self) -> &dyn Plant {
        self.plant.as_ref()
    }

    /// Time derivative of the full closed-loop state.
    ///
    /// Pure in `(t, x)`: the integrator may evaluate at rejected trial times
    /// and out of order, so nothing here depends on evaluation history.
    ///
    /// The error pairing is deliberate and load-bearing: the prewrapped
    /// output pairs with the reference and the raw output pairs with the
    /// reference derivative.
    pub fn derivative(&self, t: f64, x: &DVector<f64>) -> SimResult<DVector<f64>> {
        if x.len() != self.state_dim() {
            return Err(SimError::Config {
                what: format!(
                    "state has {} entries but the closed loop expects {}",
                    x.len(),
                    self.state_dim()
                ),
            });
        }

        let x_sys = x.rows(0, self.n_sys).into_owned();
        let x_ctrl = x.rows(self.n_sys, self.n_ctrl).into_owned();

        // Dual measurement views of the plant state.
        let y = self.plant.g(&x_sys);
        let yp = self.plant.g_prewrap(&x_sys);

        let trajectory = self.plant.trajectory();
        let error = trajectory.r_des(t) - yp;
        let error_dot = trajectory.r_des_dot(t) - y;

        let u = self.ctrl.g_prewrap(&error)? + self.plant.bhat() * self.ctrl.g(&x_ctrl, &error_dot)?;

        let x_dot_sys = self.plant.f(&x_sys, &u)?;
        let x_dot_ctrl = self.ctrl.f(&x_ctrl, &error_dot)?;

        let mut x_dot = DVector::zeros(self.state_dim());
        x_dot.rows_mut(0, self.n_sys).copy_from(&x_dot_sys);
        x_dot
            .rows_mut(self.n_sys, self.n_ctrl)
            .copy_from(&x_dot_ctrl);
        Ok(x_dot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arm_control::{ControlError, ControlResult};
    use arm_dynamics::{DynamicsResult, SetpointTrajectory, Trajectory};
    use nalgebra::{dvector, DMatrix};

    /// Trajectory with independently chosen value and derivative, so tests
    /// can tell the two error channels apart.
    struct SplitTrajectory {
        r: DVector<f64>,
        r_dot: DVector<f64>,
    }

    impl Trajectory for SplitTrajectory {
        fn dim(&self) -> usize {
            self.r.len()
        }
        fn r_des(&self, _t: f64) -> DVector<f64> {
            self.r.clone()
        }
        fn r_des_dot(&self, _t: f64) -> DVector<f64> {
            self.r_dot.clone()
        }
    }

    /// Plant whose derivative echoes its input and whose two output maps
    /// are deliberately different affine functions of the state.
    struct EchoPlant {
        bhat: DMatrix<f64>,
        trajectory: Box<dyn Trajectory>,
    }

    impl EchoPlant {
        fn new(bhat: DMatrix<f64>, trajectory: Box<dyn Trajectory>) -> Self {
            Self { bhat, trajectory }
        }
    }

    impl Plant for EchoPlant {
        fn state_dim(&self) -> usize {
            2
        }
        fn input_dim(&self) -> usize {
            2
        }
        fn output_dim(&self) -> usize {
            2
        }
        fn f(&self, _x_sys: &DVector<f64>, u: &DVector<f64>) -> DynamicsResult<DVector<f64>> {
            Ok(u.clone())
        }
        fn g(&self, x_sys: &DVector<f64>) -> DVector<f64> {
            2.0 * x_sys
        }
        fn g_prewrap(&self, x_sys: &DVector<f64>) -> DVector<f64> {
            x_sys.add_scalar(1.0)
        }
        fn bhat(&self) -> &DMatrix<f64> {
            &self.bhat
        }
        fn trajectory(&self) -> &dyn Trajectory {
            self.trajectory.as_ref()
        }
    }

    /// Stateless controller passing both error channels straight through.
    struct PassThroughController;

    impl Controller for PassThroughController {
        fn state_dim(&self) -> usize {
            0
        }
        fn output_dim(&self) -> usize {
            2
        }
        fn f(&self, _x: &DVector<f64>, _ed: &DVector<f64>) -> ControlResult<DVector<f64>> {
            Ok(DVector::zeros(0))
        }
        fn g(&self, _x: &DVector<f64>, error_dot: &DVector<f64>) -> ControlResult<DVector<f64>> {
            Ok(error_dot.clone())
        }
        fn g_prewrap(&self, error: &DVector<f64>) -> ControlResult<DVector<f64>> {
            Ok(error.clone())
        }
    }

    /// Controller whose two output maps both return zero.
    struct NullController {
        n_state: usize,
    }

    impl Controller for NullController {
        fn state_dim(&self) -> usize {
            self.n_state
        }
        fn output_dim(&self) -> usize {
            2
        }
        fn f(&self, x: &DVector<f64>, _ed: &DVector<f64>) -> ControlResult<DVector<f64>> {
            Ok(DVector::zeros(x.len()))
        }
        fn g(&self, _x: &DVector<f64>, _ed: &DVector<f64>) -> ControlResult<DVector<f64>> {
            Ok(DVector::zeros(2))
        }
        fn g_prewrap(&self, _error: &DVector<f64>) -> ControlResult<DVector<f64>> {
            Ok(DVector::zeros(2))
        }
    }

    /// Controller reporting more output channels than bhat provides.
    struct WideController;

    impl Controller for WideController {
        fn state_dim(&self) -> usize {
            1
        }
        fn output_dim(&self) -> usize {
            3
        }
        fn f(&self, _x: &DVector<f64>, _ed: &DVector<f64>) -> ControlResult<DVector<f64>> {
            Ok(DVector::zeros(1))
        }
        fn g(&self, _x: &DVector<f64>, _ed: &DVector<f64>) -> ControlResult<DVector<f64>> {
            Ok(DVector::zeros(3))
        }
        fn g_prewrap(&self, _error: &DVector<f64>) -> ControlResult<DVector<f64>> {
            Err(ControlError::ShapeMismatch {
                what: "unsupported error length",
            })
        }
    }

    fn split_loop(r: DVector<f64>, r_dot: DVector<f64>) -> ClosedLoop {
        let plant = EchoPlant::new(
            DMatrix::identity(2, 2),
            Box::new(SplitTrajectory { r, r_dot }),
        );
        ClosedLoop::new(Box::new(plant), Box::new(PassThroughController)).unwrap()
    }

    #[test]
    fn derivative_preserves_shape() {
        let cl = split_loop(dvector![0.0, 0.0], dvector![0.0, 0.0]);
        let x = dvector![0.1, -0.2];
        let x_dot = cl.derivative(0.0, &x).unwrap();
        assert_eq!(x_dot.len(), x.len());
    }

    #[test]
    fn derivative_is_deterministic() {
        let cl = split_loop(dvector![1.0, -0.5], dvector![0.2, 0.7]);
        let x = dvector![0.3, -0.8];
        let first = cl.derivative(1.5, &x).unwrap();
        let second = cl.derivative(1.5, &x).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn error_pairing_is_prewrap_vs_reference() {
        // With the echo plant, x_dot_sys = (r - g_prewrap(x)) + (r_dot - g(x)).
        // A swapped pairing would instead give (r - g(x)) + (r_dot - g_prewrap(x)),
        // which differs because the two output maps differ.
        let r = dvector![1.0, 2.0];
        let r_dot = dvector![-3.0, 4.0];
        let cl = split_loop(r.clone(), r_dot.clone());

        let x = dvector![0.3, -0.2];
        let x_dot = cl.derivative(0.0, &x).unwrap();

        let expected = (&r - x.add_scalar(1.0)) + (&r_dot - 2.0 * &x);
        assert_eq!(x_dot, expected);

        let swapped = (&r - 2.0 * &x) + (&r_dot - x.add_scalar(1.0));
        assert_ne!(x_dot, swapped);
    }

    #[test]
    fn perfect_tracking_gives_zero_errors() {
        // Reference chosen to match both output maps at this exact state.
        let x = dvector![0.5, -0.5];
        let r = x.add_scalar(1.0);
        let r_dot = 2.0 * &x;
        let cl = split_loop(r, r_dot);

        let x_dot = cl.derivative(3.0, &x).unwrap();
        assert_eq!(x_dot, dvector![0.0, 0.0]);
    }

    #[test]
    fn zero_output_maps_give_zero_input_regardless_of_bhat() {
        let plant = EchoPlant::new(
            DMatrix::from_row_slice(2, 2, &[10.0, -3.0, 7.0, 2.5]),
            Box::new(SetpointTrajectory::new(dvector![5.0, -5.0])),
        );
        let cl = ClosedLoop::new(Box::new(plant), Box::new(NullController { n_state: 3 })).unwrap();

        let x = dvector![0.4, 0.4, 1.0, -1.0, 0.5];
        let x_dot = cl.derivative(0.0, &x).unwrap();
        // Plant derivative echoes u, which must be exactly zero.
        assert_eq!(x_dot.rows(0, 2).into_owned(), dvector![0.0, 0.0]);
    }

    #[test]
    fn mismatched_controller_width_fails_at_construction() {
        let plant = EchoPlant::new(
            DMatrix::identity(2, 2),
            Box::new(SetpointTrajectory::new(dvector![0.0, 0.0])),
        );
        assert!(matches!(
            ClosedLoop::new(Box::new(plant), Box::new(WideController)),
            Err(SimError::Config { .. })
        ));
    }

    #[test]
    fn wrong_state_length_is_a_config_error() {
        let cl = split_loop(dvector![0.0, 0.0], dvector![0.0, 0.0]);
        let err = cl.derivative(0.0, &dvector![0.0, 0.0, 0.0]).unwrap_err();
        assert!(matches!(err, SimError::Config { .. }));
    }
}
