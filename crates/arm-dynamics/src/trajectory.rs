//! Reference trajectory generators.
//!
//! A trajectory supplies the desired output `r_des(t)` and its analytic
//! derivative `r_des_dot(t)` at arbitrary times. The integrator evaluates
//! both at trial times it may later reject, so implementations must be pure
//! functions of `t`.

use nalgebra::DVector;

/// Desired reference signal and its time derivative.
pub trait Trajectory {
    /// Number of reference channels (one per controlled joint).
    fn dim(&self) -> usize;

    /// Desired output at time `t`.
    fn r_des(&self, t: f64) -> DVector<f64>;

    /// Time derivative of the desired output at time `t`.
    fn r_des_dot(&self, t: f64) -> DVector<f64>;
}

/// Per-joint sinusoidal reference: `r_i(t) = a_i * sin(w_i * t + p_i)`.
#[derive(Clone, Debug)]
pub struct SineTrajectory {
    amplitude: DVector<f64>,
    frequency: DVector<f64>,
    phase: DVector<f64>,
}

impl SineTrajectory {
    /// Create a sinusoidal trajectory with per-joint amplitude, angular
    /// frequency, and phase. All three vectors must have the same length.
    pub fn new(
        amplitude: DVector<f64>,
        frequency: DVector<f64>,
        phase: DVector<f64>,
    ) -> Result<Self, crate::DynamicsError> {
        if amplitude.len() != frequency.len() || amplitude.len() != phase.len() {
            return Err(crate::DynamicsError::InvalidArg {
                what: "sine trajectory vectors must have equal length",
            });
        }
        Ok(Self {
            amplitude,
            frequency,
            phase,
        })
    }
}

impl Trajectory for SineTrajectory {
    fn dim(&self) -> usize {
        self.amplitude.len()
    }

    fn r_des(&self, t: f64) -> DVector<f64> {
        DVector::from_fn(self.dim(), |i, _| {
            self.amplitude[i] * (self.frequency[i] * t + self.phase[i]).sin()
        })
    }

    fn r_des_dot(&self, t: f64) -> DVector<f64> {
        DVector::from_fn(self.dim(), |i, _| {
            self.amplitude[i] * self.frequency[i] * (self.frequency[i] * t + self.phase[i]).cos()
        })
    }
}

/// Constant setpoint: `r(t) = r0`, `r_dot(t) = 0`.
#[derive(Clone, Debug)]
pub struct SetpointTrajectory {
    setpoint: DVector<f64>,
}

impl SetpointTrajectory {
    pub fn new(setpoint: DVector<f64>) -> Self {
        Self { setpoint }
    }
}

impl Trajectory for SetpointTrajectory {
    fn dim(&self) -> usize {
        self.setpoint.len()
    }

    fn r_des(&self, _t: f64) -> DVector<f64> {
        self.setpoint.clone()
    }

    fn r_des_dot(&self, _t: f64) -> DVector<f64> {
        DVector::zeros(self.setpoint.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::dvector;

    #[test]
    fn sine_rejects_mismatched_lengths() {
        let result = SineTrajectory::new(dvector![1.0, 1.0], dvector![1.0], dvector![0.0, 0.0]);
        assert!(result.is_err());
    }

    #[test]
    fn sine_derivative_matches_finite_difference() {
        let traj = SineTrajectory::new(
            dvector![0.4, 0.2],
            dvector![1.3, 0.7],
            dvector![0.0, 0.5],
        )
        .unwrap();

        let t = 2.1;
        let dt = 1e-6;
        let fd = (traj.r_des(t + dt) - traj.r_des(t - dt)) / (2.0 * dt);
        let analytic = traj.r_des_dot(t);

        for i in 0..2 {
            assert_relative_eq!(fd[i], analytic[i], epsilon = 1e-6);
        }
    }

    #[test]
    fn setpoint_has_zero_derivative() {
        let traj = SetpointTrajectory::new(dvector![0.3, -0.1]);
        assert_eq!(traj.r_des(5.0), dvector![0.3, -0.1]);
        assert_eq!(traj.r_des_dot(5.0), dvector![0.0, 0.0]);
    }
}
