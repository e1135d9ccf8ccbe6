//! Adapter between the closed loop and the `ode_solvers` steppers.

use std::cell::RefCell;
use std::rc::Rc;

use nalgebra::DVector;
use ode_solvers::{Dop853, Dopri5, Rk4, System};
use tracing::debug;

use arm_results::SimRecord;

use crate::closed_loop::ClosedLoop;
use crate::error::{SimError, SimResult};
use crate::ivp::{IvpConfig, Method};

/// Wraps the closed loop for the solver callback, capturing the first
/// evaluation failure. The solver expects an infallible callback, so on
/// failure the derivative is zeroed and the stored error is re-raised after
/// the stepper returns.
struct OdeAdapter<'a> {
    closed_loop: &'a ClosedLoop,
    failure: Rc<RefCell<Option<SimError>>>,
}

impl System<f64, DVector<f64>> for OdeAdapter<'_> {
    fn system(&self, t: f64, x: &DVector<f64>, dx: &mut DVector<f64>) {
        if self.failure.borrow().is_some() {
            dx.fill(0.0);
            return;
        }
        match self.closed_loop.derivative(t, x) {
            Ok(x_dot) => dx.copy_from(&x_dot),
            Err(e) => {
                *self.failure.borrow_mut() = Some(e);
                dx.fill(0.0);
            }
        }
    }
}

/// Integrate the closed loop over the configured span.
///
/// The initial state length is checked against the closed-loop split before
/// the stepper is built, so a misconfigured run never takes a step.
pub fn integrate(
    closed_loop: &ClosedLoop,
    x0: &DVector<f64>,
    ivp: &IvpConfig,
) -> SimResult<SimRecord> {
    ivp.validate()?;
    if x0.len() != closed_loop.state_dim() {
        return Err(SimError::Config {
            what: format!(
                "initial state has {} entries but the closed loop expects {}",
                x0.len(),
                closed_loop.state_dim()
            ),
        });
    }

    let failure = Rc::new(RefCell::new(None));
    let adapter = OdeAdapter {
        closed_loop,
        failure: Rc::clone(&failure),
    };

    let (t_out, x_out) = match ivp.method {
        Method::Rk4 => {
            let mut stepper = Rk4::new(adapter, ivp.t_start, x0.clone(), ivp.t_end, ivp.t_step);
            let stats = stepper.integrate()?;
            debug!(evals = stats.num_eval, "rk4 integration finished");
            (stepper.x_out().clone(), stepper.y_out().clone())
        }
        Method::Dopri5 => {
            let mut stepper = Dopri5::new(
                adapter,
                ivp.t_start,
                ivp.t_end,
                ivp.t_step,
                x0.clone(),
                ivp.rtol,
                ivp.atol,
            );
            let stats = stepper.integrate()?;
            debug!(
                evals = stats.num_eval,
                accepted = stats.accepted_steps,
                rejected = stats.rejected_steps,
                "dopri5 integration finished"
            );
            (stepper.x_out().clone(), stepper.y_out().clone())
        }
        Method::Dop853 => {
            let mut stepper = Dop853::new(
                adapter,
                ivp.t_start,
                ivp.t_end,
                ivp.t_step,
                x0.clone(),
                ivp.rtol,
                ivp.atol,
            );
            let stats = stepper.integrate()?;
            debug!(
                evals = stats.num_eval,
                accepted = stats.accepted_steps,
                rejected = stats.rejected_steps,
                "dop853 integration finished"
            );
            (stepper.x_out().clone(), stepper.y_out().clone())
        }
    };

    if let Some(err) = failure.borrow_mut().take() {
        return Err(err);
    }

    Ok(SimRecord { t: t_out, x: x_out })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::{problem, ControllerType, SysType};
    use nalgebra::dvector;

    #[test]
    fn wrong_initial_state_fails_before_stepping() {
        let (plant, ctrl, _x0) = problem(ControllerType::VspLqr, SysType::Linear, false).unwrap();
        let closed_loop = ClosedLoop::new(plant, ctrl).unwrap();

        let ivp = IvpConfig::new(1.0).unwrap();
        let err = integrate(&closed_loop, &dvector![0.0, 0.0], &ivp).unwrap_err();
        assert!(matches!(err, SimError::Config { .. }));
    }

    #[test]
    fn short_linear_run_produces_grid_samples() {
        let (plant, ctrl, x0) = problem(ControllerType::Pd, SysType::Linear, false).unwrap();
        let closed_loop = ClosedLoop::new(plant, ctrl).unwrap();

        let ivp = IvpConfig::new(1.0).unwrap();
        let record = integrate(&closed_loop, &x0, &ivp).unwrap();

        assert!(!record.is_empty());
        assert!(record.t[0].abs() < 1e-12);
        let last = *record.t.last().unwrap();
        assert!((last - 1.0).abs() <= ivp.t_step + 1e-9);
    }
}
