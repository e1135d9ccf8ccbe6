//! Scenario factory: selector enums mapped onto concrete plant/controller
//! constructors plus a consistent initial closed-loop state.

use std::fmt;
use std::str::FromStr;

use nalgebra::{dvector, DMatrix, DVector};
use tracing::info;

use arm_control::{Controller, PdController, VspCompensator};
use arm_dynamics::{
    LinearTwoLink, NonlinearTwoLink, Plant, SineTrajectory, TwoLinkParams,
};

use crate::error::{SimError, SimResult};

/// Compensator selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControllerType {
    /// Very strictly passive rate compensator with LQR-style tuning.
    VspLqr,
    /// Memoryless proportional-derivative law.
    Pd,
}

impl FromStr for ControllerType {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "vsp_lqr" | "vsp" => Ok(ControllerType::VspLqr),
            "pd" => Ok(ControllerType::Pd),
            other => Err(SimError::Config {
                what: format!("unknown controller type: {other}"),
            }),
        }
    }
}

impl fmt::Display for ControllerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControllerType::VspLqr => write!(f, "VspLqr"),
            ControllerType::Pd => write!(f, "Pd"),
        }
    }
}

/// Plant model selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SysType {
    /// Full nonlinear rigid-body dynamics.
    Nonlinear,
    /// Linearization about the hanging equilibrium.
    Linear,
}

impl FromStr for SysType {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nonlinear" => Ok(SysType::Nonlinear),
            "linear" => Ok(SysType::Linear),
            other => Err(SimError::Config {
                what: format!("unknown system type: {other}"),
            }),
        }
    }
}

impl fmt::Display for SysType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SysType::Nonlinear => write!(f, "Nonlinear"),
            SysType::Linear => write!(f, "Linear"),
        }
    }
}

/// Build the plant, controller, and initial closed-loop state for a run.
///
/// With `model_uncertainty` set, the plant integrates perturbed physical
/// parameters and a derated actuation matrix while the controller keeps its
/// nominal tuning.
pub fn problem(
    controller_type: ControllerType,
    sys_type: SysType,
    model_uncertainty: bool,
) -> SimResult<(Box<dyn Plant>, Box<dyn Controller>, DVector<f64>)> {
    info!(
        controller = %controller_type,
        system = %sys_type,
        model_uncertainty,
        "building scenario"
    );

    let params = if model_uncertainty {
        TwoLinkParams::perturbed()
    } else {
        TwoLinkParams::nominal()
    };
    let bhat = if model_uncertainty {
        // Ten percent actuation derating the controller does not know about.
        DMatrix::from_diagonal_element(2, 2, 0.9)
    } else {
        DMatrix::identity(2, 2)
    };

    let trajectory = || -> SimResult<Box<dyn arm_dynamics::Trajectory>> {
        Ok(Box::new(SineTrajectory::new(
            dvector![0.4, 0.3],
            dvector![0.5, 0.8],
            dvector![0.0, 0.0],
        )?))
    };

    let plant: Box<dyn Plant> = match sys_type {
        SysType::Nonlinear => Box::new(NonlinearTwoLink::new(params, bhat, trajectory()?)?),
        SysType::Linear => Box::new(LinearTwoLink::new(params, bhat, trajectory()?)?),
    };

    let ctrl: Box<dyn Controller> = match controller_type {
        ControllerType::VspLqr => Box::new(VspCompensator::lqr_tuned()),
        ControllerType::Pd => Box::new(PdController::tuned()),
    };

    // Arm starts displaced from the reference, at rest, compensator at zero.
    let mut x0 = DVector::zeros(plant.state_dim() + ctrl.state_dim());
    x0[0] = 0.6;
    x0[1] = -0.4;
    Ok((plant, ctrl, x0))
}
