//! Single-shot simulation runner.

use std::path::PathBuf;

use tracing::{info, info_span};

use arm_results::{build_manifest, extract_states, print_report, ExtractedStates, RunStore};

use crate::closed_loop::ClosedLoop;
use crate::error::SimResult;
use crate::integrate::integrate;
use crate::ivp::IvpConfig;
use crate::scenario::{problem, ControllerType, SysType};

/// Everything that selects and shapes one simulation run.
#[derive(Clone, Debug)]
pub struct SimRequest {
    pub controller: ControllerType,
    pub system: SysType,
    pub model_uncertainty: bool,
    pub t_end: f64,
    /// Print a terminal report after the run.
    pub plot: bool,
    /// Save manifest + series under this directory when set.
    pub save_dir: Option<PathBuf>,
}

impl SimRequest {
    pub fn new(controller: ControllerType, system: SysType) -> Self {
        Self {
            controller,
            system,
            model_uncertainty: false,
            t_end: 25.0,
            plot: false,
            save_dir: None,
        }
    }
}

/// Run one closed-loop simulation with default solver settings.
///
/// Builds the IVP configuration and the scenario, integrates, optionally
/// reports/saves, and returns the extracted state series. Any configuration
/// or integration failure aborts the run; there is no retry.
pub fn simulate(request: &SimRequest) -> SimResult<ExtractedStates> {
    let ivp = IvpConfig::new(request.t_end)?;
    simulate_with(request, &ivp)
}

/// Run one closed-loop simulation with an explicit solver configuration.
pub fn simulate_with(request: &SimRequest, ivp: &IvpConfig) -> SimResult<ExtractedStates> {
    let span = info_span!(
        "simulate",
        controller = %request.controller,
        system = %request.system,
        t_end = request.t_end
    );
    let _guard = span.enter();

    let (plant, ctrl, x0) = problem(request.controller, request.system, request.model_uncertainty)?;
    let closed_loop = ClosedLoop::new(plant, ctrl)?;

    let record = integrate(&closed_loop, &x0, ivp)?;
    info!(samples = record.len(), "integration complete");

    let extracted = extract_states(&record, closed_loop.plant())?;

    if request.plot {
        print_report(&extracted);
    }
    if let Some(dir) = &request.save_dir {
        let manifest = build_manifest(
            &request.controller.to_string(),
            &request.system.to_string(),
            request.model_uncertainty,
            request.t_end,
            &extracted,
        );
        let store = RunStore::new(dir.clone())?;
        store.save_run(&manifest, &extracted)?;
    }

    Ok(extracted)
}
