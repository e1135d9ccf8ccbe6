//! End-to-end closed-loop runs.
//!
//! Scenarios:
//! - Nonlinear plant + VSP compensator tracking a sinusoid over 25 s
//! - Linearized plant + PD baseline
//! - Model uncertainty: perturbed plant, nominal controller tuning
//! - Saving a run to disk

use arm_sim::{simulate, ControllerType, SimRequest, SysType};

fn assert_time_span(t: &[f64], t_end: f64, grid: f64) {
    assert!(t[0].abs() < 1e-12, "run must start at t = 0");
    let last = *t.last().unwrap();
    assert!(
        (last - t_end).abs() <= grid + 1e-9,
        "run must span up to t_end, last sample at {last}"
    );
}

#[test]
fn nonlinear_vsp_tracks_reference() {
    let request = SimRequest::new(ControllerType::VspLqr, SysType::Nonlinear);
    let extracted = simulate(&request).unwrap();

    assert!(!extracted.is_empty());
    assert_time_span(&extracted.t, 25.0, 0.05);
    assert!(extracted.error_norm.iter().all(|e| e.is_finite()));

    // The arm starts 0.6 rad off the reference; the error must settle,
    // not diverge, over the run.
    let n = extracted.len();
    let third = n / 3;
    let early = extracted.max_error_norm(0, third);
    let late = extracted.max_error_norm(2 * third, n);
    assert!(
        late < 0.5 * early,
        "tracking error must decay: early {early:.4}, late {late:.4}"
    );
}

#[test]
fn linear_pd_baseline_completes() {
    let mut request = SimRequest::new(ControllerType::Pd, SysType::Linear);
    request.t_end = 5.0;
    let extracted = simulate(&request).unwrap();

    assert!(!extracted.is_empty());
    assert_time_span(&extracted.t, 5.0, 0.05);
    // Memoryless controller: no compensator state in the record.
    assert!(extracted.ctrl_norm.iter().all(|n| *n == 0.0));
}

#[test]
fn model_uncertainty_stays_bounded() {
    let mut request = SimRequest::new(ControllerType::VspLqr, SysType::Nonlinear);
    request.model_uncertainty = true;
    let extracted = simulate(&request).unwrap();

    let n = extracted.len();
    let third = n / 3;
    assert!(extracted.max_error_norm(0, n) < 2.0);
    assert!(extracted.max_error_norm(2 * third, n) < extracted.max_error_norm(0, third));
}

#[test]
fn saving_a_run_writes_manifest_and_series() {
    let dir = std::env::temp_dir().join(format!("armsim-e2e-{}", std::process::id()));

    let mut request = SimRequest::new(ControllerType::Pd, SysType::Linear);
    request.t_end = 2.0;
    request.save_dir = Some(dir.clone());
    let extracted = simulate(&request).unwrap();
    assert!(!extracted.is_empty());

    let mut found_manifest = false;
    let mut found_series = false;
    for entry in std::fs::read_dir(&dir).unwrap() {
        let run_dir = entry.unwrap().path();
        found_manifest |= run_dir.join("manifest.json").exists();
        found_series |= run_dir.join("timeseries.csv").exists();
    }
    assert!(found_manifest && found_series);

    let _ = std::fs::remove_dir_all(dir);
}
