//! Derive physical series from a raw closed-loop trajectory.

use arm_dynamics::Plant;
use tracing::warn;

use crate::error::{ResultsError, ResultsResult};
use crate::types::{ExtractedStates, SimRecord};

/// Extract joint angles, rates, reference, and tracking error from a raw
/// trajectory.
///
/// The record holds the concatenated closed-loop state; the first
/// `plant.state_dim()` entries of each snapshot belong to the plant and the
/// remainder to the compensator. Angles are reported through the plant's
/// prewrapped output map so the series stays in `(-pi, pi]`.
pub fn extract_states(record: &SimRecord, plant: &dyn Plant) -> ResultsResult<ExtractedStates> {
    if record.is_empty() {
        return Err(ResultsError::EmptySolution {
            what: "integrator produced no samples",
        });
    }
    if record.t.len() != record.x.len() {
        return Err(ResultsError::Malformed {
            what: "time and state sample counts disagree",
        });
    }

    let n_sys = plant.state_dim();
    let n = record.len();

    let mut out = ExtractedStates {
        t: Vec::with_capacity(n),
        q1: Vec::with_capacity(n),
        q2: Vec::with_capacity(n),
        qd1: Vec::with_capacity(n),
        qd2: Vec::with_capacity(n),
        r1: Vec::with_capacity(n),
        r2: Vec::with_capacity(n),
        error_norm: Vec::with_capacity(n),
        ctrl_norm: Vec::with_capacity(n),
    };

    let mut saw_nonfinite = false;
    for (t, x) in record.t.iter().zip(record.x.iter()) {
        if x.len() < n_sys {
            return Err(ResultsError::Malformed {
                what: "state snapshot shorter than plant state",
            });
        }

        let x_sys = x.rows(0, n_sys).into_owned();
        let x_ctrl = x.rows(n_sys, x.len() - n_sys).into_owned();

        let yp = plant.g_prewrap(&x_sys);
        let y = plant.g(&x_sys);
        let r = plant.trajectory().r_des(*t);
        let error = &r - &yp;

        if !saw_nonfinite && error.iter().any(|v| !v.is_finite()) {
            warn!(time = *t, "non-finite tracking error in extracted series");
            saw_nonfinite = true;
        }

        out.t.push(*t);
        out.q1.push(yp[0]);
        out.q2.push(yp[1]);
        out.qd1.push(y[0]);
        out.qd2.push(y[1]);
        out.r1.push(r[0]);
        out.r2.push(r[1]);
        out.error_norm.push(error.norm());
        out.ctrl_norm.push(x_ctrl.norm());
    }

    Ok(out)
}
