use std::f64::consts::PI;

use crate::{CoreError, CoreResult};

/// Check that every value in a signal is finite, naming the offending
/// quantity in the error. Evaluation paths call this on states and inputs
/// before doing any linear algebra on them.
pub fn ensure_all_finite<'a>(
    values: impl IntoIterator<Item = &'a f64>,
    what: &'static str,
) -> CoreResult<()> {
    for v in values {
        if !v.is_finite() {
            return Err(CoreError::NonFinite { what, value: *v });
        }
    }
    Ok(())
}

/// Wrap an angle into `(-pi, pi]`.
///
/// Used by the prewrapped measurement map so the angle error fed back to the
/// controller never exceeds half a revolution.
pub fn wrap_angle(theta: f64) -> f64 {
    let two_pi = 2.0 * PI;
    let mut wrapped = theta % two_pi;
    if wrapped <= -PI {
        wrapped += two_pi;
    } else if wrapped > PI {
        wrapped -= two_pi;
    }
    wrapped
}
