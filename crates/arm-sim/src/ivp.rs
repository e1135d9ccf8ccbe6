//! Immutable integration parameters.

use crate::error::{SimError, SimResult};

/// Numerical integration method.
///
/// The adaptive methods control local error against the configured
/// tolerances; `Rk4` steps on the dense output grid directly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Method {
    /// Adaptive Dormand-Prince 5(4) (default, general purpose).
    #[default]
    Dopri5,
    /// Adaptive Dormand-Prince 8(5,3) for tighter tolerances.
    Dop853,
    /// Classical fixed-step RK4.
    Rk4,
}

/// Solver configuration for one initial value problem.
///
/// Created once per run and read-only thereafter. `t_step` is the spacing of
/// the dense output grid; the adaptive methods choose their internal step
/// freely and interpolate onto this grid.
#[derive(Clone, Copy, Debug)]
pub struct IvpConfig {
    pub t_start: f64,
    pub t_end: f64,
    pub t_step: f64,
    pub rtol: f64,
    pub atol: f64,
    pub method: Method,
}

impl IvpConfig {
    /// Default configuration for a run ending at `t_end`: start at zero,
    /// 50 ms output grid, Dopri5 with rtol 1e-6 / atol 1e-9.
    pub fn new(t_end: f64) -> SimResult<Self> {
        let config = Self {
            t_start: 0.0,
            t_end,
            t_step: 0.05,
            rtol: 1e-6,
            atol: 1e-9,
            method: Method::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn with_tolerances(mut self, rtol: f64, atol: f64) -> Self {
        self.rtol = rtol;
        self.atol = atol;
        self
    }

    pub fn with_step(mut self, t_step: f64) -> Self {
        self.t_step = t_step;
        self
    }

    pub fn validate(&self) -> SimResult<()> {
        if !self.t_start.is_finite() || !self.t_end.is_finite() || self.t_end <= self.t_start {
            return Err(SimError::Config {
                what: "t_end must be finite and greater than t_start".to_string(),
            });
        }
        if !self.t_step.is_finite() || self.t_step <= 0.0 {
            return Err(SimError::Config {
                what: "t_step must be finite and positive".to_string(),
            });
        }
        if self.rtol <= 0.0 || self.atol <= 0.0 {
            return Err(SimError::Config {
                what: "tolerances must be positive".to_string(),
            });
        }
        Ok(())
    }
}
