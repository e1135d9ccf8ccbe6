//! Closed-loop simulation core for the two-link manipulator.
//!
//! Provides:
//! - [`ClosedLoop`]: the coupled plant/compensator vector field
//! - [`IvpConfig`]: immutable integration parameters (span, grid, tolerances)
//! - [`scenario`]: closed-enum factory for plant/controller/initial state
//! - [`simulate`]: single-shot simulation runner over an adaptive integrator

pub mod closed_loop;
pub mod error;
pub mod integrate;
pub mod ivp;
pub mod runner;
pub mod scenario;

pub use closed_loop::ClosedLoop;
pub use error::{SimError, SimResult};
pub use integrate::integrate;
pub use ivp::{IvpConfig, Method};
pub use runner::{simulate, simulate_with, SimRequest};
pub use scenario::{problem, ControllerType, SysType};
