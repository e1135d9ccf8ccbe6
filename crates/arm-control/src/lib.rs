//! Compensator implementations for the manipulator simulator.
//!
//! Provides the [`Controller`] capability trait and two concrete
//! compensators:
//! - [`VspCompensator`]: a very strictly passive rate compensator with
//!   filtered derivative action and LQR-style tuned gains
//! - [`PdController`]: a memoryless proportional-derivative law
//!
//! Controllers mirror the plant's dual-output structure: `g_prewrap` is the
//! direct feedthrough on the (prewrapped) tracking error, `g` is the
//! dynamic contribution driven by the rate error.

pub mod controller;
pub mod error;
pub mod pd;
pub mod vsp;

pub use controller::Controller;
pub use error::{ControlError, ControlResult};
pub use pd::PdController;
pub use vsp::VspCompensator;
