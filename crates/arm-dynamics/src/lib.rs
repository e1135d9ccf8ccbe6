//! Plant-side models for the two-link manipulator simulator.
//!
//! Provides:
//! - The [`Plant`] capability trait (dynamics + dual measurement maps)
//! - Nonlinear rigid-body dynamics of a planar two-link arm
//! - A linearization of the same arm about its hanging equilibrium
//! - Reference trajectory generators

pub mod error;
pub mod linear;
pub mod nonlinear;
pub mod params;
pub mod plant;
pub mod trajectory;

pub use error::{DynamicsError, DynamicsResult};
pub use linear::LinearTwoLink;
pub use nonlinear::NonlinearTwoLink;
pub use params::TwoLinkParams;
pub use plant::Plant;
pub use trajectory::{SetpointTrajectory, SineTrajectory, Trajectory};
