//! arm-core: stable foundation for the manipulator simulator.
//!
//! Contains:
//! - numeric (finiteness checks + angle wrapping)
//! - error (shared error types)

pub mod error;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use numeric::*;
