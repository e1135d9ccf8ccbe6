//! Result extraction and export for simulation runs.
//!
//! Provides:
//! - Raw trajectory record produced by the integrator
//! - Extraction of physically meaningful series (angles, rates, tracking error)
//! - Terminal report and on-disk run export (manifest + CSV series)

pub mod error;
pub mod extract;
pub mod report;
pub mod store;
pub mod types;

pub use error::{ResultsError, ResultsResult};
pub use extract::extract_states;
pub use report::print_report;
pub use store::{build_manifest, default_store_dir, RunStore};
pub use types::{ExtractedStates, RunManifest, SimRecord};
