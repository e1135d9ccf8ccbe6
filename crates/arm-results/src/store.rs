//! On-disk run storage: manifest + CSV time series.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::info;

use crate::error::ResultsResult;
use crate::types::{ExtractedStates, RunManifest};

#[derive(Clone)]
pub struct RunStore {
    root_dir: PathBuf,
}

impl RunStore {
    pub fn new(root_dir: PathBuf) -> ResultsResult<Self> {
        if !root_dir.exists() {
            fs::create_dir_all(&root_dir)?;
        }
        Ok(Self { root_dir })
    }

    fn run_dir(&self, run_id: &str) -> PathBuf {
        self.root_dir.join(run_id)
    }

    pub fn has_run(&self, run_id: &str) -> bool {
        self.run_dir(run_id).join("manifest.json").exists()
    }

    /// Write the manifest and the extracted series under `<root>/<run_id>/`.
    pub fn save_run(
        &self,
        manifest: &RunManifest,
        extracted: &ExtractedStates,
    ) -> ResultsResult<PathBuf> {
        let run_dir = self.run_dir(&manifest.run_id);
        fs::create_dir_all(&run_dir)?;

        let manifest_json = serde_json::to_string_pretty(manifest)?;
        fs::write(run_dir.join("manifest.json"), manifest_json)?;

        let mut csv = String::from("time_s,q1_rad,q2_rad,qd1_rad_s,qd2_rad_s,r1_rad,r2_rad,error_norm,ctrl_norm\n");
        for i in 0..extracted.len() {
            csv.push_str(&format!(
                "{},{},{},{},{},{},{},{},{}\n",
                extracted.t[i],
                extracted.q1[i],
                extracted.q2[i],
                extracted.qd1[i],
                extracted.qd2[i],
                extracted.r1[i],
                extracted.r2[i],
                extracted.error_norm[i],
                extracted.ctrl_norm[i]
            ));
        }
        fs::write(run_dir.join("timeseries.csv"), csv)?;

        info!(run_id = %manifest.run_id, dir = %run_dir.display(), "saved run");
        Ok(run_dir)
    }

    pub fn load_manifest(&self, run_id: &str) -> ResultsResult<RunManifest> {
        let raw = fs::read_to_string(self.run_dir(run_id).join("manifest.json"))?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// Build a manifest for a completed run, stamped with the current UTC time.
pub fn build_manifest(
    controller: &str,
    system: &str,
    model_uncertainty: bool,
    t_end_s: f64,
    extracted: &ExtractedStates,
) -> RunManifest {
    let timestamp = Utc::now().to_rfc3339();
    let run_id = format!(
        "{}-{}-{}",
        controller.to_lowercase(),
        system.to_lowercase(),
        Utc::now().format("%Y%m%d-%H%M%S")
    );
    RunManifest {
        run_id,
        controller: controller.to_string(),
        system: system.to_string(),
        model_uncertainty,
        t_end_s,
        samples: extracted.len(),
        timestamp,
    }
}

/// Default location for saved runs relative to `base`.
pub fn default_store_dir(base: &Path) -> PathBuf {
    base.join(".armsim").join("runs")
}
