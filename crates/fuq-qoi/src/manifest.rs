use std::path::{Path, PathBuf};

use fuq_core::errors::FuqError;
use fuq_core::{Ensemble, UnitSystem};
use serde::{Deserialize, Serialize};

use crate::json::{read_json, write_json};
use crate::submit::SubmitMode;

/// File name of the manifest inside a run directory.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Record of one submission batch, written next to the replicate directories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunManifest {
    /// Canonical hash of the configuration that produced the batch.
    pub config_hash: String,
    /// Job name prefix.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Run directory holding the replicates.
    pub run_dir: PathBuf,
    /// First replicate index of the batch.
    pub start: usize,
    /// Number of replicates in the batch.
    pub count: usize,
    /// Master seed the replicate seeds were derived from.
    pub master_seed: u64,
    /// Velocity seed of each replicate, in index order.
    pub seeds: Vec<u64>,
    /// Quantities extracted from the batch.
    pub quantities: Vec<String>,
    /// Ensemble of the simulations.
    pub ensemble: Ensemble,
    /// Unit convention of the engine output.
    pub units: UnitSystem,
    /// Launch mode.
    pub mode: SubmitMode,
}

impl RunManifest {
    /// Writes the manifest as canonical JSON.
    pub fn write(&self, path: &Path) -> Result<(), FuqError> {
        write_json(path, self)
    }

    /// Loads a manifest from disk.
    pub fn load(path: &Path) -> Result<Self, FuqError> {
        read_json(path)
    }
}
