use std::fs;
use std::path::{Path, PathBuf};

use fuq_core::errors::{ErrorInfo, FuqError};
use fuq_core::{Ensemble, UnitSystem};
use serde::{Deserialize, Serialize};

/// YAML-configurable description of a quantity-of-interest study.
///
/// Unknown keys are rejected rather than ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QoiConfig {
    /// Requested quantity names; ensemble-required ones are appended.
    pub quantities: Vec<String>,
    /// Thermodynamic ensemble of the simulations.
    #[serde(default)]
    pub ensemble: Ensemble,
    /// Unit convention of the MD engine output.
    #[serde(default)]
    pub units: UnitSystem,
    /// Interatomic potential substituted into the input template.
    pub potential: PotentialSpec,
    /// Directory holding the input and submission templates.
    pub init_dir: PathBuf,
    /// Root directory for run and result directories.
    pub main_dir: PathBuf,
    /// Label of the run directory (`<purpose>_runs`).
    #[serde(default = "default_purpose")]
    pub purpose: String,
    /// Number of replicate runs per submission and per extraction.
    #[serde(default = "default_replicates")]
    pub replicates: usize,
    /// First replicate index; also forces the submission start when non-zero.
    #[serde(default)]
    pub copy_start: usize,
    /// Reuse existing replicate directories instead of appending after them.
    #[serde(default)]
    pub overwrite: bool,
    /// Temperature substituted into the input template.
    #[serde(default)]
    pub temperature: f64,
    /// Master seed from which replicate velocity seeds are derived.
    #[serde(default = "default_master_seed")]
    pub master_seed: u64,
    /// Free-form description recorded in the run manifest.
    #[serde(default)]
    pub description: String,
    /// Job name prefix; defaults to the potential name.
    #[serde(default)]
    pub name: Option<String>,
    /// File and directory naming.
    #[serde(default)]
    pub files: FileNames,
}

fn default_purpose() -> String {
    "main".to_string()
}

fn default_replicates() -> usize {
    5
}

fn default_master_seed() -> u64 {
    0x05EE_D5EE_DD15_5EED_u64
}

/// Interatomic potential description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PotentialSpec {
    /// Short potential name.
    pub name: String,
    /// Value for the `TABLESTYLE` placeholder.
    #[serde(default)]
    pub pair_style: String,
    /// Value for the `TABLECOEFF` placeholder.
    #[serde(default)]
    pub pair_coeff: String,
    /// Directory with potential parameter files (`RUNDIR` placeholder).
    #[serde(default)]
    pub param_dir: PathBuf,
}

/// Template, input, log, and replicate directory names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileNames {
    /// Input template inside `init_dir`.
    #[serde(default = "default_in_template")]
    pub in_template: String,
    /// Submission script template inside `init_dir`.
    #[serde(default = "default_sub_template")]
    pub sub_template: String,
    /// Rendered input file written to each replicate directory.
    #[serde(default = "default_in_file")]
    pub in_file: String,
    /// Rendered submission script written to each replicate directory.
    #[serde(default = "default_sub_file")]
    pub sub_file: String,
    /// Log file the engine writes in each replicate directory.
    #[serde(default = "default_log_file")]
    pub log_file: String,
    /// Replicate directory prefix.
    #[serde(default = "default_copy_folder")]
    pub copy_folder: String,
}

fn default_in_template() -> String {
    "in.template".to_string()
}

fn default_sub_template() -> String {
    "submit.template".to_string()
}

fn default_in_file() -> String {
    "in.lammps".to_string()
}

fn default_sub_file() -> String {
    "run.pbs".to_string()
}

fn default_log_file() -> String {
    "log.lammps".to_string()
}

fn default_copy_folder() -> String {
    "copy_".to_string()
}

impl Default for FileNames {
    fn default() -> Self {
        Self {
            in_template: default_in_template(),
            sub_template: default_sub_template(),
            in_file: default_in_file(),
            sub_file: default_sub_file(),
            log_file: default_log_file(),
            copy_folder: default_copy_folder(),
        }
    }
}

impl QoiConfig {
    /// Loads and validates a configuration file.
    pub fn load(path: &Path) -> Result<Self, FuqError> {
        let contents = fs::read_to_string(path).map_err(|err| {
            FuqError::Io(
                ErrorInfo::new("config-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        Self::from_yaml_str(&contents).map_err(|err| match err {
            FuqError::Config(info) => {
                FuqError::Config(info.with_context("path", path.display().to_string()))
            }
            other => other,
        })
    }

    /// Parses and validates a YAML document.
    pub fn from_yaml_str(contents: &str) -> Result<Self, FuqError> {
        let config: QoiConfig = serde_yaml::from_str(contents).map_err(yaml_error)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks option values that serde cannot express.
    pub fn validate(&self) -> Result<(), FuqError> {
        if self.replicates == 0 {
            return Err(invalid_option("replicates", "at least one replicate is required"));
        }
        if self.files.copy_folder.is_empty() {
            return Err(invalid_option(
                "files.copy_folder",
                "replicate directory prefix must not be empty",
            ));
        }
        if self.temperature < 0.0 {
            return Err(invalid_option("temperature", "temperature must be non-negative"));
        }
        Ok(())
    }

    /// Directory holding the replicate run directories.
    pub fn run_dir(&self) -> PathBuf {
        self.main_dir.join(format!("{}_runs", self.purpose))
    }

    /// Directory receiving extracted results.
    pub fn results_dir(&self) -> PathBuf {
        self.main_dir.join("results")
    }

    /// Path of the input template.
    pub fn in_template_path(&self) -> PathBuf {
        self.init_dir.join(&self.files.in_template)
    }

    /// Path of the submission template.
    pub fn sub_template_path(&self) -> PathBuf {
        self.init_dir.join(&self.files.sub_template)
    }

    /// Job name prefix.
    pub fn job_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.potential.name)
    }
}

fn invalid_option(key: &str, message: &str) -> FuqError {
    FuqError::Config(ErrorInfo::new("invalid-option", message).with_context("key", key))
}

fn yaml_error(err: serde_yaml::Error) -> FuqError {
    let message = err.to_string();
    if message.contains("unknown field") {
        let key = message.split('`').nth(1).unwrap_or_default().to_string();
        return FuqError::Config(
            ErrorInfo::new("unknown-config-key", format!("{key} is not a valid input parameter"))
                .with_context("key", key),
        );
    }
    FuqError::Config(ErrorInfo::new("config-parse", message))
}
