use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use fuq_core::errors::{ErrorInfo, FuqError};
use fuq_core::{replicate_seed, QoiSelection};
use tracing::info;

use crate::config::QoiConfig;
use crate::extract::{extract, LogFiles, ThermoSource};
use crate::json::stable_hash_string;
use crate::manifest::{RunManifest, MANIFEST_FILE};
use crate::report::QoiResult;
use crate::runs::{next_copy_start, RunSet};
use crate::submit::{read_template, render_template, ReplicateJob, SubmitMode, Submitter};

/// One configured study: replicate submission plus extraction.
#[derive(Debug, Clone)]
pub struct QoiStudy {
    config: QoiConfig,
    selection: QoiSelection,
}

impl QoiStudy {
    /// Classifies the configured quantities and creates the study directories.
    pub fn new(config: QoiConfig) -> Result<Self, FuqError> {
        config.validate()?;
        let selection = QoiSelection::new(&config.quantities, config.ensemble)?;
        for dir in [config.main_dir.clone(), config.run_dir(), config.results_dir()] {
            create_dir(&dir)?;
        }
        info!(
            name = config.job_name(),
            quantities = ?selection.names(),
            ensemble = %config.ensemble,
            units = %config.units,
            "study prepared"
        );
        Ok(Self { config, selection })
    }

    /// Study configuration.
    pub fn config(&self) -> &QoiConfig {
        &self.config
    }

    /// Classified quantity selection.
    pub fn selection(&self) -> &QoiSelection {
        &self.selection
    }

    /// Replicates covered by extraction.
    pub fn run_set(&self) -> RunSet {
        self.run_set_from(self.config.copy_start)
    }

    fn run_set_from(&self, start: usize) -> RunSet {
        RunSet {
            run_dir: self.config.run_dir(),
            copy_folder: self.config.files.copy_folder.clone(),
            log_file: self.config.files.log_file.clone(),
            start,
            count: self.config.replicates,
        }
    }

    /// Renders one batch of replicate inputs, hands each to `submitter`,
    /// and writes the batch manifest.
    pub fn submit(
        &self,
        submitter: &dyn Submitter,
        mode: SubmitMode,
    ) -> Result<RunManifest, FuqError> {
        let config = &self.config;
        let in_template = read_template(&config.in_template_path())?;
        let sub_template = match mode {
            SubmitMode::Pbs => Some(read_template(&config.sub_template_path())?),
            SubmitMode::Local | SubmitMode::DryRun => None,
        };
        let run_dir = config.run_dir();
        let start = next_copy_start(
            &run_dir,
            &config.files.copy_folder,
            config.overwrite,
            config.copy_start,
        )?;
        let runs = self.run_set_from(start);

        let mut seeds = Vec::with_capacity(runs.count);
        for copy in runs.indices() {
            let seed = replicate_seed(config.master_seed, copy);
            let dir = runs.copy_dir(copy);
            let mut input_keys = BTreeMap::new();
            input_keys.insert("SEED", seed.to_string());
            input_keys.insert("TABLECOEFF", config.potential.pair_coeff.clone());
            input_keys.insert("TABLESTYLE", config.potential.pair_style.clone());
            input_keys.insert("RUNDIR", config.potential.param_dir.display().to_string());
            input_keys.insert("TEMP", config.temperature.to_string());

            let sub_text = sub_template.as_deref().map(|template| {
                let mut sub_keys = BTreeMap::new();
                sub_keys.insert("NAME", format!("{}_{}", config.job_name(), copy));
                sub_keys.insert("INFILE", config.files.in_file.clone());
                render_template(template, &sub_keys)
            });

            let job = ReplicateJob {
                copy,
                dir,
                seed,
                in_file: config.files.in_file.clone(),
                in_text: render_template(&in_template, &input_keys),
                sub_file: config.files.sub_file.clone(),
                sub_text,
            };
            submitter.submit(&job)?;
            seeds.push(seed);
        }

        let manifest = RunManifest {
            config_hash: stable_hash_string(config)?,
            name: config.job_name().to_string(),
            description: config.description.clone(),
            run_dir: run_dir.clone(),
            start,
            count: runs.count,
            master_seed: config.master_seed,
            seeds,
            quantities: self.selection.names().into_iter().map(str::to_string).collect(),
            ensemble: config.ensemble,
            units: config.units,
            mode,
        };
        manifest.write(&run_dir.join(MANIFEST_FILE))?;
        info!(start, count = runs.count, ?mode, "batch submitted");
        Ok(manifest)
    }

    /// Extracts the configured replicates from their engine logs.
    pub fn extract(&self) -> Result<QoiResult, FuqError> {
        self.extract_with(&LogFiles)
    }

    /// Extracts the configured replicates through `source`.
    pub fn extract_with(&self, source: &dyn ThermoSource) -> Result<QoiResult, FuqError> {
        extract(&self.selection, self.config.units, &self.run_set(), source)
    }
}

fn create_dir(dir: &Path) -> Result<(), FuqError> {
    fs::create_dir_all(dir).map_err(|err| {
        FuqError::Io(
            ErrorInfo::new("study-mkdir", err.to_string())
                .with_context("path", dir.display().to_string()),
        )
    })
}
