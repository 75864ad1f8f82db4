#![deny(missing_docs)]

//! Replicate run orchestration and quantity-of-interest extraction for FUQ.
//!
//! A [`QoiStudy`] renders and submits a batch of replicate MD runs, then folds
//! their thermo logs into per-quantity means and standard deviations.
//! Fluctuation quantities are evaluated on raw-unit moments before the final
//! unit conversion.

/// Sequential replicate fold and reduction.
pub mod aggregate;
/// YAML study configuration.
pub mod config;
/// Extraction entry point and table sources.
pub mod extract;
/// Fluctuation formulas.
pub mod fluct;
/// Canonical JSON files and content hashes.
pub mod json;
/// Run manifest serialization helpers.
pub mod manifest;
/// Extraction results and their CSV/JSON outputs.
pub mod report;
/// Replicate directory discovery.
pub mod runs;
/// NaN-ignoring statistics.
pub mod stat;
/// High level study driver.
pub mod study;
/// Template rendering and job launchers.
pub mod submit;
/// Sample storage for one extraction pass.
pub mod tensor;

pub use aggregate::{Aggregator, BatchState};
pub use config::{FileNames, PotentialSpec, QoiConfig};
pub use extract::{extract, LogFiles, ThermoSource};
pub use json::{read_json, stable_hash_string, to_canonical_json_bytes, write_json};
pub use manifest::{RunManifest, MANIFEST_FILE};
pub use report::QoiResult;
pub use runs::{existing_copies, next_copy_start, RunSet};
pub use study::QoiStudy;
pub use submit::{
    render_template, CommandSubmitter, DryRunSubmitter, ReplicateJob, SubmitMode, Submitter,
};
pub use tensor::{BaseMoments, BaseSample, Moments, SampleTensor, BASE_COLUMNS};
