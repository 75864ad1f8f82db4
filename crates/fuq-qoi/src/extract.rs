//! Sequential extraction over a [`RunSet`].

use std::path::Path;

use fuq_core::errors::FuqError;
use fuq_core::{QoiSelection, UnitSystem};
use fuq_thermo::{read_thermo, ThermoTable};
use tracing::{debug, info};

use crate::aggregate::Aggregator;
use crate::report::QoiResult;
use crate::runs::RunSet;

/// Produces the thermo table of one replicate.
pub trait ThermoSource {
    /// Reads the table stored at `path`.
    fn read(&self, path: &Path) -> Result<ThermoTable, FuqError>;
}

/// Reads tables from engine log files on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogFiles;

impl ThermoSource for LogFiles {
    fn read(&self, path: &Path) -> Result<ThermoTable, FuqError> {
        read_thermo(path)
    }
}

/// Folds every replicate of `runs` in index order and reduces the result.
///
/// The first missing or malformed log aborts the whole extraction.
pub fn extract(
    selection: &QoiSelection,
    units: UnitSystem,
    runs: &RunSet,
    source: &dyn ThermoSource,
) -> Result<QoiResult, FuqError> {
    info!(
        run_dir = %runs.run_dir.display(),
        start = runs.start,
        count = runs.count,
        quantities = selection.len(),
        "extracting quantities of interest"
    );
    let mut aggregator = Aggregator::new(selection, units, runs.count);
    for copy in runs.indices() {
        let path = runs.log_path(copy);
        let table = source.read(&path)?;
        let alignment = aggregator.fold(table)?;
        debug!(copy, ?alignment, folded = aggregator.folded(), "replicate folded");
    }
    let result = aggregator.finish()?;
    info!(replicates = result.replicates, "extraction finished");
    Ok(result)
}
