use std::fmt;
use std::path::Path;

use fuq_core::errors::{ErrorInfo, FuqError};
use fuq_core::UnitSystem;
use serde::{Deserialize, Serialize};

use crate::aggregate::BatchState;

/// Converted means and standard deviations of every quantity of one extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QoiResult {
    /// Quantity names in extraction order.
    pub names: Vec<String>,
    /// Unit system of the raw samples.
    pub units: UnitSystem,
    /// Converted means (`Qavg`).
    pub avg: Vec<f64>,
    /// Converted standard deviations (`Qstd`).
    pub std: Vec<f64>,
    /// Number of replicates folded.
    pub replicates: usize,
    /// Batch state of the first replicate.
    pub state: BatchState,
}

#[derive(Serialize)]
struct CsvRow<'a> {
    quantity: &'a str,
    unit: &'a str,
    mean: f64,
    std: f64,
}

impl QoiResult {
    /// Mean and standard deviation of `name`.
    pub fn get(&self, name: &str) -> Option<(f64, f64)> {
        let idx = self.names.iter().position(|n| n == name)?;
        Some((self.avg[idx], self.std[idx]))
    }

    /// Mean of `name`.
    pub fn mean(&self, name: &str) -> Option<f64> {
        self.get(name).map(|(mean, _)| mean)
    }

    /// Writes the result as canonical JSON.
    pub fn write_json(&self, path: &Path) -> Result<(), FuqError> {
        crate::json::write_json(path, self)
    }

    /// Writes `quantity,unit,mean,std` rows.
    pub fn write_csv(&self, path: &Path) -> Result<(), FuqError> {
        let csv_error = |err: csv::Error| {
            FuqError::Serde(
                ErrorInfo::new("csv-write", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        };
        let mut writer = csv::Writer::from_path(path).map_err(csv_error)?;
        for (idx, name) in self.names.iter().enumerate() {
            writer
                .serialize(CsvRow {
                    quantity: name,
                    unit: self.units.label(name),
                    mean: self.avg[idx],
                    std: self.std[idx],
                })
                .map_err(csv_error)?;
        }
        writer.flush().map_err(|err| {
            FuqError::Io(
                ErrorInfo::new("csv-flush", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })
    }
}

impl fmt::Display for QoiResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.names.join("\t"))?;
        for avg in &self.avg {
            write!(f, "{avg:.3}\t")?;
        }
        writeln!(f)
    }
}
