//! Folds replicate thermo tables into a [`SampleTensor`] and reduces it.

use fuq_core::errors::{ErrorInfo, FuqError};
use fuq_core::{Category, QoiSelection, UnitSystem};
use fuq_thermo::{find_column, find_columns, Alignment, ThermoTable};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::fluct::{self, STATE_COLUMNS};
use crate::report::QoiResult;
use crate::tensor::{BaseSample, SampleTensor};

/// Batch-level state taken from the first replicate and reused for the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchState {
    /// Atom count.
    pub atoms: usize,
    /// Canonical row count every replicate is aligned to.
    pub timesteps: usize,
    /// Initial volume.
    pub volume: f64,
    /// Initial pressure in energy per volume.
    pub pressure: f64,
    /// Initial temperature.
    pub temperature: f64,
    /// Inverse thermal energy `1 / (k_B T)`.
    pub beta: f64,
}

impl BatchState {
    /// Reads the batch state from the first replicate's table.
    pub fn from_table(table: &ThermoTable, units: UnitSystem) -> Result<Self, FuqError> {
        let temperature = table.initial("Temp")?;
        Ok(Self {
            atoms: table.atoms,
            timesteps: table.rows(),
            volume: table.initial("Volume")?,
            pressure: table.initial("Press")? * units.pressure_to_energy_density(),
            temperature,
            beta: 1.0 / (units.boltzmann() * temperature),
        })
    }
}

#[derive(Debug, Clone)]
struct ColumnMap {
    names: Vec<String>,
    direct: Vec<Option<usize>>,
    pot_eng: usize,
    press: usize,
    volume: usize,
}

impl ColumnMap {
    fn resolve(columns: &[String], selection: &QoiSelection) -> Result<Self, FuqError> {
        find_columns(columns, &STATE_COLUMNS)?;
        let direct = selection
            .quantities()
            .iter()
            .map(|spec| match spec.category() {
                Category::DirectThermo => find_column(columns, spec.name()).map(Some),
                Category::Fluctuation(_) => Ok(None),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            names: columns.to_vec(),
            direct,
            pot_eng: find_column(columns, "PotEng")?,
            press: find_column(columns, "Press")?,
            volume: find_column(columns, "Volume")?,
        })
    }
}

fn start_batch(
    table: &ThermoTable,
    selection: &QoiSelection,
    units: UnitSystem,
    replicates: usize,
) -> Result<(BatchState, ColumnMap, SampleTensor), FuqError> {
    let state = BatchState::from_table(table, units)?;
    let columns = ColumnMap::resolve(&table.columns, selection)?;
    let tensor = SampleTensor::new(state.timesteps, replicates, selection.len());
    debug!(
        atoms = state.atoms,
        timesteps = state.timesteps,
        temperature = state.temperature,
        "batch state from first replicate"
    );
    Ok((state, columns, tensor))
}

/// Sequential fold of replicate tables for one extraction call.
///
/// The first table folded fixes the batch state and the canonical row count.
#[derive(Debug)]
pub struct Aggregator<'a> {
    selection: &'a QoiSelection,
    units: UnitSystem,
    replicates: usize,
    folded: usize,
    batch: Option<(BatchState, ColumnMap, SampleTensor)>,
}

impl<'a> Aggregator<'a> {
    /// Prepares an aggregation over `replicates` tables.
    pub fn new(selection: &'a QoiSelection, units: UnitSystem, replicates: usize) -> Self {
        Self {
            selection,
            units,
            replicates,
            folded: 0,
            batch: None,
        }
    }

    /// Number of tables folded so far.
    pub fn folded(&self) -> usize {
        self.folded
    }

    /// Folds the next replicate's table.
    pub fn fold(&mut self, table: ThermoTable) -> Result<Alignment, FuqError> {
        let replicate = self.folded;
        if replicate >= self.replicates {
            return Err(FuqError::Config(
                ErrorInfo::new("replicate-overflow", "more tables than configured replicates")
                    .with_context("replicates", self.replicates.to_string()),
            ));
        }
        let selection = self.selection;
        let batch = match self.batch.take() {
            Some(batch) => batch,
            None => start_batch(&table, selection, self.units, self.replicates)?,
        };
        let (state, columns, tensor) = self.batch.insert(batch);
        if table.columns != columns.names {
            return Err(FuqError::Log(
                ErrorInfo::new(
                    "column-mismatch",
                    "replicate log columns differ from the first replicate",
                )
                .with_context("replicate", replicate.to_string())
                .with_context("expected", columns.names.join(" "))
                .with_context("found", table.columns.join(" ")),
            ));
        }

        let (table, alignment) = table.aligned(state.timesteps);
        if alignment != Alignment::Unchanged {
            warn!(replicate, ?alignment, "replicate row count differs from first replicate");
        }

        for (time, row) in table.data.outer_iter().enumerate() {
            let base = BaseSample {
                pot_eng: row[columns.pot_eng],
                press: row[columns.press],
                volume: row[columns.volume],
            };
            tensor.record_base(time, replicate, base);
            for (q, spec) in selection.quantities().iter().enumerate() {
                let raw = match (spec.category(), columns.direct[q]) {
                    (Category::DirectThermo, Some(col)) => row[col],
                    (Category::Fluctuation(kind), _) => fluct::sample(kind, base),
                    (Category::DirectThermo, None) => continue,
                };
                tensor.record(time, replicate, q, raw);
            }
        }
        self.folded += 1;
        Ok(alignment)
    }

    /// Reduces the samples, evaluates fluctuation formulas, then converts units.
    ///
    /// Qstd is always the spread of the raw samples; only Qavg is replaced by
    /// the derived fluctuation value.
    pub fn finish(self) -> Result<QoiResult, FuqError> {
        let Some((state, _, tensor)) = self.batch else {
            return Err(FuqError::Config(ErrorInfo::new(
                "no-replicates",
                "no replicate tables were folded",
            )));
        };
        let moments = tensor.reduce();
        let mut avg = moments.mean.clone();
        let mut std = moments.std;

        for (q, spec) in self.selection.quantities().iter().enumerate() {
            if let Some(kind) = spec.fluctuation() {
                avg[q] = fluct::derive(kind, &state, moments.mean[q], &moments.base);
            }
        }

        // Fluctuation formulas consume raw-unit moments, so conversion comes last.
        let names: Vec<String> = self
            .selection
            .names()
            .into_iter()
            .map(str::to_string)
            .collect();
        for (q, name) in names.iter().enumerate() {
            let factor = self.units.conversion(name, state.atoms);
            avg[q] *= factor;
            std[q] *= factor.abs();
            if avg[q].is_nan() {
                warn!(quantity = %name, "reduction produced NaN");
            }
        }

        Ok(QoiResult {
            names,
            units: self.units,
            avg,
            std,
            replicates: self.folded,
            state,
        })
    }
}
