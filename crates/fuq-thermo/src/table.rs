use ndarray::{Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};

use fuq_core::FuqError;

use crate::align::{align_rows, Alignment};
use crate::columns::find_column;

/// Thermo output of one replicate: column names, a (timestep x column) table, and the atom count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermoTable {
    /// Column names in log order.
    pub columns: Vec<String>,
    /// Numeric table, one row per printed timestep.
    pub data: Array2<f64>,
    /// Number of atoms in the simulated system.
    pub atoms: usize,
}

impl ThermoTable {
    /// Number of timesteps (rows) in the table.
    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    /// Borrowed view of the named column.
    pub fn column(&self, name: &str) -> Result<ArrayView1<'_, f64>, FuqError> {
        let idx = find_column(&self.columns, name)?;
        Ok(self.data.index_axis(Axis(1), idx))
    }

    /// First printed value of the named column, NaN if the table has no rows.
    pub fn initial(&self, name: &str) -> Result<f64, FuqError> {
        let column = self.column(name)?;
        Ok(column.first().copied().unwrap_or(f64::NAN))
    }

    /// Returns the table truncated or NaN-padded to `target` rows.
    pub fn aligned(self, target: usize) -> (Self, Alignment) {
        let alignment = Alignment::between(target, self.rows());
        let data = align_rows(target, self.data);
        (
            Self {
                columns: self.columns,
                data,
                atoms: self.atoms,
            },
            alignment,
        )
    }
}
