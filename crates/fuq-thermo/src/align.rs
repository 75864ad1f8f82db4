//! Reconciles replicate tables of differing row counts.

use ndarray::{s, Array2};
use serde::{Deserialize, Serialize};

/// What [`align_rows`] did to a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Alignment {
    /// Row count already matched.
    Unchanged,
    /// Trailing rows were dropped.
    Truncated {
        /// Number of rows removed.
        dropped: usize,
    },
    /// Missing rows were filled with NaN.
    Padded {
        /// Number of NaN rows appended.
        missing: usize,
    },
}

impl Alignment {
    /// Describes aligning a table of `rows` rows to `target` rows.
    pub fn between(target: usize, rows: usize) -> Self {
        if rows > target {
            Alignment::Truncated {
                dropped: rows - target,
            }
        } else if rows < target {
            Alignment::Padded {
                missing: target - rows,
            }
        } else {
            Alignment::Unchanged
        }
    }
}

/// Returns `data` with exactly `target` rows.
///
/// Longer tables keep their first `target` rows; shorter tables are padded
/// with NaN so NaN-ignoring reductions skip the unfinished timesteps.
pub fn align_rows(target: usize, data: Array2<f64>) -> Array2<f64> {
    let (rows, cols) = data.dim();
    if rows > target {
        data.slice_move(s![..target, ..])
    } else if rows < target {
        let mut padded = Array2::from_elem((target, cols), f64::NAN);
        padded.slice_mut(s![..rows, ..]).assign(&data);
        padded
    } else {
        data
    }
}
