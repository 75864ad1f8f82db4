#![deny(missing_docs)]
#![doc = "Thermo log parsing, column lookup, and replicate row alignment for FUQ."]

/// Row alignment across replicates.
pub mod align;
/// Column name resolution.
pub mod columns;
/// Log file parsing.
pub mod log;
/// Parsed thermo table type.
pub mod table;

pub use align::{align_rows, Alignment};
pub use columns::{find_column, find_columns};
pub use log::{parse_thermo, read_thermo};
pub use table::ThermoTable;
