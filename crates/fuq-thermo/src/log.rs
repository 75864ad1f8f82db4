//! Parser for LAMMPS-style log files.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use ndarray::Array2;
use tracing::debug;

use fuq_core::errors::{ErrorInfo, FuqError};

use crate::table::ThermoTable;

struct Block {
    columns: Vec<String>,
    rows: Vec<Vec<f64>>,
}

#[derive(Default)]
struct AtomCounts {
    from_loop: Option<usize>,
    created: Option<usize>,
    declared: Option<usize>,
}

impl AtomCounts {
    fn best(&self) -> Option<usize> {
        self.from_loop.or(self.created).or(self.declared)
    }
}

/// Reads and parses the log at `path`.
///
/// A missing file and an unreadable or malformed file fail with distinct codes
/// (`log-missing` and `log-malformed`).
pub fn read_thermo(path: &Path) -> Result<ThermoTable, FuqError> {
    let text = fs::read_to_string(path).map_err(|err| {
        let code = if err.kind() == ErrorKind::NotFound {
            "log-missing"
        } else {
            "log-malformed"
        };
        FuqError::Log(
            ErrorInfo::new(code, err.to_string()).with_context("path", path.display().to_string()),
        )
    })?;
    let table = parse_thermo(&text).map_err(|err| match err {
        FuqError::Log(info) => FuqError::Log(info.with_context("path", path.display().to_string())),
        other => other,
    })?;
    debug!(
        path = %path.display(),
        rows = table.rows(),
        atoms = table.atoms,
        "parsed thermo log"
    );
    Ok(table)
}

/// Parses log text into the last thermo block it contains.
pub fn parse_thermo(text: &str) -> Result<ThermoTable, FuqError> {
    let mut blocks: Vec<Block> = Vec::new();
    let mut current: Option<Block> = None;
    let mut atoms = AtomCounts::default();

    for line in text.lines() {
        let tokens: Vec<&str> = line.split_whitespace().collect();

        if let Some(block) = current.as_mut() {
            if tokens.len() == block.columns.len() {
                if let Some(row) = parse_row(&tokens) {
                    block.rows.push(row);
                    continue;
                }
            }
            if line.trim_start().starts_with("WARNING") {
                continue;
            }
            blocks.extend(current.take());
        }

        if is_header(&tokens) {
            current = Some(Block {
                columns: tokens.iter().map(|t| t.to_string()).collect(),
                rows: Vec::new(),
            });
            continue;
        }

        match tokens.first().copied() {
            Some("Loop") => atoms.from_loop = count_before_atoms(&tokens).or(atoms.from_loop),
            Some("Created") => atoms.created = count_before_atoms(&tokens).or(atoms.created),
            _ if tokens.len() == 2 && tokens[1] == "atoms" => {
                atoms.declared = tokens[0].parse().ok().or(atoms.declared);
            }
            _ => {}
        }
    }
    blocks.extend(current.take());

    let Some(block) = blocks.pop() else {
        return Err(malformed("no thermo header (a line starting with Step) was found"));
    };
    let Some(atom_count) = atoms.best() else {
        return Err(malformed("no atom count was found"));
    };

    let ncols = block.columns.len();
    let nrows = block.rows.len();
    let flat: Vec<f64> = block.rows.into_iter().flatten().collect();
    let data = Array2::from_shape_vec((nrows, ncols), flat)
        .map_err(|err| malformed(format!("ragged thermo table: {err}")))?;

    Ok(ThermoTable {
        columns: block.columns,
        data,
        atoms: atom_count,
    })
}

fn malformed(message: impl Into<String>) -> FuqError {
    FuqError::Log(ErrorInfo::new("log-malformed", message))
}

fn is_header(tokens: &[&str]) -> bool {
    tokens.first() == Some(&"Step") && tokens.iter().all(|t| t.parse::<f64>().is_err())
}

fn parse_row(tokens: &[&str]) -> Option<Vec<f64>> {
    tokens.iter().map(|t| t.parse::<f64>().ok()).collect()
}

fn count_before_atoms(tokens: &[&str]) -> Option<usize> {
    tokens
        .windows(2)
        .rev()
        .find(|pair| pair[1] == "atoms")
        .and_then(|pair| pair[0].parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_requires_step_and_no_numbers() {
        assert!(is_header(&["Step", "Temp", "PotEng"]));
        assert!(!is_header(&["Temp", "Step"]));
        assert!(!is_header(&["Step", "100"]));
    }

    #[test]
    fn atom_count_comes_from_the_loop_line() {
        let tokens: Vec<&str> = "Loop time of 1.5 on 4 procs for 100 steps with 4000 atoms"
            .split_whitespace()
            .collect();
        assert_eq!(count_before_atoms(&tokens), Some(4000));
    }
}
