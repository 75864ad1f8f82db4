use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fuq_core::errors::{ErrorInfo, FuqError};
use fuq_core::{Ensemble, QoiSelection, UnitSystem};
use fuq_qoi::{extract, RunSet, ThermoSource};
use fuq_thermo::ThermoTable;
use ndarray::Array2;

const TIMESTEPS: usize = 2_000;
const REPLICATES: usize = 8;

struct InMemory(BTreeMap<PathBuf, ThermoTable>);

impl ThermoSource for InMemory {
    fn read(&self, path: &Path) -> Result<ThermoTable, FuqError> {
        self.0
            .get(path)
            .cloned()
            .ok_or_else(|| FuqError::Log(ErrorInfo::new("log-missing", "not in memory")))
    }
}

fn replicate_table(copy: usize) -> ThermoTable {
    let data = Array2::from_shape_fn((TIMESTEPS, 5), |(t, c)| {
        let phase = (t as f64 * 0.01 + copy as f64).sin();
        match c {
            0 => t as f64,
            1 => 300.0 + 5.0 * phase,
            2 => -3500.0 + 2.0 * phase,
            3 => 100.0 * phase,
            _ => 11_000.0 + phase,
        }
    });
    ThermoTable {
        columns: ["Step", "Temp", "PotEng", "Press", "Volume"]
            .iter()
            .map(|c| c.to_string())
            .collect(),
        data,
        atoms: 1000,
    }
}

fn bench_extract(c: &mut Criterion) {
    let selection = QoiSelection::new(
        [
            "Temp",
            "Press",
            "HeatCapacityPress",
            "Compressibility",
            "ThermalExpansion",
        ],
        Ensemble::ConstantPressure,
    )
    .unwrap();
    let runs = RunSet {
        run_dir: PathBuf::from("bench_runs"),
        copy_folder: "copy_".into(),
        log_file: "log.lammps".into(),
        start: 0,
        count: REPLICATES,
    };
    let source = InMemory(
        runs.indices()
            .map(|copy| (runs.log_path(copy), replicate_table(copy)))
            .collect(),
    );

    c.bench_function("qoi_extract", |b| {
        b.iter(|| {
            let result = extract(&selection, UnitSystem::Metal, &runs, &source).unwrap();
            black_box(result);
        })
    });
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
