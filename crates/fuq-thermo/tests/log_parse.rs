use std::fs;

use fuq_thermo::{find_columns, parse_thermo, read_thermo};
use tempfile::tempdir;

const LOG: &str = "\
LAMMPS (29 Oct 2020)
units metal
read_data data.lmp
  orthogonal box = (0 0 0) to (16.2 16.2 16.2)
  1 by 1 by 1 MPI processor grid
  reading atoms ...
  256 atoms
Step Temp PotEng Press Volume
       0          300   -860.5      1200.0    4251.5
     100    295.12   -855.2      -150.25    4251.5
Loop time of 0.5 on 1 procs for 100 steps with 256 atoms

Step Temp PotEng Press Volume
     100    295.12   -855.2      -150.25    4251.5
WARNING: Neighbor list overflow (src/npair.cpp:1)
     200    301.5   -854.8      320.0    4260.1
     300    299.0   -855.0      10.0    4255.0
Loop time of 1.0 on 1 procs for 200 steps with 256 atoms
";

#[test]
fn last_block_is_returned() {
    let table = parse_thermo(LOG).unwrap();
    assert_eq!(table.columns, vec!["Step", "Temp", "PotEng", "Press", "Volume"]);
    assert_eq!(table.rows(), 3);
    assert_eq!(table.atoms, 256);
    assert_eq!(table.column("Step").unwrap().to_vec(), vec![100.0, 200.0, 300.0]);
    assert_eq!(table.initial("Temp").unwrap(), 295.12);
}

#[test]
fn running_log_stops_at_partial_line() {
    let text = "\
Created 32 atoms
Step Temp PotEng
0 300 -100.0
10 290 -101.0
20 2";
    let table = parse_thermo(text).unwrap();
    assert_eq!(table.rows(), 2);
    assert_eq!(table.atoms, 32);
}

#[test]
fn header_without_rows_is_an_empty_table() {
    let table = parse_thermo("  8 atoms\nStep Temp PotEng\n").unwrap();
    assert_eq!(table.rows(), 0);
    assert!(table.initial("Temp").unwrap().is_nan());
}

#[test]
fn missing_header_is_malformed() {
    let err = parse_thermo("Loop time of 1 on 1 procs for 1 steps with 4 atoms\n").unwrap_err();
    assert_eq!(err.code(), "log-malformed");
}

#[test]
fn missing_atom_count_is_malformed() {
    let err = parse_thermo("Step Temp\n0 300\n").unwrap_err();
    assert_eq!(err.code(), "log-malformed");
}

#[test]
fn missing_file_is_distinguishable() {
    let dir = tempdir().unwrap();
    let err = read_thermo(&dir.path().join("log.lammps")).unwrap_err();
    assert_eq!(err.code(), "log-missing");
    assert!(err.info().context.contains_key("path"));
}

#[test]
fn reads_from_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("log.lammps");
    fs::write(&path, LOG).unwrap();
    let table = read_thermo(&path).unwrap();
    let cols = find_columns(&table.columns, &["Volume", "PotEng"]).unwrap();
    assert_eq!(cols, vec![4, 2]);
}
