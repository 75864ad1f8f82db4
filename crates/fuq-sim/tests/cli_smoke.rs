use std::fs;
use std::process::Command;

use serde_json::Value;
use tempfile::tempdir;

const LOG: &str = "\
Created 2 atoms
Step Temp PotEng Press Volume v_strain
0 300 -4.0 1.0 100.0 0.0
10 310 -6.0 2.0 100.0 0.01
Loop time of 0.1 on 1 procs for 10 steps with 2 atoms
";

#[test]
fn inspect_lists_columns() {
    let dir = tempdir().unwrap();
    let log = dir.path().join("log.lammps");
    fs::write(&log, LOG).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_fuq-sim"))
        .args(["inspect", "--log"])
        .arg(&log)
        .output()
        .expect("run fuq-sim inspect");
    assert!(output.status.success());
    let body = String::from_utf8(output.stdout).unwrap();
    assert!(body.contains("atoms\t2"));
    assert!(body.contains("rows\t2"));
    assert!(body.contains("PotEng\tthermo\t-4"));
    assert!(body.contains("Step\tthermo\t0"));
    assert!(body.contains("v_strain\tunsupported\t0"));
}

#[test]
fn extract_writes_results() {
    let dir = tempdir().unwrap();
    let main = dir.path().join("study");
    let copy = main.join("main_runs").join("copy_0");
    fs::create_dir_all(&copy).unwrap();
    fs::write(copy.join("log.lammps"), LOG).unwrap();
    let config = dir.path().join("study.yaml");
    fs::write(
        &config,
        format!(
            "quantities: [Temp]\npotential:\n  name: lj\n\
             init_dir: {}\nmain_dir: {}\nreplicates: 1\n",
            dir.path().display(),
            main.display()
        ),
    )
    .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_fuq-sim"))
        .args(["extract", "--config"])
        .arg(&config)
        .output()
        .expect("run fuq-sim extract");
    assert!(output.status.success());
    let body = String::from_utf8(output.stdout).unwrap();
    assert_eq!(body, "Temp\tPotEng\n305.000\t-2.500\t\n");

    let json: Value =
        serde_json::from_slice(&fs::read(main.join("results").join("qoi.json")).unwrap()).unwrap();
    assert_eq!(json["replicates"], 1);
    assert!(main.join("results").join("qoi.csv").exists());
}

#[test]
fn missing_log_fails() {
    let dir = tempdir().unwrap();
    let status = Command::new(env!("CARGO_BIN_EXE_fuq-sim"))
        .args(["inspect", "--log"])
        .arg(dir.path().join("absent.log"))
        .status()
        .expect("run fuq-sim inspect");
    assert!(!status.success());
}
