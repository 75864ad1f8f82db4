use std::cell::RefCell;
use std::fs;
use std::path::Path;

use fuq_core::errors::FuqError;
use fuq_core::replicate_seed;
use fuq_qoi::{
    DryRunSubmitter, QoiConfig, QoiStudy, ReplicateJob, RunManifest, SubmitMode, Submitter,
    MANIFEST_FILE,
};
use tempfile::tempdir;

const IN_TEMPLATE: &str = "\
units metal
pair_style TABLESTYLE
pair_coeff TABLECOEFF
velocity all create TEMP SEED
log RUNDIR/log.lammps
";

const SUB_TEMPLATE: &str = "#PBS -N NAME\nlmp -in INFILE\n";

fn study(root: &Path, extra: &str) -> QoiStudy {
    let init = root.join("init");
    fs::create_dir_all(&init).unwrap();
    fs::write(init.join("in.template"), IN_TEMPLATE).unwrap();
    fs::write(init.join("submit.template"), SUB_TEMPLATE).unwrap();
    let yaml = format!(
        "quantities: [Temp]
potential:
  name: eam
  pair_style: eam/alloy
  pair_coeff: '* * Cu.eam Cu'
  param_dir: /pots
init_dir: {}
main_dir: {}
replicates: 2
temperature: 300
master_seed: 11
{extra}",
        init.display(),
        root.join("study").display(),
    );
    QoiStudy::new(QoiConfig::from_yaml_str(&yaml).unwrap()).unwrap()
}

#[derive(Default)]
struct Recorder(RefCell<Vec<ReplicateJob>>);

impl Submitter for Recorder {
    fn submit(&self, job: &ReplicateJob) -> Result<(), FuqError> {
        self.0.borrow_mut().push(job.clone());
        Ok(())
    }
}

#[test]
fn dry_run_appends_after_existing_copies() {
    let dir = tempdir().unwrap();
    let study = study(dir.path(), "");
    let run_dir = study.config().run_dir();
    fs::create_dir_all(run_dir.join("copy_0")).unwrap();
    fs::create_dir_all(run_dir.join("copy_3")).unwrap();

    let manifest = study.submit(&DryRunSubmitter, SubmitMode::DryRun).unwrap();
    assert_eq!(manifest.start, 4);
    assert_eq!(manifest.seeds, vec![replicate_seed(11, 4), replicate_seed(11, 5)]);

    let input = fs::read_to_string(run_dir.join("copy_4").join("in.lammps")).unwrap();
    assert!(input.contains("pair_style eam/alloy"));
    assert!(input.contains("pair_coeff * * Cu.eam Cu"));
    assert!(input.contains(&format!("velocity all create 300 {}", replicate_seed(11, 4))));
    assert!(input.contains("log /pots/log.lammps"));
    assert!(run_dir.join("copy_5").join("in.lammps").exists());
    assert!(!run_dir.join("copy_4").join("run.pbs").exists());

    let loaded = RunManifest::load(&run_dir.join(MANIFEST_FILE)).unwrap();
    assert_eq!(loaded, manifest);
    assert_eq!(loaded.quantities, vec!["Temp", "PotEng"]);
}

#[test]
fn queued_jobs_carry_rendered_scripts() {
    let dir = tempdir().unwrap();
    let study = study(dir.path(), "overwrite: true\n");
    fs::create_dir_all(study.config().run_dir().join("copy_7")).unwrap();

    let recorder = Recorder::default();
    let manifest = study.submit(&recorder, SubmitMode::Pbs).unwrap();
    assert_eq!(manifest.start, 0);

    let jobs = recorder.0.borrow();
    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs[1].copy, 1);
    assert_eq!(
        jobs[1].sub_text.as_deref(),
        Some("#PBS -N eam_1\nlmp -in in.lammps\n")
    );
    assert!(jobs[0].dir.ends_with("main_runs/copy_0"));
}

#[test]
fn missing_template_is_a_submit_error() {
    let dir = tempdir().unwrap();
    let study = study(dir.path(), "");
    fs::remove_file(study.config().sub_template_path()).unwrap();
    let err = study.submit(&Recorder::default(), SubmitMode::Pbs).unwrap_err();
    assert_eq!(err.code(), "template-read");
}
