use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use fuq_qoi::{CommandSubmitter, DryRunSubmitter, QoiConfig, QoiStudy, SubmitMode, Submitter};

#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// YAML study configuration.
    #[arg(long)]
    pub config: PathBuf,
    /// Launch mode: pbs, local or dry-run.
    #[arg(long, default_value = "pbs")]
    pub mode: SubmitMode,
}

pub fn run(args: &SubmitArgs) -> Result<(), Box<dyn Error>> {
    let config = QoiConfig::load(&args.config)?;
    let study = QoiStudy::new(config)?;
    let submitter: Box<dyn Submitter> = match args.mode {
        SubmitMode::DryRun => Box::new(DryRunSubmitter),
        mode => Box::new(CommandSubmitter::new(mode)),
    };
    let manifest = study.submit(submitter.as_ref(), args.mode)?;
    println!(
        "submitted replicates {}..{} in {}",
        manifest.start,
        manifest.start + manifest.count,
        manifest.run_dir.display()
    );
    Ok(())
}
