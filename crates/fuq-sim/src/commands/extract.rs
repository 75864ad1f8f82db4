use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use fuq_qoi::{QoiConfig, QoiStudy};
use tracing::info;

#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// YAML study configuration.
    #[arg(long)]
    pub config: PathBuf,
    /// Output directory for `qoi.csv` and `qoi.json`; defaults to `<main_dir>/results`.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn run(args: &ExtractArgs) -> Result<(), Box<dyn Error>> {
    let config = QoiConfig::load(&args.config)?;
    let study = QoiStudy::new(config)?;
    let result = study.extract()?;

    let out = args
        .out
        .clone()
        .unwrap_or_else(|| study.config().results_dir());
    fs::create_dir_all(&out)?;
    result.write_csv(&out.join("qoi.csv"))?;
    result.write_json(&out.join("qoi.json"))?;
    info!(out = %out.display(), "results written");

    print!("{result}");
    Ok(())
}
