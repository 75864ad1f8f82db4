use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use fuq_core::{classify, Category};
use fuq_thermo::read_thermo;

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Engine log to parse.
    #[arg(long)]
    pub log: PathBuf,
}

pub fn run(args: &InspectArgs) -> Result<(), Box<dyn Error>> {
    let table = read_thermo(&args.log)?;
    println!("atoms\t{}", table.atoms);
    println!("rows\t{}", table.rows());
    for name in &table.columns {
        let kind = match classify(name) {
            Ok(Category::DirectThermo) => "thermo",
            Ok(Category::Fluctuation(_)) => "fluctuation",
            Err(_) => "unsupported",
        };
        println!("{name}\t{kind}\t{}", table.initial(name)?);
    }
    Ok(())
}
