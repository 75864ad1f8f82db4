use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    extract::{self, ExtractArgs},
    inspect::{self, InspectArgs},
    submit::{self, SubmitArgs},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "fuq-sim", about = "Replicate MD runs and quantity-of-interest extraction")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render and launch a batch of replicate runs.
    Submit(SubmitArgs),
    /// Fold the replicate logs into quantity-of-interest means and spreads.
    Extract(ExtractArgs),
    /// Summarise the thermo table of a single log.
    Inspect(InspectArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fuq_sim=info,fuq_qoi=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Submit(args) => submit::run(&args),
        Command::Extract(args) => extract::run(&args),
        Command::Inspect(args) => inspect::run(&args),
    }
}
