use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use loopdiff::RunConfig;

/// Differential chromatin loop strength testing against an empirical null.
#[derive(Parser, Debug)]
#[command(name = "loopdiff", version, about)]
struct Cli {
    /// Run configuration file: key=value lines with sample_loops_path,
    /// random_loops_path and output_directory (decimal_separator optional)
    config: PathBuf,
}

fn main() -> ExitCode {
    pretty_env_logger::init();
    let cli = Cli::parse();
    match try_main(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("loopdiff: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn try_main(cli: &Cli) -> anyhow::Result<()> {
    let config = RunConfig::from_file(&cli.config)
        .with_context(|| format!("loading configuration from {}", cli.config.display()))?;
    let summary = loopdiff::run(&config)?;
    println!(
        "tested {} loops against {} null fold changes; results written to {}",
        summary.tested_loops,
        summary.null_size,
        config.output_directory.display()
    );
    Ok(())
}
