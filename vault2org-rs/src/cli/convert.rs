//! The conversion command.

use crate::cli::args::Cli;
use crate::cli::output::Output;
use crate::config::Config;
use crate::convert::converter_for;
use crate::error::{ExitCode, Result};
use crate::pipeline::{ConvertOptions, Orchestrator};
use crate::vault::Vault;

/// Convert the vault named on the command line and print the batch report.
pub fn run(cli: &Cli, output: &Output) -> Result<ExitCode> {
    let mut config = Config::load(cli.config.as_deref())?;
    cli.apply_to(&mut config);
    config.validate()?;

    let vault = Vault::from_config(&cli.input, &config)?;
    let converter = converter_for(&config);

    let options = ConvertOptions {
        output_root: cli.output.clone(),
        math: config.math,
        jobs: config.worker_count(),
        dry_run: cli.dry_run,
    };

    let report = Orchestrator::new(converter.as_ref(), options, output).run(&vault)?;
    output.print(&report)?;

    output.info(&format!(
        "{} of {} notes converted, {} failed",
        report.converted.len(),
        report.total(),
        report.failed.len()
    ));

    if report.is_success() {
        Ok(ExitCode::Success)
    } else {
        Ok(ExitCode::DocumentsFailed)
    }
}
