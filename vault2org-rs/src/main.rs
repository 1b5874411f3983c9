//! vault2org CLI entry point.

use clap::Parser;
use std::process::ExitCode;
use vault2org::cli::args::Cli;
use vault2org::cli::convert;
use vault2org::cli::output::Output;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = Output::new(cli.output_format(), cli.quiet, cli.verbose > 0);

    match convert::run(&cli, &output) {
        Ok(code) => ExitCode::from(code.code() as u8),
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {}", e);
            }
            ExitCode::from(e.exit_code() as u8)
        }
    }
}
