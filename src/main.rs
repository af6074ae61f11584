use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing::debug;

use semver_select::app;
use semver_select::cli::Cli;
use semver_select::logging;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let _guard = logging::init(&cli.log_config())?;

    let stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();

    match app::run(&cli.select_config(), &cli.candidates, stdin, &mut stdout) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            debug!("Selection failed: {:?}", e);
            eprintln!("semver-select: error: {e}");
            Ok(ExitCode::FAILURE)
        }
    }
}
