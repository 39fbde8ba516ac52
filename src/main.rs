//! CLI entry point for running wave function collapse job lists

use clap::Parser;
use wavetile::io::cli::{Cli, JobRunner};

// Allow print for the closing summary
#[allow(clippy::print_stderr)]
fn main() -> wavetile::Result<()> {
    let cli = Cli::parse();
    let quiet = cli.quiet;
    let mut runner = JobRunner::new(cli);
    let summary = runner.process()?;

    if !quiet {
        eprintln!(
            "{} rendered, {} failed, {} skipped (seed {:x})",
            summary.rendered,
            summary.failed,
            summary.skipped,
            runner.master_seed()
        );
    }
    Ok(())
}
