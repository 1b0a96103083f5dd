//! CLI entry point for the marble routing demo

use clap::Parser;
use marbletrack::io::cli::{Cli, SessionRunner};
use marbletrack::io::logging::init_logging;

fn main() -> marbletrack::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let mut runner = SessionRunner::new(cli);
    runner.run().map(drop)
}
