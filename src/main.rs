use clap::Parser;
use fvreport::cli::{Cli, run};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
