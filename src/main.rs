use std::process::ExitCode;

use clap::Parser;
use feelback::cli::{Arguments, ExitStatus};

fn main() -> ExitCode {
    let args = Arguments::parse();
    let verbose = args.verbose();

    match feelback::cli::run_cli(args) {
        Ok(status) => status.into(),
        Err(err) => {
            if verbose {
                eprintln!("Error: {:?}", err);
            } else {
                eprintln!("Error: {:#}", err);
            }
            ExitStatus::Error.into()
        }
    }
}
