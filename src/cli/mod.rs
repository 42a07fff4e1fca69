//! Command-line layer: argument parsing, command dispatch and rendering.

use anyhow::Result;

mod args;
mod commands;
mod exit_status;
mod prompt;
mod report;

pub use args::{
    AnalyzeCommand, Arguments, ClassifyCommand, Command, CommonArgs, OutputFormat,
};
pub use exit_status::ExitStatus;

use commands::{analyze::analyze, classify::classify, init::init};

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let Some(Arguments {
        command: Some(command),
    }) = args.with_command_or_help()
    else {
        return Ok(ExitStatus::Success);
    };

    match command {
        Command::Analyze(cmd) => analyze(cmd),
        Command::Classify(cmd) => classify(cmd),
        Command::Init => init(),
    }
}
