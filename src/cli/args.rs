//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `analyze`: Classify every response of a feedback dataset, question by question
//! - `classify`: Classify texts given on the command line
//! - `init`: Initialize feelback configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Analyze(cmd)) => cmd.common.verbose,
            Some(Command::Classify(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Boxed tables, one per question
    #[default]
    Table,
    /// A single JSON document
    Json,
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Score text as written, without translating it to English
    #[arg(long)]
    pub no_translate: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct AnalyzeCommand {
    /// Dataset to analyze (.xlsx, .csv, .tsv, .txt or .zip)
    pub path: Option<PathBuf>,

    /// Directory searched for the default file when no path is given
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,

    /// Choose the dataset interactively from the files in --dir
    #[arg(long, conflicts_with = "path")]
    pub pick: bool,

    /// Where archive members are extracted (default: current directory)
    #[arg(long)]
    pub extract_dir: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct ClassifyCommand {
    /// Texts to classify
    #[arg(required = true)]
    pub texts: Vec<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Classify the responses of a feedback file, question by question
    Analyze(AnalyzeCommand),
    /// Classify the given texts
    Classify(ClassifyCommand),
    /// Initialize a new .feelbackrc.json configuration file
    Init,
}
