use std::io::{self, Write};
use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use super::helper::RunContext;
use crate::cli::args::{AnalyzeCommand, OutputFormat};
use crate::cli::exit_status::ExitStatus;
use crate::cli::prompt::pick_file;
use crate::cli::report::{
    SUCCESS_MARK, print_banner, print_degradations, print_footer, print_load_error,
    print_question, report_json,
};
use crate::core::discover::{InputSource, ResolvedInput, candidates, resolve_input};
use crate::core::loader::{LoadError, load_table};
use crate::core::processor::{process, question_columns};

pub fn analyze(cmd: AnalyzeCommand) -> Result<ExitStatus> {
    let AnalyzeCommand {
        path,
        dir,
        pick,
        extract_dir,
        common,
    } = cmd;

    let ctx = RunContext::load(&common)?;
    let text_output = common.format == OutputFormat::Table;
    let default_name = ctx.config.default_input.as_str();
    let base_dir = dir;

    let mut out = io::stdout().lock();
    if text_output {
        print_banner(&mut out);
    }

    let input = if pick {
        let found = candidates(&base_dir);
        if found.is_empty() {
            let err = LoadError::NotFound(base_dir.join(default_name));
            print_load_error(&err, Some(default_name), &mut io::stderr().lock());
            return Ok(ExitStatus::Failure);
        }
        let chosen = pick_file(&found, &mut io::stdin().lock(), &mut io::stderr().lock())?;
        ResolvedInput {
            path: chosen,
            source: InputSource::Picked,
        }
    } else {
        match resolve_input(path.as_deref(), &base_dir, default_name) {
            Ok(input) => input,
            Err(err) => {
                let hint = path.is_none().then_some(default_name);
                print_load_error(&err, hint, &mut io::stderr().lock());
                return Ok(ExitStatus::Failure);
            }
        }
    };

    if text_output {
        print_input_source(&input, &base_dir.join(default_name), &mut out);
        let _ = writeln!(out);
        let _ = writeln!(out, "Loading file from: {}", input.path.display());
    }

    let extract_dir = extract_dir.unwrap_or_else(|| ctx.cwd.clone());
    let table = match load_table(&input.path, &extract_dir) {
        Ok(table) if table.is_empty() => {
            print_load_error(&LoadError::EmptyDataset, None, &mut io::stderr().lock());
            return Ok(ExitStatus::Failure);
        }
        Ok(table) => table,
        Err(err) => {
            print_load_error(&err, None, &mut io::stderr().lock());
            return Ok(ExitStatus::Failure);
        }
    };

    let identity_columns = &ctx.config.identity_columns;
    if text_output {
        let _ = writeln!(
            out,
            "{} Loaded file with {} records and {} columns.",
            SUCCESS_MARK.green(),
            table.row_count(),
            table.column_count()
        );
        let _ = writeln!(
            out,
            "Analyzing {} questions...",
            question_columns(&table, identity_columns).count()
        );
    }

    let classifier = ctx.classifier()?;
    let report = process(&table, &classifier, identity_columns)?;

    if text_output {
        for question in &report.questions {
            print_question(question, &mut out);
        }
        print_footer(&mut out);
    } else {
        let json = report_json(&input.path, &report);
        let _ = writeln!(out, "{}", serde_json::to_string_pretty(&json)?);
    }
    let _ = out.flush();

    print_degradations(
        report.degradations().map(|(q, r, d)| (Some(q), r, d)),
        ctx.translation_enabled,
        common.verbose,
        &mut io::stderr().lock(),
    );

    Ok(ExitStatus::Success)
}

fn print_input_source<W: Write>(input: &ResolvedInput, default_path: &Path, out: &mut W) {
    match &input.source {
        InputSource::Explicit | InputSource::Picked => {}
        InputSource::Default => {
            let _ = writeln!(out, "Found file at path: {}", input.path.display());
        }
        InputSource::Discovered { candidates } => {
            let _ = writeln!(out, "File not found at '{}'", default_path.display());
            let _ = writeln!(
                out,
                "Found {} potential feedback file(s):",
                candidates.len()
            );
            for (index, candidate) in candidates.iter().enumerate() {
                let name = candidate
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let _ = writeln!(out, "  {}. {}", index + 1, name);
            }
            let _ = writeln!(out, "Using file: {}", input.path.display());
        }
    }
}
