use std::io::{self, Write};

use anyhow::Result;
use rayon::prelude::*;
use serde_json::json;

use super::helper::RunContext;
use crate::cli::args::{ClassifyCommand, OutputFormat};
use crate::cli::exit_status::ExitStatus;
use crate::cli::report::{print_degradations, print_table, responses_json};
use crate::core::classifier::FatalError;
use crate::core::processor::ScoredFeedback;

pub fn classify(cmd: ClassifyCommand) -> Result<ExitStatus> {
    let ClassifyCommand { texts, common } = cmd;

    let ctx = RunContext::load(&common)?;
    let classifier = ctx.classifier()?;

    let responses = texts
        .par_iter()
        .map(|text| Ok(ScoredFeedback::new(text.as_str(), classifier.classify_text(text)?)))
        .collect::<Result<Vec<_>, FatalError>>()?;

    let mut out = io::stdout().lock();
    match common.format {
        OutputFormat::Table => print_table(&responses, &mut out),
        OutputFormat::Json => {
            let json = json!({ "responses": responses_json(&responses) });
            let _ = writeln!(out, "{}", serde_json::to_string_pretty(&json)?);
        }
    }
    let _ = out.flush();

    print_degradations(
        responses
            .iter()
            .filter_map(|r| r.degradation.as_ref().map(|d| (None, r, d))),
        ctx.translation_enabled,
        common.verbose,
        &mut io::stderr().lock(),
    );

    Ok(ExitStatus::Success)
}
