//! Interactive file selection.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;

/// Ask the user to pick one of `candidates` by 1-based number.
///
/// An empty answer or end of input selects the first candidate; anything
/// else out of range asks again.
pub fn pick_file<R: BufRead, W: Write>(
    candidates: &[PathBuf],
    input: &mut R,
    output: &mut W,
) -> Result<PathBuf> {
    let Some(first) = candidates.first() else {
        anyhow::bail!("No files to choose from");
    };

    writeln!(output, "Found {} potential feedback file(s):", candidates.len())?;
    for (index, candidate) in candidates.iter().enumerate() {
        writeln!(output, "  {}. {}", index + 1, file_label(candidate))?;
    }

    loop {
        write!(
            output,
            "Select a file [1-{}] (Enter for 1): ",
            candidates.len()
        )?;
        output.flush()?;

        let mut answer = String::new();
        let read = input
            .read_line(&mut answer)
            .context("Failed to read selection")?;
        let answer = answer.trim();

        if read == 0 || answer.is_empty() {
            if read == 0 {
                writeln!(output)?;
            }
            return Ok(first.clone());
        }

        match answer.parse::<usize>() {
            Ok(n) if (1..=candidates.len()).contains(&n) => return Ok(candidates[n - 1].clone()),
            _ => writeln!(
                output,
                "{} '{}' is not a number between 1 and {}",
                "warning:".bold().yellow(),
                answer,
                candidates.len()
            )?,
        }
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
