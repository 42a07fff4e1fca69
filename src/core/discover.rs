//! Input file resolution.
//!
//! Order: an explicit path, then the conventional default file in the base
//! directory, then the first supported file found by scanning the base
//! directory (one level, filesystem order).

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::core::loader::{LoadError, is_supported_file};

/// How the input file was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Given on the command line.
    Explicit,
    /// The default file name in the base directory.
    Default,
    /// Picked from a directory scan; `candidates` lists every supported file
    /// found, the chosen one first.
    Discovered { candidates: Vec<PathBuf> },
    /// Chosen interactively from [`candidates`].
    Picked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInput {
    pub path: PathBuf,
    pub source: InputSource,
}

pub fn resolve_input(
    explicit: Option<&Path>,
    base_dir: &Path,
    default_name: &str,
) -> Result<ResolvedInput, LoadError> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(LoadError::NotFound(path.to_path_buf()));
        }
        return Ok(ResolvedInput {
            path: path.to_path_buf(),
            source: InputSource::Explicit,
        });
    }

    let default_path = base_dir.join(default_name);
    if default_path.is_file() {
        return Ok(ResolvedInput {
            path: default_path,
            source: InputSource::Default,
        });
    }

    let candidates = candidates(base_dir);
    match candidates.first() {
        Some(first) => Ok(ResolvedInput {
            path: first.clone(),
            source: InputSource::Discovered { candidates },
        }),
        None => Err(LoadError::NotFound(default_path)),
    }
}

/// Supported files directly inside `base_dir`, in filesystem order.
///
/// Unreadable entries are skipped; a missing directory yields no candidates.
pub fn candidates(base_dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(base_dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| is_supported_file(path))
        .collect()
}
