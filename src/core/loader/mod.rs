//! Dataset loading.
//!
//! A file is decoded through one of three formats:
//! - [`SpreadsheetFormat`]: `.xlsx` workbooks (first worksheet)
//! - [`DelimitedFormat`]: `.csv`, `.tsv` and `.txt` files
//! - [`ArchiveFormat`]: `.zip` archives holding one of the above
//!
//! The format is picked from the extension and confirmed by sniffing the file
//! header, so a workbook saved as `.zip` still loads as a spreadsheet and a
//! `.xlsx` that is not a ZIP container is reported as malformed.

mod archive;
mod delimited;
mod spreadsheet;

pub use archive::ArchiveFormat;
pub use delimited::DelimitedFormat;
pub use spreadsheet::SpreadsheetFormat;

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use enum_dispatch::enum_dispatch;

use crate::core::table::Table;

/// Extensions of files that hold a table directly (not an archive).
pub const TABLE_EXTENSIONS: &[&str] = &["xlsx", "csv", "tsv", "txt"];

const ZIP_MAGIC: &[u8; 4] = b"PK\x03\x04";

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("unsupported file format '{0}' (expected .xlsx, .csv, .tsv, .txt or .zip)")]
    UnsupportedFormat(String),
    #[error("no spreadsheet or delimited file found in archive {}", .0.display())]
    EmptyArchive(PathBuf),
    #[error("malformed {kind} file {}: {reason}", .path.display())]
    Malformed {
        kind: &'static str,
        path: PathBuf,
        reason: String,
    },
    #[error("the file is empty or invalid")]
    EmptyDataset,
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl LoadError {
    pub(crate) fn io(path: &Path) -> impl FnOnce(std::io::Error) -> LoadError + '_ {
        move |source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn malformed(kind: &'static str, path: &Path, reason: impl ToString) -> LoadError {
        LoadError::Malformed {
            kind,
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

/// Decodes a file of one format into a [`Table`].
#[enum_dispatch]
pub trait TableSource {
    fn read(&self, path: &Path) -> Result<Table, LoadError>;
}

/// Supported input formats.
#[enum_dispatch(TableSource)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetFormat {
    Spreadsheet(SpreadsheetFormat),
    Delimited(DelimitedFormat),
    Archive(ArchiveFormat),
}

impl DatasetFormat {
    /// Pick the format for `path`. Archives extract their member into
    /// `extract_dir`.
    pub fn detect(path: &Path, extract_dir: &Path) -> Result<Self, LoadError> {
        match extension(path).as_str() {
            "xlsx" => {
                if !is_zip_container(path)? {
                    return Err(LoadError::malformed(
                        "spreadsheet",
                        path,
                        "not an OOXML workbook",
                    ));
                }
                Ok(SpreadsheetFormat.into())
            }
            "zip" => {
                if !is_zip_container(path)? {
                    return Err(LoadError::malformed("archive", path, "not a ZIP archive"));
                }
                if spreadsheet::is_workbook(path)? {
                    Ok(SpreadsheetFormat.into())
                } else {
                    Ok(ArchiveFormat::new(extract_dir).into())
                }
            }
            other => DelimitedFormat::for_extension(other)
                .map(Into::into)
                .ok_or_else(|| LoadError::UnsupportedFormat(display_extension(other))),
        }
    }
}

/// Load a dataset from `path`.
pub fn load_table(path: &Path, extract_dir: &Path) -> Result<Table, LoadError> {
    if !path.is_file() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }
    DatasetFormat::detect(path, extract_dir)?.read(path)
}

/// True if the file name carries an extension the loader understands.
pub fn is_supported_file(path: &Path) -> bool {
    let ext = extension(path);
    ext == "zip" || TABLE_EXTENSIONS.contains(&ext.as_str())
}

pub(crate) fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default()
}

fn display_extension(ext: &str) -> String {
    if ext.is_empty() {
        "(none)".to_string()
    } else {
        format!(".{ext}")
    }
}

fn is_zip_container(path: &Path) -> Result<bool, LoadError> {
    let mut magic = [0u8; 4];
    let mut file = File::open(path).map_err(LoadError::io(path))?;
    match file.read_exact(&mut magic) {
        Ok(()) => Ok(&magic == ZIP_MAGIC),
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => Ok(false),
        Err(e) => Err(LoadError::io(path)(e)),
    }
}

/// Column name for a missing or blank header cell.
pub(crate) fn unnamed_column(index: usize) -> String {
    format!("Unnamed: {index}")
}
