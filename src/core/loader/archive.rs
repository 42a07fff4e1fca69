use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use zip::ZipArchive;

use super::{DatasetFormat, LoadError, TABLE_EXTENSIONS, TableSource, extension};
use crate::core::table::Table;

/// ZIP archive holding a spreadsheet or delimited file.
///
/// The first member (in archive order) with a table extension is extracted
/// into `extract_dir` under its base name and loaded by its own format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveFormat {
    extract_dir: PathBuf,
}

impl ArchiveFormat {
    pub fn new(extract_dir: impl AsRef<Path>) -> Self {
        Self {
            extract_dir: extract_dir.as_ref().to_path_buf(),
        }
    }

    /// Extract the first table member and return its path on disk.
    pub fn extract(&self, path: &Path) -> Result<PathBuf, LoadError> {
        let file = File::open(path).map_err(LoadError::io(path))?;
        let mut archive =
            ZipArchive::new(file).map_err(|e| LoadError::malformed("archive", path, e))?;

        for index in 0..archive.len() {
            let mut member = archive
                .by_index(index)
                .map_err(|e| LoadError::malformed("archive", path, e))?;
            if member.is_dir() {
                continue;
            }
            // Members escaping the archive root are skipped.
            let Some(relative) = member.enclosed_name() else {
                continue;
            };
            if !TABLE_EXTENSIONS.contains(&extension(&relative).as_str()) {
                continue;
            }

            let Some(file_name) = relative.file_name() else {
                continue;
            };
            let target = self.extract_dir.join(file_name);
            fs::create_dir_all(&self.extract_dir).map_err(LoadError::io(&self.extract_dir))?;
            let mut out = File::create(&target).map_err(LoadError::io(&target))?;
            io::copy(&mut member, &mut out).map_err(LoadError::io(&target))?;
            return Ok(target);
        }

        Err(LoadError::EmptyArchive(path.to_path_buf()))
    }
}

impl TableSource for ArchiveFormat {
    fn read(&self, path: &Path) -> Result<Table, LoadError> {
        let extracted = self.extract(path)?;
        DatasetFormat::detect(&extracted, &self.extract_dir)?.read(&extracted)
    }
}
