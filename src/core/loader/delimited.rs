use std::fs::File;
use std::path::Path;

use super::{LoadError, TableSource, unnamed_column};
use crate::core::table::Table;

/// Delimited text with a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelimitedFormat {
    delimiter: u8,
}

impl DelimitedFormat {
    pub fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }

    pub fn for_extension(ext: &str) -> Option<Self> {
        match ext {
            "csv" | "txt" => Some(Self::new(b',')),
            "tsv" => Some(Self::new(b'\t')),
            _ => None,
        }
    }
}

impl TableSource for DelimitedFormat {
    fn read(&self, path: &Path) -> Result<Table, LoadError> {
        let file = File::open(path).map_err(LoadError::io(path))?;
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .flexible(true)
            .has_headers(true)
            .from_reader(file);

        let malformed = |e: csv::Error| LoadError::malformed("delimited", path, e);

        // Byte records so a stray non-UTF-8 byte does not reject the file.
        let headers: Vec<String> = reader
            .byte_headers()
            .map_err(malformed)?
            .iter()
            .enumerate()
            .map(|(i, h)| {
                let name = String::from_utf8_lossy(h);
                let name = name.trim_start_matches('\u{feff}');
                if name.is_empty() {
                    unnamed_column(i)
                } else {
                    name.to_string()
                }
            })
            .collect();

        let mut table = Table::new(headers);
        for record in reader.byte_records() {
            let record = record.map_err(malformed)?;
            table.push_row(
                record
                    .iter()
                    .map(|field| {
                        (!field.is_empty()).then(|| String::from_utf8_lossy(field).into_owned())
                    })
                    .collect(),
            );
        }
        Ok(table)
    }
}
