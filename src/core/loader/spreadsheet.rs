//! OOXML workbook (`.xlsx`) reader.
//!
//! Reads the first worksheet only. Shared strings, inline strings, numbers
//! and booleans are decoded; formatting, formulas and other sheets are
//! ignored. The first row is the header.

use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use zip::ZipArchive;

use super::{LoadError, TableSource, unnamed_column};
use crate::core::table::{Cell, Table};

const WORKBOOK: &str = "xl/workbook.xml";
const WORKBOOK_RELS: &str = "xl/_rels/workbook.xml.rels";
const SHARED_STRINGS: &str = "xl/sharedStrings.xml";
const FIRST_SHEET: &str = "xl/worksheets/sheet1.xml";
/// Column count of an OOXML worksheet (`A` through `XFD`).
const MAX_COLUMNS: usize = 16_384;

static SHARED_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<si\b[^>]*?(?:/>|>(.*?)</si>)").unwrap());
static TEXT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<t\b[^>]*?(?:/>|>(.*?)</t>)").unwrap());
static PHONETIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<rPh\b.*?</rPh>").unwrap());
static ROW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<row\b[^>]*?(?:/>|>(.*?)</row>)").unwrap());
static CELL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<c\b([^>]*?)(?:/>|>(.*?)</c>)").unwrap());
static VALUE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<v\b[^>]*>(.*?)</v>").unwrap());
static SHEET_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<sheet\b[^>]*>").unwrap());
static RELATIONSHIP_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<Relationship\b[^>]*>").unwrap());
static ATTRIBUTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"([\w:]+)\s*=\s*"([^"]*)""#).unwrap());

/// First worksheet of an `.xlsx` workbook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpreadsheetFormat;

impl TableSource for SpreadsheetFormat {
    fn read(&self, path: &Path) -> Result<Table, LoadError> {
        let file = File::open(path).map_err(LoadError::io(path))?;
        let mut archive =
            ZipArchive::new(file).map_err(|e| LoadError::malformed("spreadsheet", path, e))?;
        read_workbook(&mut archive).map_err(|reason| LoadError::malformed("spreadsheet", path, reason))
    }
}

/// True if the ZIP container at `path` is an OOXML workbook.
pub(super) fn is_workbook(path: &Path) -> Result<bool, LoadError> {
    let file = File::open(path).map_err(LoadError::io(path))?;
    let archive = ZipArchive::new(file).map_err(|e| LoadError::malformed("archive", path, e))?;
    let found = archive.file_names().any(|name| name == WORKBOOK);
    Ok(found)
}

fn read_workbook<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<Table, String> {
    let shared = match read_member(archive, SHARED_STRINGS)? {
        Some(xml) => parse_shared_strings(&xml),
        None => Vec::new(),
    };

    let sheet_path = first_sheet_path(archive)?;
    let sheet = read_member(archive, &sheet_path)?
        .ok_or_else(|| format!("worksheet {sheet_path} is missing"))?;

    parse_sheet(&sheet, &shared)
}

fn read_member<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<Option<String>, String> {
    let mut member = match archive.by_name(name) {
        Ok(member) => member,
        Err(zip::result::ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.to_string()),
    };
    let mut content = String::new();
    member
        .read_to_string(&mut content)
        .map_err(|e| format!("{name}: {e}"))?;
    Ok(Some(content))
}

/// Path of the first sheet listed in the workbook, resolved through the
/// workbook relationships. Falls back to `sheet1.xml`, then to any worksheet.
fn first_sheet_path<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<String, String> {
    if let (Some(workbook), Some(rels)) = (
        read_member(archive, WORKBOOK)?,
        read_member(archive, WORKBOOK_RELS)?,
    ) && let Some(target) = resolve_first_sheet(&workbook, &rels)
        && archive.file_names().any(|n| n == target)
    {
        return Ok(target);
    }

    if archive.file_names().any(|n| n == FIRST_SHEET) {
        return Ok(FIRST_SHEET.to_string());
    }

    archive
        .file_names()
        .find(|n| n.starts_with("xl/worksheets/") && n.ends_with(".xml"))
        .map(str::to_string)
        .ok_or_else(|| "workbook has no worksheets".to_string())
}

fn resolve_first_sheet(workbook: &str, rels: &str) -> Option<String> {
    let sheet_tag = SHEET_TAG_RE.find(workbook)?;
    let sheet_attrs = attributes(sheet_tag.as_str());
    let rel_id = sheet_attrs.get("r:id")?;

    RELATIONSHIP_TAG_RE
        .find_iter(rels)
        .map(|tag| attributes(tag.as_str()))
        .find(|attrs| attrs.get("Id") == Some(rel_id))
        .and_then(|attrs| attrs.get("Target").cloned())
        .map(|target| match target.strip_prefix('/') {
            Some(absolute) => absolute.to_string(),
            None => format!("xl/{target}"),
        })
}

fn attributes(tag: &str) -> HashMap<String, String> {
    ATTRIBUTE_RE
        .captures_iter(tag)
        .map(|c| (c[1].to_string(), decode_entities(&c[2])))
        .collect()
}

fn parse_shared_strings(xml: &str) -> Vec<String> {
    SHARED_ITEM_RE
        .captures_iter(xml)
        .map(|c| c.get(1).map(|m| collect_text(m.as_str())).unwrap_or_default())
        .collect()
}

/// Concatenate all `<t>` runs, skipping phonetic hints.
fn collect_text(fragment: &str) -> String {
    let fragment = PHONETIC_RE.replace_all(fragment, "");
    TEXT_RE
        .captures_iter(&fragment)
        .filter_map(|c| c.get(1))
        .map(|m| decode_entities(m.as_str()))
        .collect()
}

fn parse_sheet(xml: &str, shared: &[String]) -> Result<Table, String> {
    let mut rows: Vec<Vec<Cell>> = Vec::new();
    for row in ROW_RE.captures_iter(xml) {
        let Some(content) = row.get(1) else {
            rows.push(Vec::new());
            continue;
        };
        let mut cells: Vec<Cell> = Vec::new();
        for cell in CELL_RE.captures_iter(content.as_str()) {
            let attrs = attributes(&cell[1]);
            let index = match attrs.get("r") {
                Some(r) => column_index(r)?,
                None => None,
            }
            .unwrap_or(cells.len());
            if index >= MAX_COLUMNS {
                return Err(format!("too many columns in row {}", rows.len() + 1));
            }
            let value = cell
                .get(2)
                .and_then(|body| cell_value(body.as_str(), attrs.get("t").map(String::as_str), shared));
            if cells.len() <= index {
                cells.resize(index + 1, None);
            }
            cells[index] = value;
        }
        rows.push(cells);
    }

    let mut rows = rows.into_iter();
    let header = rows.next().unwrap_or_default();
    let width = header.len();
    let mut data: Vec<Vec<Cell>> = rows.collect();
    let width = data.iter().map(Vec::len).fold(width, usize::max);

    let columns = (0..width)
        .map(|i| match header.get(i).cloned().flatten() {
            Some(name) if !name.is_empty() => name,
            _ => unnamed_column(i),
        })
        .collect();

    let mut table = Table::new(columns);
    for row in data.drain(..) {
        table.push_row(row);
    }
    Ok(table)
}

fn cell_value(body: &str, cell_type: Option<&str>, shared: &[String]) -> Cell {
    let raw = || {
        VALUE_RE
            .captures(body)
            .map(|c| decode_entities(&c[1]))
    };
    let value = match cell_type {
        Some("s") => raw()
            .and_then(|idx| idx.trim().parse::<usize>().ok())
            .and_then(|idx| shared.get(idx).cloned()),
        Some("inlineStr") => Some(collect_text(body)),
        Some("b") => raw().map(|v| if v.trim() == "1" { "TRUE" } else { "FALSE" }.to_string()),
        _ => raw(),
    };
    value.filter(|v| !v.is_empty())
}

/// Zero-based column index of an A1-style reference (`"C7"` -> 2).
///
/// `None` when the reference carries no column letters. References past
/// column `XFD` are rejected.
fn column_index(reference: &str) -> Result<Option<usize>, String> {
    let letters: Vec<u8> = reference
        .bytes()
        .take_while(u8::is_ascii_alphabetic)
        .map(|b| b.to_ascii_uppercase())
        .collect();
    if letters.is_empty() {
        return Ok(None);
    }
    let number = letters
        .iter()
        .try_fold(0usize, |acc, b| {
            acc.checked_mul(26)?.checked_add((b - b'A' + 1) as usize)
        })
        .filter(|&n| n <= MAX_COLUMNS)
        .ok_or_else(|| format!("cell reference '{reference}' is out of range"))?;
    Ok(Some(number - 1))
}

fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let Some(end) = tail.find(';') else {
            out.push_str(tail);
            return out;
        };
        let entity = &tail[1..end];
        let decoded = match entity {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            _ => entity
                .strip_prefix("#x")
                .or_else(|| entity.strip_prefix("#X"))
                .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                .or_else(|| entity.strip_prefix('#').and_then(|d| d.parse().ok()))
                .and_then(char::from_u32),
        };
        match decoded {
            Some(c) => out.push(c),
            None => out.push_str(&tail[..=end]),
        }
        rest = &tail[end + 1..];
    }
    out.push_str(rest);
    out
}
