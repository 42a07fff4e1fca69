//! In-memory tabular dataset.

/// A single cell; `None` is a missing value.
pub type Cell = Option<String>;

/// Ordered column names plus rows of cells.
///
/// Every row has exactly one cell per column: short rows are padded with
/// `None`, extra trailing fields are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, mut row: Vec<Cell>) {
        row.resize(self.columns.len(), None);
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() || self.rows.is_empty()
    }

    /// Cells of one column in row order.
    pub fn column(&self, index: usize) -> impl Iterator<Item = Option<&str>> + '_ {
        self.rows
            .iter()
            .map(move |row| row.get(index).and_then(|c| c.as_deref()))
    }
}

/// Build a table from string literals; empty strings become missing cells.
#[cfg(test)]
pub(crate) fn table_of(columns: &[&str], rows: &[&[&str]]) -> Table {
    let mut table = Table::new(columns.iter().map(|c| c.to_string()).collect());
    for row in rows {
        table.push_row(
            row.iter()
                .map(|v| (!v.is_empty()).then(|| v.to_string()))
                .collect(),
        );
    }
    table
}
