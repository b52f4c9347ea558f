//! Tabular data filtering.
//!
//! A minimal sheet model plus keyword row filters, used by the CLI for
//! trimming exported tables before further processing.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A named table: a header row of column names and data rows of optional
/// cells.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Sheet {
    /// Sheet name.
    pub name: String,

    /// Column names, in order.
    pub columns: Vec<String>,

    /// Data rows. A `None` cell means the source had no value there.
    pub rows: Vec<Vec<Option<String>>>,
}

impl Sheet {
    /// Create an empty sheet with the given name and columns.
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a data row.
    pub fn add_row(&mut self, row: Vec<Option<String>>) {
        self.rows.push(row);
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Index of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

/// A keyword row filter over one column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordFilter {
    /// Target column name.
    pub column: String,

    /// Keyword matched as a case-sensitive substring of the cell value.
    pub keyword: String,

    /// When set, keep the rows that do NOT match instead.
    pub negate: bool,
}

impl KeywordFilter {
    /// Keep rows whose cell contains the keyword.
    pub fn keep(column: impl Into<String>, keyword: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            keyword: keyword.into(),
            negate: false,
        }
    }

    /// Drop rows whose cell contains the keyword.
    pub fn drop(column: impl Into<String>, keyword: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            keyword: keyword.into(),
            negate: true,
        }
    }

    /// Whether a cell matches the keyword. An absent cell never matches, so
    /// a negated filter keeps rows with absent cells.
    fn matches(&self, cell: &Option<String>) -> bool {
        match cell {
            Some(value) => value.contains(&self.keyword),
            None => false,
        }
    }
}

/// Filter a sheet's rows in place by keyword.
///
/// Returns the number of rows removed. Fails with
/// [`Error::ColumnNotFound`] when the target column does not exist.
pub fn filter_sheet(sheet: &mut Sheet, filter: &KeywordFilter) -> Result<usize> {
    let index = sheet
        .column_index(&filter.column)
        .ok_or_else(|| Error::ColumnNotFound(filter.column.clone()))?;

    let before = sheet.rows.len();
    sheet.rows.retain(|row| {
        let cell = row.get(index).cloned().flatten();
        filter.matches(&cell) != filter.negate
    });

    Ok(before - sheet.rows.len())
}

/// Apply one filter across several sheets.
///
/// Sheets missing the target column are left untouched; the filter only
/// fails when NO sheet has the column.
pub fn filter_sheets(sheets: &mut [Sheet], filter: &KeywordFilter) -> Result<usize> {
    let mut removed = 0;
    let mut applied = false;

    for sheet in sheets.iter_mut() {
        if sheet.column_index(&filter.column).is_some() {
            removed += filter_sheet(sheet, filter)?;
            applied = true;
        }
    }

    if !applied {
        return Err(Error::ColumnNotFound(filter.column.clone()));
    }
    Ok(removed)
}
