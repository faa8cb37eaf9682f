//! Clipboard and spreadsheet encodings of employee rows.
//!
//! Both encodings are pure functions of their input rows: the same rows
//! always produce the same text and the same workbook bytes.

use crate::book::Book;
use crate::cell::CellValue;
use crate::csv::CsvOptions;
use crate::error::Result;
use crate::sheet::Sheet;
use chrono::NaiveDate;
use roster_core::{ColumnSet, Employee};
use std::path::{Path, PathBuf};
use tracing::info;

/// Name of the single sheet in an exported workbook.
pub const SHEET_NAME: &str = "Employees";

/// Project rows through a column set into a sheet with a header row.
pub fn project(columns: &ColumnSet, rows: &[&Employee]) -> Sheet {
    let mut data: Vec<Vec<CellValue>> = Vec::with_capacity(rows.len() + 1);
    data.push(columns.labels().into_iter().map(CellValue::from).collect());
    data.extend(rows.iter().map(|employee| {
        columns
            .iter()
            .map(|column| CellValue::from(column.value(employee)))
            .collect()
    }));

    let mut sheet = Sheet::with_name(SHEET_NAME);
    *sheet.data_mut() = data;
    sheet
}

/// Tab-separated clipboard payload for a selection.
///
/// Returns `None` for an empty selection: there is nothing to copy and the
/// caller must not touch the clipboard.
#[must_use]
pub fn to_clipboard_text(rows: &[&Employee]) -> Option<String> {
    if rows.is_empty() {
        return None;
    }

    let sheet = project(&ColumnSet::clipboard_export(), rows);
    let mut text = sheet.to_csv_string_with_options(CsvOptions::tsv().with_quoting(false));
    if text.ends_with('\n') {
        text.pop();
    }
    Some(text)
}

/// The `Employees` sheet for a filtered view, with fixed column widths.
pub fn spreadsheet_sheet(rows: &[&Employee]) -> Result<Sheet> {
    let columns = ColumnSet::spreadsheet_export();
    let mut sheet = project(&columns, rows);
    for (index, column) in columns.iter().enumerate() {
        sheet.set_column_width(index, f64::from(column.width))?;
    }
    Ok(sheet)
}

/// Workbook holding the `Employees` sheet for a filtered view.
pub fn to_spreadsheet(rows: &[&Employee]) -> Result<Book> {
    let mut book = Book::new();
    book.add_sheet(SHEET_NAME, spreadsheet_sheet(rows)?)?;
    Ok(book)
}

/// Suggested file name for an export made on `date`.
#[must_use]
pub fn export_filename(date: NaiveDate) -> String {
    format!("employees_{}.xlsx", date.format("%Y-%m-%d"))
}

/// A serialized workbook plus the file name it should be saved under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpreadsheetExport {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub rows: usize,
}

impl SpreadsheetExport {
    /// Serialize `rows`; `today` only affects the file name.
    pub fn build(rows: &[&Employee], today: NaiveDate) -> Result<Self> {
        let bytes = to_spreadsheet(rows)?.to_xlsx_bytes()?;
        Ok(Self {
            filename: export_filename(today),
            bytes,
            rows: rows.len(),
        })
    }

    /// Write the payload into `dir` under the suggested name.
    pub fn save_in<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf> {
        let path = dir.as_ref().join(&self.filename);
        std::fs::write(&path, &self.bytes)?;
        info!(path = %path.display(), rows = self.rows, "saved spreadsheet export");
        Ok(path)
    }
}
