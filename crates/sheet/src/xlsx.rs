use crate::book::Book;
use crate::cell::CellValue;
use crate::error::{Result, SheetError};
use crate::sheet::Sheet;
use calamine::{open_workbook, Data, Reader, Xlsx};
use rust_xlsxwriter::{DocProperties, ExcelDateTime, Workbook, Worksheet};
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

/// Convert calamine Data to CellValue
fn data_to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Null,
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => CellValue::String(s.clone()),
        // Excel stores dates as days since 1899-12-30
        Data::DateTime(dt) => CellValue::Float(dt.as_f64()),
        Data::DateTimeIso(s) => CellValue::String(s.clone()),
        Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::String(format!("#ERROR: {e:?}")),
    }
}

fn read_book<R: Read + Seek>(mut workbook: Xlsx<R>) -> Result<Book> {
    let mut book = Book::new();

    for sheet_name in workbook.sheet_names() {
        let range = workbook.worksheet_range(&sheet_name)?;

        let mut sheet = Sheet::with_name(&sheet_name);
        *sheet.data_mut() = range
            .rows()
            .map(|row| row.iter().map(data_to_cell_value).collect())
            .collect();

        book.add_sheet(&sheet_name, sheet)?;
    }

    Ok(book)
}

/// Write sheet data and column widths to a worksheet
fn write_to_worksheet(sheet: &Sheet, worksheet: &mut Worksheet) -> Result<()> {
    worksheet.set_name(sheet.name())?;

    for (&col_idx, &width) in sheet.column_widths() {
        let col_num = u16::try_from(col_idx).map_err(|_| SheetError::ColumnIndexOutOfBounds {
            index: col_idx,
            count: usize::from(u16::MAX),
        })?;
        worksheet.set_column_width(col_num, width)?;
    }

    for (row_idx, row) in sheet.data().iter().enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            let (Ok(row_num), Ok(col_num)) = (u32::try_from(row_idx), u16::try_from(col_idx)) else {
                return Err(SheetError::IndexOutOfBounds {
                    row: row_idx,
                    col: col_idx,
                    rows: sheet.row_count(),
                    cols: sheet.col_count(),
                });
            };

            match cell {
                CellValue::Null => {} // Leave empty
                CellValue::Bool(b) => {
                    worksheet.write_boolean(row_num, col_num, *b)?;
                }
                CellValue::Int(i) => {
                    // Note: Excel stores all numbers as f64, so integers > 2^53
                    // may lose precision
                    worksheet.write_number(row_num, col_num, *i as f64)?;
                }
                CellValue::Float(f) => {
                    worksheet.write_number(row_num, col_num, *f)?;
                }
                CellValue::String(s) => {
                    worksheet.write_string(row_num, col_num, s)?;
                }
            }
        }
    }

    Ok(())
}

impl Book {
    /// Load a book from an Excel file (all sheets)
    pub fn from_xlsx<P: AsRef<Path>>(path: P) -> Result<Self> {
        let workbook: Xlsx<BufReader<File>> = open_workbook(path.as_ref())?;
        read_book(workbook)
    }

    /// Load a book from an in-memory Excel payload
    pub fn from_xlsx_bytes(bytes: &[u8]) -> Result<Self> {
        let workbook = Xlsx::new(Cursor::new(bytes))?;
        read_book(workbook)
    }

    /// Serialize the book to an Excel payload.
    ///
    /// The document creation time is pinned so identical books produce
    /// identical bytes.
    pub fn to_xlsx_bytes(&self) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let created = ExcelDateTime::from_ymd(2015, 1, 1)?;
        workbook.set_properties(&DocProperties::new().set_creation_datetime(&created));

        for (_, sheet) in self.sheets() {
            let worksheet = workbook.add_worksheet();
            write_to_worksheet(sheet, worksheet)?;
        }

        Ok(workbook.save_to_buffer()?)
    }
}
