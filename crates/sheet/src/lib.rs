//! Sheet/Book containers and the export pipeline for roster
//!
//! Rows selected or filtered from the employee snapshot are turned into two
//! artifacts: tab-separated text for the clipboard, and an `.xlsx` workbook.
//!
//! # Examples
//!
//! ## Clipboard text
//!
//! ```
//! use chrono::NaiveDate;
//! use roster_core::{email_for, Employee};
//! use roster_sheet::to_clipboard_text;
//!
//! let jane = Employee {
//!     first_name: "Jane".into(),
//!     last_name: "Doe".into(),
//!     email: email_for("Jane", "Doe"),
//!     job_title: "Data Analyst".into(),
//!     salary: 60_000,
//!     start_date: NaiveDate::from_ymd_opt(2020, 5, 1).unwrap(),
//!     signature_catch_phrase: "Deep dive".into(),
//!     avatar: "https://i.pravatar.cc/150?img=1".into(),
//! };
//!
//! let text = to_clipboard_text(&[&jane]).unwrap();
//! assert_eq!(
//!     text,
//!     "Name\tEmail\tSalary\tJob Title\tStart Date\n\
//!      Jane Doe\tjane.doe@company.com\t60000\tData Analyst\t2020-05-01"
//! );
//! assert!(to_clipboard_text(&[]).is_none());
//! ```
//!
//! ## Working with books
//!
//! ```
//! use roster_sheet::{Book, Sheet};
//!
//! let mut book = Book::new();
//! book.add_sheet("Data", Sheet::from_data(vec![vec!["a", "b"]])).unwrap();
//!
//! let bytes = book.to_xlsx_bytes().unwrap();
//! let loaded = Book::from_xlsx_bytes(&bytes).unwrap();
//! assert_eq!(loaded.sheet_names(), vec!["Data"]);
//! ```

mod book;
mod cell;
mod clipboard;
mod csv;
mod error;
mod export;
mod sheet;
mod xlsx;

/// Re-export book type.
pub use book::Book;
/// Re-export cell value type.
pub use cell::CellValue;
/// Re-export the clipboard capability.
pub use clipboard::{copy_selection, Clipboard, CopyOutcome};
/// Re-export CSV options.
pub use csv::CsvOptions;
/// Re-export error types.
pub use error::{ClipboardError, ExportError, Result, SheetError};
/// Re-export the export pipeline.
pub use export::{
    export_filename, project, spreadsheet_sheet, to_clipboard_text, to_spreadsheet,
    SpreadsheetExport, SHEET_NAME,
};
/// Re-export sheet type.
pub use sheet::Sheet;
