//! # roster-core
//!
//! Core types for roster.
//!
//! This crate provides:
//! - The [`Employee`] record and the synthetic dataset [`Generator`]
//! - The frozen [`Snapshot`] shared by every consumer
//! - Declarative column descriptors ([`ColumnSet`])
//! - Filtered / sorted / paginated views ([`ViewQuery`])
//! - Error types
//!
//! ```
//! use chrono::NaiveDate;
//! use roster_core::{FixedClock, Generator, Snapshot};
//!
//! let clock = FixedClock::at_date(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
//! let mut generator = Generator::seeded(42, clock);
//! let snapshot = Snapshot::generate(&mut generator, 100).unwrap();
//!
//! assert_eq!(snapshot.len(), 100);
//! ```

/// Time sources.
pub mod clock;
/// Column descriptors and value extraction.
pub mod columns;
/// The employee record.
pub mod employee;
/// Error types and result aliases.
pub mod error;
/// Synthetic dataset generation.
pub mod generator;
/// The shared record collection.
pub mod snapshot;
/// Filtering, sorting and pagination.
pub mod view;
/// Name, job title and catch phrase vocabularies.
pub mod vocab;

pub use clock::{Clock, FixedClock, SystemClock};
pub use columns::{
    format_currency, ColumnDescriptor, ColumnSet, ColumnValue, Computation, Extraction, FieldKey,
    FilterKind, FormatHint, SalaryBand, SortKind,
};
pub use employee::{email_for, Employee};
pub use error::{CoreError, CoreResult};
pub use generator::{parse_count, start_date_epoch, Generator, DEFAULT_COUNT, SALARY_RANGE};
pub use snapshot::{select_rows, Snapshot};
pub use view::{ColumnFilter, Page, RowGroup, Sort, View, ViewQuery};
