use crate::clock::Clock;
use crate::employee::Employee;
use crate::error::{CoreError, CoreResult};
use crate::generator::Generator;
use chrono::{DateTime, Utc};
use rand::Rng;
use std::ops::Deref;
use std::sync::Arc;

/// The immutable record collection shared for the lifetime of the process.
///
/// Cloning is cheap; all clones share the same rows.
#[derive(Debug, Clone)]
pub struct Snapshot {
    rows: Arc<[Employee]>,
    generated_at: DateTime<Utc>,
}

impl Snapshot {
    /// Generate a fresh snapshot of `count` employees.
    pub fn generate<R: Rng, C: Clock>(
        generator: &mut Generator<R, C>,
        count: i64,
    ) -> CoreResult<Self> {
        let generated_at = generator.clock().now();
        let rows = generator.generate(count)?;
        Ok(Self {
            rows: rows.into(),
            generated_at,
        })
    }

    /// Freeze an existing set of rows.
    #[must_use]
    pub fn from_rows(rows: Vec<Employee>, generated_at: DateTime<Utc>) -> Self {
        Self {
            rows: rows.into(),
            generated_at,
        }
    }

    #[must_use]
    pub fn rows(&self) -> &[Employee] {
        &self.rows
    }

    /// Clock reading taken when the rows were generated.
    #[must_use]
    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }
}

impl Deref for Snapshot {
    type Target = [Employee];

    fn deref(&self) -> &Self::Target {
        &self.rows
    }
}

/// Resolve selected positions against an ordered list of rows.
///
/// Positions are kept in the order given; duplicates are dropped.
pub fn select_rows<'a>(rows: &[&'a Employee], positions: &[usize]) -> CoreResult<Vec<&'a Employee>> {
    let mut seen = std::collections::HashSet::new();
    let mut selected = Vec::with_capacity(positions.len());

    for &index in positions {
        let row = rows.get(index).ok_or(CoreError::RowOutOfRange {
            index,
            count: rows.len(),
        })?;
        if seen.insert(index) {
            selected.push(*row);
        }
    }

    Ok(selected)
}
