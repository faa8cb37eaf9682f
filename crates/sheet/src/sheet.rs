use crate::cell::CellValue;
use crate::error::{Result, SheetError};
use std::collections::BTreeMap;

/// A named 2D grid of cells (row-major storage) with optional column widths
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    name: String,
    data: Vec<Vec<CellValue>>,
    column_widths: BTreeMap<usize, f64>,
}

impl Sheet {
    /// Create a new empty sheet
    #[must_use]
    pub fn new() -> Self {
        Self::with_name("Sheet1")
    }

    /// Create a new empty sheet with a name
    #[must_use]
    pub fn with_name(name: &str) -> Self {
        Sheet {
            name: name.to_string(),
            data: Vec::new(),
            column_widths: BTreeMap::new(),
        }
    }

    /// Create a sheet from a 2D vector of values
    #[must_use]
    pub fn from_data<T: Into<CellValue>>(data: Vec<Vec<T>>) -> Self {
        let mut sheet = Self::new();
        sheet.data = data
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        sheet
    }

    /// Get the sheet name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the sheet name
    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    /// Get the number of rows
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.data.len()
    }

    /// Get the number of columns
    #[must_use]
    pub fn col_count(&self) -> usize {
        self.data.first().map_or(0, Vec::len)
    }

    /// Check if the sheet is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get a cell value by row and column index
    pub fn get(&self, row: usize, col: usize) -> Result<&CellValue> {
        self.data
            .get(row)
            .and_then(|r| r.get(col))
            .ok_or(SheetError::IndexOutOfBounds {
                row,
                col,
                rows: self.row_count(),
                cols: self.col_count(),
            })
    }

    /// Get a row by index
    pub fn row(&self, index: usize) -> Result<&Vec<CellValue>> {
        self.data.get(index).ok_or(SheetError::IndexOutOfBounds {
            row: index,
            col: 0,
            rows: self.row_count(),
            cols: self.col_count(),
        })
    }

    /// Set the display width of a column, in character units
    pub fn set_column_width(&mut self, col: usize, width: f64) -> Result<()> {
        if col >= self.col_count() {
            return Err(SheetError::ColumnIndexOutOfBounds {
                index: col,
                count: self.col_count(),
            });
        }
        self.column_widths.insert(col, width);
        Ok(())
    }

    /// Display width of a column, if one was set
    #[must_use]
    pub fn column_width(&self, col: usize) -> Option<f64> {
        self.column_widths.get(&col).copied()
    }

    /// All explicit column widths, by column index
    #[must_use]
    pub fn column_widths(&self) -> &BTreeMap<usize, f64> {
        &self.column_widths
    }

    /// Iterate over rows
    pub fn rows(&self) -> impl Iterator<Item = &Vec<CellValue>> {
        self.data.iter()
    }

    /// Get the raw data
    #[must_use]
    pub fn data(&self) -> &Vec<Vec<CellValue>> {
        &self.data
    }

    /// Get mutable raw data
    pub fn data_mut(&mut self) -> &mut Vec<Vec<CellValue>> {
        &mut self.data
    }
}

impl Default for Sheet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_from_data() {
        let sheet = Sheet::from_data(vec![vec![1, 2, 3], vec![4, 5, 6]]);

        assert_eq!(sheet.row_count(), 2);
        assert_eq!(sheet.col_count(), 3);
        assert_eq!(sheet.get(1, 2).unwrap(), &CellValue::Int(6));
        assert!(sheet.get(2, 0).is_err());
    }

    #[test]
    fn test_column_widths() {
        let mut sheet = Sheet::from_data(vec![vec!["a", "b"]]);
        sheet.set_column_width(1, 30.0).unwrap();

        assert_eq!(sheet.column_width(0), None);
        assert_eq!(sheet.column_width(1), Some(30.0));
        assert!(sheet.set_column_width(2, 10.0).is_err());
    }
}
