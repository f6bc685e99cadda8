//! In-memory table: an ordered header plus ordered rows of string cells.
//!
//! Rows are expected to have one cell per header entry, but nothing enforces
//! that on load. Reads treat a missing cell as `""`; writes into a short row
//! pad it with empty cells up to the written position.

use serde::Serialize;

use crate::lookup::{require, Argument, Resolver, TableError};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
    resolver: Resolver,
}

/// Export shape: a synthetic `#` column holding each row's position,
/// followed by the real columns, in row order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from a header and its data rows, supplied together.
    pub fn from_parts(header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { header, rows, resolver: Resolver::default() }
    }

    /// Enable or disable strict column resolution (duplicates are errors).
    pub fn set_strict_columns(&mut self, strict: bool) {
        self.resolver = Resolver::new(strict);
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.header.len()
    }

    /// True when both the header and the rows are non-empty.
    pub fn is_loaded(&self) -> bool {
        !self.header.is_empty() && !self.rows.is_empty()
    }

    /// Row positions as strings, the candidates offered when picking a row.
    pub fn row_indices(&self) -> Vec<String> {
        (0..self.rows.len()).map(|i| i.to_string()).collect()
    }

    /// Column names joined by `" | "`.
    pub fn column_list(&self) -> String {
        self.header.join(" | ")
    }

    /// `"0"` for a single row, `"[0, n-1]"` otherwise.
    pub fn row_range(&self) -> Result<String, TableError> {
        match self.rows.len() {
            0 => Err(TableError::NoRows),
            1 => Ok("0".to_string()),
            n => Ok(format!("[0, {}]", n - 1)),
        }
    }

    /// Every value in the named column, in row order.
    pub fn peek_column(&self, name: &str) -> Result<Vec<String>, TableError> {
        let index = self.resolver.column(&self.header, name)?;
        Ok(self.rows.iter().map(|row| cell(row, index).to_string()).collect())
    }

    /// `(column name, value)` pairs for one row, in header order.
    pub fn peek_row(&self, token: &str) -> Result<Vec<(String, String)>, TableError> {
        let index = self.resolver.row(self.rows.len(), token)?;
        let row = &self.rows[index];
        Ok(self
            .header
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), cell(row, i).to_string()))
            .collect())
    }

    /// Remove a column from the header and from every row.
    ///
    /// Resolution happens before anything is touched, so a failed lookup
    /// leaves the table as it was.
    pub fn delete_column(&mut self, name: &str) -> Result<(), TableError> {
        let name = require(name, Argument::Column)?;
        let index = self.resolver.column(&self.header, name)?;

        self.header.remove(index);
        for row in &mut self.rows {
            if index < row.len() {
                row.remove(index);
            }
        }
        log::debug!("deleted column {:?} at {}", name, index);
        Ok(())
    }

    pub fn delete_row(&mut self, token: &str) -> Result<(), TableError> {
        let token = require(token, Argument::Row)?;
        let index = self.resolver.row(self.rows.len(), token)?;
        self.rows.remove(index);
        log::debug!("deleted row {}", index);
        Ok(())
    }

    /// Swap two rows. Swapping a row with itself succeeds and changes nothing.
    pub fn switch_rows(&mut self, first: &str, second: &str) -> Result<(), TableError> {
        let a = self.resolver.row(self.rows.len(), first)?;
        let b = self.resolver.row(self.rows.len(), second)?;
        self.rows.swap(a, b);
        log::debug!("switched rows {} and {}", a, b);
        Ok(())
    }

    /// Swap the values of two columns in every row. The header keeps its order.
    pub fn switch_columns(&mut self, first: &str, second: &str) -> Result<(), TableError> {
        let a = self.resolver.column(&self.header, first)?;
        let b = self.resolver.column(&self.header, second)?;
        if a == b {
            return Ok(());
        }

        let needed = a.max(b) + 1;
        for row in &mut self.rows {
            if row.len() < needed {
                row.resize(needed, String::new());
            }
            row.swap(a, b);
        }
        log::debug!("switched columns {} and {}", a, b);
        Ok(())
    }

    pub fn get_cell(&self, column: &str, row: &str) -> Result<&str, TableError> {
        let (row_index, col_index) = self.locate(column, row)?;
        Ok(cell(&self.rows[row_index], col_index))
    }

    pub fn set_cell(&mut self, column: &str, row: &str, content: &str) -> Result<(), TableError> {
        let (row_index, col_index) = self.locate(column, row)?;
        require(content, Argument::Content)?;

        let cells = &mut self.rows[row_index];
        if cells.len() <= col_index {
            cells.resize(col_index + 1, String::new());
        }
        cells[col_index] = content.to_string();
        log::debug!("set cell ({}, {})", row_index, col_index);
        Ok(())
    }

    /// Table contents with a leading row-number column, for export.
    pub fn snapshot(&self) -> Snapshot {
        let mut columns = Vec::with_capacity(self.header.len() + 1);
        columns.push("#".to_string());
        columns.extend(self.header.iter().cloned());

        let rows = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let mut out = Vec::with_capacity(row.len() + 1);
                out.push(i.to_string());
                out.extend(row.iter().cloned());
                out
            })
            .collect();

        Snapshot { columns, rows }
    }

    fn locate(&self, column: &str, row: &str) -> Result<(usize, usize), TableError> {
        let column = require(column, Argument::Column)?;
        let row = require(row, Argument::Row)?;
        let col_index = self.resolver.column(&self.header, column)?;
        let row_index = self.resolver.row(self.rows.len(), row)?;
        Ok((row_index, col_index))
    }
}

fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map(String::as_str).unwrap_or("")
}
