//! Per-cell annotation tables.

use crate::error::{Result, SupplementError};
use std::collections::HashMap;
use std::path::Path;

/// Cell values read as missing.
pub const MISSING_TOKENS: &[&str] = &["", "NA", "NaN", "nan", "N/A", "NULL", "null"];

/// Whether a raw CSV cell is a missing value.
pub fn is_missing_token(raw: &str) -> bool {
    MISSING_TOKENS.contains(&raw.trim())
}

/// Per-cell annotation of one tissue/method pair.
///
/// The first CSV column holds the cell identifier; every other column is a
/// category column with optional string values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationTable {
    /// Cell IDs in file order.
    cell_ids: Vec<String>,
    /// Category column names in file order.
    column_names: Vec<String>,
    /// Column name -> one value per cell.
    columns: HashMap<String, Vec<Option<String>>>,
}

impl AnnotationTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an annotation table from a CSV file.
    ///
    /// Expected format:
    /// - First row: header (first column is the cell ID, possibly unnamed)
    /// - Subsequent rows: cell ID followed by category values
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)?;
        Self::from_reader(reader)
    }

    /// Load an annotation table from any CSV reader.
    pub fn from_reader<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Self> {
        let header = reader.headers()?.clone();
        if header.is_empty() {
            return Err(SupplementError::EmptyData(
                "Annotation must have a cell ID column".to_string(),
            ));
        }
        let column_names: Vec<String> = header.iter().skip(1).map(String::from).collect();

        let mut cell_ids = Vec::new();
        let mut columns: HashMap<String, Vec<Option<String>>> = column_names
            .iter()
            .map(|name| (name.clone(), Vec::new()))
            .collect();

        for record in reader.records() {
            let record = record?;
            if record.iter().all(|field| field.trim().is_empty()) {
                continue;
            }
            cell_ids.push(record.get(0).unwrap_or("").to_string());
            for (col_idx, name) in column_names.iter().enumerate() {
                let value = record
                    .get(col_idx + 1)
                    .filter(|raw| !is_missing_token(raw))
                    .map(|raw| raw.trim().to_string());
                if let Some(column) = columns.get_mut(name) {
                    column.push(value);
                }
            }
        }

        Ok(Self {
            cell_ids,
            column_names,
            columns,
        })
    }

    /// Build a table from in-memory columns.
    pub fn from_columns(
        cell_ids: Vec<String>,
        columns: Vec<(String, Vec<Option<String>>)>,
    ) -> Result<Self> {
        let mut table = Self {
            cell_ids,
            ..Self::default()
        };
        for (name, values) in columns {
            table.set_column(&name, values)?;
        }
        Ok(table)
    }

    /// Cell IDs in order.
    pub fn cell_ids(&self) -> &[String] {
        &self.cell_ids
    }

    /// Column names.
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Number of cells.
    pub fn n_cells(&self) -> usize {
        self.cell_ids.len()
    }

    /// Check if a column exists.
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.contains_key(column)
    }

    /// Get all values of a column.
    pub fn column(&self, column: &str) -> Result<&[Option<String>]> {
        self.columns
            .get(column)
            .map(Vec::as_slice)
            .ok_or_else(|| SupplementError::MissingColumn(column.to_string()))
    }

    /// Add or replace a column.
    pub fn set_column(&mut self, column: &str, values: Vec<Option<String>>) -> Result<()> {
        if values.len() != self.n_cells() {
            return Err(SupplementError::InvalidParameter(format!(
                "column '{}' has {} values for {} cells",
                column,
                values.len(),
                self.n_cells()
            )));
        }
        if !self.columns.contains_key(column) {
            self.column_names.push(column.to_string());
        }
        self.columns.insert(column.to_string(), values);
        Ok(())
    }

    /// Keep only the rows where `mask` is true.
    pub fn filter_rows(&self, mask: &[bool]) -> Self {
        let keep = |i: usize| mask.get(i).copied().unwrap_or(false);
        let cell_ids = self
            .cell_ids
            .iter()
            .enumerate()
            .filter(|(i, _)| keep(*i))
            .map(|(_, id)| id.clone())
            .collect();
        let columns = self
            .columns
            .iter()
            .map(|(name, values)| {
                let kept = values
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| keep(*i))
                    .map(|(_, v)| v.clone())
                    .collect();
                (name.clone(), kept)
            })
            .collect();
        Self {
            cell_ids,
            column_names: self.column_names.clone(),
            columns,
        }
    }
}
