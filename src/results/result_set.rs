use std::collections::HashMap;
use std::sync::Arc;

use super::row::{CustomDbRow, index_columns};
use crate::types::RowValues;

/// Rows returned by a query plus the affected-row count for DML.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    /// The rows returned by the query
    pub results: Vec<CustomDbRow>,
    /// Rows returned, or rows affected for DML statements
    pub rows_affected: usize,
    column_names: Option<Arc<Vec<String>>>,
    column_index: Option<Arc<HashMap<String, usize>>>,
}

impl ResultSet {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> ResultSet {
        ResultSet {
            results: Vec::with_capacity(capacity),
            ..ResultSet::default()
        }
    }

    /// Set the column names shared by every row added afterwards.
    pub fn set_column_names(&mut self, column_names: Arc<Vec<String>>) {
        self.column_index = Some(index_columns(&column_names));
        self.column_names = Some(column_names);
    }

    #[must_use]
    pub fn get_column_names(&self) -> Option<&Arc<Vec<String>>> {
        self.column_names.as_ref()
    }

    /// Append a row of values under the current column names.
    ///
    /// Ignored until column names have been set.
    pub fn add_row_values(&mut self, row_values: Vec<RowValues>) {
        let (Some(column_names), Some(index)) = (&self.column_names, &self.column_index) else {
            return;
        };
        self.results.push(CustomDbRow {
            column_names: Arc::clone(column_names),
            rows: row_values,
            column_index_cache: Arc::clone(index),
        });
        self.rows_affected += 1;
    }

    /// Append an already-built row, adopting its column names if none are set.
    pub fn add_row(&mut self, row: CustomDbRow) {
        if self.column_names.is_none() {
            self.column_names = Some(Arc::clone(&row.column_names));
            self.column_index = Some(Arc::clone(&row.column_index_cache));
        }
        self.results.push(row);
        self.rows_affected += 1;
    }

    #[must_use]
    pub fn first(&self) -> Option<&CustomDbRow> {
        self.results.first()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
