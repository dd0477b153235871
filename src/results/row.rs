use std::collections::HashMap;
use std::sync::Arc;

use crate::types::RowValues;

/// One row of a query result.
///
/// Column names and the name lookup table are shared by every row of the same
/// result set.
#[derive(Debug, Clone)]
pub struct CustomDbRow {
    /// Column names, in result order
    pub column_names: Arc<Vec<String>>,
    /// Cell values, parallel to `column_names`
    pub rows: Vec<RowValues>,
    #[doc(hidden)]
    pub(crate) column_index_cache: Arc<HashMap<String, usize>>,
}

pub(crate) fn index_columns(column_names: &[String]) -> Arc<HashMap<String, usize>> {
    let mut map = HashMap::with_capacity(column_names.len());
    for (i, name) in column_names.iter().enumerate() {
        // Duplicate names resolve to the first occurrence.
        map.entry(name.clone()).or_insert(i);
    }
    Arc::new(map)
}

impl CustomDbRow {
    /// Create a row that owns its own lookup table.
    #[must_use]
    pub fn new(column_names: Arc<Vec<String>>, rows: Vec<RowValues>) -> Self {
        let column_index_cache = index_columns(&column_names);
        Self {
            column_names,
            rows,
            column_index_cache,
        }
    }

    /// Position of `column_name`, matched exactly.
    #[must_use]
    pub fn get_column_index(&self, column_name: &str) -> Option<usize> {
        self.column_index_cache.get(column_name).copied()
    }

    /// Value of `column_name`, or `None` if the row has no such column.
    #[must_use]
    pub fn get(&self, column_name: &str) -> Option<&RowValues> {
        self.get_column_index(column_name)
            .and_then(|idx| self.rows.get(idx))
    }

    #[must_use]
    pub fn get_by_index(&self, index: usize) -> Option<&RowValues> {
        self.rows.get(index)
    }

    /// Number of cells in the row.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
