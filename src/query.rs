use crate::types::RowValues;

/// A SQL string and its bound parameters bundled together.
///
/// This is what [`Statement::build`](crate::query_builder::Statement::build)
/// hands back, and what the CRUD helpers pass to an executor:
/// ```rust
/// use sql_record::prelude::*;
///
/// let qp = QueryAndParams::new(
///     "INSERT INTO t (id, name) VALUES ($1, $2)",
///     vec![RowValues::Int(1), RowValues::Text("alice".into())],
/// );
/// assert_eq!(qp.params.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct QueryAndParams {
    /// The SQL query string
    pub query: String,
    /// The parameters to be bound to the query, in placeholder order
    pub params: Vec<RowValues>,
}

impl QueryAndParams {
    pub fn new(query: impl Into<String>, params: Vec<RowValues>) -> Self {
        Self {
            query: query.into(),
            params,
        }
    }

    pub fn new_without_params(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            params: Vec::new(),
        }
    }
}
