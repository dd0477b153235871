use super::{Statement, join_columns};
use crate::types::RowValues;

impl Statement {
    /// `SELECT <columns>`, or `SELECT *` when `columns` is empty.
    pub fn select(&mut self, columns: &[&str]) -> &mut Self {
        self.write("SELECT ");
        if columns.is_empty() {
            self.write("*")
        } else {
            self.write(&join_columns(columns))
        }
    }

    pub fn from(&mut self, table: &str) -> &mut Self {
        self.write(" FROM ").write(table)
    }

    /// ` WHERE <condition>` with `%s` markers bound to `args`.
    pub fn where_<I>(&mut self, condition: &str, args: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<RowValues>,
    {
        self.write(" WHERE ").write_with_params(condition, args)
    }

    pub fn and<I>(&mut self, condition: &str, args: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<RowValues>,
    {
        self.write(" AND ").write_with_params(condition, args)
    }

    pub fn or<I>(&mut self, condition: &str, args: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<RowValues>,
    {
        self.write(" OR ").write_with_params(condition, args)
    }

    /// ` ORDER BY <columns>`; nothing is written for an empty list.
    pub fn order_by(&mut self, columns: &[&str]) -> &mut Self {
        if columns.is_empty() {
            return self;
        }
        self.write(" ORDER BY ").write(&join_columns(columns))
    }

    /// ` LIMIT n`, only for positive `n`.
    pub fn limit(&mut self, n: i64) -> &mut Self {
        if n > 0 {
            self.write(&format!(" LIMIT {n}"));
        }
        self
    }

    /// ` OFFSET n`, only for positive `n`.
    pub fn offset(&mut self, n: i64) -> &mut Self {
        if n > 0 {
            self.write(&format!(" OFFSET {n}"));
        }
        self
    }
}
