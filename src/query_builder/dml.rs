use super::{Statement, join_columns};
use crate::types::RowValues;

impl Statement {
    /// `INSERT INTO table (columns) VALUES ($n, ...)`.
    ///
    /// `columns` and `values` are positional pairs and must have the same
    /// length. With no columns at all, writes `INSERT INTO table DEFAULT VALUES`.
    pub fn insert<I>(&mut self, table: &str, columns: &[&str], values: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<RowValues>,
    {
        debug_assert!(!table.is_empty());
        if columns.is_empty() {
            return self.write(&format!("INSERT INTO {table} DEFAULT VALUES"));
        }

        let placeholders: Vec<String> = values.into_iter().map(|v| self.add_param(v)).collect();
        debug_assert_eq!(columns.len(), placeholders.len());
        self.write(&format!(
            "INSERT INTO {table} ({}) VALUES ({})",
            join_columns(columns),
            placeholders.join(", ")
        ))
    }

    /// `UPDATE table SET c1 = $n, c2 = $n+1, ...`.
    pub fn update<I>(&mut self, table: &str, columns: &[&str], values: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<RowValues>,
    {
        self.write(&format!("UPDATE {table} SET "));
        for (i, (column, value)) in columns.iter().zip(values).enumerate() {
            if i > 0 {
                self.write(", ");
            }
            let placeholder = self.add_param(value);
            self.write(&format!("{column} = {placeholder}"));
        }
        self
    }

    pub fn delete(&mut self, table: &str) -> &mut Self {
        self.write(&format!("DELETE FROM {table}"))
    }

    /// ` RETURNING <columns>`; nothing is written for an empty list.
    pub fn returning(&mut self, columns: &[&str]) -> &mut Self {
        if columns.is_empty() {
            return self;
        }
        self.write(" RETURNING ").write(&join_columns(columns))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_with_returning() {
        let qp = Statement::new()
            .insert("t", &["n", "e"], ["J", "j@x"])
            .returning(&["id"])
            .build();
        assert_eq!(qp.query, "INSERT INTO t (n, e) VALUES ($1, $2) RETURNING id");
        assert_eq!(
            qp.params,
            vec![RowValues::Text("J".into()), RowValues::Text("j@x".into())]
        );
    }

    #[test]
    fn insert_without_columns_uses_defaults() {
        let qp = Statement::new()
            .insert("t", &[], Vec::<RowValues>::new())
            .returning(&["id"])
            .build();
        assert_eq!(qp.query, "INSERT INTO t DEFAULT VALUES RETURNING id");
    }

    #[test]
    fn update_numbering_continues_into_where() {
        let qp = Statement::new()
            .update("t", &["n"], ["J"])
            .where_("id = %s", [7])
            .build();
        assert_eq!(qp.query, "UPDATE t SET n = $1 WHERE id = $2");
        assert_eq!(
            qp.params,
            vec![RowValues::Text("J".into()), RowValues::Int(7)]
        );
    }

    #[test]
    fn update_several_columns() {
        let qp = Statement::new()
            .update("t", &["a", "b"], [RowValues::Int(1), RowValues::Null])
            .build();
        assert_eq!(qp.query, "UPDATE t SET a = $1, b = $2");
    }

    #[test]
    fn delete_with_condition() {
        let qp = Statement::new()
            .delete("t")
            .where_("id = %s", [3])
            .returning(&[])
            .build();
        assert_eq!(qp.query, "DELETE FROM t WHERE id = $1");
        assert_eq!(qp.params, vec![RowValues::Int(3)]);
    }
}
