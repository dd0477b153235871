//! Incremental SQL builder with numbered `$n` placeholders.
//!
//! A [`Statement`] accumulates SQL text and a parallel list of bound values.
//! Every writer returns `&mut Self` so clauses chain:
//!
//! ```rust
//! use sql_record::prelude::*;
//!
//! let mut stmt = Statement::new();
//! let qp = stmt
//!     .select(&["a", "b"])
//!     .from("t")
//!     .where_("a = %s", [1])
//!     .and("b = %s", ["x"])
//!     .build();
//! assert_eq!(qp.query, "SELECT a, b FROM t WHERE a = $1 AND b = $2");
//! assert_eq!(qp.params, vec![RowValues::Int(1), RowValues::Text("x".into())]);
//! ```
//!
//! Placeholder numbering is per instance and keeps counting across clauses and
//! across [`Statement::build`]; only [`Statement::reset`] rewinds it to `$1`.

use crate::query::QueryAndParams;
use crate::types::RowValues;

mod dml;
mod select;

const PLACEHOLDER_PREFIX: char = '$';

/// Accumulating SQL statement for the PostgreSQL placeholder style.
#[derive(Debug, Clone)]
pub struct Statement {
    sql: String,
    params: Vec<RowValues>,
    next_index: usize,
}

impl Default for Statement {
    fn default() -> Self {
        Self::new()
    }
}

impl Statement {
    #[must_use]
    pub fn new() -> Self {
        Self {
            sql: String::new(),
            params: Vec::new(),
            next_index: 1,
        }
    }

    /// Bind `value` and return its placeholder (`$1`, `$2`, ...).
    pub fn add_param(&mut self, value: impl Into<RowValues>) -> String {
        self.params.push(value.into());
        let placeholder = format!("{PLACEHOLDER_PREFIX}{}", self.next_index);
        self.next_index += 1;
        placeholder
    }

    /// Append raw SQL text.
    pub fn write(&mut self, text: &str) -> &mut Self {
        self.sql.push_str(text);
        self
    }

    /// Append `template`, replacing each `%s` with a fresh placeholder bound to
    /// the next value of `args`.
    ///
    /// `%%` writes a literal `%`. Every arg is bound even when the template has
    /// fewer `%s` markers; markers left without an arg are written unchanged.
    pub fn write_with_params<I>(&mut self, template: &str, args: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<RowValues>,
    {
        let placeholders: Vec<String> = args.into_iter().map(|a| self.add_param(a)).collect();
        let mut placeholders = placeholders.into_iter();

        let mut chars = template.chars().peekable();
        while let Some(c) = chars.next() {
            if c != '%' {
                self.sql.push(c);
                continue;
            }
            match chars.peek() {
                Some('%') => {
                    chars.next();
                    self.sql.push('%');
                }
                Some('s') => {
                    chars.next();
                    match placeholders.next() {
                        Some(p) => self.sql.push_str(&p),
                        None => self.sql.push_str("%s"),
                    }
                }
                _ => self.sql.push('%'),
            }
        }
        self
    }

    /// Clear text and bound values and rewind numbering to `$1`.
    pub fn reset(&mut self) -> &mut Self {
        self.sql.clear();
        self.params.clear();
        self.next_index = 1;
        self
    }

    /// Take the accumulated text and values.
    ///
    /// The builder is left empty, but numbering continues where it stopped
    /// until [`reset`](Self::reset) is called.
    pub fn build(&mut self) -> QueryAndParams {
        QueryAndParams {
            query: std::mem::take(&mut self.sql),
            params: std::mem::take(&mut self.params),
        }
    }

    /// SQL written so far.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Values bound so far.
    #[must_use]
    pub fn params(&self) -> &[RowValues] {
        &self.params
    }
}

fn join_columns(columns: &[&str]) -> String {
    columns.join(", ")
}
