#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use sql_record::prelude::*;

/// One call seen by [`RecordingExecutor`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Select(String, Vec<RowValues>),
    Dml(String, Vec<RowValues>),
    Batch(String),
}

/// Executor that records every statement and replays queued responses.
#[derive(Default)]
pub struct RecordingExecutor {
    pub calls: Vec<Call>,
    selects: VecDeque<Result<ResultSet, SqlRecordError>>,
    dmls: VecDeque<Result<usize, SqlRecordError>>,
}

impl RecordingExecutor {
    pub fn push_select(&mut self, result: Result<ResultSet, SqlRecordError>) {
        self.selects.push_back(result);
    }

    pub fn push_rows(&mut self, columns: &[&str], rows: Vec<Vec<RowValues>>) {
        self.push_select(Ok(result_set(columns, rows)));
    }

    pub fn push_dml(&mut self, result: Result<usize, SqlRecordError>) {
        self.dmls.push_back(result);
    }

    pub fn last(&self) -> &Call {
        self.calls.last().expect("no statement was executed")
    }
}

pub fn result_set(columns: &[&str], rows: Vec<Vec<RowValues>>) -> ResultSet {
    let mut rs = ResultSet::with_capacity(rows.len());
    rs.set_column_names(Arc::new(columns.iter().map(|c| (*c).to_string()).collect()));
    for row in rows {
        rs.add_row_values(row);
    }
    rs
}

#[async_trait]
impl AsyncDatabaseExecutor for RecordingExecutor {
    async fn execute_batch(&mut self, query: &str) -> Result<(), SqlRecordError> {
        self.calls.push(Call::Batch(query.to_string()));
        Ok(())
    }

    async fn execute_select(
        &mut self,
        query: &str,
        params: &[RowValues],
    ) -> Result<ResultSet, SqlRecordError> {
        self.calls
            .push(Call::Select(query.to_string(), params.to_vec()));
        self.selects
            .pop_front()
            .unwrap_or_else(|| Ok(ResultSet::default()))
    }

    async fn execute_dml(
        &mut self,
        query: &str,
        params: &[RowValues],
    ) -> Result<usize, SqlRecordError> {
        self.calls.push(Call::Dml(query.to_string(), params.to_vec()));
        self.dmls.pop_front().unwrap_or(Ok(1))
    }
}

sql_record::record! {
    #[table = "users"]
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct User {
        #[db = "id,primary"]
        pub id: i64,
        #[db = "name"]
        pub name: String,
        #[db = "email"]
        pub email: String,
        #[db = "-"]
        pub session_token: String,
    }
}

sql_record::record! {
    #[table = "audit_log"]
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct AuditEntry {
        pub message: String,
        pub level: i32,
    }
}

sql_record::record! {
    #[table = "counters"]
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Counter {
        #[db = "id,primary"]
        pub id: i64,
    }
}
