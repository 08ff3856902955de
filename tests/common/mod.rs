//! Shared test helpers

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use store_object::{QueryExecutor, Row, StoreError, WriteResult};

pub const INSERT_ID: u64 = 42;

/// Records every statement and replays queued result sets in order
#[derive(Default)]
pub struct RecordingExecutor {
    statements: Mutex<Vec<String>>,
    results: Mutex<VecDeque<Vec<Row>>>,
}

impl RecordingExecutor {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue the rows returned by the next read
    pub fn push_rows(&self, rows: Vec<Value>) {
        let rows = rows
            .into_iter()
            .map(|row| row.as_object().cloned().expect("row fixtures are objects"))
            .collect();
        self.results.lock().unwrap().push_back(rows);
    }

    pub fn statements(&self) -> Vec<String> {
        self.statements.lock().unwrap().clone()
    }

    fn record(&self, sql: &str) {
        self.statements.lock().unwrap().push(sql.to_string());
    }
}

#[async_trait]
impl QueryExecutor for RecordingExecutor {
    async fn query(&self, sql: &str) -> Result<Vec<Row>, StoreError> {
        self.record(sql);
        Ok(self.results.lock().unwrap().pop_front().unwrap_or_default())
    }

    async fn query_write(&self, sql: &str) -> Result<WriteResult, StoreError> {
        self.record(sql);
        Ok(WriteResult {
            insert_id: INSERT_ID,
            affected_rows: 1,
        })
    }
}
