//! In-memory driver for testing and development.
//!
//! [`MockCursor`] replays canned rows through the [`Cursor`] contract;
//! [`MockExecutor`] hands out scripted cursors and records the parameter
//! sets it receives, so encode-then-execute flows can be asserted without a
//! real database.

use std::collections::VecDeque;

use async_trait::async_trait;

use crate::cursor::{Cursor, Executor};
use crate::error::SqlBindError;
use crate::params::Parameter;
use crate::types::SqlValue;

/// A forward-only cursor over canned rows.
pub struct MockCursor {
    columns: Vec<String>,
    pending: VecDeque<Vec<SqlValue>>,
    current: Option<Vec<SqlValue>>,
    schema_available: bool,
    schema_calls: usize,
}

impl MockCursor {
    /// Build a cursor with the given column names and rows. Row values are
    /// positional, parallel to `columns`.
    #[must_use]
    pub fn new(columns: Vec<&str>, rows: Vec<Vec<SqlValue>>) -> Self {
        Self {
            columns: columns.into_iter().map(str::to_string).collect(),
            pending: rows.into(),
            current: None,
            schema_available: true,
            schema_calls: 0,
        }
    }

    /// A cursor whose driver cannot report column names; `schema` fails with
    /// [`SqlBindError::SchemaUnavailable`].
    #[must_use]
    pub fn without_schema(mut self) -> Self {
        self.schema_available = false;
        self
    }

    /// How many times `schema` was called; lets tests assert the schema is
    /// fetched exactly once, or never for an empty result.
    #[must_use]
    pub fn schema_calls(&self) -> usize {
        self.schema_calls
    }
}

#[async_trait]
impl Cursor for MockCursor {
    fn schema(&mut self) -> Result<Vec<String>, SqlBindError> {
        self.schema_calls += 1;
        if self.schema_available {
            Ok(self.columns.clone())
        } else {
            Err(SqlBindError::SchemaUnavailable(
                "mock driver configured without schema".to_string(),
            ))
        }
    }

    async fn advance(&mut self) -> Result<bool, SqlBindError> {
        match self.pending.pop_front() {
            Some(row) => {
                self.current = Some(row);
                Ok(true)
            }
            None => {
                self.current = None;
                Ok(false)
            }
        }
    }

    fn raw_value(&self, column: &str) -> Result<SqlValue, SqlBindError> {
        let row = self
            .current
            .as_ref()
            .ok_or_else(|| SqlBindError::Driver("no current row".to_string()))?;
        let index = self
            .columns
            .iter()
            .position(|name| name == column)
            .ok_or_else(|| SqlBindError::Driver(format!("unknown column '{column}'")))?;
        row.get(index)
            .cloned()
            .ok_or_else(|| SqlBindError::Driver(format!("row too short for column '{column}'")))
    }
}

/// An executor that replays scripted cursors in order and records every
/// parameter set it is asked to bind.
#[derive(Default)]
pub struct MockExecutor {
    scripted: VecDeque<MockCursor>,
    executed: Vec<(String, Vec<Parameter>)>,
}

impl MockExecutor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a cursor for the next `execute` call.
    #[must_use]
    pub fn with_result(mut self, cursor: MockCursor) -> Self {
        self.scripted.push_back(cursor);
        self
    }

    /// Every (query text, parameters) pair seen so far, in call order.
    #[must_use]
    pub fn executed(&self) -> &[(String, Vec<Parameter>)] {
        &self.executed
    }
}

#[async_trait]
impl Executor for MockExecutor {
    type Cursor = MockCursor;

    async fn execute(
        &mut self,
        text: &str,
        params: &[Parameter],
    ) -> Result<Self::Cursor, SqlBindError> {
        self.executed.push((text.to_string(), params.to_vec()));
        self.scripted
            .pop_front()
            .ok_or_else(|| SqlBindError::Driver("no scripted result for query".to_string()))
    }
}
