//! The capability contract expected from a data-access driver.
//!
//! This crate sits strictly between application objects and a driver-level
//! cursor; it ships no driver of its own. A driver integrates by implementing
//! these two traits (see [`crate::mock`] for an in-memory implementation used
//! in tests).

use async_trait::async_trait;

use crate::error::SqlBindError;
use crate::params::Parameter;
use crate::types::SqlValue;

/// Forward-only handle over a pending query's rows.
#[async_trait]
pub trait Cursor: Send {
    /// The ordered column names of the pending result.
    ///
    /// Valid only before or at the first row; behavior after exhaustion is
    /// undefined and must not be relied upon. The decoder calls this exactly
    /// once per result set.
    ///
    /// # Errors
    ///
    /// Returns [`SqlBindError::SchemaUnavailable`] if the driver cannot
    /// report column names. This is fatal and never retried.
    fn schema(&mut self) -> Result<Vec<String>, SqlBindError>;

    /// Move to the next row, or report exhaustion.
    ///
    /// # Errors
    ///
    /// Driver-level failures (including caller-imposed timeouts at the
    /// connection layer) surface here as [`SqlBindError::Driver`].
    async fn advance(&mut self) -> Result<bool, SqlBindError>;

    /// Raw value of a column within the current row; the driver's "no value"
    /// sentinel must be reported as [`SqlValue::Null`].
    ///
    /// # Errors
    ///
    /// Returns [`SqlBindError::Driver`] if the column is unknown or no row
    /// is current.
    fn raw_value(&self, column: &str) -> Result<SqlValue, SqlBindError>;
}

/// Issues a command and produces a cursor over its result.
#[async_trait]
pub trait Executor {
    type Cursor: Cursor;

    /// Execute a query with the given parameters.
    ///
    /// # Errors
    ///
    /// Must fail fast on malformed parameter sets; no partial execution may
    /// be visible.
    async fn execute(
        &mut self,
        text: &str,
        params: &[Parameter],
    ) -> Result<Self::Cursor, SqlBindError>;
}
