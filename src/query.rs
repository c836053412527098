//! A query and its encoded parameters bundled together.

use crate::error::SqlBindError;
use crate::params::{ParamSource, Parameter, encode_parameters};

/// A text command plus its already-encoded parameters.
///
/// Makes it easier to pass a statement and its bindings around as a single
/// unit; the parameter source object is consulted once at construction and
/// not owned beyond it.
#[derive(Debug, Clone)]
pub struct Query {
    /// The SQL query string
    pub text: String,
    /// The encoded parameters to bind to the query
    pub params: Vec<Parameter>,
}

impl Query {
    /// Create a query with no parameters.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            params: Vec::new(),
        }
    }

    /// Create a query with parameters encoded from a source object.
    ///
    /// # Errors
    ///
    /// Returns [`SqlBindError::UnsupportedType`] if any member of `source`
    /// has no wire-type mapping; no partial parameter list is retained.
    pub fn with_source<S: ParamSource>(
        text: impl Into<String>,
        source: &S,
    ) -> Result<Self, SqlBindError> {
        Ok(Self {
            text: text.into(),
            params: encode_parameters(source)?,
        })
    }
}
