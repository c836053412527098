use thiserror::Error;

/// Errors surfaced by parameter encoding and row decoding.
///
/// None of these are retried internally; they indicate a mismatch between
/// code and schema/data rather than a transient fault, so every variant is
/// surfaced synchronously to the immediate caller.
#[derive(Debug, Error)]
pub enum SqlBindError {
    /// A native type has no wire-type mapping. Raised during parameter
    /// encoding; the whole encode aborts and no partial parameter list escapes.
    #[error("Type {0} has no wire-type mapping")]
    UnsupportedType(&'static str),

    /// No constructor's positional, normalized parameter names match the
    /// column schema. Raised at first-row resolution.
    #[error("No constructor on {target} matches columns: {columns}")]
    NoMatchingConstructor {
        /// Name of the target type that failed resolution
        target: &'static str,
        /// The full column list, comma-separated, to aid debugging of
        /// naming/order mismatches
        columns: String,
    },

    /// The driver cannot report column names for a pending result.
    #[error("Schema unavailable: {0}")]
    SchemaUnavailable(String),

    /// An override transform itself failed; the in-progress row is aborted.
    #[error("Override transform failed for column '{column}': {message}")]
    OverrideTransform { column: String, message: String },

    /// A raw value could not be converted to the requested native type.
    #[error("Value conversion error: {0}")]
    ValueConversion(String),

    /// Opaque driver-level failure (connection loss, statement error,
    /// caller-imposed timeout), surfaced at the next suspension point.
    #[error("Driver error: {0}")]
    Driver(String),
}
