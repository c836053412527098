//! The driver-neutral value model.
//!
//! `SqlValue` is the single value representation carried between the caller,
//! the parameter encoder, override transforms, and constructor invocation, so
//! none of those layers need to branch on driver types.

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::error::SqlBindError;

/// Values that can appear in a database row or be bound as query parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SqlValue {
    /// Integer value (64-bit)
    Int(i64),
    /// Floating point value (64-bit)
    Float(f64),
    /// Text/string value
    Text(String),
    /// Boolean value
    Bool(bool),
    /// Single character value
    Char(char),
    /// Arbitrary-precision decimal value
    Decimal(Decimal),
    /// UUID value
    Uuid(Uuid),
    /// Timestamp without time zone
    Timestamp(NaiveDateTime),
    /// Timestamp with time zone (UTC)
    TimestampTz(DateTime<Utc>),
    /// JSON value, carried opaquely (no wire-type mapping of its own)
    Json(JsonValue),
    /// Binary data
    Blob(Vec<u8>),
    /// NULL value (the driver's "no value" sentinel)
    Null,
}

impl SqlValue {
    /// Check if this value is NULL
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_int(&self) -> Option<&i64> {
        if let SqlValue::Int(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let SqlValue::Text(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<&bool> {
        if let SqlValue::Bool(value) = self {
            return Some(value);
        } else if let Some(i) = self.as_int() {
            if *i == 1 {
                return Some(&true);
            } else if *i == 0 {
                return Some(&false);
            }
        }
        None
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        if let SqlValue::Float(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        if let SqlValue::Timestamp(value) = self {
            return Some(*value);
        } else if let Some(s) = self.as_text() {
            // Try "YYYY-MM-DD HH:MM:SS"
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
                return Some(dt);
            }
            // Try "YYYY-MM-DD HH:MM:SS.SSS"
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S.%3f") {
                return Some(dt);
            }
        }
        None
    }

    #[must_use]
    pub fn as_blob(&self) -> Option<&[u8]> {
        if let SqlValue::Blob(bytes) = self {
            Some(bytes)
        } else {
            None
        }
    }
}

/// Conversion from a native member value into a [`SqlValue`].
///
/// Implemented for every supported native type and for `Option<T>` of each;
/// an absent value encodes as [`SqlValue::Null`]. The wire-type tag a
/// parameter carries is derived from the *declared* type (see
/// [`crate::type_map`]), never from the runtime value, so a `None` still
/// binds with a concrete tag.
pub trait ToSqlValue {
    /// # Errors
    ///
    /// Returns [`SqlBindError::ValueConversion`] when the runtime value has
    /// no wire representation, e.g. a `u64` above `i64::MAX`.
    fn to_sql_value(&self) -> Result<SqlValue, SqlBindError>;
}

macro_rules! to_sql_value_int {
    ($($t:ty),+) => {
        $(
            impl ToSqlValue for $t {
                fn to_sql_value(&self) -> Result<SqlValue, SqlBindError> {
                    Ok(SqlValue::Int(i64::from(*self)))
                }
            }
        )+
    };
}

to_sql_value_int!(i8, i16, i32, i64, u8, u16, u32);

impl ToSqlValue for u64 {
    fn to_sql_value(&self) -> Result<SqlValue, SqlBindError> {
        i64::try_from(*self).map(SqlValue::Int).map_err(|_| {
            SqlBindError::ValueConversion(format!(
                "u64 value {self} exceeds the signed 64-bit wire range"
            ))
        })
    }
}

impl ToSqlValue for f32 {
    fn to_sql_value(&self) -> Result<SqlValue, SqlBindError> {
        Ok(SqlValue::Float(f64::from(*self)))
    }
}

impl ToSqlValue for f64 {
    fn to_sql_value(&self) -> Result<SqlValue, SqlBindError> {
        Ok(SqlValue::Float(*self))
    }
}

impl ToSqlValue for Decimal {
    fn to_sql_value(&self) -> Result<SqlValue, SqlBindError> {
        Ok(SqlValue::Decimal(*self))
    }
}

impl ToSqlValue for bool {
    fn to_sql_value(&self) -> Result<SqlValue, SqlBindError> {
        Ok(SqlValue::Bool(*self))
    }
}

impl ToSqlValue for char {
    fn to_sql_value(&self) -> Result<SqlValue, SqlBindError> {
        Ok(SqlValue::Char(*self))
    }
}

impl ToSqlValue for String {
    fn to_sql_value(&self) -> Result<SqlValue, SqlBindError> {
        Ok(SqlValue::Text(self.clone()))
    }
}

impl ToSqlValue for &str {
    fn to_sql_value(&self) -> Result<SqlValue, SqlBindError> {
        Ok(SqlValue::Text((*self).to_string()))
    }
}

impl ToSqlValue for Uuid {
    fn to_sql_value(&self) -> Result<SqlValue, SqlBindError> {
        Ok(SqlValue::Uuid(*self))
    }
}

impl ToSqlValue for NaiveDateTime {
    fn to_sql_value(&self) -> Result<SqlValue, SqlBindError> {
        Ok(SqlValue::Timestamp(*self))
    }
}

impl ToSqlValue for DateTime<Utc> {
    fn to_sql_value(&self) -> Result<SqlValue, SqlBindError> {
        Ok(SqlValue::TimestampTz(*self))
    }
}

impl ToSqlValue for Vec<u8> {
    fn to_sql_value(&self) -> Result<SqlValue, SqlBindError> {
        Ok(SqlValue::Blob(self.clone()))
    }
}

impl ToSqlValue for JsonValue {
    fn to_sql_value(&self) -> Result<SqlValue, SqlBindError> {
        Ok(SqlValue::Json(self.clone()))
    }
}

impl<T: ToSqlValue> ToSqlValue for Option<T> {
    fn to_sql_value(&self) -> Result<SqlValue, SqlBindError> {
        match self {
            Some(value) => value.to_sql_value(),
            None => Ok(SqlValue::Null),
        }
    }
}
