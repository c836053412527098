//! Decode targets: leaf scalars and constructor-bound types.
//!
//! The original design discovered constructors through runtime reflection;
//! here each target type carries an explicit capability instead. A
//! [`BindTarget`] reports its [`TargetShape`]: either a leaf scalar eligible
//! for the single-column fast path, or an ordered table of constructors for
//! positional column matching. The [`crate::bind_target!`] macro writes the
//! table so no per-type mapping code is written by hand.

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::error::SqlBindError;
use crate::types::SqlValue;

fn mismatch(expected: &str, got: &SqlValue) -> SqlBindError {
    SqlBindError::ValueConversion(format!("expected {expected}, got {got:?}"))
}

/// Conversion from a raw column value into a native scalar.
pub trait FromSql: Sized {
    /// # Errors
    ///
    /// Returns [`SqlBindError::ValueConversion`] when the raw value cannot
    /// represent `Self`, including a NULL for a non-nullable target.
    fn from_sql(value: SqlValue) -> Result<Self, SqlBindError>;
}

impl FromSql for i64 {
    fn from_sql(value: SqlValue) -> Result<Self, SqlBindError> {
        match value {
            SqlValue::Int(i) => Ok(i),
            other => Err(mismatch("integer", &other)),
        }
    }
}

macro_rules! from_sql_narrow_int {
    ($($t:ty),+) => {
        $(
            impl FromSql for $t {
                fn from_sql(value: SqlValue) -> Result<Self, SqlBindError> {
                    match value {
                        SqlValue::Int(i) => <$t>::try_from(i).map_err(|_| {
                            SqlBindError::ValueConversion(format!(
                                "integer {i} out of range for {}",
                                stringify!($t)
                            ))
                        }),
                        other => Err(mismatch("integer", &other)),
                    }
                }
            }
        )+
    };
}

from_sql_narrow_int!(i8, i16, i32, u8, u16, u32, u64);

impl FromSql for f64 {
    fn from_sql(value: SqlValue) -> Result<Self, SqlBindError> {
        match value {
            SqlValue::Float(f) => Ok(f),
            // Lenient: integer columns bind into float targets. Magnitudes
            // above 2^53 round to the nearest representable f64.
            SqlValue::Int(i) => Ok(i as f64),
            other => Err(mismatch("float", &other)),
        }
    }
}

impl FromSql for f32 {
    fn from_sql(value: SqlValue) -> Result<Self, SqlBindError> {
        f64::from_sql(value).map(|f| f as f32)
    }
}

impl FromSql for Decimal {
    fn from_sql(value: SqlValue) -> Result<Self, SqlBindError> {
        match value {
            SqlValue::Decimal(d) => Ok(d),
            SqlValue::Int(i) => Ok(Decimal::from(i)),
            SqlValue::Text(s) => s
                .parse()
                .map_err(|e| SqlBindError::ValueConversion(format!("bad decimal '{s}': {e}"))),
            other => Err(mismatch("decimal", &other)),
        }
    }
}

impl FromSql for bool {
    fn from_sql(value: SqlValue) -> Result<Self, SqlBindError> {
        match value.as_bool() {
            Some(b) => Ok(*b),
            None => Err(mismatch("boolean", &value)),
        }
    }
}

impl FromSql for String {
    fn from_sql(value: SqlValue) -> Result<Self, SqlBindError> {
        match value {
            SqlValue::Text(s) => Ok(s),
            SqlValue::Char(c) => Ok(c.to_string()),
            other => Err(mismatch("text", &other)),
        }
    }
}

impl FromSql for char {
    fn from_sql(value: SqlValue) -> Result<Self, SqlBindError> {
        match value {
            SqlValue::Char(c) => Ok(c),
            SqlValue::Text(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(c),
                    _ => Err(SqlBindError::ValueConversion(format!(
                        "text '{s}' is not a single character"
                    ))),
                }
            }
            other => Err(mismatch("char", &other)),
        }
    }
}

impl FromSql for Uuid {
    fn from_sql(value: SqlValue) -> Result<Self, SqlBindError> {
        match value {
            SqlValue::Uuid(u) => Ok(u),
            SqlValue::Text(s) => Uuid::parse_str(&s)
                .map_err(|e| SqlBindError::ValueConversion(format!("bad uuid '{s}': {e}"))),
            other => Err(mismatch("uuid", &other)),
        }
    }
}

impl FromSql for NaiveDateTime {
    fn from_sql(value: SqlValue) -> Result<Self, SqlBindError> {
        match value.as_timestamp() {
            Some(ts) => Ok(ts),
            None => Err(mismatch("timestamp", &value)),
        }
    }
}

impl FromSql for DateTime<Utc> {
    fn from_sql(value: SqlValue) -> Result<Self, SqlBindError> {
        match value {
            SqlValue::TimestampTz(ts) => Ok(ts),
            SqlValue::Timestamp(ts) => Ok(ts.and_utc()),
            other => Err(mismatch("timestamptz", &other)),
        }
    }
}

impl FromSql for Vec<u8> {
    fn from_sql(value: SqlValue) -> Result<Self, SqlBindError> {
        match value {
            SqlValue::Blob(bytes) => Ok(bytes),
            other => Err(mismatch("bytes", &other)),
        }
    }
}

impl FromSql for JsonValue {
    fn from_sql(value: SqlValue) -> Result<Self, SqlBindError> {
        match value {
            SqlValue::Json(json) => Ok(json),
            other => Err(mismatch("json", &other)),
        }
    }
}

impl<T: FromSql> FromSql for Option<T> {
    fn from_sql(value: SqlValue) -> Result<Self, SqlBindError> {
        if value.is_null() {
            Ok(None)
        } else {
            T::from_sql(value).map(Some)
        }
    }
}

/// One constructor of a bound type: its ordered parameter names plus the
/// build function that consumes one materialized row's values positionally.
#[derive(Debug)]
pub struct Constructor<T: 'static> {
    /// Parameter names in declared order, assumed already in application case.
    pub params: &'static [&'static str],
    /// Builds an instance from the ordered, possibly-overridden row values.
    pub build: fn(Vec<SqlValue>) -> Result<T, SqlBindError>,
}

/// How a target type binds to columns: a sum type rather than a sentinel.
pub enum TargetShape<T: 'static> {
    /// A leaf scalar eligible for the single-column direct-cast fast path.
    Scalar(fn(SqlValue) -> Result<T, SqlBindError>),
    /// Constructors in declared order; the resolver picks the first whose
    /// parameter names match the columns positionally.
    Constructors(&'static [Constructor<T>]),
}

/// Capability of a type to be a decode target.
pub trait BindTarget: Sized + 'static {
    fn shape() -> TargetShape<Self>;

    /// Name used in resolution errors.
    fn target_name() -> &'static str {
        std::any::type_name::<Self>()
    }
}

// Registered leaf scalars: text, arbitrary-precision decimal, fixed-width
// numeric primitives, boolean, char, raw bytes. Note UUID and timestamps are
// deliberately not scalar targets; they only appear as constructor arguments.
macro_rules! leaf_scalar {
    ($($t:ty),+ $(,)?) => {
        $(
            impl BindTarget for $t {
                fn shape() -> TargetShape<Self> {
                    TargetShape::Scalar(<$t as FromSql>::from_sql)
                }
            }
        )+
    };
}

leaf_scalar!(
    i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, Decimal, bool, char, String, Vec<u8>,
);

impl<T: FromSql + 'static> BindTarget for Option<T> {
    fn shape() -> TargetShape<Self> {
        TargetShape::Scalar(<Option<T> as FromSql>::from_sql)
    }
}

/// Implement [`BindTarget`] for a struct with one or more constructors.
///
/// Constructors are declared in the order the resolver should try them; each
/// lists its parameters with their native types and an expression building
/// the instance from the bound parameter names.
///
/// ```
/// use sql_binder::bind_target;
///
/// #[derive(Debug, PartialEq)]
/// struct User {
///     id: i64,
///     user_name: String,
/// }
///
/// bind_target!(User {
///     (id: i64, user_name: String) => User { id, user_name },
/// });
/// ```
#[macro_export]
macro_rules! bind_target {
    ($ty:ty { $( ( $($param:ident : $pt:ty),+ $(,)? ) => $body:expr ),+ $(,)? }) => {
        impl $crate::target::BindTarget for $ty {
            fn shape() -> $crate::target::TargetShape<Self> {
                const CTORS: &[$crate::target::Constructor<$ty>] = &[
                    $(
                        $crate::target::Constructor {
                            params: &[ $( stringify!($param) ),+ ],
                            build: |values: Vec<$crate::types::SqlValue>|
                                -> Result<$ty, $crate::error::SqlBindError> {
                                let mut values = values.into_iter();
                                $(
                                    let $param: $pt = $crate::target::FromSql::from_sql(
                                        values.next().ok_or_else(|| {
                                            $crate::error::SqlBindError::ValueConversion(
                                                concat!(
                                                    "missing argument for parameter `",
                                                    stringify!($param),
                                                    "`"
                                                )
                                                .to_string(),
                                            )
                                        })?,
                                    )?;
                                )+
                                Ok($body)
                            },
                        }
                    ),+
                ];
                $crate::target::TargetShape::Constructors(CTORS)
            }
        }
    };
}
