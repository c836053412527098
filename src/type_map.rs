//! The native-type to wire-type table.
//!
//! The mapping is intentionally static and exhaustive rather than reflective;
//! adding a supported type is a table edit, not new logic. The table is a
//! pure function, read-only after compilation, and safe to consult from any
//! number of concurrent encode/decode operations.

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::error::SqlBindError;

/// The fixed enumeration of native types the parameter encoder understands.
///
/// Nullable variants are expressed as `Option<T>` on the Rust side and map to
/// the same tag as `T`; a null value still carries a concrete wire-type tag
/// because the tag is derived from the declared type, not the runtime value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NativeType {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Decimal,
    Bool,
    Text,
    Char,
    Uuid,
    Timestamp,
    TimestampTz,
    Bytes,
    /// A declared type outside the supported table; resolving it fails with
    /// [`SqlBindError::UnsupportedType`] naming the offender.
    Unsupported(&'static str),
}

/// The database driver's type identifier used to bind a parameter so the
/// backend interprets the bytes correctly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WireType {
    Smallint,
    Integer,
    Bigint,
    Real,
    Double,
    Numeric,
    Boolean,
    Varchar,
    Char,
    Uuid,
    Timestamp,
    TimestampTz,
    Bytea,
}

/// Resolve a native type to its wire-type tag.
///
/// A pure, total function over the supported enumeration; repeated calls for
/// the same input always return the same tag.
///
/// # Errors
///
/// Returns [`SqlBindError::UnsupportedType`] naming the offending type when
/// no mapping exists.
pub fn wire_type_of(native: NativeType) -> Result<WireType, SqlBindError> {
    match native {
        NativeType::I8 | NativeType::U8 | NativeType::I16 | NativeType::U16 => {
            Ok(WireType::Smallint)
        }
        NativeType::I32 | NativeType::U32 => Ok(WireType::Integer),
        NativeType::I64 | NativeType::U64 => Ok(WireType::Bigint),
        NativeType::F32 => Ok(WireType::Real),
        NativeType::F64 => Ok(WireType::Double),
        NativeType::Decimal => Ok(WireType::Numeric),
        NativeType::Bool => Ok(WireType::Boolean),
        NativeType::Text => Ok(WireType::Varchar),
        NativeType::Char => Ok(WireType::Char),
        NativeType::Uuid => Ok(WireType::Uuid),
        NativeType::Timestamp => Ok(WireType::Timestamp),
        NativeType::TimestampTz => Ok(WireType::TimestampTz),
        NativeType::Bytes => Ok(WireType::Bytea),
        NativeType::Unsupported(name) => Err(SqlBindError::UnsupportedType(name)),
    }
}

/// Associates a Rust type with its entry in the native-type table.
///
/// This is the compile-time replacement for runtime type introspection: field
/// declarations in [`crate::param_source!`] pull their tag from this trait.
pub trait SqlNative {
    const NATIVE: NativeType;
}

macro_rules! sql_native {
    ($($t:ty => $native:ident),+ $(,)?) => {
        $(
            impl SqlNative for $t {
                const NATIVE: NativeType = NativeType::$native;
            }
        )+
    };
}

sql_native! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    Decimal => Decimal,
    bool => Bool,
    String => Text,
    char => Char,
    Uuid => Uuid,
    NaiveDateTime => Timestamp,
    Vec<u8> => Bytes,
}

impl SqlNative for DateTime<Utc> {
    const NATIVE: NativeType = NativeType::TimestampTz;
}

impl<T: SqlNative> SqlNative for Option<T> {
    const NATIVE: NativeType = T::NATIVE;
}

// JSON deliberately has no wire-type mapping; encoding a JSON member fails
// with UnsupportedType, matching the table's fixed scope.
impl SqlNative for serde_json::Value {
    const NATIVE: NativeType = NativeType::Unsupported("serde_json::Value");
}
