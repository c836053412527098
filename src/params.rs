//! Parameter encoding: from an object's declared members to named, typed,
//! nullable query parameters.

use serde::Serialize;

use crate::error::SqlBindError;
use crate::type_map::{NativeType, WireType, wire_type_of};
use crate::types::SqlValue;

/// A named, typed, nullable query parameter.
///
/// The wire-type tag is derived solely from the member's declared type, not
/// its runtime value, so a null value still carries a concrete tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    /// Parameter name, exactly as declared on the source object; the query
    /// text must reference the same literal name.
    pub name: String,
    /// Wire-type tag resolved from the declared native type.
    pub wire_type: WireType,
    /// Current value, or [`SqlValue::Null`] if absent.
    pub value: SqlValue,
}

/// One declared member of a parameter-source object.
#[derive(Debug, Clone, Copy)]
pub struct ParamField {
    /// Member name as declared (no normalization applied).
    pub name: &'static str,
    /// The member's declared native type.
    pub native: NativeType,
}

/// Capability of a type to act as a parameter source.
///
/// This replaces the original design's runtime reflection walk with an
/// explicit member table, typically produced by [`crate::param_source!`], so
/// no per-type mapping code is hand-written and no introspection cost recurs
/// per call.
pub trait ParamSource {
    /// Declared members in declaration order.
    fn param_fields() -> &'static [ParamField];

    /// Current member values, parallel to [`ParamSource::param_fields`];
    /// absent values are [`SqlValue::Null`].
    ///
    /// # Errors
    ///
    /// Returns [`SqlBindError::ValueConversion`] when a member's runtime
    /// value has no wire representation (e.g. a `u64` above `i64::MAX`).
    fn param_values(&self) -> Result<Vec<SqlValue>, SqlBindError>;
}

/// Encode every declared member of `source` as one named, typed parameter.
///
/// Names are emitted exactly as declared; duplicate member names are not
/// deduplicated (uniqueness is the caller's responsibility).
///
/// # Errors
///
/// Returns [`SqlBindError::UnsupportedType`] naming the offending type when a
/// member's declared type has no wire-type mapping, or
/// [`SqlBindError::ValueConversion`] when a runtime value cannot be
/// represented on the wire. Encoding of the whole object aborts; a partial
/// parameter list is never produced.
pub fn encode_parameters<S: ParamSource>(source: &S) -> Result<Vec<Parameter>, SqlBindError> {
    let fields = S::param_fields();
    let values = source.param_values()?;
    debug_assert_eq!(fields.len(), values.len());

    let mut parameters = Vec::with_capacity(fields.len());
    for (field, value) in fields.iter().zip(values) {
        let wire_type = wire_type_of(field.native)?;
        parameters.push(Parameter {
            name: field.name.to_string(),
            wire_type,
            value,
        });
    }
    Ok(parameters)
}

/// Implement [`ParamSource`] for a struct from its field list.
///
/// Each listed field must be a public member whose type implements
/// [`crate::type_map::SqlNative`] and [`crate::types::ToSqlValue`]. Fields
/// are encoded in the listed order.
///
/// ```
/// use sql_binder::param_source;
///
/// struct NewUser {
///     id: i64,
///     name: String,
///     nickname: Option<String>,
/// }
///
/// param_source!(NewUser { id: i64, name: String, nickname: Option<String> });
/// ```
#[macro_export]
macro_rules! param_source {
    ($ty:ty { $($field:ident : $ft:ty),+ $(,)? }) => {
        impl $crate::params::ParamSource for $ty {
            fn param_fields() -> &'static [$crate::params::ParamField] {
                const FIELDS: &[$crate::params::ParamField] = &[
                    $(
                        $crate::params::ParamField {
                            name: stringify!($field),
                            native: <$ft as $crate::type_map::SqlNative>::NATIVE,
                        }
                    ),+
                ];
                FIELDS
            }

            fn param_values(
                &self,
            ) -> Result<Vec<$crate::types::SqlValue>, $crate::error::SqlBindError> {
                Ok(vec![
                    $( $crate::types::ToSqlValue::to_sql_value(&self.$field)? ),+
                ])
            }
        }
    };
}
