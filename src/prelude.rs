//! Convenient imports for common functionality.
//!
//! This module re-exports the most commonly used types and functions
//! to make it easier to get started with the library.

pub use crate::cursor::{Cursor, Executor};
pub use crate::decode::{
    Decoder, Overrides, decode_all, decode_first, decode_first_or_default, fetch_all,
    fetch_first_or_default,
};
pub use crate::error::SqlBindError;
pub use crate::naming::{to_camel_case, to_pascal_case};
pub use crate::params::{ParamSource, Parameter, encode_parameters};
pub use crate::query::Query;
pub use crate::resolve::{DescriptorCache, TargetDescriptor, resolve};
pub use crate::target::{BindTarget, FromSql, TargetShape};
pub use crate::type_map::{NativeType, SqlNative, WireType, wire_type_of};
pub use crate::types::{SqlValue, ToSqlValue};

pub use crate::{bind_target, param_source};
