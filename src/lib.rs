//! Typed query parameter encoding and row decoding over async SQL cursors.
//!
//! This crate sits between application objects and a driver-level cursor. It
//! encodes an object's declared members into named, typed query parameters
//! ([`params::encode_parameters`]) and decodes an ordered result set back
//! into strongly typed values ([`decode::Decoder`]) without hand-written
//! per-type mapping code: target types declare their members and
//! constructors once via [`param_source!`] and [`bind_target!`], and the
//! resolver matches driver-reported `snake_case` columns against
//! application-case constructor parameters positionally.
//!
//! No driver ships here; integrate one by implementing [`cursor::Cursor`]
//! and [`cursor::Executor`]. The [`mock`] module has an in-memory
//! implementation for tests.

pub mod cursor;
pub mod decode;
pub mod error;
pub mod mock;
pub mod naming;
pub mod params;
pub mod prelude;
pub mod query;
pub mod resolve;
pub mod target;
pub mod type_map;
pub mod types;

pub use error::SqlBindError;

pub use decode::{
    Decoder, Overrides, decode_all, decode_first, decode_first_or_default, fetch_all,
    fetch_first_or_default,
};
pub use params::{ParamSource, Parameter, encode_parameters};
pub use query::Query;
pub use resolve::{DescriptorCache, TargetDescriptor, resolve};
pub use target::{BindTarget, FromSql, TargetShape};
pub use type_map::{NativeType, WireType, wire_type_of};
pub use types::{SqlValue, ToSqlValue};
