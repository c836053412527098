//! Column-to-constructor resolution.
//!
//! Given the ordered column names of a pending result and a target type,
//! pick the binding to materialize rows with: either the single-column
//! scalar fast path, or the unique constructor whose parameter list matches
//! the columns positionally after both sides are normalized to Pascal case.
//!
//! Matching is strictly positional, not set-based. That keeps the search
//! O(parameters) per candidate and avoids ambiguity when two parameters fold
//! to the same normalized name; the cost is that query column order becomes
//! part of the binding contract between query author and target type author.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Mutex;

use tracing::debug;

use crate::error::SqlBindError;
use crate::naming::to_pascal_case;
use crate::target::{BindTarget, Constructor, TargetShape};
use crate::types::SqlValue;

/// A resolved binding for a (target type, column schema) pair.
#[derive(Debug)]
pub enum TargetDescriptor<T: 'static> {
    /// The type is a leaf scalar; the single column converts directly.
    Scalar(fn(SqlValue) -> Result<T, SqlBindError>),
    /// The selected constructor plus its ordered parameter slots.
    Constructor(&'static Constructor<T>),
}

fn names_match(param: &str, column: &str) -> bool {
    to_pascal_case(param).eq_ignore_ascii_case(&to_pascal_case(column))
}

fn no_match<T: BindTarget>(columns: &[String]) -> SqlBindError {
    SqlBindError::NoMatchingConstructor {
        target: T::target_name(),
        columns: columns.join(", "),
    }
}

/// Resolve the descriptor for `T` against an ordered column schema.
///
/// With exactly one column and a scalar-shaped `T`, the scalar descriptor is
/// returned without any constructor search. Otherwise constructors are tried
/// in declared order; a candidate must have a parameter count equal to the
/// column count and every parameter name must match the column at the same
/// index (Pascal-normalized, case-insensitive). The first full match wins.
///
/// # Errors
///
/// Returns [`SqlBindError::NoMatchingConstructor`] reporting the target type
/// and the full column list when no constructor's parameter set matches.
pub fn resolve<T: BindTarget>(columns: &[String]) -> Result<TargetDescriptor<T>, SqlBindError> {
    match T::shape() {
        TargetShape::Scalar(convert) if columns.len() == 1 => Ok(TargetDescriptor::Scalar(convert)),
        // A scalar target with a multi-column result has nothing to search.
        TargetShape::Scalar(_) => Err(no_match::<T>(columns)),
        TargetShape::Constructors(constructors) => {
            for (index, constructor) in constructors.iter().enumerate() {
                if constructor.params.len() != columns.len() {
                    continue;
                }
                let all_match = constructor
                    .params
                    .iter()
                    .zip(columns)
                    .all(|(param, column)| names_match(param, column));
                if all_match {
                    debug!(
                        target_type = T::target_name(),
                        constructor = index,
                        "resolved constructor binding"
                    );
                    return Ok(TargetDescriptor::Constructor(constructor));
                }
            }
            Err(no_match::<T>(columns))
        }
    }
}

#[derive(Clone, Copy)]
enum CachedShape {
    Scalar,
    ConstructorIndex(usize),
}

/// Optional descriptor cache keyed by (type identity, column-name tuple).
///
/// A pure performance optimization: decoding without a cache re-resolves per
/// call, which is the reference behavior. The cache is explicit, injectable
/// state with a defined lifecycle: created once, shared by reference across
/// concurrent decode operations, cleared only by [`DescriptorCache::clear`].
/// Two callers racing to resolve the same pair compute redundantly and the
/// last write wins; that is tolerated, not a correctness violation.
#[derive(Default)]
pub struct DescriptorCache {
    entries: Mutex<HashMap<(TypeId, Vec<String>), CachedShape>>,
}

impl DescriptorCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove all cached resolutions.
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }

    /// Resolve through the cache, computing and inserting on miss.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`resolve`]; failures are not cached.
    pub fn resolve<T: BindTarget>(
        &self,
        columns: &[String],
    ) -> Result<TargetDescriptor<T>, SqlBindError> {
        let key = (TypeId::of::<T>(), columns.to_vec());

        let cached = self
            .entries
            .lock()
            .ok()
            .and_then(|entries| entries.get(&key).copied());
        if let Some(shape) = cached {
            match (shape, T::shape()) {
                (CachedShape::Scalar, TargetShape::Scalar(convert)) => {
                    return Ok(TargetDescriptor::Scalar(convert));
                }
                (CachedShape::ConstructorIndex(index), TargetShape::Constructors(constructors)) => {
                    if let Some(constructor) = constructors.get(index) {
                        return Ok(TargetDescriptor::Constructor(constructor));
                    }
                }
                // Shape changed out from under the cache; fall through and
                // recompute.
                _ => {}
            }
        }

        let descriptor = resolve::<T>(columns)?;
        let shape = match &descriptor {
            TargetDescriptor::Scalar(_) => CachedShape::Scalar,
            TargetDescriptor::Constructor(selected) => {
                let index = match T::shape() {
                    TargetShape::Constructors(constructors) => constructors
                        .iter()
                        .position(|c| std::ptr::eq(*selected, c))
                        .unwrap_or(0),
                    TargetShape::Scalar(_) => 0,
                };
                CachedShape::ConstructorIndex(index)
            }
        };
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key, shape);
        }
        Ok(descriptor)
    }
}
