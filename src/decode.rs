//! Row materialization: driving a forward-only cursor into typed values.
//!
//! [`Decoder`] is a lazy, single-pass pull pipeline. Each row fetch and each
//! override transform is a suspension point; no fan-out across rows happens
//! because the underlying cursor is stateful and strictly forward-only.
//! Abandoning the decoder at any row boundary drops the cursor borrow, so
//! scoped acquisition on the driver side releases the connection/command
//! resources across all exit paths.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use futures_util::future::BoxFuture;
use tracing::debug;

use crate::cursor::{Cursor, Executor};
use crate::error::SqlBindError;
use crate::naming::{to_camel_case, to_pascal_case};
use crate::query::Query;
use crate::resolve::{DescriptorCache, TargetDescriptor, resolve};
use crate::target::BindTarget;
use crate::types::SqlValue;

/// A caller-supplied asynchronous per-column transform.
pub type OverrideFn =
    Arc<dyn Fn(SqlValue) -> BoxFuture<'static, Result<SqlValue, SqlBindError>> + Send + Sync>;

/// Manual override transforms keyed by column name.
///
/// Keys may be given in raw, Pascal, or camel form; lookup for a column tries
/// the raw reported name first, then its Pascal form, then its camel form,
/// and uses the first match. A column with no matching key gets no transform.
#[derive(Clone, Default)]
pub struct Overrides {
    transforms: HashMap<String, OverrideFn>,
}

impl Overrides {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a transform for a column, consuming and returning the map so calls
    /// chain.
    #[must_use]
    pub fn with<F, Fut>(mut self, column: impl Into<String>, transform: F) -> Self
    where
        F: Fn(SqlValue) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<SqlValue, SqlBindError>> + Send + 'static,
    {
        let boxed = move |value| -> BoxFuture<'static, Result<SqlValue, SqlBindError>> {
            Box::pin(transform(value))
        };
        self.transforms.insert(column.into(), Arc::new(boxed));
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    fn lookup(&self, column: &str) -> Option<OverrideFn> {
        if let Some(transform) = self.transforms.get(column) {
            return Some(transform.clone());
        }
        let pascal = to_pascal_case(column);
        if let Some(transform) = self.transforms.get(&pascal) {
            return Some(transform.clone());
        }
        let camel = to_camel_case(column);
        self.transforms.get(&camel).cloned()
    }
}

/// Per-result-set state built once at the first row: the column schema, the
/// resolved descriptor, and the override transform for each column slot.
struct RowPlan<T: 'static> {
    columns: Vec<String>,
    descriptor: TargetDescriptor<T>,
    overrides: Vec<Option<OverrideFn>>,
}

/// Lazy decoder over a cursor; yields one `T` per row in row order.
///
/// Restartable only by re-issuing the query. After any error the decoder is
/// fused: the whole sequence aborts and further calls return `Ok(None)`.
pub struct Decoder<'c, C: Cursor, T: BindTarget> {
    cursor: &'c mut C,
    overrides: Overrides,
    cache: Option<&'c DescriptorCache>,
    plan: Option<RowPlan<T>>,
    finished: bool,
}

impl<'c, C: Cursor, T: BindTarget> Decoder<'c, C, T> {
    pub fn new(cursor: &'c mut C) -> Self {
        Self {
            cursor,
            overrides: Overrides::new(),
            cache: None,
            plan: None,
            finished: false,
        }
    }

    /// Attach manual override transforms.
    #[must_use]
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Resolve descriptors through a shared cache instead of per call.
    #[must_use]
    pub fn with_cache(mut self, cache: &'c DescriptorCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Advance to the next row and materialize it, or report exhaustion.
    ///
    /// The schema is fetched and the descriptor resolved on the first
    /// available row; an empty result set yields `None` without ever
    /// consulting the schema or the resolver.
    ///
    /// # Errors
    ///
    /// Surfaces [`SqlBindError::SchemaUnavailable`],
    /// [`SqlBindError::NoMatchingConstructor`],
    /// [`SqlBindError::OverrideTransform`], value-conversion failures, and
    /// driver errors. No partial object is returned for a failed row, and
    /// any error fuses the decoder.
    pub async fn try_next(&mut self) -> Result<Option<T>, SqlBindError> {
        if self.finished {
            return Ok(None);
        }
        let result = self.next_row().await;
        if !matches!(result, Ok(Some(_))) {
            self.finished = true;
        }
        result
    }

    /// Drain the remaining rows into a `Vec`, preserving row order.
    ///
    /// # Errors
    ///
    /// Propagates the first row-level failure; rows already materialized are
    /// discarded with the aborted sequence.
    pub async fn collect_all(mut self) -> Result<Vec<T>, SqlBindError> {
        let mut items = Vec::new();
        while let Some(item) = self.try_next().await? {
            items.push(item);
        }
        Ok(items)
    }

    async fn next_row(&mut self) -> Result<Option<T>, SqlBindError> {
        if !self.cursor.advance().await? {
            return Ok(None);
        }

        if self.plan.is_none() {
            let columns = self.cursor.schema()?;
            debug!(
                target_type = T::target_name(),
                columns = columns.len(),
                "decoding result set"
            );
            let descriptor = match self.cache {
                Some(cache) => cache.resolve::<T>(&columns)?,
                None => resolve::<T>(&columns)?,
            };
            let overrides = columns
                .iter()
                .map(|column| self.overrides.lookup(column))
                .collect();
            self.plan = Some(RowPlan {
                columns,
                descriptor,
                overrides,
            });
        }
        let Some(plan) = &self.plan else {
            return Ok(None);
        };

        match &plan.descriptor {
            TargetDescriptor::Scalar(convert) => {
                let column = &plan.columns[0];
                let mut value = self.cursor.raw_value(column)?;
                if let Some(transform) = &plan.overrides[0] {
                    value = apply_override(transform, column, value).await?;
                }
                convert(value).map(Some)
            }
            TargetDescriptor::Constructor(constructor) => {
                let mut arguments = Vec::with_capacity(plan.columns.len());
                for (column, transform) in plan.columns.iter().zip(&plan.overrides) {
                    let mut value = self.cursor.raw_value(column)?;
                    if let Some(transform) = transform {
                        value = apply_override(transform, column, value).await?;
                    }
                    arguments.push(value);
                }
                (constructor.build)(arguments).map(Some)
            }
        }
    }
}

async fn apply_override(
    transform: &OverrideFn,
    column: &str,
    value: SqlValue,
) -> Result<SqlValue, SqlBindError> {
    transform(value)
        .await
        .map_err(|e| SqlBindError::OverrideTransform {
            column: column.to_string(),
            message: e.to_string(),
        })
}

/// Decode every remaining row of `cursor` into a `Vec<T>`.
///
/// # Errors
///
/// See [`Decoder::try_next`]; the whole sequence aborts on the first
/// row-level failure.
pub async fn decode_all<T, C>(cursor: &mut C, overrides: Overrides) -> Result<Vec<T>, SqlBindError>
where
    T: BindTarget,
    C: Cursor,
{
    Decoder::new(cursor)
        .with_overrides(overrides)
        .collect_all()
        .await
}

/// Decode the first row of `cursor`, or `None` for an empty result.
///
/// Remaining rows are left unconsumed; the cursor is released when dropped.
///
/// # Errors
///
/// See [`Decoder::try_next`].
pub async fn decode_first<T, C>(
    cursor: &mut C,
    overrides: Overrides,
) -> Result<Option<T>, SqlBindError>
where
    T: BindTarget,
    C: Cursor,
{
    Decoder::new(cursor).with_overrides(overrides).try_next().await
}

/// Decode the first row of `cursor`, or the type's default for an empty
/// result.
///
/// # Errors
///
/// See [`Decoder::try_next`].
pub async fn decode_first_or_default<T, C>(
    cursor: &mut C,
    overrides: Overrides,
) -> Result<T, SqlBindError>
where
    T: BindTarget + Default,
    C: Cursor,
{
    Ok(decode_first(cursor, overrides).await?.unwrap_or_default())
}

/// Execute `query` and decode every row of the result.
///
/// # Errors
///
/// Surfaces execution failures from the driver plus every decode failure
/// mode of [`Decoder::try_next`].
pub async fn fetch_all<T, E>(
    executor: &mut E,
    query: &Query,
    overrides: Overrides,
) -> Result<Vec<T>, SqlBindError>
where
    T: BindTarget,
    E: Executor,
{
    let mut cursor = executor.execute(&query.text, &query.params).await?;
    decode_all(&mut cursor, overrides).await
}

/// Execute `query` and decode the first row, or the type's default for an
/// empty result.
///
/// # Errors
///
/// Same failure modes as [`fetch_all`].
pub async fn fetch_first_or_default<T, E>(
    executor: &mut E,
    query: &Query,
    overrides: Overrides,
) -> Result<T, SqlBindError>
where
    T: BindTarget + Default,
    E: Executor,
{
    let mut cursor = executor.execute(&query.text, &query.params).await?;
    decode_first_or_default(&mut cursor, overrides).await
}
