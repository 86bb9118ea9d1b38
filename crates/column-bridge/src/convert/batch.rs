//! Shared plumbing for the per-type codecs: column construction with rollback
//! and the generic nil-aware fixed-width encode and decode loops.
use super::{
    nil::{compare_nil_first, NilSentinel},
    properties::PropertyTracker,
    ConversionResult,
};
use crate::base::database::{
    Column, ColumnBuilder, ColumnProperties, ColumnStorage, ColumnType, FixedWidthPhysical,
    StorageError,
};
use alloc::vec::Vec;
use tracing::trace;

/// Creates a column, fills it and finalizes it.
///
/// `fill` returns the number of rows written and their flags. If it fails, the
/// column is handed back to the storage through `discard_column` and never
/// finalized.
pub(crate) fn build_column<S, F>(
    storage: &S,
    column_type: ColumnType,
    capacity: usize,
    fill: F,
) -> ConversionResult<Column>
where
    S: ColumnStorage + ?Sized,
    F: FnOnce(&S, &mut ColumnBuilder) -> ConversionResult<(usize, ColumnProperties)>,
{
    let mut builder = storage.create_column(column_type, capacity)?;
    match fill(storage, &mut builder) {
        Ok((count, properties)) => {
            trace!(
                %column_type,
                count,
                sorted = properties.sorted,
                reverse_sorted = properties.reverse_sorted,
                has_nil = properties.has_nil,
                "finalizing column"
            );
            Ok(storage.finalize_column(builder, count, properties)?)
        }
        Err(error) => {
            storage.discard_column(builder);
            Err(error)
        }
    }
}

/// Borrows the typed buffer of a fixed-width builder.
pub(crate) fn fixed_buffer<T: FixedWidthPhysical>(
    builder: &mut ColumnBuilder,
) -> ConversionResult<&mut Vec<T>> {
    let column_type = builder.column_type();
    let found = builder.data().physical_type();
    Ok(T::buffer_mut(builder.data_mut())
        .ok_or(StorageError::LayoutMismatch { column_type, found })?)
}

/// Encodes optional host values into a new fixed-width column.
///
/// Absent values are stored as the nil sentinel. Present values go through
/// `convert`, and the flags are tracked in the same pass.
pub(crate) fn encode_fixed_with<S, T, V, F>(
    storage: &S,
    column_type: ColumnType,
    values: &[Option<V>],
    mut convert: F,
) -> ConversionResult<Column>
where
    S: ColumnStorage + ?Sized,
    T: FixedWidthPhysical + NilSentinel,
    F: FnMut(&V) -> ConversionResult<T>,
{
    build_column(storage, column_type, values.len(), |_, builder| {
        let buffer = fixed_buffer::<T>(builder)?;
        let mut tracker = PropertyTracker::new();
        let mut previous: Option<T> = None;
        for value in values {
            let raw = match value {
                Some(value) => convert(value)?,
                None => T::NIL,
            };
            tracker.record(
                raw.is_nil(),
                previous.and_then(|previous| compare_nil_first(raw, previous)),
            );
            buffer.push(raw);
            previous = Some(raw);
        }
        Ok((tracker.count(), tracker.finish()))
    })
}

/// Decodes the value at `index`, mapping the nil sentinel to `None`.
///
/// # Panics
/// Panics if `index` is out of bounds.
pub(crate) fn decode_one_with<T, R, F>(
    column: &Column,
    index: usize,
    convert: F,
) -> ConversionResult<Option<R>>
where
    T: FixedWidthPhysical + NilSentinel,
    F: FnOnce(T) -> ConversionResult<R>,
{
    let raw = column.fixed::<T>()?[index];
    if raw.is_nil() {
        Ok(None)
    } else {
        convert(raw).map(Some)
    }
}

/// Decodes `destination.len()` values starting at `first`.
///
/// The nil check is skipped entirely when the column is known to hold no nil.
///
/// # Panics
/// Panics if the range is out of bounds.
pub(crate) fn decode_range_with<T, R, F>(
    column: &Column,
    first: usize,
    destination: &mut [Option<R>],
    mut convert: F,
) -> ConversionResult<()>
where
    T: FixedWidthPhysical + NilSentinel,
    F: FnMut(T) -> ConversionResult<R>,
{
    let source = &column.fixed::<T>()?[first..first + destination.len()];
    if column.properties().has_no_nil {
        for (slot, &raw) in destination.iter_mut().zip(source) {
            *slot = Some(convert(raw)?);
        }
    } else {
        for (slot, &raw) in destination.iter_mut().zip(source) {
            *slot = if raw.is_nil() {
                None
            } else {
                Some(convert(raw)?)
            };
        }
    }
    Ok(())
}
