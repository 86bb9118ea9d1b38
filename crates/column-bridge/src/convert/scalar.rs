use super::{
    batch::{build_column, fixed_buffer},
    nil::NilSentinel,
    properties::PropertyTracker,
    ConversionResult,
};
use crate::base::database::{Column, ColumnStorage, ColumnType, FixedWidthPhysical};

/// Reads the stored value at `index` as is.
///
/// The nil sentinel is returned untouched; callers wanting `None` for absent
/// values go through the boxed decoders instead.
///
/// # Panics
/// Panics if `index` is out of bounds.
pub fn decode_scalar<T: FixedWidthPhysical>(column: &Column, index: usize) -> ConversionResult<T> {
    Ok(column.fixed::<T>()?[index])
}

/// Copies `destination.len()` stored values starting at `first` in one block copy.
///
/// # Panics
/// Panics if the range is out of bounds.
#[tracing::instrument(name = "scalar::decode_scalar_range", level = "debug", skip_all)]
pub fn decode_scalar_range<T: FixedWidthPhysical>(
    column: &Column,
    first: usize,
    destination: &mut [T],
) -> ConversionResult<()> {
    let source = column.fixed::<T>()?;
    destination.copy_from_slice(&source[first..first + destination.len()]);
    Ok(())
}

/// Builds a column from plain stored values.
///
/// The values are copied in bulk and the flags come from a single forward scan
/// of the copy. Values equal to the nil sentinel count as absent.
#[tracing::instrument(name = "scalar::encode_scalar_column", level = "debug", skip_all)]
pub fn encode_scalar_column<S, T>(
    storage: &S,
    column_type: ColumnType,
    values: &[T],
) -> ConversionResult<Column>
where
    S: ColumnStorage + ?Sized,
    T: FixedWidthPhysical + NilSentinel,
{
    build_column(storage, column_type, values.len(), |_, builder| {
        let buffer = fixed_buffer::<T>(builder)?;
        buffer.extend_from_slice(values);
        Ok((buffer.len(), PropertyTracker::scan(buffer)))
    })
}

/// Stores a boolean as a single byte.
#[must_use]
pub fn encode_boolean(value: bool) -> i8 {
    i8::from(value)
}

/// Reads a stored boolean byte; any non-zero byte is true.
#[must_use]
pub fn decode_boolean(raw: i8) -> bool {
    raw != 0
}
