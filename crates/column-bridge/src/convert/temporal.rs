use super::{
    batch::{decode_one_with, decode_range_with, encode_fixed_with},
    nil::NilSentinel,
    ConversionError, ConversionResult,
};
use crate::base::{
    database::{Column, ColumnStorage, ColumnType},
    time::{
        date_to_epoch_millis, daytime_to_epoch_millis, epoch_millis_to_date,
        epoch_millis_to_daytime, epoch_millis_to_timestamp, timestamp_to_epoch_millis,
        PackedDate, PackedTimestamp,
    },
};

/// Epoch milliseconds of a stored date, `None` for nil.
#[must_use]
pub fn decode_date(raw: i32) -> Option<i64> {
    (!raw.is_nil()).then(|| date_to_epoch_millis(PackedDate::from_raw(raw)))
}

/// Epoch milliseconds of a stored daytime, `None` for nil.
#[must_use]
pub fn decode_time(raw: i64) -> Option<i64> {
    (!raw.is_nil()).then(|| daytime_to_epoch_millis(raw))
}

/// Epoch milliseconds of a stored timestamp, `None` for nil.
#[must_use]
pub fn decode_timestamp(raw: i64) -> Option<i64> {
    (!raw.is_nil()).then(|| timestamp_to_epoch_millis(PackedTimestamp::from_raw(raw)))
}

/// The stored date whose approximate day contains `epoch_millis`.
///
/// Decoding yields the start of that day, which equals the input only for
/// offsets on the `years * MILLIS_PER_YEAR + days * MILLIS_PER_DAY` grid.
pub fn encode_date(epoch_millis: i64) -> ConversionResult<i32> {
    epoch_millis_to_date(epoch_millis)
        .map(PackedDate::raw)
        .map_err(|_| ConversionError::TemporalOutOfRange { epoch_millis })
}

/// The stored daytime for `epoch_millis`.
pub fn encode_time(epoch_millis: i64) -> ConversionResult<i64> {
    epoch_millis_to_daytime(epoch_millis)
        .map_err(|_| ConversionError::TemporalOutOfRange { epoch_millis })
}

/// The stored timestamp for `epoch_millis`.
pub fn encode_timestamp(epoch_millis: i64) -> ConversionResult<i64> {
    epoch_millis_to_timestamp(epoch_millis)
        .map(PackedTimestamp::raw)
        .map_err(|_| ConversionError::TemporalOutOfRange { epoch_millis })
}

fn not_temporal(column_type: ColumnType) -> ConversionError {
    ConversionError::TypeMismatch {
        expected: column_type,
        found: "epoch milliseconds",
    }
}

/// Decodes the temporal value at `index` of a date, time or timestamp column.
///
/// # Panics
/// Panics if `index` is out of bounds.
pub fn decode_temporal(column: &Column, index: usize) -> ConversionResult<Option<i64>> {
    match column.column_type() {
        ColumnType::Date => decode_one_with(column, index, |raw: i32| {
            Ok(date_to_epoch_millis(PackedDate::from_raw(raw)))
        }),
        ColumnType::Time => decode_one_with(column, index, |raw: i64| {
            Ok(daytime_to_epoch_millis(raw))
        }),
        ColumnType::Timestamp => decode_one_with(column, index, |raw: i64| {
            Ok(timestamp_to_epoch_millis(PackedTimestamp::from_raw(raw)))
        }),
        other => Err(not_temporal(other)),
    }
}

/// Decodes `destination.len()` temporal values starting at `first`.
///
/// # Panics
/// Panics if the range is out of bounds.
#[tracing::instrument(name = "temporal::decode_temporal_range", level = "debug", skip_all)]
pub fn decode_temporal_range(
    column: &Column,
    first: usize,
    destination: &mut [Option<i64>],
) -> ConversionResult<()> {
    match column.column_type() {
        ColumnType::Date => decode_range_with(column, first, destination, |raw: i32| {
            Ok(date_to_epoch_millis(PackedDate::from_raw(raw)))
        }),
        ColumnType::Time => decode_range_with(column, first, destination, |raw: i64| {
            Ok(daytime_to_epoch_millis(raw))
        }),
        ColumnType::Timestamp => decode_range_with(column, first, destination, |raw: i64| {
            Ok(timestamp_to_epoch_millis(PackedTimestamp::from_raw(raw)))
        }),
        other => Err(not_temporal(other)),
    }
}

/// Builds a date, time or timestamp column from epoch milliseconds.
#[tracing::instrument(name = "temporal::encode_temporal_column", level = "debug", skip_all)]
pub fn encode_temporal_column<S: ColumnStorage + ?Sized>(
    storage: &S,
    column_type: ColumnType,
    values: &[Option<i64>],
) -> ConversionResult<Column> {
    match column_type {
        ColumnType::Date => encode_fixed_with(storage, column_type, values, |&m| encode_date(m)),
        ColumnType::Time => encode_fixed_with(storage, column_type, values, |&m| encode_time(m)),
        ColumnType::Timestamp => {
            encode_fixed_with(storage, column_type, values, |&m| encode_timestamp(m))
        }
        other => Err(not_temporal(other)),
    }
}
