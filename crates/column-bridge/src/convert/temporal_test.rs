use super::{
    nil::NilSentinel,
    temporal::{
        decode_date, decode_temporal, decode_temporal_range, decode_time, decode_timestamp,
        encode_date, encode_temporal_column, encode_time, encode_timestamp,
    },
    ConversionError,
};
use crate::base::{
    database::{ColumnType, MemoryStorage},
    time::{MILLIS_PER_DAY, MILLIS_PER_YEAR},
};

#[test]
fn nil_temporal_values_decode_to_none() {
    assert_eq!(decode_date(i32::NIL), None);
    assert_eq!(decode_time(i64::NIL), None);
    assert_eq!(decode_timestamp(i64::NIL), None);
}

#[test]
fn we_can_round_trip_day_aligned_dates() {
    let millis = 54 * MILLIS_PER_YEAR + 100 * MILLIS_PER_DAY;
    let raw = encode_date(millis).unwrap();
    assert_eq!(decode_date(raw), Some(millis));
}

#[test]
fn date_encoding_truncates_to_the_day() {
    let raw = encode_date(MILLIS_PER_DAY + 1).unwrap();
    assert_eq!(decode_date(raw), Some(MILLIS_PER_DAY));
}

#[test]
fn times_and_timestamps_round_trip_exactly() {
    for millis in [0, 1, -1, 12_345_678, -987_654_321_000] {
        assert_eq!(decode_time(encode_time(millis).unwrap()), Some(millis));
        assert_eq!(
            decode_timestamp(encode_timestamp(millis).unwrap()),
            Some(millis)
        );
    }
}

#[test]
fn we_cannot_encode_out_of_range_epochs() {
    assert_eq!(
        encode_time(i64::MAX),
        Err(ConversionError::TemporalOutOfRange {
            epoch_millis: i64::MAX
        })
    );
    assert_eq!(
        encode_date(i64::MIN),
        Err(ConversionError::TemporalOutOfRange {
            epoch_millis: i64::MIN
        })
    );
}

#[test]
fn we_can_encode_and_decode_temporal_columns() {
    let storage = MemoryStorage::default();
    let values = [Some(2 * MILLIS_PER_DAY), None, Some(0)];
    let column = encode_temporal_column(&storage, ColumnType::Date, &values).unwrap();
    assert_eq!(column.column_type(), ColumnType::Date);
    assert!(column.properties().has_nil);
    assert!(!column.properties().sorted);
    assert!(!column.properties().reverse_sorted);

    assert_eq!(decode_temporal(&column, 1).unwrap(), None);
    let mut destination = [None; 3];
    decode_temporal_range(&column, 0, &mut destination).unwrap();
    assert_eq!(destination, values);
}

#[test]
fn we_can_decode_timestamp_ranges_without_nil() {
    let storage = MemoryStorage::default();
    let values = [Some(-5), Some(10), Some(1_700_000_000_000)];
    let column = encode_temporal_column(&storage, ColumnType::Timestamp, &values).unwrap();
    assert!(column.properties().has_no_nil);
    assert!(column.properties().sorted);
    let mut destination = [None; 2];
    decode_temporal_range(&column, 1, &mut destination).unwrap();
    assert_eq!(destination, [Some(10), Some(1_700_000_000_000)]);
}

#[test]
fn we_cannot_use_temporal_codecs_on_other_types() {
    let storage = MemoryStorage::default();
    assert!(matches!(
        encode_temporal_column(&storage, ColumnType::BigInt, &[Some(1)]),
        Err(ConversionError::TypeMismatch { .. })
    ));
}

#[test]
fn a_failing_value_discards_the_column() {
    let storage = MemoryStorage::default();
    assert!(
        encode_temporal_column(&storage, ColumnType::Time, &[Some(1), Some(i64::MAX)]).is_err()
    );
    assert_eq!(storage.created_count(), 1);
    assert_eq!(storage.discarded_count(), 1);
    assert_eq!(storage.finalized_count(), 0);
}
