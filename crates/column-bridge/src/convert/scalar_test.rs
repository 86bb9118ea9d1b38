use super::{
    nil::NilSentinel,
    scalar::{
        decode_boolean, decode_scalar, decode_scalar_range, encode_boolean, encode_scalar_column,
    },
    ConversionError,
};
use crate::base::database::{ColumnType, MemoryStorage, MemoryStorageConfig, StorageError};

#[test]
fn we_can_encode_and_decode_primitive_columns() {
    let storage = MemoryStorage::default();
    let column = encode_scalar_column(&storage, ColumnType::BigInt, &[5_i64, -3, 12]).unwrap();
    assert_eq!(column.len(), 3);
    assert_eq!(decode_scalar::<i64>(&column, 1).unwrap(), -3);

    let mut destination = [0_i64; 2];
    decode_scalar_range(&column, 1, &mut destination).unwrap();
    assert_eq!(destination, [-3, 12]);
    assert!(!column.properties().sorted);
    assert!(!column.properties().reverse_sorted);
    assert!(column.properties().has_no_nil);
}

#[test]
fn the_nil_sentinel_passes_through_primitive_decoding() {
    let storage = MemoryStorage::default();
    let column = encode_scalar_column(&storage, ColumnType::SmallInt, &[1_i16, i16::NIL]).unwrap();
    assert!(column.properties().has_nil);
    assert_eq!(decode_scalar::<i16>(&column, 1).unwrap(), i16::MIN);
}

#[test]
fn we_can_round_trip_float_columns() {
    let storage = MemoryStorage::default();
    let column = encode_scalar_column(&storage, ColumnType::Real, &[0.5_f32, 1.5]).unwrap();
    assert!(column.properties().sorted);
    let mut destination = [0.0_f32; 2];
    decode_scalar_range(&column, 0, &mut destination).unwrap();
    assert_eq!(destination, [0.5, 1.5]);
}

#[test]
fn we_cannot_encode_values_of_the_wrong_width() {
    let storage = MemoryStorage::default();
    assert!(matches!(
        encode_scalar_column(&storage, ColumnType::Int, &[1_i64]),
        Err(ConversionError::Storage {
            source: StorageError::LayoutMismatch { .. }
        })
    ));
    assert_eq!(storage.discarded_count(), 1);
    assert_eq!(storage.pending_count(), 0);
}

#[test]
fn allocation_failures_are_out_of_memory() {
    let storage = MemoryStorage::new(MemoryStorageConfig {
        max_fixed_capacity: 2,
        ..MemoryStorageConfig::default()
    });
    assert_eq!(
        encode_scalar_column(&storage, ColumnType::Int, &[1_i32, 2, 3]),
        Err(ConversionError::OutOfMemory { requested: 3 })
    );
}

#[test]
fn we_can_store_booleans_as_bytes() {
    assert_eq!(encode_boolean(true), 1);
    assert_eq!(encode_boolean(false), 0);
    assert!(decode_boolean(1));
    assert!(decode_boolean(-1));
    assert!(!decode_boolean(0));
}

#[test]
#[should_panic]
fn decoding_past_the_end_panics() {
    let storage = MemoryStorage::default();
    let column = encode_scalar_column(&storage, ColumnType::Int, &[1_i32]).unwrap();
    let _ = decode_scalar::<i32>(&column, 1);
}
