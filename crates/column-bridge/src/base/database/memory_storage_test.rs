use super::{
    ColumnData, ColumnProperties, ColumnStorage, ColumnType, DecimalWidth, MemoryStorage,
    MemoryStorageConfig, StorageError,
};

#[test]
fn we_can_create_fill_and_finalize_a_fixed_width_column() {
    let storage = MemoryStorage::default();
    let mut builder = storage.create_column(ColumnType::Int, 3).unwrap();
    assert_eq!(builder.capacity(), 3);
    match builder.data_mut() {
        ColumnData::Int32(values) => values.extend_from_slice(&[1, 2, 3]),
        other => panic!("unexpected layout {other:?}"),
    }
    let column = storage
        .finalize_column(builder, 3, ColumnProperties::empty())
        .unwrap();
    assert_eq!(column.fixed::<i32>().unwrap(), &[1, 2, 3]);
    assert_eq!(storage.created_count(), 1);
    assert_eq!(storage.finalized_count(), 1);
    assert_eq!(storage.pending_count(), 0);
}

#[test]
fn we_cannot_finalize_with_the_wrong_count() {
    let storage = MemoryStorage::default();
    let builder = storage.create_column(ColumnType::BigInt, 2).unwrap();
    assert_eq!(
        storage.finalize_column(builder, 2, ColumnProperties::empty()),
        Err(StorageError::CountMismatch {
            count: 2,
            appended: 0
        })
    );
    assert_eq!(storage.finalized_count(), 0);
}

#[test]
fn we_cannot_finalize_with_undecided_nil_flags() {
    let storage = MemoryStorage::default();
    let builder = storage.create_column(ColumnType::Double, 0).unwrap();
    let properties = ColumnProperties {
        has_nil: true,
        ..ColumnProperties::empty()
    };
    assert_eq!(
        storage.finalize_column(builder, 0, properties),
        Err(StorageError::UndecidedNilPresence)
    );
}

#[test]
fn we_cannot_create_columns_beyond_the_capacity_limit() {
    let storage = MemoryStorage::new(MemoryStorageConfig {
        max_fixed_capacity: 10,
        ..MemoryStorageConfig::default()
    });
    assert!(matches!(
        storage.create_column(ColumnType::Int, 11),
        Err(StorageError::OutOfMemory { requested: 11 })
    ));
    assert_eq!(storage.created_count(), 0);
}

#[test]
fn discarded_columns_are_counted() {
    let storage = MemoryStorage::default();
    let builder = storage.create_column(ColumnType::VarChar, 4).unwrap();
    assert_eq!(storage.pending_count(), 1);
    storage.discard_column(builder);
    assert_eq!(storage.discarded_count(), 1);
    assert_eq!(storage.pending_count(), 0);
}

#[test]
fn we_can_only_append_to_the_heap_of_heap_backed_columns() {
    let storage = MemoryStorage::default();
    let mut strings = storage.create_column(ColumnType::VarChar, 1).unwrap();
    assert_eq!(storage.append_to_heap(&mut strings, b"ab").unwrap(), 0);
    let mut ints = storage.create_column(ColumnType::Int, 1).unwrap();
    assert!(matches!(
        storage.append_to_heap(&mut ints, b"ab"),
        Err(StorageError::LayoutMismatch { .. })
    ));
}

#[test]
fn only_string_heaps_eliminate_doubles() {
    let storage = MemoryStorage::default();
    let mut strings = storage.create_column(ColumnType::VarChar, 2).unwrap();
    let first = storage.append_to_heap(&mut strings, b"xy").unwrap();
    assert_eq!(storage.append_to_heap(&mut strings, b"xy").unwrap(), first);
    let mut blobs = storage.create_column(ColumnType::VarBinary, 2).unwrap();
    let first = storage.append_to_heap(&mut blobs, b"xy").unwrap();
    assert_ne!(storage.append_to_heap(&mut blobs, b"xy").unwrap(), first);
}

#[test]
fn we_can_resolve_decimal_descriptors_up_to_the_configured_scale() {
    let storage = MemoryStorage::default();
    let descriptor = storage.resolve_decimal_descriptor(3).unwrap();
    assert_eq!(descriptor.scale, 3);
    assert_eq!(descriptor.digits, DecimalWidth::W64.max_digits());
    assert!(storage.resolve_decimal_descriptor(18).is_some());
    assert!(storage.resolve_decimal_descriptor(19).is_none());
}

#[test]
fn we_can_deserialize_a_partial_config() {
    let config: MemoryStorageConfig =
        serde_json::from_str(r#"{"heap_limit": 1024, "dedup_strings": false}"#).unwrap();
    assert_eq!(config.heap_limit, Some(1024));
    assert!(!config.dedup_strings);
    assert_eq!(config.max_decimal_scale, 18);
    assert_eq!(config.max_fixed_capacity, u32::MAX as usize);
}
