use super::{
    decode_one, decode_range, encode_column, nil::RawValue, rule, ConversionError, HostFactory,
    HostValue, HostValueFactory, RoundingPolicy,
};
use crate::base::database::{
    ColumnType, DecimalWidth, HostShape, MemoryStorage, MemoryStorageConfig, PhysicalType,
};
use bigdecimal::BigDecimal;

const ALL_TYPES: [ColumnType; 14] = [
    ColumnType::Boolean,
    ColumnType::TinyInt,
    ColumnType::SmallInt,
    ColumnType::Int,
    ColumnType::BigInt,
    ColumnType::Real,
    ColumnType::Double,
    ColumnType::Date,
    ColumnType::Time,
    ColumnType::Timestamp,
    ColumnType::Decimal(DecimalWidth::W32, 2),
    ColumnType::Oid,
    ColumnType::VarChar,
    ColumnType::VarBinary,
];

fn sample(column_type: ColumnType) -> [HostValue; 2] {
    match column_type {
        ColumnType::Boolean => [HostValue::Boolean(false), HostValue::Boolean(true)],
        ColumnType::TinyInt => [HostValue::TinyInt(-3), HostValue::TinyInt(4)],
        ColumnType::SmallInt => [HostValue::SmallInt(-300), HostValue::SmallInt(400)],
        ColumnType::Int => [HostValue::Int(-30_000), HostValue::Int(40_000)],
        ColumnType::BigInt => [HostValue::BigInt(-1 << 40), HostValue::BigInt(1 << 41)],
        ColumnType::Real => [HostValue::Real(-0.5), HostValue::Real(2.25)],
        ColumnType::Double => [HostValue::Double(-1.5e300), HostValue::Double(3.0)],
        ColumnType::Date => [HostValue::Date(0), HostValue::Date(86_400_000)],
        ColumnType::Time => [HostValue::Time(-1), HostValue::Time(1_000)],
        ColumnType::Timestamp => [
            HostValue::Timestamp(-86_400_001),
            HostValue::Timestamp(1_700_000_000_123),
        ],
        ColumnType::Decimal(_, _) => [
            HostValue::Decimal("-1.25".parse().unwrap()),
            HostValue::Decimal("3.5".parse().unwrap()),
        ],
        ColumnType::Oid => [HostValue::Oid("1@0".into()), HostValue::Oid("2@0".into())],
        ColumnType::VarChar => [HostValue::String("a".into()), HostValue::String("b".into())],
        ColumnType::VarBinary => [HostValue::Blob(vec![1]), HostValue::Blob(vec![1, 0])],
    }
}

#[test]
fn every_type_has_a_rule() {
    let int_rule = rule(ColumnType::Int);
    assert_eq!(int_rule.physical_type, PhysicalType::Int32);
    assert_eq!(int_rule.host_shape, HostShape::Primitive);
    assert_eq!(int_rule.nil, RawValue::Int32(i32::MIN));

    assert_eq!(rule(ColumnType::Oid).nil, RawValue::Oid(1 << 63));
    assert_eq!(rule(ColumnType::Timestamp).host_shape, HostShape::Boxed);
    assert_eq!(
        rule(ColumnType::VarBinary).host_shape,
        HostShape::VariableLength
    );
    assert!(matches!(rule(ColumnType::Double).nil, RawValue::Float64(nil) if nil.is_nan()));
}

#[test]
fn every_type_round_trips_through_the_registry() {
    let storage = MemoryStorage::default();
    for column_type in ALL_TYPES {
        let [low, high] = sample(column_type);
        let values = [Some(low.clone()), None, Some(high.clone())];
        let column = encode_column(&storage, column_type, &values, RoundingPolicy::Exact).unwrap();
        assert_eq!(column.column_type(), column_type);
        assert_eq!(column.len(), 3);
        assert!(column.properties().has_nil, "{column_type}");
        assert!(!column.properties().has_no_nil, "{column_type}");

        for (index, expected) in values.iter().enumerate() {
            assert_eq!(
                &decode_one(&storage, &column, index, &HostValueFactory).unwrap(),
                expected,
                "{column_type} at {index}"
            );
        }
        let mut destination = vec![None; 3];
        decode_range(&storage, &column, 0, &mut destination, &HostValueFactory).unwrap();
        assert_eq!(destination, values, "{column_type}");
    }
    assert_eq!(storage.finalized_count(), ALL_TYPES.len());
}

#[test]
fn every_type_tracks_ascending_input() {
    let storage = MemoryStorage::default();
    for column_type in ALL_TYPES {
        let [low, high] = sample(column_type);
        let column = encode_column(
            &storage,
            column_type,
            &[None, Some(low), Some(high)],
            RoundingPolicy::Exact,
        )
        .unwrap();
        assert!(column.properties().sorted, "{column_type}");
        assert!(!column.properties().reverse_sorted, "{column_type}");
    }
}

#[test]
fn we_can_decode_a_sub_range_without_nil() {
    let storage = MemoryStorage::default();
    let values: Vec<_> = (0..5).map(|value| Some(HostValue::SmallInt(value))).collect();
    let column = encode_column(&storage, ColumnType::SmallInt, &values, RoundingPolicy::Exact)
        .unwrap();
    assert!(column.properties().has_no_nil);
    let mut destination = [None, None];
    decode_range(&storage, &column, 2, &mut destination, &HostValueFactory).unwrap();
    assert_eq!(
        destination,
        [Some(HostValue::SmallInt(2)), Some(HostValue::SmallInt(3))]
    );
}

#[test]
fn we_can_decode_a_window_of_strings_and_blobs() {
    let storage = MemoryStorage::default();
    let strings = [
        Some(HostValue::String("x".into())),
        None,
        Some(HostValue::String("y".into())),
        Some(HostValue::String("x".into())),
    ];
    let column =
        encode_column(&storage, ColumnType::VarChar, &strings, RoundingPolicy::Exact).unwrap();
    let mut destination = [None, None, None];
    decode_range(&storage, &column, 1, &mut destination, &HostValueFactory).unwrap();
    assert_eq!(destination, strings[1..]);

    let blobs = [Some(HostValue::Blob(vec![7])), None, Some(HostValue::Blob(vec![]))];
    let column =
        encode_column(&storage, ColumnType::VarBinary, &blobs, RoundingPolicy::Exact).unwrap();
    let mut destination = [None, None];
    decode_range(&storage, &column, 1, &mut destination, &HostValueFactory).unwrap();
    assert_eq!(destination, blobs[1..]);
}

#[test]
fn we_cannot_encode_host_values_of_the_wrong_kind() {
    let storage = MemoryStorage::default();
    assert_eq!(
        encode_column(
            &storage,
            ColumnType::BigInt,
            &[Some(HostValue::BigInt(1)), Some(HostValue::Int(2))],
            RoundingPolicy::Exact,
        ),
        Err(ConversionError::TypeMismatch {
            expected: ColumnType::BigInt,
            found: "int"
        })
    );
    assert_eq!(
        encode_column(
            &storage,
            ColumnType::VarChar,
            &[Some(HostValue::Blob(vec![]))],
            RoundingPolicy::Exact,
        ),
        Err(ConversionError::TypeMismatch {
            expected: ColumnType::VarChar,
            found: "blob"
        })
    );
    assert_eq!(storage.finalized_count(), 0);
    assert_eq!(storage.pending_count(), 0);
}

#[test]
fn decimals_are_rescaled_with_the_rounding_policy() {
    let storage = MemoryStorage::default();
    let column_type = ColumnType::Decimal(DecimalWidth::W64, 1);
    let values = [Some(HostValue::Decimal("2.45".parse().unwrap()))];
    let column = encode_column(&storage, column_type, &values, RoundingPolicy::HalfEven).unwrap();
    assert_eq!(
        decode_one(&storage, &column, 0, &HostValueFactory).unwrap(),
        Some(HostValue::Decimal("2.4".parse().unwrap()))
    );
    assert!(matches!(
        encode_column(&storage, column_type, &values, RoundingPolicy::Exact),
        Err(ConversionError::MalformedDecimal { .. })
    ));
}

#[test]
fn decoding_decimals_requires_a_resolvable_scale() {
    let storage = MemoryStorage::default();
    let column_type = ColumnType::Decimal(DecimalWidth::W16, 3);
    let column = encode_column(&storage, column_type, &[None], RoundingPolicy::Exact).unwrap();
    let narrow = MemoryStorage::new(MemoryStorageConfig {
        max_decimal_scale: 2,
        ..MemoryStorageConfig::default()
    });
    assert_eq!(
        decode_one(&narrow, &column, 0, &HostValueFactory),
        Err(ConversionError::UnsupportedScale { scale: 3 })
    );
}

/// A factory rendering every value as text, standing in for a foreign host.
struct TextFactory;

impl HostFactory for TextFactory {
    type Object = String;

    fn boolean(&self, value: bool) -> Result<String, ConversionError> {
        Ok(value.to_string())
    }
    fn tinyint(&self, value: i8) -> Result<String, ConversionError> {
        Ok(value.to_string())
    }
    fn smallint(&self, value: i16) -> Result<String, ConversionError> {
        Ok(value.to_string())
    }
    fn int(&self, value: i32) -> Result<String, ConversionError> {
        Ok(value.to_string())
    }
    fn bigint(&self, value: i64) -> Result<String, ConversionError> {
        Ok(value.to_string())
    }
    fn real(&self, value: f32) -> Result<String, ConversionError> {
        Ok(value.to_string())
    }
    fn double(&self, value: f64) -> Result<String, ConversionError> {
        Ok(value.to_string())
    }
    fn date(&self, epoch_millis: i64) -> Result<String, ConversionError> {
        Ok(format!("date {epoch_millis}"))
    }
    fn time(&self, epoch_millis: i64) -> Result<String, ConversionError> {
        Ok(format!("time {epoch_millis}"))
    }
    fn timestamp(&self, epoch_millis: i64) -> Result<String, ConversionError> {
        Ok(format!("timestamp {epoch_millis}"))
    }
    fn decimal(&self, text: &str) -> Result<String, ConversionError> {
        Ok(text.to_string())
    }
    fn string(&self, text: &str) -> Result<String, ConversionError> {
        Ok(text.to_string())
    }
    fn blob(&self, bytes: &[u8]) -> Result<String, ConversionError> {
        Ok(format!("{bytes:?}"))
    }
    fn oid(&self, text: &str) -> Result<String, ConversionError> {
        Ok(text.to_string())
    }
}

#[test]
fn we_can_decode_through_a_custom_factory() {
    let storage = MemoryStorage::default();
    let decimals = encode_column(
        &storage,
        ColumnType::Decimal(DecimalWidth::W32, 3),
        &[Some(HostValue::Decimal(BigDecimal::from(7)))],
        RoundingPolicy::Exact,
    )
    .unwrap();
    assert_eq!(
        decode_one(&storage, &decimals, 0, &TextFactory).unwrap(),
        Some("7.000".to_string())
    );

    let dates = encode_column(
        &storage,
        ColumnType::Date,
        &[Some(HostValue::Date(86_400_000))],
        RoundingPolicy::Exact,
    )
    .unwrap();
    assert_eq!(
        decode_one(&storage, &dates, 0, &TextFactory).unwrap(),
        Some("date 86400000".to_string())
    );
}
