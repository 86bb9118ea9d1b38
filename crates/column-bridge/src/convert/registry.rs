//! The per-type conversion table.
//!
//! Every logical type maps to one storage layout, one host shape and one nil
//! sentinel. [`decode_one`], [`decode_range`] and [`encode_column`] dispatch on
//! the column type and hand each arm to the shared generic codecs.
use super::{
    batch::{decode_one_with, decode_range_with, encode_fixed_with},
    decimal::{decode_decimal_at, encode_decimal, render, resolve_decimal, DecimalStorage},
    host::{HostFactory, HostValue},
    nil::{null_sentinel, RawValue},
    oid::{decode_oid_at, encode_oid, format_oid},
    scalar::{decode_boolean, encode_boolean},
    temporal::{decode_temporal, encode_date, encode_time, encode_timestamp},
    varlen::{
        decode_blob, decode_string, encode_blob_column, encode_string_column, heap_of, read_blob,
        read_string,
    },
    ConversionError, ConversionResult,
};
use crate::base::{
    database::{Column, ColumnStorage, ColumnType, DecimalWidth, HostShape, PhysicalType},
    math::decimal::RoundingPolicy,
    time::{
        date_to_epoch_millis, daytime_to_epoch_millis, timestamp_to_epoch_millis, PackedDate,
        PackedTimestamp,
    },
};
use alloc::vec::Vec;

/// How one logical type is stored and handed to the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypeRule {
    /// The logical type
    pub column_type: ColumnType,
    /// The storage layout
    pub physical_type: PhysicalType,
    /// The host representation
    pub host_shape: HostShape,
    /// The value stored for an absent entry
    pub nil: RawValue<'static>,
}

/// Looks up the conversion rule of `column_type`.
#[must_use]
pub fn rule(column_type: ColumnType) -> TypeRule {
    TypeRule {
        column_type,
        physical_type: column_type.physical_type(),
        host_shape: column_type.host_shape(),
        nil: null_sentinel(column_type),
    }
}

fn mismatch(expected: ColumnType, found: &HostValue) -> ConversionError {
    ConversionError::TypeMismatch {
        expected,
        found: found.kind(),
    }
}

/// Decodes the value at `index` into a host object, `None` if it is absent.
///
/// # Panics
/// Panics if `index` is out of bounds.
pub fn decode_one<S, F>(
    storage: &S,
    column: &Column,
    index: usize,
    factory: &F,
) -> ConversionResult<Option<F::Object>>
where
    S: ColumnStorage + ?Sized,
    F: HostFactory,
{
    match column.column_type() {
        ColumnType::Boolean => {
            decode_one_with(column, index, |raw: i8| factory.boolean(decode_boolean(raw)))
        }
        ColumnType::TinyInt => decode_one_with(column, index, |raw: i8| factory.tinyint(raw)),
        ColumnType::SmallInt => decode_one_with(column, index, |raw: i16| factory.smallint(raw)),
        ColumnType::Int => decode_one_with(column, index, |raw: i32| factory.int(raw)),
        ColumnType::BigInt => decode_one_with(column, index, |raw: i64| factory.bigint(raw)),
        ColumnType::Real => decode_one_with(column, index, |raw: f32| factory.real(raw)),
        ColumnType::Double => decode_one_with(column, index, |raw: f64| factory.double(raw)),
        ColumnType::Date => decode_temporal(column, index)?
            .map(|millis| factory.date(millis))
            .transpose(),
        ColumnType::Time => decode_temporal(column, index)?
            .map(|millis| factory.time(millis))
            .transpose(),
        ColumnType::Timestamp => decode_temporal(column, index)?
            .map(|millis| factory.timestamp(millis))
            .transpose(),
        ColumnType::Decimal(_, _) => decode_decimal_at(storage, column, index)?
            .map(|text| factory.decimal(&text))
            .transpose(),
        ColumnType::Oid => decode_oid_at(column, index)?
            .map(|text| factory.oid(&text))
            .transpose(),
        ColumnType::VarChar => decode_string(column, index)?
            .map(|text| factory.string(text))
            .transpose(),
        ColumnType::VarBinary => decode_blob(column, index)?
            .map(|bytes| factory.blob(bytes))
            .transpose(),
    }
}

fn decode_decimal_range_as<T, F>(
    column: &Column,
    first: usize,
    destination: &mut [Option<F::Object>],
    scale: u8,
    factory: &F,
) -> ConversionResult<()>
where
    T: DecimalStorage,
    F: HostFactory,
{
    let render = render::<T>(scale);
    decode_range_with(column, first, destination, |raw: T| {
        factory.decimal(&render(raw)?)
    })
}

/// Decodes `destination.len()` values starting at `first` into host objects.
///
/// Fixed-width columns known to hold no nil skip the per-value nil check.
///
/// # Panics
/// Panics if the range is out of bounds.
#[tracing::instrument(name = "registry::decode_range", level = "debug", skip_all)]
pub fn decode_range<S, F>(
    storage: &S,
    column: &Column,
    first: usize,
    destination: &mut [Option<F::Object>],
    factory: &F,
) -> ConversionResult<()>
where
    S: ColumnStorage + ?Sized,
    F: HostFactory,
{
    match column.column_type() {
        ColumnType::Boolean => decode_range_with(column, first, destination, |raw: i8| {
            factory.boolean(decode_boolean(raw))
        }),
        ColumnType::TinyInt => {
            decode_range_with(column, first, destination, |raw: i8| factory.tinyint(raw))
        }
        ColumnType::SmallInt => {
            decode_range_with(column, first, destination, |raw: i16| factory.smallint(raw))
        }
        ColumnType::Int => {
            decode_range_with(column, first, destination, |raw: i32| factory.int(raw))
        }
        ColumnType::BigInt => {
            decode_range_with(column, first, destination, |raw: i64| factory.bigint(raw))
        }
        ColumnType::Real => {
            decode_range_with(column, first, destination, |raw: f32| factory.real(raw))
        }
        ColumnType::Double => {
            decode_range_with(column, first, destination, |raw: f64| factory.double(raw))
        }
        ColumnType::Date => decode_range_with(column, first, destination, |raw: i32| {
            factory.date(date_to_epoch_millis(PackedDate::from_raw(raw)))
        }),
        ColumnType::Time => decode_range_with(column, first, destination, |raw: i64| {
            factory.time(daytime_to_epoch_millis(raw))
        }),
        ColumnType::Timestamp => decode_range_with(column, first, destination, |raw: i64| {
            factory.timestamp(timestamp_to_epoch_millis(PackedTimestamp::from_raw(raw)))
        }),
        ColumnType::Decimal(_, _) => {
            let (width, scale) = resolve_decimal(storage, column.column_type())?;
            match width {
                DecimalWidth::W8 => {
                    decode_decimal_range_as::<i8, F>(column, first, destination, scale, factory)
                }
                DecimalWidth::W16 => {
                    decode_decimal_range_as::<i16, F>(column, first, destination, scale, factory)
                }
                DecimalWidth::W32 => {
                    decode_decimal_range_as::<i32, F>(column, first, destination, scale, factory)
                }
                DecimalWidth::W64 => {
                    decode_decimal_range_as::<i64, F>(column, first, destination, scale, factory)
                }
            }
        }
        ColumnType::Oid => decode_range_with(column, first, destination, |raw: u64| {
            factory.oid(&format_oid(raw))
        }),
        ColumnType::VarChar => {
            let (offsets, heap) = heap_of(column, ColumnType::VarChar)?;
            let offsets = &offsets[first..first + destination.len()];
            for (slot, &offset) in destination.iter_mut().zip(offsets) {
                *slot = read_string(heap, offset)?
                    .map(|text| factory.string(text))
                    .transpose()?;
            }
            Ok(())
        }
        ColumnType::VarBinary => {
            let (offsets, heap) = heap_of(column, ColumnType::VarBinary)?;
            let offsets = &offsets[first..first + destination.len()];
            for (slot, &offset) in destination.iter_mut().zip(offsets) {
                *slot = read_blob(heap, offset)?
                    .map(|bytes| factory.blob(bytes))
                    .transpose()?;
            }
            Ok(())
        }
    }
}

/// Encodes host values of one variant into a fixed-width column.
macro_rules! encode_variant {
    ($storage:expr, $column_type:expr, $values:expr, $variant:ident($value:ident) => $convert:expr) => {
        encode_fixed_with($storage, $column_type, $values, |host| match host {
            HostValue::$variant($value) => $convert,
            other => Err(mismatch($column_type, other)),
        })
    };
}

/// Builds a column of `column_type` from optional host values.
///
/// Every present value must be the [`HostValue`] variant matching the column
/// type. Decimals are rescaled under `policy`; the other types ignore it.
#[tracing::instrument(name = "registry::encode_column", level = "debug", skip_all)]
pub fn encode_column<S: ColumnStorage + ?Sized>(
    storage: &S,
    column_type: ColumnType,
    values: &[Option<HostValue>],
    policy: RoundingPolicy,
) -> ConversionResult<Column> {
    match column_type {
        ColumnType::Boolean => {
            encode_variant!(storage, column_type, values, Boolean(value) => Ok(encode_boolean(*value)))
        }
        ColumnType::TinyInt => {
            encode_variant!(storage, column_type, values, TinyInt(value) => Ok(*value))
        }
        ColumnType::SmallInt => {
            encode_variant!(storage, column_type, values, SmallInt(value) => Ok(*value))
        }
        ColumnType::Int => {
            encode_variant!(storage, column_type, values, Int(value) => Ok(*value))
        }
        ColumnType::BigInt => {
            encode_variant!(storage, column_type, values, BigInt(value) => Ok(*value))
        }
        ColumnType::Real => {
            encode_variant!(storage, column_type, values, Real(value) => Ok(*value))
        }
        ColumnType::Double => {
            encode_variant!(storage, column_type, values, Double(value) => Ok(*value))
        }
        ColumnType::Date => {
            encode_variant!(storage, column_type, values, Date(millis) => encode_date(*millis))
        }
        ColumnType::Time => {
            encode_variant!(storage, column_type, values, Time(millis) => encode_time(*millis))
        }
        ColumnType::Timestamp => encode_variant!(
            storage, column_type, values, Timestamp(millis) => encode_timestamp(*millis)
        ),
        ColumnType::Decimal(_, _) => {
            let (width, scale) = resolve_decimal(storage, column_type)?;
            match width {
                DecimalWidth::W8 => encode_variant!(
                    storage, column_type, values, Decimal(value) => encode_decimal::<i8>(value, scale, policy)
                ),
                DecimalWidth::W16 => encode_variant!(
                    storage, column_type, values, Decimal(value) => encode_decimal::<i16>(value, scale, policy)
                ),
                DecimalWidth::W32 => encode_variant!(
                    storage, column_type, values, Decimal(value) => encode_decimal::<i32>(value, scale, policy)
                ),
                DecimalWidth::W64 => encode_variant!(
                    storage, column_type, values, Decimal(value) => encode_decimal::<i64>(value, scale, policy)
                ),
            }
        }
        ColumnType::Oid => encode_variant!(storage, column_type, values, Oid(text) => encode_oid(text)),
        ColumnType::VarChar => {
            let strings = values
                .iter()
                .map(|value| {
                    value
                        .as_ref()
                        .map(|host| match host {
                            HostValue::String(text) => Ok(text.as_str()),
                            other => Err(mismatch(column_type, other)),
                        })
                        .transpose()
                })
                .collect::<ConversionResult<Vec<_>>>()?;
            encode_string_column(storage, &strings)
        }
        ColumnType::VarBinary => {
            let blobs = values
                .iter()
                .map(|value| {
                    value
                        .as_ref()
                        .map(|host| match host {
                            HostValue::Blob(bytes) => Ok(bytes.as_slice()),
                            other => Err(mismatch(column_type, other)),
                        })
                        .transpose()
                })
                .collect::<ConversionResult<Vec<_>>>()?;
            encode_blob_column(storage, &blobs)
        }
    }
}
