use super::{
    batch::{decode_one_with, decode_range_with, encode_fixed_with},
    nil::NilSentinel,
    ConversionError, ConversionResult,
};
use crate::base::{
    database::{
        Column, ColumnStorage, ColumnType, DecimalDescriptor, DecimalWidth, FixedWidthPhysical,
    },
    math::{
        decimal::{decimal_to_text, fixed_point_to_text, text_to_fixed_point, RoundingPolicy},
        DecimalError,
    },
};
use alloc::string::{String, ToString};
use bigdecimal::BigDecimal;

/// Integer widths a fixed-point decimal can be stored in.
pub trait DecimalStorage: FixedWidthPhysical + NilSentinel + Into<i64> + TryFrom<i64> {}

impl DecimalStorage for i8 {}
impl DecimalStorage for i16 {}
impl DecimalStorage for i32 {}
impl DecimalStorage for i64 {}

fn resolve<S: ColumnStorage + ?Sized>(
    storage: &S,
    scale: u8,
) -> ConversionResult<DecimalDescriptor> {
    storage
        .resolve_decimal_descriptor(scale)
        .ok_or(ConversionError::UnsupportedScale { scale })
}

pub(crate) fn render<T: DecimalStorage>(scale: u8) -> impl Fn(T) -> ConversionResult<String> {
    move |raw| Ok(fixed_point_to_text(raw.into(), scale))
}

/// Renders a stored fixed-point value as decimal text, `None` for nil.
///
/// Fails with `UnsupportedScale` if the storage cannot resolve `scale`, even
/// for nil values.
pub fn decode_decimal<S, T>(storage: &S, raw: T, scale: u8) -> ConversionResult<Option<String>>
where
    S: ColumnStorage + ?Sized,
    T: DecimalStorage,
{
    let descriptor = resolve(storage, scale)?;
    Ok((!raw.is_nil()).then(|| fixed_point_to_text(raw.into(), descriptor.scale)))
}

/// Rescales a host decimal under `policy` and stores it as a fixed-point value.
///
/// Values that do not fit the storage width, or that would collide with the nil
/// sentinel, are rejected as malformed.
pub fn encode_decimal<T: DecimalStorage>(
    value: &BigDecimal,
    scale: u8,
    policy: RoundingPolicy,
) -> ConversionResult<T> {
    let text = decimal_to_text(value, scale, policy)
        .map_err(|error| ConversionError::malformed_decimal(value.to_string(), &error))?;
    let wide = text_to_fixed_point(&text, scale)
        .map_err(|error| ConversionError::malformed_decimal(text.as_str(), &error))?;
    T::try_from(wide)
        .ok()
        .filter(|raw| !raw.is_nil())
        .ok_or_else(|| ConversionError::malformed_decimal(text, &DecimalError::OutOfRange))
}

/// Decodes the decimal at `index` as text.
///
/// # Panics
/// Panics if `index` is out of bounds.
pub fn decode_decimal_at<S: ColumnStorage + ?Sized>(
    storage: &S,
    column: &Column,
    index: usize,
) -> ConversionResult<Option<String>> {
    let (width, scale) = resolve_decimal(storage, column.column_type())?;
    match width {
        DecimalWidth::W8 => decode_one_with(column, index, render::<i8>(scale)),
        DecimalWidth::W16 => decode_one_with(column, index, render::<i16>(scale)),
        DecimalWidth::W32 => decode_one_with(column, index, render::<i32>(scale)),
        DecimalWidth::W64 => decode_one_with(column, index, render::<i64>(scale)),
    }
}

/// Decodes `destination.len()` decimals starting at `first` as text.
///
/// # Panics
/// Panics if the range is out of bounds.
#[tracing::instrument(name = "decimal::decode_decimal_range", level = "debug", skip_all)]
pub fn decode_decimal_range<S: ColumnStorage + ?Sized>(
    storage: &S,
    column: &Column,
    first: usize,
    destination: &mut [Option<String>],
) -> ConversionResult<()> {
    let (width, scale) = resolve_decimal(storage, column.column_type())?;
    match width {
        DecimalWidth::W8 => decode_range_with(column, first, destination, render::<i8>(scale)),
        DecimalWidth::W16 => decode_range_with(column, first, destination, render::<i16>(scale)),
        DecimalWidth::W32 => decode_range_with(column, first, destination, render::<i32>(scale)),
        DecimalWidth::W64 => decode_range_with(column, first, destination, render::<i64>(scale)),
    }
}

/// Builds a decimal column from host decimals.
#[tracing::instrument(name = "decimal::encode_decimal_column", level = "debug", skip_all)]
pub fn encode_decimal_column<S: ColumnStorage + ?Sized>(
    storage: &S,
    column_type: ColumnType,
    values: &[Option<BigDecimal>],
    policy: RoundingPolicy,
) -> ConversionResult<Column> {
    let (width, scale) = resolve_decimal(storage, column_type)?;
    match width {
        DecimalWidth::W8 => encode_fixed_with(storage, column_type, values, |value| {
            encode_decimal::<i8>(value, scale, policy)
        }),
        DecimalWidth::W16 => encode_fixed_with(storage, column_type, values, |value| {
            encode_decimal::<i16>(value, scale, policy)
        }),
        DecimalWidth::W32 => encode_fixed_with(storage, column_type, values, |value| {
            encode_decimal::<i32>(value, scale, policy)
        }),
        DecimalWidth::W64 => encode_fixed_with(storage, column_type, values, |value| {
            encode_decimal::<i64>(value, scale, policy)
        }),
    }
}

/// The width and resolved scale of a decimal column type.
pub(crate) fn resolve_decimal<S: ColumnStorage + ?Sized>(
    storage: &S,
    column_type: ColumnType,
) -> ConversionResult<(DecimalWidth, u8)> {
    match column_type {
        ColumnType::Decimal(width, scale) => Ok((width, resolve(storage, scale)?.scale)),
        other => Err(ConversionError::TypeMismatch {
            expected: other,
            found: "decimal",
        }),
    }
}
