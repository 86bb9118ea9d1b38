use super::{
    batch::{decode_one_with, decode_range_with, encode_fixed_with},
    nil::NilSentinel,
    ConversionError, ConversionResult,
};
use crate::base::database::{Column, ColumnStorage, ColumnType};
use alloc::string::ToString;
use arrayvec::ArrayString;
use core::fmt::Write;

/// Largest identifier text, in bytes, the codec formats or accepts.
pub const OID_TEXT_CAPACITY: usize = 64;

/// Formatted identifier text.
pub type OidText = ArrayString<OID_TEXT_CAPACITY>;

const OID_SUFFIX: &str = "@0";

pub(crate) fn format_oid(raw: u64) -> OidText {
    let mut text = OidText::new();
    // at most 20 digits and the suffix
    let _ = write!(text, "{raw}{OID_SUFFIX}");
    text
}

/// Formats a stored identifier as `<digits>@0`, `None` for nil.
#[must_use]
pub fn decode_oid(raw: u64) -> Option<OidText> {
    (!raw.is_nil()).then(|| format_oid(raw))
}

/// Parses identifier text of the exact form `<digits>@0`.
///
/// Anything else, including text longer than [`OID_TEXT_CAPACITY`] and values
/// at or above the nil sentinel, is a `MalformedIdentifier`.
pub fn encode_oid(text: &str) -> ConversionResult<u64> {
    let malformed = || ConversionError::MalformedIdentifier {
        text: text.to_string(),
    };
    let bounded = OidText::from(text).map_err(|_| malformed())?;
    let digits = bounded.strip_suffix(OID_SUFFIX).ok_or_else(malformed)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }
    digits
        .parse::<u64>()
        .ok()
        .filter(|&value| value < u64::NIL)
        .ok_or_else(malformed)
}

/// Formats the identifier at `index`.
///
/// # Panics
/// Panics if `index` is out of bounds.
pub fn decode_oid_at(column: &Column, index: usize) -> ConversionResult<Option<OidText>> {
    decode_one_with(column, index, |raw: u64| Ok(format_oid(raw)))
}

/// Formats `destination.len()` identifiers starting at `first`.
///
/// # Panics
/// Panics if the range is out of bounds.
#[tracing::instrument(name = "oid::decode_oid_range", level = "debug", skip_all)]
pub fn decode_oid_range(
    column: &Column,
    first: usize,
    destination: &mut [Option<OidText>],
) -> ConversionResult<()> {
    decode_range_with(column, first, destination, |raw: u64| Ok(format_oid(raw)))
}

/// Builds an identifier column from identifier text.
#[tracing::instrument(name = "oid::encode_oid_column", level = "debug", skip_all)]
pub fn encode_oid_column<S, V>(storage: &S, values: &[Option<V>]) -> ConversionResult<Column>
where
    S: ColumnStorage + ?Sized,
    V: AsRef<str>,
{
    encode_fixed_with(storage, ColumnType::Oid, values, |text| {
        encode_oid(text.as_ref())
    })
}
