use super::{ConversionError, ConversionResult};
use alloc::{
    string::{String, ToString},
    vec::Vec,
};
use bigdecimal::BigDecimal;
use core::str::FromStr;

/// Builds host objects out of decoded column values.
///
/// The converters never construct host objects themselves; a binding supplies
/// one implementation of this trait and gets back its own object type from
/// every decoder.
pub trait HostFactory {
    /// The host object type produced for every logical type.
    type Object;

    /// A boolean.
    fn boolean(&self, value: bool) -> ConversionResult<Self::Object>;
    /// A tinyint.
    fn tinyint(&self, value: i8) -> ConversionResult<Self::Object>;
    /// A smallint.
    fn smallint(&self, value: i16) -> ConversionResult<Self::Object>;
    /// An int.
    fn int(&self, value: i32) -> ConversionResult<Self::Object>;
    /// A bigint.
    fn bigint(&self, value: i64) -> ConversionResult<Self::Object>;
    /// A real.
    fn real(&self, value: f32) -> ConversionResult<Self::Object>;
    /// A double.
    fn double(&self, value: f64) -> ConversionResult<Self::Object>;
    /// A date, as milliseconds since the epoch.
    fn date(&self, epoch_millis: i64) -> ConversionResult<Self::Object>;
    /// A time, as milliseconds since the epoch.
    fn time(&self, epoch_millis: i64) -> ConversionResult<Self::Object>;
    /// A timestamp, as milliseconds since the epoch.
    fn timestamp(&self, epoch_millis: i64) -> ConversionResult<Self::Object>;
    /// A decimal, as plain decimal text.
    fn decimal(&self, text: &str) -> ConversionResult<Self::Object>;
    /// A string.
    fn string(&self, text: &str) -> ConversionResult<Self::Object>;
    /// A blob.
    fn blob(&self, bytes: &[u8]) -> ConversionResult<Self::Object>;
    /// An identifier, as `<digits>@0` text.
    fn oid(&self, text: &str) -> ConversionResult<Self::Object>;
}

/// A host value of one of the supported logical types.
#[derive(Debug, Clone, PartialEq)]
pub enum HostValue {
    /// Boolean value
    Boolean(bool),
    /// i8 value
    TinyInt(i8),
    /// i16 value
    SmallInt(i16),
    /// i32 value
    Int(i32),
    /// i64 value
    BigInt(i64),
    /// f32 value
    Real(f32),
    /// f64 value
    Double(f64),
    /// Date as epoch milliseconds
    Date(i64),
    /// Time as epoch milliseconds
    Time(i64),
    /// Timestamp as epoch milliseconds
    Timestamp(i64),
    /// Arbitrary precision decimal
    Decimal(BigDecimal),
    /// UTF-8 text
    String(String),
    /// Raw bytes
    Blob(Vec<u8>),
    /// Identifier text
    Oid(String),
}

impl HostValue {
    /// A short name of the value's kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            HostValue::Boolean(_) => "boolean",
            HostValue::TinyInt(_) => "tinyint",
            HostValue::SmallInt(_) => "smallint",
            HostValue::Int(_) => "int",
            HostValue::BigInt(_) => "bigint",
            HostValue::Real(_) => "real",
            HostValue::Double(_) => "double",
            HostValue::Date(_) => "date",
            HostValue::Time(_) => "time",
            HostValue::Timestamp(_) => "timestamp",
            HostValue::Decimal(_) => "decimal",
            HostValue::String(_) => "string",
            HostValue::Blob(_) => "blob",
            HostValue::Oid(_) => "oid",
        }
    }
}

/// A [`HostFactory`] producing [`HostValue`]s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostValueFactory;

impl HostFactory for HostValueFactory {
    type Object = HostValue;

    fn boolean(&self, value: bool) -> ConversionResult<HostValue> {
        Ok(HostValue::Boolean(value))
    }
    fn tinyint(&self, value: i8) -> ConversionResult<HostValue> {
        Ok(HostValue::TinyInt(value))
    }
    fn smallint(&self, value: i16) -> ConversionResult<HostValue> {
        Ok(HostValue::SmallInt(value))
    }
    fn int(&self, value: i32) -> ConversionResult<HostValue> {
        Ok(HostValue::Int(value))
    }
    fn bigint(&self, value: i64) -> ConversionResult<HostValue> {
        Ok(HostValue::BigInt(value))
    }
    fn real(&self, value: f32) -> ConversionResult<HostValue> {
        Ok(HostValue::Real(value))
    }
    fn double(&self, value: f64) -> ConversionResult<HostValue> {
        Ok(HostValue::Double(value))
    }
    fn date(&self, epoch_millis: i64) -> ConversionResult<HostValue> {
        Ok(HostValue::Date(epoch_millis))
    }
    fn time(&self, epoch_millis: i64) -> ConversionResult<HostValue> {
        Ok(HostValue::Time(epoch_millis))
    }
    fn timestamp(&self, epoch_millis: i64) -> ConversionResult<HostValue> {
        Ok(HostValue::Timestamp(epoch_millis))
    }
    fn decimal(&self, text: &str) -> ConversionResult<HostValue> {
        BigDecimal::from_str(text)
            .map(HostValue::Decimal)
            .map_err(|error| ConversionError::MalformedDecimal {
                text: text.to_string(),
                reason: error.to_string(),
            })
    }
    fn string(&self, text: &str) -> ConversionResult<HostValue> {
        Ok(HostValue::String(text.to_string()))
    }
    fn blob(&self, bytes: &[u8]) -> ConversionResult<HostValue> {
        Ok(HostValue::Blob(bytes.to_vec()))
    }
    fn oid(&self, text: &str) -> ConversionResult<HostValue> {
        Ok(HostValue::Oid(text.to_string()))
    }
}
