use crate::base::{
    database::{ColumnType, StorageError},
    math::DecimalError,
};
use alloc::string::{String, ToString};
use snafu::Snafu;

/// Errors from converting values between columns and host representations.
#[derive(Snafu, Debug, PartialEq, Eq)]
pub enum ConversionError {
    /// The storage could not allocate a column or heap entry.
    #[snafu(display("Out of memory allocating {requested} elements"))]
    OutOfMemory {
        /// Size of the failed allocation
        requested: usize,
    },

    /// Host decimal text could not be turned into a fixed-point value.
    #[snafu(display("Malformed decimal {text:?}: {reason}"))]
    MalformedDecimal {
        /// The offending decimal text
        text: String,
        /// Why it was rejected
        reason: String,
    },

    /// Identifier text is not of the form `<digits>@0`.
    #[snafu(display("Malformed identifier {text:?}"))]
    MalformedIdentifier {
        /// The offending identifier text
        text: String,
    },

    /// The storage has no decimal type with this scale.
    #[snafu(display("Unsupported decimal scale {scale}"))]
    UnsupportedScale {
        /// The unresolved scale
        scale: u8,
    },

    /// A host value of the wrong kind was handed to a column of another type.
    #[snafu(display("Expected a value for a {expected} column but found {found}"))]
    TypeMismatch {
        /// The column type being converted
        expected: ColumnType,
        /// The kind of value found instead
        found: &'static str,
    },

    /// An epoch offset does not fit the packed temporal layout.
    #[snafu(display("Epoch offset {epoch_millis} ms cannot be stored"))]
    TemporalOutOfRange {
        /// The offending epoch offset
        epoch_millis: i64,
    },

    /// Some heap appends failed while encoding a variable-length column.
    ///
    /// The column under construction has been discarded.
    #[snafu(display("{failed} heap appends failed, the first at row {first}"))]
    AbortedAppends {
        /// Number of rows that could not be appended
        failed: usize,
        /// Index of the first failing row
        first: usize,
    },

    /// Any other storage failure.
    #[snafu(display("Storage error: {source}"))]
    Storage {
        /// The underlying error
        source: StorageError,
    },
}

/// Result type for conversions.
pub type ConversionResult<T> = Result<T, ConversionError>;

impl From<StorageError> for ConversionError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::OutOfMemory { requested }
            | StorageError::HeapExhausted { requested, .. } => {
                ConversionError::OutOfMemory { requested }
            }
            source => ConversionError::Storage { source },
        }
    }
}

impl ConversionError {
    pub(crate) fn malformed_decimal(text: impl Into<String>, error: &DecimalError) -> Self {
        ConversionError::MalformedDecimal {
            text: text.into(),
            reason: error.to_string(),
        }
    }
}

impl From<ConversionError> for String {
    fn from(error: ConversionError) -> Self {
        error.to_string()
    }
}
