use alloc::string::String;
use snafu::Snafu;

/// Errors related to decimal operations.
#[derive(Snafu, Debug, PartialEq, Eq)]
pub enum DecimalError {
    /// The text is not a plain decimal number, e.g. "notanumber",
    /// "-21.233.122" or "1e5"
    #[snafu(display("Invalid decimal {text:?}: {reason}"))]
    InvalidDecimal {
        /// The offending text
        text: String,
        /// What is wrong with it
        reason: &'static str,
    },

    /// The scale cannot be represented by a 128-bit power of ten.
    #[snafu(display("Decimal scale is not valid: {scale}"))]
    InvalidScale {
        /// The invalid scale value
        scale: u8,
    },

    /// Rescaling would drop non-zero digits under the exact rounding policy.
    #[snafu(display("Unsupported operation: cannot round decimal: {error}"))]
    RoundingError {
        /// The value that could not be rescaled
        error: String,
    },

    /// The fixed-point value does not fit the target integer width.
    #[snafu(display("Decimal value out of range for the target width"))]
    OutOfRange,
}

/// Result type for decimal operations.
pub type DecimalResult<T> = Result<T, DecimalError>;
