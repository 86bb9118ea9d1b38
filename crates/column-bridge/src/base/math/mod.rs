//! This module defines the fixed-point decimal utilities used by the decimal codec.
/// Conversions between fixed-point integers, decimal text and [`bigdecimal::BigDecimal`].
pub mod decimal;

mod decimal_error;
pub use decimal_error::{DecimalError, DecimalResult};
