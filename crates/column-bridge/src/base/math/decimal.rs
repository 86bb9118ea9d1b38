use super::{DecimalError, DecimalResult};
use alloc::{
    string::{String, ToString},
    vec::Vec,
};
use bigdecimal::{num_bigint::Sign, BigDecimal, RoundingMode};
use serde::{Deserialize, Serialize};

/// The largest scale whose power of ten fits in an `i128`.
const MAX_SCALE: u8 = 38;

/// How a host decimal is brought to the scale of the target column.
///
/// Mirrors the rounding modes of an arbitrary-precision host decimal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RoundingPolicy {
    /// Away from zero
    Up,
    /// Towards zero
    Down,
    /// Towards positive infinity
    Ceiling,
    /// Towards negative infinity
    Floor,
    /// Nearest neighbor, ties away from zero
    HalfUp,
    /// Nearest neighbor, ties towards zero
    HalfDown,
    /// Nearest neighbor, ties to the even neighbor
    HalfEven,
    /// No rounding allowed; rescaling must be lossless
    #[default]
    Exact,
}

impl RoundingPolicy {
    /// The matching [`RoundingMode`], or `None` for [`RoundingPolicy::Exact`].
    #[must_use]
    pub fn rounding_mode(self) -> Option<RoundingMode> {
        match self {
            RoundingPolicy::Up => Some(RoundingMode::Up),
            RoundingPolicy::Down => Some(RoundingMode::Down),
            RoundingPolicy::Ceiling => Some(RoundingMode::Ceiling),
            RoundingPolicy::Floor => Some(RoundingMode::Floor),
            RoundingPolicy::HalfUp => Some(RoundingMode::HalfUp),
            RoundingPolicy::HalfDown => Some(RoundingMode::HalfDown),
            RoundingPolicy::HalfEven => Some(RoundingMode::HalfEven),
            RoundingPolicy::Exact => None,
        }
    }
}

/// Places the decimal point `scale` digits from the right of `digits`.
///
/// `digits` is the magnitude in base ten without a sign. A zero magnitude is
/// never rendered with a minus sign.
#[must_use]
pub fn render_fixed_point(negative: bool, digits: &str, scale: u8) -> String {
    let digits = digits.trim_start_matches('0');
    let scale = usize::from(scale);
    let mut text = String::with_capacity(digits.len().max(scale + 1) + 2);
    if negative && !digits.is_empty() {
        text.push('-');
    }
    let padding = (scale + 1).saturating_sub(digits.len());
    let mut padded = Vec::with_capacity(padding + digits.len());
    padded.resize(padding, b'0');
    padded.extend_from_slice(digits.as_bytes());
    let (integer, fraction) = padded.split_at(padded.len() - scale);
    text.extend(integer.iter().map(|&digit| char::from(digit)));
    if scale > 0 {
        text.push('.');
        text.extend(fraction.iter().map(|&digit| char::from(digit)));
    }
    text
}

/// Renders a fixed-point integer with `scale` fractional digits as decimal text.
///
/// ```
/// use column_bridge::base::math::decimal::fixed_point_to_text;
/// assert_eq!(fixed_point_to_text(-12345, 2), "-123.45");
/// assert_eq!(fixed_point_to_text(5, 3), "0.005");
/// ```
#[must_use]
pub fn fixed_point_to_text(value: i64, scale: u8) -> String {
    render_fixed_point(value < 0, &value.unsigned_abs().to_string(), scale)
}

/// Parses plain decimal text into a fixed-point integer with `scale` fractional digits.
///
/// Accepts an optional sign, digits and at most one decimal point. Text with
/// more fractional digits than `scale` is rejected rather than rounded.
pub fn text_to_fixed_point(text: &str, scale: u8) -> DecimalResult<i64> {
    let invalid = |reason| DecimalError::InvalidDecimal {
        text: text.to_string(),
        reason,
    };
    if scale > MAX_SCALE {
        return Err(DecimalError::InvalidScale { scale });
    }
    let (negative, unsigned) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let (integer, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    if integer.is_empty() && fraction.is_empty() {
        return Err(invalid("no digits"));
    }
    if !integer.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(invalid("unexpected character"));
    }
    if fraction.len() > usize::from(scale) {
        return Err(invalid("more fractional digits than the scale allows"));
    }
    let padding = usize::from(scale) - fraction.len();
    let magnitude = integer
        .bytes()
        .chain(fraction.bytes())
        .map(|digit| i128::from(digit - b'0'))
        .chain(core::iter::repeat(0).take(padding))
        .try_fold(0_i128, |acc, digit| acc.checked_mul(10)?.checked_add(digit))
        .ok_or(DecimalError::OutOfRange)?;
    let value = if negative { -magnitude } else { magnitude };
    i64::try_from(value).map_err(|_| DecimalError::OutOfRange)
}

/// Brings `value` to exactly `scale` fractional digits under `policy`.
pub fn rescale(value: &BigDecimal, scale: u8, policy: RoundingPolicy) -> DecimalResult<BigDecimal> {
    let new_scale = i64::from(scale);
    match policy.rounding_mode() {
        Some(mode) => Ok(value.with_scale_round(new_scale, mode)),
        None => {
            let rescaled = value.with_scale(new_scale);
            if &rescaled == value {
                Ok(rescaled)
            } else {
                Err(DecimalError::RoundingError {
                    error: value.to_string(),
                })
            }
        }
    }
}

/// Rescales a host decimal and renders it as plain text with `scale` fractional digits.
///
/// The text never uses exponent notation, so it always parses back through
/// [`text_to_fixed_point`].
pub fn decimal_to_text(
    value: &BigDecimal,
    scale: u8,
    policy: RoundingPolicy,
) -> DecimalResult<String> {
    let rescaled = rescale(value, scale, policy)?;
    let (unscaled, _) = rescaled.as_bigint_and_exponent();
    Ok(render_fixed_point(
        unscaled.sign() == Sign::Minus,
        &unscaled.magnitude().to_string(),
        scale,
    ))
}
