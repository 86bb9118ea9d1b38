use super::{TimeError, TimeResult};

/// Milliseconds in a day.
pub const MILLIS_PER_DAY: i64 = 86_400_000;
/// Milliseconds in the fixed 365.25 day year.
pub const MILLIS_PER_YEAR: i64 = 31_557_600_000;
/// Offset between the storage day boundary and UTC midnight.
pub const HOUR_OFFSET_MILLIS: i64 = 3_600_000;
/// The year epoch offsets are counted from.
pub const EPOCH_YEAR: i64 = 1970;

const DAY_OF_YEAR_BITS: u32 = 9;
const DAY_OF_YEAR_MASK: i32 = (1 << DAY_OF_YEAR_BITS) - 1;
const MAX_DATE_YEAR: i64 = (1 << (32 - DAY_OF_YEAR_BITS - 1)) - 1;
const DAYTIME_BITS: u32 = 37;
const DAYTIME_MASK: i64 = (1 << DAYTIME_BITS) - 1;
const MAX_TIMESTAMP_YEAR: i64 = (1 << (64 - DAYTIME_BITS - DAY_OF_YEAR_BITS - 1)) - 1;
const MICROS_PER_DAY: i64 = MILLIS_PER_DAY * 1000;

/// A date packed as `year << 9 | day_of_year` into an `i32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PackedDate(i32);

impl PackedDate {
    /// Packs a year and a 1-based day of the year.
    pub fn try_new(year: i64, day_of_year: u16) -> TimeResult<Self> {
        if !(1..=366).contains(&day_of_year) {
            return Err(TimeError::DayOfYearOutOfRange { day: day_of_year });
        }
        if !(-MAX_DATE_YEAR..=MAX_DATE_YEAR).contains(&year) {
            return Err(TimeError::YearOutOfRange { year });
        }
        let year = i32::try_from(year).map_err(|_| TimeError::YearOutOfRange { year })?;
        Ok(Self(year << DAY_OF_YEAR_BITS | i32::from(day_of_year)))
    }

    /// Wraps a stored value.
    #[must_use]
    pub fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    /// The stored value.
    #[must_use]
    pub fn raw(self) -> i32 {
        self.0
    }

    /// The year.
    #[must_use]
    pub fn year(self) -> i64 {
        i64::from(self.0 >> DAY_OF_YEAR_BITS)
    }

    /// The 1-based day of the year.
    #[must_use]
    pub fn day_of_year(self) -> u16 {
        // masked to 9 bits
        (self.0 & DAY_OF_YEAR_MASK) as u16
    }
}

/// A date and a microsecond daytime packed as `date << 37 | daytime` into an `i64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PackedTimestamp(i64);

impl PackedTimestamp {
    /// Packs a date with the microseconds elapsed since its start.
    pub fn try_new(date: PackedDate, daytime_micros: i64) -> TimeResult<Self> {
        if !(-MAX_TIMESTAMP_YEAR..=MAX_TIMESTAMP_YEAR).contains(&date.year()) {
            return Err(TimeError::YearOutOfRange { year: date.year() });
        }
        if !(0..MICROS_PER_DAY).contains(&daytime_micros) {
            return Err(TimeError::DaytimeOutOfRange {
                micros: daytime_micros,
            });
        }
        Ok(Self(i64::from(date.raw()) << DAYTIME_BITS | daytime_micros))
    }

    /// Wraps a stored value.
    #[must_use]
    pub fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    /// The stored value.
    #[must_use]
    pub fn raw(self) -> i64 {
        self.0
    }

    /// The date part.
    #[must_use]
    pub fn date(self) -> PackedDate {
        // the shift leaves at most 27 significant bits
        PackedDate((self.0 >> DAYTIME_BITS) as i32)
    }

    /// Microseconds since the start of the day.
    #[must_use]
    pub fn daytime_micros(self) -> i64 {
        self.0 & DAYTIME_MASK
    }
}

/// Milliseconds since the epoch of the start of `date`.
#[must_use]
pub fn date_to_epoch_millis(date: PackedDate) -> i64 {
    (i64::from(date.day_of_year()) - 1) * MILLIS_PER_DAY
        + (date.year() - EPOCH_YEAR) * MILLIS_PER_YEAR
}

/// Splits an epoch offset into whole years and the remainder within the year.
fn split_years(epoch_millis: i64) -> (i64, i64) {
    (
        epoch_millis.div_euclid(MILLIS_PER_YEAR),
        epoch_millis.rem_euclid(MILLIS_PER_YEAR),
    )
}

fn day_of_year(remainder: i64) -> u16 {
    // the remainder is below one year, so at most 366
    (remainder / MILLIS_PER_DAY + 1) as u16
}

/// The date containing `epoch_millis`.
///
/// Days are counted from the start of the approximate year, so the result is
/// the start of the approximate day containing the offset. Only offsets of the
/// form `years * MILLIS_PER_YEAR + days * MILLIS_PER_DAY` survive a round trip
/// through [`date_to_epoch_millis`]; a plain multiple of [`MILLIS_PER_DAY`]
/// generally does not, since a year is not a whole number of days.
pub fn epoch_millis_to_date(epoch_millis: i64) -> TimeResult<PackedDate> {
    let (years, remainder) = split_years(epoch_millis);
    PackedDate::try_new(EPOCH_YEAR + years, day_of_year(remainder))
}

/// Milliseconds represented by a stored daytime.
#[must_use]
pub fn daytime_to_epoch_millis(daytime_micros: i64) -> i64 {
    daytime_micros / 1000 - HOUR_OFFSET_MILLIS
}

/// The stored daytime for an epoch offset.
pub fn epoch_millis_to_daytime(epoch_millis: i64) -> TimeResult<i64> {
    epoch_millis
        .checked_add(HOUR_OFFSET_MILLIS)
        .and_then(|shifted| shifted.checked_mul(1000))
        .ok_or(TimeError::Overflow { epoch_millis })
}

/// Milliseconds since the epoch of a stored timestamp.
#[must_use]
pub fn timestamp_to_epoch_millis(timestamp: PackedTimestamp) -> i64 {
    date_to_epoch_millis(timestamp.date())
        + daytime_to_epoch_millis(timestamp.daytime_micros())
}

/// The stored timestamp for an epoch offset.
pub fn epoch_millis_to_timestamp(epoch_millis: i64) -> TimeResult<PackedTimestamp> {
    let shifted = epoch_millis
        .checked_add(HOUR_OFFSET_MILLIS)
        .ok_or(TimeError::Overflow { epoch_millis })?;
    let (years, remainder) = split_years(shifted);
    let date = PackedDate::try_new(EPOCH_YEAR + years, day_of_year(remainder))?;
    PackedTimestamp::try_new(date, remainder % MILLIS_PER_DAY * 1000)
}
