use snafu::Snafu;

/// Errors related to packing temporal values.
#[allow(clippy::module_name_repetitions)]
#[derive(Snafu, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeError {
    /// The year does not fit the packed layout.
    #[snafu(display("Year {year} is outside of the packable range"))]
    YearOutOfRange {
        /// The offending year
        year: i64,
    },

    /// The day of the year is not between 1 and 366.
    #[snafu(display("Day of year {day} is not between 1 and 366"))]
    DayOfYearOutOfRange {
        /// The offending day
        day: u16,
    },

    /// The daytime is negative or does not fit the packed layout.
    #[snafu(display("Daytime of {micros} microseconds cannot be packed"))]
    DaytimeOutOfRange {
        /// The offending daytime
        micros: i64,
    },

    /// Converting the epoch offset overflowed a 64-bit integer.
    #[snafu(display("Epoch offset {epoch_millis} ms overflows the packed layout"))]
    Overflow {
        /// The offending epoch offset
        epoch_millis: i64,
    },
}

/// Result type for temporal packing.
pub type TimeResult<T> = Result<T, TimeError>;
