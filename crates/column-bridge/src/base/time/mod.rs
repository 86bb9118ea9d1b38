//! Epoch-millisecond arithmetic for the packed date, daytime and timestamp layouts.
//!
//! The arithmetic is deliberately not calendar based: a year is a fixed
//! 365.25 days and the day boundary sits one hour before UTC midnight. Both
//! constants are part of the stored format and must not be corrected.
mod error;
/// Errors raised while packing dates, daytimes and timestamps.
pub use error::{TimeError, TimeResult};
mod calendar;
pub use calendar::{
    date_to_epoch_millis, daytime_to_epoch_millis, epoch_millis_to_date,
    epoch_millis_to_daytime, epoch_millis_to_timestamp, timestamp_to_epoch_millis, PackedDate,
    PackedTimestamp, EPOCH_YEAR, HOUR_OFFSET_MILLIS, MILLIS_PER_DAY, MILLIS_PER_YEAR,
};
