//! This module contains the storage-side building blocks shared by the converters.
pub mod database;
pub(crate) mod map;
/// Fixed-point decimal text arithmetic and rounding.
pub mod math;
/// Epoch-millisecond arithmetic for the packed date, daytime and timestamp layouts.
pub mod time;
