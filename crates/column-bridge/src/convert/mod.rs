//! The converter core: per-type codecs between finalized or freshly created
//! columns and host representations, with nil handling and column property
//! tracking.
mod error;
pub use error::{ConversionError, ConversionResult};

pub(crate) mod batch;

/// Nil sentinels and the null policy of every logical type.
pub mod nil;
pub use nil::{is_null, null_sentinel, NilSentinel, RawValue};

mod properties;
pub use properties::PropertyTracker;

/// Plain fixed-width values copied without nil mapping.
pub mod scalar;
#[cfg(test)]
mod scalar_test;

/// Date, time and timestamp columns as epoch milliseconds.
pub mod temporal;
#[cfg(test)]
mod temporal_test;

/// Fixed-point decimal columns.
pub mod decimal;
pub use crate::base::math::decimal::RoundingPolicy;

/// String and blob columns backed by a heap.
pub mod varlen;

/// Object identifier columns.
pub mod oid;

mod host;
pub use host::{HostFactory, HostValue, HostValueFactory};

mod registry;
pub use registry::{decode_one, decode_range, encode_column, rule, TypeRule};
#[cfg(test)]
mod registry_test;
