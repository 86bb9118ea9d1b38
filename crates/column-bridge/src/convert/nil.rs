use crate::base::database::{ColumnType, PhysicalType};
use core::cmp::Ordering;

/// Reserved bit pattern meaning "absent" for a fixed-width storage type.
pub trait NilSentinel: Copy + PartialOrd {
    /// The sentinel stored in place of an absent value.
    const NIL: Self;

    /// Returns true if `self` is the sentinel.
    fn is_nil(self) -> bool;
}

macro_rules! impl_integer_nil {
    ($($t:ty => $nil:expr),* $(,)?) => {
        $(
            impl NilSentinel for $t {
                const NIL: Self = $nil;
                fn is_nil(self) -> bool {
                    self == Self::NIL
                }
            }
        )*
    };
}

impl_integer_nil!(
    i8 => i8::MIN,
    i16 => i16::MIN,
    i32 => i32::MIN,
    i64 => i64::MIN,
    u64 => 1 << 63,
);

impl NilSentinel for f32 {
    const NIL: Self = f32::NAN;
    fn is_nil(self) -> bool {
        self.is_nan()
    }
}

impl NilSentinel for f64 {
    const NIL: Self = f64::NAN;
    fn is_nil(self) -> bool {
        self.is_nan()
    }
}

/// Orders two stored values with the nil sentinel sorting before everything else.
pub fn compare_nil_first<T: NilSentinel>(left: T, right: T) -> Option<Ordering> {
    match (left.is_nil(), right.is_nil()) {
        (true, true) => Some(Ordering::Equal),
        (true, false) => Some(Ordering::Less),
        (false, true) => Some(Ordering::Greater),
        (false, false) => left.partial_cmp(&right),
    }
}

/// Heap entry marking an absent string: a one byte length header followed by a
/// byte that can never start valid UTF-8.
pub const STRING_NIL_ENTRY: [u8; 5] = [1, 0, 0, 0, 0x80];

/// Heap entry marking an absent blob: a length header no real blob can carry.
pub const BLOB_NIL_ENTRY: [u8; 8] = [0xFF; 8];

/// A value as it sits in storage.
///
/// Heap-backed values are the framed entry read from the heap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawValue<'a> {
    /// i8 storage
    Int8(i8),
    /// i16 storage
    Int16(i16),
    /// i32 storage
    Int32(i32),
    /// i64 storage
    Int64(i64),
    /// f32 storage
    Float32(f32),
    /// f64 storage
    Float64(f64),
    /// identifier storage
    Oid(u64),
    /// a framed heap entry
    Entry(&'a [u8]),
}

/// The value stored for an absent entry of `column_type`.
#[must_use]
pub fn null_sentinel(column_type: ColumnType) -> RawValue<'static> {
    match column_type.physical_type() {
        PhysicalType::Int8 => RawValue::Int8(i8::NIL),
        PhysicalType::Int16 => RawValue::Int16(i16::NIL),
        PhysicalType::Int32 => RawValue::Int32(i32::NIL),
        PhysicalType::Int64 => RawValue::Int64(i64::NIL),
        PhysicalType::Float32 => RawValue::Float32(f32::NIL),
        PhysicalType::Float64 => RawValue::Float64(f64::NIL),
        PhysicalType::Oid => RawValue::Oid(u64::NIL),
        PhysicalType::Heap if column_type == ColumnType::VarChar => {
            RawValue::Entry(&STRING_NIL_ENTRY)
        }
        PhysicalType::Heap => RawValue::Entry(&BLOB_NIL_ENTRY),
    }
}

/// Returns true if `raw` denotes an absent value of `column_type`.
///
/// Heap entries are matched on their leading bytes, since a heap read returns
/// everything from the entry's offset onwards.
#[must_use]
pub fn is_null(raw: RawValue<'_>, column_type: ColumnType) -> bool {
    match (raw, null_sentinel(column_type)) {
        (RawValue::Int8(value), RawValue::Int8(_)) => value.is_nil(),
        (RawValue::Int16(value), RawValue::Int16(_)) => value.is_nil(),
        (RawValue::Int32(value), RawValue::Int32(_)) => value.is_nil(),
        (RawValue::Int64(value), RawValue::Int64(_)) => value.is_nil(),
        (RawValue::Float32(value), RawValue::Float32(_)) => value.is_nil(),
        (RawValue::Float64(value), RawValue::Float64(_)) => value.is_nil(),
        (RawValue::Oid(value), RawValue::Oid(_)) => value.is_nil(),
        (RawValue::Entry(entry), RawValue::Entry(nil)) => entry.starts_with(nil),
        _ => false,
    }
}
