use core::fmt;
use serde::{Deserialize, Serialize};

/// Width of the fixed-point integer backing a decimal column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecimalWidth {
    /// 8-bit storage, up to 2 digits
    W8,
    /// 16-bit storage, up to 4 digits
    W16,
    /// 32-bit storage, up to 9 digits
    W32,
    /// 64-bit storage, up to 18 digits
    W64,
}

impl DecimalWidth {
    /// Returns the narrowest width able to hold `precision` decimal digits,
    /// or `None` if no supported width is wide enough.
    #[must_use]
    pub fn for_precision(precision: u8) -> Option<Self> {
        match precision {
            1..=2 => Some(DecimalWidth::W8),
            3..=4 => Some(DecimalWidth::W16),
            5..=9 => Some(DecimalWidth::W32),
            10..=18 => Some(DecimalWidth::W64),
            _ => None,
        }
    }

    /// The maximum number of decimal digits every value of this width can hold.
    #[must_use]
    pub fn max_digits(self) -> u8 {
        match self {
            DecimalWidth::W8 => 2,
            DecimalWidth::W16 => 4,
            DecimalWidth::W32 => 9,
            DecimalWidth::W64 => 18,
        }
    }
}

/// The physical layout of a column's primary buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhysicalType {
    /// one byte per value
    Int8,
    /// two bytes per value
    Int16,
    /// four bytes per value
    Int32,
    /// eight bytes per value
    Int64,
    /// IEEE single precision
    Float32,
    /// IEEE double precision
    Float64,
    /// unsigned 64-bit object identifiers
    Oid,
    /// heap offsets into an append-only variable-length store
    Heap,
}

impl PhysicalType {
    /// Bytes per element of the primary buffer for fixed-width layouts.
    /// Heap-backed layouts return `None`.
    #[must_use]
    pub fn fixed_width(self) -> Option<usize> {
        match self {
            PhysicalType::Int8 => Some(1),
            PhysicalType::Int16 => Some(2),
            PhysicalType::Int32 | PhysicalType::Float32 => Some(4),
            PhysicalType::Int64 | PhysicalType::Float64 | PhysicalType::Oid => Some(8),
            PhysicalType::Heap => None,
        }
    }
}

/// The shape a logical type takes on the host side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HostShape {
    /// Plain scalars that can be bulk-copied into a contiguous host buffer.
    /// These types can also be decoded as boxed objects.
    Primitive,
    /// Values that are always materialized as host objects.
    Boxed,
    /// Strings and byte arrays copied out of the column heap.
    VariableLength,
}

/// Logical types a column can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    /// Mapped to i8, 0 or 1
    Boolean,
    /// Mapped to i8
    TinyInt,
    /// Mapped to i16
    SmallInt,
    /// Mapped to i32
    Int,
    /// Mapped to i64
    BigInt,
    /// Mapped to f32
    Real,
    /// Mapped to f64
    Double,
    /// Mapped to a packed `(year, day_of_year)` i32
    Date,
    /// Mapped to i64 microseconds since midnight
    Time,
    /// Mapped to a packed date and daytime i64
    Timestamp,
    /// Mapped to a fixed-point integer of the given width with `scale` fractional digits
    Decimal(DecimalWidth, u8),
    /// Mapped to u64
    Oid,
    /// Mapped to heap-backed UTF-8 text
    VarChar,
    /// Mapped to heap-backed bytes
    VarBinary,
}

impl ColumnType {
    /// Returns the physical layout backing this logical type.
    #[must_use]
    pub fn physical_type(&self) -> PhysicalType {
        match self {
            ColumnType::Boolean
            | ColumnType::TinyInt
            | ColumnType::Decimal(DecimalWidth::W8, _) => PhysicalType::Int8,
            ColumnType::SmallInt | ColumnType::Decimal(DecimalWidth::W16, _) => {
                PhysicalType::Int16
            }
            ColumnType::Int | ColumnType::Date | ColumnType::Decimal(DecimalWidth::W32, _) => {
                PhysicalType::Int32
            }
            ColumnType::BigInt
            | ColumnType::Time
            | ColumnType::Timestamp
            | ColumnType::Decimal(DecimalWidth::W64, _) => PhysicalType::Int64,
            ColumnType::Real => PhysicalType::Float32,
            ColumnType::Double => PhysicalType::Float64,
            ColumnType::Oid => PhysicalType::Oid,
            ColumnType::VarChar | ColumnType::VarBinary => PhysicalType::Heap,
        }
    }

    /// Returns the host representation shape of this logical type.
    #[must_use]
    pub fn host_shape(&self) -> HostShape {
        match self {
            ColumnType::Boolean
            | ColumnType::TinyInt
            | ColumnType::SmallInt
            | ColumnType::Int
            | ColumnType::BigInt
            | ColumnType::Real
            | ColumnType::Double => HostShape::Primitive,
            ColumnType::Date
            | ColumnType::Time
            | ColumnType::Timestamp
            | ColumnType::Decimal(_, _)
            | ColumnType::Oid => HostShape::Boxed,
            ColumnType::VarChar | ColumnType::VarBinary => HostShape::VariableLength,
        }
    }

    /// Returns the scale of a decimal type, `None` for every other type.
    #[must_use]
    pub fn scale(&self) -> Option<u8> {
        match self {
            ColumnType::Decimal(_, scale) => Some(*scale),
            _ => None,
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Boolean => write!(f, "BOOLEAN"),
            ColumnType::TinyInt => write!(f, "TINYINT"),
            ColumnType::SmallInt => write!(f, "SMALLINT"),
            ColumnType::Int => write!(f, "INT"),
            ColumnType::BigInt => write!(f, "BIGINT"),
            ColumnType::Real => write!(f, "REAL"),
            ColumnType::Double => write!(f, "DOUBLE"),
            ColumnType::Date => write!(f, "DATE"),
            ColumnType::Time => write!(f, "TIME"),
            ColumnType::Timestamp => write!(f, "TIMESTAMP"),
            ColumnType::Decimal(width, scale) => {
                write!(f, "DECIMAL({}, {scale})", width.max_digits())
            }
            ColumnType::Oid => write!(f, "OID"),
            ColumnType::VarChar => write!(f, "VARCHAR"),
            ColumnType::VarBinary => write!(f, "BLOB"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn we_can_map_every_logical_type_to_a_physical_layout() {
        assert_eq!(ColumnType::Boolean.physical_type(), PhysicalType::Int8);
        assert_eq!(ColumnType::Date.physical_type(), PhysicalType::Int32);
        assert_eq!(ColumnType::Timestamp.physical_type(), PhysicalType::Int64);
        assert_eq!(
            ColumnType::Decimal(DecimalWidth::W16, 2).physical_type(),
            PhysicalType::Int16
        );
        assert_eq!(ColumnType::Oid.physical_type(), PhysicalType::Oid);
        assert_eq!(ColumnType::VarBinary.physical_type(), PhysicalType::Heap);
        assert_eq!(PhysicalType::Heap.fixed_width(), None);
        assert_eq!(PhysicalType::Oid.fixed_width(), Some(8));
    }

    #[test]
    fn we_can_pick_the_narrowest_decimal_width() {
        assert_eq!(DecimalWidth::for_precision(2), Some(DecimalWidth::W8));
        assert_eq!(DecimalWidth::for_precision(4), Some(DecimalWidth::W16));
        assert_eq!(DecimalWidth::for_precision(9), Some(DecimalWidth::W32));
        assert_eq!(DecimalWidth::for_precision(18), Some(DecimalWidth::W64));
        assert_eq!(DecimalWidth::for_precision(19), None);
        assert_eq!(DecimalWidth::for_precision(0), None);
    }

    #[test]
    fn we_can_display_column_types() {
        assert_eq!(
            ColumnType::Decimal(DecimalWidth::W32, 3).to_string(),
            "DECIMAL(9, 3)"
        );
        assert_eq!(ColumnType::VarBinary.to_string(), "BLOB");
        assert_eq!(ColumnType::Real.host_shape(), HostShape::Primitive);
        assert_eq!(ColumnType::Oid.host_shape(), HostShape::Boxed);
        assert_eq!(ColumnType::VarChar.host_shape(), HostShape::VariableLength);
    }
}
