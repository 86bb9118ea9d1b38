use super::{ColumnType, HeapOffset, PhysicalType, StorageError, StorageResult, VarHeap};
use alloc::{string::String, vec::Vec};
use serde::{Deserialize, Serialize};

/// The physical buffer of a column.
///
/// Fixed-width layouts are one contiguous vector per storage width. Heap-backed
/// layouts keep one offset per row plus the heap the offsets point into.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    /// i8 buffer
    Int8(Vec<i8>),
    /// i16 buffer
    Int16(Vec<i16>),
    /// i32 buffer
    Int32(Vec<i32>),
    /// i64 buffer
    Int64(Vec<i64>),
    /// f32 buffer
    Float32(Vec<f32>),
    /// f64 buffer
    Float64(Vec<f64>),
    /// u64 identifier buffer
    Oid(Vec<u64>),
    /// Offsets into a variable-length heap
    Heap {
        /// One offset per row
        offsets: Vec<HeapOffset>,
        /// The entries the offsets point at
        heap: VarHeap,
    },
}

fn try_vec<T>(capacity: usize) -> StorageResult<Vec<T>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(capacity)
        .map_err(|_| StorageError::OutOfMemory {
            requested: capacity,
        })?;
    Ok(buffer)
}

impl ColumnData {
    /// Allocates an empty buffer of the given layout with room for `capacity` rows.
    ///
    /// `heap` is only used by heap-backed layouts.
    pub fn try_with_capacity(
        physical_type: PhysicalType,
        capacity: usize,
        heap: VarHeap,
    ) -> StorageResult<Self> {
        Ok(match physical_type {
            PhysicalType::Int8 => ColumnData::Int8(try_vec(capacity)?),
            PhysicalType::Int16 => ColumnData::Int16(try_vec(capacity)?),
            PhysicalType::Int32 => ColumnData::Int32(try_vec(capacity)?),
            PhysicalType::Int64 => ColumnData::Int64(try_vec(capacity)?),
            PhysicalType::Float32 => ColumnData::Float32(try_vec(capacity)?),
            PhysicalType::Float64 => ColumnData::Float64(try_vec(capacity)?),
            PhysicalType::Oid => ColumnData::Oid(try_vec(capacity)?),
            PhysicalType::Heap => ColumnData::Heap {
                offsets: try_vec(capacity)?,
                heap,
            },
        })
    }

    /// Returns the layout of this buffer.
    #[must_use]
    pub fn physical_type(&self) -> PhysicalType {
        match self {
            ColumnData::Int8(_) => PhysicalType::Int8,
            ColumnData::Int16(_) => PhysicalType::Int16,
            ColumnData::Int32(_) => PhysicalType::Int32,
            ColumnData::Int64(_) => PhysicalType::Int64,
            ColumnData::Float32(_) => PhysicalType::Float32,
            ColumnData::Float64(_) => PhysicalType::Float64,
            ColumnData::Oid(_) => PhysicalType::Oid,
            ColumnData::Heap { .. } => PhysicalType::Heap,
        }
    }

    /// Returns the number of rows in the buffer.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Int8(col) => col.len(),
            ColumnData::Int16(col) => col.len(),
            ColumnData::Int32(col) => col.len(),
            ColumnData::Int64(col) => col.len(),
            ColumnData::Float32(col) => col.len(),
            ColumnData::Float64(col) => col.len(),
            ColumnData::Oid(col) => col.len(),
            ColumnData::Heap { offsets, .. } => offsets.len(),
        }
    }

    /// Returns true if the buffer holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Element types stored directly in a fixed-width [`ColumnData`] buffer.
pub trait FixedWidthPhysical: Copy + PartialOrd + Send + Sync + 'static {
    /// The layout whose buffer holds this type.
    const PHYSICAL_TYPE: PhysicalType;
    /// Borrows the typed buffer, or `None` if `data` has another layout.
    fn buffer(data: &ColumnData) -> Option<&[Self]>;
    /// Mutably borrows the typed buffer, or `None` if `data` has another layout.
    fn buffer_mut(data: &mut ColumnData) -> Option<&mut Vec<Self>>;
}

macro_rules! impl_fixed_width_physical {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl FixedWidthPhysical for $t {
                const PHYSICAL_TYPE: PhysicalType = PhysicalType::$variant;
                fn buffer(data: &ColumnData) -> Option<&[Self]> {
                    match data {
                        ColumnData::$variant(col) => Some(col.as_slice()),
                        _ => None,
                    }
                }
                fn buffer_mut(data: &mut ColumnData) -> Option<&mut Vec<Self>> {
                    match data {
                        ColumnData::$variant(col) => Some(col),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_fixed_width_physical!(
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    f32 => Float32,
    f64 => Float64,
    u64 => Oid,
);

/// Ordering and nil-presence flags of a column.
///
/// `has_nil` and `has_no_nil` always disagree on a finalized column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnProperties {
    /// Every value is greater than or equal to its predecessor.
    pub sorted: bool,
    /// Every value is less than or equal to its predecessor.
    pub reverse_sorted: bool,
    /// At least one value is nil.
    pub has_nil: bool,
    /// No value is nil.
    pub has_no_nil: bool,
}

impl ColumnProperties {
    /// The flags of a column with no rows.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            sorted: true,
            reverse_sorted: true,
            has_nil: false,
            has_no_nil: true,
        }
    }
}

/// A column under construction.
///
/// Builders are handed out by a storage, filled once from start to finish, then
/// either finalized into a [`Column`] or discarded.
#[derive(Debug)]
pub struct ColumnBuilder {
    column_type: ColumnType,
    capacity: usize,
    data: ColumnData,
}

impl ColumnBuilder {
    /// Wraps an empty buffer for a column of `column_type`.
    pub fn try_new(
        column_type: ColumnType,
        capacity: usize,
        data: ColumnData,
    ) -> StorageResult<Self> {
        if data.physical_type() != column_type.physical_type() {
            return Err(StorageError::LayoutMismatch {
                column_type,
                found: data.physical_type(),
            });
        }
        Ok(Self {
            column_type,
            capacity,
            data,
        })
    }

    /// The logical type being built.
    #[must_use]
    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }

    /// The number of rows the column was allocated for.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of rows appended so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if no rows were appended yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrows the buffer being filled.
    #[must_use]
    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    /// Mutably borrows the buffer being filled.
    pub fn data_mut(&mut self) -> &mut ColumnData {
        &mut self.data
    }

    /// Mutably borrows the heap of a heap-backed column.
    pub fn heap_mut(&mut self) -> StorageResult<&mut VarHeap> {
        match &mut self.data {
            ColumnData::Heap { heap, .. } => Ok(heap),
            other => Err(StorageError::LayoutMismatch {
                column_type: self.column_type,
                found: other.physical_type(),
            }),
        }
    }

    /// Records the heap offset of the next row of a heap-backed column.
    pub fn push_offset(&mut self, offset: HeapOffset) -> StorageResult<()> {
        match &mut self.data {
            ColumnData::Heap { offsets, .. } => {
                offsets.push(offset);
                Ok(())
            }
            other => Err(StorageError::LayoutMismatch {
                column_type: self.column_type,
                found: other.physical_type(),
            }),
        }
    }

    /// Seals the builder. Storages call this from `finalize_column`.
    ///
    /// The heap of a heap-backed column is frozen, since a finalized column
    /// never grows.
    pub fn seal(mut self, count: usize, properties: ColumnProperties) -> StorageResult<Column> {
        if count != self.data.len() {
            return Err(StorageError::CountMismatch {
                count,
                appended: self.data.len(),
            });
        }
        if let ColumnData::Heap { heap, .. } = &mut self.data {
            heap.freeze();
        }
        Column::try_new(self.column_type, self.data, properties)
    }
}

/// A finalized, read-only column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: Option<String>,
    column_type: ColumnType,
    data: ColumnData,
    properties: ColumnProperties,
}

impl Column {
    /// Wraps an already populated buffer.
    ///
    /// Fails if the buffer layout does not match `column_type` or the nil flags
    /// do not disagree.
    pub fn try_new(
        column_type: ColumnType,
        data: ColumnData,
        properties: ColumnProperties,
    ) -> StorageResult<Self> {
        if data.physical_type() != column_type.physical_type() {
            return Err(StorageError::LayoutMismatch {
                column_type,
                found: data.physical_type(),
            });
        }
        if properties.has_nil == properties.has_no_nil {
            return Err(StorageError::UndecidedNilPresence);
        }
        Ok(Self {
            name: None,
            column_type,
            data,
            properties,
        })
    }

    /// Attaches a name to the column.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The column name, if one was attached.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The logical type of the column.
    #[must_use]
    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }

    /// The ordering and nil flags computed when the column was finalized.
    #[must_use]
    pub fn properties(&self) -> ColumnProperties {
        self.properties
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the column has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrows the physical buffer.
    #[must_use]
    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    /// Borrows the typed fixed-width buffer.
    pub fn fixed<T: FixedWidthPhysical>(&self) -> StorageResult<&[T]> {
        T::buffer(&self.data).ok_or(StorageError::LayoutMismatch {
            column_type: self.column_type,
            found: T::PHYSICAL_TYPE,
        })
    }

    /// Borrows the offsets and heap of a heap-backed column.
    pub fn heap(&self) -> StorageResult<(&[HeapOffset], &VarHeap)> {
        match &self.data {
            ColumnData::Heap { offsets, heap } => Ok((offsets.as_slice(), heap)),
            other => Err(StorageError::LayoutMismatch {
                column_type: self.column_type,
                found: other.physical_type(),
            }),
        }
    }
}
