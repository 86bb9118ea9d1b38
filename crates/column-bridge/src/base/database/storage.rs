use super::{Column, ColumnBuilder, ColumnProperties, ColumnType, HeapOffset, StorageResult};
use serde::{Deserialize, Serialize};

/// Resolved description of a decimal type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DecimalDescriptor {
    /// Digits after the decimal point
    pub scale: u8,
    /// Total digits a value of this type may carry
    pub digits: u8,
}

/// The storage engine the converters allocate columns from.
///
/// A column is created empty, filled once by a single encoder, and then either
/// finalized or discarded. Implementations own the buffers; the converters only
/// borrow them for the duration of a call.
pub trait ColumnStorage {
    /// Allocates an empty column of `column_type` sized for `capacity` rows.
    fn create_column(
        &self,
        column_type: ColumnType,
        capacity: usize,
    ) -> StorageResult<ColumnBuilder>;

    /// Appends a framed entry to the heap of a heap-backed column.
    fn append_to_heap(&self, column: &mut ColumnBuilder, entry: &[u8])
        -> StorageResult<HeapOffset>;

    /// Seals a fully populated column with its element count and flags.
    fn finalize_column(
        &self,
        column: ColumnBuilder,
        count: usize,
        properties: ColumnProperties,
    ) -> StorageResult<Column>;

    /// Reclaims a column whose construction was abandoned.
    fn discard_column(&self, column: ColumnBuilder);

    /// Looks up the decimal type with the given scale.
    fn resolve_decimal_descriptor(&self, scale: u8) -> Option<DecimalDescriptor>;
}
