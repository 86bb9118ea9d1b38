use super::{ColumnType, HeapOffset, PhysicalType};
use snafu::Snafu;

/// Errors raised by a [`ColumnStorage`](super::ColumnStorage) while allocating,
/// filling or finalizing a column.
#[derive(Snafu, Debug, PartialEq, Eq)]
pub enum StorageError {
    /// The storage could not allocate the requested number of elements.
    #[snafu(display("The system went out of memory allocating {requested} elements"))]
    OutOfMemory {
        /// Number of elements requested
        requested: usize,
    },

    /// A variable-length heap has no room left for an entry.
    #[snafu(display("Heap exhausted: {requested} bytes requested, {available} available"))]
    HeapExhausted {
        /// Size of the entry that did not fit
        requested: usize,
        /// Bytes left before the heap limit
        available: usize,
    },

    /// The buffer handed to the storage does not match the column's layout.
    #[snafu(display("{column_type} columns are not backed by {found:?} buffers"))]
    LayoutMismatch {
        /// The logical type of the column
        column_type: ColumnType,
        /// The layout that was found or requested instead
        found: PhysicalType,
    },

    /// Finalize was called with a count that differs from what was appended.
    #[snafu(display("Cannot finalize {count} values, {appended} were appended"))]
    CountMismatch {
        /// The count passed to finalize
        count: usize,
        /// The number of values actually in the buffer
        appended: usize,
    },

    /// Finalize was called with `has_nil` and `has_no_nil` in agreement.
    #[snafu(display("Nil presence must be decided before a column is finalized"))]
    UndecidedNilPresence,

    /// A heap offset does not point at a complete entry.
    #[snafu(display("No complete heap entry at offset {offset}"))]
    CorruptEntry {
        /// The offending offset
        offset: HeapOffset,
    },
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
