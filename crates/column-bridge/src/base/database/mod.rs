//! Module with the storage side of the bridge. In particular, this module contains the
//! logical and physical column types, the column buffers and their heap, and the
//! [`ColumnStorage`] trait the converters allocate columns from, along with an
//! in-memory implementation of it.
mod column_type;
pub use column_type::{ColumnType, DecimalWidth, HostShape, PhysicalType};

mod column;
pub use column::{Column, ColumnBuilder, ColumnData, ColumnProperties, FixedWidthPhysical};

mod error;
pub use error::{StorageError, StorageResult};

mod heap;
pub use heap::{HeapOffset, VarHeap};

mod storage;
pub use storage::{ColumnStorage, DecimalDescriptor};

mod memory_storage;
pub use memory_storage::{MemoryStorage, MemoryStorageConfig};
#[cfg(test)]
mod memory_storage_test;
