use super::{
    Column, ColumnBuilder, ColumnData, ColumnProperties, ColumnStorage, ColumnType,
    DecimalDescriptor, DecimalWidth, HeapOffset, StorageError, StorageResult, VarHeap,
};
use core::sync::atomic::{AtomicUsize, Ordering};
use serde::{Deserialize, Serialize};

/// Tunables of a [`MemoryStorage`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryStorageConfig {
    /// Largest number of rows a single column may be created with.
    pub max_fixed_capacity: usize,
    /// Byte limit of each variable-length heap, unbounded if `None`.
    pub heap_limit: Option<usize>,
    /// Whether identical strings share one heap entry.
    pub dedup_strings: bool,
    /// Largest decimal scale the storage resolves.
    pub max_decimal_scale: u8,
}

impl Default for MemoryStorageConfig {
    fn default() -> Self {
        Self {
            max_fixed_capacity: u32::MAX as usize,
            heap_limit: None,
            dedup_strings: true,
            max_decimal_scale: DecimalWidth::W64.max_digits(),
        }
    }
}

/// An in-process [`ColumnStorage`] keeping every column in plain vectors.
///
/// Besides backing the tests, it counts how many columns were created,
/// finalized and discarded so callers can check that no column under
/// construction outlives a failed conversion.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    config: MemoryStorageConfig,
    created: AtomicUsize,
    finalized: AtomicUsize,
    discarded: AtomicUsize,
}

impl MemoryStorage {
    /// Creates a storage with the given configuration.
    #[must_use]
    pub fn new(config: MemoryStorageConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &MemoryStorageConfig {
        &self.config
    }

    /// Number of columns handed out by `create_column`.
    #[must_use]
    pub fn created_count(&self) -> usize {
        self.created.load(Ordering::Relaxed)
    }

    /// Number of columns sealed by `finalize_column`.
    #[must_use]
    pub fn finalized_count(&self) -> usize {
        self.finalized.load(Ordering::Relaxed)
    }

    /// Number of columns reclaimed by `discard_column`.
    #[must_use]
    pub fn discarded_count(&self) -> usize {
        self.discarded.load(Ordering::Relaxed)
    }

    /// Columns created but neither finalized nor discarded.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.created_count() - self.finalized_count() - self.discarded_count()
    }
}

impl ColumnStorage for MemoryStorage {
    fn create_column(
        &self,
        column_type: ColumnType,
        capacity: usize,
    ) -> StorageResult<ColumnBuilder> {
        if capacity > self.config.max_fixed_capacity {
            return Err(StorageError::OutOfMemory {
                requested: capacity,
            });
        }
        let heap = VarHeap::new(
            self.config.heap_limit,
            self.config.dedup_strings && column_type == ColumnType::VarChar,
        );
        let data = ColumnData::try_with_capacity(column_type.physical_type(), capacity, heap)?;
        let builder = ColumnBuilder::try_new(column_type, capacity, data)?;
        self.created.fetch_add(1, Ordering::Relaxed);
        Ok(builder)
    }

    fn append_to_heap(
        &self,
        column: &mut ColumnBuilder,
        entry: &[u8],
    ) -> StorageResult<HeapOffset> {
        column.heap_mut()?.append(entry)
    }

    fn finalize_column(
        &self,
        column: ColumnBuilder,
        count: usize,
        properties: ColumnProperties,
    ) -> StorageResult<Column> {
        let column = column.seal(count, properties)?;
        self.finalized.fetch_add(1, Ordering::Relaxed);
        Ok(column)
    }

    fn discard_column(&self, column: ColumnBuilder) {
        drop(column);
        self.discarded.fetch_add(1, Ordering::Relaxed);
    }

    fn resolve_decimal_descriptor(&self, scale: u8) -> Option<DecimalDescriptor> {
        (scale <= self.config.max_decimal_scale).then_some(DecimalDescriptor {
            scale,
            digits: DecimalWidth::W64.max_digits(),
        })
    }
}
