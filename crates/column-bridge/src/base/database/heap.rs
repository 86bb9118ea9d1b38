use super::{StorageError, StorageResult};
use crate::base::map::IndexMap;
use ahash::AHasher;
use alloc::vec::Vec;
use core::hash::{BuildHasher, BuildHasherDefault};

/// Byte offset of an entry inside a [`VarHeap`].
pub type HeapOffset = u64;

/// Append-only byte store backing string and blob columns.
///
/// Entries are opaque to the heap: the converters frame each value with its own
/// length header and read it back from [`VarHeap::entry_at`]. With double
/// elimination enabled, appending bytes identical to an earlier entry returns the
/// earlier offset instead of growing the heap. The index behind it maps entry
/// hashes to `(start, len)` spans of the heap itself and is dropped by
/// [`VarHeap::freeze`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VarHeap {
    bytes: Vec<u8>,
    limit: Option<usize>,
    dedup: Option<IndexMap<u64, Vec<(usize, usize)>>>,
}

fn entry_hash(entry: &[u8]) -> u64 {
    BuildHasherDefault::<AHasher>::default().hash_one(entry)
}

impl VarHeap {
    /// Creates an empty heap.
    ///
    /// `limit` caps the total number of bytes the heap will hold.
    #[must_use]
    pub fn new(limit: Option<usize>, eliminate_doubles: bool) -> Self {
        Self {
            bytes: Vec::new(),
            limit,
            dedup: eliminate_doubles.then(IndexMap::default),
        }
    }

    /// Number of bytes stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if nothing has been appended.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Bytes that can still be appended before hitting the limit.
    #[must_use]
    pub fn available(&self) -> usize {
        self.limit
            .map_or(usize::MAX, |limit| limit.saturating_sub(self.bytes.len()))
    }

    /// Returns true while identical entries are being shared.
    #[must_use]
    pub fn eliminates_doubles(&self) -> bool {
        self.dedup.is_some()
    }

    /// Drops the double-elimination index. Later appends are stored as is.
    pub fn freeze(&mut self) {
        self.dedup = None;
    }

    fn find_double(&self, hash: u64, entry: &[u8]) -> Option<HeapOffset> {
        self.dedup
            .as_ref()?
            .get(&hash)?
            .iter()
            .find(|&&(start, len)| self.bytes.get(start..start + len) == Some(entry))
            .map(|&(start, _)| start as HeapOffset)
    }

    /// Appends an entry and returns its offset.
    ///
    /// On failure the heap is left untouched.
    pub fn append(&mut self, entry: &[u8]) -> StorageResult<HeapOffset> {
        let hash = self.dedup.is_some().then(|| entry_hash(entry));
        if let Some(offset) = hash.and_then(|hash| self.find_double(hash, entry)) {
            return Ok(offset);
        }
        let available = self.available();
        if entry.len() > available {
            return Err(StorageError::HeapExhausted {
                requested: entry.len(),
                available,
            });
        }
        self.bytes
            .try_reserve(entry.len())
            .map_err(|_| StorageError::OutOfMemory {
                requested: entry.len(),
            })?;
        let start = self.bytes.len();
        self.bytes.extend_from_slice(entry);
        if let (Some(hash), Some(seen)) = (hash, self.dedup.as_mut()) {
            seen.entry(hash).or_default().push((start, entry.len()));
        }
        Ok(start as HeapOffset)
    }

    /// Returns the heap contents starting at `offset`.
    ///
    /// The caller decodes its own framing from the front of the returned slice.
    pub fn entry_at(&self, offset: HeapOffset) -> StorageResult<&[u8]> {
        usize::try_from(offset)
            .ok()
            .and_then(|start| self.bytes.get(start..))
            .filter(|tail| !tail.is_empty())
            .ok_or(StorageError::CorruptEntry { offset })
    }
}
