use super::{
    batch::build_column,
    nil::{BLOB_NIL_ENTRY, STRING_NIL_ENTRY},
    properties::PropertyTracker,
    ConversionError, ConversionResult,
};
use crate::base::database::{
    Column, ColumnStorage, ColumnType, HeapOffset, StorageError, VarHeap,
};
use alloc::vec::Vec;
use core::cmp::Ordering;
use tracing::warn;

/// Frames a string as a little-endian `u32` byte length followed by its UTF-8 bytes.
pub fn frame_string(text: &str) -> ConversionResult<Vec<u8>> {
    let len = u32::try_from(text.len()).map_err(|_| ConversionError::OutOfMemory {
        requested: text.len(),
    })?;
    Ok(frame(&len.to_le_bytes(), text.as_bytes()))
}

/// Frames a blob as a little-endian `u64` byte length followed by its bytes.
#[must_use]
pub fn frame_blob(bytes: &[u8]) -> Vec<u8> {
    frame(&(bytes.len() as u64).to_le_bytes(), bytes)
}

fn frame(header: &[u8], payload: &[u8]) -> Vec<u8> {
    let mut entry = Vec::with_capacity(header.len() + payload.len());
    entry.extend_from_slice(header);
    entry.extend_from_slice(payload);
    entry
}

/// Orders blobs by length first and by content second.
#[must_use]
pub fn compare_blobs(left: &[u8], right: &[u8]) -> Ordering {
    left.len().cmp(&right.len()).then_with(|| left.cmp(right))
}

/// Orders two optional values with absent values first.
fn compare_present<T: ?Sized>(
    current: Option<&T>,
    previous: Option<&T>,
    compare: impl Fn(&T, &T) -> Ordering,
) -> Ordering {
    match (current, previous) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(current), Some(previous)) => compare(current, previous),
    }
}

/// Appends every value to the heap of a new column, strictly in input order.
///
/// A value whose append fails is replaced by the nil entry and the rest of the
/// input is still processed. If anything failed, the column is discarded and a
/// single `AbortedAppends` error covering every failed row is returned.
fn encode_varlen<S, T, V>(
    storage: &S,
    column_type: ColumnType,
    values: &[Option<V>],
    nil_entry: &[u8],
    frame_value: impl Fn(&T) -> ConversionResult<Vec<u8>>,
    compare: impl Fn(&T, &T) -> Ordering,
) -> ConversionResult<Column>
where
    S: ColumnStorage + ?Sized,
    T: ?Sized,
    V: AsRef<T>,
{
    build_column(storage, column_type, values.len(), |storage, builder| {
        let mut tracker = PropertyTracker::new();
        let mut previous: Option<Option<&T>> = None;
        let mut failed = 0;
        let mut first_failure = None;
        for (index, value) in values.iter().enumerate() {
            let mut current: Option<&T> = value.as_ref().map(AsRef::as_ref);
            let entry = match current {
                Some(value) => frame_value(value)?,
                None => nil_entry.to_vec(),
            };
            let offset = match storage.append_to_heap(builder, &entry) {
                Ok(offset) => Some(offset),
                Err(
                    error @ (StorageError::HeapExhausted { .. }
                    | StorageError::OutOfMemory { .. }),
                ) => {
                    warn!(index, %error, "heap append failed, storing nil instead");
                    failed += 1;
                    first_failure = first_failure.or(Some(index));
                    current = None;
                    storage.append_to_heap(builder, nil_entry).ok()
                }
                Err(error) => return Err(error.into()),
            };
            if let Some(offset) = offset {
                builder.push_offset(offset)?;
            }
            tracker.record(
                current.is_none(),
                previous.map(|previous| compare_present(current, previous, &compare)),
            );
            previous = Some(current);
        }
        match first_failure {
            Some(first) => Err(ConversionError::AbortedAppends { failed, first }),
            None => Ok((tracker.count(), tracker.finish())),
        }
    })
}

/// Builds a string column. Strings are ordered bytewise.
#[tracing::instrument(name = "varlen::encode_string_column", level = "debug", skip_all)]
pub fn encode_string_column<S, V>(storage: &S, values: &[Option<V>]) -> ConversionResult<Column>
where
    S: ColumnStorage + ?Sized,
    V: AsRef<str>,
{
    encode_varlen(
        storage,
        ColumnType::VarChar,
        values,
        &STRING_NIL_ENTRY,
        frame_string,
        |left: &str, right: &str| left.cmp(right),
    )
}

/// Builds a blob column. Blobs are ordered by length, then by content.
#[tracing::instrument(name = "varlen::encode_blob_column", level = "debug", skip_all)]
pub fn encode_blob_column<S, V>(storage: &S, values: &[Option<V>]) -> ConversionResult<Column>
where
    S: ColumnStorage + ?Sized,
    V: AsRef<[u8]>,
{
    encode_varlen(
        storage,
        ColumnType::VarBinary,
        values,
        &BLOB_NIL_ENTRY,
        |bytes: &[u8]| Ok(frame_blob(bytes)),
        compare_blobs,
    )
}

pub(crate) fn heap_of(
    column: &Column,
    expected: ColumnType,
) -> ConversionResult<(&[HeapOffset], &VarHeap)> {
    if column.column_type() != expected {
        return Err(ConversionError::TypeMismatch {
            expected: column.column_type(),
            found: if expected == ColumnType::VarChar {
                "string"
            } else {
                "blob"
            },
        });
    }
    Ok(column.heap()?)
}

/// Splits a framed entry into its payload, `None` for the nil entry.
fn read_entry<'a, const N: usize>(
    heap: &'a VarHeap,
    offset: HeapOffset,
    nil_entry: &[u8],
) -> ConversionResult<Option<&'a [u8]>> {
    let entry = heap.entry_at(offset)?;
    if entry.starts_with(nil_entry) {
        return Ok(None);
    }
    let corrupt = || ConversionError::from(StorageError::CorruptEntry { offset });
    let (header, payload) = entry.split_first_chunk::<N>().ok_or_else(corrupt)?;
    let mut len = [0; 8];
    len[..N].copy_from_slice(header);
    usize::try_from(u64::from_le_bytes(len))
        .ok()
        .and_then(|len| payload.get(..len))
        .map(Some)
        .ok_or_else(corrupt)
}

pub(crate) fn read_string(heap: &VarHeap, offset: HeapOffset) -> ConversionResult<Option<&str>> {
    read_entry::<4>(heap, offset, &STRING_NIL_ENTRY)?
        .map(|bytes| {
            core::str::from_utf8(bytes)
                .map_err(|_| ConversionError::from(StorageError::CorruptEntry { offset }))
        })
        .transpose()
}

pub(crate) fn read_blob(heap: &VarHeap, offset: HeapOffset) -> ConversionResult<Option<&[u8]>> {
    read_entry::<8>(heap, offset, &BLOB_NIL_ENTRY)
}

/// Reads the string at `index`, borrowing it from the column heap.
///
/// # Panics
/// Panics if `index` is out of bounds.
pub fn decode_string(column: &Column, index: usize) -> ConversionResult<Option<&str>> {
    let (offsets, heap) = heap_of(column, ColumnType::VarChar)?;
    read_string(heap, offsets[index])
}

/// Reads `destination.len()` strings starting at `first`.
///
/// # Panics
/// Panics if the range is out of bounds.
#[tracing::instrument(name = "varlen::decode_string_range", level = "debug", skip_all)]
pub fn decode_string_range<'a>(
    column: &'a Column,
    first: usize,
    destination: &mut [Option<&'a str>],
) -> ConversionResult<()> {
    let (offsets, heap) = heap_of(column, ColumnType::VarChar)?;
    let offsets = &offsets[first..first + destination.len()];
    for (slot, &offset) in destination.iter_mut().zip(offsets) {
        *slot = read_string(heap, offset)?;
    }
    Ok(())
}

/// Reads the blob at `index`, borrowing it from the column heap.
///
/// # Panics
/// Panics if `index` is out of bounds.
pub fn decode_blob(column: &Column, index: usize) -> ConversionResult<Option<&[u8]>> {
    let (offsets, heap) = heap_of(column, ColumnType::VarBinary)?;
    read_blob(heap, offsets[index])
}

/// Reads `destination.len()` blobs starting at `first`.
///
/// # Panics
/// Panics if the range is out of bounds.
#[tracing::instrument(name = "varlen::decode_blob_range", level = "debug", skip_all)]
pub fn decode_blob_range<'a>(
    column: &'a Column,
    first: usize,
    destination: &mut [Option<&'a [u8]>],
) -> ConversionResult<()> {
    let (offsets, heap) = heap_of(column, ColumnType::VarBinary)?;
    let offsets = &offsets[first..first + destination.len()];
    for (slot, &offset) in destination.iter_mut().zip(offsets) {
        *slot = read_blob(heap, offset)?;
    }
    Ok(())
}
