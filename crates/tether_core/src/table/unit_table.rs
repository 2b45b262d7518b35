//! # Unit Table
//!
//! Fixed-capacity array of [`UnitRecord`]s, one per host slot.
//!
//! - All slots exist from creation; a slot is never "missing", only dead
//! - Access is O(1) by [`UnitIndex`]
//! - Out-of-range reads yield an empty record instead of failing

use tether_shared::UnitIndex;

use super::record::{RecordLink, UnitRecord};
use crate::error::{TableError, TableResult};

/// Pre-allocated table of unit records.
///
/// # Example
///
/// ```rust,ignore
/// let bytes = host.read_unit_table();
/// let table = UnitTable::decode(&bytes)?;
/// let hp = table.record(UnitIndex(12)).hit_points;
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnitTable {
    /// The dense array of records.
    records: Box<[UnitRecord]>,
}

impl UnitTable {
    /// Creates a table where every slot is empty.
    ///
    /// # Panics
    ///
    /// Panics if capacity is zero.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Capacity must be greater than zero");

        Self {
            records: vec![UnitRecord::empty(); capacity].into_boxed_slice(),
        }
    }

    /// Wraps an already decoded set of records.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Empty`] if `records` is empty.
    pub fn from_records(records: Vec<UnitRecord>) -> TableResult<Self> {
        if records.is_empty() {
            return Err(TableError::Empty);
        }
        Ok(Self {
            records: records.into_boxed_slice(),
        })
    }

    /// Decodes a raw host frame.
    ///
    /// The byte slice must hold a whole number of records. Alignment of the
    /// source is irrelevant; each record is copied out field by field.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::LengthMismatch`] if the length is not a multiple
    /// of [`UnitRecord::SIZE`], or [`TableError::Empty`] for an empty frame.
    pub fn decode(bytes: &[u8]) -> TableResult<Self> {
        if bytes.len() % UnitRecord::SIZE != 0 {
            return Err(TableError::LengthMismatch {
                len: bytes.len(),
                record_size: UnitRecord::SIZE,
            });
        }

        let records = bytes
            .chunks_exact(UnitRecord::SIZE)
            .map(bytemuck::pod_read_unaligned::<UnitRecord>)
            .collect::<Vec<_>>();

        Self::from_records(records)
    }

    /// Returns the number of slots.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.records.len()
    }

    /// Checks if `index` addresses a slot in this table.
    #[inline]
    #[must_use]
    pub fn contains(&self, index: UnitIndex) -> bool {
        index.as_usize() < self.records.len()
    }

    /// Gets a record by index.
    #[inline]
    #[must_use]
    pub fn get(&self, index: UnitIndex) -> Option<&UnitRecord> {
        self.records.get(index.as_usize())
    }

    /// Copies out a record, or an empty one if `index` is out of range.
    #[inline]
    #[must_use]
    pub fn record(&self, index: UnitIndex) -> UnitRecord {
        self.get(index).copied().unwrap_or_default()
    }

    /// Overwrites a slot.
    ///
    /// Returns `false` if `index` is out of range.
    #[inline]
    pub fn set(&mut self, index: UnitIndex, record: UnitRecord) -> bool {
        if let Some(slot) = self.records.get_mut(index.as_usize()) {
            *slot = record;
            true
        } else {
            false
        }
    }

    /// Overwrites every slot from `other`.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::CapacityMismatch`] if the tables differ in size.
    pub fn copy_from(&mut self, other: &Self) -> TableResult<()> {
        if other.capacity() != self.capacity() {
            return Err(TableError::CapacityMismatch {
                expected: self.capacity(),
                actual: other.capacity(),
            });
        }
        self.records.copy_from_slice(&other.records);
        Ok(())
    }
}

/// Position in a walk over the `next` links of a [`UnitTable`].
///
/// The cursor owns no borrow, so a walk can span several short read locks.
/// Each [`RecordCursor::step`] reads one record from whatever table it is
/// given. The walk ends at a null link, at a link outside the table, or
/// after `capacity` steps, so a corrupt cycle still terminates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordCursor {
    next: RecordLink,
    remaining: usize,
}

impl RecordCursor {
    /// Starts a walk at `head`, visiting at most `capacity` slots.
    #[inline]
    #[must_use]
    pub const fn new(head: RecordLink, capacity: usize) -> Self {
        Self {
            next: head,
            remaining: capacity,
        }
    }

    /// Returns the current slot and moves to its `next` link.
    pub fn step(&mut self, table: &UnitTable) -> Option<UnitIndex> {
        if self.remaining == 0 {
            return None;
        }
        let Some(index) = self.next.index().filter(|i| table.contains(*i)) else {
            self.remaining = 0;
            return None;
        };
        self.remaining -= 1;
        self.next = table.record(index).next;
        Some(index)
    }

    /// Ends the walk early.
    #[inline]
    pub fn stop(&mut self) {
        self.remaining = 0;
    }
}
