//! # Build Queue Cache
//!
//! Derived build-queue state, cached per unit and tagged with the tick and
//! raw queue it came from.
//!
//! ## Two Paths
//!
//! ```text
//! cached  : entry for this tick AND same raw queue?  ──► entry
//!                                                    └─► None
//! fill    : recompute from the local table  ──► store ──► entry
//! sync    : recompute from the authoritative table ──► store ──► entry
//! ```
//!
//! Public queue accessors on [`Unit`](crate::Unit) always take the sync
//! path. The other two exist so the cache can be exercised on its own.

use tether_core::TableKind;
use tether_shared::{UnitType, BUILD_QUEUE_CAPACITY};

/// Raw queue contents as stored in a record.
pub type RawQueue = [UnitType; BUILD_QUEUE_CAPACITY];

/// Queue state derived from one raw queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuildQueueState {
    /// Queue contents, copied from the record.
    pub queue: RawQueue,
    /// Index of the first unused entry; `BUILD_QUEUE_CAPACITY` when full.
    pub slot: u8,
    /// Nothing queued.
    pub empty: bool,
    /// No room left.
    pub full: bool,
}

impl BuildQueueState {
    /// Derives the state from raw queue contents.
    ///
    /// Scans up to the fixed capacity for the first unused entry. That
    /// boundary is the slot; boundary 0 means empty, boundary at capacity
    /// means full.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_queue(queue: &RawQueue) -> Self {
        let boundary = queue
            .iter()
            .position(|entry| entry.is_none())
            .unwrap_or(BUILD_QUEUE_CAPACITY);

        Self {
            queue: *queue,
            slot: boundary as u8,
            empty: boundary == 0,
            full: boundary == BUILD_QUEUE_CAPACITY,
        }
    }

    /// Queued types in order, without the unused tail.
    #[must_use]
    pub fn queued(&self) -> &[UnitType] {
        &self.queue[..usize::from(self.slot)]
    }
}

impl Default for BuildQueueState {
    fn default() -> Self {
        Self::from_queue(&[UnitType::NONE; BUILD_QUEUE_CAPACITY])
    }
}

#[derive(Clone, Copy, Debug)]
struct CacheEntry {
    tick: u64,
    source: TableKind,
    raw: RawQueue,
    state: BuildQueueState,
}

/// Per-unit cache of the last derived queue state.
#[derive(Debug, Default)]
pub(crate) struct SyncCache {
    entry: Option<CacheEntry>,
}

impl SyncCache {
    /// Returns the cached state if it was computed at `tick` from a raw
    /// queue identical to `authoritative`.
    pub(crate) fn get(&self, tick: u64, authoritative: &RawQueue) -> Option<BuildQueueState> {
        self.entry
            .filter(|entry| entry.tick == tick && entry.raw == *authoritative)
            .map(|entry| entry.state)
    }

    /// Recomputes from `raw` and stores the result.
    pub(crate) fn fill(&mut self, tick: u64, source: TableKind, raw: &RawQueue) -> BuildQueueState {
        let state = BuildQueueState::from_queue(raw);
        self.entry = Some(CacheEntry {
            tick,
            source,
            raw: *raw,
            state,
        });
        state
    }

    /// Table the current entry was filled from.
    pub(crate) fn source(&self) -> Option<TableKind> {
        self.entry.map(|entry| entry.source)
    }
}
