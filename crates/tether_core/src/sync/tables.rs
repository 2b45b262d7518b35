//! # Tick-Synchronized Unit Tables
//!
//! The three views of the host's unit array, advanced together once per tick.
//!
//! ## Architecture
//!
//! ```text
//!                    ┌───────────────────────────────────┐
//!                    │            UnitTables             │
//!                    │                                   │
//!                    │  ┌─────────────┐  ┌────────────┐  │
//!   frame N  ───────►│  │Authoritative│─►│   Mirror   │  │
//!                    │  │  (tick N)   │  │ (tick N-1) │  │
//!                    │  └──────┬──────┘  └────────────┘  │
//!                    │         │ copy                    │
//!                    │  ┌──────▼──────┐                  │
//!                    │  │    Local    │                  │
//!                    │  │ (tick N +   │                  │
//!                    │  │  lower-layer│                  │
//!                    │  │  edits)     │                  │
//!                    │  └─────────────┘                  │
//!                    └───────────────────────────────────┘
//!                                   │
//!                    ┌──────────────┴──────────────┐
//!                    ▼                             ▼
//!             ┌────────────┐               ┌────────────┐
//!             │ HostWriter │               │  Proxies   │
//!             │  (advance) │               │  (read)    │
//!             └────────────┘               └────────────┘
//! ```
//!
//! ## Guarantees
//!
//! - The mirror only ever receives a frame that was authoritative before, so
//!   it is never ahead of the authoritative table
//! - `advance` replaces all three views under one write lock; a reader holding
//!   the read lock sees one consistent tick

use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::{TableError, TableResult};
use crate::table::{RecordCursor, RecordLink, UnitRecord, UnitTable};
use tether_shared::UnitIndex;

/// Unit tables shared between the host writer and the proxies.
pub type SharedTables = Arc<RwLock<UnitTables>>;

/// Which of the three views to read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TableKind {
    /// The host's live table for the current tick.
    Authoritative,
    /// The previous tick's authoritative table.
    Mirror,
    /// Current tick plus whatever the lower layer recomputed locally.
    Local,
}

/// The three unit tables plus the tick they belong to.
///
/// ## Usage
///
/// ```rust,ignore
/// let tables = UnitTables::shared(1700);
/// let writer = HostWriter::new(Arc::clone(&tables));
///
/// loop {
///     let frame = host.read_frame()?;
///     writer.advance(frame, host.first_unit())?;
///
///     // queries now see the new tick
/// }
/// ```
#[derive(Debug)]
pub struct UnitTables {
    authoritative: UnitTable,
    mirror: UnitTable,
    local: UnitTable,
    /// First record of the host's unit list.
    head: RecordLink,
    /// Number of frames published so far.
    tick: u64,
}

impl UnitTables {
    /// Creates three empty tables at tick 0.
    ///
    /// # Panics
    ///
    /// Panics if capacity is zero.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            authoritative: UnitTable::new(capacity),
            mirror: UnitTable::new(capacity),
            local: UnitTable::new(capacity),
            head: RecordLink::NULL,
            tick: 0,
        }
    }

    /// Creates empty tables wrapped for sharing.
    #[must_use]
    pub fn shared(capacity: usize) -> SharedTables {
        Arc::new(RwLock::new(Self::new(capacity)))
    }

    /// Returns the current tick.
    #[inline]
    #[must_use]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Returns the number of slots in each table.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.authoritative.capacity()
    }

    /// Returns the head of the host's unit list.
    #[inline]
    #[must_use]
    pub fn head(&self) -> RecordLink {
        self.head
    }

    /// Returns one of the three views.
    #[inline]
    #[must_use]
    pub fn table(&self, kind: TableKind) -> &UnitTable {
        match kind {
            TableKind::Authoritative => &self.authoritative,
            TableKind::Mirror => &self.mirror,
            TableKind::Local => &self.local,
        }
    }

    /// Copies a record out of one of the views.
    ///
    /// Out-of-range indices read as an empty record.
    #[inline]
    #[must_use]
    pub fn record(&self, kind: TableKind, index: UnitIndex) -> UnitRecord {
        self.table(kind).record(index)
    }

    /// Starts a walk of the host's unit list at the current head.
    ///
    /// Step it with the authoritative table of the same tick.
    #[inline]
    #[must_use]
    pub fn cursor(&self) -> RecordCursor {
        RecordCursor::new(self.head, self.capacity())
    }

    /// Publishes the next host frame.
    ///
    /// 1. The current authoritative table becomes the mirror
    /// 2. `frame` becomes authoritative
    /// 3. The local table is reset to a copy of `frame`
    /// 4. The tick advances
    ///
    /// # Errors
    ///
    /// Returns [`TableError::CapacityMismatch`] if `frame` has a different
    /// slot count. The tables are left untouched in that case.
    pub fn advance(&mut self, frame: UnitTable, head: RecordLink) -> TableResult<u64> {
        if frame.capacity() != self.capacity() {
            return Err(TableError::CapacityMismatch {
                expected: self.capacity(),
                actual: frame.capacity(),
            });
        }

        let previous = std::mem::replace(&mut self.authoritative, frame);
        self.mirror = previous;
        self.local.copy_from(&self.authoritative)?;
        self.head = head;
        self.tick += 1;

        tracing::debug!(tick = self.tick, "unit tables advanced");
        Ok(self.tick)
    }

    /// Overwrites one slot of the local table.
    ///
    /// This is the lower layer's hook for locally recomputed state. The
    /// authoritative and mirror tables are never writable from here.
    ///
    /// Returns `false` if `index` is out of range.
    pub fn set_local(&mut self, index: UnitIndex, record: UnitRecord) -> bool {
        self.local.set(index, record)
    }
}

/// Host-side handle that publishes frames into shared tables.
///
/// The only path by which the authoritative and mirror tables change.
#[derive(Clone, Debug)]
pub struct HostWriter {
    tables: SharedTables,
}

impl HostWriter {
    /// Creates a writer over `tables`.
    #[must_use]
    pub fn new(tables: SharedTables) -> Self {
        Self { tables }
    }

    /// Returns the tables this writer publishes into.
    #[must_use]
    pub fn tables(&self) -> &SharedTables {
        &self.tables
    }

    /// Publishes an already decoded frame. See [`UnitTables::advance`].
    ///
    /// # Errors
    ///
    /// Returns [`TableError::CapacityMismatch`] if the frame size is wrong.
    pub fn advance(&self, frame: UnitTable, head: RecordLink) -> TableResult<u64> {
        self.tables.write().advance(frame, head)
    }

    /// Decodes a raw frame and publishes it.
    ///
    /// # Errors
    ///
    /// Returns any decode error from [`UnitTable::decode`], or
    /// [`TableError::CapacityMismatch`] if the frame size is wrong.
    pub fn advance_bytes(&self, bytes: &[u8], head: RecordLink) -> TableResult<u64> {
        let frame = UnitTable::decode(bytes)?;
        self.advance(frame, head)
    }

    /// Overwrites one slot of the local table. See [`UnitTables::set_local`].
    pub fn set_local(&self, index: UnitIndex, record: UnitRecord) -> bool {
        self.tables.write().set_local(index, record)
    }
}
