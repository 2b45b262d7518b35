//! # Unit Registry
//!
//! Maps table slots to their one [`Unit`] proxy.
//!
//! ```text
//!   RecordLink / UnitIndex ──► slots[index] ──► Arc<Unit>
//!                                  │
//!                                  └─ empty? construct once, store, return
//! ```
//!
//! Callers compare units by identity (`Arc::ptr_eq`), so a slot must always
//! hand back the same proxy. Proxies are never removed; a dead unit keeps its
//! proxy and reports itself invalid.

use std::sync::Arc;

use parking_lot::RwLock;

use tether_core::{RecordCursor, RecordLink, SharedTables, TableKind};
use tether_shared::UnitIndex;

use crate::catalog::UnitTypeCatalog;
use crate::command::CommandSender;
use crate::error::{RegistryError, RegistryResult};
use crate::input::InputFlags;
use crate::unit::Unit;

/// Collaborators every proxy reads from or writes to.
pub(crate) struct UnitContext {
    pub(crate) tables: SharedTables,
    pub(crate) catalog: Arc<dyn UnitTypeCatalog>,
    pub(crate) input: Arc<InputFlags>,
    pub(crate) commands: CommandSender,
}

/// Owner of every [`Unit`] proxy in a session.
pub struct UnitRegistry {
    ctx: Arc<UnitContext>,
    slots: RwLock<Box<[Option<Arc<Unit>>]>>,
    capacity: usize,
}

impl UnitRegistry {
    /// Creates a registry with one empty slot per table entry.
    #[must_use]
    pub fn new(
        tables: SharedTables,
        catalog: Arc<dyn UnitTypeCatalog>,
        input: Arc<InputFlags>,
        commands: CommandSender,
    ) -> Arc<Self> {
        let capacity = tables.read().capacity();
        tracing::debug!(capacity, "unit registry created");

        Arc::new(Self {
            ctx: Arc::new(UnitContext {
                tables,
                catalog,
                input,
                commands,
            }),
            slots: RwLock::new(vec![None; capacity].into_boxed_slice()),
            capacity,
        })
    }

    /// Returns the number of slots.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the proxy for `index`, creating it on first use.
    ///
    /// # Panics
    ///
    /// Panics if `index` is outside the table.
    #[must_use]
    pub fn proxy(self: &Arc<Self>, index: UnitIndex) -> Arc<Unit> {
        match self.try_proxy(index) {
            Ok(unit) => unit,
            Err(error) => panic!("invalid unit handle: {error}"),
        }
    }

    /// Returns the proxy for `index`, creating it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::HandleOutOfRange`] if `index` is outside the
    /// table.
    pub fn try_proxy(self: &Arc<Self>, index: UnitIndex) -> RegistryResult<Arc<Unit>> {
        let slot = index.as_usize();
        if slot >= self.capacity {
            return Err(RegistryError::HandleOutOfRange {
                index: index.0,
                capacity: self.capacity,
            });
        }

        if let Some(unit) = &self.slots.read()[slot] {
            return Ok(Arc::clone(unit));
        }

        // Another thread may have filled the slot between the two locks
        let mut slots = self.slots.write();
        let unit = slots[slot].get_or_insert_with(|| {
            tracing::debug!(index = index.0, "unit proxy created");
            Arc::new(Unit::new(index, Arc::clone(&self.ctx), Arc::downgrade(self)))
        });
        Ok(Arc::clone(unit))
    }

    /// Returns the proxy a record link points at.
    ///
    /// # Panics
    ///
    /// Panics if `link` is null or outside the table. Both are caller bugs.
    #[must_use]
    pub fn resolve(self: &Arc<Self>, link: RecordLink) -> Arc<Unit> {
        match self.try_resolve(link) {
            Ok(unit) => unit,
            Err(error) => panic!("invalid unit handle: {error}"),
        }
    }

    /// Returns the proxy a record link points at.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NullHandle`] for a null link and
    /// [`RegistryError::HandleOutOfRange`] for a link past the table.
    pub fn try_resolve(self: &Arc<Self>, link: RecordLink) -> RegistryResult<Arc<Unit>> {
        let index = link.index().ok_or(RegistryError::NullHandle)?;
        self.try_proxy(index)
    }

    /// Link lookup for fields read out of records, where garbage is normal.
    pub(crate) fn lookup(self: &Arc<Self>, link: RecordLink) -> Option<Arc<Unit>> {
        self.try_resolve(link).ok()
    }

    /// Walks the host's unit list, starting at the current head.
    ///
    /// The walk reads one record per step and ends early if the host
    /// publishes a new tick meanwhile. Call again to restart.
    #[must_use]
    pub fn iter_units(self: &Arc<Self>) -> UnitIter {
        let tables = self.ctx.tables.read();
        UnitIter {
            registry: Arc::clone(self),
            cursor: tables.cursor(),
            tick: tables.tick(),
        }
    }
}

/// Lazy walk over the host's unit list. See [`UnitRegistry::iter_units`].
pub struct UnitIter {
    registry: Arc<UnitRegistry>,
    cursor: RecordCursor,
    tick: u64,
}

impl Iterator for UnitIter {
    type Item = Arc<Unit>;

    fn next(&mut self) -> Option<Self::Item> {
        let index = {
            let tables = self.registry.ctx.tables.read();
            if tables.tick() != self.tick {
                self.cursor.stop();
                return None;
            }
            self.cursor.step(tables.table(TableKind::Authoritative))?
        };
        self.registry.try_proxy(index).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;
    use crate::command::CommandChannel;
    use tether_core::{HostWriter, UnitRecord, UnitTable, UnitTables};

    fn registry(capacity: usize) -> (Arc<UnitRegistry>, HostWriter) {
        let tables = UnitTables::shared(capacity);
        let (sender, _queue) = CommandChannel::create_pair(8);
        let registry = UnitRegistry::new(
            Arc::clone(&tables),
            Arc::new(StaticCatalog::new()),
            Arc::new(InputFlags::default()),
            sender,
        );
        (registry, HostWriter::new(tables))
    }

    fn linked_frame(capacity: usize, order: &[u16]) -> (UnitTable, RecordLink) {
        let mut frame = UnitTable::new(capacity);
        for pair in order.windows(2) {
            let mut record = UnitRecord::empty();
            record.next = RecordLink::to(UnitIndex(pair[1]));
            frame.set(UnitIndex(pair[0]), record);
        }
        let head = order.first().map_or(RecordLink::NULL, |&i| RecordLink::to(UnitIndex(i)));
        (frame, head)
    }

    #[test]
    fn test_proxy_is_idempotent() {
        let (registry, _writer) = registry(8);
        let a = registry.proxy(UnitIndex(3));
        let b = registry.proxy(UnitIndex(3));
        let c = registry.resolve(RecordLink::to(UnitIndex(3)));
        assert!(Arc::ptr_eq(&a, &b));
        assert!(Arc::ptr_eq(&a, &c));
        assert!(!Arc::ptr_eq(&a, &registry.proxy(UnitIndex(4))));
    }

    #[test]
    fn test_bad_handles() {
        let (registry, _writer) = registry(8);
        assert_eq!(
            registry.try_resolve(RecordLink::NULL).unwrap_err(),
            RegistryError::NullHandle
        );
        assert_eq!(
            registry.try_proxy(UnitIndex(8)).unwrap_err(),
            RegistryError::HandleOutOfRange { index: 8, capacity: 8 }
        );
    }

    #[test]
    #[should_panic(expected = "invalid unit handle")]
    fn test_resolve_null_panics() {
        let (registry, _writer) = registry(8);
        let _ = registry.resolve(RecordLink::NULL);
    }

    #[test]
    fn test_iter_units_follows_next_links() {
        let (registry, writer) = registry(8);
        let (frame, head) = linked_frame(8, &[5, 1, 6]);
        writer.advance(frame, head).unwrap();

        let walked: Vec<_> = registry.iter_units().map(|unit| unit.index()).collect();
        assert_eq!(walked, vec![UnitIndex(5), UnitIndex(1), UnitIndex(6)]);

        // Restartable
        assert_eq!(registry.iter_units().count(), 3);
    }

    #[test]
    fn test_iter_units_is_bounded() {
        let (registry, writer) = registry(4);
        // 0 -> 1 -> 0 -> ...
        let (frame, head) = linked_frame(4, &[0, 1, 0]);
        writer.advance(frame, head).unwrap();
        assert_eq!(registry.iter_units().count(), 4);
    }

    #[test]
    fn test_iter_units_stops_on_new_tick() {
        let (registry, writer) = registry(8);
        let (frame, head) = linked_frame(8, &[0, 1, 2]);
        writer.advance(frame.clone(), head).unwrap();

        let mut walk = registry.iter_units();
        assert!(walk.next().is_some());
        writer.advance(frame, head).unwrap();
        assert!(walk.next().is_none());
    }

    #[test]
    fn test_proxies_shared_across_threads() {
        let (registry, _writer) = registry(16);
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || registry.proxy(UnitIndex(9)))
            })
            .collect();
        let units: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(units.windows(2).all(|pair| Arc::ptr_eq(&pair[0], &pair[1])));
    }
}
