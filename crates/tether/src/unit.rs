//! # Unit Proxy
//!
//! One [`Unit`] per table slot, handed out by the
//! [`UnitRegistry`](crate::UnitRegistry) and kept for the whole session.
//!
//! ## Reads
//!
//! ```text
//!   projections ──────────► Authoritative (tick N)
//!   mirror_raw_data ──────► Mirror        (tick N-1)
//!   raw_data_local ───────► Local         (tick N + local edits)
//!   build queue ──► SyncCache ──► Authoritative
//! ```
//!
//! A proxy outlives the unit it wraps. Once the host reuses or clears the
//! slot, every accessor still returns a value; [`Unit::is_valid`] is the only
//! way to tell whether that value means anything.
//!
//! ## Orders
//!
//! Orders are appended to the command sink and nothing else. The tables do
//! not change until the host publishes its next frame, so a query made right
//! after an order still sees the old state.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use tether_core::{RecordLink, TableKind, UnitRecord, MINERAL_FLAG};
use tether_shared::{
    Bounds, Command, OrderId, PlayerId, Position, TechType, TilePosition, UnitIndex, UnitType,
    UpgradeType,
};

use crate::build_queue::{BuildQueueState, SyncCache};
use crate::registry::{UnitContext, UnitRegistry};

/// Name reported for types the catalog does not know.
pub const UNKNOWN_TYPE_NAME: &str = "Unknown";

/// Proxy for one slot of the host's unit table.
pub struct Unit {
    index: UnitIndex,
    ctx: Arc<UnitContext>,
    registry: Weak<UnitRegistry>,
    cache: Mutex<SyncCache>,
    user_selected: AtomicBool,
    visible: AtomicBool,
}

impl Unit {
    pub(crate) fn new(
        index: UnitIndex,
        ctx: Arc<UnitContext>,
        registry: Weak<UnitRegistry>,
    ) -> Self {
        Self {
            index,
            ctx,
            registry,
            cache: Mutex::new(SyncCache::default()),
            user_selected: AtomicBool::new(false),
            visible: AtomicBool::new(false),
        }
    }

    // ========================================================================
    // RAW DATA
    // ========================================================================

    /// Authoritative record for this slot, copied out under the read lock.
    pub(crate) fn raw_data(&self) -> UnitRecord {
        self.ctx.tables.read().record(TableKind::Authoritative, self.index)
    }

    /// Record for this slot as of the previous tick.
    #[must_use]
    pub fn mirror_raw_data(&self) -> UnitRecord {
        self.ctx.tables.read().record(TableKind::Mirror, self.index)
    }

    /// Record for this slot including local edits made this tick.
    #[must_use]
    pub fn raw_data_local(&self) -> UnitRecord {
        self.ctx.tables.read().record(TableKind::Local, self.index)
    }

    fn lookup(&self, link: RecordLink) -> Option<Arc<Unit>> {
        self.registry.upgrade()?.lookup(link)
    }

    // ========================================================================
    // PROJECTIONS
    // ========================================================================

    /// Stable slot index, shared by all three tables.
    #[inline]
    #[must_use]
    pub fn index(&self) -> UnitIndex {
        self.index
    }

    /// Unit type.
    #[must_use]
    pub fn unit_type(&self) -> UnitType {
        self.raw_data().unit_type
    }

    /// Display name of the unit type, or [`UNKNOWN_TYPE_NAME`].
    #[must_use]
    pub fn name(&self) -> String {
        let unit_type = self.unit_type();
        self.ctx
            .catalog
            .name(unit_type)
            .unwrap_or(UNKNOWN_TYPE_NAME)
            .to_owned()
    }

    /// Current hit points.
    #[must_use]
    pub fn hit_points(&self) -> u16 {
        self.raw_data().hit_points
    }

    /// Maximum hit points.
    #[must_use]
    pub fn max_hit_points(&self) -> u16 {
        self.raw_data().max_hit_points
    }

    /// Current shield points.
    #[must_use]
    pub fn shield_points(&self) -> u32 {
        self.raw_data().shield_points
    }

    /// Maximum shield points.
    #[must_use]
    pub fn max_shield_points(&self) -> u32 {
        self.raw_data().max_shield_points
    }

    /// Center position in pixels.
    #[must_use]
    pub fn position(&self) -> Position {
        self.raw_data().position
    }

    /// Destination of the current order.
    #[must_use]
    pub fn target_position(&self) -> Position {
        self.raw_data().target_position
    }

    /// Tile under the unit.
    #[must_use]
    pub fn tile_position(&self) -> TilePosition {
        self.raw_data().tile_position
    }

    /// Owning player.
    #[must_use]
    pub fn owner(&self) -> PlayerId {
        self.raw_data().owner
    }

    /// Current attack target.
    #[must_use]
    pub fn target(&self) -> Option<Arc<Unit>> {
        self.lookup(self.raw_data().target)
    }

    /// Target of the current order.
    #[must_use]
    pub fn order_target(&self) -> Option<Arc<Unit>> {
        self.lookup(self.raw_data().order_target)
    }

    /// Unit under construction by this one.
    #[must_use]
    pub fn build_unit(&self) -> Option<Arc<Unit>> {
        self.lookup(self.raw_data().build_unit)
    }

    /// Linked unit, such as an addon.
    #[must_use]
    pub fn child(&self) -> Option<Arc<Unit>> {
        self.lookup(self.raw_data().child)
    }

    /// Next unit in the host's unit list.
    #[must_use]
    pub fn next(&self) -> Option<Arc<Unit>> {
        self.lookup(self.raw_data().next)
    }

    /// Primary order.
    #[must_use]
    pub fn order_id(&self) -> OrderId {
        self.raw_data().order_id
    }

    /// Secondary order.
    #[must_use]
    pub fn secondary_order_id(&self) -> OrderId {
        self.raw_data().secondary_order_id
    }

    /// Frames left on the current order step.
    #[must_use]
    pub fn order_timer(&self) -> u8 {
        self.raw_data().order_timer
    }

    /// Frames until construction finishes.
    #[must_use]
    pub fn remaining_build_time(&self) -> u16 {
        self.raw_data().remaining_build_time
    }

    // ========================================================================
    // DISTANCE
    // ========================================================================

    /// Both units' authoritative records from the same tick.
    ///
    /// Units sharing tables are copied out under one read lock. Units from
    /// different sessions have no common tick and are read separately.
    fn record_pair(&self, other: &Unit) -> (UnitRecord, UnitRecord) {
        if Arc::ptr_eq(&self.ctx.tables, &other.ctx.tables) {
            let tables = self.ctx.tables.read();
            (
                tables.record(TableKind::Authoritative, self.index),
                tables.record(TableKind::Authoritative, other.index),
            )
        } else {
            (self.raw_data(), other.raw_data())
        }
    }

    fn bounds_of(&self, record: &UnitRecord) -> Bounds {
        Bounds::around(record.position, self.ctx.catalog.dimensions(record.unit_type))
    }

    /// Edge-to-edge distance between the two units' boxes.
    ///
    /// Zero when the boxes touch or overlap.
    #[must_use]
    pub fn distance(&self, other: &Unit) -> u32 {
        let (mine, theirs) = self.record_pair(other);
        self.bounds_of(&mine).distance(&other.bounds_of(&theirs))
    }

    /// Distance from this unit's center to `position`.
    #[must_use]
    pub fn distance_to(&self, position: Position) -> u32 {
        self.position().distance(position)
    }

    /// Center-to-center distance between two units.
    #[must_use]
    pub fn center_distance(&self, other: &Unit) -> u32 {
        let (mine, theirs) = self.record_pair(other);
        mine.position.distance(theirs.position)
    }

    // ========================================================================
    // PREDICATES
    // ========================================================================

    /// Checks whether the unit exists, by the `hit_points > 0` heuristic.
    ///
    /// A unit that died this tick can still report valid for one tick.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.raw_data().hit_points > 0
    }

    /// Valid and finished building.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        let record = self.raw_data();
        record.hit_points > 0 && record.remaining_build_time == 0
    }

    /// Finished building. Does not check validity.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.raw_data().remaining_build_time == 0
    }

    /// Primary order is one of the idle orders.
    ///
    /// Only the primary order is checked. The secondary order runs alongside
    /// it (cloak, build, ...) and does not make a unit busy on its own.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.raw_data().order_id.is_idle()
    }

    /// Building is lifted off.
    #[must_use]
    pub fn is_lifted(&self) -> bool {
        self.raw_data().lifted != 0
    }

    /// Unit is a mineral field.
    #[must_use]
    pub fn is_mineral(&self) -> bool {
        self.raw_data().resource_flags & MINERAL_FLAG != 0
    }

    /// Locally selected. Always `false` while user input is disabled.
    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.ctx.input.user_input_enabled() && self.user_selected.load(Ordering::Relaxed)
    }

    /// Sets the local selection flag. Sends nothing to the host.
    pub fn set_selected(&self, selected: bool) {
        self.user_selected.store(selected, Ordering::Relaxed);
    }

    /// Local visibility flag.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::Relaxed)
    }

    /// Sets the local visibility flag.
    pub fn set_visible(&self, visible: bool) {
        self.visible.store(visible, Ordering::Relaxed);
    }

    // ========================================================================
    // BUILD QUEUE
    // ========================================================================

    /// Recomputes the queue state from the authoritative record and caches
    /// it for this tick.
    pub fn sync_build_queue(&self) -> BuildQueueState {
        let tables = self.ctx.tables.read();
        let raw = tables.record(TableKind::Authoritative, self.index).build_queue;
        self.cache.lock().fill(tables.tick(), TableKind::Authoritative, &raw)
    }

    /// Fills the cache from the local record without touching the
    /// authoritative one.
    pub fn fill_build_queue_cache(&self) -> BuildQueueState {
        let tables = self.ctx.tables.read();
        let raw = tables.record(TableKind::Local, self.index).build_queue;
        self.cache.lock().fill(tables.tick(), TableKind::Local, &raw)
    }

    /// Cached queue state, if it was computed this tick from a queue that
    /// still matches the authoritative record.
    #[must_use]
    pub fn cached_build_queue(&self) -> Option<BuildQueueState> {
        let tables = self.ctx.tables.read();
        let raw = tables.record(TableKind::Authoritative, self.index).build_queue;
        let cache = self.cache.lock();
        let state = cache.get(tables.tick(), &raw);
        if state.is_some() {
            tracing::trace!(unit = self.index.0, source = ?cache.source(), "build queue cache hit");
        }
        state
    }

    /// Queued unit types, oldest first.
    #[must_use]
    pub fn build_queue(&self) -> Vec<UnitType> {
        self.sync_build_queue().queued().to_vec()
    }

    /// Index of the first free queue entry.
    #[must_use]
    pub fn build_queue_slot(&self) -> u8 {
        self.sync_build_queue().slot
    }

    /// Nothing queued.
    #[must_use]
    pub fn has_empty_build_queue(&self) -> bool {
        self.sync_build_queue().empty
    }

    /// Queue at capacity.
    #[must_use]
    pub fn has_full_build_queue(&self) -> bool {
        self.sync_build_queue().full
    }

    // ========================================================================
    // ORDERS
    // ========================================================================

    /// Selects this unit on the host, then issues `order` to the selection.
    fn order_select(&self, order: Command) {
        let select = Command::Select { unit: self.index };
        self.ctx.commands.enqueue_batch(&[select, order]);
    }

    fn order_if_valid(&self, order: Command) {
        if self.is_valid() {
            self.order_select(order);
        } else {
            tracing::debug!(
                unit = self.index.0,
                kind = ?order.kind(),
                "order skipped for invalid unit"
            );
        }
    }

    /// Attacks toward `position` using the given order code.
    pub fn order_attack_location(&self, position: Position, order: OrderId) {
        self.order_select(Command::AttackLocation {
            unit: self.index,
            position,
            order,
        });
    }

    /// Right-clicks a position. The host decides what that means.
    pub fn order_right_click(&self, position: Position) {
        self.order_select(Command::RightClickPosition {
            unit: self.index,
            position,
        });
    }

    /// Right-clicks another unit. The host decides what that means.
    pub fn order_right_click_unit(&self, target: &Unit) {
        self.order_select(Command::RightClickUnit {
            unit: self.index,
            target: target.index,
        });
    }

    /// Queues a unit for training. Skipped if this unit is not valid.
    pub fn train_unit(&self, unit_type: UnitType) {
        self.order_if_valid(Command::Train {
            unit: self.index,
            unit_type,
        });
    }

    /// Places a building at `tile`. Skipped if this unit is not valid.
    pub fn build(&self, tile: TilePosition, unit_type: UnitType) {
        self.order_if_valid(Command::Build {
            unit: self.index,
            tile,
            unit_type,
        });
    }

    /// Researches a tech. Skipped if this unit is not valid.
    pub fn invent(&self, tech: TechType) {
        self.order_if_valid(Command::Invent {
            unit: self.index,
            tech,
        });
    }

    /// Researches an upgrade. Skipped if this unit is not valid.
    pub fn upgrade(&self, upgrade: UpgradeType) {
        self.order_if_valid(Command::Upgrade {
            unit: self.index,
            upgrade,
        });
    }
}

impl fmt::Debug for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unit")
            .field("index", &self.index)
            .field("user_selected", &self.user_selected.load(Ordering::Relaxed))
            .field("visible", &self.visible.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}
