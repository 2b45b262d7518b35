//! # Raw Unit Record
//!
//! One slot of the host's unit table, field for field.
//!
//! The host overwrites these every tick. A record for a dead or never-used
//! slot is still a valid value: every field decodes, it just means nothing.
//! Validity is the proxy's call, not the record's.

use bytemuck::{Pod, Zeroable};

use tether_shared::{
    OrderId, PlayerId, Position, TilePosition, UnitIndex, UnitType, BUILD_QUEUE_CAPACITY,
};

/// Reference from one record to another slot.
///
/// The host stores `index + 1`, with `0` meaning no unit. Links are decoded
/// to an index once; the index is never derived from the link's position
/// in memory.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct RecordLink(pub u16);

impl RecordLink {
    /// No unit.
    pub const NULL: Self = Self(0);

    /// Link pointing at `index`.
    ///
    /// The last index has no link encoding and maps to `NULL`.
    #[inline]
    #[must_use]
    pub const fn to(index: UnitIndex) -> Self {
        match index.0.checked_add(1) {
            Some(raw) => Self(raw),
            None => Self::NULL,
        }
    }

    /// Checks if this link is null.
    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Decodes the link to a slot index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> Option<UnitIndex> {
        match self.0 {
            0 => None,
            raw => Some(UnitIndex(raw - 1)),
        }
    }
}

/// Bit in [`UnitRecord::resource_flags`] marking a mineral field.
pub const MINERAL_FLAG: u8 = 0x01;

/// Fixed-layout unit record.
///
/// Layout (56 bytes, 4-byte aligned):
///
/// ```text
/// 0   unit_type            u16      2   hit_points          u16
/// 4   max_hit_points       u16      6   remaining_build_time u16
/// 8   shield_points        u32     12   max_shield_points   u32
/// 16  position             i16x2   20   target_position     i16x2
/// 24  tile_position        u16x2   28   target              link
/// 30  order_target         link    32   build_unit          link
/// 34  child                link    36   next                link
/// 38  build_queue          u16x5   48   owner               u8
/// 49  order_id             u8      50   secondary_order_id  u8
/// 51  order_timer          u8      52   build_queue_slot    u8
/// 53  lifted               u8      54   resource_flags      u8
/// 55  padding
/// ```
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct UnitRecord {
    /// Unit type code.
    pub unit_type: UnitType,
    /// Current hit points.
    pub hit_points: u16,
    /// Maximum hit points.
    pub max_hit_points: u16,
    /// Frames until construction finishes. Zero once complete.
    pub remaining_build_time: u16,
    /// Current shield points.
    pub shield_points: u32,
    /// Maximum shield points.
    pub max_shield_points: u32,
    /// Center position in pixels.
    pub position: Position,
    /// Destination of the current order.
    pub target_position: Position,
    /// Tile under the unit.
    pub tile_position: TilePosition,
    /// Current attack target.
    pub target: RecordLink,
    /// Target of the current order.
    pub order_target: RecordLink,
    /// Unit this one is constructing.
    pub build_unit: RecordLink,
    /// Linked unit (addon, nuke, ...).
    pub child: RecordLink,
    /// Next record in the host's unit list.
    pub next: RecordLink,
    /// Queued unit types. Unused entries hold `UnitType::NONE`.
    pub build_queue: [UnitType; BUILD_QUEUE_CAPACITY],
    /// Owning player.
    pub owner: PlayerId,
    /// Primary order.
    pub order_id: OrderId,
    /// Secondary order.
    pub secondary_order_id: OrderId,
    /// Frames left on the current order step.
    pub order_timer: u8,
    /// Host's own build queue cursor.
    pub build_queue_slot: u8,
    /// Non-zero while a building is lifted off.
    pub lifted: u8,
    /// Resource classification bits.
    pub resource_flags: u8,
    /// Padding for alignment.
    pub _padding: u8,
}

impl UnitRecord {
    /// Size of one record in the host table.
    pub const SIZE: usize = std::mem::size_of::<Self>();

    /// A never-populated slot: no health, no type, empty queue.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            unit_type: UnitType::NONE,
            build_queue: [UnitType::NONE; BUILD_QUEUE_CAPACITY],
            ..Self::zeroed()
        }
    }
}

impl Default for UnitRecord {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_layout() {
        assert_eq!(UnitRecord::SIZE, 56);
        assert_eq!(std::mem::align_of::<UnitRecord>(), 4);
    }

    #[test]
    fn test_link_encoding() {
        assert_eq!(RecordLink::NULL.index(), None);
        assert!(RecordLink::NULL.is_null());

        let link = RecordLink::to(UnitIndex(0));
        assert_eq!(link, RecordLink(1));
        assert_eq!(link.index(), Some(UnitIndex(0)));

        assert_eq!(RecordLink::to(UnitIndex(u16::MAX)), RecordLink::NULL);
    }

    #[test]
    fn test_empty_record_is_dead() {
        let record = UnitRecord::empty();
        assert_eq!(record.hit_points, 0);
        assert!(record.unit_type.is_none());
        assert!(record.build_queue.iter().all(|t| t.is_none()));
    }
}
