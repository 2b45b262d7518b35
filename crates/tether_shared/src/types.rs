//! Type codes stored in host records.
//!
//! Each code is a transparent newtype over the raw integer so a record can
//! hold it directly while callers still get a distinct type. Unknown codes
//! are carried as-is; nothing here rejects a value the host wrote.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Stable 0-based slot index into the unit tables.
///
/// The same index addresses the authoritative, mirror and local tables,
/// so it is the only key used to join them.
#[repr(transparent)]
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Pod, Zeroable,
    Serialize, Deserialize,
)]
pub struct UnitIndex(pub u16);

impl UnitIndex {
    /// Returns the index as a `usize` for slice access.
    #[inline]
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// Unit type code.
#[repr(transparent)]
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize,
)]
pub struct UnitType(pub u16);

impl UnitType {
    /// Marker for "no type", used for unused build queue entries.
    pub const NONE: Self = Self(228);

    /// Checks if this is the `NONE` marker.
    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == Self::NONE.0
    }
}

impl Default for UnitType {
    fn default() -> Self {
        Self::NONE
    }
}

/// Order code held in a unit's primary and secondary order slots.
#[repr(transparent)]
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize,
)]
pub struct OrderId(pub u8);

impl OrderId {
    /// Unit is dying.
    pub const DIE: Self = Self(0);
    /// Stopped.
    pub const STOP: Self = Self(1);
    /// Computer-controlled guard.
    pub const GUARD: Self = Self(2);
    /// Player-controlled guard. What an idle player unit sits in.
    pub const PLAYER_GUARD: Self = Self(3);
    /// Moving to a location.
    pub const MOVE: Self = Self(6);
    /// Attack-move to a location.
    pub const ATTACK_MOVE: Self = Self(14);
    /// Explicit no-op.
    pub const NOTHING: Self = Self(23);
    /// Training a unit.
    pub const TRAIN: Self = Self(38);

    /// Checks if the order is one of the host's idle sentinels.
    #[inline]
    #[must_use]
    pub const fn is_idle(self) -> bool {
        matches!(
            self,
            Self::STOP | Self::GUARD | Self::PLAYER_GUARD | Self::NOTHING
        )
    }
}

/// Tech (research) code.
#[repr(transparent)]
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize,
)]
pub struct TechType(pub u8);

/// Upgrade code.
#[repr(transparent)]
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize,
)]
pub struct UpgradeType(pub u8);

/// Owning player slot.
#[repr(transparent)]
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize,
)]
pub struct PlayerId(pub u8);
