//! Command protocol consumed by the host at its next tick boundary.
//!
//! These records describe *what* was ordered. How they are encoded for the
//! host is the command sink's business.

use serde::{Deserialize, Serialize};

use crate::math::{Position, TilePosition};
use crate::types::{OrderId, TechType, UnitIndex, UnitType, UpgradeType};

/// Command kind discriminator
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandKind {
    /// Replace the host selection
    Select = 0,
    /// Attack a location
    AttackLocation = 1,
    /// Contextual click on the ground
    RightClickPosition = 2,
    /// Contextual click on a unit
    RightClickUnit = 3,
    /// Queue a unit for training
    Train = 4,
    /// Place a building
    Build = 5,
    /// Start researching a tech
    Invent = 6,
    /// Start an upgrade
    Upgrade = 7,
}

/// One order for the host.
///
/// Every variant names the issuing unit so the sink can keep per-unit FIFO
/// order and the host can attribute the command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Select `unit`, dropping any previous host selection.
    Select {
        /// Unit to select.
        unit: UnitIndex,
    },

    /// Attack the ground at `position`.
    AttackLocation {
        /// Issuing unit.
        unit: UnitIndex,
        /// Target location.
        position: Position,
        /// Which interpretation of "attack here" the host should apply.
        order: OrderId,
    },

    /// Right click on the ground. Always resolves to a move on the host.
    RightClickPosition {
        /// Issuing unit.
        unit: UnitIndex,
        /// Clicked location.
        position: Position,
    },

    /// Right click on a unit. The host decides between attack, gather,
    /// follow and rally.
    RightClickUnit {
        /// Issuing unit.
        unit: UnitIndex,
        /// Clicked unit.
        target: UnitIndex,
    },

    /// Train a unit.
    Train {
        /// Producing unit.
        unit: UnitIndex,
        /// Type to train.
        unit_type: UnitType,
    },

    /// Construct a building.
    Build {
        /// Worker issuing the build.
        unit: UnitIndex,
        /// Top-left tile of the building.
        tile: TilePosition,
        /// Building type.
        unit_type: UnitType,
    },

    /// Research a tech.
    Invent {
        /// Researching building.
        unit: UnitIndex,
        /// Tech to research.
        tech: TechType,
    },

    /// Research an upgrade.
    Upgrade {
        /// Researching building.
        unit: UnitIndex,
        /// Upgrade to research.
        upgrade: UpgradeType,
    },
}

impl Command {
    /// Returns the discriminator for this command.
    #[must_use]
    pub const fn kind(&self) -> CommandKind {
        match self {
            Self::Select { .. } => CommandKind::Select,
            Self::AttackLocation { .. } => CommandKind::AttackLocation,
            Self::RightClickPosition { .. } => CommandKind::RightClickPosition,
            Self::RightClickUnit { .. } => CommandKind::RightClickUnit,
            Self::Train { .. } => CommandKind::Train,
            Self::Build { .. } => CommandKind::Build,
            Self::Invent { .. } => CommandKind::Invent,
            Self::Upgrade { .. } => CommandKind::Upgrade,
        }
    }

    /// Returns the unit that issued this command.
    #[must_use]
    pub const fn unit(&self) -> UnitIndex {
        match *self {
            Self::Select { unit }
            | Self::AttackLocation { unit, .. }
            | Self::RightClickPosition { unit, .. }
            | Self::RightClickUnit { unit, .. }
            | Self::Train { unit, .. }
            | Self::Build { unit, .. }
            | Self::Invent { unit, .. }
            | Self::Upgrade { unit, .. } => unit,
        }
    }
}
