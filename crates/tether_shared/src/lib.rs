//! # TETHER Shared
//!
//! Value types used by both the table layer and the unit proxies.
//!
//! ## CRITICAL RULE
//!
//! Every type here is plain data. Nothing in this crate knows where a
//! record lives or when the host overwrites it.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
pub mod math;
pub mod protocol;
pub mod types;

pub use constants::{BUILD_QUEUE_CAPACITY, DEFAULT_COMMAND_CAPACITY, UNIT_TABLE_CAPACITY};
pub use math::{Bounds, Position, TilePosition, UnitDimensions};
pub use protocol::{Command, CommandKind};
pub use types::{OrderId, PlayerId, TechType, UnitIndex, UnitType, UpgradeType};
