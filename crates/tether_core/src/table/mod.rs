//! # Host Unit Tables
//!
//! The raw record layout and the fixed-capacity table that holds it.
//!
//! ## Design Philosophy
//!
//! - Layout is fixed and checked by tests; changing it breaks the host contract
//! - Records are decoded by copy, never by reinterpreting foreign memory in place
//! - Slot indices are the only identity; links are decoded to indices

mod record;
mod unit_table;

pub use record::{RecordLink, UnitRecord, MINERAL_FLAG};
pub use unit_table::{RecordCursor, UnitTable};
