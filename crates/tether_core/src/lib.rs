//! # TETHER Core
//!
//! Host unit tables, decoded and published one tick at a time.
//!
//! ## Architecture Rules
//!
//! 1. **The host owns the data** - tables are replaced whole, never patched by readers
//! 2. **Fixed layout** - one record per slot, checked against the host contract
//! 3. **Reads never fail** - a dead or unknown slot reads as an empty record
//!
//! ## Example
//!
//! ```rust,ignore
//! use tether_core::{HostWriter, UnitTables, TableKind};
//!
//! let tables = UnitTables::shared(1700);
//! let writer = HostWriter::new(tables.clone());
//! writer.advance_bytes(&frame_bytes, head)?;
//!
//! let hp = tables.read().record(TableKind::Authoritative, index).hit_points;
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod error;
pub mod sync;
pub mod table;

pub use error::{TableError, TableResult};
pub use sync::{HostWriter, SharedTables, TableKind, UnitTables};
pub use table::{RecordCursor, RecordLink, UnitRecord, UnitTable, MINERAL_FLAG};
