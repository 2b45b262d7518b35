//! # Host Contract Constants
//!
//! **CRITICAL:** These values mirror the host engine's memory layout.
//! Changing any of them is a breaking change for every record decoder.

// =============================================================================
// TABLE LAYOUT
// =============================================================================

/// Number of slots in the host's unit table.
pub const UNIT_TABLE_CAPACITY: usize = 1700;

/// Number of entries in a unit's build queue.
pub const BUILD_QUEUE_CAPACITY: usize = 5;

// =============================================================================
// COMMAND SINK
// =============================================================================

/// Commands in flight before the sink starts dropping.
pub const DEFAULT_COMMAND_CAPACITY: usize = 1024;
