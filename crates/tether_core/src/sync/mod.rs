//! # Tick Synchronization
//!
//! The host overwrites its unit array once per simulation tick. Everything
//! in this crate reads between ticks, never during one.
//!
//! ## The Problem
//!
//! ```text
//! Host:     writes frame N+1 ──────────────►
//! Proxies:          reads frame N?  N+1?  half of each?
//!
//! Without a tick boundary: TORN READ
//! ```
//!
//! ## The Solution: Publish Whole Frames
//!
//! ```text
//! Tick N:
//!   Host publishes frame N      (authoritative ← N, mirror ← N-1)
//!   Proxies read                (every read sees frame N)
//!
//! Tick N+1:
//!   Host publishes frame N+1
//! ```

mod tables;

pub use tables::{HostWriter, SharedTables, TableKind, UnitTables};
