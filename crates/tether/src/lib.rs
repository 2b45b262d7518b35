//! # TETHER
//!
//! Unit proxies over a host engine's unit table.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                              SESSION                                    │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌─────────────────┐     ┌─────────────────┐     ┌─────────────────┐    │
//! │  │  tether_core    │     │  UnitRegistry   │     │  Command        │    │
//! │  │                 │────>│                 │     │  Channel        │    │
//! │  │  • Authoritative│     │  index → Unit   │     │                 │    │
//! │  │  • Mirror       │     │  (one per slot) │     │  Select + order │    │
//! │  │  • Local        │     └────────┬────────┘     └────────▲────────┘    │
//! │  └────────▲────────┘              │                       │             │
//! │           │                       ▼                       │             │
//! │      HostWriter          ┌─────────────────┐              │             │
//! │      (per tick)          │      Unit       │──────────────┘             │
//! │                          │  • projections  │                            │
//! │                          │  • SyncCache    │                            │
//! │                          │  • local flags  │                            │
//! │                          └─────────────────┘                            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `unit`: The per-slot proxy
//! - `registry`: Slot to proxy mapping
//! - `build_queue`: Derived build-queue state and its cache
//! - `command`: Outbound command sink
//! - `session`: Composition root

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod build_queue;
pub mod catalog;
pub mod command;
pub mod config;
pub mod error;
pub mod input;
pub mod registry;
pub mod session;
pub mod unit;

// Re-export the lower layers
pub use tether_core as tables;
pub use tether_shared as shared;

// Re-export commonly used types
pub use build_queue::BuildQueueState;
pub use catalog::{StaticCatalog, UnitTypeCatalog, UnitTypeInfo};
pub use command::{CommandChannel, CommandQueue, CommandSender, SinkStats};
pub use config::{TetherConfig, UnitTypeEntry};
pub use error::{ConfigError, ConfigResult, RegistryError, RegistryResult};
pub use input::InputFlags;
pub use registry::{UnitIter, UnitRegistry};
pub use session::Session;
pub use unit::{Unit, UNKNOWN_TYPE_NAME};
