//! # Session
//!
//! Composition root: builds the tables, registry, command channel and input
//! flags from one [`TetherConfig`] and drives the tick.
//!
//! ```text
//! Tick N:
//! ┌───────────────────────────────────────────────────────────────┐
//! │ 1. HOST PUBLISH                                               │
//! │    └─ session.advance(frame, head)                            │
//! │       (mirror ← old authoritative, local ← frame)             │
//! │                                                               │
//! │ 2. QUERIES / ORDERS                                           │
//! │    ├─ registry.proxy(i).position(), .is_idle(), ...           │
//! │    └─ registry.proxy(i).train_unit(..) → command channel      │
//! │                                                               │
//! │ 3. HOST DRAIN                                                 │
//! │    └─ session.commands().drain() → applied during tick N+1    │
//! └───────────────────────────────────────────────────────────────┘
//! ```

use std::path::Path;
use std::sync::Arc;

use tether_core::{HostWriter, RecordLink, TableResult, UnitTable, UnitTables};

use crate::catalog::{StaticCatalog, UnitTypeCatalog};
use crate::command::{CommandChannel, CommandQueue};
use crate::config::TetherConfig;
use crate::error::ConfigResult;
use crate::input::InputFlags;
use crate::registry::UnitRegistry;

/// Everything one attached session needs.
pub struct Session {
    registry: Arc<UnitRegistry>,
    writer: HostWriter,
    commands: CommandQueue,
    input: Arc<InputFlags>,
}

impl Session {
    /// Builds a session whose catalog comes from the config's unit types.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`](crate::ConfigError::Invalid) if the
    /// config does not validate.
    pub fn new(config: &TetherConfig) -> ConfigResult<Self> {
        let catalog = StaticCatalog::from_entries(&config.unit_types);
        Self::with_catalog(config, Arc::new(catalog))
    }

    /// Builds a session with a caller-supplied catalog.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`](crate::ConfigError::Invalid) if the
    /// config does not validate.
    pub fn with_catalog(
        config: &TetherConfig,
        catalog: Arc<dyn UnitTypeCatalog>,
    ) -> ConfigResult<Self> {
        config.validate()?;

        let tables = UnitTables::shared(config.table_capacity);
        let input = Arc::new(InputFlags::new(config.user_input));
        let (sender, commands) = CommandChannel::create_pair(config.command_capacity);
        let registry = UnitRegistry::new(Arc::clone(&tables), catalog, Arc::clone(&input), sender);

        tracing::info!(
            table_capacity = config.table_capacity,
            command_capacity = config.command_capacity,
            user_input = config.user_input,
            "session started"
        );

        Ok(Self {
            registry,
            writer: HostWriter::new(tables),
            commands,
            input,
        })
    }

    /// Loads a config file and builds a session from it.
    ///
    /// # Errors
    ///
    /// Returns any error from [`TetherConfig::load`].
    pub fn from_config_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let config = TetherConfig::load(path)?;
        Self::new(&config)
    }

    /// Returns the proxy registry.
    #[must_use]
    pub fn registry(&self) -> &Arc<UnitRegistry> {
        &self.registry
    }

    /// Returns the host-side table writer.
    #[must_use]
    pub fn writer(&self) -> &HostWriter {
        &self.writer
    }

    /// Returns the host-side command queue.
    #[must_use]
    pub fn commands(&self) -> &CommandQueue {
        &self.commands
    }

    /// Returns the input mode flags.
    #[must_use]
    pub fn input(&self) -> &InputFlags {
        &self.input
    }

    /// Returns the current tick.
    #[must_use]
    pub fn tick(&self) -> u64 {
        self.writer.tables().read().tick()
    }

    /// Publishes a decoded host frame.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::CapacityMismatch`](tether_core::TableError) if
    /// the frame size differs from the configured capacity.
    pub fn advance(&self, frame: UnitTable, head: RecordLink) -> TableResult<u64> {
        self.writer.advance(frame, head)
    }

    /// Decodes and publishes a raw host frame.
    ///
    /// # Errors
    ///
    /// Returns any decode or capacity error from
    /// [`HostWriter::advance_bytes`].
    pub fn advance_bytes(&self, bytes: &[u8], head: RecordLink) -> TableResult<u64> {
        self.writer.advance_bytes(bytes, head)
    }
}
