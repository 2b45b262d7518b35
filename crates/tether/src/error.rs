//! # Error Types
//!
//! Queries on a unit never fail. The errors here come from setup (loading a
//! config) and from handing the registry a handle that cannot exist.

use thiserror::Error;

/// Errors raised while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config parsed but holds unusable values.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Errors raised by registry lookups.
///
/// Both variants are programmer errors: a handle that does not address a
/// slot was passed in. The panicking lookups treat them as fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Handle was the null link.
    #[error("null unit handle")]
    NullHandle,

    /// Handle addresses a slot past the end of the table.
    #[error("unit handle {index} out of range (capacity {capacity})")]
    HandleOutOfRange {
        /// Decoded slot index.
        index: u16,
        /// Table capacity.
        capacity: usize,
    },
}

/// Result type for config operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for registry lookups.
pub type RegistryResult<T> = Result<T, RegistryError>;
