//! # Configuration
//!
//! Loaded once at startup from TOML.
//!
//! ```toml
//! table_capacity = 1700
//! command_capacity = 1024
//! user_input = false
//!
//! [[unit_types]]
//! id = 0
//! name = "Terran Marine"
//! dimensions = { left = 8, up = 9, right = 8, down = 10 }
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use tether_shared::{UnitDimensions, DEFAULT_COMMAND_CAPACITY, UNIT_TABLE_CAPACITY};

use crate::error::{ConfigError, ConfigResult};

/// One unit type known to the local catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitTypeEntry {
    /// Host type code.
    pub id: u16,
    /// Display name.
    pub name: String,
    /// Box extents from the unit's center.
    pub dimensions: UnitDimensions,
}

/// Session configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TetherConfig {
    /// Slots in each unit table. Must match the host.
    pub table_capacity: usize,
    /// Commands in flight before new ones are dropped.
    pub command_capacity: usize,
    /// Initial state of the user-input flag.
    pub user_input: bool,
    /// Unit types for names and distance boxes.
    pub unit_types: Vec<UnitTypeEntry>,
}

impl Default for TetherConfig {
    fn default() -> Self {
        Self {
            table_capacity: UNIT_TABLE_CAPACITY,
            command_capacity: DEFAULT_COMMAND_CAPACITY,
            user_input: false,
            unit_types: Vec::new(),
        }
    }
}

impl TetherConfig {
    /// Parses and validates a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::Invalid`] if validation fails.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`TetherConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Checks the values are usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a capacity is zero, the table is
    /// larger than a `u16` index can address, or a type id repeats.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.table_capacity == 0 {
            return Err(ConfigError::Invalid("table_capacity must be greater than zero".into()));
        }
        if self.table_capacity > usize::from(u16::MAX) {
            return Err(ConfigError::Invalid(format!(
                "table_capacity {} exceeds {}",
                self.table_capacity,
                u16::MAX
            )));
        }
        if self.command_capacity == 0 {
            return Err(ConfigError::Invalid("command_capacity must be greater than zero".into()));
        }

        let mut seen = HashSet::with_capacity(self.unit_types.len());
        for entry in &self.unit_types {
            if !seen.insert(entry.id) {
                return Err(ConfigError::Invalid(format!("duplicate unit type id {}", entry.id)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = TetherConfig::default();
        assert_eq!(config.table_capacity, 1700);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let text = r#"
            table_capacity = 64
            command_capacity = 16
            user_input = true

            [[unit_types]]
            id = 0
            name = "Terran Marine"
            dimensions = { left = 8, up = 9, right = 8, down = 10 }
        "#;
        let config = TetherConfig::from_toml_str(text).unwrap();
        assert_eq!(config.table_capacity, 64);
        assert!(config.user_input);
        assert_eq!(config.unit_types.len(), 1);
        assert_eq!(config.unit_types[0].dimensions, UnitDimensions::new(8, 9, 8, 10));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = TetherConfig::from_toml_str("user_input = true").unwrap();
        assert_eq!(config.command_capacity, DEFAULT_COMMAND_CAPACITY);
        assert!(config.unit_types.is_empty());
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            TetherConfig::from_toml_str("table_capacity = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            TetherConfig::from_toml_str("table_capacity = 70000"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            TetherConfig::from_toml_str("table_capacity = \"many\""),
            Err(ConfigError::Parse(_))
        ));

        let dup = r#"
            [[unit_types]]
            id = 1
            name = "a"
            dimensions = { left = 1, up = 1, right = 1, down = 1 }
            [[unit_types]]
            id = 1
            name = "b"
            dimensions = { left = 1, up = 1, right = 1, down = 1 }
        "#;
        assert!(matches!(TetherConfig::from_toml_str(dup), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("tether_config_does_not_exist.toml");
        assert!(matches!(TetherConfig::load(&path), Err(ConfigError::Io(_))));
    }
}
