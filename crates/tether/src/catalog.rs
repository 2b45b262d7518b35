//! Unit type lookups needed by the proxies.
//!
//! The full type catalog lives elsewhere. Proxies only need a display name
//! and a box size per type, so that is all this trait asks for.

use std::collections::HashMap;

use tether_shared::{UnitDimensions, UnitType};

use crate::config::UnitTypeEntry;

/// Source of per-type data for unit proxies.
pub trait UnitTypeCatalog: Send + Sync {
    /// Box extents for `unit_type`. Unknown types should report
    /// [`UnitDimensions::POINT`].
    fn dimensions(&self, unit_type: UnitType) -> UnitDimensions;

    /// Display name for `unit_type`, if known.
    fn name(&self, unit_type: UnitType) -> Option<&str>;
}

/// Data held for one type in a [`StaticCatalog`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnitTypeInfo {
    /// Display name.
    pub name: String,
    /// Box extents.
    pub dimensions: UnitDimensions,
}

/// Catalog backed by a fixed map, usually built from config.
#[derive(Clone, Debug, Default)]
pub struct StaticCatalog {
    types: HashMap<UnitType, UnitTypeInfo>,
}

impl StaticCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from config entries.
    #[must_use]
    pub fn from_entries(entries: &[UnitTypeEntry]) -> Self {
        entries.iter().fold(Self::new(), |catalog, entry| {
            catalog.with_type(UnitType(entry.id), entry.name.clone(), entry.dimensions)
        })
    }

    /// Adds or replaces a type.
    #[must_use]
    pub fn with_type(
        mut self,
        unit_type: UnitType,
        name: impl Into<String>,
        dimensions: UnitDimensions,
    ) -> Self {
        self.types.insert(
            unit_type,
            UnitTypeInfo {
                name: name.into(),
                dimensions,
            },
        );
        self
    }

    /// Returns the number of known types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Checks if the catalog has no types.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl UnitTypeCatalog for StaticCatalog {
    fn dimensions(&self, unit_type: UnitType) -> UnitDimensions {
        self.types
            .get(&unit_type)
            .map_or(UnitDimensions::POINT, |info| info.dimensions)
    }

    fn name(&self, unit_type: UnitType) -> Option<&str> {
        self.types.get(&unit_type).map(|info| info.name.as_str())
    }
}
