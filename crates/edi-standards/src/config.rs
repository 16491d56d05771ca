//! Configuration for loading compiled-in catalogs.

use serde::{Deserialize, Serialize};

use crate::catalog::KNOWN_VERSIONS;

/// Which grammar versions to load into a [`crate::VersionRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Version labels to load, in order.
    pub versions: Vec<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            versions: KNOWN_VERSIONS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl CatalogConfig {
    /// Create config with no versions selected.
    pub fn empty() -> Self {
        Self {
            versions: Vec::new(),
        }
    }

    /// Create config for a single version.
    pub fn only(version: impl Into<String>) -> Self {
        Self {
            versions: vec![version.into()],
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        let version = version.into();
        if !self.versions.contains(&version) {
            self.versions.push(version);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_selects_every_known_version() {
        let config = CatalogConfig::default();
        assert_eq!(config.versions, vec!["004010", "005010"]);
    }

    #[test]
    fn with_version_skips_duplicates() {
        let config = CatalogConfig::only("005010")
            .with_version("005010")
            .with_version("004010");
        assert_eq!(config.versions, vec!["005010", "004010"]);
    }
}
