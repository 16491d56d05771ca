//! Version registry: `(version, segment id) -> SegmentDefinition`.
//!
//! Definitions are registered during a build phase through
//! [`RegistryBuilder`]; [`RegistryBuilder::build`] seals them into a
//! [`VersionRegistry`], which has no mutating methods and can be shared
//! across validation threads without locking.

use std::collections::BTreeMap;
use std::sync::Arc;

use edi_model::{ElementCode, ElementDefinition, SegmentDefinition, SegmentId, Version};
use tracing::{debug, info};

use crate::catalog;
use crate::config::CatalogConfig;
use crate::error::{CatalogError, RegistryError};

#[derive(Debug, Clone, Default)]
struct VersionEntry {
    segments: BTreeMap<SegmentId, Arc<SegmentDefinition>>,
    elements: BTreeMap<ElementCode, Arc<ElementDefinition>>,
}

/// Collects segment definitions before the registry is sealed.
#[derive(Debug, Clone, Default)]
pub struct RegistryBuilder {
    versions: BTreeMap<Version, VersionEntry>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition under a grammar version.
    ///
    /// # Errors
    ///
    /// Fails without registering anything if the segment is already
    /// registered for the version or if one of its element codes is already
    /// bound to a different definition in that version.
    pub fn register(
        &mut self,
        version: &str,
        definition: impl Into<Arc<SegmentDefinition>>,
    ) -> Result<&mut Self, RegistryError> {
        let definition = definition.into();
        let version = Version::new(version).map_err(|_| RegistryError::InvalidVersion {
            value: version.to_string(),
        })?;
        let entry = self.versions.entry(version.clone()).or_default();

        if entry.segments.contains_key(definition.id()) {
            return Err(RegistryError::DuplicateDefinition {
                version: version.to_string(),
                segment_id: definition.id().to_string(),
            });
        }
        for element in definition.elements() {
            let candidate = element.definition();
            if let Some(existing) = entry.elements.get(candidate.code())
                && existing != candidate
            {
                return Err(RegistryError::ConflictingElement {
                    version: version.to_string(),
                    segment_id: definition.id().to_string(),
                    code: candidate.code().to_string(),
                });
            }
        }

        for element in definition.elements() {
            let candidate = element.definition();
            entry
                .elements
                .entry(candidate.code().clone())
                .or_insert_with(|| Arc::clone(candidate));
        }
        debug!(
            version = %version,
            segment = %definition.id(),
            elements = definition.len(),
            rules = definition.rules().len(),
            "registered segment definition"
        );
        entry
            .segments
            .insert(definition.id().clone(), definition);
        Ok(self)
    }

    /// Register several definitions under one version, all or nothing.
    ///
    /// # Errors
    ///
    /// Fails on the first definition [`register`](Self::register) would
    /// reject, counting the ones before it, and leaves the builder as it was.
    pub fn register_all<I>(&mut self, version: &str, definitions: I) -> Result<&mut Self, RegistryError>
    where
        I: IntoIterator,
        I::Item: Into<Arc<SegmentDefinition>>,
    {
        let mut staged = self.clone();
        for definition in definitions {
            staged.register(version, definition)?;
        }
        *self = staged;
        Ok(self)
    }

    /// Seal the registry.
    pub fn build(self) -> VersionRegistry {
        let registry = VersionRegistry {
            versions: self.versions,
        };
        info!(
            versions = registry.versions.len(),
            segments = registry.len(),
            "version registry sealed"
        );
        registry
    }
}

/// Immutable mapping from grammar version and segment id to definitions.
#[derive(Debug, Clone, Default)]
pub struct VersionRegistry {
    versions: BTreeMap<Version, VersionEntry>,
}

impl VersionRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Build a registry from the compiled-in catalogs selected by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if a requested version has no catalog or if a
    /// catalog declaration is malformed.
    pub fn load(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let mut builder = RegistryBuilder::new();
        for version in &config.versions {
            catalog::declare(version, &mut builder)?;
        }
        Ok(builder.build())
    }

    /// Load every compiled-in catalog.
    pub fn load_all() -> Result<Self, CatalogError> {
        Self::load(&CatalogConfig::default())
    }

    /// Look up a segment definition for a version.
    ///
    /// Returns the same `Arc` that was passed to `register`.
    pub fn lookup(
        &self,
        version: &str,
        segment_id: &str,
    ) -> Result<&Arc<SegmentDefinition>, RegistryError> {
        self.resolve(version, segment_id)
            .map(|(_, definition)| definition)
    }

    /// Like [`lookup`](Self::lookup), also returning the registered version key.
    pub fn resolve(
        &self,
        version: &str,
        segment_id: &str,
    ) -> Result<(&Version, &Arc<SegmentDefinition>), RegistryError> {
        let (version, segment_id) = (version.trim(), segment_id.trim());
        self.versions
            .get_key_value(version)
            .and_then(|(key, entry)| Some((key, entry.segments.get(segment_id)?)))
            .ok_or_else(|| RegistryError::UnknownSegment {
                version: version.to_string(),
                segment_id: segment_id.to_string(),
            })
    }

    pub fn contains(&self, version: &str, segment_id: &str) -> bool {
        self.lookup(version, segment_id).is_ok()
    }

    /// Element definition bound to a code within a version.
    pub fn element(&self, version: &str, code: &str) -> Option<&Arc<ElementDefinition>> {
        self.versions
            .get(version.trim())
            .and_then(|entry| entry.elements.get(code.trim()))
    }

    /// Registered versions in ascending order.
    pub fn versions(&self) -> impl Iterator<Item = &Version> {
        self.versions.keys()
    }

    /// Segment definitions registered for a version, by segment id.
    pub fn segments(&self, version: &str) -> impl Iterator<Item = &Arc<SegmentDefinition>> {
        self.versions
            .get(version.trim())
            .into_iter()
            .flat_map(|entry| entry.segments.values())
    }

    /// Total number of registered definitions across all versions.
    pub fn len(&self) -> usize {
        self.versions
            .values()
            .map(|entry| entry.segments.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
