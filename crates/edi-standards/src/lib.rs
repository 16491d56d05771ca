//! Segment grammar versions and their catalogs.
//!
//! This crate provides:
//!
//! - **Version registry** mapping `(version, segment id)` to definitions,
//!   sealed after a build phase so lookups need no locking
//! - **Compiled-in catalogs** for the `004010` and `005010` grammars
//! - **Catalog documents** for declaring segments in JSON
//!
//! # Module Organization
//!
//! - [`registry`]: [`RegistryBuilder`] and [`VersionRegistry`]
//! - [`catalog`]: compiled-in declarations per version
//! - [`document`]: JSON catalog documents
//! - [`config`]: which catalogs to load
//! - [`error`]: registry and catalog errors
//!
//! # Example
//!
//! ```rust
//! use edi_standards::{CatalogConfig, VersionRegistry};
//!
//! let registry = VersionRegistry::load(&CatalogConfig::only("005010"))?;
//! let sv6 = registry.lookup("005010", "SV6")?;
//! assert_eq!(sv6.name(), "Anesthesia Service");
//! assert!(sv6.is_empty());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod catalog;
pub mod config;
pub mod document;
pub mod error;
pub mod registry;

pub use catalog::{KNOWN_VERSIONS, X12_004010, X12_005010};
pub use config::CatalogConfig;
pub use document::{CatalogDocument, ElementDeclaration, ElementUseDeclaration, SegmentDeclaration};
pub use error::{CatalogError, RegistryError, Result};
pub use registry::{RegistryBuilder, VersionRegistry};
