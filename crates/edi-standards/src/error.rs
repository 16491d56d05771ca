//! Error types for registry and catalog operations.

use edi_model::DefinitionError;
use thiserror::Error;

/// Errors raised by [`crate::RegistryBuilder`] and [`crate::VersionRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum RegistryError {
    /// `(version, segment)` is already registered.
    #[error("segment {segment_id} is already registered for version {version}")]
    DuplicateDefinition { version: String, segment_id: String },

    /// The version label is blank.
    #[error("invalid grammar version: {value:?}")]
    InvalidVersion { value: String },

    /// No definition of the segment exists for the version.
    #[error("segment {segment_id} is not defined for version {version}")]
    UnknownSegment { version: String, segment_id: String },

    /// The segment binds an element code to a definition that differs from
    /// the one already registered under that code for the version.
    #[error(
        "segment {segment_id} redefines element {code} differently from version {version}'s existing definition"
    )]
    ConflictingElement {
        version: String,
        segment_id: String,
        code: String,
    },
}

/// Errors that can occur when loading catalogs.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    /// A declaration produced a malformed definition.
    #[error(transparent)]
    Definition(#[from] DefinitionError),

    /// Registering a declared segment failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// No compiled-in catalog exists for the version.
    #[error("unsupported grammar version: {version}")]
    UnsupportedVersion { version: String },

    /// A segment declaration uses an element code the document never declares.
    #[error("segment {segment_id} uses undeclared element {code}")]
    UndeclaredElement { segment_id: String, code: String },

    /// The document declares the same element code more than once.
    #[error("element {code} is declared more than once")]
    DuplicateElement { code: String },

    /// Allowed codes were declared on a non-identifier element.
    #[error("element {code} declares allowed codes but is not an identifier")]
    CodesOnNonIdentifier { code: String },

    /// The catalog document is not valid JSON for the expected shape.
    #[error("failed to parse catalog document: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for catalog loading operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
