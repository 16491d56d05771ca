//! Validation of tokenized segments against versioned definitions.
//!
//! A segment is checked in two passes. The structural pass walks the
//! definition's element list, checking presence of mandatory elements,
//! length and representation of each present token (component by component
//! for composites), then flags tokens past the last defined element. The
//! conditional pass evaluates the segment's syntax notes against token
//! presence. Neither pass stops at the first problem.
//!
//! A segment with no violations yields a [`ValidatedRecord`](edi_model::ValidatedRecord)
//! holding every present element parsed into its semantic type. Otherwise
//! the full, ordered violation list is returned and no record is built.
//!
//! ```rust
//! use edi_model::RawSegment;
//! use edi_standards::{CatalogConfig, VersionRegistry};
//! use edi_validate::Validator;
//!
//! let registry = VersionRegistry::load(&CatalogConfig::default())?;
//! let validator = Validator::new(&registry);
//!
//! let raw = RawSegment::from_values("REF", ["EI", "123456789"]);
//! let outcome = validator.validate("005010", &raw)?;
//! assert!(outcome.is_valid());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod assemble;
mod conditional;
pub mod options;
mod structural;
pub mod syntax;
pub mod validator;
pub mod violation;

pub use options::{CodeMatchingMode, ValidationOptions};
pub use syntax::TypeFailure;
pub use validator::{SegmentOutcome, Validator, validate_segment};
pub use violation::{Violation, ViolationKind};
