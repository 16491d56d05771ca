//! Declarative model for versioned positional segment grammars.
//!
//! This crate describes *what* a segment looks like; it carries no
//! validation logic of its own:
//!
//! - [`element`]: element representations ([`ElementType`]) and shared
//!   [`ElementDefinition`]s
//! - [`requirement`]: per-position [`Requirement`] designators
//! - [`rule`]: segment-level [`ConditionalRule`]s (X12 syntax notes)
//! - [`segment`]: immutable [`SegmentDefinition`]s and their builder
//! - [`raw`]: tokenized [`RawSegment`] input
//! - [`value`]: typed [`ElementValue`]s and [`ValidatedRecord`] output

pub mod element;
pub mod error;
pub mod ids;
pub mod raw;
pub mod requirement;
pub mod rule;
pub mod segment;
pub mod value;

pub use element::{
    CodeList, ElementDefinition, ElementKind, ElementType, MAX_DECIMAL_DIGITS,
    MAX_IMPLIED_DECIMALS, MAX_NUMERIC_DIGITS, Representation,
};
pub use error::{DefinitionError, Result};
pub use ids::{ElementCode, SegmentId, Version};
pub use raw::{RawSegment, RawToken};
pub use requirement::Requirement;
pub use rule::ConditionalRule;
pub use segment::{ElementUse, SegmentDefinition, SegmentDefinitionBuilder};
pub use value::{ElementValue, RecordField, ValidatedRecord};
