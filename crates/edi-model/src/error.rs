//! Error types for building element and segment definitions.
//!
//! A `DefinitionError` always means a malformed catalog entry. It is raised
//! while definitions are constructed, never while data is validated.

use thiserror::Error;

/// Errors that can occur when constructing definitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DefinitionError {
    /// Grammar version label is blank.
    #[error("invalid grammar version: '{value}'")]
    InvalidVersion { value: String },

    /// Segment identifier is not 2-3 uppercase alphanumerics starting with a letter.
    #[error("invalid segment identifier: '{value}'")]
    InvalidSegmentId { value: String },

    /// Element code is blank or contains non-alphanumeric characters.
    #[error("invalid element code: '{value}'")]
    InvalidElementCode { value: String },

    /// Element type declares `min > max`.
    #[error("invalid length bounds: min {min} exceeds max {max}")]
    InvalidLengthBounds { min: usize, max: usize },

    /// Element type declares a maximum length of zero.
    #[error("maximum length must be at least 1")]
    ZeroMaxLength,

    /// Identifier element declares an allowed-code list with no codes.
    #[error("identifier code list is empty")]
    EmptyCodeList,

    /// Numeric element declares more implied decimals than supported.
    #[error("implied decimal precision {precision} exceeds 9")]
    InvalidPrecision { precision: u8 },

    /// Numeric element is wider than its parsed value type can hold.
    #[error("{representation} element max length {max} exceeds the supported {limit} digits")]
    UnrepresentableLength {
        representation: String,
        max: usize,
        limit: usize,
    },

    /// Unrecognized element representation code.
    #[error("unknown element type code: '{value}'")]
    UnknownElementKind { value: String },

    /// Unrecognized requirement designator.
    #[error("unknown requirement designator: '{value}'")]
    UnknownRequirement { value: String },

    /// Two elements declared at the same position.
    #[error("segment {segment_id}: duplicate element position {position}")]
    DuplicatePosition { segment_id: String, position: usize },

    /// Element positions do not run 1..=n without gaps.
    #[error("segment {segment_id}: expected element position {expected}, found {found}")]
    NonContiguousPositions {
        segment_id: String,
        expected: usize,
        found: usize,
    },

    /// A situational requirement names a rule the segment does not declare.
    #[error("segment {segment_id}: element {position} references unknown rule {rule}")]
    UnknownRuleReference {
        segment_id: String,
        position: usize,
        rule: String,
    },

    /// A situational requirement names a rule that does not mention its position.
    #[error("segment {segment_id}: rule {rule} does not cover element {position}")]
    SituationalNotCovered {
        segment_id: String,
        position: usize,
        rule: String,
    },

    /// A rule references a position beyond the segment's element list.
    #[error("segment {segment_id}: rule {rule} references position {position} (segment has {len} elements)")]
    RuleOutOfRange {
        segment_id: String,
        rule: String,
        position: usize,
        len: usize,
    },

    /// The same rule is declared twice.
    #[error("segment {segment_id}: duplicate rule {rule}")]
    DuplicateRule { segment_id: String, rule: String },

    /// A rule references fewer than two distinct positions.
    #[error("rule {rule} must reference at least two distinct positions")]
    DegenerateRule { rule: String },

    /// Syntax note text cannot be parsed into a rule.
    #[error("invalid syntax note: '{value}'")]
    InvalidSyntaxNote { value: String },
}

/// Result type for definition construction.
pub type Result<T> = std::result::Result<T, DefinitionError>;
