//! Validation findings.
//!
//! Each [`ViolationKind`] carries only the data it needs. A [`Violation`]
//! pins a kind to a segment, element position and, for composites, a
//! component position.

use std::fmt;

use edi_model::{ConditionalRule, Representation, SegmentId};
use serde::{Deserialize, Serialize};

use crate::syntax::TypeFailure;

/// What went wrong.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationKind {
    // Structural
    /// A mandatory element is absent.
    MissingRequiredElement,
    /// Measured length falls outside the element's bounds.
    LengthViolation {
        min: usize,
        max: usize,
        actual: usize,
    },
    /// The value does not have the element's representation.
    TypeViolation {
        expected: Representation,
        failure: TypeFailure,
        value: String,
    },
    /// A component of a composite failed a length or type check.
    SubElementViolation { detail: Box<ViolationKind> },
    /// A token appears past the last defined element.
    UnexpectedElement { defined: usize },

    // Conditional
    /// Some but not all of a paired group are present.
    PairedConditionViolation { positions: Vec<usize> },
    /// None of a required-group is present.
    AtLeastOneViolation { positions: Vec<usize> },
    /// More than one of an exclusion group is present.
    ExclusiveViolation { positions: Vec<usize> },
    /// The condition element is present but dependents are missing.
    ConditionalRequirementViolation {
        if_position: usize,
        missing: Vec<usize>,
    },
    /// A dependent is present without the first element.
    ListConditionalViolation {
        first_position: usize,
        present: Vec<usize>,
    },
}

impl ViolationKind {
    /// X12 implementation acknowledgment element error code.
    pub fn ack_code(&self) -> &'static str {
        match self {
            ViolationKind::MissingRequiredElement => "1",
            ViolationKind::PairedConditionViolation { .. }
            | ViolationKind::AtLeastOneViolation { .. }
            | ViolationKind::ConditionalRequirementViolation { .. }
            | ViolationKind::ListConditionalViolation { .. } => "2",
            ViolationKind::UnexpectedElement { .. } => "3",
            ViolationKind::LengthViolation { min, actual, .. } if actual < min => "4",
            ViolationKind::LengthViolation { .. } => "5",
            ViolationKind::TypeViolation { failure, .. } => failure.ack_code(),
            ViolationKind::ExclusiveViolation { .. } => "10",
            ViolationKind::SubElementViolation { detail } => detail.ack_code(),
        }
    }

    /// Short stable label for reports.
    pub fn label(&self) -> &'static str {
        match self {
            ViolationKind::MissingRequiredElement => "MissingRequiredElement",
            ViolationKind::LengthViolation { .. } => "LengthViolation",
            ViolationKind::TypeViolation { .. } => "TypeViolation",
            ViolationKind::SubElementViolation { .. } => "SubElementViolation",
            ViolationKind::UnexpectedElement { .. } => "UnexpectedElement",
            ViolationKind::PairedConditionViolation { .. } => "PairedConditionViolation",
            ViolationKind::AtLeastOneViolation { .. } => "AtLeastOneViolation",
            ViolationKind::ExclusiveViolation { .. } => "ExclusiveViolation",
            ViolationKind::ConditionalRequirementViolation { .. } => {
                "ConditionalRequirementViolation"
            }
            ViolationKind::ListConditionalViolation { .. } => "ListConditionalViolation",
        }
    }

    /// Whether the finding comes from a conditional rule.
    pub fn is_conditional(&self) -> bool {
        matches!(
            self,
            ViolationKind::PairedConditionViolation { .. }
                | ViolationKind::AtLeastOneViolation { .. }
                | ViolationKind::ExclusiveViolation { .. }
                | ViolationKind::ConditionalRequirementViolation { .. }
                | ViolationKind::ListConditionalViolation { .. }
        )
    }

    fn describe(&self) -> String {
        match self {
            ViolationKind::MissingRequiredElement => "mandatory element is missing".to_string(),
            ViolationKind::LengthViolation { min, actual, .. } if actual < min => {
                format!("value is too short ({actual} characters, minimum {min})")
            }
            ViolationKind::LengthViolation { max, actual, .. } => {
                format!("value is too long ({actual} characters, maximum {max})")
            }
            ViolationKind::TypeViolation {
                expected,
                failure,
                value,
            } => match failure {
                TypeFailure::InvalidCode => format!("{value:?} is not an allowed code"),
                TypeFailure::InvalidDate => format!("{value:?} is not a valid date"),
                TypeFailure::InvalidTime => format!("{value:?} is not a valid time"),
                TypeFailure::OutOfRange => format!("{value:?} is outside the supported {expected} range"),
                TypeFailure::InvalidCharacter => format!("{value:?} is not a valid {expected} value"),
            },
            ViolationKind::SubElementViolation { detail } => detail.describe(),
            ViolationKind::UnexpectedElement { defined } => {
                format!("unexpected element, segment defines {defined}")
            }
            ViolationKind::PairedConditionViolation { .. }
            | ViolationKind::AtLeastOneViolation { .. }
            | ViolationKind::ExclusiveViolation { .. }
            | ViolationKind::ConditionalRequirementViolation { .. }
            | ViolationKind::ListConditionalViolation { .. } => String::new(),
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One finding, positioned within a segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub segment_id: SegmentId,
    /// 1-based element position, when the finding concerns one element.
    pub position: Option<usize>,
    /// 1-based component position within a composite.
    pub sub_position: Option<usize>,
    pub kind: ViolationKind,
    pub message: String,
}

impl Violation {
    /// Finding about a whole element.
    pub fn element(segment_id: &SegmentId, position: usize, kind: ViolationKind) -> Self {
        let message = format!("{segment_id}{position:02}: {}", kind.describe());
        Self {
            segment_id: segment_id.clone(),
            position: Some(position),
            sub_position: None,
            kind,
            message,
        }
    }

    /// Finding about one component of a composite element.
    pub fn component(
        segment_id: &SegmentId,
        position: usize,
        sub_position: usize,
        detail: ViolationKind,
    ) -> Self {
        let message = format!(
            "{segment_id}{position:02}-{sub_position}: {}",
            detail.describe()
        );
        Self {
            segment_id: segment_id.clone(),
            position: Some(position),
            sub_position: Some(sub_position),
            kind: ViolationKind::SubElementViolation {
                detail: Box::new(detail),
            },
            message,
        }
    }

    /// Finding raised by a conditional rule. `position` points at the
    /// element the acknowledgment should reference.
    pub fn rule(
        segment_id: &SegmentId,
        rule: &ConditionalRule,
        position: usize,
        kind: ViolationKind,
    ) -> Self {
        let message = format!("{segment_id} {}: {}", rule.name(), rule.describe());
        Self {
            segment_id: segment_id.clone(),
            position: Some(position),
            sub_position: None,
            kind,
            message,
        }
    }

    pub fn ack_code(&self) -> &'static str {
        self.kind.ack_code()
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind.label(), self.message)
    }
}
