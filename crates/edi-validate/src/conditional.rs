//! Conditional pass: syntax notes against token presence.
//!
//! Rules see only whether a token is present, never whether it passed the
//! structural checks.

use edi_model::{ConditionalRule, SegmentDefinition};
use tracing::trace;

use crate::violation::{Violation, ViolationKind};

/// Evaluate every rule of `definition` in declaration order.
pub(crate) fn check(
    definition: &SegmentDefinition,
    is_present: impl Fn(usize) -> bool,
) -> Vec<Violation> {
    definition
        .rules()
        .iter()
        .filter_map(|rule| {
            let (position, kind) = evaluate(rule, &is_present)?;
            trace!(segment = %definition.id(), rule = %rule, %kind, "rule violation");
            Some(Violation::rule(definition.id(), rule, position, kind))
        })
        .collect()
}

/// Returns the position to report and the violation, if the rule fails.
pub(crate) fn evaluate(
    rule: &ConditionalRule,
    is_present: impl Fn(usize) -> bool,
) -> Option<(usize, ViolationKind)> {
    match rule {
        ConditionalRule::Paired(positions) => {
            let first_absent = positions.iter().copied().find(|&p| !is_present(p))?;
            positions.iter().any(|&p| is_present(p)).then(|| {
                (
                    first_absent,
                    ViolationKind::PairedConditionViolation {
                        positions: positions.clone(),
                    },
                )
            })
        }
        ConditionalRule::AtLeastOne(positions) => {
            let first = *positions.first()?;
            (!positions.iter().any(|&p| is_present(p))).then(|| {
                (
                    first,
                    ViolationKind::AtLeastOneViolation {
                        positions: positions.clone(),
                    },
                )
            })
        }
        ConditionalRule::Exclusive(positions) => {
            let present: Vec<usize> = positions.iter().copied().filter(|&p| is_present(p)).collect();
            (present.len() > 1).then(|| {
                (
                    present[1],
                    ViolationKind::ExclusiveViolation { positions: present },
                )
            })
        }
        ConditionalRule::Conditional {
            if_position,
            then_positions,
        } => {
            if !is_present(*if_position) {
                return None;
            }
            let missing: Vec<usize> = then_positions
                .iter()
                .copied()
                .filter(|&p| !is_present(p))
                .collect();
            let first = *missing.first()?;
            Some((
                first,
                ViolationKind::ConditionalRequirementViolation {
                    if_position: *if_position,
                    missing,
                },
            ))
        }
        ConditionalRule::ListConditional {
            first_position,
            rest_positions,
        } => {
            if is_present(*first_position) {
                return None;
            }
            let present: Vec<usize> = rest_positions
                .iter()
                .copied()
                .filter(|&p| is_present(p))
                .collect();
            (!present.is_empty()).then(|| {
                (
                    *first_position,
                    ViolationKind::ListConditionalViolation {
                        first_position: *first_position,
                        present,
                    },
                )
            })
        }
    }
}
