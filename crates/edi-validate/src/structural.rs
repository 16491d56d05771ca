//! Structural pass: tokens against the element list.

use edi_model::{ElementUse, ElementValue, RawSegment, RawToken, SegmentDefinition};
use tracing::trace;

use crate::options::ValidationOptions;
use crate::syntax::check_value;
use crate::violation::{Violation, ViolationKind};

/// Result of the structural pass.
#[derive(Debug)]
pub(crate) struct StructuralReport {
    pub(crate) violations: Vec<Violation>,
    /// Parsed value per defined position (index 0 is position 1). `None`
    /// for absent tokens and for tokens that failed a check.
    pub(crate) values: Vec<Option<ElementValue>>,
    /// Presence per token position, including positions past the definition.
    pub(crate) present: Vec<bool>,
}

impl StructuralReport {
    pub(crate) fn is_present(&self, position: usize) -> bool {
        position
            .checked_sub(1)
            .and_then(|index| self.present.get(index))
            .copied()
            .unwrap_or(false)
    }
}

pub(crate) fn check(
    definition: &SegmentDefinition,
    raw: &RawSegment,
    options: &ValidationOptions,
) -> StructuralReport {
    let present: Vec<bool> = raw.tokens.iter().map(RawToken::is_present).collect();
    let mut violations = Vec::new();
    let mut values = Vec::with_capacity(definition.len());

    for element in definition.elements() {
        let position = element.position();
        let token = raw.token(position).filter(|token| token.is_present());
        let value = match token {
            None => {
                if element.requirement().is_mandatory() {
                    violations.push(Violation::element(
                        definition.id(),
                        position,
                        ViolationKind::MissingRequiredElement,
                    ));
                }
                None
            }
            Some(token) => check_token(definition, element, token, options, &mut violations),
        };
        values.push(value);
    }

    for (index, _) in present
        .iter()
        .enumerate()
        .skip(definition.len())
        .filter(|(_, present)| **present)
    {
        violations.push(Violation::element(
            definition.id(),
            index + 1,
            ViolationKind::UnexpectedElement {
                defined: definition.len(),
            },
        ));
    }

    for violation in &violations {
        trace!(segment = %violation.segment_id, position = ?violation.position, kind = %violation.kind, "structural violation");
    }

    StructuralReport {
        violations,
        values,
        present,
    }
}

fn check_token(
    definition: &SegmentDefinition,
    element: &ElementUse,
    token: &RawToken,
    options: &ValidationOptions,
    violations: &mut Vec<Violation>,
) -> Option<ElementValue> {
    let element_type = element.definition().element_type();
    let position = element.position();

    let Some(components) = &token.components else {
        let checked = check_value(&token.value, element_type, options);
        let failed = !checked.findings.is_empty();
        violations.extend(
            checked
                .findings
                .into_iter()
                .map(|kind| Violation::element(definition.id(), position, kind)),
        );
        return if failed { None } else { checked.value };
    };

    let mut parsed = Vec::with_capacity(components.len());
    let mut failed = false;
    for (index, component) in components.iter().enumerate() {
        if component.is_empty() {
            parsed.push(None);
            continue;
        }
        let checked = check_value(component, element_type, options);
        failed |= !checked.findings.is_empty();
        violations.extend(checked.findings.into_iter().map(|detail| {
            Violation::component(definition.id(), position, index + 1, detail)
        }));
        parsed.push(checked.value);
    }
    if failed {
        None
    } else {
        Some(ElementValue::Composite(parsed))
    }
}
