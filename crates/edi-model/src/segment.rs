//! Segment definitions and their builder.
//!
//! A [`SegmentDefinition`] is assembled once through
//! [`SegmentDefinitionBuilder`], which checks every cross-reference
//! (positions, rule ranges, situational rule references) before the value
//! exists. After `build()` the definition cannot be changed.
//!
//! ```
//! use std::sync::Arc;
//! use edi_model::{ConditionalRule, ElementDefinition, ElementType, Requirement, SegmentDefinition};
//!
//! let qualifier = Arc::new(
//!     ElementDefinition::new("128", "Reference Identification Qualifier", ElementType::identifier(2, 3)?)?,
//! );
//! let reference = Arc::new(
//!     ElementDefinition::new("127", "Reference Identification", ElementType::string(1, 50)?)?,
//! );
//! let description = Arc::new(ElementDefinition::new("352", "Description", ElementType::string(1, 80)?)?);
//!
//! let segment = SegmentDefinition::builder("REF", "Reference Information")
//!     .element(qualifier, Requirement::Mandatory)
//!     .element(reference, Requirement::situational("R0203"))
//!     .element(description, Requirement::situational("R0203"))
//!     .rule(ConditionalRule::at_least_one([2, 3])?)
//!     .build()?;
//!
//! assert_eq!(segment.len(), 3);
//! # Ok::<(), edi_model::DefinitionError>(())
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::element::ElementDefinition;
use crate::error::{DefinitionError, Result};
use crate::ids::SegmentId;
use crate::requirement::Requirement;
use crate::rule::ConditionalRule;

/// One element position within a segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementUse {
    position: usize,
    definition: Arc<ElementDefinition>,
    requirement: Requirement,
}

impl ElementUse {
    /// 1-based position within the segment.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn definition(&self) -> &Arc<ElementDefinition> {
        &self.definition
    }

    pub fn requirement(&self) -> &Requirement {
        &self.requirement
    }

    /// Conventional reference designator, e.g. `REF02`.
    pub fn designator(&self, segment_id: &SegmentId) -> String {
        format!("{segment_id}{:02}", self.position)
    }
}

/// Immutable description of one segment's shape within a grammar version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SegmentDefinition {
    id: SegmentId,
    name: String,
    purpose: String,
    elements: Vec<ElementUse>,
    rules: Vec<ConditionalRule>,
}

impl SegmentDefinition {
    pub fn builder(id: impl Into<String>, name: impl Into<String>) -> SegmentDefinitionBuilder {
        SegmentDefinitionBuilder {
            id: id.into(),
            name: name.into(),
            purpose: String::new(),
            elements: Vec::new(),
            rules: Vec::new(),
        }
    }

    pub fn id(&self) -> &SegmentId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn purpose(&self) -> &str {
        &self.purpose
    }

    /// Element positions in ascending order.
    pub fn elements(&self) -> &[ElementUse] {
        &self.elements
    }

    /// Element at a 1-based position.
    pub fn element(&self, position: usize) -> Option<&ElementUse> {
        position
            .checked_sub(1)
            .and_then(|index| self.elements.get(index))
    }

    pub fn rules(&self) -> &[ConditionalRule] {
        &self.rules
    }

    /// Rule by syntax-note name (case-insensitive).
    pub fn rule(&self, name: &str) -> Option<&ConditionalRule> {
        self.rules
            .iter()
            .find(|rule| rule.name().eq_ignore_ascii_case(name))
    }

    /// Number of element positions.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl fmt::Display for SegmentDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.id, self.name)
    }
}

/// Collects a segment's elements and rules, validating them on `build()`.
#[derive(Debug, Clone)]
pub struct SegmentDefinitionBuilder {
    id: String,
    name: String,
    purpose: String,
    elements: Vec<(Option<usize>, Arc<ElementDefinition>, Requirement)>,
    rules: Vec<ConditionalRule>,
}

impl SegmentDefinitionBuilder {
    pub fn purpose(mut self, purpose: impl Into<String>) -> Self {
        self.purpose = purpose.into();
        self
    }

    /// Append an element at the position after the previous one.
    pub fn element(
        mut self,
        definition: impl Into<Arc<ElementDefinition>>,
        requirement: Requirement,
    ) -> Self {
        self.elements.push((None, definition.into(), requirement));
        self
    }

    /// Place an element at an explicit 1-based position.
    pub fn element_at(
        mut self,
        position: usize,
        definition: impl Into<Arc<ElementDefinition>>,
        requirement: Requirement,
    ) -> Self {
        self.elements
            .push((Some(position), definition.into(), requirement));
        self
    }

    pub fn rule(mut self, rule: ConditionalRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(mut self, rules: impl IntoIterator<Item = ConditionalRule>) -> Self {
        self.rules.extend(rules);
        self
    }

    pub fn build(self) -> Result<SegmentDefinition> {
        let id = SegmentId::new(self.id)?;

        let mut previous = 0;
        let mut elements: Vec<ElementUse> = self
            .elements
            .into_iter()
            .map(|(position, definition, requirement)| {
                let position = position.unwrap_or(previous + 1);
                previous = position;
                ElementUse {
                    position,
                    definition,
                    requirement,
                }
            })
            .collect();
        elements.sort_by_key(ElementUse::position);

        let mut seen = BTreeSet::new();
        for element in &elements {
            if !seen.insert(element.position) {
                return Err(DefinitionError::DuplicatePosition {
                    segment_id: id.to_string(),
                    position: element.position,
                });
            }
        }
        for (index, element) in elements.iter().enumerate() {
            if element.position != index + 1 {
                return Err(DefinitionError::NonContiguousPositions {
                    segment_id: id.to_string(),
                    expected: index + 1,
                    found: element.position,
                });
            }
        }

        let mut names = BTreeSet::new();
        for rule in &self.rules {
            let name = rule.name();
            if let Some(position) = rule
                .positions()
                .into_iter()
                .find(|&position| position == 0 || position > elements.len())
            {
                return Err(DefinitionError::RuleOutOfRange {
                    segment_id: id.to_string(),
                    rule: name,
                    position,
                    len: elements.len(),
                });
            }
            if !names.insert(name.clone()) {
                return Err(DefinitionError::DuplicateRule {
                    segment_id: id.to_string(),
                    rule: name,
                });
            }
        }

        for element in &elements {
            let Some(reference) = element.requirement.condition() else {
                continue;
            };
            let Some(rule) = self
                .rules
                .iter()
                .find(|rule| rule.name().eq_ignore_ascii_case(reference))
            else {
                return Err(DefinitionError::UnknownRuleReference {
                    segment_id: id.to_string(),
                    position: element.position,
                    rule: reference.to_string(),
                });
            };
            if !rule.covers(element.position) {
                return Err(DefinitionError::SituationalNotCovered {
                    segment_id: id.to_string(),
                    position: element.position,
                    rule: rule.name(),
                });
            }
        }

        Ok(SegmentDefinition {
            id,
            name: self.name,
            purpose: self.purpose,
            elements,
            rules: self.rules,
        })
    }
}
