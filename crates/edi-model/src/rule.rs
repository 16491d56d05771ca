//! Segment-level relational rules (X12 syntax notes).
//!
//! Each rule names element positions within one segment and constrains
//! their joint presence:
//!
//! | note | variant | constraint |
//! |------|---------|------------|
//! | `P`  | [`ConditionalRule::Paired`] | all or none present |
//! | `R`  | [`ConditionalRule::AtLeastOne`] | at least one present |
//! | `E`  | [`ConditionalRule::Exclusive`] | at most one present |
//! | `C`  | [`ConditionalRule::Conditional`] | first present ⇒ all others present |
//! | `L`  | [`ConditionalRule::ListConditional`] | any of the others present ⇒ first present |
//!
//! A rule's name is its syntax note: the letter followed by each position as
//! two digits (`P0203`, `L020304`). Situational requirements refer to rules
//! by that name.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DefinitionError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ConditionalRule {
    Paired(Vec<usize>),
    AtLeastOne(Vec<usize>),
    Exclusive(Vec<usize>),
    Conditional {
        if_position: usize,
        then_positions: Vec<usize>,
    },
    ListConditional {
        first_position: usize,
        rest_positions: Vec<usize>,
    },
}

impl ConditionalRule {
    pub fn paired(positions: impl Into<Vec<usize>>) -> Result<Self> {
        Self::checked(ConditionalRule::Paired(positions.into()))
    }

    pub fn at_least_one(positions: impl Into<Vec<usize>>) -> Result<Self> {
        Self::checked(ConditionalRule::AtLeastOne(positions.into()))
    }

    pub fn exclusive(positions: impl Into<Vec<usize>>) -> Result<Self> {
        Self::checked(ConditionalRule::Exclusive(positions.into()))
    }

    pub fn conditional(if_position: usize, then_positions: impl Into<Vec<usize>>) -> Result<Self> {
        Self::checked(ConditionalRule::Conditional {
            if_position,
            then_positions: then_positions.into(),
        })
    }

    pub fn list_conditional(
        first_position: usize,
        rest_positions: impl Into<Vec<usize>>,
    ) -> Result<Self> {
        Self::checked(ConditionalRule::ListConditional {
            first_position,
            rest_positions: rest_positions.into(),
        })
    }

    fn checked(rule: Self) -> Result<Self> {
        let positions = rule.positions();
        let distinct: BTreeSet<usize> = positions.iter().copied().collect();
        if positions.len() < 2 || distinct.len() != positions.len() {
            return Err(DefinitionError::DegenerateRule { rule: rule.name() });
        }
        Ok(rule)
    }

    /// Syntax note letter.
    pub fn letter(&self) -> char {
        match self {
            ConditionalRule::Paired(_) => 'P',
            ConditionalRule::AtLeastOne(_) => 'R',
            ConditionalRule::Exclusive(_) => 'E',
            ConditionalRule::Conditional { .. } => 'C',
            ConditionalRule::ListConditional { .. } => 'L',
        }
    }

    /// Syntax note name, used as the rule's reference key.
    pub fn name(&self) -> String {
        let mut name = String::with_capacity(1 + 2 * self.positions().len());
        name.push(self.letter());
        for position in self.positions() {
            name.push_str(&format!("{position:02}"));
        }
        name
    }

    /// Every position this rule mentions, in declaration order.
    pub fn positions(&self) -> Vec<usize> {
        match self {
            ConditionalRule::Paired(positions)
            | ConditionalRule::AtLeastOne(positions)
            | ConditionalRule::Exclusive(positions) => positions.clone(),
            ConditionalRule::Conditional {
                if_position: head,
                then_positions: tail,
            }
            | ConditionalRule::ListConditional {
                first_position: head,
                rest_positions: tail,
            } => std::iter::once(*head).chain(tail.iter().copied()).collect(),
        }
    }

    pub fn covers(&self, position: usize) -> bool {
        self.positions().contains(&position)
    }

    /// Plain-language statement of the constraint.
    pub fn describe(&self) -> String {
        match self {
            ConditionalRule::Paired(positions) => format!(
                "if any of elements {} is present, all are required",
                join_positions(positions)
            ),
            ConditionalRule::AtLeastOne(positions) => format!(
                "at least one of elements {} is required",
                join_positions(positions)
            ),
            ConditionalRule::Exclusive(positions) => format!(
                "only one of elements {} may be present",
                join_positions(positions)
            ),
            ConditionalRule::Conditional {
                if_position,
                then_positions,
            } => format!(
                "if element {if_position} is present, elements {} are required",
                join_positions(then_positions)
            ),
            ConditionalRule::ListConditional {
                first_position,
                rest_positions,
            } => format!(
                "if any of elements {} is present, element {first_position} is required",
                join_positions(rest_positions)
            ),
        }
    }
}

pub(crate) fn join_positions(positions: &[usize]) -> String {
    positions
        .iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for ConditionalRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for ConditionalRule {
    type Err = DefinitionError;

    /// Parse an X12 syntax note such as `P0203` or `L020304`.
    fn from_str(s: &str) -> Result<Self> {
        let note = s.trim().to_uppercase();
        let invalid = || DefinitionError::InvalidSyntaxNote {
            value: s.to_string(),
        };

        let mut chars = note.chars();
        let letter = chars.next().ok_or_else(invalid)?;
        let digits = chars.as_str();
        if digits.is_empty()
            || digits.len() % 2 != 0
            || !digits.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }
        let positions: Vec<usize> = digits
            .as_bytes()
            .chunks(2)
            .map(|pair| usize::from((pair[0] - b'0') * 10 + (pair[1] - b'0')))
            .collect();

        match letter {
            'P' => Self::paired(positions),
            'R' => Self::at_least_one(positions),
            'E' => Self::exclusive(positions),
            'C' | 'L' => {
                let (head, tail) = positions.split_first().ok_or_else(invalid)?;
                if letter == 'C' {
                    Self::conditional(*head, tail.to_vec())
                } else {
                    Self::list_conditional(*head, tail.to_vec())
                }
            }
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for ConditionalRule {
    type Error = DefinitionError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ConditionalRule> for String {
    fn from(rule: ConditionalRule) -> Self {
        rule.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_follow_syntax_notes() {
        assert_eq!(ConditionalRule::paired([2, 3]).unwrap().name(), "P0203");
        assert_eq!(ConditionalRule::at_least_one([2, 3]).unwrap().name(), "R0203");
        assert_eq!(
            ConditionalRule::list_conditional(2, [3, 4]).unwrap().name(),
            "L020304"
        );
        assert_eq!(
            ConditionalRule::conditional(11, [10]).unwrap().name(),
            "C1110"
        );
    }

    #[test]
    fn parses_syntax_notes() {
        assert_eq!(
            "c0203".parse::<ConditionalRule>().unwrap(),
            ConditionalRule::Conditional {
                if_position: 2,
                then_positions: vec![3]
            }
        );
        assert_eq!(
            "E0102".parse::<ConditionalRule>().unwrap(),
            ConditionalRule::Exclusive(vec![1, 2])
        );
        assert!("P02".parse::<ConditionalRule>().is_err());
        assert!("P020".parse::<ConditionalRule>().is_err());
        assert!("Q0203".parse::<ConditionalRule>().is_err());
        assert!("".parse::<ConditionalRule>().is_err());
    }

    #[test]
    fn rejects_degenerate_rules() {
        assert_eq!(
            ConditionalRule::paired([2]),
            Err(DefinitionError::DegenerateRule {
                rule: "P02".to_string()
            })
        );
        assert!(ConditionalRule::exclusive([2, 2]).is_err());
        assert!(ConditionalRule::conditional(2, Vec::new()).is_err());
    }

    #[test]
    fn positions_include_head() {
        let rule = ConditionalRule::list_conditional(2, [3, 4]).unwrap();
        assert_eq!(rule.positions(), vec![2, 3, 4]);
        assert!(rule.covers(2));
        assert!(!rule.covers(5));
    }

    #[test]
    fn serializes_as_note() {
        let rule = ConditionalRule::paired([2, 3]).unwrap();
        assert_eq!(serde_json::to_string(&rule).unwrap(), "\"P0203\"");
        let back: ConditionalRule = serde_json::from_str("\"P0203\"").unwrap();
        assert_eq!(back, rule);
    }
}
