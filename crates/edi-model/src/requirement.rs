//! Requirement designators for element positions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DefinitionError;

/// Requirement designator attached to an element position.
///
/// A `Situational` requirement defers its obligation to a named rule
/// (its X12 syntax note, e.g. `P0203`) in the owning segment's rule set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Requirement {
    /// Must be present.
    Mandatory,
    /// May be omitted.
    Optional,
    /// Present or absent as the referenced rule dictates.
    Situational(String),
}

impl Requirement {
    pub fn situational(rule: impl Into<String>) -> Self {
        Requirement::Situational(rule.into())
    }

    /// Returns the X12 designator code.
    pub fn as_code(&self) -> &'static str {
        match self {
            Requirement::Mandatory => "M",
            Requirement::Optional => "O",
            Requirement::Situational(_) => "X",
        }
    }

    pub fn is_mandatory(&self) -> bool {
        matches!(self, Requirement::Mandatory)
    }

    /// Name of the governing rule for situational requirements.
    pub fn condition(&self) -> Option<&str> {
        match self {
            Requirement::Situational(rule) => Some(rule),
            _ => None,
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Requirement::Situational(rule) => write!(f, "X:{rule}"),
            other => f.write_str(other.as_code()),
        }
    }
}

impl FromStr for Requirement {
    type Err = DefinitionError;

    /// Parse `M`, `O`, or `X:<rule>` (long names are accepted too).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some((designator, rule)) = trimmed.split_once(':') {
            let designator = designator.trim().to_uppercase();
            let rule = rule.trim();
            if matches!(designator.as_str(), "X" | "SITUATIONAL") && !rule.is_empty() {
                return Ok(Requirement::Situational(rule.to_uppercase()));
            }
            return Err(DefinitionError::UnknownRequirement {
                value: s.to_string(),
            });
        }
        match trimmed.to_uppercase().as_str() {
            "M" | "MANDATORY" => Ok(Requirement::Mandatory),
            "O" | "OPTIONAL" => Ok(Requirement::Optional),
            _ => Err(DefinitionError::UnknownRequirement {
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requirement_from_str() {
        assert_eq!("M".parse::<Requirement>().unwrap(), Requirement::Mandatory);
        assert_eq!("optional".parse::<Requirement>().unwrap(), Requirement::Optional);
        assert_eq!(
            "X:p0203".parse::<Requirement>().unwrap(),
            Requirement::situational("P0203")
        );
        assert!("X".parse::<Requirement>().is_err());
        assert!("Z:P0203".parse::<Requirement>().is_err());
    }

    #[test]
    fn test_requirement_display() {
        assert_eq!(Requirement::situational("C0203").to_string(), "X:C0203");
        assert_eq!(Requirement::Mandatory.to_string(), "M");
    }
}
