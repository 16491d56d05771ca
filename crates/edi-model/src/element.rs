//! Element types and element definitions.
//!
//! An [`ElementType`] describes how a single field may be represented
//! (X12 representation code plus length bounds). An [`ElementDefinition`]
//! binds a type to a data element reference code and name; definitions are
//! shared by many segments through `Arc`.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DefinitionError, Result};
use crate::ids::ElementCode;

/// Finite set of allowed identifier codes, each with an optional description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct CodeList {
    codes: BTreeMap<String, String>,
}

impl CodeList {
    /// Build a code list from `(code, description)` pairs.
    pub fn new<I, C, D>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (C, D)>,
        C: Into<String>,
        D: Into<String>,
    {
        let codes: BTreeMap<String, String> = entries
            .into_iter()
            .map(|(code, description)| (code.into(), description.into()))
            .collect();
        if codes.is_empty() {
            return Err(DefinitionError::EmptyCodeList);
        }
        Ok(Self { codes })
    }

    /// Build a code list from bare codes without descriptions.
    pub fn from_codes<I, S>(codes: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(codes.into_iter().map(|code| (code, String::new())))
    }

    /// Exact membership test.
    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains_key(code)
    }

    /// ASCII case-insensitive membership test; returns the declared spelling.
    pub fn find_ignore_case(&self, code: &str) -> Option<&str> {
        self.codes
            .keys()
            .find(|declared| declared.eq_ignore_ascii_case(code))
            .map(String::as_str)
    }

    /// Description recorded for a code, if any.
    pub fn description(&self, code: &str) -> Option<&str> {
        self.codes
            .get(code)
            .map(String::as_str)
            .filter(|description| !description.is_empty())
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.codes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl TryFrom<BTreeMap<String, String>> for CodeList {
    type Error = DefinitionError;

    fn try_from(codes: BTreeMap<String, String>) -> Result<Self> {
        Self::new(codes)
    }
}

impl From<CodeList> for BTreeMap<String, String> {
    fn from(list: CodeList) -> Self {
        list.codes
    }
}

/// Representation family of an element, without its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Representation {
    Identifier,
    String,
    Numeric,
    Decimal,
    Date,
    Time,
}

impl Representation {
    /// Returns the X12 representation code.
    pub fn as_code(&self) -> &'static str {
        match self {
            Representation::Identifier => "ID",
            Representation::String => "AN",
            Representation::Numeric => "N",
            Representation::Decimal => "R",
            Representation::Date => "DT",
            Representation::Time => "TM",
        }
    }

    /// Returns a human-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Representation::Identifier => "identifier",
            Representation::String => "string",
            Representation::Numeric => "numeric",
            Representation::Decimal => "decimal",
            Representation::Date => "date",
            Representation::Time => "time",
        }
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Allowed representation of an element value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ElementKind {
    /// Coded value (`ID`), optionally restricted to a code list.
    Identifier { codes: Option<CodeList> },
    /// Free text (`AN`).
    String,
    /// Integer digits with implied decimal places (`N`, `N0`..`N9`).
    Numeric { implied_decimals: u8 },
    /// Explicit decimal number (`R`).
    Decimal,
    /// Calendar date, `CCYYMMDD` or `YYMMDD` (`DT`).
    Date,
    /// Time of day, `HHMM[SS[d[d]]]` (`TM`).
    Time,
}

impl ElementKind {
    pub fn representation(&self) -> Representation {
        match self {
            ElementKind::Identifier { .. } => Representation::Identifier,
            ElementKind::String => Representation::String,
            ElementKind::Numeric { .. } => Representation::Numeric,
            ElementKind::Decimal => Representation::Decimal,
            ElementKind::Date => Representation::Date,
            ElementKind::Time => Representation::Time,
        }
    }

    /// Returns the X12 code, including the precision digit for numerics.
    pub fn as_code(&self) -> String {
        match self {
            ElementKind::Numeric { implied_decimals } => format!("N{implied_decimals}"),
            other => other.representation().as_code().to_string(),
        }
    }

    /// Allowed codes for identifier elements.
    pub fn code_list(&self) -> Option<&CodeList> {
        match self {
            ElementKind::Identifier { codes } => codes.as_ref(),
            _ => None,
        }
    }
}

impl FromStr for ElementKind {
    type Err = DefinitionError;

    /// Parse an X12 representation code (`ID`, `AN`, `N`, `N2`, `R`, `DT`, `TM`).
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_uppercase();
        match normalized.as_str() {
            "ID" => Ok(ElementKind::Identifier { codes: None }),
            "AN" => Ok(ElementKind::String),
            "R" => Ok(ElementKind::Decimal),
            "DT" => Ok(ElementKind::Date),
            "TM" => Ok(ElementKind::Time),
            "N" => Ok(ElementKind::Numeric {
                implied_decimals: 0,
            }),
            other => match other.strip_prefix('N').and_then(|d| d.parse::<u8>().ok()) {
                Some(implied_decimals) if other.len() == 2 => {
                    Ok(ElementKind::Numeric { implied_decimals })
                }
                _ => Err(DefinitionError::UnknownElementKind {
                    value: s.to_string(),
                }),
            },
        }
    }
}

/// Maximum implied decimal places for `N` elements.
pub const MAX_IMPLIED_DECIMALS: u8 = 9;

/// Widest `N` element whose every value fits an `i64`.
pub const MAX_NUMERIC_DIGITS: usize = 18;

/// Widest `R` element whose every mantissa fits a `Decimal`.
pub const MAX_DECIMAL_DIGITS: usize = 28;

/// Representation plus length bounds for one element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementType {
    kind: ElementKind,
    min_length: usize,
    max_length: usize,
}

impl ElementType {
    pub fn new(kind: ElementKind, min_length: usize, max_length: usize) -> Result<Self> {
        if max_length == 0 {
            return Err(DefinitionError::ZeroMaxLength);
        }
        if min_length > max_length {
            return Err(DefinitionError::InvalidLengthBounds {
                min: min_length,
                max: max_length,
            });
        }
        if let ElementKind::Numeric { implied_decimals } = kind
            && implied_decimals > MAX_IMPLIED_DECIMALS
        {
            return Err(DefinitionError::InvalidPrecision {
                precision: implied_decimals,
            });
        }
        if let ElementKind::Identifier { codes: Some(list) } = &kind
            && list.is_empty()
        {
            return Err(DefinitionError::EmptyCodeList);
        }
        let limit = match &kind {
            ElementKind::Numeric { .. } => Some(MAX_NUMERIC_DIGITS),
            ElementKind::Decimal => Some(MAX_DECIMAL_DIGITS),
            _ => None,
        };
        if let Some(limit) = limit
            && max_length > limit
        {
            return Err(DefinitionError::UnrepresentableLength {
                representation: kind.representation().to_string(),
                max: max_length,
                limit,
            });
        }
        Ok(Self {
            kind,
            min_length,
            max_length,
        })
    }

    pub fn identifier(min_length: usize, max_length: usize) -> Result<Self> {
        Self::new(ElementKind::Identifier { codes: None }, min_length, max_length)
    }

    pub fn coded(codes: CodeList, min_length: usize, max_length: usize) -> Result<Self> {
        Self::new(
            ElementKind::Identifier { codes: Some(codes) },
            min_length,
            max_length,
        )
    }

    pub fn string(min_length: usize, max_length: usize) -> Result<Self> {
        Self::new(ElementKind::String, min_length, max_length)
    }

    pub fn numeric(implied_decimals: u8, min_length: usize, max_length: usize) -> Result<Self> {
        Self::new(
            ElementKind::Numeric { implied_decimals },
            min_length,
            max_length,
        )
    }

    pub fn decimal(min_length: usize, max_length: usize) -> Result<Self> {
        Self::new(ElementKind::Decimal, min_length, max_length)
    }

    pub fn date(min_length: usize, max_length: usize) -> Result<Self> {
        Self::new(ElementKind::Date, min_length, max_length)
    }

    pub fn time(min_length: usize, max_length: usize) -> Result<Self> {
        Self::new(ElementKind::Time, min_length, max_length)
    }

    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    pub fn representation(&self) -> Representation {
        self.kind.representation()
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}/{}",
            self.kind.as_code(),
            self.min_length,
            self.max_length
        )
    }
}

/// A data element: reference code, name, and type.
///
/// Immutable once built; segments hold it behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementDefinition {
    code: ElementCode,
    name: String,
    element_type: ElementType,
}

impl ElementDefinition {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        element_type: ElementType,
    ) -> Result<Self> {
        Ok(Self {
            code: ElementCode::new(code)?,
            name: name.into(),
            element_type,
        })
    }

    pub fn code(&self) -> &ElementCode {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn element_type(&self) -> &ElementType {
        &self.element_type
    }
}

impl fmt::Display for ElementDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.code, self.name, self.element_type)
    }
}
