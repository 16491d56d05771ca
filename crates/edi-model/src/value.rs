//! Typed element values and validated segment records.

use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ids::{ElementCode, SegmentId, Version};

/// Semantic value of one present element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ElementValue {
    Integer(i64),
    Decimal(Decimal),
    Date(NaiveDate),
    Time(NaiveTime),
    Code(String),
    Text(String),
    /// Components in order; `None` for empty components.
    Composite(Vec<Option<ElementValue>>),
}

impl ElementValue {
    pub fn as_code(&self) -> Option<&str> {
        match self {
            ElementValue::Code(code) => Some(code),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ElementValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            ElementValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            ElementValue::Decimal(value) => Some(*value),
            ElementValue::Integer(value) => Some(Decimal::from(*value)),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            ElementValue::Date(date) => Some(*date),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<NaiveTime> {
        match self {
            ElementValue::Time(time) => Some(*time),
            _ => None,
        }
    }

    pub fn components(&self) -> Option<&[Option<ElementValue>]> {
        match self {
            ElementValue::Composite(components) => Some(components),
            _ => None,
        }
    }
}

impl fmt::Display for ElementValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementValue::Integer(value) => write!(f, "{value}"),
            ElementValue::Decimal(value) => write!(f, "{value}"),
            ElementValue::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            ElementValue::Time(time) => write!(f, "{}", time.format("%H:%M:%S%.f")),
            ElementValue::Code(code) => f.write_str(code),
            ElementValue::Text(text) => f.write_str(text),
            ElementValue::Composite(components) => {
                let rendered: Vec<String> = components
                    .iter()
                    .map(|c| c.as_ref().map(ToString::to_string).unwrap_or_default())
                    .collect();
                f.write_str(&rendered.join(":"))
            }
        }
    }
}

/// One present element of a validated segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordField {
    pub position: usize,
    pub code: ElementCode,
    pub value: ElementValue,
}

/// A segment that passed validation, with every present element parsed.
///
/// Fields are keyed by element code. A segment may use the same element
/// code at several positions, so fields are stored in position order and
/// [`ValidatedRecord::get`] returns the first match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedRecord {
    pub segment_id: SegmentId,
    pub version: Version,
    pub fields: Vec<RecordField>,
}

impl ValidatedRecord {
    /// First value recorded for an element code.
    pub fn get(&self, code: &str) -> Option<&ElementValue> {
        self.fields
            .iter()
            .find(|field| field.code.as_str() == code)
            .map(|field| &field.value)
    }

    /// Every value recorded for an element code, in position order.
    pub fn get_all<'a>(&'a self, code: &'a str) -> impl Iterator<Item = &'a ElementValue> + 'a {
        self.fields
            .iter()
            .filter(move |field| field.code.as_str() == code)
            .map(|field| &field.value)
    }

    /// Value at a 1-based element position.
    pub fn get_at(&self, position: usize) -> Option<&ElementValue> {
        self.fields
            .iter()
            .find(|field| field.position == position)
            .map(|field| &field.value)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
