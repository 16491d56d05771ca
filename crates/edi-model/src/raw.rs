//! Tokenized segment input.
//!
//! Produced upstream by a tokenizer that has already split segment text on
//! the element and component separators.

use serde::{Deserialize, Serialize};

/// One element token, possibly split into components.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawToken {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<String>>,
}

impl RawToken {
    pub fn simple(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            components: None,
        }
    }

    /// Composite token; `value` holds the components joined with `:`.
    pub fn composite<I, S>(components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let components: Vec<String> = components.into_iter().map(Into::into).collect();
        Self {
            value: components.join(":"),
            components: Some(components),
        }
    }

    pub fn is_composite(&self) -> bool {
        self.components.is_some()
    }

    /// An empty token (or a composite whose components are all empty) is absent.
    pub fn is_present(&self) -> bool {
        match &self.components {
            Some(components) => components.iter().any(|c| !c.is_empty()),
            None => !self.value.is_empty(),
        }
    }
}

impl From<&str> for RawToken {
    fn from(value: &str) -> Self {
        Self::simple(value)
    }
}

impl From<String> for RawToken {
    fn from(value: String) -> Self {
        Self::simple(value)
    }
}

/// A segment identifier plus its element tokens in order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawSegment {
    pub segment_id: String,
    pub tokens: Vec<RawToken>,
}

impl RawSegment {
    pub fn new(segment_id: impl Into<String>, tokens: Vec<RawToken>) -> Self {
        Self {
            segment_id: segment_id.into(),
            tokens,
        }
    }

    /// Segment made of simple (non-composite) tokens.
    pub fn from_values<I, S>(segment_id: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            segment_id,
            values.into_iter().map(RawToken::simple).collect(),
        )
    }

    /// Token at a 1-based position.
    pub fn token(&self, position: usize) -> Option<&RawToken> {
        position
            .checked_sub(1)
            .and_then(|index| self.tokens.get(index))
    }
}
