//! Options controlling element validation.

use serde::{Deserialize, Serialize};

/// How identifier values are matched against an element's allowed codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CodeMatchingMode {
    /// Exact, case-sensitive match.
    #[default]
    Strict,
    /// ASCII case-insensitive match. The declared spelling is recorded.
    Lenient,
}

/// Options for [`crate::Validator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOptions {
    /// Matching strictness for identifier code lists.
    pub code_matching: CodeMatchingMode,

    /// Two-digit years below this value fall in the 2000s, the rest in the
    /// 1900s. Applies to six-digit `DT` values only.
    pub century_pivot: u8,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            code_matching: CodeMatchingMode::Strict,
            century_pivot: 50,
        }
    }
}

impl ValidationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default options with case-insensitive code matching.
    pub fn lenient() -> Self {
        Self::default().with_code_matching(CodeMatchingMode::Lenient)
    }

    pub fn with_code_matching(mut self, mode: CodeMatchingMode) -> Self {
        self.code_matching = mode;
        self
    }

    pub fn with_century_pivot(mut self, pivot: u8) -> Self {
        self.century_pivot = pivot.min(100);
        self
    }

    /// Expand a two-digit year using the century pivot.
    pub(crate) fn expand_year(&self, two_digit: i32) -> i32 {
        if two_digit < i32::from(self.century_pivot) {
            2000 + two_digit
        } else {
            1900 + two_digit
        }
    }
}
