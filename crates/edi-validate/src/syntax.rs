//! Lexical checks for single element values.
//!
//! [`check_value`] runs the length check and the representation check for
//! one non-empty value and parses it into an [`ElementValue`] when the
//! representation is valid. Both checks always run.

use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use edi_model::{ElementKind, ElementType, ElementValue};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::options::{CodeMatchingMode, ValidationOptions};
use crate::violation::ViolationKind;

/// Why a value does not match its representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeFailure {
    InvalidCharacter,
    InvalidCode,
    InvalidDate,
    InvalidTime,
    /// Lexically valid number outside the range the parsed value can hold.
    OutOfRange,
}

impl TypeFailure {
    pub fn ack_code(&self) -> &'static str {
        match self {
            TypeFailure::InvalidCharacter => "6",
            TypeFailure::InvalidCode => "7",
            TypeFailure::InvalidDate => "8",
            TypeFailure::InvalidTime => "9",
            TypeFailure::OutOfRange => "I12",
        }
    }
}

/// Findings and parsed value for one element or component value.
#[derive(Debug, Default)]
pub(crate) struct Checked {
    pub(crate) findings: Vec<ViolationKind>,
    pub(crate) value: Option<ElementValue>,
}

/// Check `raw` against `element_type`: length first, then representation.
pub(crate) fn check_value(
    raw: &str,
    element_type: &ElementType,
    options: &ValidationOptions,
) -> Checked {
    let mut checked = Checked::default();

    let actual = measured_length(element_type.kind(), raw);
    if actual < element_type.min_length() || actual > element_type.max_length() {
        checked.findings.push(ViolationKind::LengthViolation {
            min: element_type.min_length(),
            max: element_type.max_length(),
            actual,
        });
    }

    match parse_value(raw, element_type.kind(), options) {
        Ok(value) => checked.value = Some(value),
        Err(failure) => checked.findings.push(ViolationKind::TypeViolation {
            expected: element_type.representation(),
            failure,
            value: raw.to_string(),
        }),
    }
    checked
}

/// Length as X12 counts it: numeric values exclude the sign, the decimal
/// point and any exponent.
pub(crate) fn measured_length(kind: &ElementKind, raw: &str) -> usize {
    match kind {
        ElementKind::Numeric { .. } | ElementKind::Decimal => {
            let mantissa = raw.split(['E', 'e']).next().unwrap_or_default();
            mantissa.chars().filter(char::is_ascii_digit).count()
        }
        _ => raw.chars().count(),
    }
}

fn parse_value(
    raw: &str,
    kind: &ElementKind,
    options: &ValidationOptions,
) -> Result<ElementValue, TypeFailure> {
    match kind {
        ElementKind::Identifier { codes } => {
            if !is_printable(raw) || raw.trim().is_empty() {
                return Err(TypeFailure::InvalidCharacter);
            }
            match codes {
                None => Ok(ElementValue::Code(raw.to_string())),
                Some(list) => {
                    let declared = match options.code_matching {
                        CodeMatchingMode::Strict => list.contains(raw).then_some(raw),
                        CodeMatchingMode::Lenient => list.find_ignore_case(raw),
                    };
                    declared
                        .map(|code| ElementValue::Code(code.to_string()))
                        .ok_or(TypeFailure::InvalidCode)
                }
            }
        }
        ElementKind::String => {
            if !is_printable(raw) || raw.trim().is_empty() {
                return Err(TypeFailure::InvalidCharacter);
            }
            Ok(ElementValue::Text(raw.to_string()))
        }
        ElementKind::Numeric { implied_decimals } => parse_numeric(raw, *implied_decimals),
        ElementKind::Decimal => parse_decimal(raw).map(ElementValue::Decimal),
        ElementKind::Date => parse_date(raw, options).map(ElementValue::Date),
        ElementKind::Time => parse_time(raw).map(ElementValue::Time),
    }
}

fn is_printable(raw: &str) -> bool {
    !raw.chars().any(char::is_control)
}

fn split_sign(raw: &str) -> (bool, &str) {
    match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw),
    }
}

fn all_digits(raw: &str) -> bool {
    !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit())
}

fn parse_numeric(raw: &str, implied_decimals: u8) -> Result<ElementValue, TypeFailure> {
    let (_, digits) = split_sign(raw);
    if !all_digits(digits) {
        return Err(TypeFailure::InvalidCharacter);
    }
    let integer = i64::from_str(raw).map_err(|_| TypeFailure::OutOfRange)?;
    if implied_decimals == 0 {
        Ok(ElementValue::Integer(integer))
    } else {
        Ok(ElementValue::Decimal(Decimal::new(
            integer,
            u32::from(implied_decimals),
        )))
    }
}

fn parse_decimal(raw: &str) -> Result<Decimal, TypeFailure> {
    let (mantissa, exponent) = match raw.split_once(['E', 'e']) {
        Some((mantissa, exponent)) => (mantissa, Some(exponent)),
        None => (raw, None),
    };

    let (negative, unsigned) = split_sign(mantissa);
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let whole_ok = whole.is_empty() || all_digits(whole);
    let fraction_ok = fraction.is_empty() || all_digits(fraction);
    if !whole_ok || !fraction_ok || (whole.is_empty() && fraction.is_empty()) {
        return Err(TypeFailure::InvalidCharacter);
    }
    if let Some(exponent) = exponent {
        let (_, digits) = split_sign(exponent);
        if !all_digits(digits) {
            return Err(TypeFailure::InvalidCharacter);
        }
    }

    let mut normalized = String::with_capacity(raw.len() + 1);
    if negative {
        normalized.push('-');
    }
    normalized.push_str(if whole.is_empty() { "0" } else { whole });
    if !fraction.is_empty() {
        normalized.push('.');
        normalized.push_str(fraction);
    }
    let parsed = match exponent {
        Some(exponent) => Decimal::from_scientific(&format!("{normalized}e{exponent}")),
        None => Decimal::from_str(&normalized),
    };
    parsed.map_err(|_| TypeFailure::OutOfRange)
}

fn parse_date(raw: &str, options: &ValidationOptions) -> Result<NaiveDate, TypeFailure> {
    if !all_digits(raw) {
        return Err(TypeFailure::InvalidDate);
    }
    let (year, rest) = match raw.len() {
        8 => (number(&raw[..4])?, &raw[4..]),
        6 => (options.expand_year(number(&raw[..2])?), &raw[2..]),
        _ => return Err(TypeFailure::InvalidDate),
    };
    let month = number(&rest[..2])?;
    let day = number(&rest[2..])?;
    NaiveDate::from_ymd_opt(year, month.unsigned_abs(), day.unsigned_abs())
        .ok_or(TypeFailure::InvalidDate)
}

fn parse_time(raw: &str) -> Result<NaiveTime, TypeFailure> {
    if !all_digits(raw) || !matches!(raw.len(), 4 | 6 | 7 | 8) {
        return Err(TypeFailure::InvalidTime);
    }
    let field = |range: std::ops::Range<usize>| -> Result<u32, TypeFailure> {
        raw.get(range)
            .map_or(Ok(0), |digits| number(digits).map(i32::unsigned_abs))
            .map_err(|_| TypeFailure::InvalidTime)
    };
    let hour = field(0..2)?;
    let minute = field(2..4)?;
    let second = field(4..6)?;
    let millis = match raw.len() {
        7 => field(6..7)? * 100,
        8 => field(6..8)? * 10,
        _ => 0,
    };
    NaiveTime::from_hms_milli_opt(hour, minute, second, millis).ok_or(TypeFailure::InvalidTime)
}

fn number(digits: &str) -> Result<i32, TypeFailure> {
    digits.parse().map_err(|_| TypeFailure::InvalidDate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use edi_model::CodeList;

    fn options() -> ValidationOptions {
        ValidationOptions::default()
    }

    #[test]
    fn numeric_length_excludes_sign() {
        let kind = ElementKind::Numeric {
            implied_decimals: 0,
        };
        assert_eq!(measured_length(&kind, "-123"), 3);
        assert_eq!(measured_length(&ElementKind::Decimal, "-1.25E3"), 3);
        assert_eq!(measured_length(&ElementKind::String, " A "), 3);
    }

    #[test]
    fn implied_decimals_scale_value() {
        assert_eq!(parse_numeric("12345", 2), Ok(ElementValue::Decimal(Decimal::new(12345, 2))));
        assert_eq!(parse_numeric("-7", 0), Ok(ElementValue::Integer(-7)));
        assert_eq!(parse_numeric("1.5", 0), Err(TypeFailure::InvalidCharacter));
        assert_eq!(parse_numeric("-", 0), Err(TypeFailure::InvalidCharacter));
    }

    #[test]
    fn decimals_accept_x12_forms() {
        assert_eq!(parse_decimal("10.50"), Ok(Decimal::new(1050, 2)));
        assert_eq!(parse_decimal(".5"), Ok(Decimal::new(5, 1)));
        assert_eq!(parse_decimal("-3"), Ok(Decimal::new(-3, 0)));
        assert_eq!(parse_decimal("1.5E2"), Ok(Decimal::new(150, 0)));
        assert_eq!(parse_decimal("10."), Ok(Decimal::new(10, 0)));
        assert_eq!(parse_decimal("1.2.3"), Err(TypeFailure::InvalidCharacter));
        assert_eq!(parse_decimal("."), Err(TypeFailure::InvalidCharacter));
        assert_eq!(parse_decimal("1,5"), Err(TypeFailure::InvalidCharacter));
    }

    #[test]
    fn numbers_beyond_value_range() {
        assert_eq!(
            parse_numeric("99999999999999999999", 0),
            Err(TypeFailure::OutOfRange)
        );
        assert_eq!(
            parse_numeric("-999999999999999999", 0),
            Ok(ElementValue::Integer(-999_999_999_999_999_999))
        );
        assert_eq!(parse_decimal("1E99"), Err(TypeFailure::OutOfRange));
        assert_eq!(parse_decimal("9E28"), Err(TypeFailure::OutOfRange));
        assert_eq!(parse_decimal("1E20"), Ok(Decimal::from_str("100000000000000000000").unwrap()));
        assert_eq!(parse_decimal("1E9X"), Err(TypeFailure::InvalidCharacter));
        assert_eq!(TypeFailure::OutOfRange.ack_code(), "I12");
    }

    #[test]
    fn dates_use_century_pivot() {
        let options = options();
        assert_eq!(
            parse_date("20240229", &options),
            Ok(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap())
        );
        assert_eq!(
            parse_date("990101", &options),
            Ok(NaiveDate::from_ymd_opt(1999, 1, 1).unwrap())
        );
        assert_eq!(
            parse_date("310101", &options),
            Ok(NaiveDate::from_ymd_opt(2031, 1, 1).unwrap())
        );
        assert_eq!(parse_date("20230229", &options), Err(TypeFailure::InvalidDate));
        assert_eq!(parse_date("2023011", &options), Err(TypeFailure::InvalidDate));
    }

    #[test]
    fn times_accept_fractional_seconds() {
        assert_eq!(parse_time("1230"), Ok(NaiveTime::from_hms_opt(12, 30, 0).unwrap()));
        assert_eq!(
            parse_time("123045"),
            Ok(NaiveTime::from_hms_opt(12, 30, 45).unwrap())
        );
        assert_eq!(
            parse_time("12304525"),
            Ok(NaiveTime::from_hms_milli_opt(12, 30, 45, 250).unwrap())
        );
        assert_eq!(parse_time("2460"), Err(TypeFailure::InvalidTime));
        assert_eq!(parse_time("12345"), Err(TypeFailure::InvalidTime));
    }

    #[test]
    fn code_matching_respects_mode() {
        let element_type =
            ElementType::coded(CodeList::from_codes(["AN", "GA"]).unwrap(), 2, 2).unwrap();

        let strict = check_value("an", &element_type, &options());
        assert!(matches!(
            strict.findings.as_slice(),
            [ViolationKind::TypeViolation {
                failure: TypeFailure::InvalidCode,
                ..
            }]
        ));

        let lenient = check_value("an", &element_type, &ValidationOptions::lenient());
        assert!(lenient.findings.is_empty());
        assert_eq!(lenient.value, Some(ElementValue::Code("AN".to_string())));
    }

    #[test]
    fn length_and_type_both_reported() {
        let element_type = ElementType::numeric(0, 1, 2).unwrap();
        let checked = check_value("123A", &element_type, &options());
        assert_eq!(checked.findings.len(), 2);
        assert!(matches!(checked.findings[0], ViolationKind::LengthViolation { actual: 3, .. }));
        assert!(matches!(checked.findings[1], ViolationKind::TypeViolation { .. }));
        assert!(checked.value.is_none());
    }

    #[test]
    fn blank_text_is_invalid() {
        let element_type = ElementType::string(1, 10).unwrap();
        let checked = check_value("   ", &element_type, &options());
        assert!(matches!(
            checked.findings.as_slice(),
            [ViolationKind::TypeViolation {
                failure: TypeFailure::InvalidCharacter,
                ..
            }]
        ));
    }
}
