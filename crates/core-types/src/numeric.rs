//! Lenient handling of the numeric-string fields carried by KPIs and readings.
//!
//! Values arrive as free text typed into forms (`"96"`, `"1.5 kg"`, `"85%"`, `""`),
//! so parsing takes the longest leading numeric prefix the way a dashboard would,
//! and callers choose the fallback that is safe for their calculation.

use crate::error::CoreError;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use std::str::FromStr;

/// Parses the leading numeric prefix of `raw` into a `Decimal`.
///
/// Surrounding whitespace is ignored and anything after the number is dropped,
/// so `"85%"` parses as `85` and `" 1.5e3 units"` as `1500`. Magnitudes beyond
/// what a `Decimal` holds clamp to `Decimal::MAX` or `Decimal::MIN`, and values
/// too small to represent become zero.
pub fn parse_decimal(raw: &str) -> Result<Decimal, CoreError> {
    let trimmed = raw.trim();
    let prefix = NumericPrefix::scan(trimmed).ok_or_else(|| CoreError::NotNumeric(raw.to_string()))?;
    let normalized = prefix.normalized();

    let parsed = if prefix.exponent.is_empty() {
        Decimal::from_str(&normalized)
    } else {
        Decimal::from_scientific(&normalized)
    };

    Ok(parsed.unwrap_or_else(|_| prefix.saturated()))
}

/// Parses `raw`, substituting `default` when it is missing, empty or not numeric.
pub fn parse_or(raw: Option<&str>, default: Decimal) -> Decimal {
    match raw {
        Some(text) => parse_decimal(text).unwrap_or_else(|_| {
            if !text.trim().is_empty() {
                tracing::warn!(raw = text, %default, "Non-numeric value, using default");
            }
            default
        }),
        None => default,
    }
}

/// The pieces of a numeric prefix, borrowed from the scanned text.
struct NumericPrefix<'a> {
    negative: bool,
    integer: &'a str,
    fraction: &'a str,
    exponent: &'a str,
}

impl<'a> NumericPrefix<'a> {
    fn scan(text: &'a str) -> Option<Self> {
        let bytes = text.as_bytes();
        let mut pos = 0;

        let negative = match bytes.first() {
            Some(b'-') => {
                pos += 1;
                true
            }
            Some(b'+') => {
                pos += 1;
                false
            }
            _ => false,
        };

        let int_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        let integer = &text[int_start..pos];

        let mut fraction = "";
        if pos < bytes.len() && bytes[pos] == b'.' {
            let frac_start = pos + 1;
            let mut frac_end = frac_start;
            while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
                frac_end += 1;
            }
            fraction = &text[frac_start..frac_end];
            pos = frac_end;
        }

        if integer.is_empty() && fraction.is_empty() {
            return None;
        }

        // An exponent only counts when at least one digit follows it.
        let mut exponent = "";
        if pos < bytes.len() && (bytes[pos] == b'e' || bytes[pos] == b'E') {
            let exp_start = pos;
            let mut cursor = pos + 1;
            if cursor < bytes.len() && (bytes[cursor] == b'-' || bytes[cursor] == b'+') {
                cursor += 1;
            }
            let digits_start = cursor;
            while cursor < bytes.len() && bytes[cursor].is_ascii_digit() {
                cursor += 1;
            }
            if cursor > digits_start {
                exponent = &text[exp_start..cursor];
            }
        }

        Some(Self {
            negative,
            integer,
            fraction,
            exponent,
        })
    }

    /// The closest representable value for a prefix `Decimal` rejected.
    fn saturated(&self) -> Decimal {
        let integer = self.integer.trim_start_matches('0');
        let fraction_zeros = self.fraction.len() - self.fraction.trim_start_matches('0').len();
        if integer.is_empty() && fraction_zeros == self.fraction.len() {
            return Decimal::ZERO;
        }

        // Position of the leading significant digit relative to the decimal point.
        let leading = if integer.is_empty() {
            -(fraction_zeros as i64)
        } else {
            integer.len() as i64
        };
        let exponent = self.exponent.get(1..).map_or(0, |digits| {
            let digits = digits.trim_start_matches('+');
            digits.parse::<i64>().unwrap_or(if digits.starts_with('-') {
                i64::MIN / 2
            } else {
                i64::MAX / 2
            })
        });

        match (leading.saturating_add(exponent) > 0, self.negative) {
            (false, _) => Decimal::ZERO,
            (true, false) => Decimal::MAX,
            (true, true) => Decimal::MIN,
        }
    }

    fn normalized(&self) -> String {
        let mut out = String::with_capacity(
            self.integer.len() + self.fraction.len() + self.exponent.len() + 3,
        );
        if self.negative {
            out.push('-');
        }
        if self.integer.is_empty() {
            out.push('0');
        } else {
            out.push_str(self.integer);
        }
        if !self.fraction.is_empty() {
            out.push('.');
            out.push_str(self.fraction);
        }
        if !self.exponent.is_empty() {
            // Written as `e` followed by an optional minus and the digits.
            out.push('e');
            out.push_str(self.exponent[1..].trim_start_matches('+'));
        }
        out
    }
}

/// Accepts a JSON string, number, boolean or null for a numeric-string field.
///
/// Use with `#[serde(default, deserialize_with = "...")]`; null becomes an empty string.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Text(String),
        Integer(i64),
        Unsigned(u64),
        Float(f64),
        Flag(bool),
    }

    let value = Option::<Loose>::deserialize(deserializer)?;
    Ok(match value {
        Some(Loose::Text(text)) => text,
        Some(Loose::Integer(n)) => n.to_string(),
        Some(Loose::Unsigned(n)) => n.to_string(),
        Some(Loose::Float(n)) => n.to_string(),
        Some(Loose::Flag(flag)) => flag.to_string(),
        None => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parses_plain_numbers() {
        assert_eq!(parse_decimal("96").unwrap(), dec!(96));
        assert_eq!(parse_decimal("  12.50 ").unwrap(), dec!(12.50));
        assert_eq!(parse_decimal("-3.25").unwrap(), dec!(-3.25));
        assert_eq!(parse_decimal("+7").unwrap(), dec!(7));
    }

    #[test]
    fn takes_the_leading_numeric_prefix() {
        assert_eq!(parse_decimal("85%").unwrap(), dec!(85));
        assert_eq!(parse_decimal("1.5 kg").unwrap(), dec!(1.5));
        assert_eq!(parse_decimal(".5").unwrap(), dec!(0.5));
        assert_eq!(parse_decimal("5.").unwrap(), dec!(5));
        assert_eq!(parse_decimal("2e").unwrap(), dec!(2));
    }

    #[test]
    fn understands_exponents() {
        assert_eq!(parse_decimal("1.5e3").unwrap(), dec!(1500));
        assert_eq!(parse_decimal("25E-1").unwrap(), dec!(2.5));
    }

    #[test]
    fn oversized_magnitudes_clamp_to_the_decimal_bounds() {
        assert_eq!(parse_decimal("1e100").unwrap(), Decimal::MAX);
        assert_eq!(parse_decimal("-1e100").unwrap(), Decimal::MIN);
        assert_eq!(
            parse_decimal("12345678901234567890123456789012").unwrap(),
            Decimal::MAX
        );
        assert_eq!(parse_decimal("-99999999999999999999999999999999 USD").unwrap(), Decimal::MIN);
    }

    #[test]
    fn vanishing_magnitudes_become_zero() {
        assert_eq!(parse_decimal("1e-100").unwrap(), Decimal::ZERO);
        assert_eq!(parse_decimal("0e999").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn rejects_text_without_digits() {
        assert_eq!(parse_decimal(""), Err(CoreError::NotNumeric(String::new())));
        assert!(matches!(parse_decimal("abc"), Err(CoreError::NotNumeric(_))));
        assert!(matches!(parse_decimal("-"), Err(CoreError::NotNumeric(_))));
        assert!(matches!(parse_decimal("."), Err(CoreError::NotNumeric(_))));
        assert!(matches!(parse_decimal("N/A 40"), Err(CoreError::NotNumeric(_))));
    }

    #[test]
    fn parse_or_substitutes_the_default() {
        assert_eq!(parse_or(Some("oops"), dec!(1)), dec!(1));
        assert_eq!(parse_or(None, dec!(0)), dec!(0));
        assert_eq!(parse_or(Some("40"), dec!(1)), dec!(40));
    }

    #[test]
    fn numeric_fields_accept_strings_numbers_and_null() {
        #[derive(Deserialize)]
        struct Field {
            #[serde(default, deserialize_with = "string_or_number")]
            value: String,
        }

        let from_text: Field = serde_json::from_str(r#"{"value": "96"}"#).unwrap();
        let from_int: Field = serde_json::from_str(r#"{"value": 96}"#).unwrap();
        let from_float: Field = serde_json::from_str(r#"{"value": 96.5}"#).unwrap();
        let from_null: Field = serde_json::from_str(r#"{"value": null}"#).unwrap();
        let missing: Field = serde_json::from_str(r#"{}"#).unwrap();

        assert_eq!(from_text.value, "96");
        assert_eq!(from_int.value, "96");
        assert_eq!(from_float.value, "96.5");
        assert_eq!(from_null.value, "");
        assert_eq!(missing.value, "");
    }
}
