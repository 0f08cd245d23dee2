use std::str::FromStr;

use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde::{Deserialize, Deserializer, Serializer};

// Form fields arrive as JSON numbers, numeric strings, empty strings or junk.
#[derive(Deserialize)]
#[serde(untagged)]
#[allow(dead_code)]
enum NumberOrText {
    Number(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

impl NumberOrText {
    fn to_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Number(n) if n.is_finite() => Decimal::from_str(&n.to_string()).ok(),
            Self::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    None
                } else {
                    Decimal::from_str(s)
                        .or_else(|_| Decimal::from_scientific(s))
                        .ok()
                }
            }
            _ => None,
        }
    }
}

/// Deserializes a monetary amount, treating empty strings, non-numeric values and
/// `null` as `None`.
pub fn lenient_decimal_option<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<NumberOrText>::deserialize(deserializer)?.and_then(|v| v.to_decimal()))
}

/// Like [`lenient_decimal_option`], defaulting to zero.
pub fn lenient_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_decimal_option(deserializer)?.unwrap_or_default())
}

/// Deserializes a minute count. Fractions are truncated; negative or unreadable
/// values become zero.
pub fn lenient_minutes<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let minutes = lenient_decimal_option(deserializer)?
        .filter(|d| d.is_sign_positive())
        .and_then(|d| d.trunc().to_u32())
        .unwrap_or(0);
    Ok(minutes)
}

/// Deserializes free text, treating blank strings as `None`.
pub fn non_empty_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = Option::<String>::deserialize(deserializer)?;
    Ok(text.filter(|s| !s.trim().is_empty()))
}

/// Serializes a decimal as a JSON number, the shape the backup documents use.
pub fn decimal_as_number<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value.to_f64() {
        Some(n) => serializer.serialize_f64(n),
        None => serializer.collect_str(value),
    }
}

pub fn decimal_option_as_number<S>(
    value: &Option<Decimal>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(value) => decimal_as_number(value, serializer),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Amounts {
        #[serde(default, deserialize_with = "lenient_decimal_option")]
        advance: Option<Decimal>,
        #[serde(default, deserialize_with = "lenient_minutes")]
        lunch: u32,
    }

    fn parse(value: serde_json::Value) -> Amounts {
        serde_json::from_value(value).expect("lenient fields never fail")
    }

    #[test]
    fn numbers_and_numeric_strings_are_read() {
        let amounts = parse(json!({ "advance": 12.5, "lunch": "45" }));
        assert_eq!(amounts.advance, Some(dec!(12.5)));
        assert_eq!(amounts.lunch, 45);

        let amounts = parse(json!({ "advance": " 7 ", "lunch": 30.9 }));
        assert_eq!(amounts.advance, Some(dec!(7)));
        assert_eq!(amounts.lunch, 30);
    }

    #[test]
    fn junk_is_coerced_to_defaults() {
        let amounts = parse(json!({ "advance": "", "lunch": -15 }));
        assert_eq!(amounts.advance, None);
        assert_eq!(amounts.lunch, 0);

        let amounts = parse(json!({ "advance": "abc", "lunch": true }));
        assert_eq!(amounts.advance, None);
        assert_eq!(amounts.lunch, 0);

        let amounts = parse(json!({}));
        assert_eq!(amounts.advance, None);
        assert_eq!(amounts.lunch, 0);
    }
}
