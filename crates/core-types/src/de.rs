//! Lenient field decoders for the upstream listing payload.
//!
//! The upstream API is loosely typed: counts arrive as integers, floats or
//! strings, prices sometimes carry currency formatting, and any field can be
//! `null`. Each decoder here accepts whatever JSON value is present and maps
//! anything it cannot use to `None` or the field's default.

use crate::enums::PropertyType;
use crate::structs::{Attributes, Coordinates};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;

/// Asking price. Non-positive values mean "price on request" and become `None`.
pub fn price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Decimal>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(decimal_from_value(&value).filter(|p| p.is_sign_positive() && !p.is_zero()))
}

/// A room or garage count.
pub fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let parsed = match &value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(parsed.filter(|c| c.is_finite() && *c >= 0.0))
}

/// A calendar date, accepting bare `YYYY-MM-DD` and full timestamps.
pub fn date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let Value::String(text) = value else {
        return Ok(None);
    };
    let day = text.trim().get(..10).unwrap_or_default();
    match NaiveDate::parse_from_str(day, "%Y-%m-%d") {
        Ok(date) => Ok(Some(date)),
        Err(e) => {
            tracing::debug!(raw = %text, error = %e, "Ignoring unparseable listing date.");
            Ok(None)
        }
    }
}

/// A display address. Structured addresses are flattened to their text parts.
pub fn address<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Object(parts) => parts
            .values()
            .filter_map(|part| part.as_str())
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        _ => String::new(),
    };
    Ok(Some(text).filter(|t| !t.is_empty()))
}

/// Free text that may be missing or not a string at all.
pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().map(str::to_string))
}

/// A coordinate component; `null` or text that is not a number becomes `None`.
pub fn coordinate<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let parsed = match &value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(parsed.filter(|c| c.is_finite()))
}

/// The attribute block. Anything but an object is treated as empty.
pub fn attributes<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Attributes, D::Error> {
    match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => Ok(serde_json::from_value(value).unwrap_or_default()),
        _ => Ok(Attributes::default()),
    }
}

/// A listing category. Only text labels are recognised.
pub fn property_type<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<PropertyType, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().map(PropertyType::from_label).unwrap_or_default())
}

/// A coordinate pair. Anything but an object is `None`.
pub fn coordinates<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Coordinates>, D::Error> {
    match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => Ok(serde_json::from_value(value).ok()),
        _ => Ok(None),
    }
}

pub(crate) fn decimal_from_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => match n.as_i64() {
            Some(whole) => Some(Decimal::from(whole)),
            None => n.as_f64().and_then(Decimal::from_f64),
        },
        Value::String(s) => {
            let cleaned: String = s
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
                .collect();
            Decimal::from_str(&cleaned).ok()
        }
        _ => None,
    }
}
