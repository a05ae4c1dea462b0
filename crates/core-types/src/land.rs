use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

pub const SQUARE_METRES_PER_HECTARE: f64 = 10_000.0;
pub const SQUARE_METRES_PER_ACRE: f64 = 4_046.856_422_4;

/// Land area normalised once, when a listing is decoded.
///
/// The upstream API reports land either as a bare number (square metres) or as
/// text such as `"650m²"`, `"1,012 sqm"` or `"2.5 ha"`. Everything downstream works
/// with [`LandSize::square_metres`] and never re-parses the raw text.
///
/// On the wire an `Area` is a number, `Unparseable` keeps its original text and
/// `Absent` is `null`, so a serialized record decodes back to the same value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LandSize {
    /// Area in square metres.
    Area(f64),
    /// Text that carried no usable number.
    Unparseable(String),
    #[default]
    Absent,
}

impl LandSize {
    pub fn square_metres(&self) -> Option<f64> {
        match self {
            LandSize::Area(area) => Some(*area),
            _ => None,
        }
    }

    /// Parses a free-text land size.
    ///
    /// The first numeric token wins. Commas between digits are thousands
    /// separators. The text following the number selects the unit.
    pub fn parse(raw: &str) -> Self {
        let text = raw.trim();
        if text.is_empty() {
            return LandSize::Absent;
        }

        let Some((number, rest)) = first_number(text) else {
            return LandSize::Unparseable(text.to_string());
        };
        let Ok(value) = number.parse::<f64>() else {
            return LandSize::Unparseable(text.to_string());
        };
        if !value.is_finite() {
            return LandSize::Unparseable(text.to_string());
        }

        let unit = rest.trim_start().to_ascii_lowercase();
        let area = if unit.starts_with("ha") || unit.starts_with("hectare") {
            value * SQUARE_METRES_PER_HECTARE
        } else if unit.starts_with("ac") {
            value * SQUARE_METRES_PER_ACRE
        } else {
            value
        };
        LandSize::Area(area)
    }

    /// Normalises whatever JSON value the upstream put in the land-size slot.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => LandSize::Absent,
            Value::Number(number) => match number.as_f64() {
                Some(area) if area.is_finite() && area >= 0.0 => LandSize::Area(area),
                _ => LandSize::Unparseable(number.to_string()),
            },
            Value::String(text) => Self::parse(text),
            other => LandSize::Unparseable(other.to_string()),
        }
    }
}

/// Splits `text` into its first numeric token (separators removed) and the text after it.
fn first_number(text: &str) -> Option<(String, &str)> {
    let bytes = text.as_bytes();
    let start = bytes.iter().enumerate().position(|(i, b)| {
        b.is_ascii_digit() || (*b == b'.' && bytes.get(i + 1).is_some_and(u8::is_ascii_digit))
    })?;

    let mut token = String::new();
    let mut end = start;
    while end < bytes.len() {
        let b = bytes[end];
        if b.is_ascii_digit() || b == b'.' {
            token.push(b as char);
        } else if b == b','
            && end > start
            && bytes[end - 1].is_ascii_digit()
            && bytes.get(end + 1).is_some_and(u8::is_ascii_digit)
        {
            // thousands separator
        } else {
            break;
        }
        end += 1;
    }
    Some((token, &text[end..]))
}

impl Serialize for LandSize {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            LandSize::Area(area) => serializer.serialize_f64(*area),
            LandSize::Unparseable(raw) => serializer.serialize_str(raw),
            LandSize::Absent => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for LandSize {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}
