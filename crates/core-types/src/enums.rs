use serde::{Deserialize, Serialize};
use std::fmt;

/// The listing category reported by the upstream API.
///
/// The upstream set is open-ended, so anything unrecognised is kept verbatim
/// in `Other`. A missing or blank label is `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum PropertyType {
    House,
    Unit,
    Townhouse,
    Apartment,
    Land,
    Other(String),
    #[default]
    Unknown,
}

impl PropertyType {
    /// Parses a label case-insensitively, ignoring surrounding whitespace.
    pub fn from_label(label: &str) -> Self {
        let trimmed = label.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "" | "unknown" => PropertyType::Unknown,
            "house" => PropertyType::House,
            "unit" => PropertyType::Unit,
            "townhouse" => PropertyType::Townhouse,
            "apartment" => PropertyType::Apartment,
            "land" => PropertyType::Land,
            _ => PropertyType::Other(trimmed.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            PropertyType::House => "House",
            PropertyType::Unit => "Unit",
            PropertyType::Townhouse => "Townhouse",
            PropertyType::Apartment => "Apartment",
            PropertyType::Land => "Land",
            PropertyType::Other(label) => label,
            PropertyType::Unknown => "Unknown",
        }
    }
}

impl From<Option<String>> for PropertyType {
    fn from(value: Option<String>) -> Self {
        value.as_deref().map(Self::from_label).unwrap_or_default()
    }
}

impl From<PropertyType> for String {
    fn from(value: PropertyType) -> Self {
        value.label().to_string()
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How the outlier detector picks its single representative on each side of the fences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutlierSelection {
    /// The first flagged record in list order.
    #[default]
    FirstMatch,
    /// The flagged record furthest beyond its fence.
    MostExtreme,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_case_insensitive() {
        assert_eq!(PropertyType::from_label(" house "), PropertyType::House);
        assert_eq!(PropertyType::from_label("TOWNHOUSE"), PropertyType::Townhouse);
        assert_eq!(PropertyType::from_label(""), PropertyType::Unknown);
    }

    #[test]
    fn unrecognised_labels_are_kept() {
        let duplex = PropertyType::from_label("Duplex");
        assert_eq!(duplex, PropertyType::Other("Duplex".to_string()));
        assert_eq!(duplex.to_string(), "Duplex");
    }

    #[test]
    fn missing_label_deserializes_to_unknown() {
        let parsed: PropertyType = serde_json::from_str("null").unwrap();
        assert_eq!(parsed, PropertyType::Unknown);
        let parsed: PropertyType = serde_json::from_str("\"Unit\"").unwrap();
        assert_eq!(parsed, PropertyType::Unit);
    }
}
