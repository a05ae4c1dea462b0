use crate::error::ExplorerError;
use core_types::{PropertyRecord, PropertyType};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The user's search refinements.
///
/// Unpriced listings ("price on request") pass the price bounds unless
/// `priced_only` is set. A minimum room count rejects listings that do not
/// report that count. An empty `property_types` list allows every type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyFilter {
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub min_bedrooms: Option<f64>,
    pub min_bathrooms: Option<f64>,
    pub property_types: Vec<PropertyType>,
    pub priced_only: bool,
}

impl PropertyFilter {
    pub fn validate(&self) -> Result<(), ExplorerError> {
        if let (Some(min), Some(max)) = (self.min_price, self.max_price) {
            if min > max {
                return Err(ExplorerError::InvalidFilter(format!(
                    "min_price {min} is above max_price {max}"
                )));
            }
        }
        for (name, value) in [
            ("min_bedrooms", self.min_bedrooms),
            ("min_bathrooms", self.min_bathrooms),
        ] {
            if value.is_some_and(|v| !v.is_finite() || v < 0.0) {
                return Err(ExplorerError::InvalidFilter(format!(
                    "{name} must be a non-negative number"
                )));
            }
        }
        Ok(())
    }

    /// True when no refinement is active.
    pub fn is_unrestricted(&self) -> bool {
        *self == PropertyFilter::default()
    }

    pub fn matches(&self, record: &PropertyRecord) -> bool {
        let price = record.price.filter(|p| *p > Decimal::ZERO);
        match price {
            Some(p) => {
                if self.min_price.is_some_and(|min| p < min)
                    || self.max_price.is_some_and(|max| p > max)
                {
                    return false;
                }
            }
            None if self.priced_only => return false,
            None => {}
        }

        if !at_least(record.attributes.bedrooms, self.min_bedrooms)
            || !at_least(record.attributes.bathrooms, self.min_bathrooms)
        {
            return false;
        }

        self.property_types.is_empty() || self.property_types.contains(&record.property_type)
    }

    /// Indices of the matching records, in their original order.
    pub fn apply(&self, records: &[PropertyRecord]) -> Vec<usize> {
        records
            .iter()
            .enumerate()
            .filter(|(_, record)| self.matches(record))
            .map(|(i, _)| i)
            .collect()
    }
}

fn at_least(value: Option<f64>, minimum: Option<f64>) -> bool {
    match minimum {
        None => true,
        Some(min) => value.is_some_and(|v| v >= min),
    }
}
