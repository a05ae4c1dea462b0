use crate::de;
use crate::enums::PropertyType;
use crate::error::CoreError;
use crate::land::LandSize;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    #[serde(default, deserialize_with = "de::coordinate")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "de::coordinate")]
    pub longitude: Option<f64>,
}

impl Coordinates {
    /// Returns the pair only when both components are present.
    pub fn lat_lon(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }
}

/// The physical description of a listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attributes {
    #[serde(default, deserialize_with = "de::count")]
    pub bedrooms: Option<f64>,
    #[serde(default, deserialize_with = "de::count")]
    pub bathrooms: Option<f64>,
    #[serde(default, alias = "garages", alias = "garage", deserialize_with = "de::count")]
    pub garage_spaces: Option<f64>,
    #[serde(default)]
    pub land_size: LandSize,
    #[serde(default, deserialize_with = "de::text")]
    pub description: Option<String>,
}

/// One property listing as returned by the upstream API.
///
/// Records are immutable inputs to the analytics layer. Every field decodes
/// leniently so that one malformed attribute never drops the whole listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyRecord {
    #[serde(default, deserialize_with = "de::address")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "de::price")]
    pub price: Option<Decimal>,
    #[serde(default, deserialize_with = "de::attributes")]
    pub attributes: Attributes,
    #[serde(default, deserialize_with = "de::property_type")]
    pub property_type: PropertyType,
    #[serde(default, deserialize_with = "de::date")]
    pub listing_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "de::coordinates")]
    pub coordinates: Option<Coordinates>,
}

impl PropertyRecord {
    /// The asking price as a float sample value, when one is listed.
    ///
    /// Statistics run on `f64`; converting here is the single, accepted
    /// precision trade-off between the money type and the numeric code.
    pub fn listed_price(&self) -> Option<f64> {
        self.price
            .and_then(|p| p.to_f64())
            .filter(|p| p.is_finite() && *p > 0.0)
    }

    pub fn land_area(&self) -> Option<f64> {
        self.attributes.land_size.square_metres()
    }

    /// Asking price divided by land area, when both are known and positive.
    pub fn price_per_square_metre(&self) -> Option<f64> {
        let price = self.listed_price()?;
        let area = self.land_area().filter(|a| *a > 0.0)?;
        Some(price / area)
    }

    pub fn display_name(&self) -> &str {
        self.address.as_deref().unwrap_or("Unnamed listing")
    }
}

/// The two shapes the upstream uses for a listing response.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum UpstreamPayload {
    Listings(Vec<PropertyRecord>),
    Wrapped { results: Vec<PropertyRecord> },
}

impl UpstreamPayload {
    pub fn into_records(self) -> Vec<PropertyRecord> {
        match self {
            UpstreamPayload::Listings(records) => records,
            UpstreamPayload::Wrapped { results } => results,
        }
    }
}

/// Decodes a sanitized upstream JSON document into listings.
pub fn parse_payload(value: Value) -> Result<Vec<PropertyRecord>, CoreError> {
    let payload: UpstreamPayload = serde_json::from_value(value)?;
    let records = payload.into_records();
    tracing::debug!(count = records.len(), "Decoded upstream listings.");
    Ok(records)
}
