use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The canonical vehicle record every market adapter normalizes into.
///
/// No single upstream populates all of these, so everything is optional.
/// Fields a source does not report stay `None`; adapters never invent
/// values. The wire names (camelCase, `type`, the misspelled
/// `registerationExpire`) are what the listing forms already consume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleData {
    pub make: Option<String>,
    pub model: Option<String>,
    pub model_year: Option<String>,
    pub vin: Option<String>,
    pub registration_plate: Option<String>,
    pub body_type: Option<String>,
    pub color: Option<String>,
    pub doors: Option<u32>,
    pub seats: Option<u32>,
    pub drive_type: Option<String>,
    pub fuel_type: Option<String>,
    pub engine_size: Option<f64>,
    pub engine_power: Option<f64>,
    pub cylinder: Option<u32>,
    pub no_of_gears: Option<u32>,
    pub gearbox: Option<String>,
    pub fuel_consumption: Option<f64>,
    pub co2_emission: Option<f64>,
    pub battery_range: Option<f64>,
    pub charging_time: Option<String>,
    pub mileage: Option<Mileage>,
    #[serde(rename = "registerationExpire")]
    pub registration_expiry: Option<NaiveDate>,
    #[serde(rename = "type")]
    pub vehicle_type: Option<String>,
    /// Always `None` from adapters. New-vs-used is a human judgment the
    /// listing editor makes, not something registration data can tell us.
    pub condition: Option<String>,
    pub features: Vec<String>,
}

/// A mileage-like figure. The value is meaningless without its unit, so
/// the two only ever travel together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mileage {
    pub value: f64,
    pub unit: MileageUnit,
}

impl Mileage {
    pub fn miles(value: f64) -> Self {
        Self {
            value,
            unit: MileageUnit::Miles,
        }
    }

    pub fn km(value: f64) -> Self {
        Self {
            value,
            unit: MileageUnit::Km,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MileageUnit {
    Km,
    Miles,
}

/// The closed set of markets a lookup can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Country {
    Uk,
    Usa,
    Au,
}

/// Error for a country code outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCountry(pub String);

impl FromStr for Country {
    type Err = UnknownCountry;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "uk" => Ok(Country::Uk),
            "usa" => Ok(Country::Usa),
            "au" => Ok(Country::Au),
            _ => Err(UnknownCountry(s.to_string())),
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Country::Uk => "uk",
            Country::Usa => "usa",
            Country::Au => "au",
        })
    }
}

/// Per-user flags gating access to each market's upstream API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiAccess {
    #[serde(default)]
    pub uk: bool,
    #[serde(default)]
    pub usa: bool,
    #[serde(default)]
    pub au: bool,
}

impl ApiAccess {
    pub fn allows(&self, country: Country) -> bool {
        match country {
            Country::Uk => self.uk,
            Country::Usa => self.usa,
            Country::Au => self.au,
        }
    }
}

/// Inbound body of a vehicle-data lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupRequest {
    pub identifier: String,
    pub country: String,
}

/// Successful lookup payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupResponse {
    pub data: VehicleData,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn country_parses_case_insensitively() {
        assert_eq!("UK".parse::<Country>(), Ok(Country::Uk));
        assert_eq!("Usa".parse::<Country>(), Ok(Country::Usa));
        assert_eq!("au".parse::<Country>(), Ok(Country::Au));
        assert_eq!(
            "fr".parse::<Country>(),
            Err(UnknownCountry("fr".to_string()))
        );
    }

    #[test]
    fn access_flags_gate_by_country() {
        let access = ApiAccess {
            uk: true,
            usa: false,
            au: false,
        };
        assert!(access.allows(Country::Uk));
        assert!(!access.allows(Country::Usa));
        assert!(!access.allows(Country::Au));
    }

    #[test]
    fn record_serializes_with_form_field_names() {
        let data = VehicleData {
            body_type: Some("Sedan".to_string()),
            vehicle_type: Some("Car".to_string()),
            mileage: Some(Mileage::miles(42000.0)),
            registration_expiry: NaiveDate::from_ymd_opt(2026, 3, 1),
            ..VehicleData::default()
        };
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["bodyType"], "Sedan");
        assert_eq!(json["type"], "Car");
        assert_eq!(json["mileage"]["value"], 42000.0);
        assert_eq!(json["mileage"]["unit"], "miles");
        assert_eq!(json["registerationExpire"], "2026-03-01");
        // Condition is a human call; adapters must leave it unset.
        assert!(json["condition"].is_null());
    }
}
