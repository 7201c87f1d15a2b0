use std::collections::HashMap;

use lazy_static::lazy_static;

/// Fallback fuel type when an upstream value has no mapping.
///
/// Most of the inventory this feeds is petrol, so unknown values land
/// there rather than on an "unknown" bucket the listing form cannot
/// filter on. Change this constant if that population skew ever shifts.
pub const DEFAULT_FUEL_TYPE: &str = "petrol";

lazy_static! {
    static ref BODY_TYPE_MAPPING: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        // EU type-approval categories
        m.insert("M1", "Sedan");
        m.insert("M2", "Minivan");
        m.insert("M3", "Van");
        m.insert("N1", "Van");
        m.insert("N2", "Box Truck");
        m.insert("N3", "Box Truck");
        m.insert("L6", "Roadster");
        m.insert("L7", "Roadster");
        // US/UK common terms
        m.insert("Sedan", "Sedan");
        m.insert("Saloon", "Sedan");
        m.insert("Estate", "Wagon (Station Wagon)");
        m.insert("Hatchback", "Hatchback");
        m.insert("SUV", "SUV (Sports Utility Vehicle)");
        m.insert("4x4", "SUV (Sports Utility Vehicle)");
        m.insert("Crossover", "SUV (Sports Utility Vehicle)");
        m.insert("Coupe", "Coupe");
        m.insert("Passenger Car", "Passenger Car");
        m.insert("Convertible", "Convertible");
        m.insert("Cabriolet", "Convertible");
        m.insert("Roadster", "Roadster");
        m.insert("Spider", "Roadster");
        m.insert("Spyder", "Roadster");
        // Commercial
        m.insert("Van", "Van");
        m.insert("Panel Van", "Panel Van");
        m.insert("Pickup", "Flatbed Truck");
        m.insert("Truck", "Box Truck");
        m.insert("Lorry", "Box Truck");
        m.insert("Chassis Cab", "Chassis Cab");
        // Luxury/performance
        m.insert("GT", "Grand Tourer (GT)");
        m.insert("Grand Tourer", "Grand Tourer (GT)");
        m.insert("Sports Car", "Supercar");
        m.insert("Supercar", "Supercar");
        m.insert("Hypercar", "Hypercar");
        // Other
        m.insert("MPV", "Minivan");
        m.insert("People Carrier", "Minivan");
        m.insert("Station Wagon", "Wagon (Station Wagon)");
        m.insert("Shooting Brake", "Wagon (Station Wagon)");
        m
    };
}

/// Translate a market body/category classification into the canonical
/// body-type vocabulary.
///
/// Composite values like `"M1/N1"` resolve to the first segment with a
/// table entry. Lookup is case-sensitive (the EU codes are). Unknown
/// values come back verbatim rather than defaulted, so an editor sees
/// the raw upstream category instead of losing it silently.
pub fn map_body_type(raw: Option<&str>) -> Option<String> {
    let raw = raw?;
    if raw.is_empty() {
        return None;
    }

    if raw.contains('/') {
        for part in raw.split('/') {
            if let Some(mapped) = BODY_TYPE_MAPPING.get(part.trim()) {
                return Some((*mapped).to_string());
            }
        }
    }

    Some(
        BODY_TYPE_MAPPING
            .get(raw)
            .map_or_else(|| raw.to_string(), |mapped| (*mapped).to_string()),
    )
}

/// DVLA fuel-type enumeration to canonical vocabulary.
///
/// Casing rule for this source: input is upper-cased before lookup,
/// since DVLA's enumeration is upper-case but not reliably so in older
/// records. Total mapping; unknowns fall back to [`DEFAULT_FUEL_TYPE`].
pub fn map_uk_fuel_type(raw: &str) -> &'static str {
    match raw.to_uppercase().as_str() {
        "PETROL" => "petrol",
        "DIESEL" => "diesel",
        "ELECTRIC" => "Electric",
        "HYBRID" => "Hybrid (Petrol/Electric)",
        "GAS" => "CNG (Compressed Natural Gas)",
        _ => DEFAULT_FUEL_TYPE,
    }
}

/// NHTSA fuel-type enumeration to canonical vocabulary.
///
/// Casing rule for this source: exact match on the capitalized strings
/// NHTSA returns. Total mapping; unknowns fall back to
/// [`DEFAULT_FUEL_TYPE`].
pub fn map_usa_fuel_type(raw: &str) -> &'static str {
    match raw {
        "Gasoline" => "petrol",
        "Diesel" => "diesel",
        "Electric" => "Electric",
        "Hybrid" => "Hybrid (Petrol/Electric)",
        "Compressed Natural Gas (CNG)" => "CNG (Compressed Natural Gas)",
        "Liquefied Petroleum Gas (LPG)" => "LPG (Liquefied Petroleum Gas)",
        "Hydrogen" => "Hydrogen Fuel Cell",
        "Ethanol" => "Ethanol (Flex-Fuel)",
        _ => DEFAULT_FUEL_TYPE,
    }
}
