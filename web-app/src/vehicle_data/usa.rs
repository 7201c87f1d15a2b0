use log::warn;
use reqwest::Client;
use serde::Deserialize;
use shared::data::VehicleData;
use shared::mappings::{map_body_type, map_usa_fuel_type, DEFAULT_FUEL_TYPE};

const DECODE_VIN_URL: &str = "https://vpic.nhtsa.dot.gov/api/vehicles/DecodeVin";

/// NHTSA `DecodeVin` response: a flat list of variable/value pairs
/// rather than a structured object.
#[derive(Debug, Deserialize)]
struct DecodeVinResponse {
    #[serde(rename = "Message", default)]
    message: Option<String>,
    #[serde(rename = "Results", default)]
    results: Vec<DecodedVariable>,
}

#[derive(Debug, Deserialize)]
struct DecodedVariable {
    #[serde(rename = "Variable", default)]
    variable: Option<String>,
    #[serde(rename = "Value", default)]
    value: Option<String>,
}

/// Decode a VIN through the public NHTSA vPIC API. Any upstream fault
/// is logged and reported as no data.
pub async fn fetch(client: &Client, vin: &str) -> Option<VehicleData> {
    let url = format!("{DECODE_VIN_URL}/{vin}?format=json");

    let response = match client.get(&url).send().await {
        Ok(response) => response,
        Err(e) => {
            warn!("NHTSA request failed: {e}");
            return None;
        }
    };

    if !response.status().is_success() {
        warn!("NHTSA returned status {}.", response.status());
        return None;
    }

    let payload: DecodeVinResponse = match response.json().await {
        Ok(payload) => payload,
        Err(e) => {
            warn!("Could not read NHTSA response body: {e}");
            return None;
        }
    };

    decode(vin, &payload)
}

fn decode(vin: &str, payload: &DecodeVinResponse) -> Option<VehicleData> {
    if payload.results.is_empty()
        || payload
            .message
            .as_deref()
            .is_some_and(|message| message.contains("error"))
    {
        return None;
    }

    // vPIC reports every known variable, with "Not Applicable" or an
    // empty string standing in for values it has nothing for.
    let value = |name: &str| -> Option<&str> {
        payload
            .results
            .iter()
            .find(|result| result.variable.as_deref() == Some(name))
            .and_then(|result| result.value.as_deref())
            .filter(|value| !value.is_empty() && *value != "Not Applicable")
    };
    let text = |name: &str| value(name).map(str::to_string);

    let mut features = Vec::new();
    if value("Anti-lock Braking System (ABS)") == Some("Yes") {
        features.push("ABS".to_string());
    }
    if value("Electronic Stability Control (ESC)") == Some("Yes") {
        features.push("ESC".to_string());
    }
    if value("Traction Control System") == Some("Yes") {
        features.push("Traction Control".to_string());
    }
    if let Some(locations) = value("Airbag Locations") {
        features.push(format!("Airbags: {locations}"));
    }

    Some(VehicleData {
        make: text("Make"),
        model: text("Model"),
        model_year: text("Model Year"),
        vin: Some(vin.to_uppercase()),
        body_type: map_body_type(value("Body Class")),
        fuel_type: Some(
            value("Fuel Type - Primary")
                .map_or(DEFAULT_FUEL_TYPE, map_usa_fuel_type)
                .to_string(),
        ),
        engine_size: parse_f64(value("Displacement (L)")),
        engine_power: parse_f64(value("Engine Power (kW)")),
        doors: parse_u32(value("Doors")),
        seats: parse_u32(value("Seating Rows")),
        drive_type: text("Drive Type"),
        gearbox: text("Transmission Style"),
        cylinder: parse_u32(value("Engine Number of Cylinders")),
        fuel_consumption: parse_f64(value("Fuel Economy Combined (mpg)")),
        battery_range: parse_f64(value("Electric Vehicle Range (miles)")),
        charging_time: text("Battery Charging Time (hours)"),
        co2_emission: parse_f64(value("CO2 Equivalent Fuel Economy Combined (g/mi)")),
        vehicle_type: text("Vehicle Type"),
        no_of_gears: parse_u32(value("Number of Gears")),
        condition: None,
        features,
        ..VehicleData::default()
    })
}

// Strict parsing: a value vPIC pads with units or ranges is not a
// number we should guess at. Failures become None, never NaN.
fn parse_f64(value: Option<&str>) -> Option<f64> {
    value.and_then(|v| v.trim().parse().ok())
}

fn parse_u32(value: Option<&str>) -> Option<u32> {
    value.and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(results: serde_json::Value) -> DecodeVinResponse {
        serde_json::from_value(json!({
            "Count": 1,
            "Message": "Results returned successfully",
            "Results": results,
        }))
        .unwrap()
    }

    fn pair(variable: &str, value: &str) -> serde_json::Value {
        json!({ "Variable": variable, "Value": value })
    }

    #[test]
    fn decodes_a_populated_response() {
        let payload = payload(json!([
            pair("Make", "HONDA"),
            pair("Model", "Civic"),
            pair("Model Year", "2020"),
            pair("Body Class", "Sedan"),
            pair("Fuel Type - Primary", "Gasoline"),
            pair("Displacement (L)", "1.5"),
            pair("Engine Power (kW)", "134"),
            pair("Doors", "4"),
            pair("Seating Rows", "2"),
            pair("Drive Type", "FWD"),
            pair("Transmission Style", "CVT"),
            pair("Engine Number of Cylinders", "4"),
            pair("Anti-lock Braking System (ABS)", "Yes"),
            pair("Electronic Stability Control (ESC)", "Yes"),
            pair("Airbag Locations", "1st Row (Driver and Passenger)"),
        ]));

        let data = decode("1hgfc2f59la000001", &payload).unwrap();
        assert_eq!(data.make.as_deref(), Some("HONDA"));
        assert_eq!(data.model.as_deref(), Some("Civic"));
        assert_eq!(data.model_year.as_deref(), Some("2020"));
        assert_eq!(data.vin.as_deref(), Some("1HGFC2F59LA000001"));
        assert_eq!(data.body_type.as_deref(), Some("Sedan"));
        assert_eq!(data.fuel_type.as_deref(), Some("petrol"));
        assert_eq!(data.engine_size, Some(1.5));
        assert_eq!(data.engine_power, Some(134.0));
        assert_eq!(data.doors, Some(4));
        assert_eq!(data.cylinder, Some(4));
        assert_eq!(
            data.features,
            vec![
                "ABS".to_string(),
                "ESC".to_string(),
                "Airbags: 1st Row (Driver and Passenger)".to_string(),
            ]
        );
        // Registration data cannot tell new from used.
        assert_eq!(data.condition, None);
    }

    #[test]
    fn placeholder_values_count_as_missing() {
        let payload = payload(json!([
            pair("Make", "FORD"),
            pair("Model", ""),
            pair("Doors", "Not Applicable"),
        ]));

        let data = decode("VIN", &payload).unwrap();
        assert_eq!(data.make.as_deref(), Some("FORD"));
        assert_eq!(data.model, None);
        assert_eq!(data.doors, None);
    }

    #[test]
    fn unparseable_numbers_become_none() {
        let payload = payload(json!([
            pair("Make", "FORD"),
            pair("Displacement (L)", "3.5L V6"),
            pair("Doors", "four"),
            pair("Engine Power (kW)", "n/a"),
        ]));

        let data = decode("VIN", &payload).unwrap();
        assert_eq!(data.engine_size, None);
        assert_eq!(data.doors, None);
        assert_eq!(data.engine_power, None);
    }

    #[test]
    fn missing_fuel_type_falls_back_to_the_default() {
        let payload = payload(json!([pair("Make", "FORD")]));
        let data = decode("VIN", &payload).unwrap();
        assert_eq!(data.fuel_type.as_deref(), Some(DEFAULT_FUEL_TYPE));
    }

    #[test]
    fn flags_that_are_not_yes_are_omitted() {
        let payload = payload(json!([
            pair("Make", "FORD"),
            pair("Anti-lock Braking System (ABS)", "No"),
            pair("Traction Control System", "Not Applicable"),
        ]));

        let data = decode("VIN", &payload).unwrap();
        assert!(data.features.is_empty());
    }

    #[test]
    fn empty_results_yield_no_data() {
        let payload = payload(json!([]));
        assert!(decode("VIN", &payload).is_none());
    }

    #[test]
    fn upstream_error_message_yields_no_data() {
        let payload: DecodeVinResponse = serde_json::from_value(json!({
            "Message": "internal error occurred",
            "Results": [pair("Make", "FORD")],
        }))
        .unwrap();
        assert!(decode("VIN", &payload).is_none());
    }
}
