use chrono::NaiveDate;
use log::warn;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use shared::data::{Mileage, VehicleData};
use shared::mappings::{map_body_type, map_uk_fuel_type, DEFAULT_FUEL_TYPE};

const VEHICLE_ENQUIRY_URL: &str =
    "https://driver-vehicle-licensing.api.gov.uk/vehicle-enquiry/v1/vehicles";

/// DVLA vehicle-enquiry response. A single flat object; every field may
/// be absent depending on the vehicle's records.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EnquiryResponse {
    make: Option<String>,
    model: Option<String>,
    colour: Option<String>,
    fuel_type: Option<String>,
    year_of_manufacture: Option<u32>,
    engine_capacity: Option<f64>,
    co2_emissions: Option<f64>,
    type_approval: Option<String>,
    mot_expiry_date: Option<NaiveDate>,
    number_of_seats: Option<u32>,
    mileage: Option<f64>,
    vehicle_category: Option<String>,
    wheelplan: Option<String>,
    mot_status: Option<String>,
    tax_status: Option<String>,
    euro_status: Option<String>,
}

/// Look up a registration plate through the DVLA vehicle-enquiry API.
/// Requires the service's `x-api-key`. Any upstream fault is logged and
/// reported as no data.
pub async fn fetch(client: &Client, api_key: &str, registration: &str) -> Option<VehicleData> {
    let plate = registration.to_uppercase();

    let response = match client
        .post(VEHICLE_ENQUIRY_URL)
        .header("x-api-key", api_key)
        .json(&json!({ "registrationNumber": plate }))
        .send()
        .await
    {
        Ok(response) => response,
        Err(e) => {
            warn!("DVLA request failed: {e}");
            return None;
        }
    };

    if !response.status().is_success() {
        warn!("DVLA returned status {}.", response.status());
        return None;
    }

    let payload: EnquiryResponse = match response.json().await {
        Ok(payload) => payload,
        Err(e) => {
            warn!("Could not read DVLA response body: {e}");
            return None;
        }
    };

    Some(decode(&plate, &payload))
}

fn decode(plate: &str, payload: &EnquiryResponse) -> VehicleData {
    let mut features = Vec::new();
    if payload.mot_status.as_deref() == Some("Valid") {
        features.push("valid-mot".to_string());
    }
    if payload.tax_status.as_deref() == Some("Taxed") {
        features.push("road-tax-paid".to_string());
    }
    if let Some(euro) = payload.euro_status.as_deref() {
        features.push(format!("Euro {euro}"));
    }

    VehicleData {
        make: payload.make.clone(),
        model: payload.model.clone(),
        color: payload.colour.clone(),
        fuel_type: Some(
            payload
                .fuel_type
                .as_deref()
                .map_or(DEFAULT_FUEL_TYPE, map_uk_fuel_type)
                .to_string(),
        ),
        model_year: payload.year_of_manufacture.map(|year| year.to_string()),
        engine_size: payload.engine_capacity,
        co2_emission: payload.co2_emissions,
        registration_plate: Some(plate.to_string()),
        body_type: map_body_type(payload.type_approval.as_deref()),
        registration_expiry: payload.mot_expiry_date,
        // DVLA does not report door count. Seats are a workable proxy:
        // anything carrying more than 7 people is a 5-door shape.
        doors: Some(if payload.number_of_seats.is_some_and(|seats| seats > 7) {
            5
        } else {
            4
        }),
        seats: payload.number_of_seats,
        mileage: payload.mileage.map(Mileage::miles),
        condition: None,
        vehicle_type: Some(
            payload
                .vehicle_category
                .clone()
                .unwrap_or_else(|| "Car".to_string()),
        ),
        drive_type: payload.wheelplan.clone(),
        features,
        ..VehicleData::default()
    }
}
