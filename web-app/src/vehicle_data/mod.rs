use log::info;
use reqwest::Client;
use shared::data::{Country, UnknownCountry, VehicleData};

use crate::{error::Error, users::UserStore};

pub mod au;
pub mod uk;
pub mod usa;

/// Route a lookup to the right market adapter.
///
/// Checks run in order: the caller must exist in the user store, the
/// country must be one we support, and the caller's flag for that
/// country must be enabled. Only then does exactly one outbound call
/// happen. Adapter faults never surface here; an adapter that cannot
/// produce data returns `None` and the caller sees "no vehicle data".
pub async fn resolve(
    store: &dyn UserStore,
    user_id: &str,
    country: &str,
    identifier: &str,
    client: &Client,
    dvla_api_key: &str,
) -> Result<VehicleData, Error> {
    let access = store.api_access(user_id).ok_or(Error::UserNotFound)?;

    let country: Country = country
        .parse()
        .map_err(|UnknownCountry(raw)| Error::UnsupportedCountry(raw))?;

    if !access.allows(country) {
        return Err(Error::ApiAccessDenied(country.to_string().to_uppercase()));
    }

    // Identifiers are left out of the log on purpose; plates and VINs
    // identify an owner's vehicle.
    info!("Vehicle lookup for user {user_id}, market {country}.");

    let data = match country {
        Country::Uk => uk::fetch(client, dvla_api_key, identifier).await,
        Country::Usa => usa::fetch(client, identifier).await,
        Country::Au => au::fetch(identifier).await,
    };

    data.ok_or(Error::NoVehicleData)
}
