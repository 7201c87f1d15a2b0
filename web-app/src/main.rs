use rocket::{
    fairing::AdHoc,
    figment::Figment,
    http::Status,
    response::status::Custom,
    serde::json::Json,
    Build, Request, Rocket, State,
};
use serde::Deserialize;
use shared::data::{LookupRequest, LookupResponse};

use authentication::ApiUser;
use error::Error;
use users::{UserRecord, UserStore, UserStoreFairing};

mod authentication;
mod error;
mod users;
mod vehicle_data;

#[macro_use]
extern crate rocket;

/// Application configuration, read through Rocket's figment
/// (`Rocket.toml` or `ROCKET_*` environment variables).
#[derive(Debug, Deserialize)]
pub struct AppConfig {
    /// `x-api-key` for the DVLA vehicle-enquiry service.
    pub dvla_api_key: String,
    /// Seed users for the in-memory user store.
    #[serde(default)]
    pub users: Vec<UserRecord>,
}

#[post("/api/vehicle-data", format = "application/json", data = "<request>")]
async fn lookup_vehicle_data(
    user: ApiUser,
    request: Json<LookupRequest>,
    store: &State<Box<dyn UserStore>>,
    client: &State<reqwest::Client>,
    config: &State<AppConfig>,
) -> Result<Json<LookupResponse>, Error> {
    let identifier = request.identifier.trim();
    let country = request.country.trim();
    if identifier.is_empty() || country.is_empty() {
        return Err(Error::MissingLookupFields);
    }

    let data = vehicle_data::resolve(
        store.inner().as_ref(),
        &user.id,
        country,
        identifier,
        client.inner(),
        &config.dvla_api_key,
    )
    .await?;

    Ok(Json(LookupResponse { data }))
}

// Guard failures and routing errors land here; callers get the same
// JSON error shape as route-level failures.
#[catch(default)]
fn default_catcher(status: Status, _req: &Request<'_>) -> Custom<Json<serde_json::Value>> {
    Custom(
        status,
        Json(serde_json::json!({ "error": status.reason_lossy() })),
    )
}

fn server(figment: Figment) -> Rocket<Build> {
    rocket::custom(figment)
        .attach(AdHoc::config::<AppConfig>())
        .attach(UserStoreFairing::fairing())
        .manage(reqwest::Client::new())
        .register("/", catchers![default_catcher])
        .mount("/", routes![lookup_vehicle_data])
}

#[launch]
fn rocket() -> _ {
    server(rocket::Config::figment())
}
