use std::collections::HashMap;
use std::sync::RwLock;

use log::{error, info};
use rocket::{
    fairing::{self, Fairing, Info, Kind},
    serde::json::Json,
    Build, Rocket, State,
};
use serde::{Deserialize, Serialize};
use shared::data::ApiAccess;

use crate::{
    authentication::{ApiUser, Role},
    error::Error,
    AppConfig,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub token: String,
    pub role: Role,
    #[serde(default)]
    pub api_access: ApiAccess,
}

/// The per-user collaborator this service consumes: token verification
/// plus the per-country API access flags. The backing storage is someone
/// else's problem; anything implementing this slots in.
pub trait UserStore: Send + Sync {
    fn user_by_token(&self, token: &str) -> Option<UserRecord>;
    fn api_access(&self, user_id: &str) -> Option<ApiAccess>;
    fn set_api_access(&self, user_id: &str, access: ApiAccess) -> Option<ApiAccess>;
}

/// In-memory store seeded from configuration.
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, UserRecord>>,
}

impl MemoryUserStore {
    pub fn seeded(users: Vec<UserRecord>) -> Self {
        Self {
            users: RwLock::new(
                users
                    .into_iter()
                    .map(|user| (user.id.clone(), user))
                    .collect(),
            ),
        }
    }
}

impl UserStore for MemoryUserStore {
    fn user_by_token(&self, token: &str) -> Option<UserRecord> {
        let users = self.users.read().expect("user store lock poisoned");
        users.values().find(|user| user.token == token).cloned()
    }

    fn api_access(&self, user_id: &str) -> Option<ApiAccess> {
        let users = self.users.read().expect("user store lock poisoned");
        users.get(user_id).map(|user| user.api_access)
    }

    fn set_api_access(&self, user_id: &str, access: ApiAccess) -> Option<ApiAccess> {
        let mut users = self.users.write().expect("user store lock poisoned");
        let user = users.get_mut(user_id)?;
        user.api_access = access;
        Some(user.api_access)
    }
}

pub struct UserStoreFairing {}

impl UserStoreFairing {
    pub fn fairing() -> Self {
        Self {}
    }
}

#[rocket::async_trait]
impl Fairing for UserStoreFairing {
    fn info(&self) -> Info {
        Info {
            name: "User store",
            kind: Kind::Ignite | Kind::Singleton,
        }
    }

    async fn on_ignite(&self, rocket: Rocket<Build>) -> fairing::Result {
        let Some(config) = rocket.state::<AppConfig>() else {
            error!("User store requires the application config to be loaded first.");
            return Err(rocket);
        };

        let store = MemoryUserStore::seeded(config.users.clone());
        info!("User store seeded with {} users.", config.users.len());

        Ok(rocket
            .manage(Box::new(store) as Box<dyn UserStore>)
            .mount("/api/users", routes![get_api_access, patch_api_access]))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiAccessBody {
    api_access: ApiAccess,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiAccessUpdate {
    user_id: String,
    api_access: ApiAccess,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiAccessUpdated {
    message: String,
    api_access: ApiAccess,
}

#[get("/api-access")]
async fn get_api_access(
    user: ApiUser,
    store: &State<Box<dyn UserStore>>,
) -> Result<Json<ApiAccessBody>, Error> {
    let api_access = store.api_access(&user.id).ok_or(Error::UserNotFound)?;
    Ok(Json(ApiAccessBody { api_access }))
}

#[patch("/api-access", format = "application/json", data = "<update>")]
async fn patch_api_access(
    user: ApiUser,
    update: Json<ApiAccessUpdate>,
    store: &State<Box<dyn UserStore>>,
) -> Result<Json<ApiAccessUpdated>, Error> {
    if user.role != Role::Superadmin {
        return Err(Error::SuperadminRequired);
    }

    let api_access = store
        .set_api_access(&update.user_id, update.api_access)
        .ok_or(Error::UserNotFound)?;

    Ok(Json(ApiAccessUpdated {
        message: "API access updated successfully".to_string(),
        api_access,
    }))
}
