use rocket::{
    http::Status,
    request::{FromRequest, Outcome},
    Request,
};
use serde::{Deserialize, Serialize};

use crate::{error::Error, users::UserStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Superadmin,
}

/// The authenticated caller of an API route, resolved from a bearer
/// token. Token issuance lives outside this service; we only verify
/// presented tokens against the user store.
#[derive(Debug, Clone)]
pub struct ApiUser {
    pub id: String,
    pub role: Role,
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for ApiUser {
    type Error = Error;

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let token = req
            .headers()
            .get_one("Authorization")
            .and_then(|header| header.strip_prefix("Bearer "))
            .or_else(|| req.cookies().get("LoginToken").map(|cookie| cookie.value()));

        let Some(token) = token else {
            return Outcome::Failure((Status::Unauthorized, Error::NotLoggedIn));
        };
        let Some(store) = req.rocket().state::<Box<dyn UserStore>>() else {
            return Outcome::Failure((Status::InternalServerError, Error::UserStoreNotFound));
        };

        match store.user_by_token(token) {
            Some(user) => Outcome::Success(ApiUser {
                id: user.id,
                role: user.role,
            }),
            None => Outcome::Failure((Status::Unauthorized, Error::NotLoggedIn)),
        }
    }
}
