use std::io::Cursor;

use rocket::{
    http::{ContentType, Status},
    response::{self, Responder},
    Request, Response,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Identifier and country are required")]
    MissingLookupFields,
    #[error("Unsupported country: {0}")]
    UnsupportedCountry(String),
    #[error("Access denied for {0} API")]
    ApiAccessDenied(String),
    #[error("No vehicle data found")]
    NoVehicleData,
    #[error("User not found")]
    UserNotFound,
    #[error("Authentication required")]
    NotLoggedIn,
    #[error("Access denied")]
    SuperadminRequired,
    #[error("User store is not available")]
    UserStoreNotFound,
}

pub trait ErrorResponder {
    fn response(&self) -> (Status, String);
}

impl ErrorResponder for Error {
    fn response(&self) -> (Status, String) {
        (
            match self {
                Error::MissingLookupFields | Error::UnsupportedCountry(_) => Status::BadRequest,
                Error::NotLoggedIn => Status::Unauthorized,
                Error::ApiAccessDenied(_) | Error::SuperadminRequired => Status::Forbidden,
                Error::NoVehicleData | Error::UserNotFound => Status::NotFound,
                Error::UserStoreNotFound => Status::InternalServerError,
            },
            self.to_string(),
        )
    }
}

impl<'r> Responder<'r, 'static> for Error {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let (status, message) = self.response();
        // Callers always get a structured body, never a raw upstream
        // error or a stack trace.
        let body = serde_json::json!({ "error": message }).to_string();
        Response::build()
            .status(status)
            .header(ContentType::JSON)
            .sized_body(body.len(), Cursor::new(body))
            .ok()
    }
}
