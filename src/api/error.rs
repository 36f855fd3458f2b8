use rocket::http::{ContentType, Status};
use rocket::request::Request;
use rocket::response::{self, Responder, Response};
use std::io::Cursor;

#[derive(Debug, Clone)]
pub enum Error {
    /// Appliance rejected the credentials, or rejected a freshly regenerated
    /// token. Not retried further.
    AuthenticationError(String),
    /// Non-200, malformed or domain-error appliance response after the single
    /// 401 retry was exhausted.
    ApplianceError(String),
    /// Outbound call to the appliance exceeded its deadline. Never retried.
    GatewayTimeout,
    InternalError,
}

fn json_error(status: Status, detail: String) -> response::Result<'static> {
    let body = serde_json::json!({ "detail": detail }).to_string();
    Response::build()
        .status(status)
        .sized_body(body.len(), Cursor::new(body))
        .header(ContentType::JSON)
        .ok()
}

impl<'r> Responder<'r, 'static> for Error {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        match self {
            Error::GatewayTimeout => json_error(
                Status::GatewayTimeout,
                String::from("Timeout while talking with Powerwall"),
            ),
            Error::AuthenticationError(s) => json_error(
                Status::InternalServerError,
                format!("Error while authenticating to the Powerwall: {}", s),
            ),
            Error::ApplianceError(s) => json_error(
                Status::InternalServerError,
                format!("Powerwall error: {}", s),
            ),
            Error::InternalError => {
                json_error(Status::InternalServerError, String::from("Internal error"))
            }
        }
    }
}
