pub mod endpoint;
pub mod error;
pub mod response;
pub mod token;

use crate::model::{Api, Token};
pub use error::Error;
use http::StatusCode;
pub use token::TokenStore;

use std::future::Future;

/// Name of the cookie carrying the session token on authenticated calls.
const AUTH_COOKIE: &str = "AuthCookie";

/// Fixed service identity for the login endpoint; the appliance only accepts
/// "customer" for local-network accounts.
const LOGIN_USERNAME: &str = "customer";

/// Map a reqwest transport failure to Error. A timeout is terminal and is
/// reported as such; everything else counts as an appliance failure.
fn map_transport_err(error: reqwest::Error) -> Error {
    if error.is_timeout() {
        Error::GatewayTimeout
    } else {
        Error::ApplianceError(error.to_string())
    }
}

async fn read_body(response: reqwest::Response) -> Result<String, Error> {
    response
        .text()
        .await
        .map_err(|e| Error::ApplianceError(format!("Error reading appliance response: {}", e)))
}

/// Perform the login exchange and return the session token.
///
/// A 401 means the appliance rejected the credentials; any other non-200 or
/// a 200 body without a `token` field is an appliance failure. An empty or
/// missing token is never returned silently.
pub async fn login(api: &Api) -> Result<Token, Error> {
    let url = format!("{}{}", api.base_url, endpoint::LOGIN);
    let client_info = serde_json::json!({ "timezone": api.timezone }).to_string();

    let response = api
        .client
        .get(url)
        .query(&[
            ("username", LOGIN_USERNAME),
            ("password", api.password.as_str()),
            ("email", api.email.as_str()),
            ("clientInfo", client_info.as_str()),
        ])
        .send()
        .await
        .map_err(map_transport_err)?;

    let status = response.status();
    let body = read_body(response).await?;

    match status {
        StatusCode::OK => serde_json::from_str::<response::Login>(&body)
            .ok()
            .and_then(|login| login.token)
            .ok_or_else(|| {
                Error::ApplianceError(format!("login response carries no token: {}", body))
            }),
        StatusCode::UNAUTHORIZED => {
            Err(Error::AuthenticationError(response::appliance_error(&body)))
        }
        status => Err(Error::ApplianceError(format!(
            "login failed with status {}: {}",
            status,
            response::appliance_error(&body)
        ))),
    }
}

/// Authenticated GET against an appliance endpoint, token presented as the
/// auth cookie. This is the capability handed to `with_auth`.
pub async fn read(
    api: &Api,
    endpoint: &endpoint::Endpoint,
    token: Token,
) -> Result<reqwest::Response, reqwest::Error> {
    let url = format!("{}{}", api.base_url, endpoint);

    api.client
        .get(url)
        .header(http::header::COOKIE, format!("{}={}", AUTH_COOKIE, token))
        .send()
        .await
}

/// Run one appliance call with a valid session token, refreshing it once if
/// the appliance rejects it.
///
/// The cached token is fetched (logging in if none is cached) and passed to
/// `call`. On a 401 the token is regenerated and `call` is invoked exactly
/// once more; repeated 401s from a misbehaving appliance or wrong credentials
/// must not loop. A transport timeout is terminal at any point and never
/// triggers a retry. Returns the body of the 200 response.
pub async fn with_auth<F, Fut>(api: &Api, tokens: &TokenStore, call: F) -> Result<String, Error>
where
    F: Fn(Token) -> Fut,
    Fut: Future<Output = Result<reqwest::Response, reqwest::Error>>,
{
    let token = tokens.get_or_create(api, false).await?;
    let mut response = call(token).await.map_err(map_transport_err)?;
    log::info!("appliance responded {}", response.status());

    if response.status() == StatusCode::UNAUTHORIZED {
        log::info!("token rejected, trying to regenerate");
        let token = tokens.get_or_create(api, true).await?;
        response = call(token).await.map_err(map_transport_err)?;
        log::info!("appliance responded {} after retry", response.status());
    }

    let status = response.status();
    let body = read_body(response).await?;

    match status {
        StatusCode::OK => Ok(body),
        StatusCode::UNAUTHORIZED => {
            Err(Error::AuthenticationError(response::appliance_error(&body)))
        }
        status => Err(Error::ApplianceError(format!(
            "appliance responded {}: {}",
            status,
            response::appliance_error(&body)
        ))),
    }
}
