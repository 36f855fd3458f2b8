mod api;
pub mod model;

use api::endpoint;
use api::response;
use model::{Api, PowerAggregates, Soc};
use std::time::Duration;

pub use api::{Error, TokenStore};

/// Build the appliance principal with a shared HTTP client. Certificate
/// validation is intentionally disabled: the appliance serves a self-signed
/// certificate on the local network. Every outbound call is bounded by
/// `timeout`.
pub fn api(
    base_url: String,
    email: String,
    password: String,
    timezone: String,
    timeout: Duration,
) -> Result<Api, Error> {
    let client = reqwest::ClientBuilder::new()
        .danger_accept_invalid_certs(true)
        .timeout(timeout)
        .build()
        .or(Err(Error::InternalError))?;

    Ok(Api {
        base_url,
        email,
        password,
        timezone,
        client,
    })
}

fn parse<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, Error> {
    serde_json::from_str(body).map_err(|e| {
        Error::ApplianceError(format!("unexpected appliance response ({}): {}", e, body))
    })
}

/// Read the state of charge from the appliance, returning both the raw and
/// the usable-range adjusted percentage.
pub async fn soc(api: &Api, tokens: &TokenStore) -> Result<Soc, Error> {
    let body = api::with_auth(api, tokens, |token| api::read(api, endpoint::SOE, token)).await?;

    parse::<response::Soe>(&body).map(response::Soe::into_soc)
}

/// Read the instant power of the site, battery, load and solar meters.
pub async fn aggregates(api: &Api, tokens: &TokenStore) -> Result<PowerAggregates, Error> {
    let body = api::with_auth(api, tokens, |token| {
        api::read(api, endpoint::AGGREGATES, token)
    })
    .await?;

    parse::<response::Aggregates>(&body).map(response::Aggregates::into_power)
}
