#[macro_use]
extern crate rocket;

use config::Config;
use powerwall_rs::model::{Api, PowerAggregates, Soc, Watts};
use powerwall_rs::{api, Error, TokenStore};
use rocket::serde::json::Json;
use rocket::{Build, Rocket, State};
use std::time::Duration;

const DEFAULT_TIMEZONE: &str = "Europe/Berlin";
const DEFAULT_TIMEOUT_SECS: i64 = 10;

#[derive(Clone, serde::Deserialize)]
pub struct GatewayConfig {
    powerwall: String,
    user_email: String,
    user_password: String,
    timezone: String,
    timeout_secs: u64,
}

/// Structure containing state for API handlers.
pub struct StateData {
    api: Api,
    tokens: TokenStore,
}

pub fn read_settings() -> GatewayConfig {
    let mut settings = Config::default();
    settings
        .merge(config::Environment::with_prefix("PW"))
        .unwrap()
        .set_default("timezone", DEFAULT_TIMEZONE)
        .unwrap()
        .set_default("timeout_secs", DEFAULT_TIMEOUT_SECS)
        .unwrap();

    settings.try_into().expect("Configuration error")
}

#[get("/soc")]
async fn soc_route(state: &State<StateData>) -> Result<Json<Soc>, Error> {
    log::info!("get_soc");
    powerwall_rs::soc(&state.api, &state.tokens).await.map(Json)
}

#[get("/aggregates")]
async fn aggregates_route(state: &State<StateData>) -> Result<Json<PowerAggregates>, Error> {
    log::info!("get_aggregates");
    powerwall_rs::aggregates(&state.api, &state.tokens)
        .await
        .map(Json)
}

/// Battery instant power only; kept for downstream clients that predate
/// `/aggregates`.
#[get("/power")]
async fn power_route(state: &State<StateData>) -> Result<Json<Watts>, Error> {
    log::info!("get_power");
    powerwall_rs::aggregates(&state.api, &state.tokens)
        .await
        .map(|power| Json(power.battery))
}

#[launch]
fn rocket() -> Rocket<Build> {
    env_logger::init();

    let settings = read_settings();
    log::info!(
        "starting powerwall gateway ({}, {})",
        settings.powerwall,
        settings.user_email
    );

    let api = api(
        format!("https://{}", settings.powerwall),
        settings.user_email,
        settings.user_password,
        settings.timezone,
        Duration::from_secs(settings.timeout_secs),
    )
    .expect("HTTP client error");

    let state = StateData {
        api,
        tokens: TokenStore::new(),
    };

    rocket::build()
        .manage(state)
        .mount("/", routes![soc_route, aggregates_route, power_route])
}
