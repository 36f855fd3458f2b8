use serde::Serialize;

/// Session credential issued by the appliance login endpoint. Opaque, carries
/// no expiry hint; staleness is only ever discovered through a 401.
pub type Token = String;

pub type Watts = i64;

/// Immutable appliance principal plus the shared HTTP client. Built once at
/// startup, read-only afterwards.
#[derive(Debug, Clone)]
pub struct Api {
    pub base_url: String,
    pub email: String,
    pub password: String,
    pub timezone: String,
    pub client: reqwest::Client,
}

/// State of charge as returned to downstream clients. `adjusted_soc` rescales
/// the raw percentage over the usable capacity range, clamped to [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Soc {
    pub raw_soc: i64,
    pub adjusted_soc: i64,
}

/// Instant power of the four appliance meters, in watts. `solar` is never
/// negative; `battery` is negative while discharging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PowerAggregates {
    pub site: Watts,
    pub battery: Watts,
    pub load: Watts,
    pub solar: Watts,
}
