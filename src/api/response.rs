use crate::model;
use serde::Deserialize;

/// Reserved, non-usable battery margin in percentage points. Raw SOC is
/// rescaled over the remaining usable range.
pub const SOC_ADJUSTMENT: f64 = 5.0;

/// Body of a successful `/api/login/Basic` response. The appliance also
/// returns `email`, `loginTime` etc., which the gateway ignores. A missing
/// `token` field is a malformed response and must fail loudly, so it stays
/// an `Option` here and is checked at the call site.
#[derive(Deserialize)]
pub struct Login {
    pub token: Option<String>,
}

/// Error field the appliance attaches to non-200 responses.
#[derive(Deserialize)]
pub struct ErrorBody {
    pub error: Option<String>,
}

/// Body of `/api/system_status/soe`.
#[derive(Deserialize)]
pub struct Soe {
    pub percentage: f64,
}

#[derive(Deserialize)]
pub struct Meter {
    pub instant_power: f64,
}

/// Body of `/api/meters/aggregates`, reduced to the four meters the gateway
/// exposes.
#[derive(Deserialize)]
pub struct Aggregates {
    pub site: Meter,
    pub battery: Meter,
    pub load: Meter,
    pub solar: Meter,
}

impl Soe {
    /// Rescale the raw percentage over the usable capacity range:
    /// `(raw - 5) * 100 / 95`, clamped to [0, 100] before rounding.
    pub fn into_soc(self) -> model::Soc {
        let adjusted =
            (self.percentage - SOC_ADJUSTMENT) * (100.0 / (100.0 - SOC_ADJUSTMENT));
        model::Soc {
            raw_soc: self.percentage.round() as i64,
            adjusted_soc: adjusted.clamp(0.0, 100.0).round() as i64,
        }
    }
}

impl Aggregates {
    /// Round every meter to whole watts. Negative solar readings are sensor
    /// artifacts and are floored to zero; the other meters pass through
    /// unclamped (negative battery means discharge).
    pub fn into_power(self) -> model::PowerAggregates {
        model::PowerAggregates {
            site: self.site.instant_power.round() as i64,
            battery: self.battery.instant_power.round() as i64,
            load: self.load.instant_power.round() as i64,
            solar: self.solar.instant_power.max(0.0).round() as i64,
        }
    }
}

/// Best-effort extraction of the appliance's `error` field from a response
/// body; falls back to the raw body when it does not parse.
pub fn appliance_error(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody { error: Some(error) }) => error,
        _ => body.to_string(),
    }
}
