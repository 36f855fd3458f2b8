pub type Endpoint = str;

pub const LOGIN: &Endpoint = "/api/login/Basic";
pub const SOE: &Endpoint = "/api/system_status/soe";
pub const AGGREGATES: &Endpoint = "/api/meters/aggregates";
