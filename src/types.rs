use serde::{Deserialize, Serialize};

use crate::advisory::{AdvisoryKind, Phase};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisoryRequest {
    pub junction_id: String,
    pub lat: f64,
    pub lng: f64,
    pub timestamp: Option<f64>, // seconds since epoch; now if absent
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdvisoryResponse {
    pub junction: String,
    pub distance: f64,          // meters, rounded
    pub signal_status: Phase,
    pub seconds_to_change: f64,
    pub recommended_speed: f64, // km/h, rounded
    pub message: String,
    pub kind: AdvisoryKind,
}
