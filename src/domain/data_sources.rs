// Runtime data snapshot supplied once per render pass
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RuntimeDataSources {
    pub telemetry: Telemetry,
    pub session: Session,
    #[serde(default)]
    pub alerts: Vec<Alert>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Telemetry {
    pub heart_rate: f64,
    pub mood_index: f64,
    #[serde(default)]
    pub signal_series: Vec<SignalPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct SignalPoint {
    pub t: f64,
    pub y: f64,
}

impl SignalPoint {
    pub fn new(t: f64, y: f64) -> Self {
        Self { t, y }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub operator_note: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Info,
    Warning,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Alert {
    pub id: String,
    pub level: AlertLevel,
    pub message: String,
    pub ts: String,
}

impl Alert {
    /// Parsed RFC 3339 timestamp, `None` when the producer sent something else.
    pub fn timestamp(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.ts).ok()
    }
}
