use chrono::{DateTime, Utc};
use serde::Serialize;

/// One reading of a multi-day forecast feed
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSample {
    pub timestamp: DateTime<Utc>,
    pub temperature: f64,
    pub humidity: u8,
    pub description: String,
    pub icon_code: String,
}

/// Condensed forecast for one calendar day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    pub date: DateTime<Utc>,
    #[serde(rename = "temp_max")]
    pub temperature_max: f64,
    #[serde(rename = "temp_min")]
    pub temperature_min: f64,
    pub description: String,
    #[serde(rename = "icon")]
    pub icon_code: String,
    pub humidity: u8,
}
